//! Кодирование полей EMV QR: тег(2) + длина(2, десятичная) + значение.

use crate::model::Field;

/// Длина считается в символах (UTF-16 code units, как в JS-строке), не в байтах.
/// Значения длиннее 99 символов переполняют поле длины; ограничение не проверяется.
pub fn encode_field(tag: &str, value: &str) -> String {
    format!("{tag}{:02}{value}", value.encode_utf16().count())
}

/// Склеивает поля без разделителей, в переданном порядке.
pub fn encode_all(fields: &[Field]) -> String {
    fields.iter().map(Field::encode).collect()
}

impl Field {
    pub fn encode(&self) -> String {
        encode_field(&self.tag, &self.value)
    }
}

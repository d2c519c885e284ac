//! Доменные модели — нормализованный слой между ядром EMV и форматами пакетов.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Какой веткой нормализации получен идентификатор.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ProxyKind {
    /// 10 цифр: местный мобильный номер, переписанный в `0066...`.
    Mobile,
    /// 13 цифр: национальный ID или e-wallet, их не различить по длине.
    NationalIdOrEWallet,
    /// 15 и более цифр: длинные банковские идентификаторы.
    BankAccount,
    /// Любая другая длина — пропускается как есть.
    Unrecognized,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NormalizedProxyId {
    pub kind: ProxyKind,
    pub digits: String,
}

impl NormalizedProxyId {
    pub fn as_str(&self) -> &str {
        &self.digits
    }
}

/// Поле TLV. Длина не хранится: она всегда выводится из `value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub tag: String,
    pub value: String,
}

impl Field {
    pub fn new(tag: &str, value: impl Into<String>) -> Self {
        Self {
            tag: tag.to_string(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchEntry {
    pub target: String,
    #[serde(default, with = "rust_decimal::serde::str_option", skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
}

impl BatchEntry {
    pub fn new(target: impl Into<String>, amount: Option<Decimal>) -> Self {
        Self {
            target: target.into(),
            amount,
            payload: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Batch {
    pub entries: Vec<BatchEntry>,
}

impl Batch {
    /// Заполняет `payload` у всех записей. Пустая строка остаётся как `Some("")`,
    /// чтобы было видно, для каких целей генерация не удалась.
    pub fn generate(&mut self) {
        for e in &mut self.entries {
            e.payload = Some(crate::emv::payload::generate_payload(&e.target, e.amount));
        }
    }

    pub fn failed(&self) -> impl Iterator<Item = &BatchEntry> {
        self.entries
            .iter()
            .filter(|e| e.payload.as_deref().is_some_and(str::is_empty))
    }
}

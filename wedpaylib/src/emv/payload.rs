//! Сборка payload PromptPay по шаблону EMV QR (merchant presented mode).
//!
//! Порядок полей фиксирован: 00, 01, 29{00,01}, 58, 53, [54], 63.
//! Верификаторы принимают только этот порядок.

use super::{crc, normalize, tlv};
use crate::model::Field;
use rust_decimal::{Decimal, RoundingStrategy};

pub const TAG_FORMAT_INDICATOR: &str = "00";
pub const TAG_POINT_OF_INITIATION: &str = "01";
pub const TAG_MERCHANT_ACCOUNT: &str = "29";
pub const TAG_COUNTRY: &str = "58";
pub const TAG_CURRENCY: &str = "53";
pub const TAG_AMOUNT: &str = "54";
pub const TAG_CRC: &str = "63";

/// Вложенные теги внутри поля 29.
pub const SUBTAG_APPLICATION_ID: &str = "00";
pub const SUBTAG_PROXY: &str = "01";

pub const FORMAT_INDICATOR: &str = "01";
pub const PROMPTPAY_AID: &str = "A000000677010111";
pub const COUNTRY_TH: &str = "TH";
/// ISO 4217, тайский бат.
pub const CURRENCY_THB: &str = "764";

const POI_STATIC: &str = "12";
const POI_DYNAMIC: &str = "11";

/// Тег и длина поля CRC; контрольная сумма считается вместе с ними.
pub const CRC_PREFIX: &str = "6304";

/// Сумма с ровно двумя знаками после запятой (округление half away from zero).
/// Отрицательные значения не отклоняются.
///
/// Риск совместимости с JS `Number.toFixed(2)` над f64: для сумм с тремя и более знаками
/// результат расходится (`1.005` там `1.00`, здесь `1.01`; `2.675` там `2.67`; `-0.001` там
/// `-0.00`), а с ним поле 54 и CRC. Суммы с точностью до сатанга (два знака) совпадают всегда.
pub fn format_amount(amount: Decimal) -> String {
    let mut a = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    a.rescale(2);
    a.to_string()
}

/// Нулевая сумма считается отсутствующей: QR остаётся многоразовым.
fn effective_amount(amount: Option<Decimal>) -> Option<Decimal> {
    amount.filter(|a| !a.is_zero())
}

pub fn merchant_account(normalized_id: &str) -> String {
    tlv::encode_all(&[
        Field::new(SUBTAG_APPLICATION_ID, PROMPTPAY_AID),
        Field::new(SUBTAG_PROXY, normalized_id),
    ])
}

/// Поля тела payload (без CRC) в порядке шаблона.
pub fn fields(normalized_id: &str, amount: Option<Decimal>) -> Vec<Field> {
    let amount = effective_amount(amount);
    let poi = if amount.is_some() { POI_DYNAMIC } else { POI_STATIC };

    let mut out = vec![
        Field::new(TAG_FORMAT_INDICATOR, FORMAT_INDICATOR),
        Field::new(TAG_POINT_OF_INITIATION, poi),
        Field::new(TAG_MERCHANT_ACCOUNT, merchant_account(normalized_id)),
        Field::new(TAG_COUNTRY, COUNTRY_TH),
        Field::new(TAG_CURRENCY, CURRENCY_THB),
    ];
    if let Some(a) = amount {
        out.push(Field::new(TAG_AMOUNT, format_amount(a)));
    }
    out
}

/// Тело payload без контрольной суммы. Пустой идентификатор сюда попадать не должен:
/// [`generate_payload`] обрывается раньше.
pub fn assemble(normalized_id: &str, amount: Option<Decimal>) -> String {
    tlv::encode_all(&fields(normalized_id, amount))
}

/// Полная строка для QR. Пустая строка — идентификатор извлечь не удалось.
pub fn generate_payload(target: &str, amount: Option<Decimal>) -> String {
    let target_id = normalize::normalize(target);
    if target_id.is_empty() {
        return String::new();
    }

    let mut data = assemble(&target_id, amount);
    data.push_str(CRC_PREFIX);
    let crc = crc::crc16(&data);
    data.push_str(&crc);

    tracing::debug!(len = data.len(), %crc, "promptpay payload generated");
    data
}

//! Нормализация прокси-идентификатора PromptPay (телефон, национальный ID, e-wallet).

use crate::model::{NormalizedProxyId, ProxyKind};

const THAI_COUNTRY_PREFIX: &str = "0066";

/// Классифицирует и переформатирует сырой идентификатор.
/// `None` — в строке нет ни одной цифры.
pub fn classify(raw: &str) -> Option<NormalizedProxyId> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        tracing::debug!("no digits in proxy identifier");
        return None;
    }

    let (kind, digits) = match digits.len() {
        13 => (ProxyKind::NationalIdOrEWallet, digits),
        // ведущая цифра — транковый префикс "0"
        10 => (ProxyKind::Mobile, format!("{THAI_COUNTRY_PREFIX}{}", &digits[1..])),
        n if n >= 15 => (ProxyKind::BankAccount, digits),
        n => {
            tracing::warn!(len = n, "unrecognized proxy identifier length, passing through");
            (ProxyKind::Unrecognized, digits)
        }
    };
    tracing::debug!(?kind, len = digits.len(), "proxy identifier normalized");

    Some(NormalizedProxyId { kind, digits })
}

/// Строковая форма [`classify`]: пустая строка сигнализирует о неудаче.
pub fn normalize(raw: &str) -> String {
    classify(raw).map(|id| id.digits).unwrap_or_default()
}

//! wedpaylib — PromptPay QR payload для свадебного приглашения, пакетная генерация,
//! конфигурация сайта и перевод цветов темы в Oklch.

pub mod color;
pub mod config;
pub mod error;
pub mod model;
pub mod traits;

pub mod emv {
    pub mod crc;
    pub mod normalize;
    pub mod payload;
    pub mod tlv;
}

pub mod formats {
    pub mod csv;
    pub mod json;
    pub mod text;
}

pub use emv::payload::generate_payload;

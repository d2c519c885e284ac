//! Перевод hex-цвета темы в Oklch (sRGB → linear → XYZ D65 → Oklab → Oklch).

use crate::error::{Result, WedpayError};
use regex::Regex;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oklch {
    pub l: f64,
    pub c: f64,
    /// Градусы, [0, 360).
    pub h: f64,
}

/// `"L C H"`, по четыре знака после запятой.
impl fmt::Display for Oklch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4} {:.4} {:.4}", self.l, self.c, self.h)
    }
}

fn parse_rgb(hex: &str) -> Result<[f64; 3]> {
    // 3, 6 или 8 цифр (альфа-канал игнорируется)
    let re = Regex::new(r"^#?([0-9a-fA-F]{3}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$")
        .map_err(|e| WedpayError::Parse(e.to_string()))?;
    let caps = re
        .captures(hex.trim())
        .ok_or_else(|| WedpayError::InvalidHex(hex.to_string()))?;
    let digits = &caps[1];

    let full: String = if digits.len() == 3 {
        digits.chars().flat_map(|c| [c, c]).collect()
    } else {
        digits.to_string()
    };

    let mut rgb = [0.0; 3];
    for (i, ch) in rgb.iter_mut().enumerate() {
        let byte = u8::from_str_radix(&full[i * 2..i * 2 + 2], 16)
            .map_err(|_| WedpayError::InvalidHex(hex.to_string()))?;
        *ch = f64::from(byte) / 255.0;
    }
    Ok(rgb)
}

fn srgb_to_linear(v: f64) -> f64 {
    if v > 0.04045 {
        ((v + 0.055) / 1.055).powf(2.4)
    } else {
        v / 12.92
    }
}

pub fn hex_to_oklch(hex: &str) -> Result<Oklch> {
    let [r, g, b] = parse_rgb(hex)?.map(srgb_to_linear);

    let x = 0.4124564 * r + 0.3575761 * g + 0.1804375 * b;
    let y = 0.2126729 * r + 0.7151522 * g + 0.0721750 * b;
    let z = 0.0193339 * r + 0.1191920 * g + 0.9503041 * b;

    let l_ = (0.8189330101 * x + 0.3618667424 * y - 0.1288597137 * z).cbrt();
    let m_ = (0.0329845436 * x + 0.9293118715 * y + 0.0361456387 * z).cbrt();
    let s_ = (0.0482003018 * x + 0.2643662691 * y + 0.6338517070 * z).cbrt();

    let l = 0.2104542553 * l_ + 0.7936177850 * m_ - 0.0040720468 * s_;
    let a = 1.9779984951 * l_ - 2.4285922050 * m_ + 0.4505937099 * s_;
    let b = 0.0259040371 * l_ + 0.7827717662 * m_ - 0.8086757660 * s_;

    let c = a.hypot(b);
    let mut h = b.atan2(a).to_degrees();
    if h < 0.0 {
        h += 360.0;
    }

    Ok(Oklch { l, c, h })
}

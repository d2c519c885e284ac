//! Плоский текст: по одному payload на строку, пустая строка — генерация не удалась.
//! Только запись: из голого payload цель и сумму не восстановить.

use crate::{error::{WedpayError, Result}, model::Batch};
use std::io::{BufRead, Write};

pub struct Text;

impl crate::traits::ReadFormat for Text {
    fn read<R: BufRead>(_r: R) -> Result<Batch> {
        Err(WedpayError::Unsupported("reading plain-text payload lists"))
    }
}

impl crate::traits::WriteFormat for Text {
    fn write<W: Write>(mut w: W, batch: &Batch) -> Result<()> {
        for e in &batch.entries {
            writeln!(w, "{}", e.payload.as_deref().unwrap_or_default())?;
        }
        Ok(())
    }
}

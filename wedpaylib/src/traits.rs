//! Трэйты чтения/записи пакетов запросов на payload поверх std::io::{BufRead, Write}.

use crate::{error::Result, model::Batch};
use std::io::{BufRead, Write};

/// Чтение пакета целей и сумм. Уже записанные payload переносятся как есть.
pub trait ReadFormat {
    fn read<R: BufRead>(r: R) -> Result<Batch>;

    /// Прочитать и сразу сгенерировать payload для каждой записи.
    /// Неудачные цели получают `Some("")`, см. [`Batch::failed`].
    fn read_generated<R: BufRead>(r: R) -> Result<Batch> {
        let mut batch = Self::read(r)?;
        batch.generate();
        tracing::debug!(
            entries = batch.entries.len(),
            failed = batch.failed().count(),
            "batch read and generated"
        );
        Ok(batch)
    }
}

pub trait WriteFormat {
    fn write<W: Write>(w: W, batch: &Batch) -> Result<()>;
}

/// Формат, через который пакет проходит в обе стороны (CSV, JSON).
pub trait Format: ReadFormat + WriteFormat {}
impl<T: ReadFormat + WriteFormat> Format for T {}

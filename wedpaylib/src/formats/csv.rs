//! Простой CSV: заголовки:
//! target,amount,payload
//!
//! При чтении колонки amount и payload необязательны.

use crate::{error::{WedpayError, Result}, model::{Batch, BatchEntry}};
use csv::{ReaderBuilder, Trim, WriterBuilder};
use rust_decimal::Decimal;
use std::io::{BufRead, Write};

#[derive(serde::Deserialize)]
struct CsvRow {
    target: String,
    #[serde(default)]
    amount: Option<String>,
    #[serde(default)]
    payload: Option<String>,
}

#[derive(serde::Serialize)]
struct CsvOutRow<'a> {
    target: &'a str,
    amount: Option<String>,
    payload: Option<&'a str>,
}

pub struct Csv;

impl crate::traits::ReadFormat for Csv {
    fn read<R: BufRead>(r: R) -> Result<Batch> {
        let mut rdr = ReaderBuilder::new().flexible(true).trim(Trim::All).from_reader(r);
        let mut entries = Vec::new();

        for rec in rdr.deserialize::<CsvRow>() {
            let row = rec?;
            // пустая ячейка суммы — QR без суммы
            let amount = match row.amount.as_deref().filter(|s| !s.is_empty()) {
                Some(a) => Some(a.parse::<Decimal>()
                    .map_err(|e| WedpayError::Parse(format!("amount {a:?}: {e}")))?),
                None => None,
            };

            entries.push(BatchEntry {
                target: row.target,
                amount,
                payload: row.payload.filter(|p| !p.is_empty()),
            });
        }

        Ok(Batch { entries })
    }
}

impl crate::traits::WriteFormat for Csv {
    fn write<W: Write>(mut w: W, batch: &Batch) -> Result<()> {
        let mut wrt = WriterBuilder::new().from_writer(&mut w);

        for e in &batch.entries {
            let out = CsvOutRow {
                target: &e.target,
                amount: e.amount.map(|a| a.to_string()),
                payload: e.payload.as_deref(),
            };
            wrt.serialize(out)?;
        }
        wrt.flush()?;
        Ok(())
    }
}

//! JSON: массив объектов `{"target": "...", "amount": "100.00", "payload": "..."}`.
//! Сумма принимается и строкой, и числом; пишется всегда строкой.

use crate::{error::{WedpayError, Result}, model::{Batch, BatchEntry}};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use std::io::{BufRead, Write};

#[derive(Deserialize, Debug)]
struct JsonEntry {
    target: String,
    #[serde(default)]
    amount: Option<Value>,
    #[serde(default)]
    payload: Option<String>,
}

fn parse_amount(v: Value) -> Result<Option<Decimal>> {
    let s = match v {
        Value::Null => return Ok(None),
        Value::String(s) if s.trim().is_empty() => return Ok(None),
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        other => return Err(WedpayError::Parse(format!("amount: unexpected {other}"))),
    };
    s.trim()
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(s.trim()))
        .map(Some)
        .map_err(|e| WedpayError::Parse(format!("amount {s:?}: {e}")))
}

pub struct Json;

impl crate::traits::ReadFormat for Json {
    fn read<R: BufRead>(r: R) -> Result<Batch> {
        let raw: Vec<JsonEntry> = serde_json::from_reader(r)?;

        let entries = raw
            .into_iter()
            .map(|e| {
                Ok(BatchEntry {
                    target: e.target,
                    amount: e.amount.map(parse_amount).transpose()?.flatten(),
                    payload: e.payload,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Batch { entries })
    }
}

impl crate::traits::WriteFormat for Json {
    fn write<W: Write>(mut w: W, batch: &Batch) -> Result<()> {
        serde_json::to_writer_pretty(&mut w, &batch.entries)?;
        w.write_all(b"\n")?;
        Ok(())
    }
}

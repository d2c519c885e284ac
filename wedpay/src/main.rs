use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{self, BufReader, Write};
use tracing_subscriber::EnvFilter;
use wedpaylib::{
    color::hex_to_oklch,
    config::{parse_local, WeddingConfig},
    error::{WedpayError, Result},
    formats::{csv::Csv, json::Json, text::Text},
    generate_payload,
    model::{Batch, BatchEntry},
    traits::{ReadFormat, WriteFormat},
};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum InFmt {
    Csv,
    Json,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum OutFmt {
    Csv,
    Json,
    Text,
}

#[derive(Parser, Debug)]
#[command(name="wedpay", version, about="PromptPay QR payload для свадебного приглашения")]
struct Cli {
    /// Подробный лог в stderr (перекрывается RUST_LOG)
    #[arg(short='v', long="verbose", global=true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Один payload: телефон, национальный ID или e-wallet
    Generate {
        target: String,

        /// Сумма в батах; без неё QR многоразовый
        #[arg(short='a', long="amount")]
        amount: Option<Decimal>,

        /// Вывести JSON с целью и суммой вместо голой строки
        #[arg(long="json")]
        json: bool,
    },

    /// Пакетная генерация
    Batch {
        /// Входной файл (по умолчанию stdin)
        #[arg(short='i', long="input")]
        input: Option<String>,

        /// Выходной файл (по умолчанию stdout)
        #[arg(short='o', long="output")]
        output: Option<String>,

        /// Формат входа
        #[arg(long="in-format", value_enum)]
        in_format: InFmt,

        /// Формат выхода
        #[arg(long="out-format", value_enum)]
        out_format: OutFmt,
    },

    /// Payload для подарка на счёт из конфигурации сайта
    Gift {
        /// JSON-конфигурация сайта
        #[arg(short='c', long="config")]
        config: String,

        #[arg(short='a', long="amount")]
        amount: Option<Decimal>,

        /// Момент проверки окна показа QR, YYYY-MM-DDTHH:MM[:SS] (по умолчанию сейчас)
        #[arg(long="at")]
        at: Option<String>,
    },

    /// Hex-цвет темы в Oklch
    Color {
        hex: String,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn no_payload() -> WedpayError {
    WedpayError::Parse("no digits in target, payload not generated".into())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Generate { target, amount, json } => generate(target, amount, json),
        Command::Batch { input, output, in_format, out_format } => {
            batch(input, output, in_format, out_format)
        }
        Command::Gift { config, amount, at } => gift(&config, amount, at.as_deref()),
        Command::Color { hex } => {
            println!("{}", hex_to_oklch(&hex)?);
            Ok(())
        }
    }
}

fn generate(target: String, amount: Option<Decimal>, json: bool) -> Result<()> {
    let payload = generate_payload(&target, amount);
    if payload.is_empty() {
        return Err(no_payload());
    }

    if json {
        let entry = BatchEntry { target, amount, payload: Some(payload) };
        Json::write(io::stdout(), &Batch { entries: vec![entry] })
    } else {
        println!("{payload}");
        Ok(())
    }
}

fn batch(input: Option<String>, output: Option<String>, in_format: InFmt, out_format: OutFmt) -> Result<()> {
    // reader
    let reader: Box<dyn io::Read> = match input {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(io::stdin()),
    };
    let br = BufReader::new(reader);

    let b = match in_format {
        InFmt::Csv => Csv::read_generated(br),
        InFmt::Json => Json::read_generated(br),
    }?;

    for e in b.failed() {
        tracing::warn!(proxy = %e.target, "no digits in target, payload left empty");
    }
    tracing::info!(entries = b.entries.len(), "batch generated");

    // writer
    let mut writer: Box<dyn Write> = match output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    };

    match out_format {
        OutFmt::Csv => Csv::write(&mut writer, &b),
        OutFmt::Json => Json::write(&mut writer, &b),
        OutFmt::Text => Text::write(&mut writer, &b),
    }?;

    writer.flush().map_err(WedpayError::from)
}

fn gift(path: &str, amount: Option<Decimal>, at: Option<&str>) -> Result<()> {
    let cfg = WeddingConfig::load(path)?;

    let now = match at {
        Some(s) => parse_local(s, "--at")?,
        None => Local::now().naive_local(),
    };

    if !cfg.show_qr_code {
        return Err(WedpayError::Unsupported("QR section is disabled in the config"));
    }
    if !cfg.qr_window_open(now)? {
        return Err(WedpayError::Unsupported("QR window is closed at the given time"));
    }

    let payload = cfg.gift_payload(amount);
    if payload.is_empty() {
        return Err(no_payload());
    }
    println!("{payload}");
    Ok(())
}

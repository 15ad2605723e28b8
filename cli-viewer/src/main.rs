use clap::{Parser, ValueEnum};
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;
use swift_parser::{Mt942Data, Mt942Message, ParseError};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "cli_viewer",
    version,
    about = "Разбирает промежуточные выписки SWIFT MT942 и выводит их содержимое.",
    long_about = None,
)]
struct Args {
    /// Входной файл
    #[arg(long)]
    input: PathBuf,

    /// Что лежит во входном файле
    #[arg(long, value_enum, default_value_t = InputKind::Swift)]
    input_kind: InputKind,

    /// Формат вывода
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    output_format: OutputFormat,
}

/// Вид входных данных
#[derive(Copy, Clone, Debug, ValueEnum)]
enum InputKind {
    /// полное сообщение с конвертом {1:...}{4:...-}
    Swift,
    /// только содержимое блока 4
    TextBlock,
}

/// Поддерживаемые форматы вывода
#[derive(Copy, Clone, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), ParseError> {
    let args = Args::parse();
    tracing::debug!(?args, "cli_viewer started");

    if !args.input.exists() {
        eprintln!("input file does not exist: {}", args.input.display());
        process::exit(1)
    }

    let mut file = File::open(&args.input).unwrap_or_else(|err| {
        eprintln!("failed to open input file {}: {err}", args.input.display());
        process::exit(1);
    });

    let data = match args.input_kind {
        InputKind::Swift => Mt942Data::parse(io::BufReader::new(file))?,
        InputKind::TextBlock => {
            let mut content = String::new();
            file.read_to_string(&mut content)?;
            Mt942Data::from_text_block(&content)?
        }
    };

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match args.output_format {
        OutputFormat::Text => {
            for (idx, message) in data.messages.iter().enumerate() {
                if idx > 0 {
                    writeln!(handle)?;
                }
                write_message(&mut handle, message)?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut handle, &data).map_err(io::Error::from)?;
            writeln!(handle)?;
        }
    }

    Ok(())
}

fn write_message<W: Write>(w: &mut W, message: &Mt942Message) -> io::Result<()> {
    writeln!(w, "Statement {}", message.transaction_reference.reference)?;
    if let Some(related) = &message.related_reference {
        writeln!(w, "  related:      {}", related.reference)?;
    }
    writeln!(w, "  account:      {}", message.account_identification.account)?;

    let number = &message.statement_number;
    match number.sequence_number {
        Some(seq) => writeln!(w, "  number:       {}/{}", number.statement_number, seq)?,
        None => writeln!(w, "  number:       {}", number.statement_number)?,
    }
    writeln!(w, "  date/time:    {}", message.date_time_indicator.date_time)?;

    if let Some(limit) = message.floor_limit_debit() {
        writeln!(w, "  floor debit:  {} {}", limit.amount, limit.currency)?;
    }
    if let Some(limit) = message.floor_limit_credit() {
        writeln!(w, "  floor credit: {} {}", limit.amount, limit.currency)?;
    }

    for group in &message.transactions {
        let line = group.statement_line();
        writeln!(
            w,
            "  {:<10} {:<10} {:<2} {:>15} {} {}",
            line.booking_date,
            line.value_date,
            line.mark,
            line.amount,
            line.transaction_type,
            line.reference_for_account_owner,
        )?;
        if let Some(info) = group.information_to_account_owner() {
            writeln!(w, "      {}", info.text())?;
        }
    }

    for summary in [&message.summary_debit, &message.summary_credit].into_iter().flatten() {
        writeln!(
            w,
            "  {} entries: {} total {} {}",
            summary.direction, summary.number_of_entries, summary.amount, summary.currency
        )?;
    }

    if let Some(info) = &message.information_to_account_owner {
        writeln!(w, "  info:         {}", info.text())?;
    }

    Ok(())
}

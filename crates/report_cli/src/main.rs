use std::{error::Error, fs, io::Write, path::PathBuf};

use chrono::NaiveDate;
use chrono_tz::Tz;
use clap::{Parser, ValueEnum};
use engine::{Currency, DateRange, RawRecord, aggregate, report};

#[derive(Parser, Debug)]
#[command(name = "pigex_report")]
#[command(about = "Generate branch cash-flow reports from exported record collections")]
struct Cli {
    /// JSON array of money-in records, as exported from the document store.
    #[arg(long)]
    money_in: Option<PathBuf>,

    /// JSON array of money-out records.
    #[arg(long)]
    money_out: Option<PathBuf>,

    /// Branch name shown in the report header.
    #[arg(long, default_value = "Main Farm")]
    branch: String,

    /// First day of the inclusive filter range (YYYY-MM-DD).
    #[arg(long, requires = "to")]
    from: Option<NaiveDate>,

    /// Last day of the inclusive filter range (YYYY-MM-DD).
    #[arg(long, requires = "from")]
    to: Option<NaiveDate>,

    /// IANA timezone used for day bucketing.
    #[arg(long, default_value = "Asia/Manila")]
    timezone: Tz,

    #[arg(long, default_value = "PHP", value_parser = parse_currency)]
    currency: Currency,

    #[arg(long, value_enum, default_value_t = Format::Html)]
    format: Format,

    /// Output file (stdout when absent).
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Html,
    Csv,
    Summary,
}

fn parse_currency(raw: &str) -> Result<Currency, String> {
    Currency::try_from(raw).map_err(|err| err.to_string())
}

fn read_collection(path: Option<&PathBuf>) -> Result<Option<Vec<RawRecord>>, Box<dyn Error>> {
    match path {
        Some(path) => {
            let data = fs::read(path)?;
            Ok(Some(serde_json::from_slice(&data)?))
        }
        None => Ok(None),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let money_in = read_collection(cli.money_in.as_ref())?;
    let money_out = read_collection(cli.money_out.as_ref())?;

    let range = match (cli.from, cli.to) {
        (Some(from), Some(to)) => Some(DateRange::days(from, to, cli.timezone)?),
        _ => None,
    };

    let result = aggregate(
        money_in.as_deref(),
        money_out.as_deref(),
        range,
        cli.timezone,
    )?;

    if result.warnings.dropped_dates > 0 {
        eprintln!(
            "warning: {} record(s) dropped (unparseable date)",
            result.warnings.dropped_dates
        );
    }
    if result.warnings.zeroed_amounts > 0 {
        eprintln!(
            "warning: {} record(s) counted as zero (unparseable amount)",
            result.warnings.zeroed_amounts
        );
    }

    let data = match cli.format {
        Format::Html => report::to_html(&result, &cli.branch, cli.currency).into_bytes(),
        Format::Csv => report::to_csv(&result)?,
        Format::Summary => summary(&result, &cli.branch, cli.currency).into_bytes(),
    };

    match cli.output {
        Some(path) => fs::write(path, data)?,
        None => std::io::stdout().write_all(&data)?,
    }

    Ok(())
}

fn summary(result: &engine::AggregationResult, branch: &str, currency: Currency) -> String {
    let mut out = String::new();
    out.push_str(&format!("{branch}\n"));
    out.push_str(&format!(
        "Total Balance: {}\n",
        result.total_balance.format(currency)
    ));
    out.push_str(&format!(
        "Total Income: {}\n",
        result.total_income.format(currency)
    ));
    out.push_str(&format!(
        "Total Expense: {}\n",
        result.total_expense.format(currency)
    ));

    if result.is_empty() {
        out.push_str(report::NO_TRANSACTIONS);
        out.push('\n');
    } else {
        for section in report::view_model(result) {
            out.push_str(&format!(
                "{}: {} record(s)\n",
                section.label,
                section.transactions.len()
            ));
        }
    }

    out
}

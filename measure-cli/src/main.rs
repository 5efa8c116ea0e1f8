//! measure - parse, convert, compare and humanize quantities from the shell
//!
//! Every command prints one JSON document on stdout. Failures print
//! `{"error": {"code", "message"}}` and exit with status 1. Logs go to
//! stderr, filtered by `RUST_LOG` (default `info`).

use clap::{Parser, Subcommand, ValueEnum};
use measure::{Duration, FormatConfig, Formatters, Information, Kind, MeasureError, Quantity};
use serde_json::{json, Value as JsonValue};
use std::io::{self, Write};
use std::process::ExitCode;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "measure", version, about = "Typed quantities with unit conversion")]
#[command(arg_required_else_help(true))]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Usage(#[from] clap::Error),

    #[error(transparent)]
    Measure(#[from] MeasureError),
}

impl CliError {
    fn code(&self) -> &'static str {
        match self {
            CliError::Usage(_) => "USAGE",
            CliError::Measure(e) => e.code(),
        }
    }

    fn to_json(&self) -> JsonValue {
        json!({"error": {"code": self.code(), "message": self.to_string().trim_end()}})
    }
}

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
enum KindArg {
    /// Any category
    Dimension,
    /// Seconds; never negative
    Duration,
    /// Bytes
    Information,
}

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
enum HumanizeKind {
    Duration,
    Information,
}

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
enum Operator {
    #[value(alias = "==")]
    Eq,
    #[value(alias = ">")]
    Gt,
    #[value(alias = ">=")]
    Ge,
    #[value(alias = "<")]
    Lt,
    #[value(alias = "<=")]
    Le,
}

impl Operator {
    fn apply(self, first: &Quantity, second: &str) -> Result<bool, MeasureError> {
        match self {
            Operator::Eq => first.is_equal_to(second),
            Operator::Gt => first.is_larger_than(second),
            Operator::Ge => first.is_larger_than_or_equal_to(second),
            Operator::Lt => first.is_smaller_than(second),
            Operator::Le => first.is_smaller_than_or_equal_to(second),
        }
    }
}

#[derive(Debug, PartialEq, Subcommand)]
enum Command {
    /// Parse a value as a quantity of the given kind
    Parse {
        #[arg(value_enum, ignore_case = true)]
        kind: KindArg,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Convert a quantity to another unit of its category
    Convert {
        #[arg(allow_hyphen_values = true)]
        value: String,
        unit: String,
    },
    /// Compare two quantities of one category
    Compare {
        #[arg(allow_hyphen_values = true)]
        first: String,
        #[arg(value_enum)]
        operator: Operator,
        #[arg(allow_hyphen_values = true)]
        second: String,
    },
    /// Coarse, human-readable rendering of a duration or information size
    Humanize {
        #[arg(value_enum, ignore_case = true)]
        kind: HumanizeKind,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
}

impl Command {
    fn run(&self) -> Result<JsonValue, CliError> {
        tracing::debug!(command = ?self, "running");
        let result = match self {
            Command::Parse { kind, value } => match kind {
                KindArg::Dimension => quantity_json(&measure::parse(value.as_str())?),
                KindArg::Duration => quantity_json(&Duration::parse(value.as_str())?),
                KindArg::Information => quantity_json(&Information::parse(value.as_str())?),
            },
            Command::Convert { value, unit } => {
                let converted = measure::parse(value.as_str())?.convert_to(unit)?;
                quantity_json(&converted)
            }
            Command::Compare { first, operator, second } => {
                let first = measure::parse(first.as_str())?;
                json!({"result": operator.apply(&first, second)?})
            }
            Command::Humanize { kind, value } => match kind {
                HumanizeKind::Duration => quantity_json(&Duration::parse(value.as_str())?.humanize()?),
                HumanizeKind::Information => quantity_json(&Information::parse(value.as_str())?.humanize()?),
            },
        };
        Ok(result)
    }
}

fn quantity_json<K: Kind>(quantity: &Quantity<K>) -> JsonValue {
    json!({
        "quantity": quantity.magnitude(),
        "unit": quantity.unit(),
        "display": quantity.to_string(),
    })
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .init();
}

fn main() -> ExitCode {
    init_logging();

    let config = FormatConfig::from_env();
    tracing::debug!(locale = config.locale.tag(), "display locale");
    Formatters::shared().set_default_locale(config.locale);

    let outcome = match Cli::try_parse() {
        Ok(cli) => cli.command.run(),
        // --help and --version
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => Err(CliError::from(e)),
    };

    let (output, status) = match outcome {
        Ok(value) => (value, ExitCode::SUCCESS),
        Err(e) => {
            tracing::debug!(code = e.code(), "command failed");
            (e.to_json(), ExitCode::FAILURE)
        }
    };

    let mut stdout = io::stdout().lock();
    if let Err(e) = writeln!(stdout, "{}", output).and_then(|_| stdout.flush()) {
        tracing::error!(error = %e, "failed to write output");
        return ExitCode::FAILURE;
    }
    status
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn run(args: &[&str]) -> Result<JsonValue, CliError> {
        let cli = Cli::try_parse_from(std::iter::once("measure").chain(args.iter().copied()))?;
        cli.command.run()
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_command() {
        let out = run(&["parse", "dimension", "45,000mm"]).unwrap();
        assert_eq!(out, json!({"quantity": 45000, "unit": "mm", "display": "45,000 mm"}));

        let out = run(&["parse", "information", "4.2 mb"]).unwrap();
        assert_eq!(out["unit"], "MB");

        let out = run(&["parse", "Duration", "90"]).unwrap();
        assert_eq!(out["display"], "90 s");
    }

    #[test]
    fn test_convert_command() {
        let out = run(&["convert", "22m", "ft"]).unwrap();
        assert_eq!(out["display"], "72.18 ft");
        assert_eq!(out["unit"], "ft");
    }

    #[test]
    fn test_compare_command() {
        assert_eq!(run(&["compare", "1 km", "gt", "999 m"]).unwrap(), json!({"result": true}));
        assert_eq!(run(&["compare", "1000 m", "eq", "1 km"]).unwrap(), json!({"result": true}));
        assert_eq!(run(&["compare", "1 kg", "le", "999 g"]).unwrap(), json!({"result": false}));
        assert_eq!(run(&["compare", "1 kg", ">=", "999 g"]).unwrap(), json!({"result": true}));
    }

    #[test]
    fn test_humanize_command() {
        assert_eq!(run(&["humanize", "duration", "7200"]).unwrap()["display"], "2 hrs");
        assert_eq!(run(&["humanize", "information", "4.2 MiB"]).unwrap()["display"], "4.2 MiB");
    }

    #[test]
    fn test_negative_values_reach_the_parser() {
        assert_eq!(run(&["parse", "dimension", "-3 kg"]).unwrap()["quantity"], -3);
        let err = run(&["parse", "duration", "-5 s"]).unwrap_err();
        assert_eq!(err.code(), "INVALID_INPUT");
    }

    #[test]
    fn test_usage_errors() {
        for args in [
            &[][..],
            &["parse", "length", "5m"],
            &["compare", "1m", "ne", "2m"],
            &["humanize", "dimension", "5m"],
            &["convert", "5m"],
            &["weigh", "5 kg"],
        ] {
            let err = run(args).unwrap_err();
            assert!(matches!(err, CliError::Usage(_)), "{:?}", args);
            assert_eq!(err.to_json()["error"]["code"], "USAGE");
        }
    }

    #[test]
    fn test_error_json() {
        let err = run(&["convert", "5 kg", "m"]).unwrap_err();
        let out = err.to_json();
        assert_eq!(out["error"]["code"], "CONVERSION_NOT_POSSIBLE");
        assert_eq!(out["error"]["message"], "No converter registered to convert \"kg\" to \"m\".");
    }
}

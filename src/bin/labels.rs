//! labels - Label set CLI tool
//!
//! A command line tool for formatting, parsing, comparing and merging label
//! sets, and for checking them against equality selectors.
//!
//! Every `<SET>` argument is either a selector string such as
//! `app=web,tier=frontend`, or `@FILE` naming a JSON or YAML map of strings.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use apimachinery_labels::field::{FieldError, Path};
use apimachinery_labels::labels::{
    self, convert_selector_to_labels_map, convert_selector_to_labels_map_with, format_labels,
    LabelSet, Selector,
};
use apimachinery_labels::validation::{LabelValidator, Validator};

/// labels - Format, parse, compare and merge label sets.
#[derive(Debug, Parser)]
#[command(name = "labels")]
#[command(version)]
struct Cli {
    /// Output location. Use '-' for stdout
    #[arg(short, long, default_value = "-", global = true)]
    output: String,

    /// How to render label sets
    #[arg(short, long, value_enum, default_value_t = Format::Text, global = true)]
    format: Format,

    /// Enable verbose logging (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
    Yaml,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print a set in canonical form, or <none> if it is empty
    Format { set: String },
    /// Parse and validate a selector string
    Parse {
        selector: String,
        /// Field path errors are reported against, e.g. metadata.labels
        #[arg(long, default_value = "")]
        field_path: String,
    },
    /// Validate every key and value of a set, reporting all errors
    Validate {
        set: String,
        /// Field path errors are reported against, e.g. metadata.labels
        #[arg(long, default_value = "")]
        field_path: String,
    },
    /// Merge two sets; labels from RHS win
    Merge { lhs: String, rhs: String },
    /// Report whether two sets map a shared key to different values
    Conflicts { lhs: String, rhs: String },
    /// Report whether two sets hold the same labels
    Equals { lhs: String, rhs: String },
    /// Report whether a set satisfies a validated equality selector
    Matches { selector: String, set: String },
}

/// Accepts any key and value; inputs that are only being compared or merged
/// are not held to the label syntax rules.
struct SyntaxOnly;

impl Validator for SyntaxOnly {
    fn validate_key(&self, _key: &str, _path: &Path) -> Result<(), FieldError> {
        Ok(())
    }

    fn validate_value(&self, _key: &str, _value: &str, _path: &Path) -> Result<(), FieldError> {
        Ok(())
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut output: Box<dyn Write> = if cli.output == "-" {
        Box::new(io::stdout())
    } else {
        Box::new(
            fs::File::create(&cli.output)
                .map_err(|e| format!("Failed to create output file {:?}: {}", cli.output, e))?,
        )
    };
    let format = cli.format;

    match cli.command {
        Command::Format { set } => {
            let set = load_set(&set)?;
            match format {
                Format::Text => writeln!(output, "{}", format_labels(&set))?,
                _ => write_set(&set, format, &mut output)?,
            }
        }
        Command::Parse {
            selector,
            field_path,
        } => {
            parse(&selector, &Path::from_dotted(&field_path), format, &mut output)?;
        }
        Command::Validate { set, field_path } => {
            validate(&set, &Path::from_dotted(&field_path), &mut output)?;
        }
        Command::Merge { lhs, rhs } => {
            let merged = labels::merge(&load_set(&lhs)?, &load_set(&rhs)?);
            write_set(&merged, format, &mut output)?;
        }
        Command::Conflicts { lhs, rhs } => {
            let conflicts = labels::conflicts(&load_set(&lhs)?, &load_set(&rhs)?);
            writeln!(output, "{}", conflicts)?;
        }
        Command::Equals { lhs, rhs } => {
            let equal = labels::equals(&load_set(&lhs)?, &load_set(&rhs)?);
            writeln!(output, "{}", equal)?;
        }
        Command::Matches { selector, set } => {
            let requirements = load_set(&selector)?;
            let selector = requirements
                .as_validated_selector()
                .map_err(|e| format!("Invalid selector: {}", e))?;
            let candidate = load_set(&set)?;
            writeln!(output, "{}", selector.matches(&candidate))?;
        }
    }

    Ok(())
}

/// Reads a set from a selector string or an `@FILE` reference.
fn load_set(arg: &str) -> Result<LabelSet, Box<dyn std::error::Error>> {
    if let Some(file) = arg.strip_prefix('@') {
        let file = PathBuf::from(file);
        debug!(file = %file.display(), "loading label set from file");
        let content = fs::read_to_string(&file)
            .map_err(|e| format!("Failed to read file {:?}: {}", file, e))?;
        // YAML is a superset of JSON, so one parser covers both.
        let set: LabelSet = serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse file {:?}: {}", file, e))?;
        return Ok(set);
    }

    let set = convert_selector_to_labels_map_with(arg, &SyntaxOnly, &Path::new())
        .into_result()
        .map_err(|e| format!("Failed to parse {:?}: {}", arg, e))?;
    Ok(set)
}

fn write_set(
    set: &LabelSet,
    format: Format,
    output: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        Format::Text => writeln!(output, "{}", set)?,
        Format::Json => writeln!(output, "{}", serde_json::to_string_pretty(set)?)?,
        Format::Yaml => write!(output, "{}", serde_yaml::to_string(set)?)?,
    }
    Ok(())
}

fn parse(
    selector: &str,
    path: &Path,
    format: Format,
    output: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let (set, err) = convert_selector_to_labels_map(selector, path).into_parts();
    match err {
        None => write_set(&set, format, output),
        Some(err) => {
            if !set.is_empty() {
                writeln!(output, "Parsed before the error:")?;
                write_set(&set, format, output)?;
            }
            Err(err.into())
        }
    }
}

fn validate(set: &str, path: &Path, output: &mut dyn Write) -> Result<(), Box<dyn std::error::Error>> {
    let set = load_set(set)?;
    let errors = LabelValidator.validate_set(&set, path);
    if errors.is_empty() {
        writeln!(output, "Validation successful")?;
        return Ok(());
    }

    writeln!(output, "Validation errors:")?;
    for err in errors.iter() {
        writeln!(output, "  - {}", err)?;
    }
    Err(format!("{} invalid label(s)", errors.len()).into())
}

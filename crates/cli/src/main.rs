use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use herald_call::{build_call_values, parse_args, to_json, to_wire_values};
use herald_idl::{load_interface, MethodSignature};
use serde_json::json;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Console front for typed remote-service interfaces.
#[derive(Parser)]
#[command(name = "herald", version, about = "Typed interface console")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List a service's methods with canonical signatures, sorted by name
    Methods {
        /// Path to the interface description file
        file: PathBuf,
    },

    /// Parse an argument literal string and report the recognized kinds
    Args {
        /// Argument text, e.g. '(1, principal "aaaaa-aa")'
        text: String,
    },

    /// Validate arguments against a method and preview the encode-ready values
    DryRun {
        /// Path to the interface description file
        file: PathBuf,
        /// Method name to call
        method: String,
        /// Argument text, e.g. '(1, principal "aaaaa-aa")'
        text: String,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match &cli.command {
        Commands::Methods { file } => cmd_methods(file, cli.output),
        Commands::Args { text } => cmd_args(text, cli.output),
        Commands::DryRun { file, method, text } => cmd_dry_run(file, method, text, cli.output),
    };
    if let Err(message) = result {
        eprintln!("error: {}", message);
        process::exit(1);
    }
}

fn read_interface(file: &Path) -> Result<Vec<MethodSignature>, String> {
    let src = fs::read_to_string(file)
        .map_err(|e| format!("cannot read {}: {}", file.display(), e))?;
    load_interface(&src).map_err(|e| e.to_string())
}

fn cmd_methods(file: &Path, output: OutputFormat) -> Result<(), String> {
    let signatures = read_interface(file)?;
    match output {
        OutputFormat::Text => {
            for sig in &signatures {
                println!("{}", sig.canonical);
            }
        }
        OutputFormat::Json => {
            print_json(&serde_json::to_value(&signatures).map_err(|e| e.to_string())?);
        }
    }
    Ok(())
}

fn cmd_args(text: &str, output: OutputFormat) -> Result<(), String> {
    let literals = parse_args(text).map_err(|e| e.to_string())?;
    match output {
        OutputFormat::Text => {
            for literal in &literals {
                println!("{}", literal.kind());
            }
        }
        OutputFormat::Json => {
            let values = to_wire_values(&literals);
            let rendered: Vec<serde_json::Value> = literals
                .iter()
                .zip(values.iter())
                .map(|(literal, value)| json!({ "kind": literal.kind(), "value": to_json(value) }))
                .collect();
            print_json(&serde_json::Value::Array(rendered));
        }
    }
    Ok(())
}

fn cmd_dry_run(file: &Path, method: &str, text: &str, output: OutputFormat) -> Result<(), String> {
    let signatures = read_interface(file)?;
    let sig = signatures
        .iter()
        .find(|s| s.name == method)
        .ok_or_else(|| format!("unknown method '{}'", method))?;

    let literals = parse_args(text).map_err(|e| e.to_string())?;
    let values = build_call_values(sig, &literals).map_err(|e| e.to_string())?;
    let rendered: Vec<serde_json::Value> = values.iter().map(to_json).collect();

    match output {
        OutputFormat::Text => {
            println!("{}", sig.canonical);
            for value in &rendered {
                println!("{}", value);
            }
        }
        OutputFormat::Json => {
            print_json(&json!({
                "method": sig.name,
                "canonical": sig.canonical,
                "values": rendered,
            }));
        }
    }
    Ok(())
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(_) => println!("{}", value),
    }
}

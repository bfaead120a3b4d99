//! `redact` CLI — check for, remove, and list named fields in JSON documents.
//!
//! ## Usage
//!
//! ```sh
//! # Is there a "yawRate" member anywhere? Prints true/false and the location.
//! redact check --key yawRate -i bsm.json
//!
//! # Remove the first "yawRate" member (stdin → stdout)
//! cat bsm.json | redact remove --key yawRate
//!
//! # Redact a list of members inside a sub-tree
//! redact members --members yawRate,sunSensor --at payload.data.partII -i bsm.json
//!
//! # Redact the BSM Part II preset and write a JSON report
//! redact members --preset bsm -i bsm.json -o clean.json --report report.json
//!
//! # Show member names and kinds
//! redact structure -i bsm.json --at payload.data
//! ```
//!
//! Diagnostics go to stderr as `[LOG] ...` / `[DEBUG] ...` lines. Use `-v` for
//! debug output, `-q` to silence info, or `RUST_LOG` to override both.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{Level, LevelFilter};
use redact_core::{
    contains_key, find_first_key, parse_document, print_structure, redact_members,
    remove_first_key, resolve_path, resolve_path_mut, serialize_document, RedactionPreset,
};
use std::io::{self, Read, Write};

#[derive(Parser)]
#[command(
    name = "redact",
    version,
    about = "Find and redact named fields in JSON documents"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Show debug diagnostics
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only show warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Report whether a key appears anywhere in the document
    Check {
        /// Key name to look for
        #[arg(short, long)]
        key: String,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Dot-separated path of the sub-tree to search (e.g. payload.data)
        #[arg(long)]
        at: Option<String>,
    },
    /// Remove the first member with the given key
    Remove {
        /// Key name to remove
        #[arg(short, long)]
        key: String,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Dot-separated path of the sub-tree to search
        #[arg(long)]
        at: Option<String>,
        /// Pretty-print the output JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Remove the first occurrence of each listed member
    Members {
        /// Comma-separated member names to redact
        #[arg(long)]
        members: Option<String>,
        /// Use a predefined member list (e.g., "bsm" for BSM Part II vehicle data)
        #[arg(long)]
        preset: Option<String>,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Dot-separated path of the sub-tree to redact (defaults to the preset's path)
        #[arg(long)]
        at: Option<String>,
        /// Write a JSON report of per-member outcomes to this file
        #[arg(long)]
        report: Option<String>,
        /// Pretty-print the output JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Print an indented listing of member names and kinds
    Structure {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Dot-separated path of the sub-tree to list
        #[arg(long)]
        at: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    log::info!("Executing program");
    run(cli.command)?;
    log::info!("Program finished executing");

    Ok(())
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Check { key, input, at } => {
            let document = load_document(input.as_deref())?;
            let target = resolve_path(&document, at.as_deref().unwrap_or(""))
                .context("Failed to resolve --at path")?;

            let found = contains_key(target, &key);
            log::debug!("'{key}' present: {found}");
            let mut out = format!("{found}\n");
            if let Some(pointer) = find_first_key(target, &key) {
                out.push_str(&pointer);
                out.push('\n');
            }
            write_output(None, &out)?;
        }
        Commands::Remove {
            key,
            input,
            output,
            at,
            pretty,
        } => {
            let mut document = load_document(input.as_deref())?;
            let target = resolve_path_mut(&mut document, at.as_deref().unwrap_or(""))
                .context("Failed to resolve --at path")?;

            let location = find_first_key(target, &key);
            if remove_first_key(target, &key) {
                log::info!("Removed '{}' at {}", key, location.unwrap_or_default());
            } else {
                log::warn!("No '{key}' member found; document unchanged");
            }

            write_document(output.as_deref(), &document, pretty)?;
        }
        Commands::Members {
            members,
            preset,
            input,
            output,
            at,
            report,
            pretty,
        } => {
            let (names, preset_path) = build_member_list(members.as_deref(), preset.as_deref())?;
            if names.is_empty() {
                anyhow::bail!("No members to redact: pass --members and/or --preset");
            }
            let path = at.or(preset_path).unwrap_or_default();

            let mut document = load_document(input.as_deref())?;
            let target = resolve_path_mut(&mut document, &path)
                .with_context(|| format!("Failed to resolve redaction path '{path}'"))?;

            let name_refs: Vec<&str> = names.iter().map(|s| s.as_str()).collect();
            let redaction = redact_members(target, &name_refs);
            for line in &redaction.outcomes {
                log::info!("{line}");
            }
            let residual = redaction.residual();
            if !residual.is_empty() {
                log::warn!("Still present after redaction: {}", residual.join(", "));
            }

            if let Some(report_path) = report {
                let json = serde_json::to_string_pretty(&redaction)?;
                write_output(Some(&report_path), &json)?;
            }
            write_document(output.as_deref(), &document, pretty)?;
        }
        Commands::Structure { input, at } => {
            let document = load_document(input.as_deref())?;
            let target = resolve_path(&document, at.as_deref().unwrap_or(""))
                .context("Failed to resolve --at path")?;
            write_output(None, &print_structure(target))?;
        }
    }

    Ok(())
}

/// Route `log` records to stderr as `[LOG] msg` / `[DEBUG] msg` lines.
///
/// `RUST_LOG` takes precedence over the `-v` / `-q` flags.
fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            let tag = match record.level() {
                Level::Debug | Level::Trace => "DEBUG",
                _ => "LOG",
            };
            writeln!(buf, "[{}] {}", tag, record.args())
        })
        .init();
}

/// Build the member list from the --members and --preset arguments.
///
/// - `--members a,b` produces `["a", "b"]`
/// - `--preset bsm` adds the BSM Part II members and supplies a default path
/// - Both can be combined (members are appended after the explicit ones)
/// - Blank entries in --members are ignored
fn build_member_list(
    members: Option<&str>,
    preset: Option<&str>,
) -> Result<(Vec<String>, Option<String>)> {
    let mut names = Vec::new();
    let mut path = None;

    if let Some(raw) = members {
        for part in raw.split(',') {
            let trimmed = part.trim();
            if !trimmed.is_empty() {
                names.push(trimmed.to_string());
            }
        }
    }

    if let Some(preset) = preset {
        match RedactionPreset::by_name(preset) {
            Some((preset_members, preset_path)) => {
                names.extend(preset_members.into_iter().map(str::to_string));
                path = Some(preset_path.to_string());
            }
            None => {
                anyhow::bail!("Unknown preset: '{}'. Available presets: bsm", preset);
            }
        }
    }

    Ok((names, path))
}

fn load_document(path: Option<&str>) -> Result<serde_json::Value> {
    let text = read_input(path)?;
    parse_document(&text).context("Failed to parse input JSON")
}

fn write_document(path: Option<&str>, document: &serde_json::Value, pretty: bool) -> Result<()> {
    let mut json = serialize_document(document, pretty).context("Failed to serialize document")?;
    json.push('\n');
    write_output(path, &json)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}

//! CLI definition for the hookrule command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use hookrule_common::EventKind;

/// hookrule - rule-driven hook dispatcher
///
/// Reads one hook event as JSON on stdin, evaluates the configured rules,
/// and writes one JSON decision to stdout.
#[derive(Parser, Debug)]
#[command(name = "hookrule")]
#[command(version)]
#[command(about = "Rule-driven agent hook dispatcher")]
pub struct Cli {
    /// Enable debug output to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Config file (overrides HOOKRULE_CONFIG and the user config dir)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Expected event kind; input of any other kind is rejected
    #[arg(short, long, value_name = "KIND", value_parser = parse_event_kind)]
    pub event: Option<EventKind>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate the configuration and report rules that would fail at runtime
    Check,
}

fn parse_event_kind(value: &str) -> Result<EventKind, String> {
    value.parse::<EventKind>().map_err(|e| e.to_string())
}

//! hookrule CLI - rule-driven agent hook dispatcher.
//!
//! Commands:
//! - `hookrule` (no args): Read JSON from stdin, dispatch rules, write JSON to stdout
//! - `hookrule check`: Validate the configuration
//!
//! Exit codes:
//! - 0: Output written (including outputs that block or deny)
//! - 1: Input or configuration could not be read
//! - other: Requested by a legacy `exit_status` action

use std::io::{self, IsTerminal, Read};

use clap::{CommandFactory, Parser};

use hookrule::check::run_check;
use hookrule::hook::process;
use hookrule::{logging, Cli, Commands};
use hookrule_common::{Dispatcher, HookError, RuleSet};

/// Exit code for unreadable input or configuration.
const FAILURE_EXIT_CODE: i32 = 1;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.debug);

    let exit_code = match cli.command {
        Some(Commands::Check) => match run_check(cli.config.as_deref(), &mut io::stdout()) {
            Ok(code) => code,
            Err(e) => report(e),
        },
        None => match run_hook_processor(&cli) {
            Ok(code) => code,
            Err(e) => report(e),
        },
    };
    std::process::exit(exit_code);
}

fn report(error: HookError) -> i32 {
    tracing::error!("{}", error);
    eprintln!("Error: {}", error);
    FAILURE_EXIT_CODE
}

fn run_hook_processor(cli: &Cli) -> Result<i32, HookError> {
    // Show clap-generated help when run interactively
    if io::stdin().is_terminal() {
        Cli::command().print_help().ok();
        println!();
        return Ok(0);
    }

    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    tracing::debug!("Input: {}", input.trim());

    let rules = RuleSet::discover(cli.config.as_deref())?;
    tracing::debug!(rules = rules.len(), "config loaded");
    let dispatcher = Dispatcher::new(rules);

    let emission = process(&input, &dispatcher, cli.event)?;
    Ok(emission.write(&mut io::stdout().lock(), &mut io::stderr().lock())?)
}

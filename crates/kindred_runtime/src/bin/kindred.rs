//! Kindred CLI entry point.

use std::process::ExitCode;

use kindred_engine::{Family, SharedFamily};
use kindred_runtime::{LOG_ENV, Repl, RuntimeConfig, logging, render};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31m{}\x1b[0m", render::error(&e));
            ExitCode::FAILURE
        }
    }
}

fn run() -> kindred_foundation::Result<()> {
    let config = RuntimeConfig::from_env()?;

    if config.show_help {
        print_help();
        return Ok(());
    }

    if config.show_version {
        println!("kindred {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    logging::init(&config.log_filter)?;

    let family = if config.seed_sample {
        Family::sample()?
    } else {
        Family::new()
    };
    let mut repl = Repl::new(SharedFamily::new(family))?;

    for file in &config.files {
        repl.eval_file(file)?;
    }

    if config.batch_mode {
        return Ok(());
    }

    // Files already set the scene; skip the banner.
    if !config.files.is_empty() {
        repl = repl.without_banner();
    }

    repl.run()
}

fn print_help() {
    println!(
        "\x1b[1mKindred\x1b[0m - Family tree shell

\x1b[1mUSAGE:\x1b[0m
    kindred [OPTIONS] [FILES...]

\x1b[1mARGUMENTS:\x1b[0m
    [FILES...]    Command files to run before starting the shell

\x1b[1mOPTIONS:\x1b[0m
    -h, --help         Print help information
    -V, --version      Print version information
    -b, --batch        Run files and exit (no shell)
    --empty            Start with no members instead of the Doe family
    --log FILTER       Log filter, e.g. kindred_engine=debug (default: ${LOG_ENV} or warn)

\x1b[1mEXAMPLES:\x1b[0m
    kindred                          Start the shell with the Doe family
    kindred --empty family.kin       Build a family from a file, then explore
    kindred -b --empty family.kin    Run a command file and exit

Type 'help' inside the shell for the command list."
    );
}

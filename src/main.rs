//! `modder` command-line entry point.

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

use modder::catalog::{ModrinthClient, OptifineSource};
use modder::cli::{Cli, Command};
use modder::commands::{self, CommandSetup};
use modder::engine::Verdict;
use modder::logging::{self, Logger};

fn main() -> Result<ExitCode> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();

    match &args.command {
        Command::Completions(opts) => {
            commands::completions::run(opts.shell);
            return Ok(ExitCode::SUCCESS);
        }
        Command::Version => {
            commands::version::run();
            return Ok(ExitCode::SUCCESS);
        }
        _ => {}
    }

    let log_path = logging::log_file_path(args.command.name());
    logging::init_subscriber(args.verbose, log_path.as_deref());
    let log = Logger::new(log_path);

    let ok = commands::report(dispatch(&args, &log), &log)?;
    Ok(if ok == Some(false) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Run the selected subcommand. Returns `false` when the process should
/// exit non-zero without a fatal error.
fn dispatch(args: &Cli, log: &Logger) -> Result<bool> {
    let mut setup = CommandSetup::init(&args.global, log)?;
    match &args.command {
        Command::Install(opts) => {
            let catalog = ModrinthClient::new();
            let special = OptifineSource::new();
            let report = commands::install::run(&setup, opts, &catalog, &special, log)?;
            return Ok(report.verdict() != Verdict::TotalFailure);
        }
        Command::Remove(opts) => {
            commands::mods::remove(&setup, &opts.slugs, log)?;
        }
        Command::Refresh => {
            commands::mods::refresh(&setup, log)?;
        }
        Command::Clean => {
            commands::mods::clean(&setup, log)?;
        }
        Command::Using(opts) => {
            commands::mods::using(&setup, &opts.slug, log)?;
        }
        Command::Search(opts) => {
            commands::search::run(&ModrinthClient::new(), &opts.query, log)?;
        }
        Command::Status => {
            commands::status::run(&setup, log)?;
        }
        Command::Switch(opts) => {
            commands::profile::switch(&mut setup, opts.profile.clone(), log)?;
        }
        Command::Create(opts) => {
            commands::profile::create(
                &mut setup,
                &opts.profile,
                &opts.version,
                opts.loader,
                opts.switch,
                log,
            )?;
        }
        Command::Delete(opts) => {
            commands::profile::delete(&mut setup, &opts.profile, log)?;
        }
        Command::Completions(_) | Command::Version => {}
    }
    Ok(true)
}

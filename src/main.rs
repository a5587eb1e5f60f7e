//! lockstep - Selective dependency updater CLI tool
//!
//! Validates the packages named on the command line against pyproject.toml
//! and drives a lockfile resolver through a forced re-resolution.

use anyhow::Context;
use clap::Parser;
use lockstep::cli::CliArgs;
use lockstep::domain::UpdateOutcome;
use lockstep::error::AppError;
use lockstep::installer::CommandInstaller;
use lockstep::manifest::ProjectManifest;
use lockstep::output::render_error;
use lockstep::update::run_update;
use std::io;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(&args);

    match run(&args) {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => match e.downcast_ref::<AppError>() {
            Some(app_error) => {
                let _ = render_error(app_error, &mut io::stderr().lock());
                app_error.outcome().exit_code()
            }
            None => {
                eprintln!("Error: {:#}", e);
                ExitCode::FAILURE
            }
        },
    }
}

/// Logs go to stderr; RUST_LOG overrides the level chosen by the flags
fn init_tracing(args: &CliArgs) {
    let level = if args.quiet {
        "error"
    } else if args.is_verbose() {
        "info"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Main application logic
fn run(args: &CliArgs) -> anyhow::Result<UpdateOutcome> {
    let directory = args
        .directory
        .canonicalize()
        .with_context(|| format!("invalid project directory {}", args.directory.display()))?;

    let manifest = ProjectManifest::discover(&directory).map_err(AppError::from)?;
    if args.is_verbose() {
        eprintln!("lockstep v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("Project: {}", manifest.path.display());
        for group in manifest.groups() {
            eprintln!("  {}", group);
        }
    }

    let groups = args
        .group_selection()
        .activated(manifest.groups())
        .map_err(AppError::from)?;
    let declared = manifest.declared_dependencies();
    let request = args.update_request(groups);

    let mut installer = CommandInstaller::new(&args.installer, manifest.project_dir())
        .with_verbose(args.is_verbose())
        .with_quiet(args.quiet);

    let outcome = run_update(&request, &declared, &mut installer).map_err(AppError::from)?;
    Ok(outcome)
}

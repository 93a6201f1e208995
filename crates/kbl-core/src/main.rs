//! kbl - inspect the local Keybase installation.
//!
//! Reports where the Keybase configuration lives, who is logged in, where
//! their KBFS directories are, and whether the keybase service is running.

use clap::error::ErrorKind;
use clap::{Args, Parser, Subcommand};
use kbl_common::{Error, OutputFormat, PlatformFamily};
use kbl_config::{resolve_current, ConfigPaths, User};
use kbl_core::exit_codes::ExitCode;
use kbl_core::logging::{init_logging, LogConfig, LogLevel};
use kbl_core::probe::{ProcessProbe, ProcessStatus};
use kbl_core::LocalContext;
use serde::Serialize;
use std::path::PathBuf;

/// Inspect the local Keybase installation
#[derive(Parser)]
#[command(name = "kbl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Use this Keybase config file instead of the platform default
    #[arg(long, global = true, env = "KBL_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "json")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show where the Keybase config directory and file are
    Paths,

    /// Show the currently logged-in user
    Whoami,

    /// List users known to this installation
    Users,

    /// Show the current user's private and public KBFS directories
    Dirs,

    /// Check whether keybase is running and which version it reports
    Status,

    /// Print version information
    Version,
}

#[derive(Serialize)]
struct PathsReport<'a> {
    #[serde(flatten)]
    paths: &'a ConfigPaths,
    installed: bool,
}

#[derive(Serialize)]
struct WhoamiReport<'a> {
    current_user: &'a str,
}

#[derive(Serialize)]
struct UserEntry<'a> {
    username: &'a str,
    record: User,
}

#[derive(Serialize)]
struct DirsReport {
    private: PathBuf,
    public: PathBuf,
}

#[derive(Serialize)]
struct VersionReport {
    version: &'static str,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::Clean,
                _ => ExitCode::ArgsError,
            };
            // Printing can only fail if stdout/stderr is gone.
            let _ = e.print();
            std::process::exit(code.as_i32());
        }
    };

    let cli_level = if cli.global.quiet {
        Some(LogLevel::Error)
    } else {
        match cli.global.verbose {
            0 => None,
            1 => Some(LogLevel::Debug),
            _ => Some(LogLevel::Trace),
        }
    };
    init_logging(&LogConfig::from_env(cli_level, None));

    let result = match cli.command {
        Commands::Paths => run_paths(&cli.global),
        Commands::Whoami => run_whoami(&cli.global),
        Commands::Users => run_users(&cli.global),
        Commands::Dirs => run_dirs(&cli.global),
        Commands::Status => run_status(&cli.global),
        Commands::Version => Ok(emit(
            cli.global.format,
            &VersionReport {
                version: env!("CARGO_PKG_VERSION"),
            },
            || format!("kbl {}", env!("CARGO_PKG_VERSION")),
        )),
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("kbl: {}", err);
            tracing::debug!(code = err.code(), "command failed");
            ExitCode::from(&err)
        }
    };

    std::process::exit(exit_code.as_i32());
}

fn config_paths(global: &GlobalOpts) -> ConfigPaths {
    match &global.config {
        Some(file) => ConfigPaths::from_file(file),
        None => resolve_current(),
    }
}

fn load_context(global: &GlobalOpts) -> Result<LocalContext, Error> {
    match &global.config {
        Some(file) => {
            LocalContext::init_with_paths(&ConfigPaths::from_file(file), PlatformFamily::detect())
        }
        None => LocalContext::init(),
    }
}

/// Write `value` to stdout in the requested format.
fn emit<T: Serialize>(format: OutputFormat, value: &T, human: impl FnOnce() -> String) -> ExitCode {
    match format {
        OutputFormat::Json => match serde_json::to_string_pretty(value) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::Clean
            }
            Err(e) => {
                eprintln!("kbl: failed to serialize output: {}", e);
                ExitCode::InternalError
            }
        },
        OutputFormat::Human => {
            println!("{}", human());
            ExitCode::Clean
        }
    }
}

fn run_paths(global: &GlobalOpts) -> Result<ExitCode, Error> {
    let paths = config_paths(global);
    let report = PathsReport {
        paths: &paths,
        installed: paths.file.is_file(),
    };
    Ok(emit(global.format, &report, || {
        format!(
            "dir:  {}\nfile: {}\nsource: {}\ninstalled: {}",
            paths.dir.display(),
            paths.file.display(),
            paths.source,
            report.installed
        )
    }))
}

fn run_whoami(global: &GlobalOpts) -> Result<ExitCode, Error> {
    let ctx = load_context(global)?;
    let store = ctx.config();
    let report = WhoamiReport {
        current_user: store.current_user(),
    };
    Ok(emit(global.format, &report, || store.current_user().to_string()))
}

fn run_users(global: &GlobalOpts) -> Result<ExitCode, Error> {
    let ctx = load_context(global)?;
    let store = ctx.config();
    let users: Vec<UserEntry<'_>> = store
        .users_by_name()
        .map(|(username, record)| UserEntry { username, record })
        .collect();
    Ok(emit(global.format, &users, || {
        users
            .iter()
            .map(|u| {
                if u.username == store.current_user() {
                    format!("* {}", u.username)
                } else {
                    format!("  {}", u.username)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }))
}

fn run_dirs(global: &GlobalOpts) -> Result<ExitCode, Error> {
    let ctx = load_context(global)?;
    let store = ctx.config();
    let report = DirsReport {
        private: store.private_dir(),
        public: store.public_dir(),
    };
    Ok(emit(global.format, &report, || {
        format!(
            "private: {}\npublic:  {}",
            report.private.display(),
            report.public.display()
        )
    }))
}

fn run_status(global: &GlobalOpts) -> Result<ExitCode, Error> {
    let probe = ProcessProbe::system();
    let status: ProcessStatus = probe.status()?;
    let code = emit(global.format, &status, || match (status.running, status.version.as_deref()) {
        (true, Some(version)) => format!("running (version {})", version),
        (true, None) => "running (version unknown)".to_string(),
        (false, _) => "not running".to_string(),
    });
    if code == ExitCode::Clean && !status.running {
        return Ok(ExitCode::NotRunning);
    }
    Ok(code)
}

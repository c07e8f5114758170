use clap::error::ErrorKind;
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;

use xdg_mat::common::{MatConfig, XdgDirs};
use xdg_mat::mat::{CommandManager, MatContext};
use xdg_mat::mimeapps::MimeApps;
use xdg_mat::ui::{self, Level, OutputFormat, emit};

/// XDG MimeApps Tool
#[derive(Parser, Debug)]
#[command(name = "xdg-mat", author, version, long_about = None)]
struct Cli {
    /// Show backend diagnostics
    #[arg(long)]
    debug: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Use this config file instead of the default one
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Invocation>,
}

#[derive(Subcommand, Debug)]
enum Invocation {
    /// Command to execute
    #[command(external_subcommand)]
    Command(Vec<String>),
}

fn main() {
    let manager = CommandManager::with_builtin_commands();
    let mut command =
        Cli::command().after_help(format!("Available commands:\n{}", manager.help_text()));

    // Unknown or malformed top-level options fall back to the combined help.
    let cli = match command
        .clone()
        .try_get_matches()
        .and_then(|matches| Cli::from_arg_matches(&matches))
    {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(_) => {
            let _ = command.print_help();
            return;
        }
    };

    ui::set_debug_mode(cli.debug);
    ui::init(cli.output, !cli.no_color && std::io::stdout().is_terminal());

    let args = match cli.command {
        Some(Invocation::Command(args)) if manager.find(&args[0]).is_some() => args,
        _ => {
            let _ = command.print_help();
            return;
        }
    };

    let config = match MatConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            emit(
                Level::Error,
                "config.load_failed",
                &format!("Error loading config: {:#}", e),
                None,
            );
            std::process::exit(1);
        }
    };

    let ctx = MatContext::new(MimeApps::from_config(&config, XdgDirs::from_env()));
    emit(
        Level::Debug,
        "mat.backend",
        &format!("Using the {} backend", ctx.apps.backend_name()),
        None,
    );

    let code = manager.dispatch(&ctx, &args).unwrap_or(0);
    std::process::exit(code);
}

use std::io;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use cp_admin::commands;
use cp_admin::config::Config;
use cp_admin::context::AdminContext;
use cp_admin::engine::{DispatchLoop, HighlightStyle, Renderer, TerminalKeys};
use cp_admin::logging;
use cp_admin::menu::Menu;

#[derive(Parser)]
#[command(name = "cp-admin", version, about = "Arrow-key menu for cp-api maintenance commands")]
struct Cli {
    #[arg(short, long, help = "Config file (defaults to the user config dir)")]
    config: Option<PathBuf>,

    #[arg(long, help = "Write logs to this file")]
    log_file: Option<PathBuf>,

    #[arg(long, value_enum, help = "How the selected entry is highlighted")]
    highlight: Option<HighlightStyle>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every group and command, then exit
    List,

    /// Run one command without the interactive menu
    Run {
        /// Group label, e.g. "ADMIN"
        group: String,
        /// Command label, e.g. "Shutdown Server"
        command: String,
    },

    /// Create the default config file if missing and print its path
    InitConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::InitConfig) = cli.command {
        return handle_init_config();
    }

    // A missing .env is fine; the variables may already be exported.
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: could not load .env: {e}");
        }
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    config.apply_process_env();
    if let Some(highlight) = cli.highlight {
        config.highlight = highlight;
    }
    if let Some(path) = &cli.log_file {
        config.log_file = Some(path.to_string_lossy().into_owned());
    }

    if let Err(e) = logging::init(&config.log_path(), &config.log_level) {
        eprintln!("Warning: logging disabled: {e:#}");
    }
    tracing::info!(api = %config.api_base_url, "starting cp-admin");

    let highlight = config.highlight;
    let ctx = Rc::new(AdminContext::new(config));
    let menu = commands::build_menu(ctx).context("Failed to build menu")?;

    match cli.command {
        Some(Commands::List) => print_table(&menu),
        Some(Commands::Run { group, command }) => {
            let cmd = menu.find(&group, &command)?;
            tracing::info!(group = %group, command = cmd.label(), "running command");
            cmd.invoke();
        }
        Some(Commands::InitConfig) => handle_init_config()?,
        None => run_interactive(&menu, highlight)?,
    }

    Ok(())
}

fn run_interactive(menu: &Menu, highlight: HighlightStyle) -> Result<()> {
    let mut keys = TerminalKeys::stdin()?;
    let mut out = io::stdout();
    let exit = DispatchLoop::new(menu, Renderer::new(highlight)).run(&mut keys, &mut out)?;
    tracing::info!(?exit, "exiting");
    Ok(())
}

fn print_table(menu: &Menu) {
    for group in menu.groups() {
        println!("{}", group.label());
        for command in group.children() {
            println!("    {}", command.label());
        }
    }
}

fn handle_init_config() -> Result<()> {
    let existed = Config::config_path().exists();
    let path = Config::ensure_default()?;
    if existed {
        println!("Config already exists at {}", path.display());
    } else {
        println!("Created default config at {}", path.display());
    }
    Ok(())
}

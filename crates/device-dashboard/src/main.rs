//! Device Dashboard - CLI entry point
//!
//! Runs the dashboard by default. The other subcommands take a one-shot
//! snapshot of the signals, manage the saved widget order, or manage the
//! configuration file.

use clap::{Parser, Subcommand};
use device_dashboard::config::error::ConfigError;
use device_dashboard::config::schema::Config;
use device_dashboard::config::{default, loader::ConfigLoader, xdg};
use device_dashboard::layout::{LayoutManager, LayoutStore, WidgetDescriptor};
use device_dashboard::signals::{snapshot, SignalState};
use device_dashboard::tui::app::App;
use device_dashboard::widgets::{render_card, WidgetContext, WidgetRegistry};
use device_dashboard::{layout, logging};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Width of the cards printed by `snapshot`.
const SNAPSHOT_WIDTH: u16 = 40;

/// Device dashboard
#[derive(Parser)]
#[command(name = "ddash")]
#[command(version, about = "Terminal dashboard of device, battery and network signals")]
struct Cli {
    /// Configuration file (defaults to the XDG config location)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands for the ddash CLI
#[derive(Subcommand)]
enum Commands {
    /// Launch the terminal user interface (default)
    Tui,

    /// Read every signal once and print it
    Snapshot {
        /// Print the raw readings as JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect or reset the saved widget order
    Layout {
        #[command(subcommand)]
        action: LayoutAction,
    },

    /// Manage configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Actions for the `layout` subcommand.
#[derive(Subcommand)]
enum LayoutAction {
    /// Print the widget order the dashboard will use
    Show,
    /// Forget the saved order so the defaults apply again
    Reset,
    /// Show the layout file path
    Path,
}

/// Actions for the `config` subcommand.
#[derive(Subcommand)]
enum ConfigAction {
    /// Create default configuration file
    Init {
        /// Overwrite existing configuration (creates backup)
        #[arg(long)]
        force: bool,
    },
    /// Show configuration file path
    Path,
    /// Validate configuration file
    Validate,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => run_tui(config_path),
        Commands::Snapshot { json } => match load_config(config_path) {
            Ok(config) => run_snapshot(&config, json),
            Err(code) => code,
        },
        Commands::Layout { action } => match load_config(config_path) {
            Ok(config) => run_layout_command(&config, action),
            Err(code) => code,
        },
        Commands::Config { action } => run_config_command(config_path, action),
    }
}

/// Loads the configuration for a one-shot command and sets up stderr logging.
fn load_config(path: Option<&Path>) -> Result<Config, ExitCode> {
    match ConfigLoader::load(path) {
        Ok(config) => {
            logging::init_stderr(config.log.level);
            Ok(config)
        }
        Err(e) => {
            eprintln!("Config error: {e}");
            Err(ExitCode::FAILURE)
        }
    }
}

/// Layout file from config, or the XDG default.
fn layout_store(config: &Config) -> LayoutStore {
    LayoutStore::new(xdg::resolve_or(&config.layout.file, xdg::layout_path))
}

fn run_tui(config_path: Option<&Path>) -> ExitCode {
    // A broken config should not keep the dashboard from starting
    let (config, config_error) = match ConfigLoader::load(config_path) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    let log_path = xdg::resolve_or(&config.log.file, xdg::log_path);
    if let Err(e) = logging::init_file(config.log.level, &log_path) {
        eprintln!("Warning: cannot log to {}: {}", log_path.display(), e);
    }
    if let Some(e) = config_error {
        tracing::warn!("Using default configuration: {}", e);
    }

    let tick_rate = match config.tui.tick_rate() {
        Ok(rate) => rate,
        Err(e) => {
            eprintln!("Config error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to start runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    let layout = LayoutManager::load(layout_store(&config));
    let mut app = App::new(layout).with_min_card_width(config.tui.min_card_width);
    let result = rt.block_on(app.run(&config.signals, config.location.clone(), tick_rate));
    if let Err(e) = result {
        eprintln!("TUI error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run_snapshot(config: &Config, json: bool) -> ExitCode {
    let state = snapshot(&config.signals);
    if json {
        return match serde_json::to_string_pretty(&state) {
            Ok(out) => {
                println!("{out}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: failed to serialize snapshot: {e}");
                ExitCode::FAILURE
            }
        };
    }
    print!("{}", format_snapshot(&state, &layout::default_order()));
    ExitCode::SUCCESS
}

/// Plain-text cards, separated by blank lines.
fn format_snapshot(state: &SignalState, order: &[WidgetDescriptor]) -> String {
    let registry = WidgetRegistry::new();
    let ctx = WidgetContext::new(state);
    let mut out = String::new();
    for descriptor in order {
        let Some(card) = render_card(&registry, descriptor, SNAPSHOT_WIDTH, &ctx) else {
            continue;
        };
        out.push_str(&format!("── {} ──\n", card.title));
        for line in card.text_lines() {
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

fn run_layout_command(config: &Config, action: LayoutAction) -> ExitCode {
    let store = layout_store(config);
    match action {
        LayoutAction::Show => {
            for widget in store.load() {
                if widget.enabled {
                    println!("{}\t{}", widget.id, widget.title);
                } else {
                    println!("{}\t{}\t(disabled)", widget.id, widget.title);
                }
            }
            ExitCode::SUCCESS
        }
        LayoutAction::Reset => match store.reset() {
            Ok(true) => {
                println!("Removed {}", store.path().display());
                ExitCode::SUCCESS
            }
            Ok(false) => {
                println!("No saved layout; defaults already apply");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Layout error: {e}");
                ExitCode::FAILURE
            }
        },
        LayoutAction::Path => {
            println!("{}", store.path().display());
            ExitCode::SUCCESS
        }
    }
}

fn run_config_command(config_path: Option<&Path>, action: ConfigAction) -> ExitCode {
    let result: Result<(), ConfigError> = match action {
        ConfigAction::Init { force } => default::create_default_config(force).map(|path| {
            println!("Created configuration at {}", path.display());
        }),
        ConfigAction::Path => {
            let path = config_path.map_or_else(xdg::config_path, Path::to_path_buf);
            println!("{}", path.display());
            Ok(())
        }
        ConfigAction::Validate => ConfigLoader::load(config_path).map(|config| {
            println!("Configuration is valid");
            println!("{config:#?}");
        }),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Config error: {e}");
            ExitCode::FAILURE
        }
    }
}

use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;
use i3dt::actor::reactor::{self, Reactor};
use i3dt::actor::{self, event_source};
use i3dt::common::config::{Config, config_file};
use i3dt::common::log;
use i3dt::ipc::{self, I3Connection};
use tracing::level_filters::LevelFilter;
use tracing::{error, info};

/// Main + secondary dynamic tiling for i3 and sway.
#[derive(Parser)]
#[command(version)]
struct Cli {
    /// trace, debug, info, warning, error or off. RUST_LOG takes precedence.
    #[arg(long, default_value = "info", value_parser = parse_log_level)]
    log_level: LevelFilter,

    /// Workspaces left to the manager's own tiling.
    #[arg(long, num_args = 1.., value_parser = clap::value_parser!(u32).range(1..=9))]
    workspaces_ignore: Vec<u32>,

    /// Tile only these workspaces. Wins over --workspaces-ignore.
    #[arg(long, num_args = 1.., value_parser = clap::value_parser!(u32).range(1..=9))]
    workspaces_only: Vec<u32>,

    /// Opacity of the focused window (sway only).
    #[arg(long, value_name = "0.0-1.0")]
    opacity_focused: Option<f64>,

    /// Opacity of unfocused windows (sway only).
    #[arg(long, value_name = "0.0-1.0")]
    opacity_inactive: Option<f64>,

    /// Hide the status bar while tabbed or monocle mode is on.
    #[arg(long, value_name = "BOOL", alias = "tabbed-hide-polybar")]
    tabbed_hide_bar: Option<bool>,

    /// Path to configuration file to use (overrides default).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Check the configuration and exit without connecting.
    #[arg(long)]
    validate: bool,
}

fn parse_log_level(level: &str) -> Result<LevelFilter, String> {
    log::parse_level(level).ok_or_else(|| format!("unknown log level {level:?}"))
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if !self.workspaces_ignore.is_empty() {
            config.workspaces.ignore = self.workspaces_ignore.iter().map(u32::to_string).collect();
        }
        if !self.workspaces_only.is_empty() {
            config.workspaces.only = self.workspaces_only.iter().map(u32::to_string).collect();
        }
        if let Some(focused) = self.opacity_focused {
            config.opacity.focused = focused;
        }
        if let Some(inactive) = self.opacity_inactive {
            config.opacity.inactive = inactive;
        }
        if let Some(hide) = self.tabbed_hide_bar {
            config.bar.hide_on_tabbed = hide;
        }
    }
}

fn main() {
    sigpipe::reset();
    let opt = Cli::parse();
    log::init_logging(opt.log_level);

    let config = match load_config(&opt) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e:#}");
            process::exit(1);
        }
    };

    let issues = config.validate();
    if !issues.is_empty() {
        for issue in issues {
            eprintln!("{}", issue);
        }
        process::exit(1);
    }
    if opt.validate {
        println!("Config validation passed");
        return;
    }

    if let Err(e) = run(config) {
        error!("{e:#}");
        process::exit(1);
    }
}

fn load_config(opt: &Cli) -> anyhow::Result<Config> {
    let path = opt.config.clone().unwrap_or_else(config_file);
    let mut config = if path.exists() {
        Config::read(&path).with_context(|| format!("Failed to read {}", path.display()))?
    } else if opt.config.is_some() {
        anyhow::bail!("Config file {} does not exist", path.display());
    } else {
        Config::default()
    };
    opt.apply(&mut config);
    Ok(config)
}

fn run(config: Config) -> anyhow::Result<()> {
    let conn = I3Connection::connect().context("Failed to connect to the window manager")?;
    let stream = conn
        .reconnect()
        .and_then(|events| events.subscribe(&ipc::Event::SUBSCRIPTIONS))
        .context("Failed to subscribe to window manager events")?;

    let (events_tx, events_rx) = actor::channel();
    event_source::spawn(stream, events_tx.clone()).context("Failed to start event thread")?;

    let signal_tx = events_tx;
    if let Err(e) = ctrlc::set_handler(move || signal_tx.send(reactor::Event::Terminate)) {
        error!("Failed to install signal handler: {e}");
    }

    let mut reactor = Reactor::new(conn, config);
    reactor.initialize().context("Failed to initialize")?;
    info!("Started");
    reactor.run(events_rx);
    Ok(())
}

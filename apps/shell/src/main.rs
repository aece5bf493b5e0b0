//! Demo shell: drives the control surface against a scripted in-memory store.

mod store;

use anyhow::Context;
use clap::Parser;
use revive::ControlSurface;
use revive::domain::config::{LoggingConfig, SurfaceConfig};
use revive::features::{buff::Buff, macros::Macros, respawn::Respawn};
use revive::kernel::config::load_config;
use revive_logger::{Logger, parse_level};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "revive", about = "Control surface sync demo")]
struct Args {
    /// Config file (toml, json or yaml); `./revive.*` is used when present.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Server to switch to after boot.
    #[arg(long)]
    server: Option<String>,
    /// Language to switch to after boot.
    #[arg(long)]
    language: Option<String>,
}

#[revive_runtime::main(cooperative)]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config: SurfaceConfig = load_config(args.config.as_ref()).context("Failed to load config")?;
    let _logger = init_logger(&config.logging)?;

    let host = store::demo();
    let surface = ControlSurface::from_config(&config).context("Failed to assemble surface")?;
    host.connect_notifier(surface.notifier());
    host.attach_to(surface.bridge());
    surface.boot().await;

    if let Some(version) = surface.app_version().await {
        info!(version, "Store attached");
    }

    let server = args.server.as_deref().or(config.session.server.as_deref());
    if let Some(server) = server {
        surface.set_server(server).await?;
    }
    let language = args.language.as_deref().or(config.session.language.as_deref());
    if let Some(language) = language {
        surface.set_language(language).await?;
    }

    edit(&surface).await;

    host.emit("onStatus", vec![serde_json::json!({"scope": "buff", "text": "Buff cycle done", "ok": true})]);
    for status in surface.status_board().all() {
        info!(scope = %status.scope, text = %status.text, tone = ?status.tone(), "Status");
    }
    info!(calls = host.calls().len(), "Demo finished");
    Ok(())
}

fn init_logger(config: &LoggingConfig) -> anyhow::Result<Logger> {
    let level = parse_level(&config.level)?;
    let builder = Logger::builder().name(env!("CARGO_PKG_NAME")).console(true).level(level);
    let builder = match &config.filter {
        Some(filter) => builder.env_filter(filter.clone()),
        None => builder,
    };
    let logger = match &config.directory {
        Some(dir) => builder.path(dir).json(config.json).init()?,
        None => builder.init()?,
    };
    Ok(logger)
}

async fn edit(surface: &ControlSurface) {
    if let Some(macros) = surface.slice::<Macros>() {
        let outcome = macros.set_delay_text("1,5");
        info!(?outcome, delay = macros.view().delay_s, "Macros delay edited");
        macros.add_row();
    }
    if let Some(respawn) = surface.slice::<Respawn>() {
        for text in ["1", "12", "120"] {
            respawn.set_wait_seconds_text(text);
        }
        info!(seconds = respawn.view().wait_seconds, "Respawn wait typed");
    }
    if let Some(buff) = surface.slice::<Buff>() {
        let reply = buff.run_once().await;
        if !reply.ok {
            warn!(reason = ?reply.reason, "Buff run refused");
        }
    }
    // Lets debounced groups flush before the process exits.
    tokio::time::sleep(Duration::from_secs(1)).await;
}

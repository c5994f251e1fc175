use std::sync::Arc;

use anyhow::Result;
use tokio::io::{self, AsyncBufReadExt};
use tracing::{Level, info, warn};

use storepeek::core::config::{ConfigStore, PanelConfig};
use storepeek::prelude::*;

const CONFIG_FILE: &str = "storepeek.toml";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let store = if std::path::Path::new(CONFIG_FILE).exists() {
        ConfigStore::from_file(CONFIG_FILE)?
    } else {
        ConfigStore::empty()
    };
    let config: PanelConfig = store.get()?;
    info!("data directory: {}", config.data_dir.display());

    let panel = build_panel(&config);
    panel.init().await;
    print_help(&panel);

    let stdin = io::stdin();
    let mut reader = io::BufReader::new(stdin).lines();
    while let Ok(Some(line)) = reader.next_line().await {
        let mut parts = line.split_whitespace();
        match (parts.next(), parts.next()) {
            (None, _) => continue,
            (Some("add"), Some(backend)) => panel.add(backend).await,
            (Some("clear"), Some(backend)) => panel.clear(backend).await,
            (Some("add" | "clear"), None) => warn!("usage: add|clear <backend>"),
            (Some("refresh"), _) => panel.refresh_all().await,
            (Some("backends"), _) => println!("{}", panel.backends().join(", ")),
            (Some("help"), _) => print_help(&panel),
            (Some("quit" | "exit"), _) => break,
            (Some(other), _) => warn!("unknown command `{}`, try `help`", other),
        }
    }

    info!("panel closed");
    Ok(())
}

/// Explicit wiring of one adapter per backend. The document store in
/// particular is only constructed here; it touches its database on first
/// use, during `Panel::init`, not during construction.
fn build_panel(config: &PanelConfig) -> Panel {
    let data_dir = &config.data_dir;

    let kv_local = Arc::new(JsonFileArea::new(data_dir.join("kv_local.json")));
    let kv_synced = Arc::new(JsonFileArea::new(data_dir.join("kv_synced.json")));
    let page_local = Arc::new(FileWebArea::new(data_dir.join("page_local.json")));
    // Session flavor: in-memory on purpose, its entries die with the
    // process.
    let page_session = Arc::new(MemoryWebArea::new());

    Panel::new()
        .bind(
            Arc::new(KeyValueAdapter::local(kv_local)),
            Arc::new(TermView::new("kv-local")),
        )
        .bind(
            Arc::new(KeyValueAdapter::synced(kv_synced)),
            Arc::new(TermView::new("kv-sync")),
        )
        .bind(
            Arc::new(PageAdapter::local(page_local)),
            Arc::new(TermView::new("page-local")),
        )
        .bind(
            Arc::new(PageAdapter::session(page_session)),
            Arc::new(TermView::new("page-session")),
        )
        .bind(
            Arc::new(DocumentStore::new(config.database_path())),
            Arc::new(TermView::new("documents")),
        )
}

fn print_help(panel: &Panel) {
    println!("commands:");
    println!("  add <backend>     append a timestamped entry, then re-render");
    println!("  clear <backend>   wipe the backend, then re-render");
    println!("  refresh           re-render every backend");
    println!("  backends          list backend names");
    println!("  quit");
    println!("backends: {}", panel.backends().join(", "));
}

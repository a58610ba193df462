//! Glossa binary: a community-governed constructed-language engine on a
//! console transport.
//!
//! Every chat channel can host one language. Members propose amendments
//! (rules, words, renames) with sigil-prefixed commands; each amendment
//! opens a ballot that collects approve/reject reactions for a voting
//! window, and the engine's reconciliation loop applies whatever the
//! community carries. State is snapshotted to disk after every mutation.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `glossa-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Open the snapshot store and restore the registry
//! 4. Wire the console gateway and spawn the stdin reader
//! 5. Run the engine loop until stdin closes

mod console;
mod error;

use std::path::Path;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use glossa_core::{
    ChatGateway, Engine, EngineHandle, GlossaConfig, InboundMessage, NO_REACTION, YES_REACTION,
};
use glossa_store::{FileStore, SnapshotStore};
use glossa_types::{ChannelId, MessageRef, UserId};

use crate::console::ConsoleGateway;
use crate::error::StartupError;

/// Channel every console line is treated as posted in.
const CONSOLE_CHANNEL: ChannelId = ChannelId::new(1);

/// Author every console line is attributed to.
const CONSOLE_USER: UserId = UserId::new(100);

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration loading or snapshot restoration
/// fails. Everything after startup is logged, never fatal.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!(
        sigil = config.engine.command_sigil,
        voting_window_secs = config.engine.voting_window_secs,
        tick_interval_ms = config.engine.tick_interval_ms,
        snapshot_path = config.snapshot.path,
        "glossa-engine starting"
    );

    let gateway = Arc::new(ConsoleGateway::new());
    let store: Arc<dyn SnapshotStore> = Arc::new(FileStore::new(&config.snapshot.path));

    let (engine, handle) = Engine::new(
        config.engine.clone(),
        Arc::clone(&gateway) as Arc<dyn ChatGateway>,
        store,
        None,
    )
    .map_err(StartupError::from)?;

    println!(
        "Commands start with {sigil} (e.g. {sigil}createlanguage \"Auri\").",
        sigil = config.engine.command_sigil
    );
    println!("Vote on a ballot with !yes <message-id> or !no <message-id>.\n");

    let reader = tokio::spawn(read_stdin(handle, gateway));
    engine.run().await;
    reader.abort();

    info!("glossa-engine shutdown complete");
    Ok(())
}

/// Load the main configuration from `glossa-config.yaml`.
///
/// Looks for the config file relative to the current working directory.
fn load_config() -> Result<GlossaConfig, StartupError> {
    let config_path = Path::new("glossa-config.yaml");
    if config_path.exists() {
        Ok(GlossaConfig::from_file(config_path)?)
    } else {
        Ok(GlossaConfig::default())
    }
}

/// Feed stdin lines into the engine until the stream closes.
///
/// Lines starting with `!yes` or `!no` are local vote directives backed
/// by the console gateway; everything else is delivered as a message
/// from the console user.
async fn read_stdin(handle: EngineHandle, gateway: Arc<ConsoleGateway>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(directive) = parse_vote(line) {
            match directive {
                Ok((message, symbol)) => {
                    if let Err(err) = gateway.vote(message, symbol).await {
                        warn!(%message, error = %err, "vote directive failed");
                    }
                }
                Err(raw) => warn!(raw, "unreadable ballot id in vote directive"),
            }
            continue;
        }
        let delivered = handle
            .on_message(InboundMessage {
                channel: CONSOLE_CHANNEL,
                author: CONSOLE_USER,
                text: line.to_owned(),
            })
            .await;
        if !delivered {
            break;
        }
    }
}

/// Interpret `!yes <id>` / `!no <id>` console directives.
///
/// Returns `None` for ordinary lines, and `Err` with the raw id text
/// when the directive's ballot id does not parse.
fn parse_vote(line: &str) -> Option<Result<(MessageRef, &'static str), String>> {
    let (raw, symbol) = if let Some(rest) = line.strip_prefix("!yes ") {
        (rest, YES_REACTION)
    } else if let Some(rest) = line.strip_prefix("!no ") {
        (rest, NO_REACTION)
    } else {
        return None;
    };
    let raw = raw.trim();
    Some(
        raw.parse::<u64>()
            .ok()
            .map(|id| (MessageRef::new(id), symbol))
            .ok_or_else(|| raw.to_owned()),
    )
}

//! The single-writer engine task.
//!
//! All registry mutation happens inside one [`Engine`], which owns the
//! [`Registry`] outright. Inbound chat messages arrive over a bounded
//! queue via [`EngineHandle`]; the engine's `run` loop interleaves them
//! with timed reconciliation passes in one `select!`, so no two
//! mutations ever race. The gateway and the store are the only
//! suspension points.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use glossa_lang::Registry;
use glossa_parse::{Command, parse_command};
use glossa_store::{SnapshotStore, codec};
use glossa_types::{ChannelId, UserId};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::gateway::{ChatGateway, NO_REACTION, YES_REACTION};
use crate::reconcile::{self, PassSummary};
use crate::render;

/// Attachment name used for dictionary exports.
const DICTIONARY_FILE_NAME: &str = "dictionary.txt";

/// Inbound messages queued ahead of the engine before backpressure.
const INBOUND_QUEUE_DEPTH: usize = 64;

/// A chat message as delivered by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    /// Channel the message was posted in.
    pub channel: ChannelId,
    /// Author of the message.
    pub author: UserId,
    /// Raw message text, sigil included.
    pub text: String,
}

/// Cloneable sender half handed to the transport adapter.
#[derive(Debug, Clone)]
pub struct EngineHandle {
    tx: mpsc::Sender<InboundMessage>,
}

impl EngineHandle {
    /// Queue a message for the engine. Returns `false` once the engine
    /// has shut down and the queue is closed.
    pub async fn on_message(&self, message: InboundMessage) -> bool {
        self.tx.send(message).await.is_ok()
    }
}

/// The engine task: owns the registry, drives commands and passes.
pub struct Engine {
    registry: Registry,
    gateway: Arc<dyn ChatGateway>,
    store: Arc<dyn SnapshotStore>,
    config: EngineConfig,
    /// The engine's own chat identity; its messages are never commands.
    self_user: Option<UserId>,
    rx: mpsc::Receiver<InboundMessage>,
    last_pass: DateTime<Utc>,
}

impl Engine {
    /// Build an engine, restoring the registry from the store's snapshot
    /// when one exists.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] if an existing snapshot cannot be
    /// read or decoded. A missing snapshot is a fresh start, not an
    /// error.
    pub fn new(
        config: EngineConfig,
        gateway: Arc<dyn ChatGateway>,
        store: Arc<dyn SnapshotStore>,
        self_user: Option<UserId>,
    ) -> Result<(Self, EngineHandle), EngineError> {
        let registry = match store.load()? {
            Some(blob) => {
                let registry = codec::decode(&blob)?;
                info!(languages = registry.len(), "registry restored from snapshot");
                registry
            }
            None => Registry::new(),
        };
        let (tx, rx) = mpsc::channel(INBOUND_QUEUE_DEPTH);
        let engine = Self {
            registry,
            gateway,
            store,
            config,
            self_user,
            rx,
            last_pass: Utc::now(),
        };
        Ok((engine, EngineHandle { tx }))
    }

    /// Read access to the registry, for inspection between operations.
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Handle one inbound message.
    ///
    /// Non-commands (no sigil, or sent by the engine itself) and
    /// unparseable commands are ignored. Recognized commands mutate the
    /// registry and snapshot it before returning.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] if the post-mutation snapshot
    /// fails, and [`EngineError::Gateway`] if the command's primary
    /// outbound action (a ballot, a dictionary delivery) fails before
    /// any state changed.
    pub async fn process(&mut self, message: InboundMessage) -> Result<(), EngineError> {
        if self.self_user == Some(message.author) {
            return Ok(());
        }
        let Some(body) = message.text.strip_prefix(self.config.command_sigil.as_str()) else {
            return Ok(());
        };
        let command = match parse_command(body) {
            Ok(command) => command,
            Err(err) => {
                debug!(channel = %message.channel, error = %err, "command rejected");
                return Ok(());
            }
        };

        match command {
            Command::CreateLanguage { name } => {
                self.create_language(message.channel, name).await
            }
            Command::Dictionary => self.send_dictionary(message.channel, message.author).await,
            Command::Amend(request) => self.open_amendment(message.channel, request).await,
        }
    }

    async fn create_language(
        &mut self,
        channel: ChannelId,
        name: String,
    ) -> Result<(), EngineError> {
        let summary_text = match self.registry.create(channel, name) {
            Ok(language) => render::rules_summary(language),
            Err(err) => {
                debug!(%channel, error = %err, "create_language ignored");
                return Ok(());
            }
        };
        // The summary message is best-effort: a language without one
        // simply has nothing to refresh when its rules change.
        let summary = match self.gateway.send_message(channel, &summary_text).await {
            Ok(message) => Some(message),
            Err(err) => {
                warn!(%channel, error = %err, "rules summary post failed");
                None
            }
        };
        if let Some(language) = self.registry.get_mut(channel) {
            language.summary = summary;
        }
        reconcile::persist(&self.registry, self.store.as_ref())
    }

    async fn send_dictionary(
        &mut self,
        channel: ChannelId,
        author: UserId,
    ) -> Result<(), EngineError> {
        let Some(language) = self.registry.get(channel) else {
            debug!(%channel, "dictionary requested without a language");
            return Ok(());
        };
        let export = render::dictionary_export(language);
        let dm = self.gateway.create_direct_message(author).await?;
        self.gateway
            .send_file(dm, DICTIONARY_FILE_NAME, export.as_bytes())
            .await?;
        Ok(())
    }

    async fn open_amendment(
        &mut self,
        channel: ChannelId,
        request: glossa_types::ChangeRequest,
    ) -> Result<(), EngineError> {
        if self.registry.get(channel).is_none() {
            debug!(%channel, "amendment proposed without a language");
            return Ok(());
        }
        let window_ms = self.config.voting_window_ms();
        let ballot_body = render::ballot_text(&request, window_ms / 1000);
        // The ballot must exist before the amendment does; a failed post
        // leaves the registry untouched.
        let ballot = self.gateway.send_message(channel, &ballot_body).await?;
        for symbol in [YES_REACTION, NO_REACTION] {
            if let Err(err) = self.gateway.add_reaction(ballot, symbol).await {
                warn!(%channel, %ballot, symbol, error = %err, "seed reaction failed");
            }
        }
        if let Some(language) = self.registry.get_mut(channel) {
            language.propose(request, ballot, window_ms);
        }
        reconcile::persist(&self.registry, self.store.as_ref())
    }

    /// Run one reconciliation pass aged by `elapsed_ms`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] if a post-resolution snapshot
    /// fails.
    pub async fn reconcile(&mut self, elapsed_ms: i64) -> Result<PassSummary, EngineError> {
        reconcile::run_pass(
            &mut self.registry,
            self.gateway.as_ref(),
            self.store.as_ref(),
            elapsed_ms,
        )
        .await
    }

    /// Drive the engine until every [`EngineHandle`] is dropped.
    ///
    /// Alternates between queued inbound messages and timed
    /// reconciliation passes. Errors are logged, never fatal: the loop
    /// keeps serving whatever still works.
    pub async fn run(mut self) {
        let tick = Duration::from_millis(self.config.tick_interval_ms.max(1));
        let mut ticker = tokio::time::interval(tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(tick_ms = self.config.tick_interval_ms, "engine running");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let now = Utc::now();
                    let elapsed_ms = now
                        .signed_duration_since(self.last_pass)
                        .num_milliseconds();
                    self.last_pass = now;
                    if let Err(err) = self.reconcile(elapsed_ms).await {
                        error!(error = %err, "reconciliation pass failed");
                    }
                }
                inbound = self.rx.recv() => {
                    let Some(message) = inbound else {
                        info!("inbound queue closed, engine stopping");
                        break;
                    };
                    if let Err(err) = self.process(message).await {
                        error!(error = %err, "command handling failed");
                    }
                }
            }
        }
    }
}

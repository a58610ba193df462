//! The transport seam: everything the engine asks of the chat service.
//!
//! The engine never talks to a chat SDK directly. All outbound traffic
//! goes through the [`ChatGateway`] trait — posting ballots, editing the
//! live remaining-time line, fetching reaction counts, delivering the
//! dictionary export. A production adapter wraps the real transport; the
//! [`MemoryGateway`] records everything in memory for tests and local
//! runs.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use glossa_types::{ChannelId, MessageRef, UserId};

/// The reaction symbol counted as a yes vote. The engine seeds one on
/// every ballot it posts.
pub const YES_REACTION: &str = "\u{2705}";

/// The reaction symbol counted as a no vote.
pub const NO_REACTION: &str = "\u{274c}";

/// Errors surfaced by a gateway implementation.
///
/// All gateway failures are transient from the engine's point of view:
/// the affected operation is skipped or retried on a later pass, never
/// escalated.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The transport rejected or failed the operation.
    #[error("transport error: {message}")]
    Transport {
        /// Description from the transport.
        message: String,
    },

    /// The referenced message no longer exists on the transport side.
    #[error("message not found: {message}")]
    MissingMessage {
        /// The dangling reference.
        message: MessageRef,
    },
}

/// A fetched message: its text and per-symbol reaction counts.
///
/// Counts include every reaction on the message — the engine's own seed
/// reactions included. Vote arithmetic happens engine-side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedMessage {
    /// The message text as currently rendered.
    pub text: String,
    /// Reaction counts keyed by symbol.
    pub reactions: BTreeMap<String, u32>,
}

impl FetchedMessage {
    /// Vote count for a symbol, with the engine's own seed reaction
    /// subtracted.
    pub fn votes(&self, symbol: &str) -> u32 {
        self.reactions
            .get(symbol)
            .copied()
            .unwrap_or(0)
            .saturating_sub(1)
    }
}

/// The operations the engine consumes from the chat transport.
///
/// Every method is a suspension point; the engine awaits these calls
/// from its single-writer task, so implementations need not serialize
/// against each other beyond their own internal state.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Post a message to a channel, returning its reference.
    async fn send_message(
        &self,
        channel: ChannelId,
        text: &str,
    ) -> Result<MessageRef, GatewayError>;

    /// Replace a message's text in place.
    async fn edit_message(&self, message: MessageRef, text: &str) -> Result<(), GatewayError>;

    /// Delete a message.
    async fn delete_message(&self, message: MessageRef) -> Result<(), GatewayError>;

    /// Add one reaction with the given symbol to a message.
    async fn add_reaction(&self, message: MessageRef, symbol: &str) -> Result<(), GatewayError>;

    /// Fetch a message's current text and reaction counts.
    async fn fetch_message(&self, message: MessageRef) -> Result<FetchedMessage, GatewayError>;

    /// Open (or reuse) a direct-message channel with a user.
    async fn create_direct_message(&self, user: UserId) -> Result<ChannelId, GatewayError>;

    /// Deliver a file attachment to a channel.
    async fn send_file(
        &self,
        channel: ChannelId,
        name: &str,
        bytes: &[u8],
    ) -> Result<(), GatewayError>;
}

/// One message held by the [`MemoryGateway`].
#[derive(Debug, Clone)]
struct StoredMessage {
    channel: ChannelId,
    text: String,
    reactions: BTreeMap<String, u32>,
}

/// A file delivered through the [`MemoryGateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentFile {
    /// The destination channel.
    pub channel: ChannelId,
    /// The attachment name.
    pub name: String,
    /// The attachment bytes.
    pub bytes: Vec<u8>,
}

#[derive(Debug, Default)]
struct MemoryGatewayInner {
    messages: BTreeMap<MessageRef, StoredMessage>,
    deleted: Vec<MessageRef>,
    files: Vec<SentFile>,
    dm_channels: BTreeMap<UserId, ChannelId>,
}

/// In-memory gateway that records every operation.
///
/// Used by the engine's tests and by local console runs. Message
/// references are allocated from a process-local counter; reaction
/// counts can be bumped from the outside to simulate voters.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    next_id: AtomicU64,
    inner: Mutex<MemoryGatewayInner>,
}

impl MemoryGateway {
    /// Create an empty gateway.
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed).saturating_add(1)
    }

    /// Simulate `count` users reacting with `symbol` on a message.
    pub fn add_votes(&self, message: MessageRef, symbol: &str, count: u32) {
        if let Ok(mut inner) = self.inner.lock()
            && let Some(stored) = inner.messages.get_mut(&message)
        {
            let slot = stored.reactions.entry(symbol.to_owned()).or_insert(0);
            *slot = slot.saturating_add(count);
        }
    }

    /// The current text of a message, if it exists.
    pub fn message_text(&self, message: MessageRef) -> Option<String> {
        self.inner
            .lock()
            .ok()
            .and_then(|inner| inner.messages.get(&message).map(|stored| stored.text.clone()))
    }

    /// The channel a message was posted to, if it exists.
    pub fn message_channel(&self, message: MessageRef) -> Option<ChannelId> {
        self.inner
            .lock()
            .ok()
            .and_then(|inner| inner.messages.get(&message).map(|stored| stored.channel))
    }

    /// References of messages that have been deleted, in deletion order.
    pub fn deleted_messages(&self) -> Vec<MessageRef> {
        self.inner
            .lock()
            .map_or_else(|_| Vec::new(), |inner| inner.deleted.clone())
    }

    /// Every file delivered so far.
    pub fn sent_files(&self) -> Vec<SentFile> {
        self.inner
            .lock()
            .map_or_else(|_| Vec::new(), |inner| inner.files.clone())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, MemoryGatewayInner>, GatewayError> {
        self.inner.lock().map_err(|_poisoned| GatewayError::Transport {
            message: "memory gateway state poisoned".to_owned(),
        })
    }
}

#[async_trait]
impl ChatGateway for MemoryGateway {
    async fn send_message(
        &self,
        channel: ChannelId,
        text: &str,
    ) -> Result<MessageRef, GatewayError> {
        let message = MessageRef::new(self.allocate());
        let mut inner = self.lock()?;
        inner.messages.insert(
            message,
            StoredMessage {
                channel,
                text: text.to_owned(),
                reactions: BTreeMap::new(),
            },
        );
        Ok(message)
    }

    async fn edit_message(&self, message: MessageRef, text: &str) -> Result<(), GatewayError> {
        let mut inner = self.lock()?;
        let stored = inner
            .messages
            .get_mut(&message)
            .ok_or(GatewayError::MissingMessage { message })?;
        stored.text = text.to_owned();
        Ok(())
    }

    async fn delete_message(&self, message: MessageRef) -> Result<(), GatewayError> {
        let mut inner = self.lock()?;
        if inner.messages.remove(&message).is_none() {
            return Err(GatewayError::MissingMessage { message });
        }
        inner.deleted.push(message);
        Ok(())
    }

    async fn add_reaction(&self, message: MessageRef, symbol: &str) -> Result<(), GatewayError> {
        let mut inner = self.lock()?;
        let stored = inner
            .messages
            .get_mut(&message)
            .ok_or(GatewayError::MissingMessage { message })?;
        let slot = stored.reactions.entry(symbol.to_owned()).or_insert(0);
        *slot = slot.saturating_add(1);
        Ok(())
    }

    async fn fetch_message(&self, message: MessageRef) -> Result<FetchedMessage, GatewayError> {
        let inner = self.lock()?;
        let stored = inner
            .messages
            .get(&message)
            .ok_or(GatewayError::MissingMessage { message })?;
        Ok(FetchedMessage {
            text: stored.text.clone(),
            reactions: stored.reactions.clone(),
        })
    }

    async fn create_direct_message(&self, user: UserId) -> Result<ChannelId, GatewayError> {
        if let Some(existing) = self.lock()?.dm_channels.get(&user).copied() {
            return Ok(existing);
        }
        let channel = ChannelId::new(self.allocate());
        self.lock()?.dm_channels.insert(user, channel);
        Ok(channel)
    }

    async fn send_file(
        &self,
        channel: ChannelId,
        name: &str,
        bytes: &[u8],
    ) -> Result<(), GatewayError> {
        self.lock()?.files.push(SentFile {
            channel,
            name: name.to_owned(),
            bytes: bytes.to_vec(),
        });
        Ok(())
    }
}

//! Console transport for local runs.
//!
//! Wraps the in-memory gateway and mirrors every outbound action to
//! stdout, so a local session can watch ballots appear, tick down, and
//! resolve. Reaction state lives in the inner gateway, which lets the
//! `!yes`/`!no` console directives stand in for voters.

use async_trait::async_trait;

use glossa_core::{ChatGateway, FetchedMessage, GatewayError, MemoryGateway};
use glossa_types::{ChannelId, MessageRef, UserId};

/// Gateway that prints outbound traffic while keeping full message and
/// reaction state in memory.
#[derive(Debug, Default)]
pub struct ConsoleGateway {
    inner: MemoryGateway,
}

impl ConsoleGateway {
    /// Create an empty console gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one vote reaction on a message, as a console user would.
    pub async fn vote(&self, message: MessageRef, symbol: &str) -> Result<(), GatewayError> {
        self.inner.add_reaction(message, symbol).await
    }
}

#[async_trait]
impl ChatGateway for ConsoleGateway {
    async fn send_message(
        &self,
        channel: ChannelId,
        text: &str,
    ) -> Result<MessageRef, GatewayError> {
        let message = self.inner.send_message(channel, text).await?;
        println!("[{channel}] message {message}:\n{text}\n");
        Ok(message)
    }

    async fn edit_message(&self, message: MessageRef, text: &str) -> Result<(), GatewayError> {
        self.inner.edit_message(message, text).await?;
        println!("[edit] message {message}:\n{text}\n");
        Ok(())
    }

    async fn delete_message(&self, message: MessageRef) -> Result<(), GatewayError> {
        self.inner.delete_message(message).await?;
        println!("[delete] message {message}\n");
        Ok(())
    }

    async fn add_reaction(&self, message: MessageRef, symbol: &str) -> Result<(), GatewayError> {
        self.inner.add_reaction(message, symbol).await
    }

    async fn fetch_message(&self, message: MessageRef) -> Result<FetchedMessage, GatewayError> {
        self.inner.fetch_message(message).await
    }

    async fn create_direct_message(&self, user: UserId) -> Result<ChannelId, GatewayError> {
        self.inner.create_direct_message(user).await
    }

    async fn send_file(
        &self,
        channel: ChannelId,
        name: &str,
        bytes: &[u8],
    ) -> Result<(), GatewayError> {
        self.inner.send_file(channel, name, bytes).await?;
        println!(
            "[{channel}] file {name}:\n{}\n",
            String::from_utf8_lossy(bytes)
        );
        Ok(())
    }
}

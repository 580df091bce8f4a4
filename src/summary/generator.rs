//! Text generation trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One message of a chat conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system<S: Into<String>>(content: S) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user<S: Into<String>>(content: S) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// Produces a completion for a chat conversation.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use veraz::error::Result;
/// use veraz::summary::{ChatMessage, TextGenerator};
///
/// struct Echo;
///
/// #[async_trait]
/// impl TextGenerator for Echo {
///     async fn generate(&self, messages: &[ChatMessage]) -> Result<String> {
///         Ok(messages.last().map(|m| m.content.clone()).unwrap_or_default())
///     }
///
///     fn name(&self) -> &str {
///         "echo"
///     }
/// }
/// ```
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate the assistant reply to `messages`.
    async fn generate(&self, messages: &[ChatMessage]) -> Result<String>;

    /// Name of the generator, for logs.
    fn name(&self) -> &str;
}

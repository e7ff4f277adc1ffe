//! Per-character chat history, snapshotted to storage on every change.
//!
//! The whole character -> messages map is serialized and written back
//! under one storage key after each mutation; there is no incremental
//! diffing and no batching. The store owns the map. Every mutation goes
//! through it, and each mutating operation ends with an explicit
//! persist step.

use std::collections::HashMap;

use thiserror::Error;

use crate::models::Message;
use crate::services::storage::{Storage, StorageError};

/// Fixed storage key holding the whole-map snapshot.
pub const HISTORY_KEY: &str = "chat_history";

#[derive(Debug, Error)]
pub enum HistoryError {
    /// Persisted history exists but could not be read from storage.
    #[error("stored chat history is unavailable: {0}")]
    Unavailable(#[source] StorageError),
    /// Persisted history was present but is not a valid snapshot.
    /// Recoverable: the caller decides whether to discard via
    /// [`ChatHistoryStore::empty`].
    #[error("stored chat history is corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),
    /// The in-memory map could not be serialized for writing. Not
    /// reachable for this data model; kept so `persist` never has to
    /// misreport a write-side failure as load-side corruption.
    #[error("chat history snapshot could not be encoded: {0}")]
    Encode(#[source] serde_json::Error),
    /// A mutation was applied in memory but the snapshot write failed.
    /// The store keeps serving the in-memory state.
    #[error("chat history could not be persisted: {0}")]
    PersistenceFailed(#[source] StorageError),
}

/// Durable log of conversations, keyed by character name.
///
/// Character names are case-sensitive and never normalized. Message
/// lists keep insertion order. Reads auto-vivify: asking for a character
/// that was never seen creates (and persists) an empty entry.
pub struct ChatHistoryStore<S: Storage> {
    chats: HashMap<String, Vec<Message>>,
    storage: S,
}

impl<S: Storage> ChatHistoryStore<S> {
    /// Load persisted history. An absent value starts an empty history;
    /// an unreadable or unparseable one is an error rather than a
    /// silent reset, so no prior history is ever discarded implicitly.
    pub fn open(storage: S) -> Result<Self, HistoryError> {
        let chats = match storage.get(HISTORY_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).map_err(HistoryError::Corrupt)?,
            Ok(None) => HashMap::new(),
            Err(err) => return Err(HistoryError::Unavailable(err)),
        };

        Ok(Self { chats, storage })
    }

    /// Start over with an empty history, e.g. after [`open`] reported
    /// corrupt state and the caller chose to discard it.
    ///
    /// [`open`]: ChatHistoryStore::open
    pub fn empty(storage: S) -> Self {
        Self {
            chats: HashMap::new(),
            storage,
        }
    }

    /// Messages exchanged with `character_name`, oldest first.
    ///
    /// This is a side-effecting read: an unseen name gets an empty entry
    /// that becomes part of the persisted snapshot immediately. A failed
    /// snapshot write here is logged and otherwise ignored; the read
    /// itself always succeeds.
    pub fn get_messages(&mut self, character_name: &str) -> &[Message] {
        if !self.chats.contains_key(character_name) {
            self.chats.insert(character_name.to_string(), Vec::new());
            if let Err(err) = self.persist() {
                log::warn!("chat history snapshot failed after first access: {err}");
            }
        }

        &self.chats[character_name]
    }

    /// Append one message to a character's conversation and persist.
    ///
    /// On a persistence failure the append still stands in memory; the
    /// returned error tells the caller durability was lost.
    pub fn add_message(
        &mut self,
        character_name: &str,
        message: Message,
    ) -> Result<(), HistoryError> {
        self.chats
            .entry(character_name.to_string())
            .or_default()
            .push(message);

        self.persist()
    }

    /// Erase a character's conversation, keeping the entry. Unknown
    /// names are a no-op: nothing is created and nothing is written.
    pub fn clear_chat(&mut self, character_name: &str) -> Result<(), HistoryError> {
        match self.chats.get_mut(character_name) {
            Some(messages) => {
                messages.clear();
                self.persist()
            }
            None => Ok(()),
        }
    }

    /// Names of all characters with an entry, in no particular order.
    pub fn characters(&self) -> impl Iterator<Item = &str> {
        self.chats.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.chats.is_empty()
    }

    fn persist(&mut self) -> Result<(), HistoryError> {
        let raw = serde_json::to_string(&self.chats).map_err(HistoryError::Encode)?;
        self.storage
            .set(HISTORY_KEY, &raw)
            .map_err(HistoryError::PersistenceFailed)
    }
}

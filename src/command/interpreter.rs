//! Orchestrates one command: extract, gate, dispatch
//!
//! Stateless across calls: each command produces one proposal, one gate
//! decision, and at most one store operation, then everything is dropped.
//! Every path ends in reply text; interpret itself cannot fail.

use crate::command::dispatcher::{self, ActionDispatcher};
use crate::command::gate::ConfidenceGate;
use crate::core::config::BookConfig;
use crate::core::error::Result;
use crate::llm::client::LlmClient;
use crate::llm::extractor::{ExtractIntent, LlmExtractor};
use crate::store::{ContactStore, SqliteStore};

/// Reply for a below-threshold proposal
pub const MSG_CLARIFY: &str =
    "I'm not entirely sure what you want to do. Could you please rephrase your command?";

/// The sole entry point of the interpretation core
pub struct CommandInterpreter<E, S> {
    extractor: E,
    gate: ConfidenceGate,
    store: S,
}

impl CommandInterpreter<LlmExtractor, SqliteStore> {
    /// Wire up the production pipeline from a config handle
    pub fn from_config(config: &BookConfig) -> Result<Self> {
        let client = LlmClient::from_config(config)?;
        let store = SqliteStore::open(&config.db_path)?;
        Ok(Self::new(
            LlmExtractor::new(client),
            store,
            config.min_confidence,
        ))
    }
}

impl<E: ExtractIntent, S: ContactStore> CommandInterpreter<E, S> {
    pub fn new(extractor: E, store: S, min_confidence: f32) -> Self {
        Self {
            extractor,
            gate: ConfidenceGate::new(min_confidence),
            store,
        }
    }

    /// Interpret one command, always producing reply text
    pub async fn interpret(&self, command: &str) -> String {
        let proposal = self.extractor.extract(command).await;
        tracing::debug!(
            "proposal: action={:?} name={:?} phone={:?} confidence={:.2}",
            proposal.action,
            proposal.name,
            proposal.phone,
            proposal.confidence
        );

        if !self.gate.accept(&proposal) {
            return MSG_CLARIFY.to_string();
        }

        ActionDispatcher::dispatch(&self.store, &proposal)
    }

    /// Shortcut entry point: list every contact without going through
    /// extraction
    pub fn list_all(&self) -> String {
        match self.store.read_all() {
            Ok(contacts) => dispatcher::render_phone_book(&contacts),
            Err(e) => {
                tracing::error!("store operation failed: {}", e);
                dispatcher::MSG_STORE_FAILURE.to_string()
            }
        }
    }
}

pub mod client;
pub mod extractor;

pub use client::LlmClient;
pub use extractor::{ContactAction, ExtractIntent, IntentProposal, LlmExtractor};

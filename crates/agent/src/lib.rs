//! Question answering for Alaska snow services.
//!
//! This crate ties the corpus index and the weather tool together:
//! - a deny-list [`SafetyGate`] in front of every question
//! - the [`Agent`] that decides which tools run and assembles the answer
//! - an append-only [`InteractionJournal`] recording each exchange

pub mod agent;
pub mod answer;
pub mod journal;
pub mod safety;
pub mod types;


// Re-export main types
pub use agent::Agent;
pub use answer::{assemble_answer, NO_RESPONSE, REFUSAL};
pub use journal::{
    open_journal, InteractionJournal, InteractionRecord, JsonlJournal, MemoryJournal,
    SqliteJournal,
};
pub use safety::SafetyGate;
pub use types::{AgentAnswer, ToolTag};

//! Transcript module - Stored messages and phase-based indexing.
//!
//! Messages are append-only records of the interview. The indexer
//! partitions a flat transcript into phase-labeled chapter groups,
//! using persisted phase tags when present and inline transition
//! markers as the compatibility fallback.

mod indexer;
mod message;

pub use indexer::{filter_by_phases, group_by_phase, parse_transition_marker};
pub use message::{Role, StoredMessage};

//! Story Steward - Life-Story Interview Engine
//!
//! This crate drives multi-turn life-story interviews through ordered
//! chapters, answers each turn via a model-fallback cascade, and curates
//! short per-chapter narrative snippets from the transcript.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

//! Use-case handlers.

pub mod curation;
pub mod interview;

pub use curation::{
    CurateStoryError, CurateStoryHandler, CurateStoryResult, ListSnippetsHandler,
    SnippetLifecycleError, SnippetLifecycleHandler, SnippetListing,
};
pub use interview::{
    AdvancePhaseCommand, AdvancePhaseError, AdvancePhaseHandler, AdvancePhaseResult,
    ProcessMessageCommand, ProcessMessageError, ProcessMessageHandler, ProcessMessageResult,
    SelectAgeCommand, SelectAgeError, SelectAgeHandler, SelectAgeResult,
};

//! Interview use-case handlers.

mod advance_phase;
mod process_message;
mod select_age;

pub use advance_phase::{
    AdvancePhaseCommand, AdvancePhaseError, AdvancePhaseHandler, AdvancePhaseResult,
};
pub use process_message::{
    ProcessMessageCommand, ProcessMessageError, ProcessMessageHandler, ProcessMessageResult,
};
pub use select_age::{SelectAgeCommand, SelectAgeError, SelectAgeHandler, SelectAgeResult};

//! User-facing messages.
//!
//! Every line lenslog prints goes through [`Message`] and the `msg_*` macros
//! in [`macros`], which pick between plain console output and `tracing`.

pub mod display;
pub mod macros;
pub mod types;

pub use types::Message;

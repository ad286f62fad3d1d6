//! lenslog: track contact lens wear time, pair replacement and prescriptions.
//!
//! - [`libs`] holds the domain: cycles, the tracker, persistence seams,
//!   reminders, prescriptions and output helpers
//! - [`db`] provides the SQLite-backed store used by the CLI
//! - [`commands`] is the command-line surface

pub mod commands;
pub mod db;
pub mod libs;

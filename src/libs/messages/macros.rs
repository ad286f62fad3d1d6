//! Output macros for [`Message`](super::Message) values.
//!
//! In debug mode (`LENSLOG_DEBUG` or `RUST_LOG` set) every macro logs through
//! `tracing` at the matching level. Otherwise messages go to the console with
//! an icon prefix: errors to stderr, everything else to stdout. `msg_debug!`
//! prints nothing outside debug mode.
//!
//! Passing `true` as the second argument surrounds the message with blank
//! lines.
//!
//! ## Levels
//!
//! | Macro | Console | Debug mode |
//! |---|---|---|
//! | `msg_print!` | plain stdout | `info` |
//! | `msg_success!` | stdout with a check mark | `info` |
//! | `msg_info!` | stdout with an info sign | `info` |
//! | `msg_warning!` | stdout with a warning sign | `warn` |
//! | `msg_error!` | stderr with a cross | `error` |
//! | `msg_debug!` | nothing | `debug` |
//!
//! `msg_error_anyhow!` and `msg_bail_anyhow!` do not print; they turn a
//! message into an `anyhow::Error`, the latter returning it from the current
//! function.
//!
//! ```rust
//! use lenslog::libs::messages::Message;
//! use lenslog::{msg_info, msg_success};
//!
//! msg_success!(Message::PrescriptionSaved);
//! msg_info!(Message::HistoryEmpty, true);
//! ```

use std::sync::OnceLock;

static DEBUG_MODE: OnceLock<bool> = OnceLock::new();

/// Whether output should go through `tracing`. Read once per process.
#[doc(hidden)]
pub fn is_debug_mode() -> bool {
    *DEBUG_MODE.get_or_init(|| std::env::var("LENSLOG_DEBUG").is_ok() || std::env::var("RUST_LOG").is_ok())
}

#[macro_export]
macro_rules! msg_print {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("{}", $msg);
        } else {
            println!("{}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("\n{}\n", $msg);
        } else {
            println!("\n{}\n", $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_success {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("✅ {}", $msg);
        } else {
            println!("✅ {}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("\n✅ {}\n", $msg);
        } else {
            println!("\n✅ {}\n", $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_error {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::error!("❌ {}", $msg);
        } else {
            eprintln!("❌ {}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::error!("\n❌ {}\n", $msg);
        } else {
            eprintln!("\n❌ {}\n", $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_warning {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::warn!("⚠️ {}", $msg);
        } else {
            println!("⚠️ {}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::warn!("\n⚠️ {}\n", $msg);
        } else {
            println!("\n⚠️ {}\n", $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_info {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("ℹ️ {}", $msg);
        } else {
            println!("ℹ️ {}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("\nℹ️ {}\n", $msg);
        } else {
            println!("\nℹ️ {}\n", $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_debug {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::debug!("🔍 {}", $msg);
        }
    };
}

/// Builds an `anyhow::Error` from a message.
#[macro_export]
macro_rules! msg_error_anyhow {
    ($msg:expr) => {
        anyhow::anyhow!("{}", $msg)
    };
}

/// Returns early with an `anyhow::Error` built from a message.
#[macro_export]
macro_rules! msg_bail_anyhow {
    ($msg:expr) => {
        anyhow::bail!("{}", $msg)
    };
}

//! User-facing messages.
//!
//! All text shown by the CLI lives in [`Message`] and its `Display` impl, and
//! is printed through the `msg_*` macros.

pub mod display;
pub mod macros;
pub mod types;

pub use types::Message;

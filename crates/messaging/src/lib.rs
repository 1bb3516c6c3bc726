//! Dispatch chat between the vendor and the driver.
//!
//! Messages live in process memory only; there is no delivery transport.

pub mod message;

pub use message::{ChatMessage, ChatThread, Sender};

//! Event handling module.
//!
//! This module contains handlers for different types of events:
//! - Network events: realtime database reads, writes and the items subscription
//! - Terminal events: User input and terminal interactions

pub mod network;
pub mod terminal;

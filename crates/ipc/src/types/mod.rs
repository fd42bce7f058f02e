//! Type definitions for IPC messages.

mod guest;

pub use guest::*;

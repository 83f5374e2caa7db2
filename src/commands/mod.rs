//! CLI command implementations
//!
//! Commands are the "request handler" side of the system: they perform
//! the submission-time validation gate, invoke lifecycle transitions,
//! and render results. The core components stay free of I/O concerns.

pub mod catalog;
pub mod entry;

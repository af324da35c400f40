//! Core layer
//!
//! Plans, the sequential dispatcher that runs them, the process runner that
//! talks to collaborator build tools, and the in-process search engine.

pub mod data;
pub mod dispatcher;
pub mod interrupt;
pub mod runner;
pub mod search;
pub mod traits;

//! tokenscope network layer
//!
//! Provides the HTTP plumbing the data providers share:
//! - Client construction with timeout and user agent rotation
//! - A JSON fetch abstraction that providers and tests can swap out

pub mod client;
pub mod fetch;

pub use client::*;
pub use fetch::*;

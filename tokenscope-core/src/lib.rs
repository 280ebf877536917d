//! tokenscope core - domain model and scoring for Solana token due diligence
//!
//! This crate holds everything that is a pure function of its inputs:
//! - Address validation
//! - Token metadata and market snapshot entities
//! - Search query synthesis
//! - Relevance verification and ranking of social mentions
//! - Engagement aggregation
//! - Recommendation scoring
//!
//! Network access lives in `tokenscope-net` and `tokenscope-providers`.

pub mod address;
pub mod engagement;
pub mod mention;
pub mod queries;
pub mod recommendation;
pub mod relevance;
pub mod token;
pub mod vocabulary;

pub use address::*;
pub use engagement::*;
pub use mention::*;
pub use queries::*;
pub use recommendation::*;
pub use relevance::*;
pub use token::*;
pub use vocabulary::*;

/// Maximum number of ranked mentions kept in a report
pub const MAX_RANKED_MENTIONS: usize = 10;

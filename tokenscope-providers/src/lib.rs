//! tokenscope providers
//!
//! External data sources for one token:
//! - **Registry**: provider endpoints and their response parsers
//! - **Resolver**: ordered fallback across providers, one fetch each
//! - **Metadata** / **Market**: the DexScreener, Jupiter and Solscan tables
//! - **Search**: the mention search seam and its Exa backend

pub mod exa;
pub mod market;
pub mod metadata;
pub mod registry;
pub mod resolver;
pub mod search;

pub use exa::*;
pub use market::*;
pub use metadata::*;
pub use registry::*;
pub use resolver::*;
pub use search::*;

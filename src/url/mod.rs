//! URL handling module for modmap
//!
//! This module decides which discovered links a crawl may follow: same-site
//! checks, scheme checks, and the exclusion patterns for non-content paths.

mod filter;
mod site;

// Re-export main functions
pub use filter::is_admissible;
pub use site::same_site;

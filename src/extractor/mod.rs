//! Module structuring service
//!
//! Turns crawled documentation text into a structured list of product
//! modules and submodules by calling an OpenAI-compatible chat completions
//! endpoint. The service is consumed through the [`Structurer`] trait so the
//! pipeline can be exercised without a live model behind it.

mod client;
mod prompt;
mod response;

pub use client::OpenAiStructurer;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One crawled documentation source handed to the structuring service
#[derive(Debug, Clone, Serialize)]
pub struct PageContent {
    /// Seed URL the content was crawled from
    pub url: String,
    /// Concatenated cleaned text for that URL
    pub content: String,
}

/// A product module identified by the model
///
/// Records have no identity beyond their position in the returned list;
/// reconciling duplicates across separate extractions is the caller's
/// concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRecord {
    /// Module name
    pub module: String,

    /// High-level description of the module
    #[serde(default)]
    pub description: String,

    /// Submodule name to description, in stable alphabetical order
    #[serde(default)]
    pub submodules: BTreeMap<String, String>,
}

/// Structuring service interface
///
/// Implementations may fail with rate-limit or quota errors; callers are
/// expected to contain such failures per URL rather than abort a batch.
#[async_trait]
pub trait Structurer: Send + Sync {
    /// Extracts module records from one or more documentation sources
    async fn extract_modules(&self, pages: &[PageContent]) -> crate::ExtractResult<Vec<ModuleRecord>>;
}

//! Readers for downloaded literature search results.

pub mod europepmc;

use crate::models::{DumpHeader, PaperMetadata};

/// Common interface for an already-downloaded batch of search results.
pub trait LiteratureDump {
    /// Date window and record count the batch was fetched with.
    fn header(&self) -> &DumpHeader;

    /// All records in the batch, in source order.
    fn papers(&self) -> Vec<PaperMetadata>;
}

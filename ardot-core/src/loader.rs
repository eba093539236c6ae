//! Decoding the images a manifest points at.
//!
//! Every entry is decoded concurrently and reported individually, so one bad
//! image produces a named failure instead of stalling the whole load.

use std::fmt;
use std::future::Future;

use futures::future::join_all;

use crate::error::{ArError, Result};
use crate::manifest::{Manifest, ReferenceEntry};

/// Something that can turn a reference URL into a decoded image.
///
/// Implementations must resolve on failure as well as on success.
pub trait ImageDecoder {
    type Image;
    type Error: fmt::Display;

    fn decode(&self, url: &str) -> impl Future<Output = std::result::Result<Self::Image, Self::Error>>;
}

/// A successfully decoded reference
#[derive(Debug, Clone)]
pub struct Reference<I> {
    pub entry: ReferenceEntry,
    pub image: I,
}

impl<I> Reference<I> {
    pub fn name(&self) -> &str {
        &self.entry.name
    }

    pub fn url(&self) -> &str {
        &self.entry.url
    }
}

/// Decode result for one manifest entry
#[derive(Debug)]
pub struct LoadOutcome<I> {
    pub entry: ReferenceEntry,
    pub result: std::result::Result<I, String>,
}

/// Per-entry results in manifest order
#[derive(Debug)]
pub struct LoadReport<I> {
    outcomes: Vec<LoadOutcome<I>>,
}

impl<I> LoadReport<I> {
    pub fn outcomes(&self) -> &[LoadOutcome<I>] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.outcomes.iter().all(|outcome| outcome.result.is_ok())
    }

    /// Entries that failed, with the reason
    pub fn failures(&self) -> impl Iterator<Item = (&ReferenceEntry, &str)> {
        self.outcomes.iter().filter_map(|outcome| match &outcome.result {
            Ok(_) => None,
            Err(reason) => Some((&outcome.entry, reason.as_str())),
        })
    }

    /// All references, or an error naming the first one that failed
    pub fn into_references(self) -> Result<Vec<Reference<I>>> {
        self.outcomes
            .into_iter()
            .map(|LoadOutcome { entry, result }| match result {
                Ok(image) => Ok(Reference { entry, image }),
                Err(reason) => Err(ArError::ReferenceLoad {
                    name: entry.name,
                    url: entry.url,
                    reason,
                }),
            })
            .collect()
    }
}

/// Decode every manifest entry concurrently
pub async fn load_references<D: ImageDecoder>(manifest: &Manifest, decoder: &D) -> LoadReport<D::Image> {
    let pending = manifest.iter().map(|entry| async move {
        let result = decoder.decode(&entry.url).await.map_err(|err| err.to_string());
        match &result {
            Ok(_) => log::debug!("decoded reference '{}'", entry.name),
            Err(reason) => log::warn!("reference '{}' ({}) failed: {reason}", entry.name, entry.url),
        }
        LoadOutcome {
            entry: entry.clone(),
            result,
        }
    });

    let outcomes = join_all(pending).await;
    log::info!("loaded {} reference image(s)", outcomes.len());
    LoadReport { outcomes }
}

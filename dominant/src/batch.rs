//! Batch extraction over a list of artworks.
//!
//! Every artwork is handled in isolation: a missing image, a failed fetch, an undecodable file or
//! a failed write is recorded in that artwork's [`ItemResult`] and the run moves on. Only failing
//! to list the artworks (or to start the worker pool) aborts a run.

use log::{debug, info, warn};
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use serde::Serialize;

use crate::descriptor::DominantColor;
use crate::error::{BatchError, Error};
use crate::extract::extract_from;
use crate::store::{CatalogStore, ImageSource, WorkItem};

/// Tunables of a batch run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BatchOptions {
    /// Number of artworks processed at once. `0` and `1` both mean one at a time.
    pub jobs: usize,
    /// Extra attempts after a fetch or store failure.
    pub retries: u32,
}

/// Outcome for one artwork.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ItemResult {
    pub id: String,
    pub title: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<DominantColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Outcome of a whole run. `results` is in the same order as the input.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct BatchSummary {
    pub message: String,
    /// Artworks whose color was extracted and saved.
    pub processed: usize,
    /// Artworks attempted.
    pub total: usize,
    pub results: Vec<ItemResult>,
}

/// Runs extraction for artworks lacking a color, fetching from `source` and saving into `store`.
pub struct Batch<'a, S: ?Sized, C: ?Sized> {
    source: &'a S,
    store: &'a C,
    options: BatchOptions,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            jobs: 1,
            retries: 0,
        }
    }
}

impl ItemResult {
    fn new(item: &WorkItem, outcome: Result<DominantColor, Error>) -> Self {
        let (color, error) = match outcome {
            Ok(color) => (Some(color), None),
            Err(e) => (None, Some(e.to_string())),
        };
        Self {
            id: item.id.clone(),
            title: item.title.clone(),
            success: color.is_some(),
            color,
            error,
        }
    }
}

impl BatchSummary {
    fn new(results: Vec<ItemResult>) -> Self {
        let total = results.len();
        let processed = results.iter().filter(|r| r.success).count();
        let message = if total == 0 {
            "No artworks need color extraction".to_owned()
        } else {
            format!("Extracted colors for {processed} of {total} artworks")
        };
        Self {
            message,
            processed,
            total,
            results,
        }
    }
}

impl<'a, S, C> Batch<'a, S, C>
where
    S: ImageSource + ?Sized,
    C: CatalogStore + ?Sized,
{
    pub fn new(source: &'a S, store: &'a C) -> Self {
        Self {
            source,
            store,
            options: BatchOptions::default(),
        }
    }

    pub fn options(mut self, options: BatchOptions) -> Self {
        self.options = options;
        self
    }

    /// List the artworks missing a color from the store and process all of them.
    pub fn run(&self) -> Result<BatchSummary, BatchError> {
        let items = self
            .store
            .list_missing_descriptor()
            .map_err(BatchError::Listing)?;
        info!("{} artworks lack a dominant color", items.len());
        self.run_items(&items)
    }

    /// Process the given artworks.
    pub fn run_items(&self, items: &[WorkItem]) -> Result<BatchSummary, BatchError> {
        let results: Vec<ItemResult> = if self.options.jobs <= 1 {
            items.iter().map(|item| self.process_item(item)).collect()
        } else {
            debug!("processing with {} workers", self.options.jobs);
            let pool = ThreadPoolBuilder::new()
                .num_threads(self.options.jobs)
                .build()?;
            pool.install(|| {
                items
                    .par_iter()
                    .map(|item| self.process_item(item))
                    .collect()
            })
        };
        let summary = BatchSummary::new(results);
        info!("{}", summary.message);
        Ok(summary)
    }

    fn process_item(&self, item: &WorkItem) -> ItemResult {
        let outcome = self.process(item);
        match &outcome {
            Ok(color) => info!(
                "{}: dominant color h={} s={} l={}{}",
                item.id,
                color.hue,
                color.saturation,
                color.lightness,
                if color.is_achromatic { " (achromatic)" } else { "" }
            ),
            Err(e) => warn!("{}: {}", item.id, e),
        }
        ItemResult::new(item, outcome)
    }

    fn process(&self, item: &WorkItem) -> Result<DominantColor, Error> {
        let reference = item.image().ok_or(Error::MissingImage)?;
        debug!("{}: extracting from {}", item.id, reference);
        let color = self.retrying(&item.id, || extract_from(self.source, reference))?;
        self.retrying(&item.id, || {
            self.store
                .save_descriptor(&item.id, &color)
                .map_err(Error::from)
        })?;
        Ok(color)
    }

    fn retrying<T, F>(&self, id: &str, mut op: F) -> Result<T, Error>
    where
        F: FnMut() -> Result<T, Error>,
    {
        let mut attempt = 0;
        loop {
            match op() {
                Err(e) if e.is_transient() && attempt < self.options.retries => {
                    attempt += 1;
                    warn!(
                        "{}: {}, retrying ({}/{})",
                        id, e, attempt, self.options.retries
                    );
                }
                outcome => return outcome,
            }
        }
    }
}

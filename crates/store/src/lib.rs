//! Persisted purchase store.
//!
//! The durable analogue of the original app's client-side storage: recorded
//! purchases live in a JSON array on disk, appended synchronously from the
//! caller's perspective.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use grosz_core::form::FinalizedPurchase;
use grosz_shared::{AppError, AppResult};

/// Error types for purchase store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store file could not be read or written.
    #[error("store file io: {0}")]
    Io(#[from] std::io::Error),

    /// The store file holds something other than a purchase array.
    #[error("store file corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Accepts finalized purchases and lists what has been recorded.
pub trait PurchaseStore {
    /// Appends one finalized purchase.
    fn append(&mut self, purchase: &FinalizedPurchase) -> AppResult<()>;

    /// Returns all recorded purchases, oldest first.
    fn all(&self) -> AppResult<Vec<FinalizedPurchase>>;
}

/// Purchase store backed by a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store over the given file path. The file is created on
    /// first append.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this store writes to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<FinalizedPurchase>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let body = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&body)?)
    }

    fn save(&self, purchases: &[FinalizedPurchase]) -> Result<(), StoreError> {
        let body = serde_json::to_string_pretty(purchases)?;
        // Write beside the store file and rename over it, so a crash
        // mid-write cannot lose previously recorded purchases.
        let staged = self.path.with_extension("json.tmp");
        fs::write(&staged, body)?;
        fs::rename(&staged, &self.path)?;
        Ok(())
    }
}

impl PurchaseStore for JsonFileStore {
    fn append(&mut self, purchase: &FinalizedPurchase) -> AppResult<()> {
        let mut purchases = self.load().map_err(AppError::from)?;
        purchases.push(purchase.clone());
        self.save(&purchases).map_err(AppError::from)?;
        info!(
            id = %purchase.id,
            currency = %purchase.currency,
            total = purchases.len(),
            "purchase recorded"
        );
        Ok(())
    }

    fn all(&self) -> AppResult<Vec<FinalizedPurchase>> {
        let purchases = self.load().map_err(AppError::from)?;
        debug!(total = purchases.len(), "purchases loaded");
        Ok(purchases)
    }
}

/// In-memory purchase store for tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    purchases: Vec<FinalizedPurchase>,
}

impl MemoryStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PurchaseStore for MemoryStore {
    fn append(&mut self, purchase: &FinalizedPurchase) -> AppResult<()> {
        self.purchases.push(purchase.clone());
        Ok(())
    }

    fn all(&self) -> AppResult<Vec<FinalizedPurchase>> {
        Ok(self.purchases.clone())
    }
}

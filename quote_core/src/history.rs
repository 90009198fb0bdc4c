//! # Quote History
//!
//! Saved quotes are frozen snapshots: once a breakdown is saved it is never
//! recomputed, even if the catalog prices change later.
//!
//! ## Structure
//!
//! ```text
//! QuoteHistory
//! ├── meta: HistoryMetadata (schema version, timestamps)
//! └── quotes: HashMap<Uuid, SavedQuote>
//!
//! QuoteStore
//! ├── history: QuoteHistory
//! └── subscribers: listeners notified with the newest-first list on change
//! ```
//!
//! ## Example
//!
//! ```rust
//! use quote_core::calculations::quote::{calculate, ProcessParameters};
//! use quote_core::geometry::Geometry;
//! use quote_core::history::{QuoteStore, SavedQuote};
//! use quote_core::materials::{MachineCatalog, MaterialCatalog};
//!
//! let geometry = Geometry::placeholder();
//! let params = ProcessParameters::default();
//! let breakdown = calculate(&geometry, &params, &MaterialCatalog::default(), &MachineCatalog::default()).unwrap();
//!
//! let mut store = QuoteStore::default();
//! let sub = store.subscribe(|quotes| println!("{} saved quotes", quotes.len()));
//! let id = store.add(SavedQuote::new("housing.STEP", geometry, params, breakdown, "ABS"));
//! assert_eq!(store.history().get(&id).unwrap().file_extension, "step");
//! store.unsubscribe(sub);
//! ```

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::calculations::quote::{CostBreakdown, ProcessParameters};
use crate::geometry::Geometry;

/// Current schema version for history files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// A saved quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedQuote {
    /// Original CAD file name as uploaded
    pub file_name: String,

    /// Lower-cased extension of `file_name`, empty if it has none
    pub file_extension: String,

    /// When the quote was saved
    pub created_at: DateTime<Utc>,

    /// Geometry the quote was priced on
    pub geometry: Geometry,

    /// Parameters the quote was priced with
    pub parameters: ProcessParameters,

    /// The breakdown exactly as shown when saved
    pub breakdown: CostBreakdown,

    /// Resolved material name (may differ from `parameters.material_id`
    /// when the requested material was unknown)
    pub material_name: String,
}

impl SavedQuote {
    /// Freeze a quote, stamping it with the current time.
    pub fn new(
        file_name: impl Into<String>,
        geometry: Geometry,
        parameters: ProcessParameters,
        breakdown: CostBreakdown,
        material_name: impl Into<String>,
    ) -> Self {
        let file_name = file_name.into();
        SavedQuote {
            file_extension: extension_of(&file_name),
            file_name,
            created_at: Utc::now(),
            geometry,
            parameters,
            breakdown,
            material_name: material_name.into(),
        }
    }

    /// Override the timestamp (used when importing older quotes).
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}

fn extension_of(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// History metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// When the history file was created
    pub created: DateTime<Utc>,

    /// When the history was last changed
    pub modified: DateTime<Utc>,
}

/// Root container for saved quotes.
///
/// Quotes are stored in a flat UUID-keyed map; display order is derived on
/// demand by [`QuoteHistory::list`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteHistory {
    pub meta: HistoryMetadata,
    pub quotes: HashMap<Uuid, SavedQuote>,
}

impl QuoteHistory {
    pub fn new() -> Self {
        let now = Utc::now();
        QuoteHistory {
            meta: HistoryMetadata {
                version: SCHEMA_VERSION.to_string(),
                created: now,
                modified: now,
            },
            quotes: HashMap::new(),
        }
    }

    /// Store a quote under a freshly assigned UUID.
    pub fn add(&mut self, quote: SavedQuote) -> Uuid {
        let id = Uuid::new_v4();
        self.quotes.insert(id, quote);
        self.touch();
        id
    }

    /// Remove a quote by UUID, returning it if it existed.
    pub fn remove(&mut self, id: &Uuid) -> Option<SavedQuote> {
        let quote = self.quotes.remove(id);
        if quote.is_some() {
            self.touch();
        }
        quote
    }

    pub fn get(&self, id: &Uuid) -> Option<&SavedQuote> {
        self.quotes.get(id)
    }

    /// All quotes, newest first. Ties on `created_at` are broken by id so the
    /// order is stable.
    pub fn list(&self) -> Vec<(&Uuid, &SavedQuote)> {
        let mut entries: Vec<_> = self.quotes.iter().collect();
        entries.sort_by(|(a_id, a), (b_id, b)| {
            b.created_at.cmp(&a.created_at).then_with(|| a_id.cmp(b_id))
        });
        entries
    }

    /// Resolve a full UUID or an unambiguous prefix of one, as typed by a user.
    pub fn find_by_prefix(&self, prefix: &str) -> Option<Uuid> {
        let prefix = prefix.trim().to_lowercase();
        if prefix.is_empty() {
            return None;
        }
        let mut matches = self
            .quotes
            .keys()
            .filter(|id| id.to_string().starts_with(&prefix));
        match (matches.next(), matches.next()) {
            (Some(id), None) => Some(*id),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }
}

impl Default for QuoteHistory {
    fn default() -> Self {
        QuoteHistory::new()
    }
}

/// Handle returned by [`QuoteStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&[(&Uuid, &SavedQuote)]) + Send>;

/// A [`QuoteHistory`] that tells subscribers whenever it changes.
///
/// Each subscriber receives the full newest-first list once on subscribe and
/// again after every add or remove. Subscribers stay registered until they
/// call [`QuoteStore::unsubscribe`].
pub struct QuoteStore {
    history: QuoteHistory,
    subscribers: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl QuoteStore {
    pub fn new(history: QuoteHistory) -> Self {
        QuoteStore {
            history,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Read access to the underlying history (e.g., for saving).
    pub fn history(&self) -> &QuoteHistory {
        &self.history
    }

    /// Give up the store, keeping the history. Subscribers are dropped.
    pub fn into_history(self) -> QuoteHistory {
        self.history
    }

    pub fn add(&mut self, quote: SavedQuote) -> Uuid {
        let id = self.history.add(quote);
        debug!(%id, "Saved quote");
        self.notify();
        id
    }

    pub fn remove(&mut self, id: &Uuid) -> Option<SavedQuote> {
        let removed = self.history.remove(id);
        if removed.is_some() {
            debug!(%id, "Deleted quote");
            self.notify();
        }
        removed
    }

    pub fn list(&self) -> Vec<(&Uuid, &SavedQuote)> {
        self.history.list()
    }

    /// Register a listener and immediately deliver the current list to it.
    pub fn subscribe<F>(&mut self, mut listener: F) -> SubscriptionId
    where
        F: FnMut(&[(&Uuid, &SavedQuote)]) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        listener(&self.history.list());
        self.subscribers.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn notify(&mut self) {
        let snapshot = self.history.list();
        for (_, listener) in self.subscribers.iter_mut() {
            listener(&snapshot);
        }
    }
}

impl Default for QuoteStore {
    fn default() -> Self {
        QuoteStore::new(QuoteHistory::new())
    }
}

impl std::fmt::Debug for QuoteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuoteStore")
            .field("history", &self.history)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

// Estatery - record stores, list queries and quick search for a real-estate dashboard

pub mod binding;
pub mod config;
pub mod csv;
pub mod draft;
pub mod error;
pub mod filter;
pub mod models;
pub mod pipeline;
pub mod quick_search;
pub mod record;
pub mod seed;
pub mod select;
pub mod selection;
pub mod settings;
pub mod storage;
pub mod store;
pub mod view;

// Re-export main types for convenience
pub use config::Config;
pub use error::{StorageError, UnknownVariant};
pub use filter::{Filter, FilterChoice};
pub use models::{Lead, Payment, Property};
pub use pipeline::{Pagination, VisibleSlice, compute_visible_slice};
pub use quick_search::{QuickSearchIndex, SearchOverlay, SearchResult};
pub use record::{IndexValue, Record, RecordId};
pub use storage::{KeyValueStorage, now_ms};
pub use store::RecordStore;
pub use view::{SortDirection, ViewState};

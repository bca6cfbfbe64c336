pub mod catalog;
pub mod clipboard;
pub mod config;
pub mod criteria;
pub mod error;
pub mod facet;
pub mod filter;
pub mod model;
pub mod session;
pub mod store;

pub use catalog::{Catalog, Collection};
pub use clipboard::{copy_text, ClipboardSink, WriterSink};
pub use crate::config::AppConfig;
pub use criteria::{FacetChoice, FilterCriteria, ALL};
pub use error::{Error, Result};
pub use facet::{FacetCache, Facets};
pub use filter::filter;
pub use model::{Command, Difficulty, Record, RecordKind, Scenario, Step};
pub use session::{BrowseSession, EmptyState};
pub use store::{RecordStore, StoreId};

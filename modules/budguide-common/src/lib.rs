pub mod catalog;
pub mod config;
pub mod error;
pub mod knowledge;
pub mod types;

pub use catalog::{Catalog, CatalogFile};
pub use config::Config;
pub use error::BudGuideError;
pub use knowledge::KnowledgeBase;
pub use types::*;

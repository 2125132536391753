pub mod config;
pub mod content;
mod error;
mod logger;
pub mod models;
pub mod seo;
pub mod store;

pub use error::{CmsError, Result};
pub use logger::init_logging;

pub use config::{load_config, save_config, Config};
pub use content::{
    article_body_html, blocks_for_editing, compile, decompile, render_sections, sections_for_save,
};
pub use models::{Article, ContentBlock, Product, Section, StoredSection};
pub use store::{BackendClient, BulkDeleteOutcome};

pub mod articles;
pub mod client;
pub mod newsletter;
pub mod products;
pub mod storage;

pub use articles::ArticleError;
pub use client::{BackendClient, ClientError};
pub use newsletter::{subscribe, NewsletterError, SubscribeOutcome, Subscriber};
pub use products::ProductError;
pub use storage::{
    object_path, upload_asset, validate_asset, AssetKind, StorageError, MAX_IMAGE_BYTES,
    MAX_VIDEO_BYTES,
};

use crate::error::CmsError;
use serde::Serialize;

/// Result of a best-effort bulk delete. Every id gets its own independent
/// delete request; there is no atomicity across the set.
#[derive(Debug, Clone, Serialize)]
pub struct BulkDeleteOutcome {
    pub requested: usize,
    pub failed: Vec<String>,
}

impl BulkDeleteOutcome {
    pub fn succeeded(&self) -> usize {
        self.requested - self.failed.len()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }

    /// User-facing "N of M succeeded" report
    pub fn summary(&self) -> String {
        format!("{} of {} succeeded", self.succeeded(), self.requested)
    }
}

// Convert ProductError to CmsError
impl From<ProductError> for CmsError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound => CmsError::NotFound("product".to_string()),
            other => CmsError::Backend(other.to_string()),
        }
    }
}

// Convert ArticleError to CmsError
impl From<ArticleError> for CmsError {
    fn from(err: ArticleError) -> Self {
        match err {
            ArticleError::NotFound => CmsError::NotFound("article".to_string()),
            ArticleError::Encode(message) => CmsError::Internal(message),
            other => CmsError::Backend(other.to_string()),
        }
    }
}

// Convert StorageError to CmsError
impl From<StorageError> for CmsError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::TooLarge { .. } | StorageError::UnsupportedType(_) => {
                CmsError::Validation(err.to_string())
            }
            other => CmsError::Backend(other.to_string()),
        }
    }
}

// Convert NewsletterError to CmsError
impl From<NewsletterError> for CmsError {
    fn from(err: NewsletterError) -> Self {
        match err {
            NewsletterError::InvalidEmail(_) => CmsError::Validation(err.to_string()),
            other => CmsError::Backend(other.to_string()),
        }
    }
}

// Convert the section wire-contract errors surfaced by article reads
impl From<crate::models::section::SectionDataError> for CmsError {
    fn from(err: crate::models::section::SectionDataError) -> Self {
        CmsError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bulk_outcome_summary() {
        let outcome = BulkDeleteOutcome {
            requested: 3,
            failed: vec!["b".to_string()],
        };
        assert_eq!(outcome.succeeded(), 2);
        assert!(!outcome.all_succeeded());
        assert_eq!(outcome.summary(), "2 of 3 succeeded");
    }

    #[test]
    fn test_error_taxonomy_mapping() {
        assert!(matches!(
            CmsError::from(ProductError::NotFound),
            CmsError::NotFound(_)
        ));
        assert!(matches!(
            CmsError::from(StorageError::UnsupportedType("gif".to_string())),
            CmsError::Validation(_)
        ));
        assert!(matches!(
            CmsError::from(NewsletterError::InvalidEmail("x".to_string())),
            CmsError::Validation(_)
        ));
    }
}

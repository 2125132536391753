use crate::models::section::{parse_sections_value, Section, SectionDataError, StoredSection};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A news post as persisted by the backing store.
///
/// The `sections` column holds the article body as a JSON-encoded string (or,
/// for rows written by older tooling, a structured array). It is kept raw here
/// and decoded on demand so that one malformed row degrades at the point of
/// use instead of failing the whole row decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub sections: Option<Value>,
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    /// Decodes and validates the stored sections.
    pub fn stored_sections(&self) -> Result<Vec<StoredSection>, SectionDataError> {
        match &self.sections {
            None => Ok(Vec::new()),
            Some(value) => parse_sections_value(value),
        }
    }

    /// Decodes the stored sections into their runtime form, for the editor
    /// reopen path.
    pub fn parsed_sections(&self) -> Result<Vec<Section>, SectionDataError> {
        self.stored_sections()?
            .iter()
            .map(Section::from_stored)
            .collect()
    }
}

/// An article to be created; identity, slug uniqueness, and timestamps are
/// enforced server-side
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewArticle {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<StoredSection>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    pub slug: String,
}

/// Partial update; only set fields are serialized into the PATCH body
#[derive(Debug, Clone, Default, Serialize)]
pub struct ArticlePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<StoredSection>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn article_with_sections(sections: Option<Value>) -> Article {
        let at = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        Article {
            id: "a1".to_string(),
            title: "Title".to_string(),
            sections,
            meta_title: None,
            meta_description: None,
            slug: "title".to_string(),
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn test_missing_sections_decode_to_empty() {
        let article = article_with_sections(None);
        assert!(article.stored_sections().unwrap().is_empty());

        let article = article_with_sections(Some(Value::Null));
        assert!(article.stored_sections().unwrap().is_empty());
    }

    #[test]
    fn test_string_encoded_sections_decode() {
        let stored = vec![Section::new("s1").to_stored()];
        let raw = serde_json::to_string(&stored).unwrap();
        let article = article_with_sections(Some(Value::String(raw)));
        assert_eq!(article.stored_sections().unwrap(), stored);
    }

    #[test]
    fn test_malformed_sections_surface_as_error() {
        let article = article_with_sections(Some(Value::String("{broken".to_string())));
        assert!(article.stored_sections().is_err());
    }
}

use crate::models::block::{Alignment, ButtonStyle, HeadingLevel, TextStyling, VideoSource};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Current version of the stored section contract. Rows written before the
/// contract was versioned carry no `schema` field and decode as version 1.
pub const SECTION_SCHEMA_VERSION: u32 = 1;

/// Separator used when folding paragraph records into the stored `bodyText`
/// string, and when re-splitting it on read.
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

#[derive(Error, Debug)]
pub enum SectionDataError {
    #[error("sections column is neither JSON text nor an array")]
    UnexpectedShape,

    #[error("failed to decode sections: {0}")]
    Decode(String),

    #[error("unsupported section schema version {0}")]
    UnsupportedSchema(u32),

    #[error("section {id}: images/imageMeta length mismatch ({images} vs {meta})")]
    ImageMetaMismatch {
        id: String,
        images: usize,
        meta: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionHeading {
    pub text: String,
    pub level: HeadingLevel,
    pub alignment: Alignment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styling: Option<TextStyling>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionParagraph {
    pub text: String,
    pub alignment: Alignment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styling: Option<TextStyling>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionImage {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    pub alignment: Alignment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionVideo {
    pub url: String,
    pub source_type: VideoSource,
    pub alignment: Alignment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionButton {
    pub label: String,
    pub url: String,
    pub visual_style: ButtonStyle,
    pub alignment: Alignment,
}

/// Runtime form of a section: the grouping of blocks between two heading
/// boundaries. Paragraphs and images are sequences of self-contained records
/// rather than the stored form's parallel arrays, so nothing here can go
/// out of index-sync.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub heading: Option<SectionHeading>,
    pub paragraphs: Vec<SectionParagraph>,
    pub images: Vec<SectionImage>,
    pub video: Option<SectionVideo>,
    pub buttons: Vec<SectionButton>,
}

impl Section {
    pub fn new(id: impl Into<String>) -> Self {
        Section {
            id: id.into(),
            ..Default::default()
        }
    }

    /// A section that accumulated nothing is discarded silently, never
    /// persisted. Paragraph records with empty text do not count: the stored
    /// form cannot represent them as content.
    pub fn is_empty(&self) -> bool {
        self.heading.is_none()
            && !self.paragraphs.iter().any(|p| !p.text.is_empty())
            && self.images.is_empty()
            && self.video.is_none()
            && self.buttons.is_empty()
    }

    /// Folds the runtime form into the stored wire contract.
    ///
    /// Paragraph texts are joined into `bodyText` with the double-newline
    /// separator; one alignment and one styling entry is recorded per
    /// paragraph record, in fold order, independently of how the joined text
    /// later re-splits.
    pub fn to_stored(&self) -> StoredSection {
        let mut body_text = String::new();
        let mut paragraph_alignments = Vec::with_capacity(self.paragraphs.len());
        let mut paragraph_styling = Vec::with_capacity(self.paragraphs.len());

        for paragraph in &self.paragraphs {
            if !body_text.is_empty() {
                body_text.push_str(PARAGRAPH_SEPARATOR);
            }
            body_text.push_str(&paragraph.text);
            paragraph_alignments.push(paragraph.alignment);
            paragraph_styling.push(paragraph.styling.clone().unwrap_or_default());
        }

        let (images, image_meta) = self
            .images
            .iter()
            .map(|image| {
                (
                    image.url.clone(),
                    StoredImageMeta {
                        alt_text: image.alt_text.clone(),
                        caption: image.caption.clone(),
                        alignment: image.alignment,
                    },
                )
            })
            .unzip();

        StoredSection {
            schema: SECTION_SCHEMA_VERSION,
            id: self.id.clone(),
            heading: self.heading.clone().map(|h| StoredHeading {
                text: h.text,
                level: h.level,
                alignment: h.alignment,
                styling: h.styling.unwrap_or_default(),
            }),
            body_text,
            paragraph_alignments,
            paragraph_styling,
            images,
            image_meta,
            video: self.video.clone().map(|v| StoredVideo {
                url: v.url,
                source_type: v.source_type,
                alignment: v.alignment,
            }),
            buttons: self
                .buttons
                .iter()
                .map(|b| StoredButton {
                    label: b.label.clone(),
                    url: b.url.clone(),
                    visual_style: b.visual_style,
                    alignment: b.alignment,
                })
                .collect(),
        }
    }

    /// Expands a stored section back into the runtime form, validating the
    /// wire contract on the way in.
    ///
    /// `bodyText` is re-split on the double-newline separator and zipped
    /// positionally against the recorded alignments and styling; out-of-range
    /// indices default to left alignment and no styling (re-splitting can
    /// legitimately yield more segments than were folded, see the compiler's
    /// documented non-goal). An images/imageMeta length mismatch is a hard
    /// contract violation.
    pub fn from_stored(stored: &StoredSection) -> Result<Section, SectionDataError> {
        if stored.schema > SECTION_SCHEMA_VERSION {
            return Err(SectionDataError::UnsupportedSchema(stored.schema));
        }
        if stored.images.len() != stored.image_meta.len() {
            return Err(SectionDataError::ImageMetaMismatch {
                id: stored.id.clone(),
                images: stored.images.len(),
                meta: stored.image_meta.len(),
            });
        }

        let paragraphs = if stored.body_text.is_empty() {
            Vec::new()
        } else {
            stored
                .body_text
                .split(PARAGRAPH_SEPARATOR)
                .enumerate()
                .map(|(i, text)| SectionParagraph {
                    text: text.to_string(),
                    alignment: stored
                        .paragraph_alignments
                        .get(i)
                        .copied()
                        .unwrap_or_default(),
                    styling: stored
                        .paragraph_styling
                        .get(i)
                        .filter(|s| !s.is_empty())
                        .cloned(),
                })
                .collect()
        };

        let images = stored
            .images
            .iter()
            .zip(stored.image_meta.iter())
            .map(|(url, meta)| SectionImage {
                url: url.clone(),
                alt_text: meta.alt_text.clone(),
                caption: meta.caption.clone(),
                alignment: meta.alignment,
            })
            .collect();

        Ok(Section {
            id: stored.id.clone(),
            heading: stored.heading.clone().map(|h| SectionHeading {
                text: h.text,
                level: h.level,
                alignment: h.alignment,
                styling: if h.styling.is_empty() {
                    None
                } else {
                    Some(h.styling)
                },
            }),
            paragraphs,
            images,
            video: stored.video.clone().map(|v| SectionVideo {
                url: v.url,
                source_type: v.source_type,
                alignment: v.alignment,
            }),
            buttons: stored
                .buttons
                .iter()
                .map(|b| SectionButton {
                    label: b.label.clone(),
                    url: b.url.clone(),
                    visual_style: b.visual_style,
                    alignment: b.alignment,
                })
                .collect(),
        })
    }
}

fn default_schema() -> u32 {
    SECTION_SCHEMA_VERSION
}

/// Persisted, storage-facing shape of a section (wire contract v1).
///
/// This is the legacy camelCase shape the backing store holds in the
/// `sections` column: paragraph text folded into one `bodyText` string with
/// index-parallel alignment/styling arrays, and `images`/`imageMeta` as
/// parallel arrays with the same index correspondence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSection {
    #[serde(default = "default_schema")]
    pub schema: u32,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<StoredHeading>,
    #[serde(default)]
    pub body_text: String,
    #[serde(default)]
    pub paragraph_alignments: Vec<Alignment>,
    #[serde(default)]
    pub paragraph_styling: Vec<TextStyling>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub image_meta: Vec<StoredImageMeta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<StoredVideo>,
    #[serde(default)]
    pub buttons: Vec<StoredButton>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredHeading {
    pub text: String,
    pub level: HeadingLevel,
    #[serde(default)]
    pub alignment: Alignment,
    #[serde(default)]
    pub styling: TextStyling,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredImageMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default)]
    pub alignment: Alignment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredVideo {
    pub url: String,
    pub source_type: VideoSource,
    #[serde(default)]
    pub alignment: Alignment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredButton {
    pub label: String,
    pub url: String,
    #[serde(default)]
    pub visual_style: ButtonStyle,
    #[serde(default)]
    pub alignment: Alignment,
}

/// Decodes the raw `sections` column value into stored sections.
///
/// The column normally holds a JSON-encoded string, but reads are tolerant of
/// already-structured input (an array) and of null/empty. Anything else is a
/// contract violation.
pub fn parse_sections_value(value: &Value) -> Result<Vec<StoredSection>, SectionDataError> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::String(text) => {
            if text.trim().is_empty() {
                return Ok(Vec::new());
            }
            serde_json::from_str(text).map_err(|e| SectionDataError::Decode(e.to_string()))
        }
        Value::Array(_) => serde_json::from_value(value.clone())
            .map_err(|e| SectionDataError::Decode(e.to_string())),
        _ => Err(SectionDataError::UnexpectedShape),
    }
}

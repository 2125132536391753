use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Horizontal alignment of a block within the article column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
}

impl HeadingLevel {
    /// Tag name for the display markup ("h1".."h4")
    pub fn tag(&self) -> &'static str {
        match self {
            HeadingLevel::H1 => "h1",
            HeadingLevel::H2 => "h2",
            HeadingLevel::H3 => "h3",
            HeadingLevel::H4 => "h4",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VideoSource {
    #[serde(rename = "upload")]
    Upload,
    #[serde(rename = "external-url")]
    ExternalUrl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
    #[default]
    Primary,
    Secondary,
    Outline,
    Link,
}

/// Optional text styling, applicable to heading and paragraph blocks only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TextStyling {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl TextStyling {
    pub fn is_empty(&self) -> bool {
        self.font_family.is_none() && self.font_size.is_none() && self.color.is_none()
    }
}

/// Kind-specific payload of a content block.
///
/// Closed sum type: the editor cannot grow new kinds at runtime, and both the
/// compiler and decompiler match it exhaustively, so adding a kind is a
/// compile-time-checked change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BlockPayload {
    Heading {
        text: String,
        level: HeadingLevel,
    },
    Paragraph {
        text: String,
    },
    Image {
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alt_text: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
    },
    Video {
        url: String,
        source_type: VideoSource,
    },
    Button {
        label: String,
        url: String,
        visual_style: ButtonStyle,
    },
}

/// One editable unit of authored content.
///
/// Blocks live only in editor memory for the duration of an authoring session;
/// the persisted form is the section list produced by the compiler. The id is
/// assigned at creation and survives edits and reordering (it keys the sortable
/// list and namespaces derived section-element ids).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    pub id: String,
    #[serde(default)]
    pub alignment: Alignment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styling: Option<TextStyling>,
    #[serde(flatten)]
    pub payload: BlockPayload,
}

impl ContentBlock {
    /// Creates a block with a fresh UUID id and default alignment
    pub fn new(payload: BlockPayload) -> Self {
        ContentBlock {
            id: Uuid::new_v4().to_string(),
            alignment: Alignment::default(),
            styling: None,
            payload,
        }
    }

    /// Creates a block with an explicit id, used by the decompiler to derive
    /// stable ids from section ids
    pub fn with_id(id: String, payload: BlockPayload) -> Self {
        ContentBlock {
            id,
            alignment: Alignment::default(),
            styling: None,
            payload,
        }
    }

    pub fn heading(text: impl Into<String>, level: HeadingLevel) -> Self {
        ContentBlock::new(BlockPayload::Heading {
            text: text.into(),
            level,
        })
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        ContentBlock::new(BlockPayload::Paragraph { text: text.into() })
    }

    pub fn image(url: impl Into<String>) -> Self {
        ContentBlock::new(BlockPayload::Image {
            url: url.into(),
            alt_text: None,
            caption: None,
        })
    }

    pub fn video(url: impl Into<String>, source_type: VideoSource) -> Self {
        ContentBlock::new(BlockPayload::Video {
            url: url.into(),
            source_type,
        })
    }

    pub fn button(label: impl Into<String>, url: impl Into<String>) -> Self {
        ContentBlock::new(BlockPayload::Button {
            label: label.into(),
            url: url.into(),
            visual_style: ButtonStyle::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_serializes_with_kind_tag() {
        let block = ContentBlock::heading("Intro", HeadingLevel::H2);
        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(value["kind"], "heading");
        assert_eq!(value["text"], "Intro");
        assert_eq!(value["level"], "h2");
        assert_eq!(value["alignment"], "left");
    }

    #[test]
    fn test_video_source_wire_names() {
        let block = ContentBlock::video("https://example.com/v.mp4", VideoSource::ExternalUrl);
        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(value["source_type"], "external-url");
    }

    #[test]
    fn test_block_round_trips_through_json() {
        let mut block = ContentBlock::paragraph("Hello");
        block.alignment = Alignment::Center;
        block.styling = Some(TextStyling {
            color: Some("#333".to_string()),
            ..Default::default()
        });
        let json = serde_json::to_string(&block).unwrap();
        let back: ContentBlock = serde_json::from_str(&json).unwrap();
        assert_eq!(back, block);
    }

    #[test]
    fn test_new_blocks_get_unique_ids() {
        let a = ContentBlock::paragraph("a");
        let b = ContentBlock::paragraph("b");
        assert_ne!(a.id, b.id);
    }
}

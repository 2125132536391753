use crate::models::article::Article;
use crate::models::block::{Alignment, ButtonStyle, TextStyling, VideoSource};
use crate::models::section::Section;
use tracing::warn;

/// One-way interpretation of sections into display markup for the article
/// page. The reader path renders straight from the stored form and never
/// reconstructs editable blocks.
pub fn render_sections(sections: &[Section]) -> String {
    let mut html = String::new();

    for section in sections {
        html.push_str("<section>");

        if let Some(heading) = &section.heading {
            let tag = heading.level.tag();
            html.push_str(&format!(
                "<{tag}{}>{}</{tag}>",
                style_attr(heading.alignment, heading.styling.as_ref()),
                escape(&heading.text)
            ));
        }

        for paragraph in &section.paragraphs {
            html.push_str(&format!(
                "<p{}>{}</p>",
                style_attr(paragraph.alignment, paragraph.styling.as_ref()),
                escape(&paragraph.text)
            ));
        }

        for image in &section.images {
            html.push_str(&format!(
                "<figure{}><img src=\"{}\" alt=\"{}\">",
                style_attr(image.alignment, None),
                escape_attr(&image.url),
                escape_attr(image.alt_text.as_deref().unwrap_or(""))
            ));
            if let Some(caption) = &image.caption {
                html.push_str(&format!("<figcaption>{}</figcaption>", escape(caption)));
            }
            html.push_str("</figure>");
        }

        if let Some(video) = &section.video {
            match video.source_type {
                VideoSource::Upload => html.push_str(&format!(
                    "<video controls src=\"{}\"{}></video>",
                    escape_attr(&video.url),
                    style_attr(video.alignment, None)
                )),
                VideoSource::ExternalUrl => html.push_str(&format!(
                    "<iframe src=\"{}\"{} allowfullscreen></iframe>",
                    escape_attr(&video.url),
                    style_attr(video.alignment, None)
                )),
            }
        }

        for button in &section.buttons {
            html.push_str(&format!(
                "<a class=\"btn {}\" href=\"{}\"{}>{}</a>",
                button_class(button.visual_style),
                escape_attr(&button.url),
                style_attr(button.alignment, None),
                escape(&button.label)
            ));
        }

        html.push_str("</section>");
    }

    html
}

/// Renders an article's stored body for the reader page.
///
/// A malformed `sections` column degrades to an empty body rather than
/// failing the page; the parse error is logged so the back-office can find
/// the broken row.
pub fn article_body_html(article: &Article) -> String {
    match article.parsed_sections() {
        Ok(sections) => render_sections(&sections),
        Err(err) => {
            warn!("Article {} has malformed sections, rendering empty body: {}", article.id, err);
            String::new()
        }
    }
}

fn escape(text: &str) -> String {
    html_escape::encode_text(text).into_owned()
}

fn escape_attr(text: &str) -> String {
    html_escape::encode_double_quoted_attribute(text).into_owned()
}

fn button_class(style: ButtonStyle) -> &'static str {
    match style {
        ButtonStyle::Primary => "btn-primary",
        ButtonStyle::Secondary => "btn-secondary",
        ButtonStyle::Outline => "btn-outline",
        ButtonStyle::Link => "btn-link",
    }
}

/// Inline style attribute for alignment and text styling; empty for the
/// defaults so unstyled content renders bare tags.
fn style_attr(alignment: Alignment, styling: Option<&TextStyling>) -> String {
    let mut rules = Vec::new();
    match alignment {
        Alignment::Left => {}
        Alignment::Center => rules.push("text-align:center".to_string()),
        Alignment::Right => rules.push("text-align:right".to_string()),
    }
    if let Some(styling) = styling {
        if let Some(family) = &styling.font_family {
            rules.push(format!("font-family:{}", family));
        }
        if let Some(size) = &styling.font_size {
            rules.push(format!("font-size:{}", size));
        }
        if let Some(color) = &styling.color {
            rules.push(format!("color:{}", color));
        }
    }
    if rules.is_empty() {
        String::new()
    } else {
        format!(" style=\"{}\"", escape_attr(&rules.join(";")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::compile::compile;
    use crate::models::block::{ContentBlock, HeadingLevel};
    use chrono::{TimeZone, Utc};
    use serde_json::Value;

    #[test]
    fn test_heading_renders_with_its_level_tag() {
        let sections = compile(&[ContentBlock::heading("Intro", HeadingLevel::H3)]).unwrap();
        let html = render_sections(&sections);
        assert!(html.contains("<h3>Intro</h3>"));
    }

    #[test]
    fn test_text_is_escaped() {
        let sections = compile(&[ContentBlock::paragraph("<script>alert(1)</script>")]).unwrap();
        let html = render_sections(&sections);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_image_renders_figure_with_caption() {
        let mut image = ContentBlock::image("https://cdn.example.com/a.png");
        if let crate::models::block::BlockPayload::Image { caption, .. } = &mut image.payload {
            *caption = Some("A caption".to_string());
        }
        let sections = compile(&[image]).unwrap();
        let html = render_sections(&sections);
        assert!(html.contains("<img src=\"https://cdn.example.com/a.png\""));
        assert!(html.contains("<figcaption>A caption</figcaption>"));
    }

    #[test]
    fn test_centered_paragraph_gets_style_attr() {
        let mut paragraph = ContentBlock::paragraph("P");
        paragraph.alignment = Alignment::Center;
        let sections = compile(&[paragraph]).unwrap();
        let html = render_sections(&sections);
        assert!(html.contains("style=\"text-align:center\""));
    }

    #[test]
    fn test_external_video_renders_iframe_and_upload_renders_video() {
        let sections = compile(&[ContentBlock::video(
            "https://youtube.com/embed/x",
            VideoSource::ExternalUrl,
        )])
        .unwrap();
        assert!(render_sections(&sections).contains("<iframe"));

        let sections =
            compile(&[ContentBlock::video("/assets/v.mp4", VideoSource::Upload)]).unwrap();
        assert!(render_sections(&sections).contains("<video controls"));
    }

    #[test]
    fn test_malformed_article_body_renders_empty() {
        let at = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let article = Article {
            id: "a1".to_string(),
            title: "T".to_string(),
            sections: Some(Value::String("{broken".to_string())),
            meta_title: None,
            meta_description: None,
            slug: "t".to_string(),
            created_at: at,
            updated_at: at,
        };
        assert_eq!(article_body_html(&article), "");
    }
}

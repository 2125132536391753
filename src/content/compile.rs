use crate::models::block::{BlockPayload, ButtonStyle, ContentBlock, HeadingLevel, VideoSource};
use crate::models::section::{
    Section, SectionButton, SectionHeading, SectionImage, SectionParagraph, SectionVideo,
};

/// Folds an ordered block list into the section list that gets persisted.
///
/// Single left-to-right pass over the blocks with one open section at a time.
/// Every heading closes the open section (if it accumulated anything) and
/// starts a new one; body blocks before the first heading open an anonymous
/// section. Returns `None` when nothing worth persisting was produced, which
/// callers treat as an explicit "no content" signal distinct from an empty
/// article body.
pub fn compile(blocks: &[ContentBlock]) -> Option<Vec<Section>> {
    let mut output: Vec<Section> = Vec::new();
    let mut current: Option<Section> = None;

    for block in blocks {
        match &block.payload {
            BlockPayload::Heading { text, level } => {
                close_section(&mut output, current.take());
                current = Some(begin_heading_section(block, text, *level));
            }
            BlockPayload::Paragraph { text } => {
                push_paragraph(open_section(&mut current, &output), block, text);
            }
            BlockPayload::Image {
                url,
                alt_text,
                caption,
            } => {
                push_image(
                    open_section(&mut current, &output),
                    block,
                    url,
                    alt_text,
                    caption,
                );
            }
            BlockPayload::Video { url, source_type } => {
                set_video(open_section(&mut current, &output), block, url, *source_type);
            }
            BlockPayload::Button {
                label,
                url,
                visual_style,
            } => {
                push_button(
                    open_section(&mut current, &output),
                    block,
                    label,
                    url,
                    *visual_style,
                );
            }
        }
    }
    close_section(&mut output, current);

    if output.is_empty() {
        None
    } else {
        Some(output)
    }
}

/// A section that accumulated nothing is dropped silently.
fn close_section(output: &mut Vec<Section>, current: Option<Section>) {
    if let Some(section) = current {
        if !section.is_empty() {
            output.push(section);
        }
    }
}

/// A heading-started section takes the heading block's id, so element ids
/// derived from the section stay namespaced by the block that created it.
fn begin_heading_section(block: &ContentBlock, text: &str, level: HeadingLevel) -> Section {
    Section {
        heading: Some(SectionHeading {
            text: text.to_string(),
            level,
            alignment: block.alignment,
            styling: block.styling.clone(),
        }),
        ..Section::new(block.id.clone())
    }
}

/// Returns the open section, opening an anonymous one when a body block
/// arrives before any heading. The synthesized id is positional, keeping the
/// whole fold deterministic.
fn open_section<'a>(current: &'a mut Option<Section>, output: &[Section]) -> &'a mut Section {
    current.get_or_insert_with(|| Section::new(format!("section-{}", output.len() + 1)))
}

/// One paragraph record per paragraph block, even when the text is empty: the
/// alignment/styling bookkeeping is per block, not per text segment.
fn push_paragraph(section: &mut Section, block: &ContentBlock, text: &str) {
    section.paragraphs.push(SectionParagraph {
        text: text.to_string(),
        alignment: block.alignment,
        styling: block.styling.clone(),
    });
}

/// Images without a URL are skipped outright so the stored images/imageMeta
/// arrays keep their index correspondence.
fn push_image(
    section: &mut Section,
    block: &ContentBlock,
    url: &str,
    alt_text: &Option<String>,
    caption: &Option<String>,
) {
    if url.is_empty() {
        return;
    }
    section.images.push(SectionImage {
        url: url.to_string(),
        alt_text: alt_text.clone(),
        caption: caption.clone(),
        alignment: block.alignment,
    });
}

/// At most one video per section; a later video block overwrites an earlier
/// one.
fn set_video(section: &mut Section, block: &ContentBlock, url: &str, source_type: VideoSource) {
    section.video = Some(SectionVideo {
        url: url.to_string(),
        source_type,
        alignment: block.alignment,
    });
}

/// Buttons need both a label and a target to be worth persisting.
fn push_button(
    section: &mut Section,
    block: &ContentBlock,
    label: &str,
    url: &str,
    visual_style: ButtonStyle,
) {
    if label.is_empty() || url.is_empty() {
        return;
    }
    section.buttons.push(SectionButton {
        label: label.to_string(),
        url: url.to_string(),
        visual_style,
        alignment: block.alignment,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::block::Alignment;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_input_compiles_to_none() {
        assert_eq!(compile(&[]), None);
    }

    #[test]
    fn test_all_empty_blocks_compile_to_none() {
        let blocks = vec![
            ContentBlock::paragraph(""),
            ContentBlock::image(""),
            ContentBlock::button("", ""),
            ContentBlock::button("Buy", ""),
        ];
        assert_eq!(compile(&blocks), None);
    }

    #[test]
    fn test_heading_paragraphs_image_fold_into_one_section() {
        let blocks = vec![
            ContentBlock::heading("Intro", HeadingLevel::H2),
            ContentBlock::paragraph("A"),
            ContentBlock::paragraph("B"),
            ContentBlock::image("u1"),
        ];
        let sections = compile(&blocks).unwrap();
        assert_eq!(sections.len(), 1);

        let section = &sections[0];
        assert_eq!(section.id, blocks[0].id);
        assert_eq!(section.heading.as_ref().unwrap().text, "Intro");
        assert_eq!(section.paragraphs.len(), 2);
        assert_eq!(section.images.len(), 1);

        let stored = section.to_stored();
        assert_eq!(stored.body_text, "A\n\nB");
        assert_eq!(
            stored.paragraph_alignments,
            vec![Alignment::Left, Alignment::Left]
        );
        assert_eq!(stored.images, vec!["u1".to_string()]);
        assert_eq!(stored.image_meta[0].alignment, Alignment::Left);
    }

    #[test]
    fn test_content_before_heading_opens_anonymous_section() {
        let blocks = vec![
            ContentBlock::paragraph("X"),
            ContentBlock::heading("H", HeadingLevel::H2),
            ContentBlock::paragraph("Y"),
        ];
        let sections = compile(&blocks).unwrap();
        assert_eq!(sections.len(), 2);

        assert_eq!(sections[0].heading, None);
        assert_eq!(sections[0].id, "section-1");
        assert_eq!(sections[0].to_stored().body_text, "X");

        assert_eq!(sections[1].heading.as_ref().unwrap().text, "H");
        assert_eq!(sections[1].to_stored().body_text, "Y");
    }

    #[test]
    fn test_every_heading_starts_its_own_section() {
        let blocks = vec![
            ContentBlock::heading("First", HeadingLevel::H2),
            ContentBlock::heading("Second", HeadingLevel::H3),
        ];
        let sections = compile(&blocks).unwrap();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].heading.as_ref().unwrap().text, "First");
        assert!(sections[0].paragraphs.is_empty());
        assert_eq!(sections[1].heading.as_ref().unwrap().text, "Second");
    }

    #[test]
    fn test_lone_button_compiles_to_one_section() {
        let blocks = vec![ContentBlock::button("Buy", "http://x")];
        let sections = compile(&blocks).unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].heading, None);
        assert!(sections[0].paragraphs.is_empty());
        assert!(sections[0].images.is_empty());
        assert_eq!(sections[0].video, None);
        assert_eq!(sections[0].buttons.len(), 1);
        assert_eq!(sections[0].buttons[0].label, "Buy");
    }

    #[test]
    fn test_empty_image_url_does_not_perturb_meta_indexing() {
        let mut second = ContentBlock::image("u2");
        if let BlockPayload::Image { alt_text, .. } = &mut second.payload {
            *alt_text = Some("second".to_string());
        }
        let blocks = vec![
            ContentBlock::image("u1"),
            ContentBlock::image(""),
            second,
        ];
        let stored = compile(&blocks).unwrap()[0].to_stored();
        assert_eq!(stored.images, vec!["u1".to_string(), "u2".to_string()]);
        assert_eq!(stored.image_meta.len(), 2);
        assert_eq!(stored.image_meta[1].alt_text.as_deref(), Some("second"));
    }

    #[test]
    fn test_later_video_overwrites_earlier_in_same_section() {
        let blocks = vec![
            ContentBlock::video("v1", VideoSource::Upload),
            ContentBlock::video("v2", VideoSource::ExternalUrl),
        ];
        let sections = compile(&blocks).unwrap();
        assert_eq!(sections.len(), 1);
        let video = sections[0].video.as_ref().unwrap();
        assert_eq!(video.url, "v2");
        assert_eq!(video.source_type, VideoSource::ExternalUrl);
    }

    #[test]
    fn test_block_alignment_and_styling_carry_into_records() {
        let mut heading = ContentBlock::heading("H", HeadingLevel::H1);
        heading.alignment = Alignment::Center;
        let mut paragraph = ContentBlock::paragraph("P");
        paragraph.alignment = Alignment::Right;

        let sections = compile(&[heading, paragraph]).unwrap();
        assert_eq!(
            sections[0].heading.as_ref().unwrap().alignment,
            Alignment::Center
        );
        assert_eq!(sections[0].paragraphs[0].alignment, Alignment::Right);
    }
}

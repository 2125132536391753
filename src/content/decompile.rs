use crate::models::block::{BlockPayload, ContentBlock};
use crate::models::section::Section;

/// Expands stored sections back into an editable block list, for the editor
/// reopen path.
///
/// Per section the emission order is fixed: heading, paragraphs, images,
/// video, buttons. The original interleaving across kinds inside a section is
/// not recorded by the stored form and is not reconstructed.
///
/// Block ids are derived from the section id plus a role suffix, so
/// decompiling the same stored data twice yields identical ids and the
/// sortable editor list stays stable within a session.
pub fn decompile(sections: &[Section]) -> Vec<ContentBlock> {
    let mut blocks = Vec::new();

    for section in sections {
        if let Some(heading) = &section.heading {
            let mut block = ContentBlock::with_id(
                format!("{}-heading", section.id),
                BlockPayload::Heading {
                    text: heading.text.clone(),
                    level: heading.level,
                },
            );
            block.alignment = heading.alignment;
            block.styling = heading.styling.clone();
            blocks.push(block);
        }

        for (i, paragraph) in section.paragraphs.iter().enumerate() {
            let mut block = ContentBlock::with_id(
                format!("{}-paragraph-{}", section.id, i),
                BlockPayload::Paragraph {
                    text: paragraph.text.clone(),
                },
            );
            block.alignment = paragraph.alignment;
            block.styling = paragraph.styling.clone();
            blocks.push(block);
        }

        for (i, image) in section.images.iter().enumerate() {
            let mut block = ContentBlock::with_id(
                format!("{}-image-{}", section.id, i),
                BlockPayload::Image {
                    url: image.url.clone(),
                    alt_text: image.alt_text.clone(),
                    caption: image.caption.clone(),
                },
            );
            block.alignment = image.alignment;
            blocks.push(block);
        }

        if let Some(video) = &section.video {
            let mut block = ContentBlock::with_id(
                format!("{}-video", section.id),
                BlockPayload::Video {
                    url: video.url.clone(),
                    source_type: video.source_type,
                },
            );
            block.alignment = video.alignment;
            blocks.push(block);
        }

        for (i, button) in section.buttons.iter().enumerate() {
            let mut block = ContentBlock::with_id(
                format!("{}-button-{}", section.id, i),
                BlockPayload::Button {
                    label: button.label.clone(),
                    url: button.url.clone(),
                    visual_style: button.visual_style,
                },
            );
            block.alignment = button.alignment;
            blocks.push(block);
        }
    }

    blocks
}

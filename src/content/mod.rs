pub mod compile;
pub mod decompile;
pub mod render;

pub use compile::compile;
pub use decompile::decompile;
pub use render::{article_body_html, render_sections};

use crate::models::block::ContentBlock;
use crate::models::section::{Section, SectionDataError, StoredSection};

/// Editor save path: folds the authored block list into the stored wire form.
/// `None` means "no content" and is persisted as a null column, not as `[]`.
pub fn sections_for_save(blocks: &[ContentBlock]) -> Option<Vec<StoredSection>> {
    compile(blocks).map(|sections| sections.iter().map(Section::to_stored).collect())
}

/// Editor reopen path: validates stored sections and expands them back into
/// editable blocks.
pub fn blocks_for_editing(
    stored: &[StoredSection],
) -> Result<Vec<ContentBlock>, SectionDataError> {
    let sections = stored
        .iter()
        .map(Section::from_stored)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(decompile(&sections))
}

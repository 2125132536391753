pub mod article;
pub mod block;
pub mod product;
pub mod section;

pub use article::{Article, ArticlePatch, NewArticle};
pub use block::{
    Alignment, BlockPayload, ButtonStyle, ContentBlock, HeadingLevel, TextStyling, VideoSource,
};
pub use product::{NewProduct, Product, ProductPatch, StockStatus};
pub use section::{
    parse_sections_value, Section, SectionButton, SectionDataError, SectionHeading, SectionImage,
    SectionParagraph, SectionVideo, StoredSection, SECTION_SCHEMA_VERSION,
};

pub mod sitemap;

pub use sitemap::build_sitemap;

use regex::Regex;
use std::sync::OnceLock;

/// Maximum meta-description length most result pages will display.
const META_DESCRIPTION_MAX: usize = 160;

/// Turns a title into a URL slug: lowercased, non-alphanumeric runs collapsed
/// to single dashes, no leading/trailing dash.
pub fn slugify(title: &str) -> String {
    static NON_ALNUM: OnceLock<Regex> = OnceLock::new();
    let re = NON_ALNUM.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("valid slug pattern"));

    re.replace_all(&title.to_lowercase(), "-")
        .trim_matches('-')
        .to_string()
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetaTags {
    pub title: String,
    pub description: String,
}

/// Derives the page meta tags, preferring the authored overrides and falling
/// back to the display title and body description. The description is clamped
/// to what result pages will show, cut on a char boundary with an ellipsis.
pub fn page_meta(
    meta_title: Option<&str>,
    meta_description: Option<&str>,
    title: &str,
    description: &str,
) -> MetaTags {
    let title = meta_title.filter(|t| !t.is_empty()).unwrap_or(title);
    let description = meta_description
        .filter(|d| !d.is_empty())
        .unwrap_or(description);

    MetaTags {
        title: title.to_string(),
        description: clamp_description(description),
    }
}

fn clamp_description(description: &str) -> String {
    if description.chars().count() <= META_DESCRIPTION_MAX {
        return description.to_string();
    }
    let clamped: String = description.chars().take(META_DESCRIPTION_MAX - 1).collect();
    format!("{}…", clamped.trim_end())
}

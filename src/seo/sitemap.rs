use crate::models::article::Article;
use crate::models::product::Product;
use chrono::{DateTime, Utc};

/// Builds the sitemap XML: one `<url>` per static page, per product, and per
/// article. `<lastmod>` is taken from `updated_at` where the record carries
/// one; static pages have none.
///
/// Serving this with the `application/xml` content type is the HTTP layer's
/// job; this only assembles the document.
pub fn build_sitemap(
    site_base: &str,
    static_paths: &[&str],
    products: &[Product],
    articles: &[Article],
) -> String {
    let base = site_base.trim_end_matches('/');
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n");

    for path in static_paths {
        push_url(&mut xml, &join(base, path), None);
    }

    for product in products {
        let path = match &product.slug {
            Some(slug) if !slug.is_empty() => format!("/product/{}", slug),
            _ => format!("/product/{}", product.id),
        };
        push_url(&mut xml, &join(base, &path), Some(product.updated_at));
    }

    for article in articles {
        let path = format!("/news/{}", article.slug);
        push_url(&mut xml, &join(base, &path), Some(article.updated_at));
    }

    xml.push_str("</urlset>\n");
    xml
}

fn join(base: &str, path: &str) -> String {
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

fn push_url(xml: &mut String, loc: &str, lastmod: Option<DateTime<Utc>>) {
    xml.push_str("  <url>\n");
    xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(loc)));
    if let Some(at) = lastmod {
        xml.push_str(&format!("    <lastmod>{}</lastmod>\n", at.format("%Y-%m-%d")));
    }
    xml.push_str("  </url>\n");
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::product::StockStatus;
    use chrono::TimeZone;

    fn product(slug: Option<&str>) -> Product {
        let at = Utc.with_ymd_and_hms(2025, 3, 15, 8, 30, 0).unwrap();
        Product {
            id: "p1".to_string(),
            title: "Widget".to_string(),
            description: String::new(),
            image_url: String::new(),
            additional_images: vec![],
            video_url: None,
            affiliate_link: "https://shop.example.com/widget".to_string(),
            category: "gadgets".to_string(),
            tags: vec![],
            price: None,
            stock_status: StockStatus::InStock,
            affiliate_platform: None,
            is_featured: false,
            meta_title: None,
            meta_description: None,
            slug: slug.map(|s| s.to_string()),
            created_at: at,
            updated_at: at,
        }
    }

    fn article() -> Article {
        let at = Utc.with_ymd_and_hms(2025, 4, 1, 9, 0, 0).unwrap();
        Article {
            id: "a1".to_string(),
            title: "News".to_string(),
            sections: None,
            meta_title: None,
            meta_description: None,
            slug: "big-news".to_string(),
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn test_sitemap_lists_static_and_record_urls() {
        let xml = build_sitemap(
            "https://example.com/",
            &["/", "/news"],
            &[product(Some("widget"))],
            &[article()],
        );
        assert!(xml.starts_with("<?xml version=\"1.0\""));
        assert!(xml.contains("<loc>https://example.com/</loc>"));
        assert!(xml.contains("<loc>https://example.com/news</loc>"));
        assert!(xml.contains("<loc>https://example.com/product/widget</loc>"));
        assert!(xml.contains("<loc>https://example.com/news/big-news</loc>"));
        assert!(xml.contains("<lastmod>2025-03-15</lastmod>"));
        assert!(xml.contains("<lastmod>2025-04-01</lastmod>"));
        assert!(xml.ends_with("</urlset>\n"));
    }

    #[test]
    fn test_product_without_slug_falls_back_to_id() {
        let xml = build_sitemap("https://example.com", &[], &[product(None)], &[]);
        assert!(xml.contains("<loc>https://example.com/product/p1</loc>"));
    }

    #[test]
    fn test_static_pages_have_no_lastmod() {
        let xml = build_sitemap("https://example.com", &["/about"], &[], &[]);
        assert!(!xml.contains("<lastmod>"));
    }
}

//! HTML rendering for crawler previews.
//!
//! Produces a small, self-contained document whose `<head>` carries Open
//! Graph and Twitter Card tags. The visible body is a minimal fallback for
//! clients that ignore metadata.

use crate::config::SiteConfig;

/// Recommended OG image dimensions.
const OG_IMAGE_WIDTH: u32 = 1200;
const OG_IMAGE_HEIGHT: u32 = 630;
const OG_IMAGE_TYPE: &str = "image/png";

/// `og:type` of a rendered page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Website,
    Article,
}

impl PageKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Website => "website",
            Self::Article => "article",
        }
    }
}

/// Everything needed to render one preview page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    pub title: String,
    pub description: String,
    /// Absolute image URL
    pub image: String,
    /// Absolute canonical URL
    pub url: String,
    pub kind: PageKind,
    pub published_time: Option<String>,
}

/// Escape text for use in both attribute values and element content.
#[must_use]
pub fn escape_html(text: &str) -> String {
    html_escape::encode_quoted_attribute(text).into_owned()
}

/// `"{title} | {site}"`, or just the site name for the home page.
#[must_use]
pub fn page_title(title: &str, site_name: &str) -> String {
    if title == site_name {
        site_name.to_string()
    } else {
        format!("{title} | {site_name}")
    }
}

/// Render a complete HTML document for a preview.
#[must_use]
pub fn render(ctx: &RenderContext, site: &SiteConfig) -> String {
    let title = escape_html(&ctx.title);
    let description = escape_html(&ctx.description);
    let full_title = escape_html(&page_title(&ctx.title, &site.name));
    let site_name = escape_html(&site.name);
    let locale = escape_html(&site.locale);
    let theme_color = escape_html(&site.theme_color);
    // URLs are attribute-escaped too; `&amp;` decodes back to the same URL.
    let url = escape_html(&ctx.url);
    let image = escape_html(&ctx.image);
    let kind = ctx.kind.as_str();

    let article_tags = match (ctx.kind, ctx.published_time.as_deref()) {
        (PageKind::Article, Some(published)) => format!(
            "\n    <meta property=\"article:published_time\" content=\"{}\">",
            escape_html(published)
        ),
        _ => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{full_title}</title>
    <meta name="description" content="{description}">
    <link rel="canonical" href="{url}">
    <link rel="icon" href="/favicon.ico">
    <meta name="theme-color" content="{theme_color}">

    <meta property="og:type" content="{kind}">
    <meta property="og:url" content="{url}">
    <meta property="og:title" content="{title}">
    <meta property="og:description" content="{description}">
    <meta property="og:image" content="{image}">
    <meta property="og:image:width" content="{OG_IMAGE_WIDTH}">
    <meta property="og:image:height" content="{OG_IMAGE_HEIGHT}">
    <meta property="og:image:type" content="{OG_IMAGE_TYPE}">
    <meta property="og:locale" content="{locale}">
    <meta property="og:site_name" content="{site_name}">{article_tags}

    <meta name="twitter:card" content="summary_large_image">
    <meta name="twitter:title" content="{title}">
    <meta name="twitter:description" content="{description}">
    <meta name="twitter:image" content="{image}">
</head>
<body>
    <h1>{title}</h1>
    <p>{description}</p>
    <img src="{image}" alt="{title}">
    <p><a href="{url}">{url}</a></p>
</body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn website(title: &str, description: &str) -> RenderContext {
        RenderContext {
            title: title.into(),
            description: description.into(),
            image: "https://x.test/eventos.png".into(),
            url: "https://x.test/sobre".into(),
            kind: PageKind::Website,
            published_time: None,
        }
    }

    /// Extract the `content` attribute of a meta tag.
    fn meta_content<'a>(html: &'a str, key: &str) -> Option<&'a str> {
        let marker = format!("{key}\" content=\"");
        let start = html.find(&marker)? + marker.len();
        let end = html[start..].find('"')? + start;
        Some(&html[start..end])
    }

    #[test]
    fn test_page_title() {
        assert_eq!(page_title("Sobre", "Agenda"), "Sobre | Agenda");
        assert_eq!(page_title("Agenda", "Agenda"), "Agenda");
    }

    #[test]
    fn test_escape_html() {
        let escaped = escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#);
        assert!(escaped.starts_with("&lt;a href=&quot;x&quot;&gt;Tom &amp; "));
        assert!(escaped.ends_with("&lt;/a&gt;"));
        assert!(!escaped.contains('\''));
    }

    #[test]
    fn test_website_tags() {
        let site = SiteConfig::default();
        let html = render(&website("Sobre", "About us"), &site);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(&format!("<title>Sobre | {}</title>", site.name)));
        assert_eq!(meta_content(&html, "og:type"), Some("website"));
        assert_eq!(meta_content(&html, "og:title"), Some("Sobre"));
        assert_eq!(meta_content(&html, "og:description"), Some("About us"));
        assert_eq!(meta_content(&html, "og:url"), Some("https://x.test/sobre"));
        assert_eq!(
            meta_content(&html, "og:image"),
            Some("https://x.test/eventos.png")
        );
        assert_eq!(meta_content(&html, "og:image:width"), Some("1200"));
        assert_eq!(meta_content(&html, "og:image:height"), Some("630"));
        assert_eq!(meta_content(&html, "og:locale"), Some("pt_BR"));
        assert_eq!(meta_content(&html, "og:site_name"), Some(site.name.as_str()));
        assert_eq!(
            meta_content(&html, "twitter:card"),
            Some("summary_large_image")
        );
        assert_eq!(meta_content(&html, "twitter:title"), Some("Sobre"));
        assert!(html.contains(r#"<link rel="canonical" href="https://x.test/sobre">"#));
        assert!(html.contains(r#"<a href="https://x.test/sobre">"#));
        assert!(!html.contains("article:published_time"));
    }

    #[test]
    fn test_urls_are_attribute_escaped() {
        let site = SiteConfig::default();
        let ctx = RenderContext {
            image: r#"x:"><script>alert(1)</script>"#.into(),
            url: "https://x.test/eventos?a=1&b=2".into(),
            ..website("Sobre", "About us")
        };
        let html = render(&ctx, &site);

        assert!(!html.contains("<script>"));
        assert_eq!(
            meta_content(&html, "og:image"),
            Some("x:&quot;&gt;&lt;script&gt;alert(1)&lt;/script&gt;")
        );
        assert_eq!(
            meta_content(&html, "og:url"),
            Some("https://x.test/eventos?a=1&amp;b=2")
        );
    }

    #[test]
    fn test_home_title_is_site_name_only() {
        let site = SiteConfig::default();
        let html = render(&website(&site.name, &site.description), &site);
        assert!(html.contains(&format!("<title>{}</title>", site.name)));
    }

    #[test]
    fn test_article_published_time() {
        let site = SiteConfig::default();
        let ctx = RenderContext {
            kind: PageKind::Article,
            published_time: Some("2025-04-01T12:00:00+00:00".into()),
            ..website("Meetup X", "Join us")
        };
        let html = render(&ctx, &site);
        assert_eq!(meta_content(&html, "og:type"), Some("article"));
        assert_eq!(
            meta_content(&html, "article:published_time"),
            Some("2025-04-01T12:00:00+00:00")
        );

        // Websites never carry a published time, even if one is supplied.
        let ctx = RenderContext {
            kind: PageKind::Website,
            ..ctx
        };
        assert!(!render(&ctx, &site).contains("article:published_time"));
    }

    #[test]
    fn test_hostile_text_is_escaped() {
        let site = SiteConfig::default();
        let hostile = r#""><script>alert('x')</script>&"#;
        let html = render(&website(hostile, hostile), &site);

        for key in ["og:title", "og:description", "twitter:title", "twitter:description"] {
            let value = meta_content(&html, key).expect("tag present");
            for raw in ['<', '>', '"', '\''] {
                assert!(!value.contains(raw), "{key} contains raw {raw}: {value}");
            }
            assert!(value.starts_with("&quot;&gt;&lt;script&gt;"));
        }
        assert!(!html.contains("<script>"));
    }
}

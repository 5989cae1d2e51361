//! Absolute URL helpers for OG tags and redirects.

use reqwest::Url;

/// Preview image used when an event has no cover.
pub const DEFAULT_IMAGE_PATH: &str = "/eventos.png";

/// Make a possibly-relative URL absolute against `origin`.
///
/// Missing or empty input yields the default preview image. Values that
/// already carry a scheme are returned untouched.
#[must_use]
pub fn absolutize(path: Option<&str>, origin: &str) -> String {
    match path {
        None | Some("") => format!("{origin}{DEFAULT_IMAGE_PATH}"),
        Some(p) if has_scheme(p) => p.to_string(),
        Some(p) if p.starts_with('/') => format!("{origin}{p}"),
        Some(p) => format!("{origin}/{p}"),
    }
}

/// Like [`absolutize`], but falls back to the default image unless the
/// result is a well-formed `http(s)` URL. The returned value is
/// percent-encoded.
#[must_use]
pub fn image_url(path: Option<&str>, origin: &str) -> String {
    Url::parse(&absolutize(path, origin))
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https"))
        .map_or_else(|| absolutize(None, origin), String::from)
}

/// Join a logical path onto `origin`, percent-encoded.
///
/// The path is appended textually, so `//host` stays on `origin`.
#[must_use]
pub fn on_origin(origin: &str, path: &str) -> String {
    Url::parse(&format!("{origin}{path}")).map_or_else(|_| format!("{origin}/"), String::from)
}

/// Parse an `http(s)://host[:port]` origin, dropping any path.
///
/// Returns `None` for anything that is not an absolute http(s) URL.
#[must_use]
pub fn parse_origin(raw: &str) -> Option<String> {
    let url = Url::parse(raw.trim()).ok()?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return None;
    }
    Some(url.origin().ascii_serialization())
}

/// RFC 3986 scheme: `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." ) ":"`.
fn has_scheme(value: &str) -> bool {
    let Some((scheme, _)) = value.split_once(':') else {
        return false;
    };

    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

//! Preview description text for event pages.
//!
//! Turns the rich-text description plus the scheduling fields of an event
//! into a single plain-text line suitable for `og:description`.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{EventRecord, non_blank};

/// Maximum description length in characters, ellipsis included.
pub const MAX_DESCRIPTION_CHARS: usize = 200;

const ELLIPSIS: &str = "...";

/// Separator between suffix fields.
const FIELD_SEPARATOR: &str = " · ";

/// Entities produced by the rich-text editor. `&amp;` goes last so that
/// `&amp;lt;` decodes to the literal text `&lt;`.
const ENTITIES: &[(&str, &str)] = &[
    ("&nbsp;", " "),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&amp;", "&"),
];

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

/// Build the preview description for an event.
///
/// `fallback` is used when the event has neither a description nor any
/// scheduling details.
#[must_use]
pub fn build_description(event: &EventRecord, fallback: &str) -> String {
    let text = event
        .descricao
        .as_deref()
        .map(strip_markup)
        .unwrap_or_default();
    let suffix = schedule_suffix(event);

    let full = match (text.is_empty(), suffix.is_empty()) {
        (false, false) => format!("{text} | {suffix}"),
        (false, true) => text,
        (true, false) => suffix,
        (true, true) => fallback.to_string(),
    };

    truncate(&full, MAX_DESCRIPTION_CHARS)
}

/// Remove tags, decode entities and collapse whitespace.
#[must_use]
pub fn strip_markup(raw: &str) -> String {
    let mut text = TAG_RE.replace_all(raw, " ").into_owned();
    for (entity, replacement) in ENTITIES {
        text = text.replace(entity, replacement);
    }
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Date, time, mode and location joined with a middle dot.
///
/// Values are shown verbatim; dates and times are not validated.
fn schedule_suffix(event: &EventRecord) -> String {
    let mut parts = Vec::with_capacity(4);

    if let Some(date) = non_blank(event.data_evento.as_deref()) {
        parts.push(format!("Data: {date}"));
    }
    if let Some(time) = non_blank(event.horario.as_deref()) {
        parts.push(format!("Horário: {time}"));
    }
    if let Some(mode) = non_blank(event.modalidade.as_deref()) {
        parts.push(mode.to_string());
    }
    if let Some(city) = non_blank(event.cidade.as_deref()) {
        match non_blank(event.estado.as_deref()) {
            Some(state) => parts.push(format!("{city} - {state}")),
            None => parts.push(city.to_string()),
        }
    }

    parts.join(FIELD_SEPARATOR)
}

/// Truncate to `max_chars`, ending in `...` when shortened.
#[must_use]
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let keep = max_chars.saturating_sub(ELLIPSIS.len());
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event() -> EventRecord {
        EventRecord {
            id: "42".into(),
            nome: Some("Meetup X".into()),
            ..EventRecord::default()
        }
    }

    #[test]
    fn test_strip_markup() {
        assert_eq!(strip_markup("<p>Join us</p>"), "Join us");
        assert_eq!(
            strip_markup("<p>Line one</p><p>Line&nbsp;two</p>\n\n<br/>"),
            "Line one Line two"
        );
        assert_eq!(
            strip_markup("Rock &amp; Roll &lt;3 &quot;live&quot; it&#39;s"),
            "Rock & Roll <3 \"live\" it's"
        );
        assert_eq!(strip_markup("&amp;lt;b&amp;gt;"), "&lt;b&gt;");
        assert_eq!(strip_markup("   "), "");
    }

    #[test]
    fn test_description_with_full_suffix() {
        let event = EventRecord {
            descricao: Some("<p>Join us</p>".into()),
            data_evento: Some("2025-05-01".into()),
            horario: Some("19:00".into()),
            modalidade: Some("Presencial".into()),
            cidade: Some("Recife".into()),
            estado: Some("PE".into()),
            ..event()
        };

        assert_eq!(
            build_description(&event, "fallback"),
            "Join us | Data: 2025-05-01 · Horário: 19:00 · Presencial · Recife - PE"
        );
    }

    #[test]
    fn test_city_without_state() {
        let event = EventRecord {
            cidade: Some("Recife".into()),
            ..event()
        };
        assert_eq!(build_description(&event, "fallback"), "Recife");
    }

    #[test]
    fn test_state_without_city_is_dropped() {
        let event = EventRecord {
            descricao: Some("Hello".into()),
            estado: Some("PE".into()),
            ..event()
        };
        assert_eq!(build_description(&event, "fallback"), "Hello");
    }

    #[test]
    fn test_suffix_only() {
        let event = EventRecord {
            descricao: Some("<p></p>".into()),
            modalidade: Some("Online".into()),
            ..event()
        };
        assert_eq!(build_description(&event, "fallback"), "Online");
    }

    #[test]
    fn test_fallback_when_empty() {
        assert_eq!(build_description(&event(), "Site description"), "Site description");
    }

    #[test]
    fn test_dates_are_not_validated() {
        let event = EventRecord {
            data_evento: Some("em breve".into()),
            ..event()
        };
        assert_eq!(build_description(&event, "fallback"), "Data: em breve");
    }

    #[test]
    fn test_truncate_boundaries() {
        let exact = "a".repeat(200);
        assert_eq!(truncate(&exact, 200), exact);

        let long = "b".repeat(201);
        let cut = truncate(&long, 200);
        assert_eq!(cut.chars().count(), 200);
        assert_eq!(cut, format!("{}...", "b".repeat(197)));
    }

    #[test]
    fn test_truncate_multibyte() {
        let long = "é".repeat(250);
        let cut = truncate(&long, 200);
        assert_eq!(cut.chars().count(), 200);
        assert!(cut.ends_with("é..."));
    }

    #[test]
    fn test_long_description_is_truncated() {
        let event = EventRecord {
            descricao: Some(format!("<p>{}</p>", "x".repeat(300))),
            horario: Some("19:00".into()),
            ..event()
        };
        let description = build_description(&event, "fallback");
        assert_eq!(description.chars().count(), MAX_DESCRIPTION_CHARS);
        assert!(description.ends_with("..."));
    }
}

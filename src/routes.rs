//! Logical path resolution.
//!
//! Maps the SPA route a human would see (`/eventos/42`, `/sobre`, ...) to
//! either an event lookup or static page metadata.

use crate::config::SiteConfig;

/// Prefix of event detail routes.
const EVENT_PREFIX: &str = "/eventos/";

/// Title and description for a page that is not backed by an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageDescriptor<'a> {
    pub title: &'a str,
    pub description: &'a str,
}

/// Known SPA routes. The home page (`/`) uses the site branding instead.
const STATIC_PAGES: &[(&str, PageDescriptor<'static>)] = &[
    (
        "/eventos",
        PageDescriptor {
            title: "Todos os eventos",
            description: "Explore a lista completa de eventos: filtre por data, cidade e modalidade.",
        },
    ),
    (
        "/sobre",
        PageDescriptor {
            title: "Sobre",
            description: "Conheça o projeto e as pessoas que mantêm a agenda de eventos da comunidade.",
        },
    ),
    (
        "/contato",
        PageDescriptor {
            title: "Contato",
            description: "Fale com a equipe para divulgar um evento, sugerir melhorias ou tirar dúvidas.",
        },
    ),
];

/// Result of resolving a logical path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    /// `/eventos/<id>` detail page
    Event { event_id: &'a str },
    /// Anything else, with its metadata (or the site defaults)
    Static(PageDescriptor<'a>),
}

/// Resolve a logical path. Never fails: unknown paths get the site defaults.
#[must_use]
pub fn resolve<'a>(pathname: &'a str, site: &'a SiteConfig) -> Route<'a> {
    if let Some(event_id) = pathname.strip_prefix(EVENT_PREFIX) {
        if !event_id.is_empty() && !event_id.contains('/') {
            return Route::Event { event_id };
        }
    }

    Route::Static(static_page(pathname).unwrap_or_else(|| default_page(site)))
}

/// Look up a known static page.
#[must_use]
pub fn static_page(pathname: &str) -> Option<PageDescriptor<'static>> {
    STATIC_PAGES
        .iter()
        .find(|(path, _)| *path == pathname)
        .map(|(_, descriptor)| *descriptor)
}

/// Generic branding used for the home page and unknown paths.
#[must_use]
pub fn default_page(site: &SiteConfig) -> PageDescriptor<'_> {
    PageDescriptor {
        title: &site.name,
        description: &site.description,
    }
}

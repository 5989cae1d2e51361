//! Runtime configuration: site branding and server settings.

/// Default site name used in titles and `og:site_name`.
pub const DEFAULT_SITE_NAME: &str = "Agenda de Eventos";

/// Default description for pages without their own metadata.
pub const DEFAULT_SITE_DESCRIPTION: &str =
    "Descubra eventos da comunidade: encontros, palestras, workshops e muito mais.";

/// Default `og:locale`.
pub const DEFAULT_LOCALE: &str = "pt_BR";

/// Default `theme-color` meta value.
pub const DEFAULT_THEME_COLOR: &str = "#7c3aed";

/// Site branding shared by every rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    pub name: String,
    pub description: String,
    pub locale: String,
    pub theme_color: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_SITE_NAME.to_string(),
            description: DEFAULT_SITE_DESCRIPTION.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
            theme_color: DEFAULT_THEME_COLOR.to_string(),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    /// Public origin of the SPA (e.g. `https://eventos.example`), without
    /// a trailing slash.
    ///
    /// When unset, the origin is taken from the request's `Host` header.
    pub origin: Option<String>,
    pub site: SiteConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "0.0.0.0".to_string(),
            origin: None,
            site: SiteConfig::default(),
        }
    }
}

//! User-agent based crawler detection.
//!
//! Link unfurlers (social networks, chat apps) and search engine indexers
//! get pre-rendered HTML; everyone else is sent to the SPA.

/// Lowercased user-agent fragments that identify preview crawlers.
const CRAWLER_SIGNATURES: &[&str] = &[
    // Social platforms
    "facebookexternalhit",
    "facebot",
    "twitterbot",
    "linkedinbot",
    "pinterest",
    "redditbot",
    "tumblr",
    "vkshare",
    "mastodon",
    // Chat apps
    "whatsapp",
    "telegrambot",
    "slackbot",
    "slack-imgproxy",
    "discordbot",
    "skypeuripreview",
    "viber",
    // Search engines
    "googlebot",
    "google-inspectiontool",
    "bingbot",
    "yandexbot",
    "duckduckbot",
    "baiduspider",
    "applebot",
    "ia_archiver",
    // Link unfurling services
    "embedly",
    "quora link preview",
    "showyoubot",
    "outbrain",
    "iframely",
    "w3c_validator",
];

/// Check whether a `User-Agent` header belongs to a known crawler.
///
/// Matching is a case-insensitive substring search. A missing header is
/// never a crawler.
#[must_use]
pub fn is_crawler(user_agent: Option<&str>) -> bool {
    let Some(user_agent) = user_agent else {
        return false;
    };

    let user_agent = user_agent.to_lowercase();
    CRAWLER_SIGNATURES
        .iter()
        .any(|signature| user_agent.contains(signature))
}

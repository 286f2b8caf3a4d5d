//! Search URL construction
//!
//! Builds the web-search and Wikipedia URLs opened by the search actions.

pub const DEFAULT_HOME_URL: &str = "https://www.google.com";
pub const DEFAULT_SEARCH_URL: &str = "https://www.google.com/search?q=";
pub const DEFAULT_WIKIPEDIA_URL: &str = "https://pl.wikipedia.org/wiki/";

/// Characters that break direct Wikipedia article URLs built from a spoken query.
const POLISH_DIACRITICS: &[char] = &[
    'ą', 'ć', 'ę', 'ł', 'ń', 'ó', 'ś', 'ź', 'ż', 'Ą', 'Ć', 'Ę', 'Ł', 'Ń', 'Ó', 'Ś', 'Ź', 'Ż',
];

pub fn has_polish_diacritics(text: &str) -> bool {
    text.chars().any(|c| POLISH_DIACRITICS.contains(&c))
}

/// Base URLs for the browser actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchEngine {
    pub home_url: String,
    /// Query prefix; the percent-encoded query is appended verbatim.
    pub search_url: String,
    /// Article prefix; the article title is appended verbatim.
    pub wikipedia_url: String,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self {
            home_url: DEFAULT_HOME_URL.to_string(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            wikipedia_url: DEFAULT_WIKIPEDIA_URL.to_string(),
        }
    }
}

impl SearchEngine {
    pub fn home(&self) -> &str {
        &self.home_url
    }

    /// Web search URL for `query`.
    pub fn search(&self, query: &str) -> String {
        format!("{}{}", self.search_url, urlencoding::encode(query))
    }

    /// Wikipedia URL for `query`.
    ///
    /// Queries with Polish diacritics fall back to a web search for
    /// "<query> wikipedia"; anything else becomes a direct article link.
    pub fn wikipedia(&self, query: &str) -> String {
        if has_polish_diacritics(query) {
            format!("{}%20wikipedia", self.search(query))
        } else {
            format!("{}{}", self.wikipedia_url, query.replace(' ', "_"))
        }
    }
}

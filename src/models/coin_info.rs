use serde::{Deserialize, Serialize};

/// Descriptive metadata for one coin, already trimmed for display.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CoinInfo {
    pub name: String,
    pub symbol: String,
    pub image_url: String,
    pub homepage_url: String,
    pub description_excerpt: String,
}

impl CoinInfo {
    /// Upper-cased symbol, e.g. "BTC".
    pub fn ticker(&self) -> String {
        self.symbol.to_uppercase()
    }

    pub fn has_homepage(&self) -> bool {
        !self.homepage_url.trim().is_empty()
    }
}

/// First `max_chars` characters of `text`. Counts chars, not bytes, and does
/// not look for word boundaries.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excerpt_keeps_exactly_the_first_chars() {
        let description: String = (0..500).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        let cut = excerpt(&description, 300);
        assert_eq!(cut.chars().count(), 300);
        assert_eq!(cut, description[..300]);
    }

    #[test]
    fn excerpt_is_char_safe() {
        let text = "é".repeat(10);
        assert_eq!(excerpt(&text, 3), "ééé");
        assert_eq!(excerpt("short", 300), "short");
    }

    #[test]
    fn ticker_is_upper_case() {
        let info = CoinInfo {
            symbol: "btc".into(),
            ..Default::default()
        };
        assert_eq!(info.ticker(), "BTC");
        assert!(!info.has_homepage());
    }
}

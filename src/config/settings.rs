//! Ticker display and behavior settings.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Font sizes offered by the settings menu.
pub const FONT_SIZE_CHOICES: &[u32] = &[16, 20, 28, 32];

/// Scroll speeds offered by the settings menu, in pixels per tick.
pub const SCROLL_SPEED_CHOICES: &[(&str, f64)] = &[
    ("Slow", 0.5),
    ("Medium", 1.0),
    ("Fast", 2.0),
    ("Very Fast", 4.0),
];

/// Background opacities offered by the settings menu.
pub const OPACITY_CHOICES: &[(&str, f64)] = &[
    ("Light (25%)", 0.25),
    ("Medium (55%)", 0.55),
    ("Dark (75%)", 0.75),
    ("Solid (90%)", 0.90),
];

/// Refresh intervals offered by the settings menu, in minutes.
pub const REFRESH_INTERVAL_CHOICES: &[u64] = &[5, 15, 30, 60];

/// Longest accepted refresh interval (one week), in minutes.
const MAX_REFRESH_INTERVAL_MIN: u64 = 7 * 24 * 60;

const DEFAULT_SYMBOLS: &[&str] = &[
    "AAPL", "GOOGL", "MSFT", "AMZN", "TSLA", "META", "NVDA", "SPY", "QQQ", "BTC-USD",
];

/// Persisted ticker configuration.
///
/// Field names are the keys of the JSON preferences file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickerConfig {
    /// Symbols to display, in display order.
    pub symbols: Vec<String>,
    /// Symbol font size in pixels.
    pub ticker_font_size: u32,
    /// Horizontal advance per animation tick, in pixels.
    pub scroll_speed: f64,
    /// Animation frame rate.
    pub fps: u32,
    /// Gap after each ticker segment, in pixels.
    pub item_gap: u32,
    /// Background opacity, 0 to 1.
    pub bg_alpha: f64,
    /// Minutes between quote refreshes.
    pub update_interval_min: u64,
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            symbols: DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            ticker_font_size: 20,
            scroll_speed: 1.0,
            fps: 40,
            item_gap: 40,
            bg_alpha: 0.55,
            update_interval_min: 15,
        }
    }
}

impl TickerConfig {
    /// Load the configuration, falling back to defaults on any error.
    ///
    /// Values from `path` are overlaid on the defaults, then `TICKER_*`
    /// environment variables are overlaid on top. Unknown keys are ignored.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::debug!("Using default config ({}): {}", path.display(), e);
                Self::default()
            }
        }
    }

    fn try_load(path: &Path) -> crate::Result<Self> {
        let settings = ::config::Config::builder()
            .add_source(
                ::config::File::from(path)
                    .format(::config::FileFormat::Json)
                    .required(false),
            )
            .add_source(
                ::config::Environment::with_prefix("TICKER")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("symbols"),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        Ok(config.sanitized())
    }

    /// Save the configuration as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Font size used for prices and the timestamp.
    pub fn price_font_size(&self) -> u32 {
        self.ticker_font_size.saturating_sub(6).max(10)
    }

    /// Height of the ticker bar in pixels.
    pub fn bar_height(&self) -> u32 {
        self.ticker_font_size + 24
    }

    /// Period of the animation timer, in whole milliseconds and never zero.
    pub fn frame_period(&self) -> Duration {
        Duration::from_millis((1000 / u64::from(self.fps.max(1))).max(1))
    }

    /// Period of the quote refresh timer.
    pub fn refresh_period(&self) -> Duration {
        let minutes = self
            .update_interval_min
            .clamp(1, MAX_REFRESH_INTERVAL_MIN);
        Duration::from_secs(minutes.saturating_mul(60))
    }

    /// Replace the symbol list. Returns false (and keeps the old list) when
    /// nothing usable remains after normalization.
    pub fn set_symbols<I, S>(&mut self, symbols: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let symbols = normalize_symbols(symbols);
        if symbols.is_empty() {
            return false;
        }
        self.symbols = symbols;
        true
    }

    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        self.symbols = normalize_symbols(&self.symbols);
        if self.symbols.is_empty() {
            self.symbols = defaults.symbols.clone();
        }
        self.fps = self.fps.max(1);
        self.ticker_font_size = self.ticker_font_size.max(1);
        self.update_interval_min = self
            .update_interval_min
            .clamp(1, MAX_REFRESH_INTERVAL_MIN);
        self.bg_alpha = self.bg_alpha.clamp(0.0, 1.0);
        if !self.scroll_speed.is_finite() || self.scroll_speed < 0.0 {
            self.scroll_speed = defaults.scroll_speed;
        }
        self
    }
}

/// Trim, uppercase and drop blank entries, preserving order.
pub fn normalize_symbols<I, S>(symbols: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    symbols
        .into_iter()
        .map(|s| s.as_ref().trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_derived_sizes() {
        let mut config = TickerConfig::default();
        assert_eq!(config.price_font_size(), 14);
        assert_eq!(config.bar_height(), 44);

        config.ticker_font_size = 12;
        assert_eq!(config.price_font_size(), 10);
        assert_eq!(config.bar_height(), 36);
    }

    #[test]
    fn test_timer_periods() {
        let config = TickerConfig::default();
        assert_eq!(config.frame_period(), Duration::from_millis(25));
        assert_eq!(config.refresh_period(), Duration::from_secs(900));
    }

    #[test]
    fn test_periods_stay_in_range() {
        let fast = TickerConfig {
            fps: 2000,
            ..TickerConfig::default()
        };
        assert_eq!(fast.frame_period(), Duration::from_millis(1));

        let huge = TickerConfig {
            update_interval_min: u64::MAX,
            ..TickerConfig::default()
        };
        assert_eq!(
            huge.refresh_period(),
            Duration::from_secs(MAX_REFRESH_INTERVAL_MIN * 60)
        );
    }

    #[test]
    fn test_empty_symbol_list_in_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".ticker-config.json");
        std::fs::write(&path, r#"{ "symbols": [" ", ""], "fps": 30 }"#).unwrap();

        let config = TickerConfig::load(&path);
        assert_eq!(config.symbols, TickerConfig::default().symbols);
        assert_eq!(config.fps, 30);
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".ticker-config.json");

        let config = TickerConfig {
            symbols: vec!["NVDA".into(), "BTC-USD".into()],
            ticker_font_size: 28,
            scroll_speed: 0.5,
            fps: 60,
            item_gap: 24,
            bg_alpha: 0.75,
            update_interval_min: 30,
        };
        config.save(&path).unwrap();

        assert_eq!(TickerConfig::load(&path), config);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = TickerConfig::load(&dir.path().join("absent.json"));
        assert_eq!(config, TickerConfig::default());
    }

    #[test]
    fn test_malformed_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".ticker-config.json");
        std::fs::write(&path, "{ \"fps\": 30, ").unwrap();

        assert_eq!(TickerConfig::load(&path), TickerConfig::default());
    }

    #[test]
    fn test_partial_file_overlays_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".ticker-config.json");
        std::fs::write(
            &path,
            r#"{ "symbols": ["aapl", " msft "], "fps": 30, "window_title": "ignored" }"#,
        )
        .unwrap();

        let config = TickerConfig::load(&path);
        assert_eq!(config.symbols, vec!["AAPL".to_string(), "MSFT".to_string()]);
        assert_eq!(config.fps, 30);
        assert_eq!(config.ticker_font_size, 20);
        assert_eq!(config.bg_alpha, 0.55);
    }

    #[test]
    fn test_set_symbols_rejects_empty_list() {
        let mut config = TickerConfig::default();
        assert!(!config.set_symbols(["  ", ""]));
        assert_eq!(config.symbols.len(), 10);

        assert!(config.set_symbols(["tsla", "spy"]));
        assert_eq!(config.symbols, vec!["TSLA".to_string(), "SPY".to_string()]);
    }
}

use serde::Serialize;
use serde_json::{Map, Value};

pub const CONFIG_FILE: &str = "config.json";

pub const DEFAULT_TITLE: &str = "Status";
pub const DEFAULT_FOOTER: &str = "Status page hosted by GitHub, generated with <a href='https://github.com/jayfk/statuspage'>jayfk/statuspage</a>";
pub const DEFAULT_LOGO: &str =
    "https://raw.githubusercontent.com/jayfk/statuspage/master/template/logo.png";
pub const DEFAULT_FAVICON: &str =
    "https://raw.githubusercontent.com/jayfk/statuspage/master/template/favicon.png";

// ---------------------------------------------------------------------------
// PageConfig
// ---------------------------------------------------------------------------

/// Display options handed to the template as `config`.
///
/// Keys from `config.json` replace the defaults one by one. Keys the defaults
/// don't know about are kept so custom templates can use them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PageConfig(Map<String, Value>);

impl Default for PageConfig {
    fn default() -> Self {
        let mut map = Map::new();
        map.insert("footer".to_string(), Value::from(DEFAULT_FOOTER));
        map.insert("logo".to_string(), Value::from(DEFAULT_LOGO));
        map.insert("title".to_string(), Value::from(DEFAULT_TITLE));
        map.insert("favicon".to_string(), Value::from(DEFAULT_FAVICON));
        Self(map)
    }
}

impl PageConfig {
    /// Merge the JSON object in `text` over the defaults.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        let overrides: Map<String, Value> = serde_json::from_str(text)?;
        let mut config = Self::default();
        config.0.extend(overrides);
        Ok(config)
    }

    /// Like [`PageConfig::from_json`], but a malformed file only logs a
    /// warning and yields the defaults.
    pub fn from_json_or_default(text: &str) -> Self {
        match Self::from_json(text) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("unable to parse {CONFIG_FILE} ({e}); using defaults");
                Self::default()
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn title(&self) -> &str {
        self.get("title").unwrap_or(DEFAULT_TITLE)
    }
}

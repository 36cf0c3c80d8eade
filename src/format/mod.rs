pub mod activity;
pub mod badges;
pub mod data;
pub mod emoji;

use serde::{Deserialize, Serialize};

use crate::error::FormatError;

pub const UNKNOWN_GAME: &str = "https://r2.e-z.host/unknown_game.png";

/// Url bases and sizes used by every formatter. Any field left out of the
/// toml file keeps its default.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct FormatConf {
    pub cdn: String,
    pub api: String,
    pub twemoji: String,
    pub spotify: String,
    pub youtube: String,
    pub unknown_game: String,
    pub emoji_size: u32,
    pub asset_size: u32,
    pub icon_size: u32,
    pub user_agent: String,
    pub token: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Default for FormatConf {
    fn default() -> Self {
        Self {
            cdn: String::from("https://cdn.discordapp.com"),
            api: String::from("https://discord.com/api/v10"),
            twemoji: String::from("https://cdn.jsdelivr.net/gh/jdecked/twemoji@latest/assets/svg"),
            spotify: String::from("https://i.scdn.co/image"),
            youtube: String::from("https://i.ytimg.com/vi"),
            unknown_game: String::from(UNKNOWN_GAME),
            emoji_size: 4096,
            asset_size: 4096,
            icon_size: 56,
            user_agent: format!("presence-fmt/{}", env!("CARGO_PKG_VERSION")),
            token: None,
            timeout_secs: None,
        }
    }
}

impl FormatConf {
    /// Loads `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: &str) -> Result<Self, FormatError> {
        if std::path::Path::new(path).exists() {
            conf_from_file(path)
        } else {
            Ok(Self::default())
        }
    }
}

pub fn conf_from_file<T: serde::de::DeserializeOwned>(path: &str) -> Result<T, FormatError> {
    Ok(toml::from_str::<T>(&std::fs::read_to_string(path)?)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let conf: FormatConf = toml::from_str(
            r#"
            unknown_game = "https://example.com/missing.png"
            token = "abc"
            "#,
        )
        .unwrap();
        assert_eq!(conf.unknown_game, "https://example.com/missing.png");
        assert_eq!(conf.token.as_deref(), Some("abc"));
        assert_eq!(conf.cdn, "https://cdn.discordapp.com");
        assert_eq!(conf.icon_size, 56);
    }

    #[test]
    fn test_missing_file_is_default() {
        let conf = FormatConf::load_or_default("config/does-not-exist.toml").unwrap();
        assert_eq!(conf, FormatConf::default());
    }
}

use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct EmojiRef {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub animated: bool,
}

impl EmojiRef {
    pub fn unicode(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }
    pub fn custom(id: impl Into<String>, name: impl Into<String>, animated: bool) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
            animated,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(from = "u8", into = "u8")]
pub enum ActivityKind {
    #[default]
    Playing,
    Streaming,
    Listening,
    Watching,
    Custom,
    Competing,
    Unknown(u8),
}

impl From<u8> for ActivityKind {
    fn from(value: u8) -> Self {
        match value {
            0 => ActivityKind::Playing,
            1 => ActivityKind::Streaming,
            2 => ActivityKind::Listening,
            3 => ActivityKind::Watching,
            4 => ActivityKind::Custom,
            5 => ActivityKind::Competing,
            other => ActivityKind::Unknown(other),
        }
    }
}

impl From<ActivityKind> for u8 {
    fn from(kind: ActivityKind) -> Self {
        match kind {
            ActivityKind::Playing => 0,
            ActivityKind::Streaming => 1,
            ActivityKind::Listening => 2,
            ActivityKind::Watching => 3,
            ActivityKind::Custom => 4,
            ActivityKind::Competing => 5,
            ActivityKind::Unknown(other) => other,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct ActivityAssets {
    pub small_image: Option<String>,
    pub small_text: Option<String>,
    pub large_image: Option<String>,
    pub large_text: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct ActivityRef {
    #[serde(rename = "type", default)]
    pub kind: ActivityKind,
    pub name: String,
    pub application_id: Option<String>,
    pub assets: Option<ActivityAssets>,
}

impl ActivityRef {
    pub fn new(kind: ActivityKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            ..Default::default()
        }
    }
    pub fn application(mut self, application_id: impl Into<String>) -> Self {
        self.application_id = Some(application_id.into());
        self
    }
    pub fn assets(mut self, assets: ActivityAssets) -> Self {
        self.assets = Some(assets);
        self
    }
}

/// Image urls and hover texts of an activity, ready to be put in an embed.
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FormattedAssets {
    pub small_image: Option<String>,
    pub small_text: Option<String>,
    pub large_image: Option<String>,
    pub large_text: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct UserRef {
    pub id: String,
    pub avatar: Option<String>,
    pub banner: Option<String>,
    pub discriminator: Option<String>,
}

impl UserRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn display_avatar_url(&self, cdn: &str, force_static: bool) -> String {
        match self.avatar.as_deref().filter(|hash| !hash.is_empty()) {
            Some(hash) => format!(
                "{cdn}/avatars/{}/{hash}.{}",
                self.id,
                image_ext(hash, force_static)
            ),
            None => format!("{cdn}/embed/avatars/{}.png", self.default_avatar_index()),
        }
    }

    pub fn banner_url(&self, cdn: &str, force_static: bool) -> Option<String> {
        let hash = self.banner.as_deref().filter(|hash| !hash.is_empty())?;
        Some(format!(
            "{cdn}/banners/{}/{hash}.{}",
            self.id,
            image_ext(hash, force_static)
        ))
    }

    // migrated usernames carry discriminator "0" and index by snowflake instead
    fn default_avatar_index(&self) -> u64 {
        match self
            .discriminator
            .as_deref()
            .and_then(|d| d.parse::<u64>().ok())
        {
            Some(discriminator) if discriminator != 0 => discriminator % 5,
            _ => self.id.parse::<u64>().map(|id| (id >> 22) % 6).unwrap_or(0),
        }
    }
}

fn image_ext(hash: &str, force_static: bool) -> &'static str {
    if !force_static && hash.starts_with("a_") {
        "gif"
    } else {
        "webp"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CDN: &str = "https://cdn.discordapp.com";

    #[test]
    fn test_activity_kind_from_wire() {
        let activity: ActivityRef =
            serde_json::from_str(r#"{"type": 2, "name": "Spotify"}"#).unwrap();
        assert_eq!(activity.kind, ActivityKind::Listening);
        assert!(activity.assets.is_none());

        let activity: ActivityRef = serde_json::from_str(r#"{"type": 9, "name": "x"}"#).unwrap();
        assert_eq!(activity.kind, ActivityKind::Unknown(9));
    }

    #[test]
    fn test_animated_avatar_url() {
        let user = UserRef {
            avatar: Some("a_abc".into()),
            ..UserRef::new("80351110224678912")
        };
        assert_eq!(
            user.display_avatar_url(CDN, false),
            "https://cdn.discordapp.com/avatars/80351110224678912/a_abc.gif"
        );
        assert!(user.display_avatar_url(CDN, true).ends_with(".webp"));
    }

    #[test]
    fn test_default_avatar_url() {
        let legacy = UserRef {
            discriminator: Some("1337".into()),
            ..UserRef::new("80351110224678912")
        };
        assert_eq!(
            legacy.display_avatar_url(CDN, false),
            "https://cdn.discordapp.com/embed/avatars/2.png"
        );

        let migrated = UserRef {
            discriminator: Some("0".into()),
            ..UserRef::new("80351110224678912")
        };
        let index = (80351110224678912u64 >> 22) % 6;
        assert_eq!(
            migrated.display_avatar_url(CDN, false),
            format!("https://cdn.discordapp.com/embed/avatars/{index}.png")
        );
    }

    #[test]
    fn test_banner_url() {
        assert_eq!(UserRef::new("1").banner_url(CDN, false), None);
        let user = UserRef {
            banner: Some("deadbeef".into()),
            ..UserRef::new("1")
        };
        assert_eq!(
            user.banner_url(CDN, false).as_deref(),
            Some("https://cdn.discordapp.com/banners/1/deadbeef.webp")
        );
    }
}

use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::{
    data::{ActivityKind, ActivityRef, FormattedAssets},
    FormatConf,
};
use crate::fetch::FetchJson;

pub fn format_activity_title(activity: &ActivityRef) -> Option<String> {
    let name = &activity.name;
    match activity.kind {
        ActivityKind::Playing => Some(format!("Playing {name}")),
        ActivityKind::Listening => Some(format!("Listening to {name}")),
        ActivityKind::Watching => Some(format!("Watching {name}")),
        ActivityKind::Competing => Some(format!("Competing in {name}")),
        ActivityKind::Streaming => Some(format!("Streaming {name}")),
        ActivityKind::Custom | ActivityKind::Unknown(_) => None,
    }
}

/// Prefix checks on an asset string, tried in slice order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetRule {
    Spotify,
    External,
    YouTube,
}

pub const LARGE_IMAGE_RULES: &[AssetRule] =
    &[AssetRule::Spotify, AssetRule::External, AssetRule::YouTube];
pub const SMALL_IMAGE_RULES: &[AssetRule] = &[AssetRule::External];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetSource<'a> {
    Spotify(&'a str),
    External(&'a str),
    YouTube(&'a str),
    App(&'a str),
}

impl AssetRule {
    fn matches<'a>(self, value: &'a str) -> Option<AssetSource<'a>> {
        match self {
            AssetRule::Spotify => value.strip_prefix("spotify:").map(AssetSource::Spotify),
            AssetRule::External => value
                .starts_with("mp:external")
                .then(|| AssetSource::External(nth_segment(value, "https/"))),
            AssetRule::YouTube => value
                .starts_with("youtube:")
                .then(|| AssetSource::YouTube(nth_segment(value, "youtube:"))),
        }
    }
}

// text between the first and second occurrence of `separator`
fn nth_segment<'a>(value: &'a str, separator: &str) -> &'a str {
    value.split(separator).nth(1).unwrap_or_default()
}

impl<'a> AssetSource<'a> {
    pub fn classify(value: &'a str, rules: &[AssetRule]) -> Self {
        rules
            .iter()
            .find_map(|rule| rule.matches(value))
            .unwrap_or(AssetSource::App(value))
    }

    pub fn url(self, conf: &FormatConf, application_id: Option<&str>) -> String {
        match self {
            AssetSource::Spotify(id) => format!("{}/{id}", conf.spotify),
            AssetSource::External(rest) => format!("https://{rest}"),
            AssetSource::YouTube(video) => format!("{}/{video}/hqdefault_live.jpg", conf.youtube),
            AssetSource::App(hash) => format!(
                "{}/app-assets/{}/{hash}.png?size={}",
                conf.cdn,
                application_id.unwrap_or_default(),
                conf.asset_size
            ),
        }
    }
}

fn asset_url(
    conf: &FormatConf,
    value: Option<&str>,
    rules: &[AssetRule],
    application_id: Option<&str>,
) -> Option<String> {
    value
        .filter(|value| !value.is_empty())
        .map(|value| AssetSource::classify(value, rules).url(conf, application_id))
}

pub async fn format_activity_assets(
    conf: &FormatConf,
    fetcher: &impl FetchJson,
    activity: &ActivityRef,
) -> FormattedAssets {
    let application_id = activity
        .application_id
        .as_deref()
        .filter(|id| !id.is_empty());

    if let Some(assets) = &activity.assets {
        return FormattedAssets {
            small_image: asset_url(
                conf,
                assets.small_image.as_deref(),
                SMALL_IMAGE_RULES,
                application_id,
            ),
            small_text: assets.small_text.clone(),
            large_image: asset_url(
                conf,
                assets.large_image.as_deref(),
                LARGE_IMAGE_RULES,
                application_id,
            ),
            large_text: assets.large_text.clone(),
        };
    }

    let large_image = match application_id {
        None => conf.unknown_game.clone(),
        Some(application_id) => application_icon(conf, fetcher, application_id)
            .await
            .unwrap_or_else(|| conf.unknown_game.clone()),
    };

    FormattedAssets {
        large_image: Some(large_image),
        ..Default::default()
    }
}

async fn application_icon(
    conf: &FormatConf,
    fetcher: &impl FetchJson,
    application_id: &str,
) -> Option<String> {
    let url = format!("{}/applications/{application_id}/rpc", conf.api);

    let payload = match fetcher.fetch_json(&url).await {
        Ok(payload) => payload,
        Err(error) => {
            warn!(application_id, %error, "rpc metadata unavailable");
            return None;
        }
    };

    let Some(icon) = payload
        .get("icon")
        .and_then(Value::as_str)
        .filter(|icon| !icon.is_empty())
    else {
        debug!(application_id, "rpc metadata has no icon");
        return None;
    };

    Some(format!(
        "{}/app-icons/{application_id}/{icon}.webp?size={}&keep_aspect_ratio=false",
        conf.cdn, conf.icon_size
    ))
}

/// Everything an embed needs to show one activity.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct ActivityCard {
    pub kind: ActivityKind,
    pub title: Option<String>,
    pub assets: FormattedAssets,
}

pub async fn activity_card(
    conf: &FormatConf,
    fetcher: &impl FetchJson,
    activity: &ActivityRef,
) -> ActivityCard {
    ActivityCard {
        kind: activity.kind,
        title: format_activity_title(activity),
        assets: format_activity_assets(conf, fetcher, activity).await,
    }
}

/// Formats every activity concurrently; output order follows `activities`.
pub async fn activity_cards(
    conf: &FormatConf,
    fetcher: &impl FetchJson,
    activities: &[ActivityRef],
) -> Vec<ActivityCard> {
    join_all(
        activities
            .iter()
            .map(|activity| activity_card(conf, fetcher, activity)),
    )
    .await
}

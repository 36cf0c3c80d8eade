use format::{
    activity::{self, ActivityCard},
    badges::{self, BadgeFlags},
    data::{ActivityRef, EmojiRef, FormattedAssets, UserRef},
    emoji, FormatConf,
};

pub mod common;
pub mod error;
pub mod fetch;
pub mod format;

pub use error::{FetchError, FormatError};
pub use fetch::{FetchJson, HttpFetcher};

/// Turns platform records into display strings. Holds no state besides its
/// config, so one instance can serve any number of concurrent calls.
#[derive(Debug, Clone)]
pub struct Formatter<F> {
    pub conf: FormatConf,
    fetcher: F,
}

impl Formatter<HttpFetcher> {
    pub fn http(conf: FormatConf) -> Result<Self, FetchError> {
        let fetcher = HttpFetcher::new(&conf)?;
        Ok(Self::new(conf, fetcher))
    }
}

impl<F: FetchJson> Formatter<F> {
    pub fn new(conf: FormatConf, fetcher: F) -> Self {
        Self { conf, fetcher }
    }

    pub fn emoji_url(&self, emoji: &EmojiRef) -> String {
        emoji::format_emoji_url(&self.conf, emoji)
    }

    pub fn activity_title(&self, activity: &ActivityRef) -> Option<String> {
        activity::format_activity_title(activity)
    }

    pub async fn activity_assets(&self, activity: &ActivityRef) -> FormattedAssets {
        activity::format_activity_assets(&self.conf, &self.fetcher, activity).await
    }

    pub async fn activity_card(&self, activity: &ActivityRef) -> ActivityCard {
        activity::activity_card(&self.conf, &self.fetcher, activity).await
    }

    pub async fn activity_cards(&self, activities: &[ActivityRef]) -> Vec<ActivityCard> {
        activity::activity_cards(&self.conf, &self.fetcher, activities).await
    }

    pub async fn user_badges(&self, badges: &BadgeFlags, user: &UserRef) -> Option<Vec<String>> {
        badges::format_user_badges(&self.conf, &self.fetcher, badges, user).await
    }
}

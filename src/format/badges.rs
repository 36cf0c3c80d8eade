use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{data::UserRef, FormatConf};
use crate::fetch::FetchJson;

pub const NITRO: &str = "Discord Nitro";

/// Flags that have a badge, and the label shown for them.
pub const BADGE_LABELS: &[(&str, &str)] = &[
    ("HypeSquadOnlineHouse1", "HypeSquad Bravery"),
    ("HypeSquadOnlineHouse2", "HypeSquad Brilliance"),
    ("HypeSquadOnlineHouse3", "HypeSquad Balance"),
    ("PremiumEarlySupporter", "Early Supporter"),
    ("VerifiedDeveloper", "Early Verified Bot Developer"),
    ("BugHunterLevel1", "Discord Bug Hunter_1"),
    ("BugHunterLevel2", "Discord Bug Hunter_2"),
    ("CertifiedModerator", "Discord Certified Moderator"),
    ("Staff", "Discord Staff"),
    ("Hypesquad", "HypeSquad Events"),
    ("Partner", "Partnered Server Owner"),
    ("ActiveDeveloper", "Active Developer"),
];

const FLAG_BITS: &[(&str, u32)] = &[
    ("Staff", 0),
    ("Partner", 1),
    ("Hypesquad", 2),
    ("BugHunterLevel1", 3),
    ("MFASMS", 4),
    ("PremiumPromoDismissed", 5),
    ("HypeSquadOnlineHouse1", 6),
    ("HypeSquadOnlineHouse2", 7),
    ("HypeSquadOnlineHouse3", 8),
    ("PremiumEarlySupporter", 9),
    ("TeamPseudoUser", 10),
    ("HasUnreadUrgentMessages", 13),
    ("BugHunterLevel2", 14),
    ("VerifiedBot", 16),
    ("VerifiedDeveloper", 17),
    ("CertifiedModerator", 18),
    ("BotHTTPInteractions", 19),
    ("Spammer", 20),
    ("DisablePremium", 21),
    ("ActiveDeveloper", 22),
    ("Quarantined", 44),
    ("Collaborator", 50),
    ("RestrictedCollaborator", 51),
];

/// A user's public flags bitfield.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(transparent)]
pub struct BadgeFlags(pub u64);

impl BadgeFlags {
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self(
            names
                .into_iter()
                .filter_map(|name| FLAG_BITS.iter().find(|(flag, _)| *flag == name))
                .fold(0, |bits, (_, bit)| bits | 1 << bit),
        )
    }

    pub fn contains(&self, name: &str) -> bool {
        self.iter().any(|flag| flag == name)
    }

    /// Names of the set flags, lowest bit first. Unnamed bits are skipped.
    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        FLAG_BITS
            .iter()
            .filter(|(_, bit)| self.0 & (1 << bit) != 0)
            .map(|(name, _)| *name)
    }
}

pub fn badge_label(flag: &str) -> Option<&'static str> {
    BADGE_LABELS
        .iter()
        .find(|(name, _)| *name == flag)
        .map(|(_, label)| *label)
}

pub async fn format_user_badges(
    conf: &FormatConf,
    fetcher: &impl FetchJson,
    badges: &BadgeFlags,
    user: &UserRef,
) -> Option<Vec<String>> {
    let mut labels: IndexSet<String> = badges
        .iter()
        .filter_map(badge_label)
        .map(String::from)
        .collect();

    if has_nitro(conf, fetcher, user).await {
        labels.insert(String::from(NITRO));
    }

    if labels.is_empty() {
        None
    } else {
        Some(labels.into_iter().collect())
    }
}

/// Animated avatar, or failing that a banner on the freshly fetched profile.
pub async fn has_nitro(conf: &FormatConf, fetcher: &impl FetchJson, user: &UserRef) -> bool {
    if user.display_avatar_url(&conf.cdn, false).ends_with(".gif") {
        return true;
    }

    let url = format!("{}/users/{}", conf.api, user.id);
    let fresh = match fetcher.fetch_json(&url).await {
        Ok(payload) => serde_json::from_value::<UserRef>(payload),
        Err(error) => {
            warn!(user = %user.id, %error, "profile refetch failed");
            return false;
        }
    };

    match fresh {
        Ok(fresh) => fresh.banner_url(&conf.cdn, false).is_some(),
        Err(error) => {
            warn!(user = %user.id, %error, "profile refetch returned an unexpected shape");
            false
        }
    }
}

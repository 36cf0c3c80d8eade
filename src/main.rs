use presence_fmt::{
    common::{lte, render_badges, render_card},
    format::{
        badges::BadgeFlags,
        data::{ActivityRef, EmojiRef, UserRef},
        FormatConf,
    },
    FormatError, Formatter,
};
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

const CONF_PATH: &str = "config/format.toml";

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct PreviewInput {
    activities: Vec<ActivityRef>,
    emojis: Vec<EmojiRef>,
    user: Option<UserRef>,
    flags: BadgeFlags,
}

#[tokio::main]
async fn main() -> Result<(), FormatError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::args()
        .nth(1)
        .ok_or_else(|| FormatError::Usage(String::from("usage: presence-fmt <input.json>")))?;

    let conf = FormatConf::load_or_default(CONF_PATH)?;
    let input: PreviewInput = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    info!(
        activities = input.activities.len(),
        emojis = input.emojis.len(),
        "formatting {path}"
    );

    let formatter = Formatter::http(conf)?;

    for card in formatter.activity_cards(&input.activities).await {
        println!("{}\n", render_card(&card));
    }

    for emoji in &input.emojis {
        println!("{}", lte(&formatter.emoji_url(emoji)));
    }

    if let Some(user) = &input.user {
        let badges = formatter.user_badges(&input.flags, user).await;
        println!("{}", render_badges(badges.as_deref()));
    }

    Ok(())
}

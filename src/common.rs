use crate::format::{activity::ActivityCard, data::ActivityKind};

// Simple markdown formating
pub fn md_fmt(message: &str, icon: Icon) -> String {
    let icon = icon.e();

    format!("{icon} **{message}**")
}

// Shortcodes shown in front of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Game,
    Music,
    Badge,
    Nitro,
    None,
}

impl Icon {
    pub fn e(self) -> &'static str {
        match self {
            Icon::Game => ":video_game:",
            Icon::Music => ":notes:",
            Icon::Badge => ":medal:",
            Icon::Nitro => ":gem:",
            Icon::None => ":grey_question:",
        }
    }
}

// hidden link, the client still embeds the image
pub fn lte(input: &str) -> String {
    format!("[]({input})")
}

pub fn render_card(card: &ActivityCard) -> String {
    let mut lines = Vec::new();

    if let Some(title) = &card.title {
        let icon = match card.kind {
            ActivityKind::Listening => Icon::Music,
            _ => Icon::Game,
        };
        lines.push(md_fmt(title, icon));
    }

    let assets = &card.assets;
    lines.extend(assets.large_text.iter().cloned());
    lines.extend(assets.small_text.iter().cloned());
    lines.extend(assets.large_image.iter().map(|url| lte(url)));
    lines.extend(assets.small_image.iter().map(|url| lte(url)));

    lines.join("\n")
}

pub fn render_badges(badges: Option<&[String]>) -> String {
    match badges {
        None => md_fmt("No badges", Icon::None),
        Some(badges) => badges
            .iter()
            .map(|badge| {
                let icon = if badge == crate::format::badges::NITRO {
                    Icon::Nitro
                } else {
                    Icon::Badge
                };
                md_fmt(badge, icon)
            })
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

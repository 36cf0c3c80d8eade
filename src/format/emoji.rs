use super::{data::EmojiRef, FormatConf};

pub fn format_emoji_url(conf: &FormatConf, emoji: &EmojiRef) -> String {
    match emoji.id.as_deref().filter(|id| !id.is_empty()) {
        None => format!(
            "{}/{}.svg",
            conf.twemoji,
            emoji_codepoint(emoji.name.as_deref().unwrap_or_default())
        ),
        Some(id) => format!(
            "{}/emojis/{id}.{}?size={}&quality=lossless",
            conf.cdn,
            if emoji.animated { "gif" } else { "png" },
            conf.emoji_size
        ),
    }
}

/// Lowercase hex of the first code point, read from the utf-16 encoding of `name`.
/// Only the leading pair of units is looked at, anything else is ignored.
pub fn emoji_codepoint(name: &str) -> String {
    let mut units = name.encode_utf16();

    let Some(first) = units.next() else {
        return String::new();
    };
    match units.next() {
        Some(second)
            if (0xD800..=0xDBFF).contains(&first) && (0xDC00..=0xDFFF).contains(&second) =>
        {
            let codepoint =
                (first as u32 - 0xD800) * 0x400 + (second as u32 - 0xDC00) + 0x10000;
            format!("{codepoint:x}")
        }
        _ => format!("{first:x}"),
    }
}

/// Hostname extraction and group label inference for Tabby
use crate::error::TabbyError;
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Hostname segments that carry no naming information
pub const HOST_STOPLIST: [&str; 5] = ["www", "com", "org", "net", "edu"];

/// Title words never used as a group label (compared lowercase)
pub const TITLE_STOPWORDS: [&str; 8] = ["the", "and", "or", "of", "in", "on", "at", "to"];

static TITLE_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s-]+").expect("title separator pattern is valid"));

/// Extract the hostname from an absolute URL
///
/// URLs without a host (`about:blank`, `file:///...`) yield an empty hostname.
pub fn extract_hostname(url: &str) -> Result<String, TabbyError> {
    let parsed = Url::parse(url).map_err(|source| TabbyError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;

    Ok(parsed.host_str().unwrap_or_default().to_string())
}

/// Derive a short human-readable group label from a tab's URL and title
///
/// Algorithm:
/// 1. Split the hostname on "." and drop stoplisted parts ("www", "com", ...)
/// 2. Split the title on whitespace/hyphen runs, keeping words longer than one
///    UTF-16 unit that are not English stopwords
/// 3. For each remaining hostname part, in order, return the first title word
///    that contains it (case-insensitive), with the word's original casing
/// 4. Otherwise return the first hostname part capitalized
/// 5. If every hostname part was stoplisted, return the raw hostname
///
/// Examples:
/// - https://github.com/foo + "GitHub - foo" → GitHub
/// - https://news.bbc.co.uk + "BBC News - Home" → News
/// - https://sub.example.co.uk + "Nothing here" → Sub
/// - https://www.com → www.com
pub fn resolve_group_label(url: &str, title: &str) -> Result<String, TabbyError> {
    let hostname = extract_hostname(url)?;

    let clean_parts: Vec<&str> = hostname
        .split('.')
        .filter(|part| !HOST_STOPLIST.contains(part))
        .collect();

    let candidate_words: Vec<&str> = TITLE_SEPARATOR
        .split(title)
        .filter(|word| {
            word.encode_utf16().count() > 1 && !TITLE_STOPWORDS.contains(&word.to_lowercase().as_str())
        })
        .collect();

    for part in &clean_parts {
        let part = part.to_lowercase();
        if let Some(word) = candidate_words
            .iter()
            .find(|word| word.to_lowercase().contains(&part))
        {
            return Ok(word.to_string());
        }
    }

    Ok(match clean_parts.first() {
        Some(first) => capitalize(first),
        None => hostname,
    })
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

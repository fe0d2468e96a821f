//! Navigation targets (`#/deputes?q=x`) to matchable paths.

/// Path part of a navigation target.
///
/// Drops a leading `#` and any `?query`; an empty remainder is the root `/`.
#[must_use]
pub fn path_of(target: &str) -> String {
    let target = target.trim();
    let without_hash = target.strip_prefix('#').unwrap_or(target);
    let path = without_hash
        .split_once('?')
        .map_or(without_hash, |(path, _)| path);

    if path.is_empty() {
        "/".to_string()
    } else {
        path.to_string()
    }
}

/// Decoded `key=value` pairs of the target's query string, in order.
///
/// `+` reads as a space; undecodable values are kept verbatim.
#[must_use]
pub fn query_of(target: &str) -> Vec<(String, String)> {
    let Some((_, query)) = target.trim().split_once('?') else {
        return Vec::new();
    };

    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode(key), decode(value))
        })
        .collect()
}

fn decode(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced).map_or_else(|_| spaced.clone(), |s| s.into_owned())
}

/// Whether a navigation link pointing at `link` is active on `path`.
///
/// Exact matches are always active; a non-root link is also active for every
/// path under it.
#[must_use]
pub fn is_link_active(link: &str, path: &str) -> bool {
    let link = path_of(link);
    link == path || (link != "/" && path.starts_with(&link))
}

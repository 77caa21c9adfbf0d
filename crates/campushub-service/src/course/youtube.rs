//! Video link normalization for the embedded player.

const EMBED_BASE: &str = "https://www.youtube.com/embed/";

/// Turn a watch link, short link, or embed link into an embeddable URL.
///
/// Links that already contain `embed` are returned unchanged. Otherwise the
/// video id is the `v` query parameter, or failing that the last path
/// segment without its query string. Blank input yields `None`.
pub fn to_embed_url(url: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }
    if url.contains("embed") {
        return Some(url.to_string());
    }
    let id = watch_param(url).or_else(|| last_segment(url))?;
    Some(format!("{EMBED_BASE}{id}"))
}

fn watch_param(url: &str) -> Option<&str> {
    let start = url.find("v=")? + 2;
    let rest = &url[start..];
    let id = rest.split('&').next().unwrap_or_default();
    (!id.is_empty()).then_some(id)
}

fn last_segment(url: &str) -> Option<&str> {
    let segment = url.rsplit('/').next()?;
    let id = segment.split(['?', '#']).next().unwrap_or_default();
    (!id.is_empty()).then_some(id)
}

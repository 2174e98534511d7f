/// Parse a newline-delimited URL list: lines are trimmed, blank lines dropped,
/// order preserved.
pub fn parse_url_list(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

/// Render URLs in the list file format: one per line, each followed by `\n`.
pub fn render_url_list<S: AsRef<str>>(urls: &[S]) -> String {
    let mut out = String::with_capacity(urls.iter().map(|u| u.as_ref().len() + 1).sum());
    for url in urls {
        out.push_str(url.as_ref());
        out.push('\n');
    }
    out
}

/// Longest stem kept from a title, in characters.
pub const MAX_STEM_CHARS: usize = 50;

const FALLBACK_STEM: &str = "untitled";

/// Filename for a document title: `{stem}.md`.
///
/// The stem keeps alphanumeric characters, spaces, hyphens and underscores,
/// trims surrounding whitespace and is cut to [`MAX_STEM_CHARS`]. Distinct
/// titles can map to the same name; the later write wins.
pub fn markdown_filename(title: &str) -> String {
    let kept: String = title.chars().filter(|c| is_kept(*c)).collect();
    let stem: String = kept.trim().chars().take(MAX_STEM_CHARS).collect();
    if stem.is_empty() {
        format!("{FALLBACK_STEM}.md")
    } else {
        format!("{stem}.md")
    }
}

fn is_kept(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, ' ' | '-' | '_')
}

use scraper::ElementRef;
use url::Url;

/// Element kinds the transcoder visits. Everything else is walked through silently.
pub const TRANSCODED_KINDS: &[&str] = &[
    "h1", "h2", "h3", "h4", "h5", "h6", "p", "ul", "ol", "li", "a", "img", "pre", "code",
];

/// Convert the content root into markdown.
///
/// Every descendant element of a transcoded kind is visited in document order,
/// however deeply it is nested. The walk is flat: an anchor inside a paragraph
/// contributes its text to the paragraph line and is emitted again as its own
/// link line. `li` elements produce nothing on their own; their list emits
/// its direct items, so items of nested lists appear under the nested list only.
pub fn transcode(root: ElementRef<'_>, base_url: &Url) -> String {
    let mut out = MarkdownBuilder::default();

    for element in root.descendants().skip(1).filter_map(ElementRef::wrap) {
        let name = element.value().name();
        if !TRANSCODED_KINDS.contains(&name) {
            continue;
        }
        match name {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                let level = heading_level(name);
                out.block(&format!("{} {}", "#".repeat(level), element_text(element)));
            }
            "p" => out.block(&element_text(element)),
            "a" => match element.value().attr("href").filter(|href| !href.is_empty()) {
                Some(href) => out.line(&format!(
                    "[{}]({})",
                    element_text(element),
                    resolve_reference(href, base_url)
                )),
                None => out.line(&element_text(element)),
            },
            "img" => {
                let src = element
                    .value()
                    .attr("src")
                    .filter(|src| !src.is_empty())
                    .map(|src| resolve_reference(src, base_url))
                    .unwrap_or_default();
                let alt = element.value().attr("alt").unwrap_or_default();
                out.line(&format!("![{alt}]({src})"));
            }
            "ul" | "ol" => {
                for item in direct_list_items(element) {
                    out.line(&format!("* {}", element_text(item)));
                }
                out.blank();
            }
            "pre" | "code" => {
                let code = element_text(element);
                if !code.is_empty() {
                    out.block(&format!("```\n{code}\n```"));
                }
            }
            _ => {}
        }
    }

    out.finish()
}

/// Resolve an `href`/`src` against the page URL. Values that already start
/// with `http://` or `https://` are kept as written; values that cannot be
/// joined are kept verbatim.
pub fn resolve_reference(reference: &str, base: &Url) -> String {
    if reference.starts_with("http://") || reference.starts_with("https://") {
        return reference.to_string();
    }
    base.join(reference)
        .map(String::from)
        .unwrap_or_else(|_| reference.to_string())
}

fn heading_level(name: &str) -> usize {
    name[1..].parse().unwrap_or(1)
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn direct_list_items(list: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    list.children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == "li")
}

#[derive(Default)]
struct MarkdownBuilder {
    buf: String,
}

impl MarkdownBuilder {
    /// Fragment followed by a blank line.
    fn block(&mut self, text: &str) {
        self.buf.push_str(text);
        self.buf.push_str("\n\n");
    }

    /// Fragment followed by a single newline.
    fn line(&mut self, text: &str) {
        self.buf.push_str(text);
        self.buf.push('\n');
    }

    fn blank(&mut self) {
        self.buf.push('\n');
    }

    fn finish(self) -> String {
        self.buf.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/guide/intro").unwrap()
    }

    #[test]
    fn absolute_references_are_kept_verbatim() {
        assert_eq!(
            resolve_reference("https://cdn.example.org/a b.png", &base()),
            "https://cdn.example.org/a b.png"
        );
    }

    #[test]
    fn relative_references_follow_url_join_rules() {
        assert_eq!(resolve_reference("setup", &base()), "https://example.com/guide/setup");
        assert_eq!(resolve_reference("../faq", &base()), "https://example.com/faq");
        assert_eq!(
            resolve_reference("//mirror.example.net/x", &base()),
            "https://mirror.example.net/x"
        );
        assert_eq!(
            resolve_reference("#top", &base()),
            "https://example.com/guide/intro#top"
        );
        assert_eq!(
            resolve_reference("mailto:team@example.com", &base()),
            "mailto:team@example.com"
        );
    }

    #[test]
    fn heading_levels_come_from_tag_name() {
        assert_eq!(heading_level("h1"), 1);
        assert_eq!(heading_level("h6"), 6);
    }
}

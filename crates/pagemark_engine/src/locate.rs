use scraper::{ElementRef, Html, Selector};

/// Element kinds that never hold page content.
pub const NOISE_KINDS: &[&str] = &["script", "style", "iframe", "nav", "footer"];

/// Element kinds that may be picked as the content root.
pub const CANDIDATE_KINDS: &[&str] = &["article", "main", "div"];

/// Substrings of a class or id that mark a likely content container.
pub const CONTENT_KEYWORDS: &[&str] = &["content", "article", "main", "post", "docs"];

/// True when `attr` (a class or id value) contains any content keyword,
/// ignoring case.
pub fn is_content_hint(attr: &str) -> bool {
    let lower = attr.to_lowercase();
    CONTENT_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}

/// Detach every noise element from the tree. Returns how many were removed.
pub fn strip_noise(document: &mut Html) -> usize {
    let noise: Vec<ego_tree::NodeId> = document
        .tree
        .nodes()
        .filter(|node| {
            node.value()
                .as_element()
                .is_some_and(|el| NOISE_KINDS.contains(&el.name()))
        })
        .map(|node| node.id())
        .collect();

    let mut removed = 0;
    for id in noise {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
            removed += 1;
        }
    }
    removed
}

/// Pick the content root: the first `article`/`main`/`div` in document order
/// whose class or id carries a content keyword, else `<body>`.
///
/// `None` means the document has no locatable content. Call [`strip_noise`]
/// first; this only reads the tree.
pub fn locate_content(document: &Html) -> Option<ElementRef<'_>> {
    document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|element| is_candidate(*element))
        .or_else(|| find_first(document, "body"))
}

fn is_candidate(element: ElementRef<'_>) -> bool {
    let value = element.value();
    if !CANDIDATE_KINDS.contains(&value.name()) {
        return false;
    }
    ["class", "id"]
        .iter()
        .filter_map(|attr| value.attr(attr))
        .any(is_content_hint)
}

/// Text of the first `<title>`, trimmed. Blank titles count as missing.
pub fn page_title(document: &Html) -> Option<String> {
    find_first(document, "title")
        .map(|t| t.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
}

fn find_first<'a>(document: &'a Html, selector: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(selector).ok()?;
    document.select(&selector).next()
}

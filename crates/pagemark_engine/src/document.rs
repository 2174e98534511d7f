use pagemark_core::PageDocument;

/// Build the output record. A missing or blank title falls back to the URL.
pub fn assemble(url: &str, title: Option<&str>, content: String) -> PageDocument {
    let title = title
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(url);
    PageDocument::new(url, title, content)
}

/// On-disk markdown form: title heading, source line, rule, body.
pub fn render_markdown(doc: &PageDocument) -> String {
    format!(
        "# {title}\n\nSource: {url}\n\n---\n\n{content}",
        title = doc.title,
        url = doc.url,
        content = doc.content,
    )
}

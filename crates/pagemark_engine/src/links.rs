use std::collections::BTreeSet;

use scraper::{Html, Selector};
use url::Url;

use crate::transcode::resolve_reference;

/// Collect every anchor on the page whose host matches the page's host,
/// ignoring one leading `www.` on either side. Sorted, deduplicated.
///
/// Relative hrefs are resolved against `page_url`; absolute ones are kept as
/// written, so two spellings of one URL stay distinct. Hrefs without a host
/// (`mailto:`, `javascript:`) never match. No public-suffix logic is applied:
/// `blog.example.com` and `example.com` are different hosts.
pub fn same_domain_links(document: &Html, page_url: &Url) -> Vec<String> {
    let Some(page_host) = registrable_host(page_url) else {
        return Vec::new();
    };
    let Ok(anchors) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let mut found = BTreeSet::new();
    for anchor in document.select(&anchors) {
        let Some(href) = anchor.value().attr("href").filter(|h| !h.is_empty()) else {
            continue;
        };
        let resolved = resolve_reference(href, page_url);
        let Ok(candidate) = Url::parse(&resolved) else {
            continue;
        };
        if registrable_host(&candidate).as_deref() == Some(page_host.as_str()) {
            found.insert(resolved);
        }
    }
    found.into_iter().collect()
}

/// Host plus explicit port, without one leading `www.`.
pub fn registrable_host(url: &Url) -> Option<String> {
    let host = url.host_str().filter(|h| !h.is_empty())?;
    let host = host.strip_prefix("www.").unwrap_or(host);
    Some(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

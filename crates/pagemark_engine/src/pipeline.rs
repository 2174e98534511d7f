use std::path::Path;

use pagemark_core::{BatchReport, PageDocument};
use pagemark_logging::{scrape_debug, scrape_info, scrape_warn};
use scraper::Html;
use url::Url;

use crate::decode::decode_html;
use crate::document::assemble;
use crate::fetch::Fetcher;
use crate::links::same_domain_links;
use crate::locate::{locate_content, page_title, strip_noise};
use crate::persist::load_url_list;
use crate::transcode::transcode;
use crate::{InputError, ScrapeError, ScrapeEvent};

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: ScrapeEvent);
}

/// Sink that only forwards events to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgressSink;

impl ProgressSink for LogProgressSink {
    fn emit(&self, event: ScrapeEvent) {
        match event {
            ScrapeEvent::Started { index, total, url } => {
                scrape_info!("URL {}/{}: {}", index + 1, total, url)
            }
            ScrapeEvent::Succeeded {
                url, content_chars, ..
            } => scrape_info!("Processed {} ({} chars)", url, content_chars),
            ScrapeEvent::Failed { url, reason, .. } => {
                scrape_warn!("Failed to process {}: {}", url, reason)
            }
        }
    }
}

/// Turn decoded HTML into a document: title, noise removal, content location,
/// transcoding. Relative links resolve against `url`, which is also the
/// record's URL exactly as given.
pub fn extract_page(url: &str, html: &str) -> Result<PageDocument, ScrapeError> {
    let page_url = parse_page_url(url)?;
    let mut document = Html::parse_document(html);
    let title = page_title(&document);
    let removed = strip_noise(&mut document);
    scrape_debug!("Removed {} noise elements from {}", removed, url);

    let content = match locate_content(&document) {
        Some(root) => transcode(root, &page_url),
        None => {
            scrape_debug!("No content root in {}", url);
            String::new()
        }
    };
    Ok(assemble(url, title.as_deref(), content))
}

fn parse_page_url(url: &str) -> Result<Url, ScrapeError> {
    Url::parse(url).map_err(|err| ScrapeError::InvalidUrl {
        url: url.to_string(),
        message: err.to_string(),
    })
}

/// Sequential scraper: one URL at a time, in input order.
pub struct Scraper<F: Fetcher> {
    fetcher: F,
}

impl<F: Fetcher> Scraper<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Fetch and decode a page.
    async fn load(&self, url: &str) -> Result<String, ScrapeError> {
        let output = self.fetcher.fetch(url).await?;
        let metadata = &output.metadata;
        if metadata.redirected() {
            scrape_info!(
                "{} redirected to {}",
                metadata.original_url,
                metadata.final_url
            );
        }
        scrape_debug!("Fetched {} bytes from {}", metadata.byte_len, metadata.final_url);
        let decoded = decode_html(&output.bytes, output.metadata.content_type.as_deref());
        if decoded.had_replacements {
            scrape_warn!(
                "{} decoded as {} with replacement characters",
                url,
                decoded.encoding_label
            );
        }
        if decoded.html.trim().is_empty() {
            return Err(ScrapeError::EmptyDocument(url.to_string()));
        }
        Ok(decoded.html)
    }

    /// Scrape one URL into a document.
    pub async fn scrape(&self, url: &str) -> Result<PageDocument, ScrapeError> {
        parse_page_url(url)?;
        let html = self.load(url).await?;
        extract_page(url, &html)
    }

    /// Scrape every URL in order. Failures are recorded and never stop the batch.
    pub async fn scrape_all(&self, urls: &[String], sink: &dyn ProgressSink) -> BatchReport {
        let total = urls.len();
        let mut report = BatchReport::new();
        for (index, url) in urls.iter().enumerate() {
            sink.emit(ScrapeEvent::Started {
                index,
                total,
                url: url.clone(),
            });
            match self.scrape(url).await {
                Ok(doc) => {
                    sink.emit(ScrapeEvent::Succeeded {
                        index,
                        url: url.clone(),
                        content_chars: doc.content.chars().count(),
                    });
                    report.record_success(doc);
                }
                Err(err) => {
                    let reason = err.to_string();
                    sink.emit(ScrapeEvent::Failed {
                        index,
                        url: url.clone(),
                        reason: reason.clone(),
                    });
                    report.record_failure(url.clone(), reason);
                }
            }
        }
        report
    }

    /// Scrape every URL listed in a file. Only an unusable file is an error.
    pub async fn scrape_url_file(
        &self,
        path: &Path,
        sink: &dyn ProgressSink,
    ) -> Result<BatchReport, InputError> {
        let urls = load_url_list(path)?;
        scrape_info!("Processing {} URLs from {}", urls.len(), path.display());
        Ok(self.scrape_all(&urls, sink).await)
    }

    /// Same-domain links of a page, over the full page (noise included).
    pub async fn find_same_domain_urls(&self, url: &str) -> Result<Vec<String>, ScrapeError> {
        let page_url = parse_page_url(url)?;
        let html = self.load(url).await?;
        let document = Html::parse_document(&html);
        Ok(same_domain_links(&document, &page_url))
    }
}

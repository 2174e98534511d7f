use crate::PageDocument;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedUrl {
    pub url: String,
    pub reason: String,
}

/// Outcome of processing a list of URLs one after another.
///
/// Successes and failures are kept in input order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BatchReport {
    pub documents: Vec<PageDocument>,
    pub failed: Vec<FailedUrl>,
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&mut self, document: PageDocument) {
        self.documents.push(document);
    }

    pub fn record_failure(&mut self, url: impl Into<String>, reason: impl Into<String>) {
        self.failed.push(FailedUrl {
            url: url.into(),
            reason: reason.into(),
        });
    }

    pub fn total(&self) -> usize {
        self.documents.len() + self.failed.len()
    }

    pub fn failed_urls(&self) -> Vec<&str> {
        self.failed.iter().map(|f| f.url.as_str()).collect()
    }

    /// Sum of the markdown body lengths, in characters.
    pub fn total_content_chars(&self) -> usize {
        self.documents
            .iter()
            .map(|doc| doc.content.chars().count())
            .sum()
    }

    /// Human-readable end-of-batch summary. Failed URLs are enumerated, not just counted.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.failed.len() + 2);
        if !self.failed.is_empty() {
            lines.push(format!("Failed to process {} URLs:", self.failed.len()));
            for failure in &self.failed {
                lines.push(format!("- {} ({})", failure.url, failure.reason));
            }
        }
        lines.push(format!(
            "Successfully processed {}/{} URLs.",
            self.documents.len(),
            self.total()
        ));
        lines
    }
}

use serde::{Deserialize, Serialize};

/// A scraped page: its fetch URL, resolved title and transcoded markdown body.
///
/// `content` only ever holds transcoder output, never raw markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageDocument {
    pub url: String,
    pub title: String,
    pub content: String,
}

impl PageDocument {
    pub fn new(url: impl Into<String>, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            content: content.into(),
        }
    }

    pub fn has_content(&self) -> bool {
        !self.content.is_empty()
    }
}

//! Markdown chunking for the retrieval collaborator.
//!
//! Documents are cut into overlapping chunks before they are handed to a
//! [`KnowledgeSink`]. Cuts prefer markdown structure: headings first, then
//! fences and rules, then blank lines, lines, words, and finally characters.
use std::collections::VecDeque;

use pagemark_core::PageDocument;
use pagemark_logging::{scrape_debug, scrape_info};

/// Separators tried in order. Each split keeps the separator at the start of
/// the following piece so headings stay attached to their section.
const MARKDOWN_SEPARATORS: &[&str] = &[
    "\n# ",
    "\n## ",
    "\n### ",
    "\n#### ",
    "\n##### ",
    "\n###### ",
    "```\n",
    "\n---\n",
    "\n\n",
    "\n",
    " ",
    "",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkSettings {
    /// Upper bound on chunk length, in characters.
    pub chunk_size: usize,
    /// Characters carried over from the end of one chunk into the next.
    pub chunk_overlap: usize,
}

impl Default for ChunkSettings {
    fn default() -> Self {
        Self {
            chunk_size: 500,
            chunk_overlap: 50,
        }
    }
}

/// A slice of a document's markdown plus the metadata the retriever cites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentChunk {
    pub text: String,
    pub source: String,
    pub title: String,
}

#[derive(Debug, thiserror::Error)]
pub enum KnowledgeError {
    #[error("knowledge service unavailable: {0}")]
    Unavailable(String),
    #[error("no documents have been ingested yet")]
    NothingIngested,
}

/// External retrieval + generation service.
///
/// Accepts clean markdown chunks and answers natural-language questions over
/// everything ingested so far.
#[async_trait::async_trait]
pub trait KnowledgeSink: Send + Sync {
    async fn add_chunks(&self, chunks: Vec<DocumentChunk>) -> Result<(), KnowledgeError>;

    async fn answer(&self, question: &str) -> Result<String, KnowledgeError>;
}

/// Split a document's content into chunks tagged with its URL and title.
pub fn chunk_document(doc: &PageDocument, settings: ChunkSettings) -> Vec<DocumentChunk> {
    split_markdown(&doc.content, settings)
        .into_iter()
        .map(|text| DocumentChunk {
            text,
            source: doc.url.clone(),
            title: doc.title.clone(),
        })
        .collect()
}

/// Chunk a document and hand it to the sink. Returns the number of chunks;
/// documents without content are skipped and yield 0.
pub async fn ingest_document(
    sink: &dyn KnowledgeSink,
    doc: &PageDocument,
    settings: ChunkSettings,
) -> Result<usize, KnowledgeError> {
    let chunks = chunk_document(doc, settings);
    if chunks.is_empty() {
        scrape_info!("No chunks produced for {}; skipping ingestion", doc.url);
        return Ok(0);
    }
    let count = chunks.len();
    sink.add_chunks(chunks).await?;
    scrape_debug!("Ingested {} chunks from {}", count, doc.url);
    Ok(count)
}

/// Split markdown into trimmed, non-empty chunks of at most `chunk_size`
/// characters, consecutive chunks sharing up to `chunk_overlap` characters.
pub fn split_markdown(text: &str, settings: ChunkSettings) -> Vec<String> {
    let settings = ChunkSettings {
        chunk_size: settings.chunk_size.max(1),
        chunk_overlap: settings.chunk_overlap.min(settings.chunk_size.saturating_sub(1)),
    };
    split_with(text, MARKDOWN_SEPARATORS, settings)
}

fn split_with(text: &str, separators: &[&str], settings: ChunkSettings) -> Vec<String> {
    let position = separators
        .iter()
        .position(|sep| sep.is_empty() || text.contains(sep))
        .unwrap_or(separators.len().saturating_sub(1));
    let separator = separators.get(position).copied().unwrap_or("");
    let finer = separators.get(position + 1..).unwrap_or(&[]);

    let mut chunks = Vec::new();
    let mut pending: Vec<String> = Vec::new();
    for piece in split_keeping_separator(text, separator) {
        if char_len(&piece) < settings.chunk_size {
            pending.push(piece);
            continue;
        }
        if !pending.is_empty() {
            chunks.extend(merge_pieces(std::mem::take(&mut pending), settings));
        }
        if finer.is_empty() {
            let trimmed = piece.trim();
            if !trimmed.is_empty() {
                chunks.push(trimmed.to_string());
            }
        } else {
            chunks.extend(split_with(&piece, finer, settings));
        }
    }
    if !pending.is_empty() {
        chunks.extend(merge_pieces(pending, settings));
    }
    chunks
}

fn split_keeping_separator(text: &str, separator: &str) -> Vec<String> {
    if separator.is_empty() {
        return text.chars().map(String::from).collect();
    }
    let mut pieces = Vec::new();
    let mut start = 0;
    for (index, _) in text.match_indices(separator) {
        if index > start {
            pieces.push(text[start..index].to_string());
        }
        start = index;
    }
    if start < text.len() {
        pieces.push(text[start..].to_string());
    }
    pieces
}

/// Greedily pack small pieces into chunks, keeping a tail of the previous
/// chunk (at most `chunk_overlap` characters) at the start of the next one.
fn merge_pieces(pieces: Vec<String>, settings: ChunkSettings) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut window: VecDeque<String> = VecDeque::new();
    let mut window_len = 0usize;

    for piece in pieces {
        let piece_len = char_len(&piece);
        if window_len + piece_len > settings.chunk_size && !window.is_empty() {
            push_trimmed(&mut chunks, &window);
            while window_len > settings.chunk_overlap
                || (window_len + piece_len > settings.chunk_size && window_len > 0)
            {
                match window.pop_front() {
                    Some(front) => window_len -= char_len(&front),
                    None => break,
                }
            }
        }
        window_len += piece_len;
        window.push_back(piece);
    }
    push_trimmed(&mut chunks, &window);
    chunks
}

fn push_trimmed(chunks: &mut Vec<String>, window: &VecDeque<String>) {
    let joined: String = window.iter().map(String::as_str).collect();
    let trimmed = joined.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

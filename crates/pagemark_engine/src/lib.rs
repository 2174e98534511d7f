//! Pagemark engine: fetching, content extraction and markdown output.
mod chunk;
mod decode;
mod document;
mod fetch;
mod filename;
mod links;
mod locate;
mod persist;
mod pipeline;
mod transcode;
mod types;

pub use chunk::{
    chunk_document, ingest_document, split_markdown, ChunkSettings, DocumentChunk,
    KnowledgeError, KnowledgeSink,
};
pub use decode::{decode_html, detect_encoding, DecodedHtml};
pub use document::{assemble, render_markdown};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher, BROWSER_USER_AGENT};
pub use filename::{markdown_filename, MAX_STEM_CHARS};
pub use links::{registrable_host, same_domain_links};
pub use locate::{
    is_content_hint, locate_content, page_title, strip_noise, CANDIDATE_KINDS, CONTENT_KEYWORDS,
    NOISE_KINDS,
};
pub use persist::{
    ensure_output_dir, load_url_list, persist_document, save_url_list, AtomicFileWriter,
    PersistError,
};
pub use pipeline::{extract_page, LogProgressSink, ProgressSink, Scraper};
pub use transcode::{resolve_reference, transcode, TRANSCODED_KINDS};
pub use types::{
    FailureKind, FetchError, FetchMetadata, FetchOutput, InputError, ScrapeError, ScrapeEvent,
};

pub use pagemark_core::{BatchReport, FailedUrl, PageDocument};

//! Pagemark core: pure data model and batch bookkeeping, free of IO.
mod batch;
mod document;
mod url_list;

pub use batch::{BatchReport, FailedUrl};
pub use document::PageDocument;
pub use url_list::{parse_url_list, render_url_list};

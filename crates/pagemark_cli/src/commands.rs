use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use pagemark_core::{BatchReport, PageDocument};
use pagemark_engine::{
    persist_document, render_markdown, save_url_list, Fetcher, ProgressSink, ScrapeEvent, Scraper,
};
use pagemark_logging::{scrape_error, scrape_info};

use crate::cli::{OutputArgs, OutputMode};

/// Printed between documents when several are written to stdout.
pub fn document_separator() -> String {
    format!("\n\n{}\n\n", "=".repeat(80))
}

/// Prints per-URL progress of a batch to stdout.
pub struct ConsoleProgressSink;

impl ProgressSink for ConsoleProgressSink {
    fn emit(&self, event: ScrapeEvent) {
        match event {
            ScrapeEvent::Started { index, total, url } => {
                println!("\nURL {}/{}: {}", index + 1, total, url)
            }
            ScrapeEvent::Succeeded { .. } => println!("Successfully processed."),
            ScrapeEvent::Failed { reason, .. } => println!("Failed to process content: {reason}"),
        }
    }
}

pub async fn run_single<F: Fetcher>(
    scraper: &Scraper<F>,
    url: &str,
    output: &OutputArgs,
) -> anyhow::Result<ExitCode> {
    let doc = match scraper.scrape(url).await {
        Ok(doc) => doc,
        Err(err) => {
            scrape_error!("Failed to scrape {}: {}", url, err);
            eprintln!("Failed to scrape URL: {err}");
            return Ok(ExitCode::FAILURE);
        }
    };

    let mut stdout = std::io::stdout().lock();
    match output.mode() {
        OutputMode::Directory(dir) => {
            let path = persist_document(&doc, &dir)
                .with_context(|| format!("failed to save content for {}", doc.url))?;
            println!("Content saved to: {}", path.display());
        }
        OutputMode::Markdown => writeln!(stdout, "{}", render_markdown(&doc))?,
        OutputMode::Json => writeln!(stdout, "{}", serde_json::to_string(&doc)?)?,
    }
    Ok(ExitCode::SUCCESS)
}

pub async fn run_bulk<F: Fetcher>(
    scraper: &Scraper<F>,
    file: &Path,
    output: &OutputArgs,
) -> anyhow::Result<ExitCode> {
    let report = scraper
        .scrape_url_file(file, &ConsoleProgressSink)
        .await
        .context("cannot start bulk scrape")?;

    if report.documents.is_empty() {
        println!("No URLs were successfully scraped");
    } else {
        emit_documents(&report.documents, &output.mode(), &mut std::io::stdout().lock())?;
    }

    println!();
    for line in report.summary_lines() {
        println!("{line}");
    }
    Ok(if batch_succeeded(&report) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

pub async fn run_find<F: Fetcher>(
    scraper: &Scraper<F>,
    url: &str,
    output: &Path,
) -> anyhow::Result<ExitCode> {
    let urls = match scraper.find_same_domain_urls(url).await {
        Ok(urls) => urls,
        Err(err) => {
            scrape_error!("Failed to scan {}: {}", url, err);
            eprintln!("Failed to fetch page: {err}");
            return Ok(ExitCode::FAILURE);
        }
    };
    if urls.is_empty() {
        println!("No URLs found");
        return Ok(ExitCode::SUCCESS);
    }
    let path = save_url_list(&urls, output)
        .with_context(|| format!("failed to save URLs to {}", output.display()))?;
    println!("Found {} URLs, saved to: {}", urls.len(), path.display());
    Ok(ExitCode::SUCCESS)
}

/// Write or print a batch of documents. A document that cannot be saved is
/// reported and the rest are still written.
pub fn emit_documents(
    documents: &[PageDocument],
    mode: &OutputMode,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match mode {
        OutputMode::Directory(dir) => {
            for doc in documents {
                match persist_document(doc, dir) {
                    Ok(path) => writeln!(out, "Content saved to: {}", path.display())?,
                    Err(err) => {
                        scrape_error!("Failed to save {}: {}", doc.url, err);
                        writeln!(out, "Failed to save content for {}", doc.url)?;
                    }
                }
            }
            scrape_info!("Finished writing {} documents to {}", documents.len(), dir.display());
        }
        OutputMode::Markdown => {
            let rendered: Vec<String> = documents.iter().map(render_markdown).collect();
            writeln!(out, "{}", rendered.join(document_separator().as_str()))?;
            let total: usize = documents.iter().map(|d| d.content.chars().count()).sum();
            writeln!(out, "Total content length: {total} characters")?;
        }
        OutputMode::Json => {
            for doc in documents {
                writeln!(out, "{}", serde_json::to_string(doc)?)?;
            }
        }
    }
    Ok(())
}

/// A batch fails as a whole only when it had URLs and none of them worked.
fn batch_succeeded(report: &BatchReport) -> bool {
    report.total() == 0 || !report.documents.is_empty()
}

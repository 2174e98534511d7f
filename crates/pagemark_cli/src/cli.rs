use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use pagemark_engine::FetchSettings;

/// Output target that prints instead of writing files.
pub const LLM_OUTPUT: &str = "llm";

#[derive(Debug, Parser)]
#[command(name = "pagemark", version, about = "Fetch web pages as clean markdown")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Validate TLS certificates (off by default to reach misconfigured sites).
    #[arg(long, global = true, env = "PAGEMARK_VERIFY_TLS")]
    pub verify_tls: bool,

    /// Whole-request timeout in seconds.
    #[arg(long, global = true, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Log level: off, error, warn, info, debug, trace.
    #[arg(long, global = true, env = "PAGEMARK_LOG", default_value = "warn")]
    pub log_level: String,

    /// Also write logs to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scrape a single URL.
    Single {
        url: String,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Scrape every URL listed in a text file (one per line).
    Bulk {
        file: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Find same-domain URLs linked from a page.
    Find {
        url: String,
        /// File to write the found URLs to.
        #[arg(short, long, default_value = "found_urls.txt")]
        output: PathBuf,
    },
}

#[derive(Debug, Clone, Args)]
pub struct OutputArgs {
    /// Directory for markdown files, or "llm" to print to stdout.
    #[arg(short, long, default_value = "output")]
    pub output: String,

    /// Print the markdown instead of saving it.
    #[arg(long)]
    pub raw: bool,

    /// Print records as JSON lines instead of markdown (implies --raw).
    #[arg(long)]
    pub json: bool,
}

/// Where scraped documents go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    Directory(PathBuf),
    Markdown,
    Json,
}

impl OutputArgs {
    pub fn mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else if self.raw || self.output == LLM_OUTPUT {
            OutputMode::Markdown
        } else {
            OutputMode::Directory(PathBuf::from(&self.output))
        }
    }
}

impl GlobalArgs {
    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            request_timeout: Duration::from_secs(self.timeout_secs.max(1)),
            accept_invalid_certs: !self.verify_tls,
            ..FetchSettings::default()
        }
    }
}

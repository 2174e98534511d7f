//! Logger setup for the pagemark binary.

use log::LevelFilter;
use pagemark_logging::{initialize, parse_level, LogDestination};

use crate::cli::GlobalArgs;

/// Install the global logger from command-line settings. Unknown level names
/// fall back to `warn`. Returns false when no logger could be installed.
pub fn init(args: &GlobalArgs) -> bool {
    let level = parse_level(&args.log_level).unwrap_or_else(|| {
        eprintln!(
            "Warning: unknown log level {:?}, using warn",
            args.log_level
        );
        LevelFilter::Warn
    });
    let destination = match &args.log_file {
        Some(path) => LogDestination::Both(path.clone()),
        None => LogDestination::Terminal,
    };
    let installed = initialize(destination, level);
    if !installed {
        eprintln!("Warning: logging could not be initialized");
    }
    installed
}

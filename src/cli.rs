use clap::Parser;

use crate::source::{DEFAULT_ENTRY_COUNT_LIMIT, SourceOptions};

#[derive(Parser, Debug)]
#[command(name = "gtfszip")]
#[command(version)]
#[command(about = "Locate and extract GTFS feeds inside (nested) ZIP archives", long_about = None)]
#[command(after_help = "Examples:\n  \
  gtfszip feed.zip -d out                 extract the feed at the archive root into out/\n  \
  gtfszip -a feeds.zip                    extract the only feed found anywhere in feeds.zip\n  \
  gtfszip outer.zip#inner.zip#gtfs -d out extract gtfs/ from inner.zip inside outer.zip\n  \
  gtfszip -l feeds.zip                    list feed roots")]
pub struct Cli {
    /// Archive address: ARCHIVE[#DIR] or ARCHIVE#INNER.zip#DIR
    #[arg(value_name = "ADDRESS")]
    pub address: String,

    /// Extract feed files into exdir (default: a new temporary directory)
    #[arg(short = 'd', value_name = "DIR")]
    pub extract_dir: Option<String>,

    /// Use the feed root found in the archive when there is exactly one
    #[arg(short = 'a', long = "auto-detect-root")]
    pub auto_detect_root: bool,

    /// Abort after indexing this many archive entries
    #[arg(long = "limit", value_name = "N", default_value_t = DEFAULT_ENTRY_COUNT_LIMIT)]
    pub limit: usize,

    /// List feed roots
    #[arg(short = 'l')]
    pub list: bool,

    /// List every directory and its files, nested archives included
    #[arg(short = 'v')]
    pub verbose: bool,

    /// Quiet mode (-qq => quieter)
    #[arg(short = 'q', action = clap::ArgAction::Count)]
    pub quiet: u8,
}

impl Cli {
    pub fn source_options(&self) -> SourceOptions {
        SourceOptions::default()
            .auto_detect_root(self.auto_detect_root)
            .entry_count_limit(self.limit)
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet > 0
    }

    pub fn is_very_quiet(&self) -> bool {
        self.quiet > 1
    }

    /// Default log filter when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        match self.quiet {
            0 => "info",
            1 => "warn",
            _ => "error",
        }
    }
}

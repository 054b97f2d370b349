//! Extraction options and the table of recognized feed files.

use std::collections::BTreeSet;

/// Default ceiling on the number of entries one indexing run may visit.
pub const DEFAULT_ENTRY_COUNT_LIMIT: usize = 1000;

/// Options controlling how an address is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceOptions {
    /// Replace the requested directory with the unique feed root when there is one.
    pub auto_detect_root: bool,
    /// Abort indexing after this many entries (nested archives included).
    pub entry_count_limit: usize,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            auto_detect_root: false,
            entry_count_limit: DEFAULT_ENTRY_COUNT_LIMIT,
        }
    }
}

impl SourceOptions {
    pub fn auto_detect_root(mut self, enabled: bool) -> Self {
        self.auto_detect_root = enabled;
        self
    }

    pub fn entry_count_limit(mut self, limit: usize) -> Self {
        self.entry_count_limit = limit;
        self
    }
}

/// The file names a feed is made of.
///
/// Only names in this table are ever written to a working directory, and a
/// directory counts as a feed root when it holds every required name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTable {
    required: BTreeSet<String>,
    optional: BTreeSet<String>,
}

impl FileTable {
    pub fn new<I, J, S, T>(required: I, optional: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            required: required.into_iter().map(Into::into).collect(),
            optional: optional.into_iter().map(Into::into).collect(),
        }
    }

    /// The GTFS static feed files.
    pub fn gtfs() -> Self {
        Self::new(
            [
                "agency.txt",
                "stops.txt",
                "routes.txt",
                "trips.txt",
                "stop_times.txt",
            ],
            [
                "calendar.txt",
                "calendar_dates.txt",
                "fare_attributes.txt",
                "fare_rules.txt",
                "shapes.txt",
                "frequencies.txt",
                "transfers.txt",
                "feed_info.txt",
            ],
        )
    }

    pub fn required(&self) -> impl Iterator<Item = &str> {
        self.required.iter().map(String::as_str)
    }

    pub fn is_recognized(&self, name: &str) -> bool {
        self.required.contains(name) || self.optional.contains(name)
    }

    /// Whether `names` contains every required file.
    pub fn required_files_present(&self, names: &BTreeSet<String>) -> bool {
        self.required.is_subset(names)
    }
}

impl Default for FileTable {
    fn default() -> Self {
        Self::gtfs()
    }
}

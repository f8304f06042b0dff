// src/params.rs

use std::path::PathBuf;

use crate::specs::audit_log::OnMissing;

/// Fixed default export file name; the site's own export used the same.
pub const DEFAULT_OUT_FILE: &str = "audit-log.json";

/// Environment variable selecting the debug log sink (see `log`).
pub const LOG_ENV: &str = "AUDIT_SCRAPE_LOG";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Saved page in, exported JSON out.
    Extract,
    /// Hooks-usage report over previously exported files.
    HooksReport,
}

#[derive(Clone, Debug)]
pub struct Params {
    pub mode: Mode,
    pub input: Option<PathBuf>,        // saved page; None = stdin
    pub out: Option<PathBuf>,          // file or directory hint; None = default name
    pub to_stdout: bool,               // print JSON instead of writing a file
    pub on_missing: OnMissing,
    pub report_files: Vec<PathBuf>,    // exported JSON files for --hooks
    pub verbose: bool,
}

impl Params {
    pub fn new() -> Self {
        Self {
            mode: Mode::Extract,
            input: None,
            out: None,
            to_stdout: false,
            on_missing: OnMissing::Abort,
            report_files: Vec::new(),
            verbose: false,
        }
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::new()
    }
}

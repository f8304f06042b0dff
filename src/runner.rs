// src/runner.rs

use std::path::PathBuf;

use color_eyre::eyre::{Result, WrapErr};

use crate::params::{DEFAULT_OUT_FILE, Mode, Params};
use crate::specs::audit_log;
use crate::{export, file, logd, logf, report};

/// Summary of what a run produced.
pub struct RunSummary {
    pub records: usize,
    pub files_written: Vec<PathBuf>,
}

/// Top-level: dispatch on mode and run the single linear pass.
pub fn run(params: &Params) -> Result<RunSummary> {
    match params.mode {
        Mode::Extract => run_extract(params),
        Mode::HooksReport => run_hooks_report(params),
    }
}

fn run_extract(params: &Params) -> Result<RunSummary> {
    let doc = file::read_document(params.input.as_deref()).wrap_err("read input page")?;
    logf!("read {} bytes of markup", doc.len());

    let entries = audit_log::extract_with(&doc, params.on_missing)?;
    logf!("extracted {} records", entries.len());

    let json = export::to_json(&entries)?;

    if params.to_stdout {
        file::write_to(std::io::stdout().lock(), &json).wrap_err("write to stdout")?;
        return Ok(RunSummary { records: entries.len(), files_written: Vec::new() });
    }

    let path = file::resolve_out_path(params.out.as_deref(), DEFAULT_OUT_FILE)?;
    logd!("writing {}", path.display());
    file::write_export(&path, &json).wrap_err_with(|| format!("write {}", path.display()))?;

    Ok(RunSummary { records: entries.len(), files_written: vec![path] })
}

fn run_hooks_report(params: &Params) -> Result<RunSummary> {
    let entries = report::load_entries(&params.report_files)?;
    logf!("loaded {} records from {} file(s)", entries.len(), params.report_files.len());

    let tally = report::tally_hooks(&entries);
    for what in &tally.skipped {
        eprintln!("No match for {what:?}");
    }
    print!("{}", report::render(&tally));

    Ok(RunSummary { records: entries.len(), files_written: Vec::new() })
}

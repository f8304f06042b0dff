// src/cli.rs

use std::env;
use std::path::PathBuf;

use color_eyre::eyre::{Result, bail, eyre};

use crate::loge;
use crate::params::{Mode, Params};
use crate::runner;
use crate::specs::audit_log::OnMissing;

pub fn run() -> Result<()> {
    let params = parse_cli(env::args().skip(1))?;
    match runner::run(&params) {
        Ok(summary) => {
            if params.verbose {
                eprintln!("{} record(s)", summary.records);
                for path in &summary.files_written {
                    eprintln!("Wrote {}", path.display());
                }
            }
            Ok(())
        }
        Err(e) => {
            loge!("{e:#}");
            Err(e)
        }
    }
}

fn parse_cli<I: Iterator<Item = String>>(mut args: I) -> Result<Params> {
    let mut params = Params::new();
    while let Some(a) = args.next() {
        match a.as_str() {
            "--in" => {
                let v = args.next().ok_or_else(|| eyre!("Missing value for --in"))?;
                params.input = Some(PathBuf::from(v));
            }
            "-o" | "--out" => {
                let v = args.next().ok_or_else(|| eyre!("Missing output path"))?;
                params.out = Some(PathBuf::from(v));
            }
            "--stdout" => params.to_stdout = true,
            "--on-missing" => {
                let v = args.next().ok_or_else(|| eyre!("Missing value for --on-missing"))?;
                params.on_missing = match v.to_ascii_lowercase().as_str() {
                    "abort" => OnMissing::Abort,
                    "skip" => OnMissing::Skip,
                    "blank" => OnMissing::Blank,
                    other => bail!("Unknown policy: {} (abort|skip|blank)", other),
                };
            }
            "--hooks" => {
                params.mode = Mode::HooksReport;
                params.report_files.extend(args.by_ref().map(PathBuf::from));
                if params.report_files.is_empty() {
                    bail!("--hooks needs at least one exported JSON file");
                }
            }
            "-v" | "--verbose" => params.verbose = true,
            "-h" | "--help" => {
                eprintln!("{}", include_str!("cli_help.txt"));
                std::process::exit(0);
            }
            other if !other.starts_with('-') && params.input.is_none() => {
                params.input = Some(PathBuf::from(other));
            }
            other => bail!("Unknown arg: {}", other),
        }
    }
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Params> {
        parse_cli(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn defaults_extract_from_stdin() {
        let p = parse(&[]).unwrap();
        assert_eq!(p.mode, Mode::Extract);
        assert!(p.input.is_none());
        assert!(p.out.is_none());
        assert_eq!(p.on_missing, OnMissing::Abort);
    }

    #[test]
    fn positional_page_and_policy() {
        let p = parse(&["page.html", "--on-missing", "skip", "-o", "out/"]).unwrap();
        assert_eq!(p.input.as_deref(), Some(std::path::Path::new("page.html")));
        assert_eq!(p.on_missing, OnMissing::Skip);
        assert_eq!(p.out.as_deref(), Some(std::path::Path::new("out/")));
    }

    #[test]
    fn hooks_swallows_the_rest() {
        let p = parse(&["--hooks", "a.json", "b.json"]).unwrap();
        assert_eq!(p.mode, Mode::HooksReport);
        assert_eq!(p.report_files.len(), 2);
    }

    #[test]
    fn hooks_without_files_is_an_error() {
        assert!(parse(&["--hooks"]).is_err());
    }

    #[test]
    fn second_positional_is_rejected() {
        assert!(parse(&["a.html", "b.html"]).is_err());
    }
}

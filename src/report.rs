// src/report.rs
//
// Offline hooks-usage report over previously exported audit-log JSON files:
// which hook services are installed, and on how many repositories, after
// replaying every hook.create/hook.destroy in timestamp order.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::PathBuf;

use color_eyre::eyre::{Result, WrapErr};

use crate::core::sanitize::normalize_ws;
use crate::export;
use crate::specs::audit_log::Entry;

const HOOK_CREATE: &str = "hook.create";
const HOOK_DESTROY: &str = "hook.destroy";

/// Replay result: `(service, repo count)` sorted by count descending
/// (ties in service-name order), plus the action texts that could not be
/// parsed and were skipped.
pub struct HookTally {
    pub services: Vec<(String, usize)>,
    pub skipped: Vec<String>,
}

/// Load and concatenate records from exported files, in argument order.
pub fn load_entries(paths: &[PathBuf]) -> Result<Vec<Entry>> {
    let mut all = Vec::new();
    for p in paths {
        let text = fs::read_to_string(p).wrap_err_with(|| format!("read {}", p.display()))?;
        let mut entries =
            export::from_json(&text).wrap_err_with(|| format!("parse {}", p.display()))?;
        all.append(&mut entries);
    }
    Ok(all)
}

/// Pull `(service, repo)` out of an action text of the form
/// `installed <service> for <repo>` / `uninstalled <service> for <repo>`.
/// The service name may itself contain spaces, so the split is on the last
/// ` for `. Whitespace is collapsed first; exported text keeps the page's
/// line breaks.
pub fn split_hook_action(what: &str) -> Option<(String, String)> {
    let text = normalize_ws(what);
    let (_, rest) = text.split_once("installed ")?;
    let (service, repo) = rest.rsplit_once(" for ")?;
    if service.is_empty() || repo.is_empty() {
        return None;
    }
    Some((service.to_string(), repo.to_string()))
}

/// Replay hook events in `when` order: create adds the repo to the
/// service's set, destroy removes it (a service with no repos left drops
/// out; destroys for unknown services are ignored).
pub fn tally_hooks(entries: &[Entry]) -> HookTally {
    let mut hooks: Vec<&Entry> = entries
        .iter()
        .filter(|e| e.kind == HOOK_CREATE || e.kind == HOOK_DESTROY)
        .collect();
    // ISO-8601 sorts chronologically as text; sort is stable for equal stamps.
    hooks.sort_by(|a, b| a.when.cmp(&b.when));

    let mut tally: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    let mut skipped = Vec::new();

    for e in hooks {
        let Some((service, repo)) = split_hook_action(&e.what) else {
            skipped.push(e.what.clone());
            continue;
        };
        if e.kind == HOOK_CREATE {
            tally.entry(service).or_default().insert(repo);
        } else if let Some(repos) = tally.get_mut(&service) {
            repos.remove(&repo);
            if repos.is_empty() {
                tally.remove(&service);
            }
        }
    }

    let mut services: Vec<(String, usize)> =
        tally.into_iter().map(|(s, r)| (s, r.len())).collect();
    services.sort_by(|a, b| b.1.cmp(&a.1));
    HookTally { services, skipped }
}

/// One `service: count` line per surviving service.
pub fn render(tally: &HookTally) -> String {
    let mut out = String::new();
    for (service, count) in &tally.services {
        out.push_str(service);
        out.push_str(": ");
        out.push_str(&count.to_string());
        out.push('\n');
    }
    out
}

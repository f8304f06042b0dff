// src/file.rs
//
// Input and delivery adapters around the pure extract/serialize core.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Read the saved page from a path, or stdin when no path was given.
pub fn read_document(path: Option<&Path>) -> io::Result<String> {
    match path {
        Some(p) => fs::read_to_string(p),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

/// Resolve the output path from the user's `-o` hint.
/// No hint → the default file name in the current directory. A directory
/// hint (existing dir, or trailing separator) gets the default file name
/// joined on. Parent directories are created as needed.
pub fn resolve_out_path(hint: Option<&Path>, default_name: &str) -> io::Result<PathBuf> {
    let Some(hint) = hint else {
        return Ok(PathBuf::from(default_name));
    };
    if looks_like_dir_hint(hint) || hint.is_dir() {
        ensure_directory(hint)?;
        Ok(hint.join(default_name))
    } else {
        if let Some(parent) = hint.parent() {
            if !parent.as_os_str().is_empty() {
                ensure_directory(parent)?;
            }
        }
        Ok(hint.to_path_buf())
    }
}

pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("path exists but is not a directory: {}", dir.display()),
        ));
    }
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

pub fn looks_like_dir_hint(p: &Path) -> bool {
    let s = p.to_string_lossy();
    s.ends_with('/') || s.ends_with('\\')
}

/// Write the serialized export to its resolved path (truncate/overwrite).
pub fn write_export(path: &Path, json: &str) -> io::Result<()> {
    fs::write(path, json)
}

/// Stream adapter: same bytes to any writer, newline-terminated for
/// terminal use.
pub fn write_to<W: Write>(mut w: W, json: &str) -> io::Result<()> {
    w.write_all(json.as_bytes())?;
    w.write_all(b"\n")?;
    w.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_hint_means_default_name() {
        let p = resolve_out_path(None, "audit-log.json").unwrap();
        assert_eq!(p, PathBuf::from("audit-log.json"));
    }

    #[test]
    fn trailing_separator_reads_as_directory() {
        assert!(looks_like_dir_hint(Path::new("out/")));
        assert!(!looks_like_dir_hint(Path::new("out/file.json")));
    }
}

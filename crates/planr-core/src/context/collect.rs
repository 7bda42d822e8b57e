//! Turning paths and notes into context entries.

use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::defs::extract_definitions;
use super::LoadParams;
use crate::error::{Error, Result};
use crate::types::{ContextEntry, ContextKind};

/// Files larger than this are skipped.
pub const MAX_FILE_BYTES: u64 = 256 * 1024;

/// Project-specific ignore file, honored alongside `.gitignore`.
pub const IGNORE_FILE: &str = ".planrignore";

/// Build the context entries for a load request.
///
/// The note (if any) comes first, followed by files in walk order.
pub fn collect_entries(paths: &[PathBuf], params: &LoadParams) -> Result<Vec<ContextEntry>> {
    let mut entries = Vec::new();

    if let Some(ref note) = params.note {
        entries.push(ContextEntry {
            auto_loaded: params.auto_loaded,
            ..ContextEntry::note("note", note.clone())
        });
    }

    for path in paths {
        if path.is_dir() {
            collect_dir(path, params, &mut entries)?;
        } else {
            let entry = file_entry(path, &path.to_string_lossy(), params)?;
            entries.extend(entry);
        }
    }

    Ok(entries)
}

fn collect_dir(dir: &Path, params: &LoadParams, entries: &mut Vec<ContextEntry>) -> Result<()> {
    if !params.skip_ignore_warning && !has_ignore_file(dir) {
        warn!(
            "No .gitignore or {} in {:?}; every non-hidden file will be loaded",
            IGNORE_FILE, dir
        );
    }

    let mut builder = WalkBuilder::new(dir);
    builder
        .hidden(true)
        .follow_links(false)
        .require_git(false)
        .add_custom_ignore_filename(IGNORE_FILE)
        .sort_by_file_name(|a, b| a.cmp(b));

    for result in builder.build() {
        let entry = match result {
            Ok(entry) => entry,
            Err(e) => {
                debug!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let name = path
            .strip_prefix(dir)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/");
        entries.extend(file_entry(path, &name, params)?);
    }

    Ok(())
}

fn has_ignore_file(dir: &Path) -> bool {
    dir.join(".gitignore").exists() || dir.join(IGNORE_FILE).exists()
}

/// Entry for a single file; `None` for binary, oversized, or (in defs-only
/// mode) definition-free files.
fn file_entry(path: &Path, name: &str, params: &LoadParams) -> Result<Option<ContextEntry>> {
    let metadata = fs::metadata(path).map_err(|e| Error::read_file("context file", path, e))?;
    if metadata.len() > MAX_FILE_BYTES {
        debug!("Skipping {} ({} bytes)", name, metadata.len());
        return Ok(None);
    }

    let bytes = fs::read(path).map_err(|e| Error::read_file("context file", path, e))?;
    if bytes.contains(&0) {
        debug!("Skipping binary file {}", name);
        return Ok(None);
    }
    let content = String::from_utf8_lossy(&bytes);

    let (kind, body) = if params.defs_only {
        match extract_definitions(&content) {
            Some(defs) => (ContextKind::Definitions, defs),
            None => return Ok(None),
        }
    } else {
        (ContextKind::File, content.into_owned())
    };

    Ok(Some(ContextEntry {
        kind,
        name: name.to_string(),
        body,
        auto_loaded: params.auto_loaded,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write(dir: &Path, rel: &str, content: &[u8]) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_note_only() {
        let params = LoadParams {
            note: Some("hello".to_string()),
            ..LoadParams::default()
        };
        let entries = collect_entries(&[], &params).unwrap();
        assert_eq!(entries, vec![ContextEntry::note("note", "hello")]);
    }

    #[test]
    fn test_directory_respects_ignore_files() {
        let temp = tempdir().unwrap();
        write(temp.path(), ".gitignore", b"target/\n");
        write(temp.path(), IGNORE_FILE, b"secret.txt\n");
        write(temp.path(), "src/lib.rs", b"pub fn a() {}\n");
        write(temp.path(), "target/out.rs", b"pub fn b() {}\n");
        write(temp.path(), "secret.txt", b"token\n");
        write(temp.path(), "blob.bin", &[0u8, 1, 2]);

        let entries = collect_entries(&[temp.path().to_path_buf()], &LoadParams::default()).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();

        assert_eq!(names, vec!["src/lib.rs"]);
        assert_eq!(entries[0].kind, ContextKind::File);
    }

    #[test]
    fn test_defs_only_tags_auto_loaded() {
        let temp = tempdir().unwrap();
        write(temp.path(), "main.rs", b"fn main() {\n    run();\n}\n");
        write(temp.path(), "README.md", b"# Title\nprose\n");

        let params = LoadParams {
            defs_only: true,
            skip_ignore_warning: true,
            auto_loaded: true,
            ..LoadParams::default()
        };
        let entries = collect_entries(&[temp.path().to_path_buf()], &params).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "main.rs");
        assert_eq!(entries[0].kind, ContextKind::Definitions);
        assert_eq!(entries[0].body, "fn main()");
        assert!(entries[0].auto_loaded);
    }

    #[test]
    fn test_missing_file_is_error() {
        let temp = tempdir().unwrap();
        let missing = temp.path().join("nope.txt");
        let err = collect_entries(&[missing], &LoadParams::default()).unwrap_err();
        assert!(matches!(err, Error::ReadFile { .. }));
    }
}

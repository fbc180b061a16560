use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use glob::Pattern;
use tracing::debug;
use walkdir::WalkDir;

use crate::cli::Options;

/// Relative path (root prefix stripped) -> absolute path, in lexicographic order.
pub type FileSet = BTreeMap<String, PathBuf>;

fn is_ignored(rel: &str, name: &str, patterns: &[Pattern]) -> bool {
    let s_rel = rel.replace('\\', "/");
    let s_rel = s_rel.trim_start_matches('/');
    patterns
        .iter()
        .any(|pat| pat.matches(s_rel) || pat.matches(name))
}

/// Relative key for `path`: the literal root string removed from the front.
/// No separator handling, so `dir` and `dir/` yield different keys.
fn relative_key(root: &str, path: &str) -> String {
    path.strip_prefix(root).unwrap_or(path).to_string()
}

pub fn scan_dir(root: &Path, opts: &Options) -> Result<FileSet> {
    let meta = root
        .metadata()
        .with_context(|| format!("Walking path for dir {}", root.display()))?;
    if !meta.is_dir() {
        bail!("Walking path for dir {}: not a directory", root.display());
    }

    let root_str = root.to_string_lossy();
    let mut files = FileSet::new();
    let mut skipped = 0usize;

    for entry in WalkDir::new(root).follow_links(false) {
        let entry =
            entry.with_context(|| format!("Walking path for dir {}", root.display()))?;
        if entry.file_type().is_dir() {
            continue;
        }

        let path = entry.path();
        let name = entry.file_name().to_string_lossy();
        let full = path.to_string_lossy();
        let rel = relative_key(&root_str, &full);

        let keep = name.contains(opts.filter.as_str())
            && (opts.exclude.is_empty() || !full.contains(opts.exclude.as_str()))
            && !is_ignored(&rel, &name, &opts.ignore_patterns);

        if keep {
            files.insert(rel, path.to_path_buf());
        } else {
            skipped += 1;
        }
    }

    debug!(
        root = %root.display(),
        kept = files.len(),
        skipped,
        "scanned directory"
    );
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn relative_key_is_literal_prefix_removal() {
        assert_eq!(relative_key("/tmp/a", "/tmp/a/x.txt"), "/x.txt");
        assert_eq!(relative_key("/tmp/a/", "/tmp/a/x.txt"), "x.txt");
    }

    #[test]
    fn ignore_matches_relative_path_or_name() {
        let pats = vec![Pattern::new("*.log").unwrap(), Pattern::new("build/*").unwrap()];
        assert!(is_ignored("/app.log", "app.log", &pats));
        assert!(is_ignored("/build/out.txt", "out.txt", &pats));
        assert!(!is_ignored("/src/main.go", "main.go", &pats));
    }

    #[test]
    fn collects_regular_files_only() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("sub/empty")).unwrap();
        fs::write(tmp.path().join("a.txt"), "a\n").unwrap();
        fs::write(tmp.path().join("sub/b.txt"), "b\n").unwrap();

        let files = scan_dir(tmp.path(), &Options::default()).unwrap();
        let keys: Vec<_> = files.keys().cloned().collect();
        let sep = std::path::MAIN_SEPARATOR;
        assert_eq!(
            keys,
            vec![format!("{sep}a.txt"), format!("{sep}sub{sep}b.txt")]
        );
        assert_eq!(files[&keys[0]], tmp.path().join("a.txt"));
    }

    #[test]
    fn file_root_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("plain.txt");
        fs::write(&file, "x\n").unwrap();
        assert!(scan_dir(&file, &Options::default()).is_err());
    }
}

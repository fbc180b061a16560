use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use tracing::warn;

/// Number of lines in `path`, counting a final line without a trailing newline.
///
/// A file that cannot be opened counts as zero lines; the run goes on.
pub fn count_lines(path: &Path) -> usize {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "cannot open file for line count, counting 0");
            return 0;
        }
    };

    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();
    let mut count = 0;
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => count += 1,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "line count stopped early");
                break;
            }
        }
    }
    count
}

/// Whole-file bytes for diffing, with CRLF/CR turned into LF when asked.
pub fn read_for_diff(path: &Path, normalize_eol: bool) -> Result<Vec<u8>> {
    let bytes = fs::read(path).with_context(|| format!("Cannot read {}", path.display()))?;
    if !normalize_eol {
        return Ok(bytes);
    }

    let mut out = Vec::with_capacity(bytes.len());
    let mut iter = bytes.iter().copied().peekable();
    while let Some(b) = iter.next() {
        if b == b'\r' {
            iter.next_if_eq(&b'\n');
            out.push(b'\n');
        } else {
            out.push(b);
        }
    }
    Ok(out)
}

fn hash_file(path: &Path) -> Result<String> {
    let mut file = File::open(path).with_context(|| format!("Cannot read {}", path.display()))?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher).with_context(|| format!("Cannot read {}", path.display()))?;
    Ok(hex::encode(hasher.finalize()))
}

pub fn file_bytes_equal(p1: &Path, p2: &Path) -> Result<bool> {
    Ok(hash_file(p1)? == hash_file(p2)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_terminated_and_partial_lines() {
        let tmp = tempfile::tempdir().unwrap();
        let full = tmp.path().join("full.txt");
        let partial = tmp.path().join("partial.txt");
        let empty = tmp.path().join("empty.txt");
        fs::write(&full, "one\ntwo\n").unwrap();
        fs::write(&partial, "one\ntwo\nthree").unwrap();
        fs::write(&empty, "").unwrap();

        assert_eq!(count_lines(&full), 2);
        assert_eq!(count_lines(&partial), 3);
        assert_eq!(count_lines(&empty), 0);
    }

    #[test]
    fn blank_lines_are_lines() {
        let tmp = tempfile::tempdir().unwrap();
        let p = tmp.path().join("blank.txt");
        fs::write(&p, "\n\n\n").unwrap();
        assert_eq!(count_lines(&p), 3);
    }

    #[test]
    fn unreadable_file_counts_zero() {
        let tmp = tempfile::tempdir().unwrap();
        assert_eq!(count_lines(&tmp.path().join("missing.txt")), 0);
    }

    #[test]
    fn raw_bytes_are_kept_unless_normalizing() {
        let tmp = tempfile::tempdir().unwrap();
        let p = tmp.path().join("mixed.txt");
        fs::write(&p, b"caf\xe9\r\nx\ry\n").unwrap();
        assert_eq!(read_for_diff(&p, false).unwrap(), b"caf\xe9\r\nx\ry\n");
        assert_eq!(read_for_diff(&p, true).unwrap(), b"caf\xe9\nx\ny\n");
    }

    #[test]
    fn byte_equality_by_digest() {
        let tmp = tempfile::tempdir().unwrap();
        let a = tmp.path().join("a");
        let b = tmp.path().join("b");
        let c = tmp.path().join("c");
        fs::write(&a, "same\n").unwrap();
        fs::write(&b, "same\n").unwrap();
        fs::write(&c, "other\n").unwrap();
        assert!(file_bytes_equal(&a, &b).unwrap());
        assert!(!file_bytes_equal(&a, &c).unwrap());
        assert!(file_bytes_equal(&a, &tmp.path().join("missing")).is_err());
    }
}

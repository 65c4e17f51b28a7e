// ABOUTME: Reads total system memory from /proc/meminfo.
// ABOUTME: Falls back to a small fixed value when the file or the MemTotal line is unusable.

use std::path::Path;
use tracing::{error, warn};

use crate::sizing::kb;

/// Used when MemTotal cannot be read. Deliberately left at the historical value.
pub const FALLBACK_MEM_KB: u64 = kb(8);

/// Extract the MemTotal value (in kB) from meminfo text. The key match is case-insensitive.
pub fn parse_mem_total(content: &str) -> Option<u64> {
    content.lines().find_map(|line| {
        let (key, rest) = line.split_once(':')?;
        if !key.trim().eq_ignore_ascii_case("MemTotal") {
            return None;
        }
        leading_number(rest)
    })
}

/// Leading decimal digits of `value`, ignoring leading whitespace, like `atol`.
fn leading_number(value: &str) -> Option<u64> {
    let value = value.trim_start();
    let end = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    value[..end].parse().ok()
}

/// Total memory in kB, or [`FALLBACK_MEM_KB`] if it cannot be determined.
pub fn total_memory_kb(path: &Path) -> u64 {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            error!(path = %path.display(), error = %e, "can't open meminfo");
            return FALLBACK_MEM_KB;
        }
    };

    parse_mem_total(&content).unwrap_or_else(|| {
        warn!(path = %path.display(), "no usable MemTotal line");
        FALLBACK_MEM_KB
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
MemTotal:        3881236 kB
MemFree:          210524 kB
MemAvailable:    1804380 kB
Buffers:           95588 kB
";

    #[test]
    fn parses_mem_total() {
        assert_eq!(parse_mem_total(SAMPLE), Some(3_881_236));
    }

    #[test]
    fn key_match_ignores_case() {
        assert_eq!(parse_mem_total("memtotal: 1024 kB\n"), Some(1024));
    }

    #[test]
    fn only_exact_key_matches() {
        assert_eq!(parse_mem_total("MemTotalX: 5 kB\nMemFree: 7 kB\n"), None);
    }

    #[test]
    fn missing_key_is_none() {
        assert_eq!(parse_mem_total("MemFree: 210524 kB\n"), None);
    }

    #[test]
    fn trailing_junk_after_digits_is_ignored() {
        assert_eq!(parse_mem_total("MemTotal: 123abc\n"), Some(123));
        assert_eq!(parse_mem_total("MemTotal:3881236kB\n"), Some(3_881_236));
    }

    #[test]
    fn garbage_value_is_none() {
        assert_eq!(parse_mem_total("MemTotal: lots kB\n"), None);
    }

    #[test]
    fn reads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meminfo");
        std::fs::write(&path, SAMPLE).unwrap();

        assert_eq!(total_memory_kb(&path), 3_881_236);
    }

    #[test]
    fn unreadable_file_falls_back() {
        assert_eq!(total_memory_kb(Path::new("/nonexistent/meminfo")), FALLBACK_MEM_KB);
        assert_eq!(FALLBACK_MEM_KB, 8192);
    }

    #[test]
    fn missing_key_in_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meminfo");
        std::fs::write(&path, "MemFree: 1 kB\n").unwrap();

        assert_eq!(total_memory_kb(&path), FALLBACK_MEM_KB);
    }
}

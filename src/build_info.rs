//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// `"<date> (<commit>)"`, as printed by `--version`.
pub fn version_string() -> String {
    format!("{} ({})", BUILD_DATE, BUILD_COMMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_commit_format() {
        // 7 chars or "unknown"
        assert!(BUILD_COMMIT == "unknown" || BUILD_COMMIT.len() == 7);
    }

    #[test]
    fn test_build_date_format() {
        // YYYY-MM-DD
        assert!(BUILD_DATE.len() == 10 || BUILD_DATE == "unknown");
    }

    #[test]
    fn test_version_string_contains_both_parts() {
        let version = version_string();
        assert!(version.starts_with(BUILD_DATE));
        assert!(version.contains(BUILD_COMMIT));
    }
}

//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// One-line version string, e.g. `demon-fuel 0.1.0 (a1b2c3d, 2026-10-19, release)`.
pub fn version_line() -> String {
    format!(
        "{} {} ({}, {}, {})",
        env!("CARGO_PKG_NAME"),
        VERSION,
        BUILD_COMMIT,
        BUILD_DATE,
        BUILD_PROFILE
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_commit_format() {
        // 7 hex chars, or "unknown" outside a git checkout
        assert!(BUILD_COMMIT == "unknown" || BUILD_COMMIT.len() == 7);
    }

    #[test]
    fn test_build_date_format() {
        assert_eq!(BUILD_DATE.len(), 10);
    }

    #[test]
    fn test_version_line() {
        let line = version_line();
        assert!(line.starts_with("demon-fuel "));
        assert!(line.contains(BUILD_COMMIT));
    }
}

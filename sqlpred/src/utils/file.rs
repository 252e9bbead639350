//! File utility functions

use std::path::PathBuf;

/// Expand a leading `~` to the home directory.
///
/// Other paths are returned unchanged; relative paths stay relative to the
/// current directory.
pub fn expand_path(path: &str) -> PathBuf {
    let path = path.trim();

    if path == "~" {
        return dirs::home_dir().unwrap_or_else(|| PathBuf::from(path));
    }

    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_path_absolute() {
        assert_eq!(expand_path("/etc/sqlpred.json"), PathBuf::from("/etc/sqlpred.json"));
    }

    #[test]
    fn test_expand_path_relative_unchanged() {
        assert_eq!(expand_path("conf/sqlpred.json"), PathBuf::from("conf/sqlpred.json"));
    }

    #[test]
    fn test_expand_path_trims_whitespace() {
        assert_eq!(expand_path("  local.json \n"), PathBuf::from("local.json"));
    }

    #[test]
    fn test_expand_path_tilde() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_path("~"), home);
            assert_eq!(expand_path("~/.sqlpred"), home.join(".sqlpred"));
        }
    }
}

//! Path helpers

use std::path::PathBuf;

/// Expand a user-supplied path (tilde, relative) into an absolute path.
pub fn expand_path(path: &str) -> PathBuf {
    let path = path.trim();

    let expanded = if path == "~" {
        dirs::home_dir().unwrap_or_else(|| PathBuf::from(path))
    } else if let Some(rest) = path.strip_prefix("~/") {
        match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => PathBuf::from(path),
        }
    } else {
        PathBuf::from(path)
    };

    if expanded.is_relative() {
        std::env::current_dir()
            .map(|cwd| cwd.join(&expanded))
            .unwrap_or(expanded)
    } else {
        expanded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_expand_path_absolute_unix() {
        assert_eq!(
            expand_path("/etc/promdd.json"),
            PathBuf::from("/etc/promdd.json")
        );
    }

    #[test]
    fn test_expand_path_relative() {
        let result = expand_path("promdd.json");
        assert!(result.is_absolute());
        assert!(result.ends_with("promdd.json"));
    }

    #[test]
    fn test_expand_path_tilde() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(
                expand_path("~/.promdd/promdd.json"),
                home.join(".promdd/promdd.json")
            );
        }
    }
}

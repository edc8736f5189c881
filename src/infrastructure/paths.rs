//! Path helpers for locating local state.

use std::path::{Path, PathBuf};

/// Application directory name under the platform data directory.
const APP_DIR_NAME: &str = "jobboard";

/// Returns the default data directory.
///
/// This is `<data_local_dir>/jobboard`, e.g. `~/.local/share/jobboard` on Linux.
/// Falls back to `./.jobboard` when the platform directory is unknown.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir().map_or_else(|| PathBuf::from(".jobboard"), |dir| dir.join(APP_DIR_NAME))
}

/// Returns `override_dir` (tilde-expanded) if given, else [`get_data_dir`].
#[must_use]
pub fn resolve_data_dir(override_dir: Option<&Path>) -> PathBuf {
    override_dir
        .and_then(Path::to_str)
        .map_or_else(get_data_dir, |dir| PathBuf::from(expand_tilde(dir)))
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading tilde, and all paths when the home directory is
/// unknown, are returned unchanged.
///
/// # Examples
///
/// ```
/// use jobboard::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    let Some(home) = dirs::home_dir() else {
        return path.to_string();
    };
    let home = home.to_string_lossy();

    if let Some(rest) = path.strip_prefix("~/") {
        format!("{}/{rest}", home.trim_end_matches('/'))
    } else if path == "~" {
        home.into_owned()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_wins_over_default() {
        assert_eq!(resolve_data_dir(Some(Path::new("/tmp/jb"))), PathBuf::from("/tmp/jb"));
        assert!(resolve_data_dir(None).ends_with(APP_DIR_NAME) || dirs::data_local_dir().is_none());
    }

    #[test]
    fn tilde_only_expands_at_start() {
        assert_eq!(expand_tilde("/a/~/b"), "/a/~/b");
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~"), home.to_string_lossy());
        }
    }
}

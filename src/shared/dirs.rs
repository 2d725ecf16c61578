//! XDG base directories. Empty variables count as unset.

use std::path::PathBuf;

pub fn home_dir() -> Option<PathBuf> {
    non_empty_env("HOME").map(PathBuf::from)
}

/// $XDG_CACHE_HOME, else ~/.cache.
pub fn cache_dir() -> Option<PathBuf> {
    xdg_dir("XDG_CACHE_HOME", ".cache")
}

/// $XDG_CONFIG_HOME, else ~/.config.
pub fn config_dir() -> Option<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", ".config")
}

fn xdg_dir(var: &str, home_relative: &str) -> Option<PathBuf> {
    non_empty_env(var)
        .map(PathBuf::from)
        .or_else(|| home_dir().map(|home| home.join(home_relative)))
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::set(Some("/custom/config"), "/custom/config")]
    #[case::unset(None, "/test/home/.config")]
    #[case::empty(Some(""), "/test/home/.config")]
    fn test_config_dir(#[case] xdg: Option<&str>, #[case] expected: &str) {
        temp_env::with_vars(
            [("XDG_CONFIG_HOME", xdg), ("HOME", Some("/test/home"))],
            || {
                assert_eq!(config_dir(), Some(PathBuf::from(expected)));
            },
        );
    }

    #[rstest]
    #[case::set(Some("/custom/cache"), "/custom/cache")]
    #[case::unset(None, "/test/home/.cache")]
    #[case::empty(Some(""), "/test/home/.cache")]
    fn test_cache_dir(#[case] xdg: Option<&str>, #[case] expected: &str) {
        temp_env::with_vars(
            [("XDG_CACHE_HOME", xdg), ("HOME", Some("/test/home"))],
            || {
                assert_eq!(cache_dir(), Some(PathBuf::from(expected)));
            },
        );
    }

    #[test]
    fn no_home_and_no_xdg_yields_none() {
        temp_env::with_vars(
            [("XDG_CACHE_HOME", None::<&str>), ("HOME", None)],
            || {
                assert_eq!(cache_dir(), None);
            },
        );
    }
}

//! Sandbox path helpers.

use std::path::PathBuf;

/// Mount point of the host directory inside the plugin sandbox.
pub const HOST_ROOT: &str = "/host";

/// Directory for zpokedex's own files (currently only the trace file):
/// `/host/.local/share/zellij/zpokedex`, i.e. `~/.local/share/zellij/zpokedex`
/// when Zellij runs from the home directory.
///
/// # Examples
///
/// ```
/// use zpokedex::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/zpokedex"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from(HOST_ROOT).join(".local/share/zellij/zpokedex")
}

/// Maps a user-supplied path (such as the `theme_file` option) into the
/// sandbox: a leading `~` becomes `/host`, other paths pass through.
///
/// `~user/...` forms are not expanded.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use zpokedex::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/red.toml"), PathBuf::from("/host/themes/red.toml"));
/// assert_eq!(expand_tilde("/etc/red.toml"), PathBuf::from("/etc/red.toml"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    match path.strip_prefix('~') {
        Some("") => PathBuf::from(HOST_ROOT),
        Some(rest) if rest.starts_with('/') => PathBuf::from(format!("{HOST_ROOT}{rest}")),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_home_only() {
        assert_eq!(expand_tilde("~"), PathBuf::from("/host"));
        assert_eq!(expand_tilde("~/a/b.toml"), PathBuf::from("/host/a/b.toml"));
        assert_eq!(expand_tilde("~ash/b.toml"), PathBuf::from("~ash/b.toml"));
        assert_eq!(expand_tilde("relative.toml"), PathBuf::from("relative.toml"));
    }

    #[test]
    fn data_dir_is_under_host() {
        assert!(get_data_dir().starts_with(HOST_ROOT));
        assert!(get_data_dir().ends_with("zpokedex"));
    }
}

//! Path utilities: expand `~` in user-supplied database paths.

use std::path::PathBuf;

/// `~` and `~/...` resolve against the home directory; anything else is
/// taken as given.
pub fn expand_tilde(path: &str) -> PathBuf {
    let home = dirs::home_dir();
    match (path, home) {
        ("~", Some(h)) => h,
        (p, Some(h)) if p.starts_with("~/") => h.join(&p[2..]),
        (p, _) => PathBuf::from(p),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_paths_are_untouched() {
        assert_eq!(expand_tilde("/tmp/a.sqlite"), PathBuf::from("/tmp/a.sqlite"));
        assert_eq!(expand_tilde("rel/a.sqlite"), PathBuf::from("rel/a.sqlite"));
    }

    #[test]
    fn home_prefix_is_expanded() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/x.sqlite"), home.join("x.sqlite"));
            assert_eq!(expand_tilde("~"), home);
        }
    }
}

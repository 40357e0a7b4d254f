//! Remote path composition.
//!
//! Remote store paths are plain `/`-delimited strings. These helpers build
//! clean multi-segment paths from caller-supplied fragments that may carry
//! stray leading or trailing slashes.

/// Joins `extra` onto `base` with exactly one `/` between them.
///
/// Strips one trailing slash from `base` and one leading and one trailing
/// slash from `extra`. An empty base yields the stripped `extra` alone, so
/// folding from `""` never produces a leading slash.
pub fn normalize_join(base: &str, extra: &str) -> String {
    let base = base.strip_suffix('/').unwrap_or(base);
    let extra = extra.strip_prefix('/').unwrap_or(extra);
    let extra = extra.strip_suffix('/').unwrap_or(extra);
    if base.is_empty() {
        extra.to_string()
    } else if extra.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{extra}")
    }
}

/// Left-folds [`normalize_join`] over `segments`, starting from the empty
/// string. An empty slice yields `""`, which is a caller error if later
/// used as a base path.
pub fn join_all<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .fold(String::new(), |acc, seg| normalize_join(&acc, seg.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_strips_single_slashes() {
        assert_eq!(normalize_join("x/", "/y/"), "x/y");
    }

    #[test]
    fn join_without_slashes() {
        assert_eq!(normalize_join("x", "y"), "x/y");
    }

    #[test]
    fn join_all_folds_clean() {
        assert_eq!(join_all(&["a/", "/b/", "c"]), "a/b/c");
    }

    #[test]
    fn join_all_empty_is_empty() {
        let none: [&str; 0] = [];
        assert_eq!(join_all(&none), "");
    }

    #[test]
    fn empty_extra_keeps_base() {
        assert_eq!(normalize_join("chats", ""), "chats");
        assert_eq!(normalize_join("chats", "/"), "chats");
    }

    #[test]
    fn url_base_keeps_scheme() {
        assert_eq!(
            normalize_join("https://db.example.dev/", "chats/abc"),
            "https://db.example.dev/chats/abc"
        );
    }
}

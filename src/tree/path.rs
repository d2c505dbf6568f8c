//! Path segmentation.
//!
//! Paths are split on `/` with no normalization: no handling of `.` or `..`,
//! and a leading slash yields an empty first component, exactly as the
//! cluster reports paths. Callers reject empty paths before segmenting.

/// Split a slash-delimited path into its ordered components.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_slash() {
        let parts: Vec<&str> = segments("a/b/c").collect();
        assert_eq!(parts, vec!["a", "b", "c"]);
    }

    #[test]
    fn leading_slash_yields_empty_component() {
        let parts: Vec<&str> = segments("/home/alice").collect();
        assert_eq!(parts, vec!["", "home", "alice"]);
    }

    #[test]
    fn single_component_has_no_separator() {
        let parts: Vec<&str> = segments("alice").collect();
        assert_eq!(parts, vec!["alice"]);
    }
}

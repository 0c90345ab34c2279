//! Skip-subtree ignore list.

use std::collections::HashSet;

/// Prefixes whose subtree a walk never lists.
///
/// Membership is exact string equality: `"logs/"` in the set skips the
/// `logs/` node and everything beneath it, but does not skip `"logs-old/"` or
/// match `"logs"` without the delimiter. The set only grows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreSet {
    prefixes: HashSet<String>,
}

impl IgnoreSet {
    /// Create an empty ignore set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one prefix.
    pub fn insert(&mut self, prefix: impl Into<String>) {
        self.prefixes.insert(prefix.into());
    }

    /// Add many prefixes.
    pub fn extend<I, P>(&mut self, prefixes: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        self.prefixes.extend(prefixes.into_iter().map(Into::into));
    }

    /// Check whether `prefix` is ignored.
    pub fn contains(&self, prefix: &str) -> bool {
        self.prefixes.contains(prefix)
    }

    /// Number of ignored prefixes.
    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    /// Check if nothing is ignored.
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}

impl<P: Into<String>> FromIterator<P> for IgnoreSet {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_only() {
        let mut set = IgnoreSet::new();
        set.insert("logs/");

        assert!(set.contains("logs/"));
        assert!(!set.contains("logs"));
        assert!(!set.contains("logs/2024/"));
        assert!(!set.contains("logs-old/"));
    }

    #[test]
    fn test_extend_and_len() {
        let mut set = IgnoreSet::new();
        assert!(set.is_empty());

        set.extend(["a/", "b/"]);
        set.extend(vec!["b/".to_string(), "c/".to_string()]);

        assert_eq!(set.len(), 3);
        assert!(set.contains("c/"));
    }

    #[test]
    fn test_from_iterator() {
        let set: IgnoreSet = ["tmp/", "cache/"].into_iter().collect();
        assert!(set.contains("tmp/"));
        assert!(set.contains("cache/"));
    }
}

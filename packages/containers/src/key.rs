//! Key naming: logical names to full store keys.

/// Separator between a namespace prefix and a logical name, and between
/// the parts of a compound key.
pub const DELIMITER: &str = ":";

/// Builds full store keys from logical names.
///
/// A namer carries an optional namespace prefix, fixed at construction.
/// Without a prefix it returns names unchanged; with one, every resolved
/// key is `prefix:name`. Resolution is pure - no store traffic, no errors.
///
/// # Example
///
/// ```rust
/// use keyspace_containers::KeyNamer;
///
/// let namer = KeyNamer::prefixed("staging");
/// assert_eq!(namer.resolve("jobs"), "staging:jobs");
/// assert_eq!(KeyNamer::bare().resolve("jobs"), "jobs");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyNamer {
    prefix: Option<String>,
}

impl KeyNamer {
    /// A namer with no prefix: logical names are full keys.
    pub fn bare() -> Self {
        Self { prefix: None }
    }

    /// A namer that prefixes every key with `prefix`.
    pub fn prefixed(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }

    /// The configured prefix, if any.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Resolve one logical name to a full key.
    ///
    /// `name` must be non-empty; that is the caller's contract.
    pub fn resolve(&self, name: &str) -> String {
        debug_assert!(!name.is_empty(), "logical names are non-empty");
        match &self.prefix {
            Some(prefix) => format!("{}{}{}", prefix, DELIMITER, name),
            None => name.to_string(),
        }
    }

    /// Resolve several logical names elementwise.
    pub fn resolve_many(&self, names: &[&str]) -> Vec<String> {
        names.iter().map(|name| self.resolve(name)).collect()
    }

    /// Build a compound key: each name resolved, then joined with the
    /// delimiter. Used for commands whose key is itself composite
    /// (rename targets, scratch keys).
    pub fn compound(&self, names: &[&str]) -> String {
        self.resolve_many(names).join(DELIMITER)
    }
}

impl Default for KeyNamer {
    fn default() -> Self {
        Self::bare()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_names_pass_through() {
        let namer = KeyNamer::bare();
        assert_eq!(namer.resolve("jobs"), "jobs");
        assert_eq!(namer.prefix(), None);
    }

    #[test]
    fn prefix_applies_to_every_name() {
        let namer = KeyNamer::prefixed("app");
        assert_eq!(namer.resolve("jobs"), "app:jobs");
        assert_eq!(
            namer.resolve_many(&["a", "b"]),
            vec!["app:a".to_string(), "app:b".to_string()]
        );
    }

    #[test]
    fn compound_joins_resolved_keys() {
        assert_eq!(KeyNamer::bare().compound(&["old", "new"]), "old:new");
        assert_eq!(
            KeyNamer::prefixed("app").compound(&["old", "new"]),
            "app:old:app:new"
        );
    }
}

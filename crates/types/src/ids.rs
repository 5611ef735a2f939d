//! Newtype wrappers for the string keys that flow through a build.
//!
//! Bookmark ids, outline keys and counter names are all plain strings on the
//! wire; wrapping them keeps a counter name from being passed where an anchor
//! is expected.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(Arc<str>);

        impl $name {
            pub fn new(id: impl Into<Arc<str>>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s.into())
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.into())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Anchor id of a heading, stable across passes over unchanged content.
    BookmarkId
);

string_id!(
    /// Key of a page bookmark backing an outline node.
    OutlineKey
);

string_id!(
    /// Name of a counter in a counter chain (e.g. `h0`, `h1`).
    CounterName
);

impl CounterName {
    /// The conventional counter name for heading depth `level`.
    pub fn heading(level: usize) -> Self {
        Self::from(format!("h{level}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_bookmark_id_creation() {
        let id1 = BookmarkId::new("abc");
        let id2 = BookmarkId::from("abc");
        let id3 = BookmarkId::from(String::from("abc"));

        assert_eq!(id1, id2);
        assert_eq!(id2, id3);
        assert_eq!(id1.as_str(), "abc");
    }

    #[test]
    fn test_heading_counter_names() {
        assert_eq!(CounterName::heading(0).as_str(), "h0");
        assert_eq!(CounterName::heading(3).to_string(), "h3");
    }

    #[test]
    fn test_hash_map_usage() {
        let mut pages = HashMap::new();
        pages.insert(OutlineKey::new("k1"), 1usize);
        pages.insert(OutlineKey::new("k2"), 4usize);
        assert_eq!(pages.get(&OutlineKey::from("k2")), Some(&4));
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&BookmarkId::new("x1")).unwrap();
        assert_eq!(json, "\"x1\"");
    }
}

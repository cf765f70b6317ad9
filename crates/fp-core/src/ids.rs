use core::fmt;
use std::collections::BTreeSet;

/// Opaque identifier of a stream reach.
///
/// Reach tables in the wild key reaches by either text or integer IDs. Both
/// are normalized to their textual form so a network can mix sources freely:
/// `ReachId::from(42_u64) == ReachId::from("42")`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReachId(String);

impl ReachId {
    /// Create a new reach ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ReachId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ReachId({})", self.0)
    }
}

impl fmt::Display for ReachId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ReachId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ReachId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<&ReachId> for ReachId {
    fn from(id: &ReachId) -> Self {
        id.clone()
    }
}

macro_rules! reach_id_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ReachId {
                fn from(id: $t) -> Self {
                    Self(id.to_string())
                }
            }
        )*
    };
}

reach_id_from_int!(u32, u64, i32, i64, usize);

/// Unordered, deduplicated set of reaches (main stems, origins, habitat).
///
/// Ordered storage keeps iteration deterministic for logs and output files.
pub type ReachSet = BTreeSet<ReachId>;

#[cfg(feature = "serde")]
mod serde_impl {
    use super::ReachId;
    use core::fmt;
    use serde::de::{self, Visitor};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for ReachId {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&self.0)
        }
    }

    struct ReachIdVisitor;

    impl Visitor<'_> for ReachIdVisitor {
        type Value = ReachId;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a reach ID as a string or integer")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<ReachId, E> {
            Ok(ReachId::from(v))
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<ReachId, E> {
            Ok(ReachId::from(v))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<ReachId, E> {
            Ok(ReachId::from(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<ReachId, E> {
            Ok(ReachId::from(v))
        }
    }

    impl<'de> Deserialize<'de> for ReachId {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_any(ReachIdVisitor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_and_text_ids_agree() {
        assert_eq!(ReachId::from(42_u64), ReachId::from("42"));
        assert_eq!(ReachId::from(-3_i64).as_str(), "-3");
        assert_ne!(ReachId::from("a"), ReachId::from("b"));
    }

    #[test]
    fn display_is_bare_id() {
        let id = ReachId::new("R-17");
        assert_eq!(format!("{id}"), "R-17");
        assert_eq!(format!("{id:?}"), "ReachId(R-17)");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_from_string_or_integer() {
        let ids: Vec<ReachId> = serde_json::from_str(r#"[1, "2", 30]"#).unwrap();
        assert_eq!(ids, vec![ReachId::from(1_u64), ReachId::from("2"), ReachId::from(30_u64)]);
        assert_eq!(serde_json::to_string(&ids[0]).unwrap(), r#""1""#);
    }
}

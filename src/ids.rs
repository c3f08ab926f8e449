use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Handle identifying the element a routed view is attached to.
///
/// Created fresh for every wrapped route when a table is built and owned by
/// that route entry. The transition driver uses it to target the entering
/// and exiting element; it never owns the view itself.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct NodeRef(pub ulid::Ulid);

impl NodeRef {
    #[must_use]
    pub fn new() -> Self {
        Self(ulid::Ulid::new())
    }

    #[must_use]
    pub fn from_ulid(id: ulid::Ulid) -> Self {
        Self(id)
    }

    /// DOM-safe attribute value (`data-node` or element id).
    #[must_use]
    pub fn dom_id(&self) -> String {
        format!("sr-{}", self.0.to_string().to_lowercase())
    }
}

impl Default for NodeRef {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for NodeRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NodeRef {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = ulid::Ulid::from_string(s)?;
        Ok(NodeRef(id))
    }
}

impl Serialize for NodeRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for NodeRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse::<NodeRef>()
            .map_err(|_| serde::de::Error::custom("invalid node ref"))
    }
}

/// Identity of one route entry within a built table.
///
/// Matches carry this id back so lookups compare identity rather than shape.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct RouteId(pub ulid::Ulid);

impl RouteId {
    #[must_use]
    pub fn new() -> Self {
        Self(ulid::Ulid::new())
    }
}

impl Default for RouteId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for RouteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

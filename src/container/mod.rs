use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Identifier of a container as reported by the task metadata endpoint (`DockerId`).
///
/// The same identifier keys the task stats document, which is what lets the two
/// documents be joined. The value is opaque and never validated.
///
/// # Examples
///
/// ```
/// # use ecs_exporter::container::ContainerId;
/// let id = ContainerId::new("3c2ff4fd4d6a");
/// assert_eq!(id.as_ref(), "3c2ff4fd4d6a");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Deserialize)]
#[serde(transparent)]
pub struct ContainerId(Arc<str>);

impl ContainerId {
    pub fn new(src: impl AsRef<str>) -> Self {
        Self(src.as_ref().into())
    }
}

impl AsRef<str> for ContainerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ContainerId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContainerId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

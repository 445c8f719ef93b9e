//! Candidate projects.

use std::borrow::Borrow;
use std::fmt;

/// Stable identifier of a project.
///
/// Identifiers are compared as strings. When deserialized, integer
/// identifiers (`"id": 7`) are accepted and stored in their decimal form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectId(String);

impl ProjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProjectId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ProjectId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for ProjectId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl Borrow<str> for ProjectId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ProjectId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ProjectId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Number(u64),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Text(s) => ProjectId(s),
            Repr::Number(n) => ProjectId::from(n),
        })
    }
}

/// A candidate project: something that costs money and yields impact.
///
/// Projects are plain values; validation happens when they are assembled
/// into a [`ProjectCatalog`](super::ProjectCatalog).
///
/// # Example
///
/// ```
/// use knapforge_core::Project;
///
/// let p = Project::new("flex-hours", 30.0, 14.0)
///     .with_name("Flexible hours and remote work")
///     .with_category("Wellbeing");
///
/// assert_eq!(p.id().as_str(), "flex-hours");
/// assert!((p.efficiency() - 14.0 / 30.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Project {
    id: ProjectId,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    name: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    category: Option<String>,
    cost: f64,
    impact: f64,
}

impl Project {
    /// Creates a project without descriptive metadata.
    pub fn new(id: impl Into<ProjectId>, cost: f64, impact: f64) -> Self {
        Self {
            id: id.into(),
            name: None,
            category: None,
            cost,
            impact,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[inline]
    pub fn id(&self) -> &ProjectId {
        &self.id
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[inline]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Human-readable label: the name when present, otherwise the id.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(self.id.as_str())
    }

    #[inline]
    pub fn cost(&self) -> f64 {
        self.cost
    }

    #[inline]
    pub fn impact(&self) -> f64 {
        self.impact
    }

    /// Impact per unit of cost. Zero-cost projects report 0.
    pub fn efficiency(&self) -> f64 {
        if self.cost > 0.0 {
            self.impact / self.cost
        } else {
            0.0
        }
    }
}

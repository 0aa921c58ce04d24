use serde::{Deserialize, Serialize};

/// The part of a user profile the engine touches when awarding points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub points: u32,
}

impl Profile {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            points: 0,
        }
    }

    /// Returns the profile with `points` added to its balance.
    pub fn credited(self, points: u32) -> Self {
        Self {
            points: self.points.saturating_add(points),
            ..self
        }
    }
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::{Identifiable, NamedEntity};

/// Palette used to assign display colors to new members.
pub const MEMBER_COLORS: &[&str] = &[
    "cyan", "magenta", "green", "yellow", "blue", "red", "white",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub id: Uuid,
    pub name: String,
    /// Optional color name for display purposes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Member {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn color_or_default(&self) -> &str {
        self.color.as_deref().unwrap_or("white")
    }
}

impl Identifiable for Member {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Member {
    fn name(&self) -> &str {
        &self.name
    }
}

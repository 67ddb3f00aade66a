use serde::{Deserialize, Serialize};

/// Start time shown when the server has none for a building.
pub const DEFAULT_START_TIME: &str = "20:00";

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct Building {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub start_time: Option<String>,
}

impl Building {
    pub fn display_start_time(&self) -> &str {
        self.start_time
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_START_TIME)
    }

    pub fn title(&self) -> String {
        format!("{} (ID: {})", self.name, self.id)
    }

    /// Case-insensitive substring match used by the building filter.
    pub fn matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct BuildingTimeRequest {
    pub building_id: i64,
    pub start_time: String,
}

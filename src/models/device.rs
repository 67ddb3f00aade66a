use serde::{Deserialize, Serialize};

use crate::error::ConsoleError;

/// A monitored proevent as rendered in the console.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct Device {
    pub id: i64,
    pub name: String,
    /// Lowercased state, `"unknown"` when the server sent none.
    pub state: String,
    pub is_ignored: bool,
}

impl Device {
    pub fn is_armed(&self) -> bool {
        self.state.eq_ignore_ascii_case("armed")
    }

    pub fn label(&self) -> String {
        format!("{} (ID: {})", self.name, self.id)
    }

    /// Case-insensitive substring match on the name only.
    pub fn matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }
}

/// Wire shape of a device; every field is optional so one bad record
/// does not fail the whole list.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct DeviceRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub is_ignored: Option<bool>,
    #[serde(default)]
    pub building_name: Option<String>,
}

impl TryFrom<DeviceRecord> for Device {
    type Error = ConsoleError;

    fn try_from(record: DeviceRecord) -> Result<Self, Self::Error> {
        let id = record
            .id
            .ok_or_else(|| ConsoleError::MalformedRow(format!("device without id: {:?}", record.name)))?;
        let name = record
            .name
            .ok_or_else(|| ConsoleError::MalformedRow(format!("device {} without name", id)))?;
        Ok(Device {
            id,
            name,
            state: record
                .state
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "unknown".to_string())
                .to_lowercase(),
            is_ignored: record.is_ignored.unwrap_or(false),
        })
    }
}

/// Convert wire records, dropping the malformed ones with a warning.
pub fn devices_from_records(records: Vec<DeviceRecord>) -> Vec<Device> {
    records
        .into_iter()
        .filter_map(|record| match Device::try_from(record) {
            Ok(device) => Some(device),
            Err(err) => {
                log::warn!("⚠️ [DEVICES] Skipping record: {}", err);
                None
            }
        })
        .collect()
}

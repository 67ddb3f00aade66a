// ============================================================================
// BUILDING STATUS - Aggregated arm state of the rendered device rows
// ============================================================================

use crate::models::Device;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildingStatus {
    NoProEvents,
    AllArmed,
    PartiallyArmed,
    AllDisarmed,
}

impl BuildingStatus {
    pub fn label(&self) -> &'static str {
        match self {
            BuildingStatus::NoProEvents => "No ProEvents",
            BuildingStatus::AllArmed => "All Armed",
            BuildingStatus::PartiallyArmed => "Partially Armed",
            BuildingStatus::AllDisarmed => "All Disarmed",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            BuildingStatus::AllArmed => "status-all-armed",
            BuildingStatus::PartiallyArmed => "status-partial-armed",
            BuildingStatus::NoProEvents | BuildingStatus::AllDisarmed => "status-none-armed",
        }
    }
}

pub fn aggregate_status(devices: &[Device]) -> BuildingStatus {
    if devices.is_empty() {
        return BuildingStatus::NoProEvents;
    }
    let armed = devices.iter().filter(|d| d.is_armed()).count();
    if armed == devices.len() {
        BuildingStatus::AllArmed
    } else if armed > 0 {
        BuildingStatus::PartiallyArmed
    } else {
        BuildingStatus::AllDisarmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(id: i64, state: &str) -> Device {
        Device {
            id,
            name: format!("dev-{}", id),
            state: state.to_string(),
            is_ignored: false,
        }
    }

    #[test]
    fn empty_list_has_no_proevents() {
        assert_eq!(aggregate_status(&[]), BuildingStatus::NoProEvents);
    }

    #[test]
    fn every_non_empty_mix_maps_to_one_status() {
        for total in 1..6 {
            for armed in 0..=total {
                let devices: Vec<Device> = (0..total)
                    .map(|i| device(i as i64, if i < armed { "Armed" } else { "disarmed" }))
                    .collect();
                let expected = if armed == total {
                    BuildingStatus::AllArmed
                } else if armed == 0 {
                    BuildingStatus::AllDisarmed
                } else {
                    BuildingStatus::PartiallyArmed
                };
                assert_eq!(aggregate_status(&devices), expected, "{}/{}", armed, total);
            }
        }
    }

    #[test]
    fn labels_and_classes() {
        assert_eq!(BuildingStatus::PartiallyArmed.label(), "Partially Armed");
        assert_eq!(BuildingStatus::AllDisarmed.css_class(), "status-none-armed");
    }
}

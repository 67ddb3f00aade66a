use serde::{Deserialize, Serialize};

/// One "ignore on disarm" flag change.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct IgnoreUpdateItem {
    pub item_id: i64,
    pub building_frk: i64,
    pub device_prk: i64,
    pub ignore: bool,
}

/// Body of `POST proevents/ignore/bulk`; the whole batch goes in one request.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct BulkIgnoreRequest {
    pub items: Vec<IgnoreUpdateItem>,
}

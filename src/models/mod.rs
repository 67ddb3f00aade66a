pub mod auth;
pub mod building;
pub mod device;
pub mod ignore;

pub use auth::{ErrorBody, LoginRequest, LoginResponse};
pub use building::{Building, BuildingTimeRequest, DEFAULT_START_TIME};
pub use device::{devices_from_records, Device, DeviceRecord};
pub use ignore::{BulkIgnoreRequest, IgnoreUpdateItem};

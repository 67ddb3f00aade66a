// ============================================================================
// VIEWS - DOM rendering of the view models (browser only)
// ============================================================================

pub mod app;
pub mod building_card;
pub mod building_list;
pub mod header;
pub mod ignore_modal;
pub mod login;
pub mod notification;

pub use app::{mount_console, mount_login};

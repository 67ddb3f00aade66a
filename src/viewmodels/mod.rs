// ============================================================================
// VIEWMODELS - UI state and behaviour, no markup
// ============================================================================

pub mod status;
pub mod building_card;
pub mod building_list;
pub mod ignore_modal;
pub mod login;

pub use status::{aggregate_status, BuildingStatus};
pub use building_card::{BuildingCard, BuildingCardView, CardEnv, DeviceListState};
pub use building_list::{BuildingListController, FilterState, ListContent};
pub use ignore_modal::{
    BulkIgnoreModal, ModalBinder, ModalBody, ModalPhase, ModalRow, ModalView, SelectAllLabel,
};
pub use login::{LoginForm, LoginViewModel};

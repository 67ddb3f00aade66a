// ============================================================================
// BULK IGNORE MODAL - "Ignore on disarm" selection dialog as a state machine
// ============================================================================
// Closed → Loading → Ready → Submitting → Closed
// A failed submission goes back to Ready. The dialog owns the event bindings
// of the current invocation and swaps them on open()/close().
// ============================================================================

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{ConsoleError, Result};
use crate::models::{devices_from_records, Device, IgnoreUpdateItem};
use crate::services::{ApiClient, Notifier};
use crate::state::ReactiveState;
use crate::viewmodels::BuildingListController;

pub const MODAL_TITLE: &str = "Select ProEvents to Ignore on Disarm";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalPhase {
    Closed,
    Loading,
    Ready,
    Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectAllLabel {
    SelectAll,
    DeselectAll,
}

impl SelectAllLabel {
    pub fn text(&self) -> &'static str {
        match self {
            SelectAllLabel::SelectAll => "Select All",
            SelectAllLabel::DeselectAll => "Deselect All",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalBody {
    Empty,
    Loading,
    Rows,
    NoDevices,
    LoadFailed,
}

impl ModalBody {
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            ModalBody::Loading => Some("Loading..."),
            ModalBody::NoDevices => Some("No proevents found in this building."),
            ModalBody::LoadFailed => Some("Error loading proevents. Please try again."),
            ModalBody::Empty | ModalBody::Rows => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalRow {
    pub device: Device,
    pub building_id: i64,
    pub checked: bool,
    pub visible: bool,
}

impl ModalRow {
    pub fn update_item(&self) -> IgnoreUpdateItem {
        IgnoreUpdateItem {
            item_id: self.device.id,
            building_frk: self.building_id,
            device_prk: self.device.id,
            ignore: self.checked,
        }
    }
}

/// Everything the dialog view needs to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalView {
    pub phase: ModalPhase,
    pub building_id: Option<i64>,
    pub title: String,
    pub body: ModalBody,
    pub rows: Vec<ModalRow>,
    pub search: String,
    pub select_all: SelectAllLabel,
    pub confirm_enabled: bool,
    pub cancel_enabled: bool,
}

impl ModalView {
    fn closed() -> Self {
        Self {
            phase: ModalPhase::Closed,
            building_id: None,
            title: String::new(),
            body: ModalBody::Empty,
            rows: Vec::new(),
            search: String::new(),
            select_all: SelectAllLabel::SelectAll,
            confirm_enabled: true,
            cancel_enabled: true,
        }
    }

    fn loading(building_id: i64) -> Self {
        Self {
            phase: ModalPhase::Loading,
            building_id: Some(building_id),
            title: MODAL_TITLE.to_string(),
            body: ModalBody::Loading,
            rows: Vec::new(),
            search: String::new(),
            select_all: SelectAllLabel::SelectAll,
            confirm_enabled: false,
            cancel_enabled: true,
        }
    }

    fn recompute_select_all(&mut self) {
        let mut visible = self.rows.iter().filter(|r| r.visible).peekable();
        let any_visible = visible.peek().is_some();
        let all_checked = visible.all(|r| r.checked);
        self.select_all = if any_visible && all_checked {
            SelectAllLabel::DeselectAll
        } else {
            SelectAllLabel::SelectAll
        };
    }
}

/// Attaches the dialog's event handlers; dropping the returned value detaches them.
pub trait ModalBinder {
    fn bind(&self, modal: &BulkIgnoreModal) -> Box<dyn Any>;
}

struct ModalData {
    view: ModalView,
    /// Records returned by the server, malformed ones included.
    candidate_count: usize,
    invocation: u64,
}

#[derive(Clone)]
pub struct BulkIgnoreModal {
    data: ReactiveState<ModalData>,
    bindings: Rc<RefCell<Option<Box<dyn Any>>>>,
    binder: Rc<RefCell<Option<Rc<dyn ModalBinder>>>>,
    api: ApiClient,
    notifier: Notifier,
    list: BuildingListController,
    device_limit: u32,
}

impl BulkIgnoreModal {
    pub fn new(
        api: ApiClient,
        notifier: Notifier,
        list: BuildingListController,
        device_limit: u32,
    ) -> Self {
        Self {
            data: ReactiveState::new(ModalData {
                view: ModalView::closed(),
                candidate_count: 0,
                invocation: 0,
            }),
            bindings: Rc::new(RefCell::new(None)),
            binder: Rc::new(RefCell::new(None)),
            api,
            notifier,
            list,
            device_limit,
        }
    }

    pub fn set_binder(&self, binder: Rc<dyn ModalBinder>) {
        *self.binder.borrow_mut() = Some(binder);
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn view(&self) -> ModalView {
        self.data.with(|d| d.view.clone())
    }

    pub fn phase(&self) -> ModalPhase {
        self.data.with(|d| d.view.phase)
    }

    pub fn is_open(&self) -> bool {
        self.phase() != ModalPhase::Closed
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.data.subscribe(callback);
    }

    /// Open the dialog for a building and load its devices.
    pub async fn open(&self, building_id: i64) {
        self.detach_bindings();
        let invocation = self.data.update(|d| {
            d.invocation += 1;
            d.candidate_count = 0;
            d.view = ModalView::loading(building_id);
            d.invocation
        });
        self.attach_bindings();

        log::info!("🗂️ [MODAL] Loading proevents for building {}", building_id);
        let result = self
            .api
            .list_devices(building_id, self.device_limit, None)
            .await;

        let current = self
            .data
            .with(|d| d.invocation == invocation && d.view.phase == ModalPhase::Loading);
        if !current {
            log::debug!("⏭️ [MODAL] Dialog changed while loading, dropping result");
            return;
        }

        self.data.update(|d| {
            d.view.phase = ModalPhase::Ready;
            match result {
                Ok(records) => {
                    // The filter may have been typed while the rows were loading.
                    let search = d.view.search.clone();
                    d.candidate_count = records.len();
                    d.view.rows = devices_from_records(records)
                        .into_iter()
                        .map(|device| ModalRow {
                            checked: device.is_ignored,
                            visible: device.matches(&search),
                            device,
                            building_id,
                        })
                        .collect();
                    d.view.recompute_select_all();
                    if d.candidate_count == 0 {
                        d.view.body = ModalBody::NoDevices;
                    } else {
                        d.view.body = ModalBody::Rows;
                        d.view.confirm_enabled = true;
                    }
                }
                Err(err) => {
                    log::error!("❌ [MODAL] Error loading items into ignore modal: {}", err);
                    d.view.body = ModalBody::LoadFailed;
                }
            }
        });
    }

    /// Live name filter; the Select All label follows the visible rows.
    pub fn set_filter(&self, query: &str) {
        if !self.is_open() {
            return;
        }
        self.data.update(|d| {
            d.view.search = query.to_string();
            for row in d.view.rows.iter_mut() {
                row.visible = row.device.matches(query);
            }
            d.view.recompute_select_all();
        });
    }

    /// Check or uncheck every visible row; hidden rows keep their state.
    pub fn toggle_select_all(&self) {
        if self.phase() != ModalPhase::Ready {
            return;
        }
        self.data.update(|d| {
            let select = d.view.select_all == SelectAllLabel::SelectAll;
            for row in d.view.rows.iter_mut().filter(|r| r.visible) {
                row.checked = select;
            }
            d.view.select_all = if select {
                SelectAllLabel::DeselectAll
            } else {
                SelectAllLabel::SelectAll
            };
        });
    }

    pub fn set_checked(&self, device_id: i64, checked: bool) {
        if self.phase() != ModalPhase::Ready {
            return;
        }
        self.data.update(|d| {
            if let Some(row) = d.view.rows.iter_mut().find(|r| r.device.id == device_id) {
                row.checked = checked;
            }
        });
    }

    /// Submit the flags, re-evaluate the building, refresh its card, close.
    pub async fn confirm(&self) -> Result<()> {
        let (phase, items, candidates, building_id) = self.data.with(|d| {
            (
                d.view.phase,
                d.view.rows.iter().map(ModalRow::update_item).collect::<Vec<_>>(),
                d.candidate_count,
                d.view.building_id,
            )
        });
        if phase != ModalPhase::Ready {
            return Ok(());
        }
        let Some(building_id) = building_id else {
            self.close();
            return Ok(());
        };

        if items.is_empty() {
            if candidates > 0 {
                self.notifier.success("No changes detected or no items to update.");
            }
            self.close();
            return Ok(());
        }

        self.data.update(|d| {
            d.view.phase = ModalPhase::Submitting;
            d.view.confirm_enabled = false;
            d.view.cancel_enabled = false;
        });

        if let Err(err) = self.api.submit_ignore_updates(&items).await {
            return Err(self.recover(err));
        }
        self.notifier.success("Ignore settings saved. Applying changes...");

        if let Err(err) = self.api.reevaluate(building_id).await {
            return Err(self.recover(err));
        }
        self.notifier.success("Changes applied successfully.");

        if let Some(card) = self.list.card(building_id) {
            if let Err(err) = card.refresh_after_ignore().await {
                log::warn!("⚠️ [MODAL] Card refresh after ignore failed: {}", err);
            }
        }

        self.close();
        Ok(())
    }

    /// Cancel or explicit close: drop selection state and bindings.
    pub fn close(&self) {
        self.detach_bindings();
        self.data.update(|d| {
            d.candidate_count = 0;
            d.view = ModalView::closed();
        });
    }

    fn recover(&self, err: ConsoleError) -> ConsoleError {
        if err.is_unauthorized() {
            // Session reset and redirect are already scheduled; keep the dialog locked.
            log::info!("🔒 [MODAL] Session expired during submission, leaving dialog locked");
            return err;
        }
        log::error!("❌ [MODAL] Failed to save ignore settings or re-evaluate: {}", err);
        self.data.update(|d| {
            d.view.phase = ModalPhase::Ready;
            d.view.confirm_enabled = true;
            d.view.cancel_enabled = true;
        });
        err
    }

    fn attach_bindings(&self) {
        let binder = self.binder.borrow().clone();
        if let Some(binder) = binder {
            let bindings = binder.bind(self);
            *self.bindings.borrow_mut() = Some(bindings);
        }
    }

    fn detach_bindings(&self) {
        let previous = self.bindings.borrow_mut().take();
        drop(previous);
    }
}

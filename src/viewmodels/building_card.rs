// ============================================================================
// BUILDING CARD - One collapsible building with its lazily loaded devices
// ============================================================================

use std::rc::Rc;

use chrono::NaiveTime;

use crate::error::{ConsoleError, Result};
use crate::models::{devices_from_records, Building, Device};
use crate::platform::{Spawner, Timer, TimerId};
use crate::services::{ApiClient, Notifier};
use crate::state::ReactiveState;
use crate::viewmodels::status::{aggregate_status, BuildingStatus};

/// Handles shared by every card of the list.
pub struct CardEnv {
    pub api: ApiClient,
    pub notifier: Notifier,
    pub timer: Rc<dyn Timer>,
    pub spawner: Rc<dyn Spawner>,
    /// Cached building collection, updated optimistically on start-time saves.
    pub buildings: ReactiveState<Vec<Building>>,
    pub page_size: u32,
    pub debounce_ms: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceListState {
    NotLoaded,
    Loaded(Vec<Device>),
    Empty { searched: bool },
    Failed,
}

impl DeviceListState {
    pub fn devices(&self) -> &[Device] {
        match self {
            DeviceListState::Loaded(devices) => devices,
            _ => &[],
        }
    }

    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            DeviceListState::NotLoaded | DeviceListState::Loaded(_) => None,
            DeviceListState::Empty { searched: true } => Some("No proevents found matching search."),
            DeviceListState::Empty { searched: false } => Some("No proevents found."),
            DeviceListState::Failed => Some("Error loading proevents. Please try again."),
        }
    }

    /// Placeholder lists are refetched on the next expansion.
    fn needs_fetch(&self) -> bool {
        !matches!(self, DeviceListState::Loaded(_))
    }
}

struct CardData {
    building: Building,
    expanded: bool,
    loaded: bool,
    loading: bool,
    devices: DeviceListState,
    search: String,
    /// Bumped for every device request; older responses are discarded.
    generation: u64,
    debounce: Option<TimerId>,
}

/// Plain data the card view renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildingCardView {
    pub building_id: i64,
    pub title: String,
    pub start_time: String,
    pub expanded: bool,
    pub toggle_label: &'static str,
    pub loading: bool,
    pub devices: Vec<Device>,
    pub placeholder: Option<&'static str>,
    pub status: BuildingStatus,
}

#[derive(Clone)]
pub struct BuildingCard {
    data: ReactiveState<CardData>,
    env: Rc<CardEnv>,
}

impl BuildingCard {
    pub fn new(building: Building, env: Rc<CardEnv>) -> Self {
        Self {
            data: ReactiveState::new(CardData {
                building,
                expanded: false,
                loaded: false,
                loading: false,
                devices: DeviceListState::NotLoaded,
                search: String::new(),
                generation: 0,
                debounce: None,
            }),
            env,
        }
    }

    pub fn id(&self) -> i64 {
        self.data.with(|d| d.building.id)
    }

    pub fn is_expanded(&self) -> bool {
        self.data.with(|d| d.expanded)
    }

    pub fn devices(&self) -> DeviceListState {
        self.data.with(|d| d.devices.clone())
    }

    pub fn status(&self) -> BuildingStatus {
        self.data.with(|d| aggregate_status(d.devices.devices()))
    }

    pub fn view(&self) -> BuildingCardView {
        self.data.with(|d| BuildingCardView {
            building_id: d.building.id,
            title: d.building.title(),
            start_time: d.building.display_start_time().to_string(),
            expanded: d.expanded,
            toggle_label: if d.expanded { "-" } else { "+" },
            loading: d.loading,
            devices: d.devices.devices().to_vec(),
            placeholder: d.devices.placeholder(),
            status: aggregate_status(d.devices.devices()),
        })
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.data.subscribe(callback);
    }

    /// Expand (fetching devices on first use) or collapse the card.
    pub async fn toggle(&self) {
        if self.is_expanded() {
            self.data.update(|d| d.expanded = false);
            return;
        }

        let needs_fetch = self.data.with(|d| !d.loaded || d.devices.needs_fetch());
        if needs_fetch {
            let loaded = self.load_devices("").await.is_ok();
            self.data.update_silently(|d| d.loaded = loaded);
        }
        self.data.update(|d| d.expanded = true);
    }

    /// Used when the card is the result of a single-building filter.
    pub async fn expand_and_load(&self) {
        let loaded = self.load_devices("").await.is_ok();
        self.data.update(|d| {
            d.loaded = loaded;
            d.expanded = true;
        });
    }

    /// Replace the device list with a fresh fetch.
    pub async fn load_devices(&self, search: &str) -> Result<()> {
        let (building_id, generation) = self.data.update(|d| {
            d.generation += 1;
            d.loading = true;
            (d.building.id, d.generation)
        });

        let result = self
            .env
            .api
            .list_devices(building_id, self.env.page_size, Some(search))
            .await;

        if self.data.with(|d| d.generation) != generation {
            log::debug!("⏭️ [CARD] Dropping stale device list for building {}", building_id);
            return result.map(|_| ());
        }

        let searched = !search.is_empty();
        self.data.update(|d| {
            d.loading = false;
            d.devices = match &result {
                Ok(records) => {
                    let devices = devices_from_records(records.clone());
                    if devices.is_empty() {
                        DeviceListState::Empty { searched }
                    } else {
                        DeviceListState::Loaded(devices)
                    }
                }
                Err(_) => DeviceListState::Failed,
            };
        });

        if let Err(err) = &result {
            log::error!("❌ [CARD] Error loading items for building {}: {}", building_id, err);
        }
        result.map(|_| ())
    }

    /// Debounced server-side search within this building.
    pub fn on_search_input(&self, value: &str) {
        let previous = self.data.update_silently(|d| {
            d.search = value.to_string();
            d.debounce.take()
        });
        if let Some(id) = previous {
            self.env.timer.cancel(id);
        }

        let card = self.clone();
        let spawner = self.env.spawner.clone();
        let term = value.trim().to_string();
        let id = self.env.timer.schedule(
            self.env.debounce_ms,
            Box::new(move || {
                card.data.update_silently(|d| {
                    d.debounce = None;
                    d.loaded = false;
                });
                spawner.spawn(Box::pin(async move {
                    let _ = card.load_devices(&term).await;
                }));
            }),
        );
        self.data.update_silently(|d| d.debounce = Some(id));
    }

    /// Validate and save the scheduled start time.
    pub async fn save_start_time(&self, value: &str) -> Result<()> {
        let value = value.trim();
        if value.is_empty() {
            return Err(self.reject("Start time is required."));
        }
        if NaiveTime::parse_from_str(value, "%H:%M").is_err() {
            return Err(self.reject("Start time must be in HH:MM format."));
        }

        let building_id = self.id();
        self.env.api.set_start_time(building_id, value).await?;
        self.env.notifier.success("Building schedule updated successfully");

        self.env.buildings.update(|buildings| {
            if let Some(cached) = buildings.iter_mut().find(|b| b.id == building_id) {
                cached.start_time = Some(value.to_string());
            }
        });
        self.data
            .update(|d| d.building.start_time = Some(value.to_string()));
        Ok(())
    }

    /// After ignore flags change: reload if visible, otherwise drop the cache.
    pub async fn refresh_after_ignore(&self) -> Result<()> {
        let (expanded, search) = self.data.update_silently(|d| {
            d.loaded = false;
            (d.expanded, d.search.trim().to_string())
        });

        if expanded {
            self.load_devices(&search).await?;
            self.data.update(|d| d.loaded = true);
        } else {
            self.data.update(|d| d.devices = DeviceListState::NotLoaded);
        }
        Ok(())
    }

    fn reject(&self, message: &str) -> ConsoleError {
        self.env.notifier.error(message);
        ConsoleError::InvalidInput(message.to_string())
    }
}

// ============================================================================
// BUILDING LIST - Building cards, typeahead filter and the building cache
// ============================================================================

use std::rc::Rc;

use crate::config::AppConfig;
use crate::models::Building;
use crate::platform::{Spawner, Timer};
use crate::services::{ApiClient, Notifier};
use crate::state::ReactiveState;
use crate::viewmodels::building_card::{BuildingCard, CardEnv};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListContent {
    Idle,
    Cards,
    NoBuildings,
    LoadFailed,
}

impl ListContent {
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            ListContent::NoBuildings => Some("No buildings found."),
            ListContent::LoadFailed => Some("Failed to load buildings. Please try again later."),
            ListContent::Idle | ListContent::Cards => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub query: String,
    pub suggestions: Vec<Building>,
    pub dropdown_visible: bool,
    pub clear_visible: bool,
    pub selected_building: Option<i64>,
}

impl FilterState {
    /// The dropdown shows a "No buildings found" entry instead of suggestions.
    pub fn shows_no_match(&self) -> bool {
        self.dropdown_visible && self.suggestions.is_empty()
    }
}

#[derive(Clone)]
pub struct BuildingListController {
    env: Rc<CardEnv>,
    cards: ReactiveState<Vec<BuildingCard>>,
    content: ReactiveState<ListContent>,
    filter: ReactiveState<FilterState>,
}

impl BuildingListController {
    pub fn new(
        api: ApiClient,
        notifier: Notifier,
        timer: Rc<dyn Timer>,
        spawner: Rc<dyn Spawner>,
        config: &AppConfig,
    ) -> Self {
        let env = CardEnv {
            api,
            notifier,
            timer,
            spawner,
            buildings: ReactiveState::new(Vec::new()),
            page_size: config.paging.device_page_size,
            debounce_ms: config.timing.search_debounce_ms,
        };
        Self {
            env: Rc::new(env),
            cards: ReactiveState::new(Vec::new()),
            content: ReactiveState::new(ListContent::Idle),
            filter: ReactiveState::default(),
        }
    }

    /// Fetch every building and render one collapsed card each.
    /// Failures end up as a placeholder, never as an error for the caller.
    pub async fn load_all(&self) {
        self.filter.update(|f| f.selected_building = None);
        self.cards.update_silently(|cards| cards.clear());
        self.content.set(ListContent::Idle);

        log::info!("🏢 [APP] Loading all buildings...");
        match self.env.api.list_buildings().await {
            Ok(buildings) => {
                let cards = buildings
                    .iter()
                    .cloned()
                    .map(|b| BuildingCard::new(b, self.env.clone()))
                    .collect::<Vec<_>>();
                let content = if cards.is_empty() {
                    ListContent::NoBuildings
                } else {
                    ListContent::Cards
                };
                self.env.buildings.set(buildings);
                self.cards.update_silently(|current| *current = cards);
                self.content.set(content);
            }
            Err(err) => {
                log::error!("❌ [APP] Failed to load buildings: {}", err);
                self.content.set(ListContent::LoadFailed);
            }
        }
    }

    /// Typeahead over the cached collection. An empty query drops an active
    /// single-building selection and restores the full list.
    pub async fn set_filter_query(&self, query: &str) {
        if query.is_empty() {
            let had_selection = self.filter.with(|f| f.selected_building.is_some());
            self.filter.set(FilterState::default());
            if had_selection {
                self.load_all().await;
            }
            return;
        }

        let suggestions = self.env.buildings.with(|buildings| {
            buildings
                .iter()
                .filter(|b| b.matches(query))
                .cloned()
                .collect::<Vec<_>>()
        });
        self.filter.update(|f| {
            f.query = query.to_string();
            f.suggestions = suggestions;
            f.dropdown_visible = true;
            f.clear_visible = true;
        });
    }

    /// Narrow the view to one auto-expanded card.
    pub async fn select_building(&self, building_id: i64) {
        let Some(building) = self
            .env
            .buildings
            .with(|buildings| buildings.iter().find(|b| b.id == building_id).cloned())
        else {
            log::warn!("⚠️ [APP] Unknown building {} selected", building_id);
            return;
        };

        self.filter.update(|f| {
            f.query = building.name.clone();
            f.dropdown_visible = false;
            f.clear_visible = true;
            f.selected_building = Some(building.id);
        });

        let card = BuildingCard::new(building, self.env.clone());
        self.cards.update_silently(|cards| *cards = vec![card.clone()]);
        self.content.set(ListContent::Cards);
        card.expand_and_load().await;
    }

    pub async fn clear_filter(&self) {
        self.filter.set(FilterState::default());
        self.load_all().await;
    }

    /// Hide the suggestion dropdown (click outside the filter).
    pub fn dismiss_suggestions(&self) {
        if self.filter.with(|f| f.dropdown_visible) {
            self.filter.update(|f| f.dropdown_visible = false);
        }
    }

    pub fn card(&self, building_id: i64) -> Option<BuildingCard> {
        self.cards
            .with(|cards| cards.iter().find(|c| c.id() == building_id).cloned())
    }

    pub fn cards(&self) -> Vec<BuildingCard> {
        self.cards.get()
    }

    pub fn content(&self) -> ListContent {
        self.content.get()
    }

    pub fn filter(&self) -> FilterState {
        self.filter.get()
    }

    pub fn all_buildings(&self) -> Vec<Building> {
        self.env.buildings.get()
    }

    /// Fires when the set of cards or the list placeholder changes.
    pub fn subscribe_cards<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        let callback = Rc::new(callback);
        let on_cards = callback.clone();
        self.cards.subscribe(move || on_cards());
        self.content.subscribe(move || callback());
    }

    pub fn subscribe_filter<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.filter.subscribe(callback);
    }
}

// ============================================================================
// BUILDING LIST VIEW - Card container and the building name filter
// ============================================================================

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Event, Node};

use crate::dom::{
    append_child, as_input, clear_children, document, on, require_by_id, require_selector,
    set_displayed, ElementBuilder,
};
use crate::error::{ConsoleError, Result};
use crate::viewmodels::BuildingListController;
use crate::views::building_card::{render_card, OpenIgnoreDialog};

pub fn bind_building_list(list: &BuildingListController, open_dialog: OpenIgnoreDialog) -> Result<()> {
    let container = require_by_id("deviceList")?;
    let source = list.clone();
    list.subscribe_cards(move || {
        if let Err(err) = render_list(&container, &source, &open_dialog) {
            log::error!("❌ [APP] Building list render failed: {}", err);
        }
    });
    Ok(())
}

fn render_list(
    container: &Element,
    list: &BuildingListController,
    open_dialog: &OpenIgnoreDialog,
) -> Result<()> {
    clear_children(container);
    if let Some(placeholder) = list.content().placeholder() {
        let message = ElementBuilder::new("p")?.class("muted").text(placeholder).build();
        return append_child(container, &message);
    }
    for card in list.cards() {
        append_child(container, &render_card(&card, open_dialog.clone())?)?;
    }
    Ok(())
}

pub fn bind_building_filter(list: &BuildingListController) -> Result<()> {
    let search = require_selector(None, ".building-search")?;
    let dropdown = require_selector(None, ".building-dropdown")?;
    let clear = require_selector(None, ".clear-filter")?;
    let search_input = as_input(&search)?;

    {
        let list = list.clone();
        let input = search_input.clone();
        on(&search, "input", move |_| {
            let list = list.clone();
            let query = input.value();
            spawn_local(async move { list.set_filter_query(&query).await });
        })?;
    }
    {
        let list = list.clone();
        let input = search_input.clone();
        on(&clear, "click", move |_| {
            input.set_value("");
            let list = list.clone();
            spawn_local(async move { list.clear_filter().await });
        })?;
    }
    {
        let list = list.clone();
        let search = search.clone();
        let dropdown = dropdown.clone();
        let doc = document().ok_or_else(|| ConsoleError::ElementMissing("document".to_string()))?;
        on(&doc, "click", move |event: Event| {
            let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
            let inside = search.contains(target.as_ref()) || dropdown.contains(target.as_ref());
            if !inside {
                list.dismiss_suggestions();
            }
        })?;
    }

    let source = list.clone();
    list.subscribe_filter(move || {
        let filter = source.filter();
        if search_input.value() != filter.query {
            search_input.set_value(&filter.query);
        }
        set_displayed(&clear, filter.clear_visible);
        if let Err(err) = render_suggestions(&dropdown, &source) {
            log::error!("❌ [APP] Suggestion render failed: {}", err);
        }
    });
    Ok(())
}

fn render_suggestions(dropdown: &Element, list: &BuildingListController) -> Result<()> {
    let filter = list.filter();
    clear_children(dropdown);
    set_displayed(dropdown, filter.dropdown_visible);
    if !filter.dropdown_visible {
        return Ok(());
    }

    if filter.shows_no_match() {
        let none = ElementBuilder::new("div")?
            .class("building-option muted")
            .text("No buildings found")
            .build();
        return append_child(dropdown, &none);
    }

    for building in filter.suggestions {
        let option = ElementBuilder::new("div")?
            .class("building-option")
            .text(&building.name)
            .build();
        let list = list.clone();
        on(&option, "click", move |_| {
            let list = list.clone();
            spawn_local(async move { list.select_building(building.id).await });
        })?;
        append_child(dropdown, &option)?;
    }
    Ok(())
}

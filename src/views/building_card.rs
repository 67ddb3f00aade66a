// ============================================================================
// BUILDING CARD VIEW - Card skeleton built once, dynamic parts updated in place
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Event, HtmlInputElement};

use crate::dom::{
    append_child, as_input, clear_children, on, set_displayed, set_text, ElementBuilder,
};
use crate::error::Result;
use crate::models::Device;
use crate::viewmodels::{BuildingCard, BuildingCardView};

/// Opens the bulk ignore dialog for a building.
pub type OpenIgnoreDialog = Rc<dyn Fn(i64)>;

struct CardElements {
    toggle_btn: Element,
    status: Element,
    time_input: HtmlInputElement,
    body: Element,
    items_list: Element,
    loader: Element,
}

pub fn render_card(card: &BuildingCard, open_dialog: OpenIgnoreDialog) -> Result<Element> {
    let view = card.view();

    let toggle_btn = ElementBuilder::new("button")?
        .class("toggle-btn")
        .text(view.toggle_label)
        .build();
    let title = ElementBuilder::new("h2")?
        .class("building-title")
        .text(&view.title)
        .build();
    let ignore_btn = ElementBuilder::new("button")?
        .class("bulk-btn bulk-disarm")
        .text("Set Ignore Flags")
        .build();
    let actions = ElementBuilder::new("div")?
        .class("building-actions")
        .child(ignore_btn.clone())?
        .build();

    let time_element = ElementBuilder::new("input")?
        .class("time-input start-time-input")
        .attr("type", "time")?
        .attr("required", "")?
        .build();
    let time_input = as_input(&time_element)?;
    time_input.set_value(&view.start_time);
    let save_btn = ElementBuilder::new("button")?
        .class("time-save-btn")
        .text("Save")
        .build();
    let time_control = ElementBuilder::new("div")?
        .class("building-time-control")
        .child(ElementBuilder::new("label")?.text("Start Time:").build())?
        .child(time_element)?
        .child(save_btn.clone())?
        .build();

    let status = ElementBuilder::new("div")?.class("building-status").build();
    let header = ElementBuilder::new("div")?
        .class("building-header")
        .child(toggle_btn.clone())?
        .child(title)?
        .child(actions)?
        .child(time_control)?
        .child(status.clone())?
        .build();

    let search = ElementBuilder::new("input")?
        .class("item-search")
        .attr("type", "text")?
        .attr("placeholder", "Search proevents...")?
        .build();
    let items_list = ElementBuilder::new("ul")?.class("items-list").build();
    let loader = ElementBuilder::new("div")?
        .class("building-loader")
        .text("Loading...")
        .build();
    let body = ElementBuilder::new("div")?
        .class("building-body")
        .child(
            ElementBuilder::new("div")?
                .class("building-controls")
                .child(search.clone())?
                .build(),
        )?
        .child(items_list.clone())?
        .child(loader.clone())?
        .build();

    let root = ElementBuilder::new("div")?
        .class("building-card")
        .data("building-id", &view.building_id.to_string())?
        .child(header.clone())?
        .child(body.clone())?
        .build();

    let elements = Rc::new(CardElements {
        toggle_btn: toggle_btn.clone(),
        status,
        time_input: time_input.clone(),
        body,
        items_list,
        loader,
    });
    update_card(&elements, &view)?;

    // Header clicks toggle, except on its own controls.
    {
        let card = card.clone();
        on(&header, "click", move |event: Event| {
            if is_inside_control(&event) {
                return;
            }
            let card = card.clone();
            spawn_local(async move { card.toggle().await });
        })?;
    }
    {
        let card = card.clone();
        on(&toggle_btn, "click", move |event: Event| {
            event.stop_propagation();
            let card = card.clone();
            spawn_local(async move { card.toggle().await });
        })?;
    }
    {
        let card = card.clone();
        let time_input = time_input.clone();
        on(&save_btn, "click", move |event: Event| {
            event.stop_propagation();
            let card = card.clone();
            let value = time_input.value();
            spawn_local(async move {
                let _ = card.save_start_time(&value).await;
            });
        })?;
    }
    {
        let card = card.clone();
        let search_input = as_input(&search)?;
        on(&search, "input", move |_| card.on_search_input(&search_input.value()))?;
    }
    {
        let building_id = view.building_id;
        on(&ignore_btn, "click", move |event: Event| {
            event.stop_propagation();
            open_dialog(building_id);
        })?;
    }

    {
        let source = card.clone();
        let elements = elements.clone();
        card.subscribe(move || {
            if let Err(err) = update_card(&elements, &source.view()) {
                log::error!("❌ [APP] Card render failed: {}", err);
            }
        });
    }

    Ok(root)
}

fn update_card(elements: &CardElements, view: &BuildingCardView) -> Result<()> {
    set_text(&elements.toggle_btn, view.toggle_label);
    set_displayed(&elements.body, view.expanded);
    set_displayed(&elements.loader, view.loading);
    if elements.time_input.value() != view.start_time {
        elements.time_input.set_value(&view.start_time);
    }

    elements.status.set_class_name(&format!("building-status {}", view.status.css_class()));
    set_text(&elements.status, view.status.label());

    clear_children(&elements.items_list);
    if let Some(placeholder) = view.placeholder {
        let item = ElementBuilder::new("li")?.class("muted").text(placeholder).build();
        append_child(&elements.items_list, &item)?;
    }
    for device in &view.devices {
        append_child(&elements.items_list, &render_device(device)?)?;
    }
    Ok(())
}

fn render_device(device: &Device) -> Result<Element> {
    let (color, class) = if device.is_armed() {
        ("#ef4444", "status-all-armed")
    } else {
        ("#22c55e", "state-unknown")
    };
    let indicator = ElementBuilder::new("span")?
        .class(&format!("device-state-indicator {}", class))
        .attr("style", &format!("background-color: {};", color))?
        .build();

    let name = ElementBuilder::new("div")?
        .class("device-name")
        .text(&device.label())
        .build();
    if device.is_ignored {
        let ignored = ElementBuilder::new("span")?
            .attr("style", "color: #9ca3af; font-style: italic;")?
            .text(" (Ignored)")
            .build();
        append_child(&name, &ignored)?;
    }

    Ok(ElementBuilder::new("li")?
        .class("device-item")
        .data("item-id", &device.id.to_string())?
        .data("state", &device.state)?
        .child(indicator)?
        .child(name)?
        .build())
}

fn is_inside_control(event: &Event) -> bool {
    event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok())
        .map(|target| {
            matches!(
                target.closest(".building-time-control, .building-actions, .toggle-btn"),
                Ok(Some(_))
            )
        })
        .unwrap_or(false)
}

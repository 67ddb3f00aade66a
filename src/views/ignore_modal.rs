// ============================================================================
// IGNORE MODAL VIEW - Renders BulkIgnoreModal and owns its DOM listeners
// ============================================================================
// Listeners on the dialog controls live only while the dialog is open: the
// binder hands them to the view model, which drops them on close/reopen.
// Handlers that may close the dialog defer the work with spawn_local, so a
// listener is never dropped while it is running.
// ============================================================================

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Event, HtmlButtonElement, HtmlElement, HtmlInputElement};

use crate::dom::{
    append_child, as_button, as_input, clear_children, require_by_id, require_selector, set_displayed,
    set_text, ElementBuilder, Listener,
};
use crate::error::{ConsoleError, Result};
use crate::viewmodels::{BulkIgnoreModal, ModalBinder, ModalPhase, ModalRow, ModalView};

#[derive(Clone)]
struct ModalElements {
    dialog: Element,
    title: Element,
    item_list: Element,
    search: HtmlInputElement,
    select_all: HtmlButtonElement,
    confirm: HtmlButtonElement,
    cancel: HtmlButtonElement,
    close: Element,
}

impl ModalElements {
    fn lookup() -> Result<Self> {
        Ok(Self {
            dialog: require_by_id("ignoreModal")?,
            title: require_by_id("modalTitle")?,
            item_list: require_by_id("modalItemList")?,
            search: as_input(&require_by_id("modalSearch")?)?,
            select_all: as_button(&require_by_id("modalSelectAllBtn")?)?,
            confirm: as_button(&require_by_id("modalConfirmBtn")?)?,
            cancel: as_button(&require_by_id("modalCancelBtn")?)?,
            close: require_selector(None, ".close-button")?,
        })
    }
}

struct RenderedRow {
    device_id: i64,
    element: Element,
    checkbox: HtmlInputElement,
}

struct DomModalBinder {
    elements: ModalElements,
}

impl ModalBinder for DomModalBinder {
    fn bind(&self, modal: &BulkIgnoreModal) -> Box<dyn Any> {
        match bind_listeners(&self.elements, modal) {
            Ok(listeners) => Box::new(listeners),
            Err(err) => {
                log::error!("❌ [MODAL] Could not attach dialog handlers: {}", err);
                Box::new(())
            }
        }
    }
}

fn bind_listeners(elements: &ModalElements, modal: &BulkIgnoreModal) -> Result<Vec<Listener>> {
    let mut listeners = Vec::new();

    let m = modal.clone();
    listeners.push(Listener::new(&elements.confirm, "click", move |_| {
        let m = m.clone();
        spawn_local(async move {
            let _ = m.confirm().await;
        });
    })?);

    for target in [elements.cancel.clone().unchecked_into::<Element>(), elements.close.clone()] {
        let m = modal.clone();
        listeners.push(Listener::new(&target, "click", move |_| {
            let m = m.clone();
            spawn_local(async move { m.close() });
        })?);
    }

    let m = modal.clone();
    let search = elements.search.clone();
    listeners.push(Listener::new(&elements.search, "input", move |_| {
        m.set_filter(&search.value());
    })?);

    let m = modal.clone();
    listeners.push(Listener::new(&elements.select_all, "click", move |_| {
        m.toggle_select_all();
    })?);

    let m = modal.clone();
    listeners.push(Listener::new(&elements.item_list, "change", move |event: Event| {
        let Some(checkbox) = event
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };
        let device_id = checkbox
            .get_attribute("data-device-prk")
            .and_then(|id| id.parse::<i64>().ok());
        if let Some(device_id) = device_id {
            m.set_checked(device_id, checkbox.checked());
        }
    })?);

    Ok(listeners)
}

/// Wire the dialog. Returns the opener used by building cards; when the page
/// lacks the dialog markup the opener only reports the problem.
pub fn bind_ignore_modal(modal: &BulkIgnoreModal) -> Rc<dyn Fn(i64)> {
    let elements = match ModalElements::lookup() {
        Ok(elements) => elements,
        Err(err) => {
            log::error!("❌ [MODAL] Modal elements not found: {}", err);
            let notifier = modal_notifier(modal);
            return Rc::new(move |_: i64| notifier("Error: Could not open ignore settings."));
        }
    };

    modal.set_binder(Rc::new(DomModalBinder {
        elements: elements.clone(),
    }));

    let rendered: Rc<RefCell<Vec<RenderedRow>>> = Rc::new(RefCell::new(Vec::new()));
    let source = modal.clone();
    modal.subscribe(move || {
        if let Err(err) = render_modal(&elements, &rendered, &source.view()) {
            log::error!("❌ [MODAL] Render failed: {}", err);
        }
    });

    let modal = modal.clone();
    Rc::new(move |building_id: i64| {
        let modal = modal.clone();
        spawn_local(async move { modal.open(building_id).await });
    })
}

fn modal_notifier(modal: &BulkIgnoreModal) -> impl Fn(&str) {
    let notifier = modal.notifier().clone();
    move |message| notifier.error(message)
}

fn render_modal(
    elements: &ModalElements,
    rendered: &Rc<RefCell<Vec<RenderedRow>>>,
    view: &ModalView,
) -> Result<()> {
    set_displayed(&elements.dialog, view.phase != ModalPhase::Closed);
    set_text(&elements.title, &view.title);
    if elements.search.value() != view.search {
        elements.search.set_value(&view.search);
    }
    set_text(&elements.select_all, view.select_all.text());
    elements.confirm.set_disabled(!view.confirm_enabled);
    elements.cancel.set_disabled(!view.cancel_enabled);

    let mut rows = rendered.borrow_mut();
    let same_rows = rows.len() == view.rows.len()
        && rows
            .iter()
            .zip(view.rows.iter())
            .all(|(shown, row)| shown.device_id == row.device.id);

    if same_rows && !view.rows.is_empty() {
        for (shown, row) in rows.iter().zip(view.rows.iter()) {
            update_row(shown, row);
        }
        return Ok(());
    }

    rows.clear();
    clear_children(&elements.item_list);
    if let Some(placeholder) = view.body.placeholder() {
        let class = if view.phase == ModalPhase::Loading { "loader" } else { "muted" };
        let tag = if class == "loader" { "div" } else { "p" };
        let message = ElementBuilder::new(tag)?.class(class).text(placeholder).build();
        append_child(&elements.item_list, &message)?;
    }
    for row in &view.rows {
        let shown = render_row(row)?;
        append_child(&elements.item_list, &shown.element)?;
        update_row(&shown, row);
        rows.push(shown);
    }
    Ok(())
}

fn render_row(row: &ModalRow) -> Result<RenderedRow> {
    let checkbox_element = ElementBuilder::new("input")?
        .class("ignore-item-checkbox")
        .attr("type", "checkbox")?
        .data("device-prk", &row.device.id.to_string())?
        .build();
    let checkbox = as_input(&checkbox_element)?;

    let label = ElementBuilder::new("label")?
        .class("ignore-alarm-label")
        .child(checkbox_element)?
        .build();
    label
        .append_with_str_1(" Ignore on Disarm")
        .map_err(|e| ConsoleError::ElementMissing(format!("label text: {:?}", e)))?;

    let element = ElementBuilder::new("div")?
        .class("device-item")
        .data("item-id", &row.device.id.to_string())?
        .data("building-frk", &row.building_id.to_string())?
        .data("device-prk", &row.device.id.to_string())?
        .child(
            ElementBuilder::new("div")?
                .class("device-name")
                .text(&row.device.label())
                .build(),
        )?
        .child(label)?
        .build();

    Ok(RenderedRow {
        device_id: row.device.id,
        element,
        checkbox,
    })
}

fn update_row(shown: &RenderedRow, row: &ModalRow) {
    if shown.checkbox.checked() != row.checked {
        shown.checkbox.set_checked(row.checked);
    }
    if let Some(html) = shown.element.dyn_ref::<HtmlElement>() {
        let _ = html
            .style()
            .set_property("display", if row.visible { "flex" } else { "none" });
    }
}

// ============================================================================
// NOTIFICATION VIEW - Toast element and the global loader
// ============================================================================

use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

use crate::dom::{require_by_id, set_background, set_class, set_displayed, set_text};
use crate::error::Result;
use crate::services::{Notification, NotificationKind, Notifier};
use crate::state::LoadingState;

/// Background and text colours for each notification kind.
#[derive(Clone, Copy)]
pub struct Palette {
    pub success_background: &'static str,
    pub error_background: &'static str,
    pub success_text: Option<&'static str>,
    pub error_text: Option<&'static str>,
}

pub const MAIN_PALETTE: Palette = Palette {
    success_background: "#22c55e",
    error_background: "#ef4444",
    success_text: None,
    error_text: None,
};

pub const LOGIN_PALETTE: Palette = Palette {
    success_background: "#d1fae5",
    error_background: "#fee2e2",
    success_text: Some("#059669"),
    error_text: Some("#dc2626"),
};

pub fn bind_notification(notifier: &Notifier, element_id: &str, palette: Palette) -> Result<()> {
    let element = require_by_id(element_id)?;
    let source = notifier.clone();
    notifier.subscribe(move || render_notification(&element, source.current(), palette));
    Ok(())
}

fn render_notification(element: &Element, notification: Option<Notification>, palette: Palette) {
    let Some(notification) = notification else {
        set_class(element, "show", false);
        return;
    };

    set_text(element, &notification.message);
    let (background, text) = match notification.kind {
        NotificationKind::Success => (palette.success_background, palette.success_text),
        NotificationKind::Error => (palette.error_background, palette.error_text),
    };
    set_background(element, background);
    if let (Some(color), Some(html)) = (text, element.dyn_ref::<HtmlElement>()) {
        let _ = html.style().set_property("color", color);
    }
    set_class(element, "show", notification.visible);
}

pub fn bind_loader(loading: &LoadingState, element_id: &str) -> Result<()> {
    let element = require_by_id(element_id)?;
    let source = loading.clone();
    loading.subscribe(move || set_displayed(&element, source.is_visible()));
    Ok(())
}

// ============================================================================
// HEADER VIEW - Logged-in user and logout button
// ============================================================================

use crate::app::ConsoleApp;
use crate::dom::{on, require_by_id, set_text};
use crate::error::Result;

pub fn bind_header(app: &ConsoleApp) -> Result<()> {
    if let Some(text) = app.header_text() {
        let display = require_by_id("usernameDisplay")?;
        set_text(&display, &text);
    }

    let logout = require_by_id("logoutBtn")?;
    let app = app.clone();
    on(&logout, "click", move |_| {
        app.logout();
    })
}

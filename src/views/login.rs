// ============================================================================
// LOGIN VIEW - Binds the static login form to LoginViewModel
// ============================================================================

use wasm_bindgen_futures::spawn_local;
use web_sys::Event;

use crate::dom::{as_button, as_input, on, require_by_id, set_text};
use crate::error::Result;
use crate::viewmodels::LoginViewModel;
use crate::views::notification::{bind_notification, LOGIN_PALETTE};

pub fn bind_login(vm: &LoginViewModel) -> Result<()> {
    bind_notification(vm.notifier(), "errorMessage", LOGIN_PALETTE)?;

    let form = require_by_id("loginForm")?;
    let username = as_input(&require_by_id("username")?)?;
    let password = as_input(&require_by_id("password")?)?;
    let button = as_button(&require_by_id("loginButton")?)?;

    {
        let source = vm.clone();
        let button = button.clone();
        vm.subscribe(move || {
            let state = source.form();
            button.set_disabled(state.submitting);
            set_text(&button, state.button_label);
        });
    }

    let vm = vm.clone();
    on(&form, "submit", move |event: Event| {
        event.prevent_default();
        let vm = vm.clone();
        let username = username.value();
        let password = password.value();
        spawn_local(async move {
            let _ = vm.submit(&username, &password).await;
        });
    })
}

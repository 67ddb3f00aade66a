// ============================================================================
// APP VIEW - Mounts the console or the login page onto the static markup
// ============================================================================
// A missing piece of markup disables only the feature that needs it.
// ============================================================================

use crate::app::ConsoleApp;
use crate::error::Result;
use crate::viewmodels::LoginViewModel;
use crate::views::building_list::{bind_building_filter, bind_building_list};
use crate::views::header::bind_header;
use crate::views::ignore_modal::bind_ignore_modal;
use crate::views::login::bind_login;
use crate::views::notification::{bind_loader, bind_notification, MAIN_PALETTE};

fn report(feature: &str, result: Result<()>) {
    if let Err(err) = result {
        log::error!("❌ [APP] {} disabled: {}", feature, err);
    }
}

/// Bind every view to its view model, then start the console.
pub fn mount_console(app: &ConsoleApp) {
    report("Notifications", bind_notification(app.notifier(), "notification", MAIN_PALETTE));
    report("Loader", bind_loader(app.loading(), "loader"));

    let open_dialog = bind_ignore_modal(app.ignore_modal());
    report("Building list", bind_building_list(app.buildings(), open_dialog));
    report("Building filter", bind_building_filter(app.buildings()));

    if !app.start() {
        return;
    }
    report("Header", bind_header(app));
    log::info!("✅ [APP] Application initialized successfully");
}

pub fn mount_login(vm: &LoginViewModel) {
    report("Login form", bind_login(vm));

    let vm = vm.clone();
    wasm_bindgen_futures::spawn_local(async move {
        vm.check_existing_session().await;
    });
}

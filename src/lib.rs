// ============================================================================
// PROEVENT ADMIN CONSOLE - Browser client (Rust + WASM, MVVM)
// ============================================================================
// - Views: DOM binding and rendering, no logic (browser only)
// - ViewModels: UI state machines and behaviour
// - Services: API gateway, auth, notifications
// - State: Shared state with Rc<RefCell> + subscribers
// - Platform: storage/navigation/HTTP/timer seams (browser or in-memory)
// ============================================================================

pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod platform;
pub mod services;
pub mod state;
pub mod viewmodels;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod views;

pub use app::{login_page, ConsoleApp};
pub use config::{AppConfig, CONFIG};
pub use error::{ConsoleError, Result};
pub use platform::Platform;

#[cfg(target_arch = "wasm32")]
mod entry {
    use std::cell::RefCell;

    use wasm_bindgen::prelude::*;
    use wasm_logger::Config;

    use crate::app::{login_page, ConsoleApp};
    use crate::config::CONFIG;
    use crate::platform::Platform;
    use crate::views;

    // Keeps the console alive for the lifetime of the page
    thread_local! {
        static APP: RefCell<Option<ConsoleApp>> = RefCell::new(None);
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if CONFIG.is_logging_enabled() {
            wasm_logger::init(Config::default());
        }
        log::info!("🚀 ProEvent Admin Console - Rust + MVVM");

        let platform = Platform::browser();
        let config = CONFIG.clone();
        let path = platform.navigator.current_path();

        if path == config.login_path {
            log::info!("🔐 [LOGIN] Page loaded");
            let vm = login_page(&platform, &config);
            views::mount_login(&vm);
            return Ok(());
        }

        let app = ConsoleApp::new(platform, config);
        views::mount_console(&app);
        APP.with(|cell| *cell.borrow_mut() = Some(app));
        Ok(())
    }
}

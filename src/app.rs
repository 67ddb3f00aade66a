// ============================================================================
// APP - Wires the main console view together
// ============================================================================
// One SessionContext, one Notifier and one LoadingState are created here and
// handed to every component; the browser layer only renders and forwards events.
// ============================================================================

use crate::config::AppConfig;
use crate::platform::Platform;
use crate::services::{ApiClient, ApiGateway, AuthService, Notifier, SessionGuard};
use crate::state::{LoadingState, SessionContext};
use crate::viewmodels::{BuildingListController, BulkIgnoreModal, LoginViewModel};

/// Main (authenticated) console.
#[derive(Clone)]
pub struct ConsoleApp {
    platform: Platform,
    session: SessionContext,
    notifier: Notifier,
    loading: LoadingState,
    guard: SessionGuard,
    api: ApiClient,
    list: BuildingListController,
    modal: BulkIgnoreModal,
}

impl ConsoleApp {
    pub fn new(platform: Platform, config: AppConfig) -> Self {
        let session = SessionContext::new(platform.storage.clone());
        let notifier = Notifier::new(
            platform.timer.clone(),
            config.timing.notification_timeout_ms,
        );
        let loading = LoadingState::new();

        let auth = AuthService::new(config.clone(), platform.transport.clone());
        let guard = SessionGuard::new(
            session.clone(),
            auth,
            platform.navigator.clone(),
            platform.spawner.clone(),
            config.login_path.clone(),
        );

        let gateway = ApiGateway::new(
            config.clone(),
            session.clone(),
            platform.transport.clone(),
            notifier.clone(),
            loading.clone(),
            platform.timer.clone(),
            platform.navigator.clone(),
        );
        let api = ApiClient::new(gateway);

        let list = BuildingListController::new(
            api.clone(),
            notifier.clone(),
            platform.timer.clone(),
            platform.spawner.clone(),
            &config,
        );
        let modal = BulkIgnoreModal::new(
            api.clone(),
            notifier.clone(),
            list.clone(),
            config.paging.modal_device_limit,
        );

        Self {
            platform,
            session,
            notifier,
            loading,
            guard,
            api,
            list,
            modal,
        }
    }

    /// Gate on the session, then load the building list in the background.
    /// Returns `false` when a redirect to login was issued instead.
    pub fn start(&self) -> bool {
        log::info!("🚀 [APP] Initializing admin console...");
        if !self.guard.initialize() {
            return false;
        }

        let list = self.list.clone();
        self.platform.spawner.spawn(Box::pin(async move {
            list.load_all().await;
        }));
        true
    }

    /// "Logged in as: {username}" once a username is known.
    pub fn header_text(&self) -> Option<String> {
        self.session
            .username()
            .map(|username| format!("Logged in as: {}", username))
    }

    pub fn logout(&self) -> bool {
        self.guard.logout()
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn loading(&self) -> &LoadingState {
        &self.loading
    }

    pub fn guard(&self) -> &SessionGuard {
        &self.guard
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn buildings(&self) -> &BuildingListController {
        &self.list
    }

    pub fn ignore_modal(&self) -> &BulkIgnoreModal {
        &self.modal
    }
}

/// Login page wiring.
pub fn login_page(platform: &Platform, config: &AppConfig) -> LoginViewModel {
    let session = SessionContext::new(platform.storage.clone());
    let auth = AuthService::new(config.clone(), platform.transport.clone());
    LoginViewModel::new(
        auth,
        session,
        platform.timer.clone(),
        platform.navigator.clone(),
        config,
    )
}

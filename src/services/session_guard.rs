// ============================================================================
// SESSION GUARD - Gates the main view on a stored, verified admin token
// ============================================================================

use std::rc::Rc;

use crate::error::{ConsoleError, Result};
use crate::platform::{Navigator, Spawner};
use crate::services::AuthService;
use crate::state::SessionContext;

pub const LOGOUT_PROMPT: &str = "Are you sure you want to logout?";

#[derive(Clone)]
pub struct SessionGuard {
    session: SessionContext,
    auth: AuthService,
    navigator: Rc<dyn Navigator>,
    spawner: Rc<dyn Spawner>,
    login_path: String,
}

impl SessionGuard {
    pub fn new(
        session: SessionContext,
        auth: AuthService,
        navigator: Rc<dyn Navigator>,
        spawner: Rc<dyn Spawner>,
        login_path: String,
    ) -> Self {
        Self {
            session,
            auth,
            navigator,
            spawner,
            login_path,
        }
    }

    /// Load the session from storage. Returns `false` when the caller must
    /// stop initialising because a redirect to login was issued.
    ///
    /// Token verification runs in the background; a rejected token clears
    /// the session and redirects later, independently of this return value.
    pub fn initialize(&self) -> bool {
        let session = self.session.load_from_storage();
        let on_login_view = self.is_login_view();

        log::info!(
            "🔐 [AUTH] Initialization: has_token={} username={:?} path={}",
            session.token.is_some(),
            session.username,
            self.navigator.current_path()
        );

        if on_login_view {
            return true;
        }

        if session.token.is_none() {
            log::info!("🔐 [AUTH] No token found, redirecting to login...");
            self.navigator.redirect(&self.login_path);
            return false;
        }

        let guard = self.clone();
        self.spawner.spawn(Box::pin(async move {
            if guard.verify().await.is_err() {
                log::info!("🔐 [AUTH] Token invalid, redirecting to login...");
                guard.clear_session();
                guard.navigator.redirect(&guard.login_path);
            }
        }));

        true
    }

    pub async fn verify(&self) -> Result<()> {
        let token = self.session.token().ok_or(ConsoleError::Unauthenticated)?;
        self.auth.verify_token(&token).await
    }

    pub fn clear_session(&self) {
        self.session.clear();
    }

    /// Ask for confirmation, then clear the session and go to login.
    /// Returns whether the admin confirmed.
    pub fn logout(&self) -> bool {
        if !self.navigator.confirm(LOGOUT_PROMPT) {
            return false;
        }
        log::info!("👋 [AUTH] Logout");
        self.clear_session();
        self.navigator.redirect(&self.login_path);
        true
    }

    fn is_login_view(&self) -> bool {
        self.navigator.current_path() == self.login_path
    }
}

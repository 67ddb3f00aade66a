// ============================================================================
// LOGIN VIEWMODEL - Credentials form and the already-logged-in shortcut
// ============================================================================

use std::rc::Rc;

use crate::config::AppConfig;
use crate::error::{ConsoleError, Result};
use crate::platform::{Navigator, Timer};
use crate::services::{AuthService, Notifier};
use crate::state::{ReactiveState, SessionContext};

pub const LOGIN_LABEL: &str = "Login";
pub const LOGGING_IN_LABEL: &str = "Logging in...";
pub const LOGIN_SUCCESS_MESSAGE: &str = "Login successful! Redirecting...";
pub const CONNECTION_ERROR_MESSAGE: &str =
    "Connection error. Please check if the server is running.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    pub submitting: bool,
    pub button_label: &'static str,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            submitting: false,
            button_label: LOGIN_LABEL,
        }
    }
}

#[derive(Clone)]
pub struct LoginViewModel {
    form: ReactiveState<LoginForm>,
    auth: AuthService,
    session: SessionContext,
    notifier: Notifier,
    timer: Rc<dyn Timer>,
    navigator: Rc<dyn Navigator>,
    main_path: String,
    redirect_delay_ms: u32,
}

impl LoginViewModel {
    pub fn new(
        auth: AuthService,
        session: SessionContext,
        timer: Rc<dyn Timer>,
        navigator: Rc<dyn Navigator>,
        config: &AppConfig,
    ) -> Self {
        let notifier = Notifier::new(timer.clone(), config.timing.login_notification_timeout_ms);
        Self {
            form: ReactiveState::default(),
            auth,
            session,
            notifier,
            timer,
            navigator,
            main_path: config.main_path.clone(),
            redirect_delay_ms: config.timing.login_redirect_delay_ms,
        }
    }

    pub fn form(&self) -> LoginForm {
        self.form.get()
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.form.subscribe(callback);
    }

    /// Skip the form when the stored token still works; otherwise forget it.
    /// Returns whether a redirect was issued.
    pub async fn check_existing_session(&self) -> bool {
        let stored = self.session.load_from_storage();
        let Some(token) = stored.token else {
            log::info!("🔐 [LOGIN] No token found, showing login form");
            return false;
        };

        match self.auth.verify_token(&token).await {
            Ok(()) => {
                log::info!("🔐 [LOGIN] Token is valid, redirecting to main app...");
                self.navigator.redirect(&self.main_path);
                true
            }
            Err(_) => {
                log::info!("🔐 [LOGIN] Stored token rejected, clearing...");
                self.session.clear();
                false
            }
        }
    }

    pub async fn submit(&self, username: &str, password: &str) -> Result<()> {
        if self.form.with(|f| f.submitting) {
            return Ok(());
        }
        self.form.set(LoginForm {
            submitting: true,
            button_label: LOGGING_IN_LABEL,
        });

        let outcome = match self.auth.login(username, password).await {
            Ok(login) => self.session.establish(&login.access_token, &login.username),
            Err(err) => Err(err),
        };

        match outcome {
            Ok(()) => {
                self.notifier.success(LOGIN_SUCCESS_MESSAGE);
                let navigator = self.navigator.clone();
                let main_path = self.main_path.clone();
                self.timer.schedule(
                    self.redirect_delay_ms,
                    Box::new(move || navigator.redirect(&main_path)),
                );
                Ok(())
            }
            Err(err) => {
                log::error!("❌ [LOGIN] Login error: {}", err);
                self.notifier.error(&login_failure_message(&err));
                self.form.set(LoginForm::default());
                Err(err)
            }
        }
    }
}

fn login_failure_message(err: &ConsoleError) -> String {
    match err {
        ConsoleError::RequestFailed { message, .. } => message.clone(),
        ConsoleError::Transport(_) | ConsoleError::Decode(_) => CONNECTION_ERROR_MESSAGE.to_string(),
        other => other.user_message(),
    }
}

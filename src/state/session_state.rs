// ============================================================================
// SESSION STATE - Admin token + username, mirrored in persistent storage
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::Result;
use crate::platform::KeyValueStore;

pub const TOKEN_KEY: &str = "adminToken";
pub const USERNAME_KEY: &str = "adminUsername";

/// Token and username are always set or cleared together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub username: Option<String>,
}

/// Session context constructed once at startup and handed to every component.
#[derive(Clone)]
pub struct SessionContext {
    session: Rc<RefCell<Session>>,
    storage: Rc<dyn KeyValueStore>,
}

impl SessionContext {
    pub fn new(storage: Rc<dyn KeyValueStore>) -> Self {
        Self {
            session: Rc::new(RefCell::new(Session::default())),
            storage,
        }
    }

    /// Populate memory from storage. A half-stored pair is discarded.
    pub fn load_from_storage(&self) -> Session {
        let token = self.storage.get(TOKEN_KEY).filter(|t| !t.is_empty());
        let username = self.storage.get(USERNAME_KEY);

        let loaded = match (token, username) {
            (Some(token), Some(username)) => Session {
                token: Some(token),
                username: Some(username),
            },
            (None, None) => Session::default(),
            _ => {
                log::warn!("⚠️ [AUTH] Incomplete session in storage, discarding");
                self.storage.remove(TOKEN_KEY);
                self.storage.remove(USERNAME_KEY);
                Session::default()
            }
        };

        *self.session.borrow_mut() = loaded.clone();
        loaded
    }

    /// Store a fresh login in memory and storage.
    pub fn establish(&self, token: &str, username: &str) -> Result<()> {
        self.storage.set(TOKEN_KEY, token)?;
        if let Err(err) = self.storage.set(USERNAME_KEY, username) {
            self.storage.remove(TOKEN_KEY);
            return Err(err);
        }
        *self.session.borrow_mut() = Session {
            token: Some(token.to_string()),
            username: Some(username.to_string()),
        };
        Ok(())
    }

    pub fn clear(&self) {
        self.storage.remove(TOKEN_KEY);
        self.storage.remove(USERNAME_KEY);
        *self.session.borrow_mut() = Session::default();
    }

    pub fn token(&self) -> Option<String> {
        self.session.borrow().token.clone()
    }

    pub fn username(&self) -> Option<String> {
        self.session.borrow().username.clone()
    }

    pub fn has_token(&self) -> bool {
        self.session.borrow().token.is_some()
    }
}

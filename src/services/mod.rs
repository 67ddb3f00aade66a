pub mod notifier;
pub mod api_gateway;
pub mod api_client;
pub mod auth_service;
pub mod session_guard;

pub use notifier::{Notification, NotificationKind, Notifier};
pub use api_gateway::{ApiGateway, RequestOptions};
pub use api_client::ApiClient;
pub use auth_service::AuthService;
pub use session_guard::SessionGuard;

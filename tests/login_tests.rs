mod common;

use common::*;
use proevent_admin_console::platform::Method;
use proevent_admin_console::viewmodels::login::{
    CONNECTION_ERROR_MESSAGE, LOGGING_IN_LABEL, LOGIN_LABEL, LOGIN_SUCCESS_MESSAGE,
};
use proevent_admin_console::{login_page, ConsoleError};
use serde_json::json;

fn login_env() -> TestPlatform {
    TestPlatform::new(MemoryStore::default(), "/login")
}

#[tokio::test]
async fn successful_login_stores_session_and_redirects_shortly_after() {
    let env = login_env();
    env.transport.on(
        Method::Post,
        "admin/login",
        json(200, json!({"access_token": "fresh", "username": "ops", "token_type": "bearer"})),
    );
    let vm = login_page(&env.platform(), &test_config());
    let log = NotificationLog::attach(vm.notifier());

    vm.submit("ops", "secret").await.unwrap();

    assert_eq!(env.storage.value("adminToken").as_deref(), Some("fresh"));
    assert_eq!(env.storage.value("adminUsername").as_deref(), Some("ops"));
    assert_eq!(log.messages(), vec![LOGIN_SUCCESS_MESSAGE]);
    // The button stays locked while the redirect is pending.
    assert!(vm.form().submitting);
    assert_eq!(vm.form().button_label, LOGGING_IN_LABEL);

    let request = &env.transport.requests()[0];
    assert_eq!(request.url, "http://test/api/admin/login");
    assert_eq!(request.header("Authorization"), None);
    let body: serde_json::Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
    assert_eq!(body, json!({"username": "ops", "password": "secret"}));

    env.timer.advance(499);
    assert!(env.navigator.redirects().is_empty());
    env.timer.advance(1);
    assert_eq!(env.navigator.redirects(), vec!["/"]);
}

#[tokio::test]
async fn rejected_credentials_show_server_detail_and_reset_form() {
    let env = login_env();
    env.transport.on(
        Method::Post,
        "admin/login",
        json(401, json!({"detail": "Incorrect username or password"})),
    );
    let vm = login_page(&env.platform(), &test_config());
    let log = NotificationLog::attach(vm.notifier());

    let result = vm.submit("ops", "wrong").await;

    assert!(matches!(result, Err(ConsoleError::RequestFailed { status: 401, .. })));
    assert_eq!(log.errors(), vec!["Incorrect username or password"]);
    assert!(!vm.form().submitting);
    assert_eq!(vm.form().button_label, LOGIN_LABEL);
    assert_eq!(env.storage.value("adminToken"), None);
    // Only the hide timer of the login page's longer notification.
    assert_eq!(env.timer.pending_delays(), vec![5000]);
    assert!(env.navigator.redirects().is_empty());
}

#[tokio::test]
async fn rejection_without_detail_uses_generic_message() {
    let env = login_env();
    env.transport.on(Method::Post, "admin/login", json(403, json!({})));
    let vm = login_page(&env.platform(), &test_config());
    let log = NotificationLog::attach(vm.notifier());

    assert!(vm.submit("ops", "wrong").await.is_err());
    assert_eq!(log.errors(), vec!["Invalid credentials. Please try again."]);
}

#[tokio::test]
async fn unreachable_server_shows_connection_error() {
    let env = login_env();
    env.transport.on(Method::Post, "admin/login", network_error("Failed to fetch"));
    let vm = login_page(&env.platform(), &test_config());
    let log = NotificationLog::attach(vm.notifier());

    assert!(vm.submit("ops", "secret").await.is_err());
    assert_eq!(log.errors(), vec![CONNECTION_ERROR_MESSAGE]);
    assert!(!vm.form().submitting);
}

#[tokio::test]
async fn valid_stored_token_skips_the_form() {
    let env = TestPlatform::new(MemoryStore::with_session("tok-123", "admin"), "/login");
    env.transport.on(Method::Get, "admin/queries", json(200, json!([])));
    let vm = login_page(&env.platform(), &test_config());

    assert!(vm.check_existing_session().await);
    assert_eq!(env.navigator.redirects(), vec!["/"]);
    let probe = &env.transport.requests()[0];
    assert_eq!(probe.header("Authorization"), Some("Bearer tok-123"));
}

#[tokio::test]
async fn stale_stored_token_is_forgotten() {
    let env = TestPlatform::new(MemoryStore::with_session("old", "admin"), "/login");
    env.transport.on(Method::Get, "admin/queries", json(401, json!({})));
    let vm = login_page(&env.platform(), &test_config());
    let log = NotificationLog::attach(vm.notifier());

    assert!(!vm.check_existing_session().await);
    assert!(env.navigator.redirects().is_empty());
    assert_eq!(env.storage.value("adminToken"), None);
    assert_eq!(env.storage.value("adminUsername"), None);
    // A stale token is not an error worth showing on the login page.
    assert!(log.messages().is_empty());
}

#[tokio::test]
async fn no_stored_token_makes_no_request() {
    let env = login_env();
    let vm = login_page(&env.platform(), &test_config());

    assert!(!vm.check_existing_session().await);
    assert!(env.transport.requests().is_empty());
}

use std::env;
use std::fs;
use std::path::Path;

fn main() {
    // Load KEY=VALUE pairs from .env into compile-time env (read via option_env!)
    let env_file = Path::new(".env");

    if env_file.exists() {
        println!("cargo:rerun-if-changed=.env");

        if let Ok(contents) = fs::read_to_string(env_file) {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }

                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim();
                    let value = value.trim().trim_matches('"');

                    // Variables from the real environment win over .env
                    if env::var(key).is_err() {
                        println!("cargo:rustc-env={}={}", key, value);
                    }
                }
            }
        }
    }

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.env.example");
    for key in [
        "API_BASE_URL",
        "LOGIN_PATH",
        "MAIN_PATH",
        "NOTIFICATION_TIMEOUT_MS",
        "SEARCH_DEBOUNCE_MS",
        "UNAUTHORIZED_REDIRECT_DELAY_MS",
        "DEVICE_PAGE_SIZE",
        "MODAL_DEVICE_LIMIT",
        "ENABLE_LOGGING",
    ] {
        println!("cargo:rerun-if-env-changed={}", key);
    }
}

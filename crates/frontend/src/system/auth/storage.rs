use web_sys::window;

const ACCESS_TOKEN_KEY: &str = "dashboard_access_token";
const REFRESH_TOKEN_KEY: &str = "dashboard_refresh_token";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

fn save(key: &str, value: &str) {
    if let Some(storage) = get_local_storage() {
        if storage.set_item(key, value).is_err() {
            log::warn!("Failed to persist {} in localStorage", key);
        }
    }
}

fn load(key: &str) -> Option<String> {
    get_local_storage()?
        .get_item(key)
        .ok()?
        .filter(|v| !v.is_empty())
}

pub fn save_access_token(token: &str) {
    save(ACCESS_TOKEN_KEY, token);
}

pub fn get_access_token() -> Option<String> {
    load(ACCESS_TOKEN_KEY)
}

pub fn save_refresh_token(token: &str) {
    save(REFRESH_TOKEN_KEY, token);
}

pub fn get_refresh_token() -> Option<String> {
    load(REFRESH_TOKEN_KEY)
}

/// Forget both tokens
pub fn clear_tokens() {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(ACCESS_TOKEN_KEY);
        let _ = storage.remove_item(REFRESH_TOKEN_KEY);
    }
}

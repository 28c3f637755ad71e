use dashboard_core::config::DashboardConfig;
use js_sys::{Array, Object, Reflect};
use lazy_static::lazy_static;
use std::collections::HashMap;
use web_sys::window;

lazy_static! {
    pub static ref CONFIG: DashboardConfig = DashboardConfig::from_env(&read_env_config());
}

/// Copies `window.ENV_CONFIG` into a map in one pass. Strings are taken as
/// is; booleans and numbers are stringified so `DEBUG_MODE: true` works too.
fn read_env_config() -> HashMap<String, String> {
    let env_config = window()
        .and_then(|w| Reflect::get(&w, &"ENV_CONFIG".into()).ok())
        .filter(|value| value.is_object());

    let Some(env_config) = env_config else {
        log::warn!("ENV_CONFIG is undefined - using built-in defaults");
        return HashMap::new();
    };

    Object::entries(&Object::from(env_config))
        .iter()
        .filter_map(|entry| {
            let pair = Array::from(&entry);
            let key = pair.get(0).as_string()?;
            let value = pair.get(1);
            let value = value
                .as_string()
                .or_else(|| value.as_bool().map(|b| b.to_string()))
                .or_else(|| value.as_f64().map(|n| n.to_string()));
            if value.is_none() {
                log::debug!("ENV_CONFIG.{key} is not a scalar, ignoring it");
            }
            Some((key, value?))
        })
        .collect()
}

use web_sys::window;

/// Blocking browser alert, used for failed row actions.
pub fn alert(message: &str) {
    if let Some(window) = window() {
        if window.alert_with_message(message).is_err() {
            log::error!("Could not show alert: {message}");
        }
    }
}

pub fn report_error(context: &str, error: &impl std::fmt::Display) -> String {
    let message = format!("{context}: {error}");
    log::error!("{message}");
    web_sys::console::error_1(&message.clone().into());
    message
}

//! Runtime settings. The frontend reads them from `window.ENV_CONFIG`;
//! anything missing falls back to the local development backend.

use std::collections::HashMap;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
pub const DEFAULT_APP_NAME: &str = "Emotion Detection Dashboard";
pub const DEFAULT_MEDIA_TYPE: &str = "video/mp4";
pub const DEFAULT_TERMINAL_STAGES: &str = "audio_chunked";

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub backend_url: String,
    pub status_ws_url: String,
    pub app_name: String,
    pub debug: bool,
    pub upload_media_type: String,
    pub terminal_stages: Vec<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl DashboardConfig {
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let backend_url = get("BACKEND_URL")
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let status_ws_url = get("STATUS_WS_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| websocket_base(&backend_url));

        Self {
            status_ws_url,
            backend_url,
            app_name: get("APP_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
            debug: get("DEBUG_MODE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            upload_media_type: get("UPLOAD_MEDIA_TYPE")
                .unwrap_or_else(|| DEFAULT_MEDIA_TYPE.to_string()),
            terminal_stages: parse_list(
                &get("TERMINAL_STAGES").unwrap_or_else(|| DEFAULT_TERMINAL_STAGES.to_string()),
            ),
        }
    }

    /// Builds the config from a one-time snapshot of the environment object.
    pub fn from_env(env: &HashMap<String, String>) -> Self {
        Self::from_lookup(|key| env.get(key).cloned())
    }

    pub fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.backend_url, path.trim_start_matches('/'))
    }

    pub fn status_channel_url(&self, job_id: &str) -> String {
        format!("{}/ws/status/{}", self.status_ws_url, job_id)
    }

    /// File extension matching the accepted media type, e.g. `mp4`.
    pub fn upload_extension(&self) -> &str {
        self.upload_media_type
            .rsplit('/')
            .next()
            .unwrap_or(&self.upload_media_type)
    }

    /// Accepts a file whose MIME type matches, or whose name carries the
    /// matching extension when the browser reports no type.
    pub fn accepts_upload(&self, file_name: &str, mime: &str) -> bool {
        if !mime.is_empty() {
            return mime.eq_ignore_ascii_case(&self.upload_media_type);
        }
        file_name
            .rsplit_once('.')
            .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case(self.upload_extension()))
    }
}

/// `http://host` -> `ws://host`, `https://host` -> `wss://host`
pub fn websocket_base(http_url: &str) -> String {
    if let Some(rest) = http_url.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if let Some(rest) = http_url.strip_prefix("http://") {
        format!("ws://{rest}")
    } else {
        http_url.to_string()
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

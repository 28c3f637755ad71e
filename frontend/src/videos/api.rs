use crate::env_variable_utils::CONFIG;
use dashboard_core::error::ApiError;
use dashboard_core::job::JobKind;
use dashboard_core::models::{UploadedVideo, VideoItem};
use dashboard_core::responses::{
    parse_delete, parse_health, parse_job, parse_upload, parse_video, parse_video_list,
};
use gloo_net::http::{Request, Response};
use web_sys::{File, FormData};

fn network_error(e: gloo_net::Error) -> ApiError {
    ApiError::Network(e.to_string())
}

fn video_url(video_id: &str) -> String {
    CONFIG.api_url(&format!("videos/{}", urlencoding::encode(video_id)))
}

// An unreadable body is treated like an empty one; the parsers fall back
// to a generic message.
async fn read_response(response: Response) -> (u16, String) {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    (status, body)
}

pub async fn fetch_videos() -> Result<Vec<VideoItem>, ApiError> {
    let response = Request::get(&CONFIG.api_url("videos"))
        .send()
        .await
        .map_err(network_error)?;

    let (status, body) = read_response(response).await;
    parse_video_list(status, &body)
}

pub async fn fetch_video(video_id: &str) -> Result<VideoItem, ApiError> {
    let response = Request::get(&video_url(video_id))
        .send()
        .await
        .map_err(network_error)?;

    let (status, body) = read_response(response).await;
    parse_video(status, &body)
}

pub async fn upload_video(file: &File) -> Result<UploadedVideo, ApiError> {
    let form = FormData::new()
        .map_err(|_| ApiError::Invalid("Could not create the upload form".to_string()))?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(|_| ApiError::Invalid("Could not attach the selected file".to_string()))?;

    let response = Request::post(&CONFIG.api_url("videos"))
        .body(form)
        .map_err(network_error)?
        .send()
        .await
        .map_err(network_error)?;

    let (status, body) = read_response(response).await;
    parse_upload(status, &body)
}

pub async fn delete_video(video_id: &str) -> Result<(), ApiError> {
    let response = Request::delete(&video_url(video_id))
        .send()
        .await
        .map_err(network_error)?;

    let (status, body) = read_response(response).await;
    parse_delete(status, &body)
}

/// Asks the backend to start `kind` for a video and returns the job id to
/// subscribe to.
pub async fn start_job(video_id: &str, kind: JobKind) -> Result<String, ApiError> {
    let endpoint = kind.endpoint().ok_or_else(|| {
        ApiError::Invalid(format!("{} cannot be started from the dashboard", kind.action_label()))
    })?;
    let url = format!("{}/{}", video_url(video_id), endpoint);

    let response = Request::post(&url).send().await.map_err(network_error)?;

    let (status, body) = read_response(response).await;
    parse_job(status, &body)
}

pub async fn check_health() -> bool {
    match Request::get(&CONFIG.api_url("healthcheck")).send().await {
        Ok(response) => {
            let (status, body) = read_response(response).await;
            parse_health(status, &body)
        }
        Err(e) => {
            log::warn!("Healthcheck failed: {e}");
            false
        }
    }
}

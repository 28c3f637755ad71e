//! Turns `(status, body)` pairs from the backend into typed results. Kept
//! apart from the transport so the rules can be tested without a browser.

use crate::error::ApiError;
use crate::models::{
    HealthResponse, JobResponse, RawVideoRecord, UploadResponse, UploadedVideo, VideoItem,
    VideosResponse,
};
use serde_json::Value;

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Extracts the human readable message from an error body. Understands
/// `{"detail": "..."}`, validation lists `{"detail": [{"msg": ...}]}` and
/// the `{"errors": [{"message": ...}]}` envelope.
pub fn server_message(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;

    let joined = |items: &Vec<Value>, key: &str| {
        let parts: Vec<&str> = items
            .iter()
            .filter_map(|item| item.get(key).and_then(Value::as_str))
            .collect();
        (!parts.is_empty()).then(|| parts.join("; "))
    };

    match json.get("detail") {
        Some(Value::String(detail)) => return Some(detail.clone()),
        Some(Value::Array(items)) => {
            if let Some(message) = joined(items, "msg") {
                return Some(message);
            }
        }
        _ => {}
    }

    if let Some(Value::Array(errors)) = json.get("errors") {
        if let Some(message) = joined(errors, "message") {
            return Some(message);
        }
    }

    json.get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn http_error(status: u16, body: &str, fallback: String) -> ApiError {
    ApiError::Http {
        status,
        message: server_message(body).unwrap_or(fallback),
    }
}

/// `GET /videos`. A 404 means the collection is empty.
pub fn parse_video_list(status: u16, body: &str) -> Result<Vec<VideoItem>, ApiError> {
    if status == 404 {
        return Ok(Vec::new());
    }
    if !is_success(status) {
        return Err(http_error(status, body, format!("Error {status}")));
    }

    let response: VideosResponse = serde_json::from_str(body)?;
    if let Some(total) = response.total {
        if total != response.videos.len() {
            log::debug!("Backend reported {total} videos, received {}", response.videos.len());
        }
    }
    Ok(response.videos.into_iter().map(VideoItem::from).collect())
}

/// `GET /videos/{id}`
pub fn parse_video(status: u16, body: &str) -> Result<VideoItem, ApiError> {
    if status == 404 {
        return Err(ApiError::NotFound(
            server_message(body).unwrap_or_else(|| "Video not found.".to_string()),
        ));
    }
    if !is_success(status) {
        return Err(http_error(status, body, format!("Error {status}")));
    }

    let record: RawVideoRecord = serde_json::from_str(body)?;
    Ok(record.into())
}

/// `POST /videos`. Only a 201 counts as created.
pub fn parse_upload(status: u16, body: &str) -> Result<UploadedVideo, ApiError> {
    if status != 201 {
        return Err(http_error(
            status,
            body,
            format!("Server responded with {status}"),
        ));
    }

    let response: UploadResponse = serde_json::from_str(body)?;
    Ok(response.into())
}

/// `DELETE /videos/{id}`
pub fn parse_delete(status: u16, body: &str) -> Result<(), ApiError> {
    match status {
        200 | 204 => Ok(()),
        _ => Err(http_error(
            status,
            body,
            format!("Failed to delete video ({status})"),
        )),
    }
}

/// `POST /videos/{id}/transcript` and `POST /videos/{id}/analyze`
pub fn parse_job(status: u16, body: &str) -> Result<String, ApiError> {
    if !is_success(status) {
        return Err(http_error(status, body, format!("Error {status}")));
    }

    let response: JobResponse = serde_json::from_str(body)?;
    if response.job_id.trim().is_empty() {
        return Err(ApiError::Invalid("Backend returned an empty job id".to_string()));
    }
    Ok(response.job_id)
}

/// `GET /healthcheck`
pub fn parse_health(status: u16, body: &str) -> bool {
    is_success(status)
        && serde_json::from_str::<HealthResponse>(body)
            .map(|health| health.status == "online")
            .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::ProcessingStatus;
    use rstest::rstest;

    #[test]
    fn not_found_list_is_empty_not_error() {
        let videos = parse_video_list(404, r#"{"detail":"No videos found."}"#).unwrap();
        assert!(videos.is_empty());
    }

    #[test]
    fn list_is_normalized() {
        let body = r#"{"videos":[
            {"_id":"abc123","video_filename":"clip.mp4","processing_status":"completed","transcript":"hi"},
            {"_id":"def456","video_filename":"other.mp4"}
        ],"total":2}"#;
        let videos = parse_video_list(200, body).unwrap();
        assert_eq!(videos.len(), 2);
        assert_eq!(videos[0].display_id, "bc123");
        assert_eq!(videos[0].status, ProcessingStatus::Completed);
        assert_eq!(videos[1].status, ProcessingStatus::Unknown);
    }

    #[rstest]
    #[case(500, r#"{"detail":"Mongo is down"}"#, "Mongo is down")]
    #[case(500, "<html>oops</html>", "Error 500")]
    #[case(503, "", "Error 503")]
    fn list_errors_use_detail_or_fallback(
        #[case] status: u16,
        #[case] body: &str,
        #[case] expected: &str,
    ) {
        let err = parse_video_list(status, body).unwrap_err();
        assert_eq!(err.to_string(), expected);
        assert!(matches!(err, ApiError::Http { status: s, .. } if s == status));
    }

    #[test]
    fn malformed_success_body_is_parse_error() {
        assert!(matches!(parse_video_list(200, "{"), Err(ApiError::Parse(_))));
    }

    #[rstest]
    #[case(r#"{"detail":"Video not found."}"#, "Video not found.")]
    #[case(
        r#"{"errors":[{"code":409,"message":"A record for this filename already exists.","source":"file"}]}"#,
        "A record for this filename already exists."
    )]
    #[case(
        r#"{"detail":[{"loc":["body","file"],"msg":"Field required","type":"missing"}]}"#,
        "Field required"
    )]
    #[case(r#"{"message":"nope"}"#, "nope")]
    fn server_messages(#[case] body: &str, #[case] expected: &str) {
        assert_eq!(server_message(body).as_deref(), Some(expected));
    }

    #[test]
    fn upload_requires_created_status() {
        let created = parse_upload(201, r#"{"_id":"abc123","job_id":"j1"}"#).unwrap();
        assert_eq!(created.id, "abc123");
        assert_eq!(created.job_id.as_deref(), Some("j1"));

        let err = parse_upload(200, r#"{"_id":"abc123"}"#).unwrap_err();
        assert_eq!(err.to_string(), "Server responded with 200");

        let err = parse_upload(
            400,
            r#"{"errors":[{"code":400,"message":"Invalid file format. Only .mp4 files are allowed.","source":"file"}]}"#,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Invalid file format. Only .mp4 files are allowed.");
    }

    #[test]
    fn delete_statuses() {
        assert!(parse_delete(204, "").is_ok());
        let err = parse_delete(404, r#"{"detail":"Video not found."}"#).unwrap_err();
        assert_eq!(err.to_string(), "Video not found.");
        let err = parse_delete(500, "").unwrap_err();
        assert_eq!(err.to_string(), "Failed to delete video (500)");
    }

    #[test]
    fn single_video() {
        let item = parse_video(200, r#"{"_id":"abc123","video_filename":"clip.mp4"}"#).unwrap();
        assert_eq!(item.filename, "clip.mp4");
        assert!(matches!(parse_video(404, ""), Err(ApiError::NotFound(_))));
    }

    #[test]
    fn job_ids() {
        assert_eq!(parse_job(200, r#"{"job_id":"abc123"}"#).unwrap(), "abc123");
        assert!(matches!(parse_job(200, r#"{"job_id":""}"#), Err(ApiError::Invalid(_))));
        let err = parse_job(404, r#"{"detail":"Audio object not found. Please extract audio first."}"#)
            .unwrap_err();
        assert_eq!(err.to_string(), "Audio object not found. Please extract audio first.");
    }

    #[test]
    fn health() {
        assert!(parse_health(200, r#"{"status":"online"}"#));
        assert!(!parse_health(200, r#"{"status":"degraded"}"#));
        assert!(!parse_health(502, ""));
    }
}

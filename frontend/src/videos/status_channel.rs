use crate::env_variable_utils::CONFIG;
use dashboard_core::error::ApiError;
use dashboard_core::job::JobKind;
use dashboard_core::status::{JobOutcome, StatusEvent};
use dashboard_core::tracker::{ChannelHandle, JobTracker, LiveOverlay, TrackerUpdate};
use futures::future::{abortable, AbortHandle};
use futures::StreamExt;
use gloo_net::websocket::futures::WebSocket;
use gloo_net::websocket::Message;
use std::cell::RefCell;
use std::rc::Rc;
use yew::prelude::*;

pub type SharedTracker = Rc<RefCell<JobTracker<SocketHandle>>>;

/// Aborting the reader task drops its `WebSocket`, which closes the socket.
pub struct SocketHandle(AbortHandle);

impl ChannelHandle for SocketHandle {
    fn close(&mut self) {
        self.0.abort();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct JobFinished {
    pub job_id: String,
    pub video_id: String,
    pub outcome: JobOutcome,
}

/// Everything a reader task needs to publish what it hears.
#[derive(Clone)]
pub struct StatusSink {
    pub tracker: SharedTracker,
    pub overlay: UseStateHandle<LiveOverlay>,
    pub on_finished: Callback<JobFinished>,
}

impl StatusSink {
    fn publish(&self, job_id: &str, update: TrackerUpdate) -> bool {
        self.overlay.set(self.tracker.borrow().overlay());

        match update {
            TrackerUpdate::Finished { video_id, outcome } => {
                self.on_finished.emit(JobFinished {
                    job_id: job_id.to_string(),
                    video_id,
                    outcome,
                });
                true
            }
            TrackerUpdate::Progress { video_id, label } => {
                log::debug!("Job {job_id} ({video_id}): {label}");
                false
            }
            TrackerUpdate::Ignored => false,
        }
    }
}

/// Opens `/ws/status/{job_id}` and starts tracking the job. The provisional
/// status shows up in the overlay before the first event arrives.
pub fn subscribe(job_id: String, video_id: String, kind: JobKind, sink: StatusSink) {
    let url = CONFIG.status_channel_url(&urlencoding::encode(&job_id));

    let socket = match WebSocket::open(&url) {
        Ok(socket) => socket,
        Err(e) => {
            let error = ApiError::Channel(e.to_string());
            log::warn!("Could not open {url}: {error}");
            sink.on_finished.emit(JobFinished {
                job_id,
                video_id,
                outcome: JobOutcome::Failure(error.to_string()),
            });
            return;
        }
    };

    let (task, abort_handle) = abortable(read_events(socket, job_id.clone(), sink.clone()));
    sink.tracker
        .borrow_mut()
        .track(&job_id, &video_id, kind, SocketHandle(abort_handle));
    sink.overlay.set(sink.tracker.borrow().overlay());

    wasm_bindgen_futures::spawn_local(async move {
        if task.await.is_err() {
            log::debug!("Status channel for job {job_id} closed");
        }
    });
}

async fn read_events(mut socket: WebSocket, job_id: String, sink: StatusSink) {
    while let Some(message) = socket.next().await {
        let text = match message {
            Ok(Message::Text(text)) => text,
            Ok(Message::Bytes(bytes)) => match String::from_utf8(bytes) {
                Ok(text) => text,
                Err(_) => {
                    log::warn!("Ignoring binary status frame for job {job_id}");
                    continue;
                }
            },
            Err(e) => {
                let error = ApiError::Channel(e.to_string());
                let update = sink.tracker.borrow_mut().channel_error(&job_id, &error);
                sink.publish(&job_id, update);
                return;
            }
        };

        let event = match StatusEvent::parse(&text) {
            Ok(event) => event,
            Err(e) => {
                log::warn!("Ignoring malformed status event for job {job_id}: {e}");
                continue;
            }
        };

        let update = sink.tracker.borrow_mut().apply(&job_id, &event);
        if sink.publish(&job_id, update) {
            return;
        }
    }

    let error = ApiError::Channel("closed before the job finished".to_string());
    let update = sink.tracker.borrow_mut().channel_error(&job_id, &error);
    sink.publish(&job_id, update);
}

pub mod api;
pub mod components;
pub mod detail;
pub mod dialogs;
pub mod status_channel;
pub mod upload;

use crate::env_variable_utils::CONFIG;
use crate::utils::{alert, report_error};
use crate::videos::api::{delete_video, fetch_videos, start_job};
use crate::videos::components::{DashboardLayout, ErrorMessage, Notice, VideoTable};
use crate::videos::dialogs::{AnalysisDialog, TranscriptDialog};
use crate::videos::status_channel::{subscribe, JobFinished, SocketHandle, StatusSink};
use crate::videos::upload::UploadForm;
use dashboard_core::job::JobKind;
use dashboard_core::models::{UploadedVideo, VideoItem};
use dashboard_core::refresh::RefreshGate;
use dashboard_core::status::JobOutcome;
use dashboard_core::table::{build_rows, JobNotice};
use dashboard_core::tracker::{JobTracker, LiveOverlay};
use yew::prelude::*;

#[function_component(VideoDashboard)]
pub fn video_dashboard() -> Html {
    let videos = use_state(Vec::<VideoItem>::new);
    let overlay = use_state(LiveOverlay::new);
    let loading = use_state(|| false);
    let error_message = use_state(|| None::<String>);
    let notice = use_state(|| None::<JobNotice>);
    let transcript_for = use_state(|| None::<String>);
    let analysis_for = use_state(|| None::<String>);
    let tracker =
        use_mut_ref(|| JobTracker::<SocketHandle>::new(CONFIG.terminal_stages.clone()));
    let refresh_gate = use_mut_ref(RefreshGate::default);

    // Full re-fetch; the server list replaces whatever the overlay guessed.
    let refresh = {
        let videos = videos.clone();
        let overlay = overlay.clone();
        let loading = loading.clone();
        let error_message = error_message.clone();
        let tracker = tracker.clone();
        let refresh_gate = refresh_gate.clone();

        Callback::from(move |_: ()| {
            let videos = videos.clone();
            let overlay = overlay.clone();
            let loading = loading.clone();
            let error_message = error_message.clone();
            let tracker = tracker.clone();
            let refresh_gate = refresh_gate.clone();

            let ticket = refresh_gate.borrow_mut().begin();
            loading.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                let result = fetch_videos().await;
                // A newer refresh is in flight; its response owns the list.
                if !refresh_gate.borrow().is_latest(ticket) {
                    log::debug!("dropping stale video list (refresh {ticket})");
                    return;
                }

                match result {
                    Ok(video_list) => {
                        error_message.set(None);
                        videos.set(video_list);
                    }
                    Err(e) => {
                        error_message.set(Some(report_error("Failed to load videos", &e)));
                    }
                }

                let settled = tracker.borrow_mut().refresh_completed();
                if settled > 0 {
                    log::debug!("{settled} finished job(s) back to idle");
                }
                overlay.set(tracker.borrow().overlay());
                loading.set(false);
            });
        })
    };

    let on_finished = {
        let refresh = refresh.clone();
        let notice = notice.clone();

        Callback::from(move |finished: JobFinished| {
            if let JobOutcome::Failure(reason) = &finished.outcome {
                log::warn!("Job {} stopped: {reason}", finished.job_id);
            }
            notice.set(Some(JobNotice::for_outcome(
                &finished.video_id,
                &finished.outcome,
            )));
            refresh.emit(());
        })
    };

    let sink = StatusSink {
        tracker: tracker.clone(),
        overlay: overlay.clone(),
        on_finished,
    };

    // Load videos on mount, close every status channel on unmount
    {
        let refresh = refresh.clone();
        let tracker = tracker.clone();

        use_effect_with((), move |_| {
            refresh.emit(());
            move || {
                let closed = tracker.borrow_mut().close_all();
                log::debug!("Closed {closed} status channel(s)");
            }
        });
    }

    let on_uploaded = {
        let refresh = refresh.clone();
        let sink = sink.clone();
        let notice = notice.clone();

        Callback::from(move |uploaded: UploadedVideo| {
            notice.set(None);
            if let Some(job_id) = uploaded.job_id {
                subscribe(job_id, uploaded.id, JobKind::Extraction, sink.clone());
            }
            refresh.emit(());
        })
    };

    let on_start_job = {
        let sink = sink.clone();
        let notice = notice.clone();

        Callback::from(move |(video_id, kind): (String, JobKind)| {
            let sink = sink.clone();
            notice.set(None);

            wasm_bindgen_futures::spawn_local(async move {
                match start_job(&video_id, kind).await {
                    Ok(job_id) => subscribe(job_id, video_id, kind, sink),
                    Err(e) => {
                        let message = report_error(&format!("{} failed", kind.action_label()), &e);
                        alert(&message);
                    }
                }
            });
        })
    };

    let on_delete = {
        let refresh = refresh.clone();
        let overlay = overlay.clone();
        let tracker = tracker.clone();

        Callback::from(move |video_id: String| {
            let refresh = refresh.clone();
            let overlay = overlay.clone();
            let tracker = tracker.clone();

            wasm_bindgen_futures::spawn_local(async move {
                match delete_video(&video_id).await {
                    Ok(()) => {
                        if tracker.borrow_mut().untrack_video(&video_id) > 0 {
                            overlay.set(tracker.borrow().overlay());
                        }
                        refresh.emit(());
                    }
                    Err(e) => {
                        alert(&report_error("Failed to delete video", &e));
                    }
                }
            });
        })
    };

    let open_dialog = |target: &UseStateHandle<Option<String>>| {
        let target = target.clone();
        Callback::from(move |video_id: String| target.set(Some(video_id)))
    };
    let close_dialog = |target: &UseStateHandle<Option<String>>| {
        let target = target.clone();
        Callback::from(move |_: ()| target.set(None))
    };

    let find_video = |id: &Option<String>| {
        id.as_ref()
            .and_then(|id| videos.iter().find(|v| &v.id == id))
            .cloned()
    };
    let transcript_video = find_video(&*transcript_for);
    let analysis_video = find_video(&*analysis_for);

    let rows = build_rows(&videos, &overlay);

    html! {
        <DashboardLayout title={CONFIG.app_name.clone()}>
            <UploadForm on_uploaded={on_uploaded} />

            <Notice notice={(*notice).clone()} />
            <ErrorMessage error_message={(*error_message).clone()} />

            {
                if *loading && videos.is_empty() {
                    html! {
                        <div class="text-center py-8">
                            <p>{"Loading videos..."}</p>
                        </div>
                    }
                } else {
                    html! {
                        <>
                            {
                                if *loading {
                                    html! { <p class="text-sm text-gray-500 mb-2">{"Refreshing…"}</p> }
                                } else {
                                    html! {}
                                }
                            }
                            <VideoTable
                                rows={rows}
                                on_delete={on_delete}
                                on_start_job={on_start_job}
                                on_view_transcript={open_dialog(&transcript_for)}
                                on_view_analysis={open_dialog(&analysis_for)}
                            />
                        </>
                    }
                }
            }

            <TranscriptDialog
                open={transcript_video.is_some()}
                transcript={transcript_video.and_then(|v| v.transcript).unwrap_or_default()}
                on_close={close_dialog(&transcript_for)}
            />
            <AnalysisDialog
                open={analysis_video.is_some()}
                prompt={analysis_video.as_ref().map(|v| v.prompt.clone()).unwrap_or_default()}
                analysis={analysis_video.and_then(|v| v.analysis).unwrap_or_default()}
                on_close={close_dialog(&analysis_for)}
            />
        </DashboardLayout>
    }
}

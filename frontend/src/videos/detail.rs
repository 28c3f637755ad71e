use crate::utils::report_error;
use crate::videos::api::fetch_video;
use crate::videos::components::{DashboardLayout, ErrorMessage, StatusIndicator};
use dashboard_core::error::ApiError;
use dashboard_core::models::VideoItem;
use dashboard_core::table::StatusCell;
use dashboard_core::utils::{format_interval, format_score};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct VideoDetailPageProps {
    pub id: String,
}

#[function_component(VideoDetailPage)]
pub fn video_detail_page(props: &VideoDetailPageProps) -> Html {
    let video = use_state(|| None::<VideoItem>);
    let loading = use_state(|| true);
    let error_message = use_state(|| None::<String>);

    {
        let video = video.clone();
        let loading = loading.clone();
        let error_message = error_message.clone();

        use_effect_with(props.id.clone(), move |id| {
            let id = id.clone();
            loading.set(true);
            error_message.set(None);
            wasm_bindgen_futures::spawn_local(async move {
                match fetch_video(&id).await {
                    Ok(item) => video.set(Some(item)),
                    Err(ApiError::NotFound(msg)) => {
                        video.set(None);
                        error_message.set(Some(msg));
                    }
                    Err(e) => {
                        video.set(None);
                        error_message.set(Some(report_error("Failed to load video", &e)));
                    }
                }
                loading.set(false);
            });
            || ()
        });
    }

    let body = match (&*video, *loading) {
        (_, true) => html! {
            <div class="text-center py-8">
                <p>{"Loading video..."}</p>
            </div>
        },
        (Some(video), false) => video_details(video),
        (None, false) => html! {},
    };

    html! {
        <DashboardLayout title="Video Details" back_link={true}>
            <ErrorMessage error_message={(*error_message).clone()} />
            {body}
        </DashboardLayout>
    }
}

fn field(label: &str, value: Option<&str>) -> Html {
    html! {
        <div class="mb-2">
            <span class="text-sm font-semibold text-gray-600">{format!("{label}: ")}</span>
            <span class="text-sm text-gray-900 break-all">{value.unwrap_or("N/A").to_string()}</span>
        </div>
    }
}

fn video_details(video: &VideoItem) -> Html {
    let status = StatusCell::Persisted {
        label: video.status.label(),
        badge_class: video.status.badge_class(),
    };

    html! {
        <div>
            <div class="grid grid-cols-1 md:grid-cols-2 gap-4 mb-6">
                <div>
                    {field("ID", Some(video.id.as_str()))}
                    {field("File", Some(video.filename.as_str()))}
                    {field("Created", Some(video.created_at.as_str()))}
                    <div class="mb-2">
                        <span class="text-sm font-semibold text-gray-600">{"Status: "}</span>
                        <StatusIndicator status={status} />
                    </div>
                </div>
                <div>
                    {field("Video object", video.video_object.as_deref())}
                    {field("Audio object", video.audio_object.as_deref())}
                </div>
            </div>

            <h2 class="text-xl font-semibold text-gray-800 mb-2">{"Transcript"}</h2>
            <div class="bg-gray-50 p-4 rounded-lg mb-6 whitespace-pre-wrap text-sm">
                {video.transcript.clone().filter(|t| !t.trim().is_empty()).unwrap_or_else(|| "No transcript yet.".to_string())}
            </div>

            {
                match video.analysis.as_deref().filter(|a| !a.trim().is_empty()) {
                    Some(analysis) => html! {
                        <>
                            <h2 class="text-xl font-semibold text-gray-800 mb-2">{"Analysis"}</h2>
                            <div class="bg-gray-50 p-4 rounded-lg mb-6 whitespace-pre-wrap text-sm">
                                {analysis.to_string()}
                            </div>
                        </>
                    },
                    None => html! {},
                }
            }

            <h2 class="text-xl font-semibold text-gray-800 mb-2">
                {format!("Emotion Segments ({})", video.emotions.len())}
            </h2>
            {
                if video.emotions.is_empty() {
                    html! { <p class="text-sm text-gray-600">{"No emotion segments yet."}</p> }
                } else {
                    html! {
                        <div class="overflow-x-auto">
                            <table class="min-w-full bg-white border border-gray-300">
                                <thead class="bg-gray-50">
                                    <tr>
                                        <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase tracking-wider">{"Time"}</th>
                                        <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase tracking-wider">{"Emotion"}</th>
                                        <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase tracking-wider">{"Score"}</th>
                                        <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase tracking-wider">{"Text"}</th>
                                    </tr>
                                </thead>
                                <tbody class="bg-white divide-y divide-gray-200">
                                    {
                                        video.emotions.iter().map(|segment| html! {
                                            <tr>
                                                <td class="px-6 py-4 whitespace-nowrap text-sm font-mono text-gray-900">
                                                    {format_interval(segment.timestamp)}
                                                </td>
                                                <td class="px-6 py-4 whitespace-nowrap text-sm text-gray-900">
                                                    {segment.emotion.clone().unwrap_or_else(|| "N/A".to_string())}
                                                </td>
                                                <td class="px-6 py-4 whitespace-nowrap text-sm text-gray-900">
                                                    {segment.emotion_score.map(format_score).unwrap_or_else(|| "N/A".to_string())}
                                                </td>
                                                <td class="px-6 py-4 text-sm text-gray-900">
                                                    {&segment.text}
                                                </td>
                                            </tr>
                                        }).collect::<Html>()
                                    }
                                </tbody>
                            </table>
                        </div>
                    }
                }
            }
        </div>
    }
}

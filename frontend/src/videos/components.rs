use crate::router::Route;
use crate::videos::api::check_health;
use dashboard_core::job::JobKind;
use dashboard_core::table::{JobNotice, StatusCell, VideoRow};
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ErrorMessageProps {
    pub error_message: Option<String>,
}

#[function_component(ErrorMessage)]
pub fn error_message(props: &ErrorMessageProps) -> Html {
    if let Some(msg) = &props.error_message {
        html! {
            <div class="bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded mb-4">
                { msg }
            </div>
        }
    } else {
        html! {}
    }
}

#[derive(Properties, PartialEq)]
pub struct NoticeProps {
    pub notice: Option<JobNotice>,
}

#[function_component(Notice)]
pub fn notice(props: &NoticeProps) -> Html {
    let Some(notice) = &props.notice else {
        return html! {};
    };
    let class = match notice {
        JobNotice::Finished(_) => "bg-green-100 border border-green-400 text-green-700",
        JobNotice::Stopped(_) => "bg-yellow-100 border border-yellow-400 text-yellow-800",
    };
    html! {
        <div class={format!("{class} px-4 py-3 rounded mb-4")}>
            { notice.message() }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct DashboardLayoutProps {
    pub children: Children,
    pub title: String,
    #[prop_or_default]
    pub back_link: bool,
}

#[function_component(DashboardLayout)]
pub fn dashboard_layout(props: &DashboardLayoutProps) -> Html {
    html! {
        <div class="min-h-screen bg-gray-700 p-4">
            <div class="max-w-6xl mx-auto">
                <div class="bg-white rounded-lg shadow-lg p-8">
                    <div class="flex justify-between items-center mb-6">
                        <h1 class="text-3xl font-bold text-gray-800">
                            {&props.title}
                        </h1>
                        {
                            if props.back_link {
                                html! {
                                    <Link<Route> to={Route::Home} classes="text-blue-600 hover:underline">
                                        {"← Back to Videos"}
                                    </Link<Route>>
                                }
                            } else {
                                html! { <HealthBadge /> }
                            }
                        }
                    </div>
                    { for props.children.iter() }
                </div>
            </div>
        </div>
    }
}

#[function_component(HealthBadge)]
pub fn health_badge() -> Html {
    let online = use_state(|| None::<bool>);

    {
        let online = online.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                online.set(Some(check_health().await));
            });
            || ()
        });
    }

    let (class, text) = match *online {
        None => ("bg-gray-100 text-gray-800", "Checking backend…"),
        Some(true) => ("bg-green-100 text-green-800", "Backend online"),
        Some(false) => ("bg-red-100 text-red-800", "Backend offline"),
    };

    html! {
        <span class={format!("px-2 inline-flex text-xs leading-5 font-semibold rounded-full {class}")}>
            {text}
        </span>
    }
}

#[derive(Properties, PartialEq)]
pub struct StatusIndicatorProps {
    pub status: StatusCell,
}

/// Live statuses pulse; persisted ones are a plain badge.
#[function_component(StatusIndicator)]
pub fn status_indicator(props: &StatusIndicatorProps) -> Html {
    match &props.status {
        StatusCell::Live(label) => html! {
            <span class="inline-flex items-center gap-2 text-sm text-blue-800">
                <span class="relative flex h-2 w-2">
                    <span class="animate-ping absolute inline-flex h-full w-full rounded-full bg-blue-400 opacity-75"></span>
                    <span class="relative inline-flex rounded-full h-2 w-2 bg-blue-500"></span>
                </span>
                {label}
            </span>
        },
        StatusCell::Persisted { label, badge_class } => html! {
            <span class={format!("px-2 inline-flex text-xs leading-5 font-semibold rounded-full {badge_class}")}>
                {label}
            </span>
        },
    }
}

#[derive(Properties, PartialEq)]
pub struct VideoTableProps {
    pub rows: Vec<VideoRow>,
    pub on_delete: Callback<String>,
    pub on_start_job: Callback<(String, JobKind)>,
    pub on_view_transcript: Callback<String>,
    pub on_view_analysis: Callback<String>,
}

#[function_component(VideoTable)]
pub fn video_table(props: &VideoTableProps) -> Html {
    if props.rows.is_empty() {
        return html! {
            <div class="text-center py-8 text-gray-600">
                <p>{"No videos uploaded yet."}</p>
            </div>
        };
    }

    let header = |title: &str| {
        html! {
            <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase tracking-wider">{title.to_string()}</th>
        }
    };

    html! {
        <div class="overflow-x-auto">
            <table class="min-w-full bg-white border border-gray-300">
                <thead class="bg-gray-50">
                    <tr>
                        {header("ID")}
                        {header("File")}
                        {header("Status")}
                        {header("Created")}
                        {header("Actions")}
                    </tr>
                </thead>
                <tbody class="bg-white divide-y divide-gray-200">
                    { for props.rows.iter().map(|row| video_row(row, props)) }
                </tbody>
            </table>
        </div>
    }
}

fn emit_with_id(callback: &Callback<String>, id: &str) -> Callback<MouseEvent> {
    let callback = callback.clone();
    let id = id.to_string();
    Callback::from(move |_| callback.emit(id.clone()))
}

fn job_button(row: &VideoRow, kind: JobKind, on_start_job: &Callback<(String, JobKind)>) -> Html {
    let onclick = {
        let on_start_job = on_start_job.clone();
        let id = row.id.clone();
        Callback::from(move |_| on_start_job.emit((id.clone(), kind)))
    };

    html! {
        <button
            onclick={onclick}
            disabled={!row.can_start_jobs}
            class="text-blue-600 hover:text-blue-900 disabled:text-gray-400 disabled:cursor-not-allowed"
        >
            {kind.action_label()}
        </button>
    }
}

fn video_row(row: &VideoRow, props: &VideoTableProps) -> Html {
    html! {
        <tr key={row.id.clone()}>
            <td class="px-6 py-4 whitespace-nowrap text-sm font-mono text-gray-900" title={row.id.clone()}>
                {&row.display_id}
            </td>
            <td class="px-6 py-4 whitespace-nowrap text-sm text-gray-900">
                <div class="max-w-xs truncate">{&row.filename}</div>
            </td>
            <td class="px-6 py-4 whitespace-nowrap">
                <StatusIndicator status={row.status.clone()} />
            </td>
            <td class="px-6 py-4 whitespace-nowrap text-sm text-gray-900">
                {&row.created_at}
            </td>
            <td class="px-6 py-4 whitespace-nowrap text-sm font-medium">
                <div class="flex gap-3">
                    {job_button(row, JobKind::Transcription, &props.on_start_job)}
                    {job_button(row, JobKind::Analysis, &props.on_start_job)}
                    <button
                        onclick={emit_with_id(&props.on_view_transcript, &row.id)}
                        disabled={!row.can_view_transcript}
                        class="text-gray-700 hover:text-gray-900 disabled:text-gray-400 disabled:cursor-not-allowed"
                    >
                        {"View Transcript"}
                    </button>
                    <button
                        onclick={emit_with_id(&props.on_view_analysis, &row.id)}
                        disabled={!row.can_view_analysis}
                        class="text-gray-700 hover:text-gray-900 disabled:text-gray-400 disabled:cursor-not-allowed"
                    >
                        {"View Analysis"}
                    </button>
                    <Link<Route> to={Route::VideoDetail { id: row.id.clone() }} classes="text-gray-700 hover:underline">
                        {format!("Details ({})", row.emotion_count)}
                    </Link<Route>>
                    <button
                        onclick={emit_with_id(&props.on_delete, &row.id)}
                        class="text-red-600 hover:text-red-900"
                    >
                        {"Delete"}
                    </button>
                </div>
            </td>
        </tr>
    }
}

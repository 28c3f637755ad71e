use crate::env_variable_utils::CONFIG;
use crate::videos::api::upload_video;
use dashboard_core::models::UploadedVideo;
use web_sys::{File, HtmlInputElement};
use yew::prelude::*;

#[derive(Clone, PartialEq)]
enum UploadStatus {
    Idle,
    Uploading,
    Success,
    Invalid(String),
    Error(String),
}

#[derive(Properties, PartialEq)]
pub struct UploadFormProps {
    pub on_uploaded: Callback<UploadedVideo>,
}

#[function_component(UploadForm)]
pub fn upload_form(props: &UploadFormProps) -> Html {
    let file = use_state(|| None::<File>);
    let status = use_state(|| UploadStatus::Idle);
    let input_ref = use_node_ref();
    let extension = CONFIG.upload_extension().to_uppercase();

    let on_file_change = {
        let file = file.clone();
        let status = status.clone();
        Callback::from(move |e: Event| {
            let input = e.target_unchecked_into::<HtmlInputElement>();
            file.set(input.files().and_then(|files| files.get(0)));
            status.set(UploadStatus::Idle);
        })
    };

    let on_submit = {
        let file = file.clone();
        let status = status.clone();
        let input_ref = input_ref.clone();
        let on_uploaded = props.on_uploaded.clone();
        let extension = extension.clone();

        Callback::from(move |e: web_sys::SubmitEvent| {
            e.prevent_default();

            let Some(selected) = (*file).clone() else {
                status.set(UploadStatus::Invalid(format!(
                    "Please select an {extension} file first."
                )));
                return;
            };
            if !CONFIG.accepts_upload(&selected.name(), &selected.type_()) {
                status.set(UploadStatus::Invalid(format!(
                    "Please select an {extension} file."
                )));
                return;
            }

            status.set(UploadStatus::Uploading);

            let file = file.clone();
            let status = status.clone();
            let input_ref = input_ref.clone();
            let on_uploaded = on_uploaded.clone();

            wasm_bindgen_futures::spawn_local(async move {
                match upload_video(&selected).await {
                    Ok(uploaded) => {
                        log::info!("Uploaded {} as {}", selected.name(), uploaded.id);
                        status.set(UploadStatus::Success);
                        file.set(None);
                        if let Some(input) = input_ref.cast::<HtmlInputElement>() {
                            input.set_value("");
                        }
                        on_uploaded.emit(uploaded);
                    }
                    Err(e) => {
                        log::warn!("Upload of {} failed: {e}", selected.name());
                        status.set(UploadStatus::Error(e.to_string()));
                    }
                }
            });
        })
    };

    let uploading = *status == UploadStatus::Uploading;

    html! {
        <form onsubmit={on_submit} class="mb-6 bg-gray-50 p-4 rounded-lg">
            <h3 class="text-lg font-semibold text-gray-800 mb-4">
                {format!("Upload {extension} Video")}
            </h3>
            <div class="flex gap-4">
                <input
                    ref={input_ref}
                    id="videoFile"
                    type="file"
                    accept={CONFIG.upload_media_type.clone()}
                    class="flex-1 p-2 border border-gray-300 rounded focus:outline-none focus:ring-2 focus:ring-blue-500"
                    onchange={on_file_change}
                    disabled={uploading}
                />
                <button
                    type="submit"
                    disabled={uploading}
                    class="bg-blue-600 text-white px-6 py-2 rounded hover:bg-blue-700 disabled:opacity-50"
                >
                    {if uploading { "Uploading…" } else { "Upload Video" }}
                </button>
            </div>
            {
                match &*status {
                    UploadStatus::Success => html! {
                        <p class="text-green-600 mt-3">{"Video uploaded successfully!"}</p>
                    },
                    UploadStatus::Invalid(msg) => html! {
                        <p class="text-red-600 mt-3">{msg}</p>
                    },
                    UploadStatus::Error(msg) => html! {
                        <p class="text-red-600 mt-3">{format!("Upload failed: {msg}")}</p>
                    },
                    _ => html! {},
                }
            }
        </form>
    }
}

use dashboard_core::models::PromptItem;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
struct ModalProps {
    pub title: String,
    pub on_close: Callback<()>,
    pub children: Children,
}

#[function_component(Modal)]
fn modal(props: &ModalProps) -> Html {
    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    // clicks inside the panel must not reach the backdrop
    let stop = Callback::from(|e: MouseEvent| e.stop_propagation());

    html! {
        <div class="fixed inset-0 bg-black bg-opacity-50 flex items-center justify-center z-50" onclick={on_close.clone()}>
            <div class="bg-white rounded-lg shadow-lg p-6 w-full max-w-lg max-h-[80vh] overflow-y-auto" onclick={stop}>
                <div class="flex justify-between items-center mb-4">
                    <h2 class="text-xl font-semibold text-gray-800">{&props.title}</h2>
                    <button onclick={on_close} class="text-gray-500 hover:text-gray-800">{"✕"}</button>
                </div>
                { for props.children.iter() }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct TranscriptDialogProps {
    pub open: bool,
    pub transcript: String,
    pub on_close: Callback<()>,
}

#[function_component(TranscriptDialog)]
pub fn transcript_dialog(props: &TranscriptDialogProps) -> Html {
    if !props.open {
        return html! {};
    }

    html! {
        <Modal title="Transcript" on_close={props.on_close.clone()}>
            <div class="mt-4 whitespace-pre-wrap text-sm">{&props.transcript}</div>
        </Modal>
    }
}

#[derive(Properties, PartialEq)]
pub struct AnalysisDialogProps {
    pub open: bool,
    pub prompt: Vec<PromptItem>,
    pub analysis: String,
    pub on_close: Callback<()>,
}

#[function_component(AnalysisDialog)]
pub fn analysis_dialog(props: &AnalysisDialogProps) -> Html {
    if !props.open {
        return html! {};
    }

    let prompt = props
        .prompt
        .iter()
        .map(|p| format!("{}: {}", p.role, p.content))
        .collect::<Vec<_>>()
        .join("\n");

    html! {
        <Modal title="Analysis" on_close={props.on_close.clone()}>
            {
                if prompt.is_empty() {
                    html! {}
                } else {
                    html! {
                        <>
                            <h3 class="text-lg font-semibold text-gray-800 mt-2">{"Prompt"}</h3>
                            <div class="mt-2 whitespace-pre-wrap text-sm text-gray-700">{prompt}</div>
                            <h3 class="text-lg font-semibold text-gray-800 mt-6">{"Result"}</h3>
                        </>
                    }
                }
            }
            <div class="mt-2 whitespace-pre-wrap text-sm">{&props.analysis}</div>
        </Modal>
    }
}

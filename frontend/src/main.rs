mod env_variable_utils;
mod router;
mod utils;
mod videos;

use crate::env_variable_utils::CONFIG;
use crate::router::{switch, Route};
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <BrowserRouter>
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}

fn main() {
    let level = if CONFIG.debug {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    wasm_logger::init(wasm_logger::Config::new(level));

    yew::Renderer::<App>::new().render();

    log::info!(
        "NAME: \"{}\", API: \"{}\", STATUS: \"{}\", DEBUG: \"{}\"",
        CONFIG.app_name,
        CONFIG.backend_url,
        CONFIG.status_ws_url,
        CONFIG.debug
    );
}

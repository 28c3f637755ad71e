use crate::videos::components::DashboardLayout;
use crate::videos::detail::VideoDetailPage;
use crate::videos::VideoDashboard;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/videos/:id")]
    VideoDetail { id: String },
    #[not_found]
    #[at("/404")]
    NotFound,
}

pub fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => html! { <VideoDashboard /> },
        Route::VideoDetail { id } => html! { <VideoDetailPage id={id} /> },
        Route::NotFound => html! {
            <DashboardLayout title="Page not found" back_link={true}>
                <p class="text-gray-600">{"There is nothing at this address."}</p>
            </DashboardLayout>
        },
    }
}

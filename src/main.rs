use std::rc::Rc;

use log::info;
use yew::prelude::*;
use yew_router::prelude::*;

mod config;
mod content;
mod session;
mod motion {
    pub mod dom;
    pub mod easing;
    pub mod frame;
    pub mod hooks;
    pub mod hover;
    pub mod listeners;
    pub mod mapper;
    pub mod progress;
    pub mod sink;
    pub mod tracker;
    pub mod trigger;
    pub mod tween;
}
mod components {
    pub mod brand;
    pub mod footer;
    pub mod hero;
    pub mod navigation;
    pub mod page_loader;
    pub mod team;
    pub mod video;
}
mod pages {
    pub mod home;
}

use components::{footer::Footer, navigation::Navigation, page_loader::PageLoader};
use content::Content;
use pages::home::Home;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Home page");
            html! { <Home /> }
        }
        // Unknown paths render the home page.
        Route::NotFound => {
            info!("Unknown route, rendering Home page");
            html! { <Home /> }
        }
    }
}

#[function_component]
fn App() -> Html {
    let content = use_memo(|_| Content::embedded(), ());

    html! {
        <ContextProvider<Rc<Content>> context={content}>
            <PageLoader />
            <BrowserRouter>
                <Navigation />
                <Switch<Route> render={switch} />
                <Footer />
            </BrowserRouter>
        </ContextProvider<Rc<Content>>>
    }
}

fn main() {
    console_error_panic_hook::set_once();

    // Only fails when a logger is already installed.
    let _ = console_log::init_with_level(config::log_level());

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}

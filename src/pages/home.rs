use yew::prelude::*;

use crate::components::brand::Brand;
use crate::components::hero::Hero;
use crate::components::team::Team;
use crate::components::video::Video;

#[function_component(Home)]
pub fn home() -> Html {
    html! {
        <main class="home">
            <style>
                {r#"
                    .home {
                        width: 100%;
                        overflow-x: hidden;
                        background: #f5f5f5;
                    }
                "#}
            </style>
            <Hero />
            <Video />
            <Brand />
            <Team />
        </main>
    }
}

use std::cell::Cell;

use log::debug;
use yew::prelude::*;

use crate::motion::hooks::use_scroll_progress;
use crate::motion::mapper::TextSwap;
use crate::motion::progress::{ScrollSpan, TriggerPoint};
use crate::motion::sink::{ElementSink, VisualSink};

const HEADLINE_SPAN: ScrollSpan = ScrollSpan::new(TriggerPoint::TOP_TOP, TriggerPoint::BOTTOM_TOP);
pub const HEADLINE: TextSwap = TextSwap::new("EVERYTHING", &[(0.25, "IMPACT"), (0.75, "GROWTH")]);

#[function_component(Hero)]
pub fn hero() -> Html {
    let container_ref = use_node_ref();
    let headline_ref = use_node_ref();

    {
        let headline = ElementSink::new(headline_ref.clone(), "hero headline");
        let shown = Cell::new(HEADLINE.text_at(0.0));
        use_scroll_progress(container_ref.clone(), HEADLINE_SPAN, move |p| {
            let text = HEADLINE.text_at(p);
            if shown.replace(text) != text {
                debug!("hero headline -> {}", text);
                headline.set_text(text);
            }
        });
    }

    html! {
        <div ref={container_ref} class="hero">
            <style>
                {r#"
                    .hero {
                        width: 100%;
                        padding: 2.5rem 0;
                        background: #f9fafb;
                        display: flex;
                        flex-direction: column;
                        align-items: center;
                        justify-content: center;
                        position: relative;
                    }
                    .hero-logo {
                        position: absolute;
                        top: 2rem;
                        left: 50%;
                        transform: translateX(-50%);
                        object-fit: contain;
                    }
                    .hero-titles {
                        text-align: center;
                        padding: 9rem 1rem 0;
                    }
                    .hero-titles h1,
                    .hero-titles h2 {
                        margin: 0;
                        font-size: 3.75rem;
                        font-weight: 500;
                        letter-spacing: 0.025em;
                        line-height: 1;
                        color: #343434;
                    }
                    .hero-titles h2 + h2 {
                        margin-top: -1.25rem;
                    }
                    .hero-swap {
                        margin-top: -1rem;
                    }
                    @media (min-width: 768px) {
                        .hero-titles h1, .hero-titles h2 { font-size: 6rem; }
                    }
                    @media (min-width: 1024px) {
                        .hero-titles h2 { font-size: 144px; }
                        .hero-titles h1 { font-size: 8rem; }
                    }
                "#}
            </style>
            <img class="hero-logo" src="/assets/logo.webp" alt="up&up logo" width="120" height="40" />
            <div class="hero-titles">
                <div>
                    <h2>{"CREATIVITY"}</h2>
                    <h2>{"ELEVATES"}</h2>
                </div>
                <div class="hero-swap">
                    <h1 ref={headline_ref}>{HEADLINE.text_at(0.0)}</h1>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::progress::Geometry;

    #[test]
    fn headline_swaps_while_the_hero_scrolls_away() {
        // Hero 900px tall at the top of the page in an 800px viewport.
        let geometry = Geometry {
            element_top: 0.0,
            element_height: 900.0,
            viewport_height: 800.0,
        };
        let text_at = |scroll: f64| HEADLINE.text_at(HEADLINE_SPAN.progress(scroll, &geometry));
        assert_eq!(text_at(0.0), "EVERYTHING");
        assert_eq!(text_at(225.0), "EVERYTHING");
        assert_eq!(text_at(226.0), "IMPACT");
        assert_eq!(text_at(675.0), "IMPACT");
        assert_eq!(text_at(676.0), "GROWTH");
        assert_eq!(text_at(5000.0), "GROWTH");
    }
}

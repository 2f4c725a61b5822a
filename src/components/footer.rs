use std::rc::Rc;

use web_sys::MouseEvent;
use yew::prelude::*;

use crate::content::{Content, Link};
use crate::motion::easing::Easing;
use crate::motion::hooks::use_entrance;
use crate::motion::mapper::{map_props, Property, TransformRange, VisualProps};
use crate::motion::progress::TriggerPoint;
use crate::motion::sink::{ElementSink, VisualSink};
use crate::motion::trigger::Entrance;
use crate::motion::tween::{stagger_end_ms, Tween};
use crate::session::mark_client_navigation;

const TRIGGER: TriggerPoint = TriggerPoint::top_at(80.0);

/// One element's part of the footer entrance.
struct Part {
    tween: Tween,
    ranges: [TransformRange; 2],
}

impl Part {
    fn props_at(&self, elapsed_ms: f64) -> VisualProps {
        map_props(VisualProps::default(), &self.ranges, self.tween.progress_at(elapsed_ms))
    }
}

const fn fade(property: Property, from: f64, to: f64, tween: Tween) -> Part {
    Part {
        tween,
        ranges: [
            TransformRange::linear(property, from, to),
            TransformRange::linear(Property::Opacity, 0.0, 1.0),
        ],
    }
}

const LOGO: Part = fade(Property::Y, -30.0, 0.0, Tween::new(1000.0, Easing::Power3Out));
const DESCRIPTION: Part = fade(Property::Y, 20.0, 0.0, Tween::new(1000.0, Easing::Power3Out).delayed(200.0));
const BUTTON: Part = fade(Property::Scale, 0.8, 1.0, Tween::new(800.0, Easing::BackOut(1.7)).delayed(400.0));
const GROUP: Part = fade(Property::Y, 50.0, 0.0, Tween::new(1000.0, Easing::Power3Out).delayed(600.0));
const GROUP_STAGGER_MS: f64 = 150.0;

/// Footer entrance at `elapsed_ms`: logo, description, button and each of
/// `groups` link groups.
pub fn entrance_frame(elapsed_ms: f64, groups: usize) -> (VisualProps, VisualProps, VisualProps, Vec<VisualProps>) {
    let grid = (0..groups)
        .map(|i| {
            let tween = GROUP.tween.staggered(i, GROUP_STAGGER_MS);
            map_props(VisualProps::default(), &GROUP.ranges, tween.progress_at(elapsed_ms))
        })
        .collect();
    (
        LOGO.props_at(elapsed_ms),
        DESCRIPTION.props_at(elapsed_ms),
        BUTTON.props_at(elapsed_ms),
        grid,
    )
}

pub fn entrance_length_ms(groups: usize) -> f64 {
    [
        LOGO.tween.end_ms(),
        DESCRIPTION.tween.end_ms(),
        BUTTON.tween.end_ms(),
        stagger_end_ms(&GROUP.tween, groups, GROUP_STAGGER_MS),
    ]
    .into_iter()
    .fold(0.0, f64::max)
}

fn is_internal(href: &str) -> bool {
    href.starts_with('/')
}

fn link_html(link: &Link, class: &'static str) -> Html {
    let onclick = is_internal(&link.href).then(|| Callback::from(|_: MouseEvent| mark_client_navigation()));
    html! {
        <a href={link.href.clone()} class={class} {onclick}>{&link.label}</a>
    }
}

#[function_component(Footer)]
pub fn footer() -> Html {
    let content = use_context::<Rc<Content>>().unwrap_or_default();
    let footer_ref = use_node_ref();
    let logo_ref = use_node_ref();
    let description_ref = use_node_ref();
    let button_ref = use_node_ref();
    let group_refs = use_state(|| (0..content.footer.len()).map(|_| NodeRef::default()).collect::<Vec<_>>());

    {
        let logo = ElementSink::new(logo_ref.clone(), "footer logo");
        let description = ElementSink::new(description_ref.clone(), "footer description");
        let button = ElementSink::new(button_ref.clone(), "footer button");
        let groups: Vec<ElementSink> = group_refs
            .iter()
            .map(|node| ElementSink::new(node.clone(), "footer group"))
            .collect();
        let length = entrance_length_ms(groups.len());
        use_entrance(footer_ref.clone(), TRIGGER, Entrance::once(), length, move |t| {
            let (logo_props, description_props, button_props, grid) = entrance_frame(t, groups.len());
            logo.apply(&logo_props);
            description.apply(&description_props);
            button.apply(&button_props);
            for (group, props) in groups.iter().zip(grid.iter()) {
                group.apply(props);
            }
        });
    }

    html! {
        <div class="footer-wrap">
            <style>
                {r#"
                    .footer-wrap {
                        min-height: 100vh;
                        background: #f9fafb;
                        display: flex;
                        align-items: center;
                        justify-content: center;
                    }
                    footer {
                        width: 100%;
                        background: white;
                        overflow: hidden;
                    }
                    .footer-top {
                        padding: 4rem 2rem;
                        text-align: center;
                    }
                    .footer-logo {
                        margin-bottom: 2rem;
                    }
                    .footer-logo h1 {
                        font-size: 3rem;
                        font-family: serif;
                        letter-spacing: -0.025em;
                        margin: 0;
                    }
                    .footer-description {
                        color: #9ca3af;
                        font-size: 1.125rem;
                        font-weight: 300;
                        line-height: 1.625;
                        max-width: 42rem;
                        margin: 0 auto 2.5rem;
                    }
                    .footer-cta {
                        padding: 1rem 3rem;
                        border: none;
                        border-top: 2px solid #d1d5db;
                        border-bottom: 2px solid #d1d5db;
                        border-radius: 8px;
                        background: transparent;
                        color: #1f2937;
                        font-size: 13px;
                        font-weight: 500;
                        letter-spacing: 0.05em;
                        text-transform: uppercase;
                        cursor: pointer;
                        transition: all 0.3s;
                    }
                    .footer-cta:hover {
                        background: #111827;
                        color: white;
                        border-color: #111827;
                    }
                    .footer-grid {
                        display: grid;
                        grid-template-columns: 1fr;
                        gap: 1px;
                        padding: 0.25rem;
                    }
                    .footer-group {
                        display: flex;
                        flex-direction: column;
                        justify-content: space-between;
                        min-height: 300px;
                        padding: 0.75rem;
                        color: white;
                    }
                    .footer-group:nth-child(1) { background: #f5714b; border-radius: 0.75rem 0.75rem 0 0; }
                    .footer-group:nth-child(2) { background: #f87c5a; }
                    .footer-group:nth-child(3) { background: #fe9275; border-radius: 0 0 0.75rem 0.75rem; }
                    .footer-group h1 {
                        font-size: 16px;
                        font-weight: 500;
                        letter-spacing: 0.025em;
                        margin: 0;
                    }
                    .footer-group-bottom {
                        display: flex;
                        align-items: flex-end;
                        justify-content: space-between;
                    }
                    .footer-link {
                        display: block;
                        color: rgba(255, 255, 255, 0.9);
                        font-size: 13px;
                        font-weight: 500;
                        text-transform: uppercase;
                        text-decoration: none;
                        transition: color 0.2s;
                    }
                    .footer-link:hover {
                        color: white;
                    }
                    .footer-button {
                        padding: 0.5rem 1.5rem;
                        background: rgba(255, 255, 255, 0.1);
                        border: 1px solid rgba(255, 255, 255, 0.3);
                        border-radius: 2px;
                        color: white;
                        font-size: 13px;
                        font-weight: 500;
                        letter-spacing: 0.05em;
                        text-decoration: none;
                        transition: all 0.3s;
                    }
                    .footer-button:hover {
                        background: rgba(255, 255, 255, 0.3);
                    }
                    .footer-note {
                        color: rgba(255, 255, 255, 0.7);
                        font-size: 0.75rem;
                        font-weight: 300;
                        letter-spacing: 0.05em;
                        text-transform: uppercase;
                        margin: 0.25rem 0 0;
                    }
                    @media (min-width: 768px) {
                        .footer-top { padding: 6rem 4rem; }
                        .footer-logo h1 { font-size: 3.75rem; }
                        .footer-description { font-size: 1.25rem; }
                    }
                    @media (min-width: 1024px) {
                        .footer-grid { grid-template-columns: repeat(3, 1fr); }
                        .footer-group:nth-child(1) { border-radius: 0.75rem 0 0 0.75rem; }
                        .footer-group:nth-child(3) { border-radius: 0 0.75rem 0.75rem 0; }
                    }
                "#}
            </style>
            <footer ref={footer_ref}>
                <div class="footer-top">
                    <div ref={logo_ref} class="footer-logo">
                        <h1>{"up&up"}</h1>
                    </div>
                    <p ref={description_ref} class="footer-description">
                        {"We're a creative solutions Group. But much more than that: we're in the business of up."}
                    </p>
                    <button ref={button_ref} class="footer-cta">{"LET'S CHAT"}</button>
                </div>
                <div class="footer-grid">
                    { for content.footer.iter().enumerate().map(|(i, group)| html! {
                        <div ref={group_refs.get(i).cloned().unwrap_or_default()} key={group.title.clone()} class="footer-group">
                            <h1>{&group.title}</h1>
                            <div class="footer-group-bottom">
                                <div>
                                    <nav>
                                        { for group.links.iter().map(|link| link_html(link, "footer-link")) }
                                    </nav>
                                    {
                                        match &group.note {
                                            Some(note) => html! { <p class="footer-note">{note}</p> },
                                            None => html! {},
                                        }
                                    }
                                </div>
                                {
                                    match &group.button {
                                        Some(button) => link_html(button, "footer-button"),
                                        None => html! {},
                                    }
                                }
                            </div>
                        </div>
                    }) }
                </div>
            </footer>
        </div>
    }
}

use std::rc::Rc;

use web_sys::MouseEvent;
use yew::prelude::*;

use crate::content::Content;
use crate::motion::dom;
use crate::motion::easing::Easing;
use crate::motion::frame::FrameLoop;
use crate::motion::hooks::{use_entrance, use_frame_slot, use_scroll_progress};
use crate::motion::hover::{Emphasis, EmphasisOpacity, Highlight};
use crate::motion::mapper::{map_props, Property, TransformRange, VisualProps};
use crate::motion::progress::{ScrollSpan, TriggerPoint};
use crate::motion::sink::{ElementSink, VisualSink};
use crate::motion::trigger::Entrance;
use crate::motion::tween::{stagger_end_ms, Tween};

const DEFAULT_LOGO: &str = "/assets/home/brand-logo.webp";

const LOGO_SPAN: ScrollSpan = ScrollSpan::new(TriggerPoint::TOP_TOP, TriggerPoint::BOTTOM_BOTTOM);
const LOGO_START_Y: f64 = 50.0;
const LOGO_END_OVERSHOOT: f64 = 200.0;

const ROW_TRIGGER: TriggerPoint = TriggerPoint::top_at(80.0);
const ROW_TWEEN: Tween = Tween::new(800.0, Easing::Power2Out);
const ROW_STAGGER_MS: f64 = 100.0;
// Rows render at 0.6 emphasis, so 0.5 -> 1 here reads as 0.3 -> 0.6.
const ROW_IN: [TransformRange; 2] = [
    TransformRange::linear(Property::Opacity, 0.5, 1.0),
    TransformRange::linear(Property::Y, 50.0, 0.0),
];

const ROW_OPACITY: EmphasisOpacity = EmphasisOpacity {
    default: 0.6,
    highlighted: 1.0,
    dimmed: 0.3,
};

const PULSE_DOWN: Tween = Tween::new(200.0, Easing::Power2InOut);
const PULSE_UP: Tween = Tween::new(200.0, Easing::Power2Out).delayed(200.0);
const PULSE_SCALE: f64 = 0.9;

/// Logo offset inside the brand section: it travels the whole section
/// rather than sticking.
pub fn logo_offset(progress: f64, container_height: f64, viewport_height: f64) -> f64 {
    let end = container_height - viewport_height + LOGO_END_OVERSHOOT;
    LOGO_START_Y + progress * (end - LOGO_START_Y)
}

/// Logo scale `elapsed_ms` into the hover pulse: down to 0.9, back to 1.
pub fn pulse_scale(elapsed_ms: f64) -> f64 {
    if elapsed_ms < PULSE_DOWN.end_ms() {
        1.0 - (1.0 - PULSE_SCALE) * PULSE_DOWN.progress_at(elapsed_ms)
    } else {
        PULSE_SCALE + (1.0 - PULSE_SCALE) * PULSE_UP.progress_at(elapsed_ms)
    }
}

#[function_component(Brand)]
pub fn brand() -> Html {
    let content = use_context::<Rc<Content>>().unwrap_or_default();
    let hovered = use_state_eq(|| Highlight::NONE);
    let container_ref = use_node_ref();
    let track_ref = use_node_ref();
    let frame_ref = use_node_ref();
    let list_ref = use_node_ref();
    let row_refs = use_state(|| (0..content.brands.len()).map(|_| NodeRef::default()).collect::<Vec<_>>());
    let pulse = use_frame_slot();

    {
        let container_ref = container_ref.clone();
        let track = ElementSink::new(track_ref.clone(), "brand logo");
        use_scroll_progress(container_ref.clone(), LOGO_SPAN, move |p| {
            let Ok(container) = dom::element(&container_ref, "brand section") else {
                return;
            };
            let viewport = dom::viewport_height().unwrap_or(0.0);
            let y = logo_offset(p, container.offset_height() as f64, viewport);
            track.apply(&VisualProps::default().with(Property::Y, y));
        });
    }

    {
        let rows: Vec<ElementSink> = row_refs
            .iter()
            .map(|node| ElementSink::new(node.clone(), "brand row"))
            .collect();
        let length = stagger_end_ms(&ROW_TWEEN, rows.len(), ROW_STAGGER_MS);
        use_entrance(list_ref.clone(), ROW_TRIGGER, Entrance::reversible(), length, move |t| {
            for (i, row) in rows.iter().enumerate() {
                let p = ROW_TWEEN.staggered(i, ROW_STAGGER_MS).progress_at(t);
                row.apply(&map_props(VisualProps::default(), &ROW_IN, p));
            }
        });
    }

    let on_leave = {
        let hovered = hovered.clone();
        Callback::from(move |_: MouseEvent| hovered.set(Highlight::NONE))
    };

    let logo = hovered
        .index()
        .and_then(|i| content.brands.get(i))
        .map(|brand| (brand.logo.clone(), brand.name.clone()))
        .unwrap_or_else(|| (DEFAULT_LOGO.to_string(), "Default Logo".to_string()));

    let rows = content.brands.iter().enumerate().map(|(i, brand)| {
        let emphasis = hovered.emphasis(i);
        let on_enter = {
            let hovered = hovered.clone();
            let frame = ElementSink::new(frame_ref.clone(), "brand logo frame");
            let pulse = pulse.clone();
            Callback::from(move |_: MouseEvent| {
                hovered.set(Highlight::enter(i));
                let frame = frame.clone();
                *pulse.borrow_mut() = FrameLoop::run_for(
                    PULSE_UP.end_ms(),
                    move |t| frame.apply(&VisualProps::default().with(Property::Scale, pulse_scale(t))),
                    || (),
                );
            })
        };
        let node = row_refs.get(i).cloned().unwrap_or_default();
        html! {
            <div ref={node} key={brand.name.clone()} class="brand-row" onmouseenter={on_enter} onmouseleave={on_leave.clone()}>
                <div
                    class={classes!("brand-row-inner", (emphasis == Emphasis::Highlighted).then(|| "is-highlighted"))}
                    style={format!("opacity: {};", ROW_OPACITY.of(emphasis))}
                >
                    <div class="brand-name"><h1>{&brand.name}</h1></div>
                    <div class="brand-description"><p>{&brand.description}</p></div>
                </div>
            </div>
        }
    });

    html! {
        <div ref={container_ref} class="brand-section">
            <style>
                {r#"
                    .brand-section {
                        width: 100%;
                        min-height: 300vh;
                        background: #f5f5f5;
                        position: relative;
                        overflow: hidden;
                    }
                    .brand-headline {
                        position: absolute;
                        top: 2rem;
                        right: 2rem;
                        width: 100%;
                        z-index: 10;
                    }
                    .brand-headline h1 {
                        color: #1f2937;
                        font-size: 36px;
                        line-height: 1.25;
                        font-weight: 500;
                        padding-top: 4rem;
                        margin: 0;
                    }
                    .brand-headline .accent {
                        color: #e5634c;
                    }
                    .brand-logo-anchor {
                        position: absolute;
                        top: 2.5rem;
                        left: 50%;
                        transform: translateX(-50%);
                        z-index: 20;
                    }
                    .brand-logo-frame {
                        width: 240px;
                        height: 256px;
                        display: flex;
                        align-items: center;
                        justify-content: center;
                        margin-right: 300px;
                    }
                    .brand-logo-frame img {
                        max-width: 100%;
                        max-height: 100%;
                        object-fit: contain;
                        transition: all 0.3s;
                    }
                    .brand-list {
                        width: 100%;
                        padding-top: 350px;
                        padding-bottom: 100vh;
                    }
                    .brand-row {
                        border-top: 1px solid #9ca3af;
                        border-bottom: 1px solid #9ca3af;
                        cursor: pointer;
                    }
                    .brand-row-inner {
                        display: flex;
                        align-items: center;
                        justify-content: space-between;
                        padding: 1.5rem 0;
                        transition: opacity 0.3s ease-out;
                    }
                    .brand-name {
                        flex: 1;
                        padding-left: 1rem;
                    }
                    .brand-name h1 {
                        margin: 0;
                        font-weight: 300;
                        font-size: 22px;
                        color: #343434;
                        transition: all 0.3s;
                    }
                    .brand-description {
                        flex: 1;
                        margin-left: 110px;
                        text-align: left;
                    }
                    .brand-description p {
                        margin: 0;
                        font-size: 16px;
                        font-weight: 500;
                        letter-spacing: 0.05em;
                        color: #343434;
                        transition: all 0.3s;
                    }
                    .brand-row-inner.is-highlighted .brand-name h1 {
                        color: black;
                        font-size: 3rem;
                        font-weight: 500;
                        padding: 1.25rem 0;
                    }
                    .brand-row-inner.is-highlighted .brand-description p {
                        color: black;
                        font-size: 20px;
                    }
                    @media (min-width: 1024px) {
                        .brand-headline {
                            max-width: 850px;
                        }
                    }
                "#}
            </style>
            <div class="brand-headline">
                <h1>
                    {"Since "}<span class="accent">{"2010"}</span>
                    {" we have used creativity to elevate some of the world's most ambitious brands, organisations and causes on the African continent and beyond."}
                </h1>
            </div>
            <div class="brand-logo-anchor">
                <div ref={track_ref} class="brand-logo-track">
                    <div ref={frame_ref.clone()} class="brand-logo-frame">
                        <img src={logo.0} alt={logo.1} />
                    </div>
                </div>
            </div>
            <div class="brand-list">
                <div ref={list_ref}>
                    { for rows }
                </div>
            </div>
        </div>
    }
}

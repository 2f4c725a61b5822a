use std::rc::Rc;

use web_sys::MouseEvent;
use yew::prelude::*;

use crate::content::Content;
use crate::motion::easing::Easing;
use crate::motion::hooks::{use_entrance, use_scroll_progress};
use crate::motion::hover::{Emphasis, Highlight};
use crate::motion::mapper::{bucket_index, map_props, Property, TransformRange, VisualProps};
use crate::motion::progress::{Edge, ScrollSpan, TriggerPoint};
use crate::motion::sink::{ElementSink, VisualSink};
use crate::motion::trigger::Entrance;
use crate::motion::tween::{stagger_end_ms, Tween};

/// The highlight walks the roster while the section passes the viewport centre.
const ROSTER_SPAN: ScrollSpan = ScrollSpan::new(
    TriggerPoint::new(Edge::Top, Edge::Center),
    TriggerPoint::new(Edge::Bottom, Edge::Center),
);

const MEMBER_TRIGGER: TriggerPoint = TriggerPoint::top_at(80.0);
const MEMBER_TWEEN: Tween = Tween::new(1000.0, Easing::Power3Out);
const MEMBER_STAGGER_MS: f64 = 200.0;
const MEMBER_IN: [TransformRange; 2] = [
    TransformRange::linear(Property::Y, 60.0, 0.0),
    TransformRange::linear(Property::Opacity, 0.0, 1.0),
];

/// Scroll-derived highlight for a roster of `count` members.
pub fn scroll_highlight(progress: f64, count: usize) -> Highlight {
    bucket_index(progress, count).map_or(Highlight::NONE, Highlight::enter)
}

#[function_component(Team)]
pub fn team() -> Html {
    let content = use_context::<Rc<Content>>().unwrap_or_default();
    let scrolled = use_state_eq(|| Highlight::NONE);
    let hovered = use_state_eq(|| Highlight::NONE);
    let section_ref = use_node_ref();
    let grid_ref = use_node_ref();
    let member_refs = use_state(|| (0..content.team.len()).map(|_| NodeRef::default()).collect::<Vec<_>>());

    {
        let scrolled = scrolled.clone();
        let count = content.team.len();
        use_scroll_progress(section_ref.clone(), ROSTER_SPAN, move |p| {
            scrolled.set(scroll_highlight(p, count));
        });
    }

    {
        let members: Vec<ElementSink> = member_refs
            .iter()
            .map(|node| ElementSink::new(node.clone(), "team member"))
            .collect();
        let length = stagger_end_ms(&MEMBER_TWEEN, members.len(), MEMBER_STAGGER_MS);
        use_entrance(grid_ref.clone(), MEMBER_TRIGGER, Entrance::reversible(), length, move |t| {
            for (i, member) in members.iter().enumerate() {
                let p = MEMBER_TWEEN.staggered(i, MEMBER_STAGGER_MS).progress_at(t);
                member.apply(&map_props(VisualProps::default(), &MEMBER_IN, p));
            }
        });
    }

    let highlight = hovered.or(*scrolled);
    let on_leave = {
        let hovered = hovered.clone();
        Callback::from(move |_: MouseEvent| hovered.set(Highlight::NONE))
    };

    html! {
        <section ref={section_ref} class="team-section">
            <style>
                {r#"
                    .team-section {
                        width: 100%;
                        max-width: 80rem;
                        margin: 0 auto;
                        padding: 5rem 2rem;
                        box-sizing: border-box;
                    }
                    .team-section h2 {
                        font-size: 2.25rem;
                        font-weight: 600;
                        text-align: center;
                        margin: 0 0 3rem;
                        color: #343434;
                    }
                    .team-grid {
                        display: grid;
                        grid-template-columns: 1fr;
                        gap: 2.5rem;
                    }
                    .team-member {
                        display: flex;
                        flex-direction: column;
                        align-items: center;
                        cursor: pointer;
                    }
                    .team-member-card {
                        display: flex;
                        flex-direction: column;
                        align-items: center;
                        opacity: 0.5;
                        transition: opacity 0.3s ease-out, transform 0.3s ease-out;
                    }
                    .team-member-card.is-highlighted {
                        opacity: 1;
                        transform: scale(1.05);
                    }
                    .team-member img {
                        width: 10rem;
                        height: 10rem;
                        border-radius: 9999px;
                        object-fit: cover;
                        margin-bottom: 1.5rem;
                        border: 4px solid white;
                    }
                    .team-member h3 {
                        font-size: 1.25rem;
                        font-weight: 500;
                        margin: 0;
                        color: #343434;
                    }
                    .team-member p {
                        font-size: 0.875rem;
                        opacity: 0.8;
                        margin: 0.25rem 0 0;
                    }
                    @media (min-width: 640px) {
                        .team-grid { grid-template-columns: repeat(2, 1fr); }
                    }
                    @media (min-width: 768px) {
                        .team-grid { grid-template-columns: repeat(4, 1fr); }
                    }
                "#}
            </style>
            <h2>{"Meet Our Team"}</h2>
            <div ref={grid_ref} class="team-grid">
                { for content.team.iter().enumerate().map(|(i, member)| {
                    let on_enter = {
                        let hovered = hovered.clone();
                        Callback::from(move |_: MouseEvent| hovered.set(Highlight::enter(i)))
                    };
                    let highlighted = highlight.emphasis(i) == Emphasis::Highlighted;
                    html! {
                        <div
                            ref={member_refs.get(i).cloned().unwrap_or_default()}
                            key={member.name.clone()}
                            class="team-member"
                            onmouseenter={on_enter}
                            onmouseleave={on_leave.clone()}
                        >
                            <div class={classes!("team-member-card", highlighted.then(|| "is-highlighted"))}>
                                <img src={member.photo.clone()} alt={member.name.clone()} />
                                <h3>{&member.name}</h3>
                                <p>{&member.role}</p>
                            </div>
                        </div>
                    }
                }) }
            </div>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::progress::Geometry;

    #[test]
    fn highlight_follows_the_roster_down_the_page() {
        // 1000px section starting 2000px down, 800px viewport: the span runs
        // from scroll 1600 to 2600.
        let geometry = Geometry {
            element_top: 2000.0,
            element_height: 1000.0,
            viewport_height: 800.0,
        };
        let at = |scroll: f64| scroll_highlight(ROSTER_SPAN.progress(scroll, &geometry), 4).index();
        assert_eq!(at(0.0), Some(0));
        assert_eq!(at(1849.0), Some(0));
        assert_eq!(at(1850.0), Some(1));
        assert_eq!(at(2350.0), Some(3));
        assert_eq!(at(9000.0), Some(3));
    }

    #[test]
    fn hover_overrides_scroll_and_leaving_restores_it() {
        let scrolled = scroll_highlight(0.6, 4);
        assert_eq!(Highlight::enter(0).or(scrolled).index(), Some(0));
        assert_eq!(Highlight::NONE.or(scrolled).index(), Some(2));
    }

    #[test]
    fn empty_roster_highlights_nothing() {
        assert!(!scroll_highlight(0.5, 0).is_some());
    }

    #[test]
    fn members_rise_in() {
        assert_eq!(map_props(VisualProps::default(), &MEMBER_IN, 0.0).opacity, 0.0);
        assert_eq!(map_props(VisualProps::default(), &MEMBER_IN, 1.0).y, 0.0);
    }
}

use std::rc::Rc;

use log::debug;
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::config::{NAV_FOOTER_CLEARANCE_PX, NAV_SCROLLED_PERCENT};
use crate::content::{Content, NAV_BAR_ITEMS};
use crate::motion::dom;
use crate::motion::easing::Easing;
use crate::motion::frame::FrameLoop;
use crate::motion::hooks::{use_frame_slot, use_layout, Layout};
use crate::motion::hover::{Emphasis, EmphasisOpacity, Highlight};
use crate::motion::listeners::{ListenerGuard, WindowHost};
use crate::motion::mapper::{map_props, Property, TransformRange, VisualProps};
use crate::motion::sink::{ElementSink, VisualSink};
use crate::motion::tween::{stagger_end_ms, Tween};
use crate::session::mark_client_navigation;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MenuState {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

impl MenuState {
    pub fn toggled(self) -> Self {
        match self {
            MenuState::Closed | MenuState::Closing => MenuState::Opening,
            MenuState::Opening | MenuState::Open => MenuState::Closing,
        }
    }

    pub fn closed(self) -> Self {
        match self {
            MenuState::Opening | MenuState::Open => MenuState::Closing,
            other => other,
        }
    }

    /// The running open/close animation finished.
    pub fn settled(self) -> Self {
        match self {
            MenuState::Opening => MenuState::Open,
            MenuState::Closing => MenuState::Closed,
            other => other,
        }
    }

    pub fn is_showing(self) -> bool {
        matches!(self, MenuState::Opening | MenuState::Open)
    }
}

pub enum NavAction {
    Toggle,
    Close,
    AnimationComplete,
    Hover(usize),
    Leave,
    HoverClose(bool),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavModel {
    pub menu: MenuState,
    pub hover: Highlight,
    pub close_hovered: bool,
}

impl NavModel {
    pub fn apply(self, action: NavAction) -> Self {
        let mut next = self;
        match action {
            NavAction::Toggle => next.menu = self.menu.toggled(),
            NavAction::Close => next.menu = self.menu.closed(),
            NavAction::AnimationComplete => next.menu = self.menu.settled(),
            NavAction::Hover(index) if self.menu.is_showing() => next.hover = Highlight::enter(index),
            NavAction::Hover(_) => {}
            NavAction::Leave => next.hover = Highlight::NONE,
            NavAction::HoverClose(hovered) => next.close_hovered = hovered,
        }
        if !next.menu.is_showing() {
            next.hover = Highlight::NONE;
            next.close_hovered = false;
        }
        next
    }
}

impl Reducible for NavModel {
    type Action = NavAction;

    fn reduce(self: Rc<Self>, action: NavAction) -> Rc<Self> {
        let next = self.apply(action);
        if next == *self {
            return self;
        }
        if next.menu != self.menu {
            debug!("navigation {:?} -> {:?}", self.menu, next.menu);
        }
        Rc::new(next)
    }
}

/// What the floating bar shows and whether it shows at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BarFlags {
    pub scrolled: bool,
    pub visible: bool,
}

impl Default for BarFlags {
    fn default() -> Self {
        Self {
            scrolled: false,
            visible: true,
        }
    }
}

/// `footer_top` is the footer's top relative to the viewport.
pub fn bar_flags(scroll_y: f64, document_height: f64, viewport_height: f64, footer_top: Option<f64>) -> BarFlags {
    let scrollable = document_height - viewport_height;
    let scrolled = scrollable > 0.0 && scroll_y / scrollable * 100.0 >= NAV_SCROLLED_PERCENT;
    let footer_in_view = footer_top.map_or(false, |top| top < viewport_height - NAV_FOOTER_CLEARANCE_PX);
    BarFlags {
        scrolled,
        visible: !footer_in_view,
    }
}

fn read_bar_flags() -> Option<BarFlags> {
    let window = dom::window().ok()?;
    let document = window.document()?;
    let document_height = document.document_element()?.scroll_height() as f64;
    let footer_top = document
        .query_selector("footer")
        .ok()
        .flatten()
        .map(|footer| footer.get_bounding_client_rect().top());
    Some(bar_flags(
        dom::scroll_y(),
        document_height,
        dom::viewport_height()?,
        footer_top,
    ))
}

const PANEL_TWEEN: Tween = Tween::new(600.0, Easing::Power3Out);
const PANEL_IN: [TransformRange; 2] = [
    TransformRange::linear(Property::YPercent, 100.0, 0.0),
    TransformRange::linear(Property::Opacity, 0.0, 1.0),
];
const ITEM_IN: [TransformRange; 2] = [
    TransformRange::linear(Property::Y, 50.0, 0.0),
    TransformRange::linear(Property::Opacity, 0.0, 1.0),
];
const CLOSE_TWEEN: Tween = Tween::new(800.0, Easing::Power3In);
const CLOSED_Y_PERCENT: f64 = -100.0;

const ITEM_OPACITY: EmphasisOpacity = EmphasisOpacity {
    default: 1.0,
    highlighted: 1.0,
    dimmed: 0.4,
};

/// Item entrance timing; compact layouts stagger slower.
fn item_tween(layout: Layout) -> (Tween, f64) {
    let tween = Tween::new(800.0, Easing::Power3Out);
    match layout {
        Layout::Compact => (tween.delayed(200.0), 100.0),
        Layout::Wide => (tween.delayed(100.0), 50.0),
    }
}

#[function_component(Navigation)]
pub fn navigation() -> Html {
    let content = use_context::<Rc<Content>>().unwrap_or_default();
    let model = use_reducer(NavModel::default);
    let flags = use_state_eq(BarFlags::default);
    let layout = use_layout();
    let frames = use_frame_slot();
    let panel_ref = use_node_ref();
    let border_ref = use_node_ref();
    let item_refs = use_state(|| (0..content.nav.len()).map(|_| NodeRef::default()).collect::<Vec<_>>());
    let panel_y = use_mut_ref(|| 100.0_f64);

    {
        let flags = flags.clone();
        use_effect_with_deps(
            move |_| {
                let update: Rc<dyn Fn()> = Rc::new(move || {
                    if let Some(next) = read_bar_flags() {
                        flags.set(next);
                    }
                });
                update();
                let guard = WindowHost::current().map(|host| {
                    let mut guard = ListenerGuard::new(host);
                    guard.listen("scroll", update.clone()).listen("resize", update);
                    guard
                });
                move || drop(guard)
            },
            (),
        );
    }

    {
        let dispatcher = model.dispatcher();
        let panel = ElementSink::new(panel_ref.clone(), "menu panel");
        let items: Vec<ElementSink> = item_refs
            .iter()
            .map(|node| ElementSink::new(node.clone(), "menu item"))
            .collect();
        let panel_y = panel_y.clone();
        let frames = frames.clone();
        use_effect_with_deps(
            move |(menu, layout)| {
                let on_complete = move || dispatcher.dispatch(NavAction::AnimationComplete);
                let started = match menu {
                    MenuState::Opening => {
                        let (item_tween, each_ms) = item_tween(*layout);
                        let total = PANEL_TWEEN.end_ms().max(stagger_end_ms(&item_tween, items.len(), each_ms));
                        FrameLoop::run_for(
                            total,
                            move |t| {
                                let props = map_props(VisualProps::default(), &PANEL_IN, PANEL_TWEEN.progress_at(t));
                                *panel_y.borrow_mut() = props.y_percent;
                                panel.apply(&props);
                                for (i, item) in items.iter().enumerate() {
                                    let p = item_tween.staggered(i, each_ms).progress_at(t);
                                    item.apply(&map_props(VisualProps::default(), &ITEM_IN, p));
                                }
                            },
                            on_complete,
                        )
                    }
                    MenuState::Closing => {
                        let from = *panel_y.borrow();
                        let range = [TransformRange::linear(Property::YPercent, from, CLOSED_Y_PERCENT)];
                        FrameLoop::run_for(
                            CLOSE_TWEEN.end_ms(),
                            move |t| {
                                let props = map_props(VisualProps::default(), &range, CLOSE_TWEEN.progress_at(t));
                                *panel_y.borrow_mut() = props.y_percent;
                                panel.apply(&props);
                            },
                            on_complete,
                        )
                    }
                    MenuState::Open | MenuState::Closed => return,
                };
                *frames.borrow_mut() = started;
            },
            (model.menu, layout),
        );
    }

    {
        let border_ref = border_ref.clone();
        let item_refs = item_refs.clone();
        use_effect_with_deps(
            move |hover| {
                let border = dom::element(&border_ref, "menu highlight border");
                let target = hover
                    .index()
                    .and_then(|i| item_refs.get(i))
                    .and_then(|node| dom::element(node, "menu item").ok());
                if let Ok(border) = border {
                    let styles = match target {
                        Some(item) => vec![
                            ("top", format!("{}px", item.offset_top())),
                            ("left", format!("{}px", item.offset_left() - 40)),
                            ("width", format!("{}px", item.offset_width() + 80)),
                            ("height", format!("{}px", item.offset_height())),
                            ("opacity", "1".to_string()),
                        ],
                        None => vec![("opacity", "0".to_string())],
                    };
                    for (property, value) in styles {
                        if let Err(e) = dom::set_style(&border, property, &value) {
                            debug!("{}", e);
                        }
                    }
                }
                || ()
            },
            model.hover,
        );
    }

    let toggle = {
        let model = model.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            model.dispatch(NavAction::Toggle);
        })
    };
    let close = {
        let model = model.clone();
        Callback::from(move |_: MouseEvent| model.dispatch(NavAction::Close))
    };
    let close_hover = |hovered: bool| {
        let model = model.clone();
        Callback::from(move |_: MouseEvent| model.dispatch(NavAction::HoverClose(hovered)))
    };
    let navigate = {
        let model = model.clone();
        Callback::from(move |_: MouseEvent| {
            mark_client_navigation();
            model.dispatch(NavAction::Close);
        })
    };

    let menu_open = model.menu.is_showing();
    let burger_class = classes!("burger", menu_open.then(|| "is-open"));
    let bar_class = classes!(
        "nav-bar",
        (!flags.visible).then(|| "is-hidden"),
        layout.is_wide().then(|| "is-wide"),
        flags.scrolled.then(|| "is-scrolled"),
    );
    let panel_class = classes!("menu-panel", menu_open.then(|| "is-interactive"));
    let close_class = classes!("menu-close", model.close_hovered.then(|| "is-hovered"));
    let current_image = model
        .hover
        .index()
        .and_then(|i| content.nav.get(i))
        .or_else(|| content.nav.last())
        .map(|item| item.image.clone())
        .unwrap_or_default();

    let bar_content = if flags.scrolled {
        html! {
            <img class="nav-bar-logo" src="/assets/navbar/navbar-logo.webp" alt="up&up Logo" width="25" height="25" />
        }
    } else if layout.is_wide() {
        html! {
            <div class="nav-bar-items">
                { for content.nav.iter().take(NAV_BAR_ITEMS).map(|item| html! {
                    <a class="nav-bar-item" href={item.href.clone()} onclick={navigate.clone()}>{&item.short_name}</a>
                }) }
            </div>
        }
    } else {
        html! { <div class="nav-bar-label">{"Menu"}</div> }
    };

    let items = content.nav.iter().enumerate().map(|(i, item)| {
        let emphasis = model.hover.emphasis(i);
        let onmouseenter = {
            let model = model.clone();
            Callback::from(move |_: MouseEvent| model.dispatch(NavAction::Hover(i)))
        };
        let onmouseleave = {
            let model = model.clone();
            Callback::from(move |_: MouseEvent| model.dispatch(NavAction::Leave))
        };
        let node = item_refs.get(i).cloned().unwrap_or_default();
        html! {
            <div ref={node} class="nav-item" {onmouseenter} {onmouseleave}>
                <a
                    href={item.href.clone()}
                    onclick={navigate.clone()}
                    class={classes!("nav-item-link", (emphasis == Emphasis::Highlighted).then(|| "is-highlighted"))}
                    style={format!("opacity: {};", ITEM_OPACITY.of(emphasis))}
                >
                    {&item.name}
                </a>
            </div>
        }
    });

    let close_button = html! {
        <div class={close_class} onclick={close} onmouseenter={close_hover(true)} onmouseleave={close_hover(false)}>
            <span class="menu-close-icon">{"×"}</span>
        </div>
    };

    html! {
        <>
            <nav class={bar_class}>
                <div class="nav-bar-inner">
                    <div class="nav-bar-content">{bar_content}</div>
                    <button class={burger_class} onclick={toggle}>
                        <span></span>
                        <span></span>
                        <span></span>
                    </button>
                </div>
            </nav>
            <div ref={panel_ref} class={panel_class} style="transform: translateY(100%); opacity: 0;">
                {
                    if layout.is_wide() {
                        html! {
                            <div class="menu-wide">
                                <div class="menu-body">
                                    <div class="menu-actions">
                                        <div class="btn-line-effect">{"LINKEDIN"}</div>
                                        <div class="btn-line-effect">{"NEWSLETTER"}</div>
                                    </div>
                                    <div class="menu-items">
                                        <div ref={border_ref} class="menu-highlight"></div>
                                        { for items }
                                    </div>
                                </div>
                                <div class="menu-image">
                                    <img key={current_image.clone()} src={current_image} alt="Background design" />
                                    {close_button}
                                </div>
                            </div>
                        }
                    } else {
                        html! {
                            <div class="menu-compact">
                                <div class="menu-actions">
                                    <div class="btn-line-effect">{"LINKEDIN"}</div>
                                    <div class="btn-line-effect">{"NEWSLETTER"}</div>
                                </div>
                                <div class="menu-items">{ for items }</div>
                                {close_button}
                            </div>
                        }
                    }
                }
            </div>
            <style>
                {r#"
                    .nav-bar {
                        position: fixed;
                        bottom: 2rem;
                        left: 1rem;
                        right: 1rem;
                        z-index: 50;
                        opacity: 1;
                        transform: translateY(0);
                        transition: all 0.7s ease-in-out;
                    }
                    .nav-bar.is-wide {
                        left: 50%;
                        right: auto;
                        transform: translateX(-50%);
                    }
                    .nav-bar.is-hidden {
                        opacity: 0;
                        pointer-events: none;
                        transform: translateY(100%);
                    }
                    .nav-bar.is-wide.is-hidden {
                        transform: translate(-50%, 100%);
                    }
                    .nav-bar-inner {
                        display: flex;
                        align-items: center;
                        justify-content: space-between;
                        background: rgba(255, 255, 255, 0.9);
                        backdrop-filter: blur(12px);
                        box-shadow: 0 10px 15px rgba(0, 0, 0, 0.1);
                        border: 1px solid #e5e7eb;
                        border-radius: 8px;
                        padding: 0.75rem 1.5rem;
                        transition: all 0.5s;
                    }
                    .nav-bar.is-wide .nav-bar-inner {
                        min-width: 500px;
                    }
                    .nav-bar.is-wide.is-scrolled .nav-bar-inner {
                        min-width: 0;
                        width: 400px;
                    }
                    .nav-bar-items {
                        display: flex;
                        gap: 1.5rem;
                        margin-right: 1.5rem;
                    }
                    .nav-bar-item {
                        color: #1f2937;
                        font-size: 0.875rem;
                        font-weight: 500;
                        white-space: nowrap;
                        text-decoration: none;
                        transition: color 0.3s;
                    }
                    .nav-bar-item:hover {
                        color: #000;
                    }
                    .nav-bar-label {
                        font-size: 1.125rem;
                        font-weight: 500;
                        color: #1f2937;
                    }
                    .burger {
                        display: flex;
                        flex-direction: column;
                        align-items: center;
                        justify-content: center;
                        gap: 4px;
                        width: 2rem;
                        height: 2rem;
                        background: none;
                        border: none;
                        cursor: pointer;
                    }
                    .burger span {
                        display: block;
                        width: 2.5rem;
                        height: 2px;
                        background: #4b5563;
                        transition: all 0.3s;
                    }
                    .burger.is-open span:nth-child(1) { transform: translateY(6px) rotate(45deg); }
                    .burger.is-open span:nth-child(2) { opacity: 0; }
                    .burger.is-open span:nth-child(3) { transform: translateY(-6px) rotate(-45deg); }
                    .menu-panel {
                        position: fixed;
                        inset: 0;
                        z-index: 50;
                        pointer-events: none;
                        background: #f5f5f5;
                    }
                    .menu-panel.is-interactive {
                        pointer-events: auto;
                    }
                    .menu-wide, .menu-compact {
                        width: 100%;
                        height: 100%;
                        display: flex;
                        flex-direction: column;
                    }
                    .menu-compact {
                        justify-content: space-between;
                        padding: 2rem 0;
                    }
                    .menu-body {
                        flex: 1;
                        display: flex;
                        flex-direction: column;
                        padding: 1.25rem 2rem 0;
                    }
                    .menu-actions {
                        display: flex;
                        justify-content: space-between;
                        gap: 0.5rem;
                        padding: 0 1rem;
                    }
                    .menu-items {
                        position: relative;
                        display: flex;
                        flex-direction: column;
                        align-items: center;
                        max-width: 56rem;
                        margin: 0 auto;
                    }
                    .nav-item {
                        position: relative;
                        display: inline-block;
                    }
                    .nav-item-link {
                        display: block;
                        position: relative;
                        z-index: 20;
                        padding: 0.5rem 2rem;
                        font-size: 32px;
                        font-weight: 500;
                        color: #111827;
                        text-decoration: none;
                        transition: all 0.3s;
                    }
                    .menu-wide .nav-item-link {
                        font-size: 35px;
                    }
                    .menu-highlight {
                        position: absolute;
                        top: 0;
                        left: 0;
                        width: 0;
                        height: 0;
                        opacity: 0;
                        border-top: 2px solid #d1d5db;
                        border-bottom: 2px solid #d1d5db;
                        border-radius: 0.75rem;
                        pointer-events: none;
                        z-index: 10;
                        transition: top 0.4s cubic-bezier(0.215, 0.61, 0.355, 1), left 0.4s, width 0.4s, height 0.4s, opacity 0.3s;
                    }
                    .menu-image {
                        position: relative;
                        height: 400px;
                        width: 100%;
                        overflow: hidden;
                    }
                    .menu-image img {
                        width: 100%;
                        height: 100%;
                        object-fit: cover;
                        transition: all 0.5s ease-in-out;
                    }
                    .menu-close {
                        display: flex;
                        align-items: center;
                        justify-content: center;
                        background: white;
                        border-radius: 8px;
                        margin: 2rem 2rem 0;
                        cursor: pointer;
                    }
                    .menu-image .menu-close {
                        position: absolute;
                        bottom: 2rem;
                        left: 50%;
                        width: 400px;
                        margin: 0;
                        transform: translateX(-50%);
                        z-index: 10;
                    }
                    .menu-close-icon {
                        display: inline-flex;
                        align-items: center;
                        justify-content: center;
                        width: 3rem;
                        height: 3rem;
                        font-size: 1.5rem;
                        font-weight: 300;
                        color: #6b7280;
                        transition: all 0.5s;
                    }
                    .menu-close.is-hovered .menu-close-icon {
                        transform: rotate(180deg);
                        color: #374151;
                    }
                    .btn-line-effect {
                        position: relative;
                        overflow: hidden;
                        width: 100%;
                        padding: 0.5rem 1rem;
                        background: white;
                        color: #1f2937;
                        font-size: 0.875rem;
                        font-weight: 600;
                        text-align: center;
                        border-radius: 4px;
                        cursor: pointer;
                        transition: 0.3s;
                    }
                    .menu-wide .btn-line-effect {
                        width: auto;
                    }
                    .btn-line-effect::before,
                    .btn-line-effect::after {
                        position: absolute;
                        content: "";
                        left: 0;
                        width: 100%;
                        height: 1px;
                        background: #374151;
                        opacity: 0;
                        transform: scaleX(0);
                        transition: 0.4s ease-in-out;
                    }
                    .btn-line-effect::before { top: 0; }
                    .btn-line-effect::after { bottom: 0; }
                    .btn-line-effect:hover {
                        letter-spacing: 2px;
                        color: #374151;
                        background: transparent;
                    }
                    .btn-line-effect:hover::before,
                    .btn-line-effect:hover::after {
                        opacity: 1;
                        transform: scaleX(1.2);
                    }
                "#}
            </style>
        </>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(model: NavModel, actions: Vec<NavAction>) -> NavModel {
        actions.into_iter().fold(model, NavModel::apply)
    }

    #[test]
    fn open_and_close_walks_every_state() {
        let mut model = NavModel::default();
        model = model.apply(NavAction::Toggle);
        assert_eq!(model.menu, MenuState::Opening);
        model = model.apply(NavAction::AnimationComplete);
        assert_eq!(model.menu, MenuState::Open);
        model = model.apply(NavAction::Toggle);
        assert_eq!(model.menu, MenuState::Closing);
        model = model.apply(NavAction::AnimationComplete);
        assert_eq!(model.menu, MenuState::Closed);
    }

    #[test]
    fn toggling_twice_leaves_no_highlight_behind() {
        let model = run(
            NavModel::default(),
            vec![
                NavAction::Toggle,
                NavAction::AnimationComplete,
                NavAction::Hover(3),
                NavAction::HoverClose(true),
                NavAction::Toggle,
                NavAction::AnimationComplete,
            ],
        );
        assert_eq!(model, NavModel::default());
        assert!((0..6).all(|i| model.hover.emphasis(i) == Emphasis::Default));
    }

    #[test]
    fn toggle_mid_animation_reverses_direction() {
        let model = run(NavModel::default(), vec![NavAction::Toggle, NavAction::Toggle]);
        assert_eq!(model.menu, MenuState::Closing);
        let model = model.apply(NavAction::Toggle);
        assert_eq!(model.menu, MenuState::Opening);
    }

    #[test]
    fn explicit_close_only_affects_a_showing_menu() {
        assert_eq!(NavModel::default().apply(NavAction::Close).menu, MenuState::Closed);
        let open = run(NavModel::default(), vec![NavAction::Toggle, NavAction::AnimationComplete]);
        assert_eq!(open.apply(NavAction::Close).menu, MenuState::Closing);
    }

    #[test]
    fn hover_is_ignored_while_closed_and_reset_on_leave() {
        assert_eq!(NavModel::default().apply(NavAction::Hover(1)).hover, Highlight::NONE);
        let open = run(NavModel::default(), vec![NavAction::Toggle, NavAction::Hover(1)]);
        assert_eq!(open.hover.index(), Some(1));
        assert_eq!(open.apply(NavAction::Leave).hover, Highlight::NONE);
    }

    #[test]
    fn completion_without_animation_is_a_no_op() {
        let model = NavModel::default().apply(NavAction::AnimationComplete);
        assert_eq!(model.menu, MenuState::Closed);
    }

    #[test]
    fn bar_switches_after_five_percent() {
        // 4000px document, 800px viewport: 3200px scrollable, 5% is 160px.
        assert!(!bar_flags(159.0, 4000.0, 800.0, None).scrolled);
        assert!(bar_flags(160.0, 4000.0, 800.0, None).scrolled);
        assert!(!bar_flags(0.0, 800.0, 800.0, None).scrolled);
    }

    #[test]
    fn bar_hides_when_footer_rises_into_view() {
        assert!(bar_flags(0.0, 4000.0, 800.0, Some(701.0)).visible);
        assert!(bar_flags(0.0, 4000.0, 800.0, Some(700.0)).visible);
        assert!(!bar_flags(0.0, 4000.0, 800.0, Some(699.0)).visible);
    }
}

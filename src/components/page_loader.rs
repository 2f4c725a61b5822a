use gloo_timers::callback::Timeout;
use log::{debug, info, warn};
use yew::prelude::*;

use crate::config::{self, LOADER_COUNT_MS, LOADER_FADE_MS, LOADER_HOLD_MS, PAGE_LOADING_CLASS};
use crate::motion::dom;
use crate::motion::easing::Easing;
use crate::motion::frame::FrameLoop;
use crate::motion::hooks::use_frame_slot;
use crate::motion::mapper::{Property, VisualProps};
use crate::motion::sink::{ElementSink, VisualSink};
use crate::motion::tween::Tween;
use crate::session::{take_flag, SessionFlag};

const COUNTER: Tween = Tween::new(LOADER_COUNT_MS, Easing::Power2Out);
const LOGO_IN: Tween = Tween::new(1000.0, Easing::Power3Out).delayed(100.0);
const PERCENT_IN: Tween = Tween::new(1000.0, Easing::Power3Out).delayed(600.0);
const FADE_OUT: Tween = Tween::new(LOADER_FADE_MS, Easing::Power3InOut);

/// Distance the percentage keeps from the viewport edges while it climbs.
const PERCENT_MARGIN_PX: f64 = 80.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoaderPhase {
    /// In-app navigation: the loader never shows.
    Skipped,
    Counting,
    Holding,
    Fading,
    Done,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoaderEvent {
    CountFinished,
    /// Page content may show. Emitted once per fresh load.
    Unblock,
}

/// The synthetic loading sequence: count to 100, hold, fade out.
#[derive(Clone, Copy, Debug)]
pub struct LoaderSequence {
    phase: LoaderPhase,
    elapsed_ms: f64,
}

impl LoaderSequence {
    pub fn new(in_app_navigation: bool) -> Self {
        let phase = if in_app_navigation {
            LoaderPhase::Skipped
        } else {
            LoaderPhase::Counting
        };
        Self {
            phase,
            elapsed_ms: 0.0,
        }
    }

    pub fn phase(&self) -> LoaderPhase {
        self.phase
    }

    pub fn blocks_content(&self) -> bool {
        matches!(
            self.phase,
            LoaderPhase::Counting | LoaderPhase::Holding | LoaderPhase::Fading
        )
    }

    pub fn advance(&mut self, dt_ms: f64) -> Option<LoaderEvent> {
        match self.phase {
            LoaderPhase::Counting => {
                self.elapsed_ms += dt_ms;
                if COUNTER.is_done(self.elapsed_ms) {
                    self.phase = LoaderPhase::Holding;
                    return Some(LoaderEvent::CountFinished);
                }
                None
            }
            LoaderPhase::Fading => {
                self.elapsed_ms += dt_ms;
                if FADE_OUT.is_done(self.elapsed_ms) {
                    self.phase = LoaderPhase::Done;
                    return Some(LoaderEvent::Unblock);
                }
                None
            }
            _ => None,
        }
    }

    /// Starts the fade after the hold. Only valid while holding.
    pub fn begin_fade(&mut self) -> bool {
        if self.phase != LoaderPhase::Holding {
            return false;
        }
        self.phase = LoaderPhase::Fading;
        self.elapsed_ms = 0.0;
        true
    }

    fn count_progress(&self) -> f64 {
        match self.phase {
            LoaderPhase::Counting => COUNTER.progress_at(self.elapsed_ms),
            LoaderPhase::Skipped => 0.0,
            _ => 1.0,
        }
    }

    pub fn counter(&self) -> u32 {
        (self.count_progress() * 100.0).floor() as u32
    }

    pub fn logo(&self) -> VisualProps {
        let t = match self.phase {
            LoaderPhase::Counting => LOGO_IN.progress_at(self.elapsed_ms),
            _ => 1.0,
        };
        VisualProps::default()
            .with(Property::Opacity, t)
            .with(Property::Y, 30.0 * (1.0 - t))
    }

    /// The percentage climbs from the bottom margin to the top margin.
    pub fn percentage(&self, viewport_height: f64) -> VisualProps {
        let opacity = match self.phase {
            LoaderPhase::Counting => PERCENT_IN.progress_at(self.elapsed_ms),
            _ => 1.0,
        };
        let travel = (viewport_height - 2.0 * PERCENT_MARGIN_PX).max(0.0);
        VisualProps::default()
            .with(Property::Opacity, opacity)
            .with(Property::Y, -travel * self.count_progress())
    }

    pub fn overlay_opacity(&self) -> f64 {
        match self.phase {
            LoaderPhase::Fading => 1.0 - FADE_OUT.progress_at(self.elapsed_ms),
            LoaderPhase::Done | LoaderPhase::Skipped => 0.0,
            _ => 1.0,
        }
    }
}

struct LoaderSinks {
    overlay: ElementSink,
    logo: ElementSink,
    percentage: ElementSink,
}

impl LoaderSinks {
    fn render(&self, sequence: &LoaderSequence) {
        self.overlay
            .apply(&VisualProps::default().with(Property::Opacity, sequence.overlay_opacity()));
        self.logo.apply(&sequence.logo());
        let viewport = dom::viewport_height().unwrap_or(0.0);
        self.percentage.apply(&sequence.percentage(viewport));
        self.percentage.set_text(&format!("{}%", sequence.counter()));
    }
}

#[function_component(PageLoader)]
pub fn page_loader() -> Html {
    let sequence = use_mut_ref(|| LoaderSequence::new(take_flag(&SessionFlag::client_navigation())));
    let showing = use_state(|| sequence.borrow().blocks_content());
    let frames = use_frame_slot();
    let hold = use_mut_ref(|| None::<Timeout>);
    let overlay_ref = use_node_ref();
    let logo_ref = use_node_ref();
    let percentage_ref = use_node_ref();

    {
        let sequence = sequence.clone();
        let showing = showing.clone();
        let sinks = LoaderSinks {
            overlay: ElementSink::new(overlay_ref.clone(), "loader"),
            logo: ElementSink::new(logo_ref.clone(), "loader logo"),
            percentage: ElementSink::new(percentage_ref.clone(), "loader percentage"),
        };
        let hold = hold.clone();
        use_effect_with_deps(
            move |_| {
                if sequence.borrow().phase() == LoaderPhase::Skipped {
                    info!("In-app navigation, skipping page loader");
                    if let Err(e) = dom::set_body_class(PAGE_LOADING_CLASS, false) {
                        debug!("{}", e);
                    }
                } else {
                    if let Err(e) = dom::set_body_class(PAGE_LOADING_CLASS, true) {
                        warn!("page content will not be hidden while loading: {}", e);
                    }
                    sinks.render(&sequence.borrow());
                    let hold_slot = hold.clone();
                    let started = FrameLoop::start(move |dt| {
                        let (event, snapshot) = {
                            let mut sequence = sequence.borrow_mut();
                            (sequence.advance(dt), *sequence)
                        };
                        sinks.render(&snapshot);
                        match event {
                            Some(LoaderEvent::CountFinished) => {
                                let sequence = sequence.clone();
                                *hold_slot.borrow_mut() = Some(Timeout::new(LOADER_HOLD_MS, move || {
                                    sequence.borrow_mut().begin_fade();
                                }));
                            }
                            Some(LoaderEvent::Unblock) => {
                                info!("Page loaded, revealing content");
                                if let Err(e) = dom::set_body_class(PAGE_LOADING_CLASS, false) {
                                    warn!("{}", e);
                                }
                                showing.set(false);
                            }
                            None => {}
                        }
                        snapshot.phase() != LoaderPhase::Done
                    });
                    *frames.borrow_mut() = started;
                }
                move || {
                    hold.borrow_mut().take();
                }
            },
            (),
        );
    }

    if !*showing {
        return html! {};
    }

    html! {
        <div ref={overlay_ref} class="page-loader">
            <style>
                {format!(r#"
                    body.{class} > *:not(.page-loader) {{
                        visibility: hidden;
                    }}
                    .page-loader {{
                        position: fixed;
                        inset: 0;
                        width: 100vw;
                        height: 100vh;
                        background-color: #1a1a1a;
                        display: flex;
                        align-items: center;
                        justify-content: center;
                        z-index: 9999;
                        overflow: hidden;
                        visibility: visible;
                    }}
                    .page-loader .logo-container {{
                        display: flex;
                        align-items: center;
                        justify-content: center;
                    }}
                    .page-loader .logo-image {{
                        max-width: 300px;
                        height: auto;
                        object-fit: contain;
                    }}
                    .page-loader .progress-percentage {{
                        position: fixed;
                        right: {margin}px;
                        bottom: {margin}px;
                        font-size: 24px;
                        font-weight: 300;
                        color: white;
                        font-family: 'Arial', sans-serif;
                        letter-spacing: 1px;
                        z-index: 10001;
                    }}
                    @media (max-width: 768px) {{
                        .page-loader .logo-image {{ max-width: 250px; }}
                        .page-loader .progress-percentage {{ right: 60px; font-size: 20px; }}
                    }}
                    @media (max-width: 480px) {{
                        .page-loader .logo-image {{ max-width: 200px; }}
                        .page-loader .progress-percentage {{ right: 40px; font-size: 18px; }}
                    }}
                "#, class = config::PAGE_LOADING_CLASS, margin = PERCENT_MARGIN_PX)}
            </style>
            <div ref={logo_ref} class="logo-container">
                <img src="/assets/navbar/loader.webp" alt="up&up group" width="500" height="120" class="logo-image" />
            </div>
            <div ref={percentage_ref} class="progress-percentage">{"0%"}</div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(sequence: &mut LoaderSequence, total_ms: f64, step_ms: f64) -> Vec<LoaderEvent> {
        let mut events = Vec::new();
        let mut t = 0.0;
        while t < total_ms {
            events.extend(sequence.advance(step_ms));
            t += step_ms;
        }
        events
    }

    #[test]
    fn counter_reaches_100_only_after_the_duration() {
        let mut sequence = LoaderSequence::new(false);
        assert_eq!(sequence.counter(), 0);

        sequence.advance(LOADER_COUNT_MS / 2.0);
        let midway = sequence.counter();
        assert!(midway > 50 && midway < 100, "power2.out leads linear, got {}", midway);

        sequence.advance(LOADER_COUNT_MS / 2.0 - 1.0);
        assert!(sequence.counter() < 100);
        assert_eq!(sequence.phase(), LoaderPhase::Counting);

        assert_eq!(sequence.advance(1.0), Some(LoaderEvent::CountFinished));
        assert_eq!(sequence.counter(), 100);
        assert_eq!(sequence.phase(), LoaderPhase::Holding);
    }

    #[test]
    fn counter_never_goes_backwards() {
        let mut sequence = LoaderSequence::new(false);
        let mut last = 0;
        for _ in 0..200 {
            sequence.advance(16.0);
            assert!(sequence.counter() >= last);
            last = sequence.counter();
        }
    }

    #[test]
    fn fresh_load_unblocks_exactly_once() {
        let mut sequence = LoaderSequence::new(false);
        assert!(sequence.blocks_content());

        let events = run(&mut sequence, LOADER_COUNT_MS + 16.0, 16.0);
        assert_eq!(events, vec![LoaderEvent::CountFinished]);

        // Holding ignores frames until the hold timer fires.
        assert!(run(&mut sequence, 1000.0, 16.0).is_empty());
        assert!(sequence.blocks_content());

        assert!(sequence.begin_fade());
        assert!(!sequence.begin_fade());
        let events = run(&mut sequence, LOADER_FADE_MS * 3.0, 16.0);
        assert_eq!(events, vec![LoaderEvent::Unblock]);
        assert_eq!(sequence.phase(), LoaderPhase::Done);
        assert!(!sequence.blocks_content());
        assert_eq!(sequence.overlay_opacity(), 0.0);
    }

    #[test]
    fn in_app_navigation_skips_the_loader() {
        let mut sequence = LoaderSequence::new(true);
        assert_eq!(sequence.phase(), LoaderPhase::Skipped);
        assert!(!sequence.blocks_content());
        assert!(run(&mut sequence, 10_000.0, 16.0).is_empty());
        assert!(!sequence.begin_fade());
    }

    #[test]
    fn percentage_climbs_to_the_top_margin() {
        let mut sequence = LoaderSequence::new(false);
        assert_eq!(sequence.percentage(800.0).y, 0.0);
        sequence.advance(LOADER_COUNT_MS);
        assert_eq!(sequence.percentage(800.0).y, -640.0);
        assert_eq!(sequence.logo().opacity, 1.0);
    }
}

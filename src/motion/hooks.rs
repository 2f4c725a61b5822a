use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use yew::prelude::*;
use yew_hooks::use_window_size;

use crate::config;

use super::frame::{FrameHost, FrameLoop, WindowFrames};
use super::listeners::{ListenerGuard, ListenerHost, WindowHost};
use super::progress::{ScrollSpan, TriggerPoint};
use super::tracker::{self, ElementSource, ScrollSource};
use super::trigger::{Entrance, EntranceCommand};
use super::tween::{Direction, Playhead};

/// Calls `on_progress` with the scroll progress of `node` over `span` for as
/// long as the component is mounted.
#[hook]
pub fn use_scroll_progress<F>(node: NodeRef, span: ScrollSpan, on_progress: F)
where
    F: Fn(f64) + 'static,
{
    use_effect_with_deps(
        move |_| {
            let guard = WindowHost::current()
                .map(|host| tracker::track(host, ElementSource::new(node), span, on_progress));
            move || drop(guard)
        },
        (),
    );
}

struct EntranceRun<H: FrameHost> {
    entrance: Entrance,
    playhead: Playhead,
    frames: Option<FrameLoop<H>>,
}

/// One-shot entrance for `node`: when its `trigger` point is reached the
/// playhead runs forward over `length_ms`, calling `on_frame` with the
/// playhead position each frame. A reversible entrance runs backwards again
/// when scrolled back above the trigger. `on_frame(0.0)` is applied on mount
/// so the element starts in its `from` state.
#[hook]
pub fn use_entrance<F>(node: NodeRef, trigger: TriggerPoint, entrance: Entrance, length_ms: f64, on_frame: F)
where
    F: Fn(f64) + 'static,
{
    use_effect_with_deps(
        move |_| {
            let attached = WindowHost::current().map(|host| {
                EntranceScene {
                    trigger,
                    entrance,
                    length_ms,
                }
                .attach(host, ElementSource::new(node), WindowFrames::current, on_frame)
            });
            move || drop(attached)
        },
        (),
    );
}

/// Static description of an entrance, attached once per mount.
pub struct EntranceScene {
    pub trigger: TriggerPoint,
    pub entrance: Entrance,
    pub length_ms: f64,
}

impl EntranceScene {
    /// Applies `on_frame(0.0)`, then plays on `frames` whenever `source`
    /// crosses the trigger. `frames` builds the host for each new loop.
    pub fn attach<L, S, H, N, F>(self, listeners: L, source: S, frames: N, on_frame: F) -> AttachedEntrance<L, H>
    where
        L: ListenerHost,
        S: ScrollSource + 'static,
        H: FrameHost,
        N: Fn() -> Option<H> + 'static,
        F: Fn(f64) + 'static,
    {
        let on_frame: Rc<dyn Fn(f64)> = Rc::new(on_frame);
        on_frame(0.0);

        let run = Rc::new(RefCell::new(EntranceRun {
            entrance: self.entrance,
            playhead: Playhead::new(self.length_ms),
            frames: None,
        }));

        let guard = {
            let run = run.clone();
            tracker::track(listeners, source, ScrollSpan::at(self.trigger), move |p| {
                play(&run, &frames, &on_frame, p >= 1.0)
            })
        };
        AttachedEntrance { _listeners: guard, run }
    }
}

/// Live entrance. Dropping it detaches the listeners and halts playback.
pub struct AttachedEntrance<L: ListenerHost, H: FrameHost> {
    _listeners: ListenerGuard<L>,
    run: Rc<RefCell<EntranceRun<H>>>,
}

impl<L: ListenerHost, H: FrameHost> Drop for AttachedEntrance<L, H> {
    fn drop(&mut self) {
        self.run.borrow_mut().frames.take();
    }
}

fn play<H, N>(run: &Rc<RefCell<EntranceRun<H>>>, frames: &N, on_frame: &Rc<dyn Fn(f64)>, visible: bool)
where
    H: FrameHost,
    N: Fn() -> Option<H>,
{
    let mut state = run.borrow_mut();
    let direction = match state.entrance.on_visibility(visible) {
        Some(EntranceCommand::Play) => Direction::Forward,
        Some(EntranceCommand::Reverse) => Direction::Backward,
        None => return,
    };
    state.playhead.play(direction);
    if state.frames.as_ref().map_or(false, FrameLoop::is_running) {
        return;
    }

    let Some(host) = frames() else {
        return;
    };
    let started = {
        let run = run.clone();
        let on_frame = on_frame.clone();
        FrameLoop::start_on(host, move |dt| {
            let (position, done) = {
                let mut state = run.borrow_mut();
                let done = state.playhead.advance(dt);
                if done {
                    state.entrance.on_complete();
                    debug!("entrance finished: {:?}", state.entrance.state());
                }
                (state.playhead.position_ms(), done)
            };
            on_frame(position);
            !done
        })
    };
    state.frames = started;
}

/// A slot for the component's current frame loop, cancelled on unmount.
#[hook]
pub fn use_frame_slot() -> Rc<RefCell<Option<FrameLoop>>> {
    let slot = use_mut_ref(|| None::<FrameLoop>);
    {
        let slot = slot.clone();
        use_effect_with_deps(
            move |_| {
                move || {
                    slot.borrow_mut().take();
                }
            },
            (),
        );
    }
    slot
}

/// Compact below the desktop breakpoint, wide at and above it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    Compact,
    Wide,
}

impl Layout {
    pub fn from_width(width: f64) -> Self {
        if width < config::DESKTOP_BREAKPOINT_PX {
            Layout::Compact
        } else {
            Layout::Wide
        }
    }

    pub fn is_wide(&self) -> bool {
        matches!(self, Layout::Wide)
    }
}

/// Layout for the current viewport width, resampled on resize.
#[hook]
pub fn use_layout() -> Layout {
    let (width, _) = use_window_size();
    Layout::from_width(width)
}

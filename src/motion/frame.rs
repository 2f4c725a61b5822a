use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use gloo_timers::callback::Timeout;
use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Window;

use super::dom::{self, DomError};

pub type FrameCallback = Rc<dyn Fn(f64)>;

/// Something that can run a callback on the next animation frame.
pub trait FrameHost: 'static {
    /// Schedules `callback` with the frame timestamp and returns its id.
    fn request(&self, callback: FrameCallback) -> Result<i32, DomError>;
    fn cancel(&self, id: i32);
}

/// `requestAnimationFrame` on the browser window. One JS closure per host is
/// reused for every frame of a loop.
pub struct WindowFrames {
    window: Window,
    next: Rc<RefCell<Option<FrameCallback>>>,
    closure: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

impl WindowFrames {
    pub fn current() -> Option<Self> {
        dom::window().ok().map(|window| Self {
            window,
            next: Rc::new(RefCell::new(None)),
            closure: RefCell::new(None),
        })
    }
}

impl FrameHost for WindowFrames {
    fn request(&self, callback: FrameCallback) -> Result<i32, DomError> {
        *self.next.borrow_mut() = Some(callback);
        let mut closure = self.closure.borrow_mut();
        let closure = closure.get_or_insert_with(|| {
            let next = self.next.clone();
            Closure::new(move |now: f64| {
                let callback = next.borrow_mut().take();
                if let Some(callback) = callback {
                    callback(now);
                }
            })
        });
        self.window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .map_err(|e| DomError::js("requestAnimationFrame", e))
    }

    fn cancel(&self, id: i32) {
        self.next.borrow_mut().take();
        dom::log_failure(
            self.window
                .cancel_animation_frame(id)
                .map_err(|e| DomError::js("cancelAnimationFrame", e)),
        );
    }
}

impl Drop for WindowFrames {
    fn drop(&mut self) {
        // The host can be dropped from inside its own frame callback, so the
        // closure is freed on the next tick.
        if let Some(closure) = self.closure.get_mut().take() {
            Timeout::new(0, move || drop(closure)).forget();
        }
    }
}

struct LoopState<H: FrameHost> {
    host: H,
    pending: Cell<Option<i32>>,
    stopped: Cell<bool>,
    last: Cell<Option<f64>>,
    on_frame: RefCell<Box<dyn FnMut(f64) -> bool>>,
}

/// A per-frame chain. `on_frame` receives the milliseconds since the
/// previous frame (0 on the first) and returns whether to keep going.
/// Dropping the loop cancels the pending frame and frees the chain.
pub struct FrameLoop<H: FrameHost = WindowFrames> {
    state: Rc<LoopState<H>>,
}

impl FrameLoop {
    pub fn start<F>(on_frame: F) -> Option<FrameLoop>
    where
        F: FnMut(f64) -> bool + 'static,
    {
        FrameLoop::start_on(WindowFrames::current()?, on_frame)
    }

    pub fn run_for<F, C>(total_ms: f64, on_progress: F, on_complete: C) -> Option<FrameLoop>
    where
        F: FnMut(f64) + 'static,
        C: FnOnce() + 'static,
    {
        FrameLoop::run_for_on(WindowFrames::current()?, total_ms, on_progress, on_complete)
    }
}

impl<H: FrameHost> FrameLoop<H> {
    pub fn start_on<F>(host: H, on_frame: F) -> Option<Self>
    where
        F: FnMut(f64) -> bool + 'static,
    {
        let state = Rc::new(LoopState {
            host,
            pending: Cell::new(None),
            stopped: Cell::new(false),
            last: Cell::new(None),
            on_frame: RefCell::new(Box::new(on_frame)),
        });
        match schedule(&state) {
            Ok(()) => Some(FrameLoop { state }),
            Err(e) => {
                warn!("{}", e);
                None
            }
        }
    }

    /// Runs `on_progress(elapsed_ms)` every frame until `total_ms` has
    /// elapsed, then calls it one last time with `total_ms` and fires
    /// `on_complete`.
    pub fn run_for_on<F, C>(host: H, total_ms: f64, mut on_progress: F, on_complete: C) -> Option<Self>
    where
        F: FnMut(f64) + 'static,
        C: FnOnce() + 'static,
    {
        let mut elapsed = 0.0;
        let mut on_complete = Some(on_complete);
        FrameLoop::start_on(host, move |dt| {
            elapsed += dt;
            if elapsed >= total_ms {
                on_progress(total_ms);
                if let Some(done) = on_complete.take() {
                    done();
                }
                return false;
            }
            on_progress(elapsed);
            true
        })
    }

    pub fn is_running(&self) -> bool {
        self.state.pending.get().is_some()
    }
}

fn schedule<H: FrameHost>(state: &Rc<LoopState<H>>) -> Result<(), DomError> {
    let weak: Weak<LoopState<H>> = Rc::downgrade(state);
    let id = state.host.request(Rc::new(move |now| {
        if let Some(state) = weak.upgrade() {
            tick(&state, now);
        }
    }))?;
    state.pending.set(Some(id));
    Ok(())
}

fn tick<H: FrameHost>(state: &Rc<LoopState<H>>, now: f64) {
    state.pending.set(None);
    let dt = state.last.get().map_or(0.0, |prev| now - prev);
    state.last.set(Some(now));
    let more = (*state.on_frame.borrow_mut())(dt);
    if more && !state.stopped.get() {
        if let Err(e) = schedule(state) {
            warn!("{}", e);
        }
    }
}

impl<H: FrameHost> Drop for FrameLoop<H> {
    fn drop(&mut self) {
        self.state.stopped.set(true);
        if let Some(id) = self.state.pending.take() {
            self.state.host.cancel(id);
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Frames run only when stepped; counts what is still scheduled.
    #[derive(Clone, Default)]
    pub struct FakeFrames {
        queue: Rc<RefCell<Vec<(i32, FrameCallback)>>>,
        next_id: Rc<Cell<i32>>,
        now: Rc<Cell<f64>>,
        pub refuse: Rc<Cell<bool>>,
    }

    impl FakeFrames {
        pub fn pending(&self) -> usize {
            self.queue.borrow().len()
        }

        /// Advances the clock by `dt_ms` and runs every frame scheduled so far.
        pub fn step(&self, dt_ms: f64) {
            self.now.set(self.now.get() + dt_ms);
            let due: Vec<FrameCallback> = self.queue.borrow_mut().drain(..).map(|(_, cb)| cb).collect();
            for cb in due {
                cb(self.now.get());
            }
        }

        /// Steps until nothing is scheduled, at most `limit` times.
        pub fn settle(&self, dt_ms: f64, limit: usize) {
            for _ in 0..limit {
                if self.pending() == 0 {
                    return;
                }
                self.step(dt_ms);
            }
        }
    }

    impl FrameHost for FakeFrames {
        fn request(&self, callback: FrameCallback) -> Result<i32, DomError> {
            if self.refuse.get() {
                return Err(DomError::NoWindow);
            }
            let id = self.next_id.get();
            self.next_id.set(id + 1);
            self.queue.borrow_mut().push((id, callback));
            Ok(id)
        }

        fn cancel(&self, id: i32) {
            self.queue.borrow_mut().retain(|(queued, _)| *queued != id);
        }
    }
}

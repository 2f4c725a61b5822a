//! Window event listeners held for exactly as long as a guard lives.

use std::rc::Rc;

use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Window;

use super::dom::{self, DomError};

/// Something that events can be subscribed on.
pub trait ListenerHost {
    type Handle;

    fn listen(&self, event: &'static str, callback: Rc<dyn Fn()>) -> Result<Self::Handle, DomError>;
    fn unlisten(&self, handle: Self::Handle);
}

/// Owns the listeners it added and removes all of them when dropped.
pub struct ListenerGuard<H: ListenerHost> {
    host: H,
    handles: Vec<H::Handle>,
}

impl<H: ListenerHost> ListenerGuard<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            handles: Vec::new(),
        }
    }

    pub fn listen(&mut self, event: &'static str, callback: Rc<dyn Fn()>) -> &mut Self {
        match self.host.listen(event, callback) {
            Ok(handle) => self.handles.push(handle),
            Err(e) => warn!("could not listen for {}: {}", event, e),
        }
        self
    }
}

impl<H: ListenerHost> Drop for ListenerGuard<H> {
    fn drop(&mut self) {
        for handle in self.handles.drain(..) {
            self.host.unlisten(handle);
        }
    }
}

pub struct WindowHost {
    window: Window,
}

impl WindowHost {
    pub fn current() -> Option<Self> {
        dom::window().ok().map(|window| Self { window })
    }
}

pub struct WindowListener {
    event: &'static str,
    closure: Closure<dyn Fn()>,
}

impl ListenerHost for WindowHost {
    type Handle = WindowListener;

    fn listen(&self, event: &'static str, callback: Rc<dyn Fn()>) -> Result<WindowListener, DomError> {
        let closure = Closure::<dyn Fn()>::new(move || callback());
        self.window
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(|e| DomError::js("addEventListener", e))?;
        Ok(WindowListener { event, closure })
    }

    fn unlisten(&self, handle: WindowListener) {
        if let Err(e) = self
            .window
            .remove_event_listener_with_callback(handle.event, handle.closure.as_ref().unchecked_ref())
        {
            warn!("{}", DomError::js("removeEventListener", e));
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::{Cell, RefCell};

    use super::*;

    /// In-memory host that counts live listeners and dispatches by name.
    #[derive(Clone, Default)]
    pub struct FakeHost {
        listeners: Rc<RefCell<Vec<(usize, &'static str, Rc<dyn Fn()>)>>>,
        next_id: Rc<Cell<usize>>,
        pub refuse: Rc<Cell<bool>>,
    }

    impl FakeHost {
        pub fn count(&self) -> usize {
            self.listeners.borrow().len()
        }

        pub fn count_for(&self, event: &str) -> usize {
            self.listeners.borrow().iter().filter(|(_, e, _)| *e == event).count()
        }

        pub fn dispatch(&self, event: &str) {
            let callbacks: Vec<Rc<dyn Fn()>> = self
                .listeners
                .borrow()
                .iter()
                .filter(|(_, e, _)| *e == event)
                .map(|(_, _, cb)| cb.clone())
                .collect();
            for cb in callbacks {
                cb();
            }
        }
    }

    impl ListenerHost for FakeHost {
        type Handle = usize;

        fn listen(&self, event: &'static str, callback: Rc<dyn Fn()>) -> Result<usize, DomError> {
            if self.refuse.get() {
                return Err(DomError::NoWindow);
            }
            let id = self.next_id.get();
            self.next_id.set(id + 1);
            self.listeners.borrow_mut().push((id, event, callback));
            Ok(id)
        }

        fn unlisten(&self, handle: usize) {
            self.listeners.borrow_mut().retain(|(id, _, _)| *id != handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::testing::FakeHost;
    use super::*;

    #[test]
    fn dropping_the_guard_removes_every_listener() {
        let host = FakeHost::default();
        let hits = Rc::new(Cell::new(0));
        {
            let mut guard = ListenerGuard::new(host.clone());
            let h = hits.clone();
            guard.listen("scroll", Rc::new(move || h.set(h.get() + 1)));
            let h = hits.clone();
            guard.listen("resize", Rc::new(move || h.set(h.get() + 1)));
            assert_eq!(host.count(), 2);

            host.dispatch("scroll");
            assert_eq!(hits.get(), 1);
        }
        assert_eq!(host.count(), 0);
        host.dispatch("scroll");
        host.dispatch("resize");
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn failed_subscription_is_not_tracked() {
        let host = FakeHost::default();
        host.refuse.set(true);
        let mut guard = ListenerGuard::new(host.clone());
        guard.listen("scroll", Rc::new(|| ()));
        host.refuse.set(false);
        assert_eq!(host.count(), 0);
        drop(guard);
        assert_eq!(host.count(), 0);
    }
}

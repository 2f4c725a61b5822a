use std::cell::RefCell;
use std::rc::Rc;

use yew::NodeRef;

use super::dom;
use super::listeners::{ListenerGuard, ListenerHost};
use super::progress::{Geometry, ScrollProgress, ScrollSpan};

/// Read-only view of the page scroll position and one tracked element.
pub trait ScrollSource {
    fn scroll_y(&self) -> f64;
    /// Current layout of the tracked element, `None` if it is not mounted.
    fn measure(&self) -> Option<Geometry>;
}

/// Tracks a rendered element against the browser window.
pub struct ElementSource {
    node: NodeRef,
}

impl ElementSource {
    pub fn new(node: NodeRef) -> Self {
        Self { node }
    }
}

impl ScrollSource for ElementSource {
    fn scroll_y(&self) -> f64 {
        dom::scroll_y()
    }

    fn measure(&self) -> Option<Geometry> {
        let element = dom::element(&self.node, "tracked element").ok()?;
        let rect = element.get_bounding_client_rect();
        Some(Geometry {
            element_top: rect.top() + dom::scroll_y(),
            element_height: rect.height(),
            viewport_height: dom::viewport_height()?,
        })
    }
}

/// Subscribes `on_progress` to scroll, resize and load on `host`.
///
/// Geometry is measured once up front and again on every resize and on page
/// load; scroll events reuse the cached geometry. While the element is unmeasured each
/// event retries the measurement and otherwise does nothing. The returned
/// guard detaches every listener when dropped.
pub fn track<H, S, F>(host: H, source: S, span: ScrollSpan, on_progress: F) -> ListenerGuard<H>
where
    H: ListenerHost,
    S: ScrollSource + 'static,
    F: Fn(f64) + 'static,
{
    let source = Rc::new(source);
    let state = Rc::new(RefCell::new(ScrollProgress::new(span)));
    let on_progress = Rc::new(on_progress);

    let refresh = {
        let source = source.clone();
        let state = state.clone();
        let on_progress = on_progress.clone();
        move |remeasure: bool| {
            let ratio = {
                let mut state = state.borrow_mut();
                if remeasure || !state.is_measured() {
                    state.remeasure(source.measure());
                }
                state.update(source.scroll_y())
            };
            if let Some(ratio) = ratio {
                on_progress(ratio);
            }
        }
    };
    let refresh = Rc::new(refresh);

    let mut guard = ListenerGuard::new(host);
    {
        let refresh = refresh.clone();
        guard.listen("scroll", Rc::new(move || refresh(false)));
    }
    {
        let refresh = refresh.clone();
        guard.listen("resize", Rc::new(move || refresh(true)));
    }
    {
        let refresh = refresh.clone();
        guard.listen("load", Rc::new(move || refresh(true)));
    }

    refresh(true);
    guard
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::Cell;

    use super::*;

    /// Scroll position and geometry set directly by the test.
    #[derive(Clone, Default)]
    pub struct FakeSource {
        pub scroll: Rc<Cell<f64>>,
        pub geometry: Rc<Cell<Option<Geometry>>>,
        pub measurements: Rc<Cell<usize>>,
    }

    impl ScrollSource for FakeSource {
        fn scroll_y(&self) -> f64 {
            self.scroll.get()
        }

        fn measure(&self) -> Option<Geometry> {
            self.measurements.set(self.measurements.get() + 1);
            self.geometry.get()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::FakeSource;
    use super::*;
    use crate::motion::listeners::testing::FakeHost;
    use crate::motion::progress::TriggerPoint;

    const SPAN: ScrollSpan = ScrollSpan::new(TriggerPoint::TOP_TOP, TriggerPoint::BOTTOM_BOTTOM);

    fn mounted(viewport_height: f64) -> FakeSource {
        let source = FakeSource::default();
        source.geometry.set(Some(Geometry {
            element_top: 0.0,
            element_height: 2400.0,
            viewport_height,
        }));
        source
    }

    fn recorder() -> (Rc<RefCell<Vec<f64>>>, impl Fn(f64)) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        (seen, move |p| sink.borrow_mut().push(p))
    }

    #[test]
    fn reports_progress_on_attach_and_scroll() {
        let host = FakeHost::default();
        let source = mounted(800.0);
        let (seen, on_progress) = recorder();
        let _guard = track(host.clone(), source.clone(), SPAN, on_progress);

        source.scroll.set(800.0);
        host.dispatch("scroll");
        assert_eq!(*seen.borrow(), vec![0.0, 0.5]);
    }

    #[test]
    fn scroll_reuses_geometry_and_resize_remeasures() {
        let host = FakeHost::default();
        let source = mounted(800.0);
        let (seen, on_progress) = recorder();
        let _guard = track(host.clone(), source.clone(), SPAN, on_progress);
        assert_eq!(source.measurements.get(), 1);

        source.scroll.set(800.0);
        host.dispatch("scroll");
        assert_eq!(source.measurements.get(), 1);

        // Taller viewport shortens the travel: 2400 - 1200.
        source.geometry.set(Some(Geometry {
            element_top: 0.0,
            element_height: 2400.0,
            viewport_height: 1200.0,
        }));
        host.dispatch("resize");
        assert_eq!(source.measurements.get(), 2);
        assert_eq!(seen.borrow().last().copied(), Some(800.0 / 1200.0));
    }

    #[test]
    fn unmounted_element_is_a_silent_no_op() {
        let host = FakeHost::default();
        let source = FakeSource::default();
        let (seen, on_progress) = recorder();
        let _guard = track(host.clone(), source.clone(), SPAN, on_progress);

        host.dispatch("scroll");
        assert!(seen.borrow().is_empty());

        source.geometry.set(mounted(800.0).geometry.get());
        source.scroll.set(2400.0);
        host.dispatch("scroll");
        assert_eq!(*seen.borrow(), vec![1.0]);
    }

    #[test]
    fn dropping_the_tracker_detaches_all_listeners() {
        let host = FakeHost::default();
        let source = mounted(800.0);
        let (seen, on_progress) = recorder();
        let guard = track(host.clone(), source.clone(), SPAN, on_progress);
        assert_eq!(host.count_for("scroll"), 1);
        assert_eq!(host.count_for("resize"), 1);
        assert_eq!(host.count_for("load"), 1);

        drop(guard);
        assert_eq!(host.count(), 0);

        source.scroll.set(800.0);
        host.dispatch("scroll");
        host.dispatch("resize");
        host.dispatch("load");
        assert_eq!(*seen.borrow(), vec![0.0]);
    }

    #[test]
    fn page_load_remeasures_shifted_layout() {
        let host = FakeHost::default();
        let source = mounted(800.0);
        let (seen, on_progress) = recorder();
        let _guard = track(host.clone(), source.clone(), SPAN, on_progress);

        // Images above the element finished loading and pushed it down.
        source.geometry.set(Some(Geometry {
            element_top: 400.0,
            element_height: 2400.0,
            viewport_height: 800.0,
        }));
        source.scroll.set(1200.0);
        host.dispatch("load");
        assert_eq!(source.measurements.get(), 2);
        assert_eq!(seen.borrow().last().copied(), Some(0.5));
    }
}

//! Scroll progress of a tracked element between two trigger points.
//!
//! A trigger point pairs an edge of the element with an edge of the
//! viewport, e.g. "top of element meets top of viewport". The scroll offset
//! at which that happens is
//!
//! ```text
//! element_top + element_edge(element_height) - viewport_edge(viewport_height)
//! ```
//!
//! and progress is the position of the current scroll offset between the
//! start and end offsets, clamped to [0, 1].

/// A position along an element or the viewport, measured from its top.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Edge {
    Top,
    Center,
    Bottom,
    /// Percentage of the extent, `Percent(80.0)` is 80 % down.
    Percent(f64),
}

impl Edge {
    pub fn offset(self, extent: f64) -> f64 {
        match self {
            Edge::Top => 0.0,
            Edge::Center => extent / 2.0,
            Edge::Bottom => extent,
            Edge::Percent(p) => extent * p / 100.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerPoint {
    pub element: Edge,
    pub viewport: Edge,
}

impl TriggerPoint {
    pub const TOP_TOP: TriggerPoint = TriggerPoint::new(Edge::Top, Edge::Top);
    pub const TOP_BOTTOM: TriggerPoint = TriggerPoint::new(Edge::Top, Edge::Bottom);
    pub const BOTTOM_TOP: TriggerPoint = TriggerPoint::new(Edge::Bottom, Edge::Top);
    pub const BOTTOM_BOTTOM: TriggerPoint = TriggerPoint::new(Edge::Bottom, Edge::Bottom);

    pub const fn new(element: Edge, viewport: Edge) -> Self {
        Self { element, viewport }
    }

    /// Element top crossing `percent` % of the viewport height.
    pub const fn top_at(percent: f64) -> Self {
        Self::new(Edge::Top, Edge::Percent(percent))
    }

    /// Document scroll offset at which this point is reached.
    pub fn scroll_offset(&self, geometry: &Geometry) -> f64 {
        geometry.element_top + self.element.offset(geometry.element_height)
            - self.viewport.offset(geometry.viewport_height)
    }
}

/// Layout facts a progress computation needs. Cached by the tracker and
/// remeasured on resize.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    /// Element top relative to the document, in px.
    pub element_top: f64,
    pub element_height: f64,
    pub viewport_height: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollSpan {
    pub start: TriggerPoint,
    pub end: TriggerPoint,
}

impl ScrollSpan {
    pub const fn new(start: TriggerPoint, end: TriggerPoint) -> Self {
        Self { start, end }
    }

    /// A zero-length span: 0 before the point, 1 once it is reached.
    pub const fn at(point: TriggerPoint) -> Self {
        Self::new(point, point)
    }

    pub fn progress(&self, scroll_y: f64, geometry: &Geometry) -> f64 {
        let start = self.start.scroll_offset(geometry);
        let end = self.end.scroll_offset(geometry);
        let length = end - start;
        if length.abs() < f64::EPSILON {
            return if scroll_y >= start { 1.0 } else { 0.0 };
        }
        ((scroll_y - start) / length).clamp(0.0, 1.0)
    }
}

/// Progress state owned by one tracked component.
#[derive(Clone, Debug)]
pub struct ScrollProgress {
    span: ScrollSpan,
    geometry: Option<Geometry>,
}

impl ScrollProgress {
    pub fn new(span: ScrollSpan) -> Self {
        Self {
            span,
            geometry: None,
        }
    }

    pub fn is_measured(&self) -> bool {
        self.geometry.is_some()
    }

    /// Replaces the cached geometry. `None` means the element is not mounted.
    pub fn remeasure(&mut self, geometry: Option<Geometry>) {
        self.geometry = geometry.filter(|g| g.viewport_height > 0.0);
    }

    /// Recomputes the ratio for `scroll_y`. Returns `None` while unmeasured.
    pub fn update(&mut self, scroll_y: f64) -> Option<f64> {
        let geometry = self.geometry?;
        Some(self.span.progress(scroll_y, &geometry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const FULL_TRAVEL: ScrollSpan = ScrollSpan::new(TriggerPoint::TOP_TOP, TriggerPoint::BOTTOM_BOTTOM);

    fn geometry(element_top: f64, element_height: f64, viewport_height: f64) -> Geometry {
        Geometry {
            element_top,
            element_height,
            viewport_height,
        }
    }

    #[test]
    fn tall_section_halfway_through() {
        let g = geometry(0.0, 2400.0, 800.0);
        assert_eq!(FULL_TRAVEL.progress(800.0, &g), 0.5);
    }

    #[test]
    fn progress_is_clamped_outside_the_span() {
        let g = geometry(1000.0, 2400.0, 800.0);
        assert_eq!(FULL_TRAVEL.progress(0.0, &g), 0.0);
        assert_eq!(FULL_TRAVEL.progress(99_999.0, &g), 1.0);
    }

    #[test]
    fn percent_edges_resolve_against_their_own_extent() {
        let g = geometry(2000.0, 500.0, 1000.0);
        // top of element at 80 % of viewport: 2000 - 800
        assert_eq!(TriggerPoint::top_at(80.0).scroll_offset(&g), 1200.0);
    }

    #[test]
    fn zero_length_span_steps_at_the_point() {
        let span = ScrollSpan::at(TriggerPoint::top_at(80.0));
        let g = geometry(2000.0, 500.0, 1000.0);
        assert_eq!(span.progress(1199.0, &g), 0.0);
        assert_eq!(span.progress(1200.0, &g), 1.0);
    }

    #[test]
    fn unmeasured_progress_does_not_update() {
        let mut progress = ScrollProgress::new(FULL_TRAVEL);
        assert_eq!(progress.update(500.0), None);

        progress.remeasure(Some(geometry(0.0, 2400.0, 0.0)));
        assert!(!progress.is_measured());

        progress.remeasure(Some(geometry(0.0, 2400.0, 800.0)));
        assert_eq!(progress.update(800.0), Some(0.5));
    }

    proptest! {
        #[test]
        fn endpoints_are_exact_for_any_viewport(
            top in 0.0f64..10_000.0,
            height in 1.0f64..10_000.0,
            viewport in 1.0f64..4_000.0,
        ) {
            let g = geometry(top, height, viewport);
            let span = ScrollSpan::new(TriggerPoint::TOP_BOTTOM, TriggerPoint::BOTTOM_TOP);
            let start = span.start.scroll_offset(&g);
            let end = span.end.scroll_offset(&g);
            prop_assert_eq!(span.progress(start, &g), 0.0);
            prop_assert_eq!(span.progress(end, &g), 1.0);
        }

        #[test]
        fn progress_stays_in_unit_interval(
            scroll in -5_000.0f64..50_000.0,
            height in 1.0f64..10_000.0,
            viewport in 1.0f64..4_000.0,
        ) {
            let p = FULL_TRAVEL.progress(scroll, &geometry(300.0, height, viewport));
            prop_assert!((0.0..=1.0).contains(&p));
        }
    }
}

use super::easing::Easing;

/// Visual properties a range can drive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Property {
    /// Horizontal translation in px.
    X,
    /// Vertical translation in px.
    Y,
    /// Vertical translation as a percentage of the element's own height.
    YPercent,
    Scale,
    Opacity,
}

/// Computed visual state for one element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisualProps {
    pub x: f64,
    pub y: f64,
    pub y_percent: f64,
    pub scale: f64,
    pub opacity: f64,
}

impl Default for VisualProps {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            y_percent: 0.0,
            scale: 1.0,
            opacity: 1.0,
        }
    }
}

impl VisualProps {
    pub fn set(&mut self, property: Property, value: f64) {
        match property {
            Property::X => self.x = value,
            Property::Y => self.y = value,
            Property::YPercent => self.y_percent = value,
            Property::Scale => self.scale = value,
            Property::Opacity => self.opacity = value,
        }
    }

    pub fn with(mut self, property: Property, value: f64) -> Self {
        self.set(property, value);
        self
    }

    /// CSS `transform` value for these props.
    pub fn transform_css(&self) -> String {
        format!(
            "translate(0%, {}%) translate3d({}px, {}px, 0px) scale({})",
            self.y_percent, self.x, self.y, self.scale
        )
    }
}

/// Start and end values of one property over a progress interval.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformRange {
    pub property: Property,
    pub start: f64,
    pub end: f64,
    pub easing: Easing,
}

impl TransformRange {
    pub const fn linear(property: Property, start: f64, end: f64) -> Self {
        Self::eased(property, start, end, Easing::Linear)
    }

    pub const fn eased(property: Property, start: f64, end: f64, easing: Easing) -> Self {
        Self {
            property,
            start,
            end,
            easing,
        }
    }

    /// Interpolated value at `progress`, never outside [start, end].
    pub fn value_at(&self, progress: f64) -> f64 {
        let t = self.easing.apply(progress);
        if t >= 1.0 {
            return self.end;
        }
        let value = self.start + (self.end - self.start) * t;
        let (lo, hi) = if self.start <= self.end {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        };
        value.clamp(lo, hi)
    }
}

/// Applies every range at `progress` on top of `base`.
pub fn map_props(base: VisualProps, ranges: &[TransformRange], progress: f64) -> VisualProps {
    ranges.iter().fold(base, |props, range| {
        props.with(range.property, range.value_at(progress))
    })
}

/// Discrete text that changes at progress thresholds instead of interpolating.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextSwap {
    initial: &'static str,
    /// `(threshold, text)` in ascending threshold order; `text` shows once
    /// progress is strictly past `threshold`.
    steps: &'static [(f64, &'static str)],
}

impl TextSwap {
    pub const fn new(initial: &'static str, steps: &'static [(f64, &'static str)]) -> Self {
        Self { initial, steps }
    }

    pub fn text_at(&self, progress: f64) -> &'static str {
        self.steps
            .iter()
            .take_while(|(threshold, _)| progress > *threshold)
            .last()
            .map(|(_, text)| *text)
            .unwrap_or(self.initial)
    }
}

/// Splits [0, 1] into `count` equal buckets and returns the one `progress`
/// falls into. Progress 1 belongs to the last bucket.
pub fn bucket_index(progress: f64, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let scaled = (progress.clamp(0.0, 1.0) * count as f64).floor() as usize;
    Some(scaled.min(count - 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const HEADLINE: TextSwap = TextSwap::new("EVERYTHING", &[(0.25, "IMPACT"), (0.75, "GROWTH")]);

    #[test]
    fn linear_range_hits_both_ends() {
        let range = TransformRange::linear(Property::Y, 0.0, -600.0);
        assert_eq!(range.value_at(0.0), 0.0);
        assert_eq!(range.value_at(0.5), -300.0);
        assert_eq!(range.value_at(1.0), -600.0);
    }

    #[test]
    fn progress_past_one_does_not_overshoot() {
        let range = TransformRange::linear(Property::Scale, 1.0, 1.1);
        assert_eq!(range.value_at(1.7), 1.1);
        assert_eq!(range.value_at(-0.4), 1.0);
    }

    #[test]
    fn overshooting_easing_is_clamped_to_the_end_value() {
        let range = TransformRange::eased(Property::Scale, 0.8, 1.0, Easing::BackOut(1.7));
        for i in 0..=100 {
            let v = range.value_at(i as f64 / 100.0);
            assert!((0.8..=1.0).contains(&v), "{} out of range", v);
        }
    }

    #[test]
    fn map_props_layers_ranges_over_base() {
        let ranges = [
            TransformRange::linear(Property::Y, 0.0, 350.0),
            TransformRange::linear(Property::X, 0.0, 50.0),
            TransformRange::linear(Property::Scale, 1.0, 1.1),
        ];
        let props = map_props(VisualProps::default(), &ranges, 1.0);
        assert_eq!(props.y, 350.0);
        assert_eq!(props.x, 50.0);
        assert_eq!(props.scale, 1.1);
        assert_eq!(props.opacity, 1.0);
    }

    #[test]
    fn headline_swaps_words_at_thresholds() {
        assert_eq!(HEADLINE.text_at(0.0), "EVERYTHING");
        assert_eq!(HEADLINE.text_at(0.25), "EVERYTHING");
        assert_eq!(HEADLINE.text_at(0.26), "IMPACT");
        assert_eq!(HEADLINE.text_at(0.75), "IMPACT");
        assert_eq!(HEADLINE.text_at(0.9), "GROWTH");
        assert_eq!(HEADLINE.text_at(1.0), "GROWTH");
    }

    #[test]
    fn buckets_cover_the_unit_interval() {
        assert_eq!(bucket_index(0.0, 4), Some(0));
        assert_eq!(bucket_index(0.49, 4), Some(1));
        assert_eq!(bucket_index(1.0, 4), Some(3));
        assert_eq!(bucket_index(0.5, 0), None);
    }

    #[test]
    fn transform_css_lists_every_component() {
        let props = VisualProps::default().with(Property::YPercent, -100.0).with(Property::Y, 12.5);
        assert_eq!(
            props.transform_css(),
            "translate(0%, -100%) translate3d(0px, 12.5px, 0px) scale(1)"
        );
    }

    proptest! {
        #[test]
        fn output_stays_within_range(start in -1_000.0f64..1_000.0, end in -1_000.0f64..1_000.0, p in 0.0f64..=1.0) {
            let v = TransformRange::linear(Property::X, start, end).value_at(p);
            prop_assert!(v >= start.min(end) && v <= start.max(end));
        }

        #[test]
        fn linear_output_is_monotonic(start in -1_000.0f64..1_000.0, end in -1_000.0f64..1_000.0, a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
            let range = TransformRange::linear(Property::Y, start, end);
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let (v_lo, v_hi) = (range.value_at(lo), range.value_at(hi));
            if end >= start {
                prop_assert!(v_lo <= v_hi);
            } else {
                prop_assert!(v_lo >= v_hi);
            }
        }
    }
}

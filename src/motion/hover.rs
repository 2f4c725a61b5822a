/// How a list item should look relative to the current highlight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Emphasis {
    /// Nothing is highlighted.
    Default,
    Highlighted,
    /// Another item is highlighted.
    Dimmed,
}

/// Index of the highlighted item in a list, if any. Only one item can be
/// highlighted at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Highlight(Option<usize>);

impl Highlight {
    pub const NONE: Highlight = Highlight(None);

    pub fn enter(index: usize) -> Self {
        Highlight(Some(index))
    }

    pub fn index(&self) -> Option<usize> {
        self.0
    }

    pub fn is_some(&self) -> bool {
        self.0.is_some()
    }

    pub fn emphasis(&self, index: usize) -> Emphasis {
        match self.0 {
            None => Emphasis::Default,
            Some(active) if active == index => Emphasis::Highlighted,
            Some(_) => Emphasis::Dimmed,
        }
    }

    /// Hover wins over a fallback highlight (e.g. one derived from scroll).
    pub fn or(self, fallback: Highlight) -> Highlight {
        if self.is_some() {
            self
        } else {
            fallback
        }
    }
}

/// Opacity for each emphasis, per list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EmphasisOpacity {
    pub default: f64,
    pub highlighted: f64,
    pub dimmed: f64,
}

impl EmphasisOpacity {
    pub fn of(&self, emphasis: Emphasis) -> f64 {
        match emphasis {
            Emphasis::Default => self.default,
            Emphasis::Highlighted => self.highlighted,
            Emphasis::Dimmed => self.dimmed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hover_then_leave_restores_defaults() {
        let mut highlight = Highlight::enter(2);
        assert_eq!(highlight.emphasis(2), Emphasis::Highlighted);
        assert_eq!(highlight.emphasis(0), Emphasis::Dimmed);

        highlight = Highlight::NONE;
        assert!((0..8).all(|i| highlight.emphasis(i) == Emphasis::Default));
    }

    #[test]
    fn moving_between_items_keeps_a_single_highlight() {
        let highlight = Highlight::enter(5);
        let highlighted = (0..8)
            .filter(|i| highlight.emphasis(*i) == Emphasis::Highlighted)
            .count();
        assert_eq!(highlighted, 1);
    }

    #[test]
    fn hover_overrides_fallback() {
        let scroll = Highlight::enter(1);
        assert_eq!(Highlight::enter(3).or(scroll).index(), Some(3));
        assert_eq!(Highlight::NONE.or(scroll).index(), Some(1));
    }

    #[test]
    fn opacity_table_lookup() {
        let brands = EmphasisOpacity {
            default: 0.6,
            highlighted: 1.0,
            dimmed: 0.3,
        };
        assert_eq!(brands.of(Emphasis::Dimmed), 0.3);
        assert_eq!(brands.of(Emphasis::Default), 0.6);
    }
}

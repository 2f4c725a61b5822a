//! Scroll-linked and one-shot animation triggers.

use log::debug;

use super::mapper::{map_props, TransformRange, VisualProps};
use super::sink::VisualSink;

/// Where a scroll-linked animation currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AnimationState {
    /// Pinned at one end of its span; nothing moves.
    #[default]
    Idle,
    /// Inside the span, progress increasing.
    Entering,
    /// Inside the span, progress unchanged since the last update (resize).
    Active,
    /// Inside the span, progress decreasing.
    Exiting,
}

impl AnimationState {
    pub fn next(previous: Option<f64>, progress: f64) -> Self {
        if progress <= 0.0 || progress >= 1.0 {
            return AnimationState::Idle;
        }
        match previous {
            Some(prev) if progress > prev => AnimationState::Entering,
            Some(prev) if progress < prev => AnimationState::Exiting,
            Some(_) => AnimationState::Active,
            None => AnimationState::Entering,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AnimationState::Idle => "idle",
            AnimationState::Entering => "entering",
            AnimationState::Active => "active",
            AnimationState::Exiting => "exiting",
        }
    }
}

/// Writes mapped props to a sink on every progress update. No queue: each
/// call overwrites whatever the previous one wrote.
pub struct Continuous<S: VisualSink> {
    ranges: &'static [TransformRange],
    base: VisualProps,
    sink: S,
    last: Option<f64>,
    state: AnimationState,
}

impl<S: VisualSink> Continuous<S> {
    pub fn new(ranges: &'static [TransformRange], sink: S) -> Self {
        Self {
            ranges,
            base: VisualProps::default(),
            sink,
            last: None,
            state: AnimationState::Idle,
        }
    }

    pub fn update(&mut self, progress: f64) -> AnimationState {
        self.state = AnimationState::next(self.last, progress);
        self.last = Some(progress);
        self.sink.apply(&map_props(self.base, self.ranges, progress));
        self.state
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntranceState {
    NotYetVisible,
    PlayingForward,
    Settled,
    Reversing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntranceCommand {
    Play,
    Reverse,
}

/// Plays once when its element first becomes visible. With
/// `reverse_on_leave`, scrolling back above the trigger plays it backwards
/// and a later crossing plays it again.
#[derive(Clone, Copy, Debug)]
pub struct Entrance {
    state: EntranceState,
    reverse_on_leave: bool,
}

impl Entrance {
    pub fn once() -> Self {
        Self {
            state: EntranceState::NotYetVisible,
            reverse_on_leave: false,
        }
    }

    pub fn reversible() -> Self {
        Self {
            reverse_on_leave: true,
            ..Self::once()
        }
    }

    pub fn state(&self) -> EntranceState {
        self.state
    }

    pub fn on_visibility(&mut self, visible: bool) -> Option<EntranceCommand> {
        let (next, command) = match (self.state, visible) {
            (EntranceState::NotYetVisible, true) | (EntranceState::Reversing, true) => {
                (EntranceState::PlayingForward, EntranceCommand::Play)
            }
            (EntranceState::PlayingForward, false) | (EntranceState::Settled, false)
                if self.reverse_on_leave =>
            {
                (EntranceState::Reversing, EntranceCommand::Reverse)
            }
            _ => return None,
        };
        debug!("entrance {:?} -> {:?}", self.state, next);
        self.state = next;
        Some(command)
    }

    /// The running playback reached its end.
    pub fn on_complete(&mut self) {
        self.state = match self.state {
            EntranceState::PlayingForward => EntranceState::Settled,
            EntranceState::Reversing => EntranceState::NotYetVisible,
            other => other,
        };
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::motion::mapper::Property;
    use crate::motion::sink::testing::RecordingSink;

    static PARALLAX: [TransformRange; 2] = [
        TransformRange::linear(Property::Y, 0.0, -600.0),
        TransformRange::linear(Property::Scale, 1.0, 0.8),
    ];

    #[test]
    fn continuous_writes_latest_progress() {
        let sink = Rc::new(RecordingSink::default());
        let mut trigger = Continuous::new(&PARALLAX, sink.clone());

        assert_eq!(trigger.update(0.25), AnimationState::Entering);
        assert_eq!(trigger.update(0.75), AnimationState::Entering);
        assert_eq!(trigger.update(0.5), AnimationState::Exiting);
        assert_eq!(trigger.update(0.5), AnimationState::Active);
        assert_eq!(trigger.update(1.0), AnimationState::Idle);

        let last = sink.last().unwrap();
        assert_eq!(last.y, -600.0);
        assert_eq!(last.scale, 0.8);
        assert_eq!(sink.props.borrow().len(), 5);
    }

    #[test]
    fn one_shot_plays_exactly_once() {
        let mut entrance = Entrance::once();
        assert_eq!(entrance.on_visibility(false), None);
        assert_eq!(entrance.on_visibility(true), Some(EntranceCommand::Play));
        assert_eq!(entrance.on_visibility(true), None);
        entrance.on_complete();
        assert_eq!(entrance.state(), EntranceState::Settled);

        assert_eq!(entrance.on_visibility(false), None);
        assert_eq!(entrance.on_visibility(true), None);
        assert_eq!(entrance.state(), EntranceState::Settled);
    }

    #[test]
    fn reversible_entrance_toggles() {
        let mut entrance = Entrance::reversible();
        assert_eq!(entrance.on_visibility(true), Some(EntranceCommand::Play));
        entrance.on_complete();
        assert_eq!(entrance.on_visibility(false), Some(EntranceCommand::Reverse));
        assert_eq!(entrance.state(), EntranceState::Reversing);

        // Re-crossing mid-reverse plays forward again from where it is.
        assert_eq!(entrance.on_visibility(true), Some(EntranceCommand::Play));
        assert_eq!(entrance.on_visibility(false), Some(EntranceCommand::Reverse));
        entrance.on_complete();
        assert_eq!(entrance.state(), EntranceState::NotYetVisible);
    }
}

use super::easing::Easing;

/// A time-based interpolation: eased progress over `duration_ms`, starting
/// `delay_ms` after the clock starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub duration_ms: f64,
    pub delay_ms: f64,
    pub easing: Easing,
}

impl Tween {
    pub const fn new(duration_ms: f64, easing: Easing) -> Self {
        Self {
            duration_ms,
            delay_ms: 0.0,
            easing,
        }
    }

    pub const fn delayed(self, delay_ms: f64) -> Self {
        Self {
            duration_ms: self.duration_ms,
            delay_ms,
            easing: self.easing,
        }
    }

    pub fn end_ms(&self) -> f64 {
        self.delay_ms + self.duration_ms
    }

    /// Linear time fraction at `elapsed_ms`, in [0, 1].
    pub fn linear_at(&self, elapsed_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return if elapsed_ms >= self.delay_ms { 1.0 } else { 0.0 };
        }
        ((elapsed_ms - self.delay_ms) / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Eased progress at `elapsed_ms`.
    pub fn progress_at(&self, elapsed_ms: f64) -> f64 {
        self.easing.apply(self.linear_at(elapsed_ms))
    }

    pub fn is_done(&self, elapsed_ms: f64) -> bool {
        elapsed_ms >= self.end_ms()
    }

    /// The same tween for item `index` of a list, offset by `each_ms` per item.
    pub fn staggered(&self, index: usize, each_ms: f64) -> Tween {
        self.delayed(self.delay_ms + index as f64 * each_ms)
    }
}

/// Total running time of a staggered list of `count` items.
pub fn stagger_end_ms(tween: &Tween, count: usize, each_ms: f64) -> f64 {
    tween.staggered(count.saturating_sub(1), each_ms).end_ms()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Position on a timeline of fixed length that can play either way.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Playhead {
    position_ms: f64,
    length_ms: f64,
    direction: Direction,
}

impl Playhead {
    pub fn new(length_ms: f64) -> Self {
        Self {
            position_ms: 0.0,
            length_ms: length_ms.max(0.0),
            direction: Direction::Forward,
        }
    }

    pub fn position_ms(&self) -> f64 {
        self.position_ms
    }

    /// Changes direction from wherever the playhead currently is.
    pub fn play(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Advances by `dt_ms`. Returns `true` once the end of travel in the
    /// current direction is reached.
    pub fn advance(&mut self, dt_ms: f64) -> bool {
        match self.direction {
            Direction::Forward => {
                self.position_ms = (self.position_ms + dt_ms).min(self.length_ms);
                self.position_ms >= self.length_ms
            }
            Direction::Backward => {
                self.position_ms = (self.position_ms - dt_ms).max(0.0);
                self.position_ms <= 0.0
            }
        }
    }
}

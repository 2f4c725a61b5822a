//! Easing curves, named after the tween names the site is authored with
//! (`none`, `power2.out`, `back.out(1.7)`, ...).

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    #[default]
    Linear,
    Power2Out,
    Power2InOut,
    Power3In,
    Power3Out,
    Power3InOut,
    /// Overshoots past 1 before settling. The argument is the overshoot strength.
    BackOut(f64),
}

impl Easing {
    /// Maps linear time `t` onto the curve. `t` is clamped to [0, 1] first.
    /// The result is 0 at 0 and 1 at 1 for every curve, but may leave [0, 1]
    /// in between (`BackOut`).
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Power2Out => ease_out(t, 3),
            Easing::Power2InOut => ease_in_out(t, 3),
            Easing::Power3In => ease_in(t, 4),
            Easing::Power3Out => ease_out(t, 4),
            Easing::Power3InOut => ease_in_out(t, 4),
            Easing::BackOut(overshoot) => {
                let u = t - 1.0;
                1.0 + (overshoot + 1.0) * u * u * u + overshoot * u * u
            }
        }
    }
}

#[inline]
fn ease_in(t: f64, power: i32) -> f64 {
    t.powi(power)
}

#[inline]
fn ease_out(t: f64, power: i32) -> f64 {
    1.0 - (1.0 - t).powi(power)
}

#[inline]
fn ease_in_out(t: f64, power: i32) -> f64 {
    if t < 0.5 {
        (2.0 * t).powi(power) / 2.0
    } else {
        1.0 - (2.0 * (1.0 - t)).powi(power) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 7] = [
        Easing::Linear,
        Easing::Power2Out,
        Easing::Power2InOut,
        Easing::Power3In,
        Easing::Power3Out,
        Easing::Power3InOut,
        Easing::BackOut(1.7),
    ];

    #[test]
    fn every_curve_pins_its_endpoints() {
        for easing in ALL {
            assert!(easing.apply(0.0).abs() < 1e-6, "{:?} at 0", easing);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{:?} at 1", easing);
        }
    }

    #[test]
    fn input_outside_unit_interval_is_clamped() {
        assert_eq!(Easing::Power3Out.apply(-2.0), 0.0);
        assert_eq!(Easing::Power3Out.apply(7.0), 1.0);
    }

    #[test]
    fn out_curves_lead_linear_and_in_curves_lag() {
        assert!(Easing::Power2Out.apply(0.3) > 0.3);
        assert!(Easing::Power3In.apply(0.3) < 0.3);
        assert!((Easing::Power3InOut.apply(0.5) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn back_out_overshoots_before_settling() {
        let peak = (1..100)
            .map(|i| Easing::BackOut(1.7).apply(i as f64 / 100.0))
            .fold(f64::MIN, f64::max);
        assert!(peak > 1.0);
    }
}

//! Distance readings and samples

use crate::config::{NO_ECHO_CM, VISUAL_RANGE_CM};

/// Distance in whole centimetres
///
/// [`Distance::NO_ECHO`] (999) stands for "no echo within the timeout".
/// A real reading of exactly 999 cm is indistinguishable from it, which is
/// far beyond what an HC-SR04 can range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Distance(u16);

impl Distance {
    /// Sentinel for a timed-out measurement
    pub const NO_ECHO: Distance = Distance(NO_ECHO_CM);

    pub const fn from_cm(cm: u16) -> Self {
        Self(cm)
    }

    /// Convert an echo pulse width to a distance
    ///
    /// `cm = floor(us * 0.034 / 2)`, computed as `us * 17 / 1000` so the
    /// result is exact. A zero-length pulse means the echo never arrived.
    pub const fn from_echo_micros(duration_us: u32) -> Self {
        if duration_us == 0 {
            return Self::NO_ECHO;
        }
        let cm = duration_us as u64 * 17 / 1000;
        if cm > u16::MAX as u64 {
            Self(u16::MAX)
        } else {
            Self(cm as u16)
        }
    }

    pub const fn cm(self) -> u16 {
        self.0
    }

    pub const fn is_no_echo(self) -> bool {
        self.0 == NO_ECHO_CM
    }

    /// Check if the distance is closer than `limit_cm`
    pub const fn is_within(self, limit_cm: u16) -> bool {
        self.0 < limit_cm
    }

    /// Check if the distance falls inside the drawn radar range
    pub const fn is_visible(self) -> bool {
        self.is_within(VISUAL_RANGE_CM)
    }
}

/// One reading taken during a sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    /// Logical sweep angle (degrees), not the servo command
    pub angle: i16,
    pub distance: Distance,
}

impl Sample {
    pub const fn new(angle: i16, distance: Distance) -> Self {
        Self { angle, distance }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero_duration_is_no_echo() {
        let d = Distance::from_echo_micros(0);
        assert_eq!(d, Distance::NO_ECHO);
        assert_eq!(d.cm(), 999);
        assert!(d.is_no_echo());
        assert!(!d.is_visible());
    }

    #[test]
    fn test_known_durations() {
        // 58 us per cm round trip, roughly
        assert_eq!(Distance::from_echo_micros(1).cm(), 0);
        assert_eq!(Distance::from_echo_micros(59).cm(), 1);
        assert_eq!(Distance::from_echo_micros(1000).cm(), 17);
        assert_eq!(Distance::from_echo_micros(2941).cm(), 49);
        assert_eq!(Distance::from_echo_micros(2942).cm(), 50);
        assert_eq!(Distance::from_echo_micros(1_000_000).cm(), 17_000);
    }

    #[test]
    fn test_visibility_boundary() {
        assert!(Distance::from_cm(99).is_visible());
        assert!(!Distance::from_cm(100).is_visible());
        assert!(Distance::from_cm(0).is_visible());
    }

    #[test]
    fn test_saturates_on_huge_pulse() {
        assert_eq!(Distance::from_echo_micros(u32::MAX).cm(), u16::MAX);
    }

    proptest! {
        #[test]
        fn prop_distance_is_floor_of_speed_of_sound(d in 1u32..=1_000_000) {
            // floor(d * 0.034 / 2) == floor(d * 17 / 1000) in exact arithmetic
            let expected = (d as u64 * 34 / 2000) as u16;
            prop_assert_eq!(Distance::from_echo_micros(d).cm(), expected);
        }

        #[test]
        fn prop_distance_monotonic(a in 1u32..=1_000_000, b in 1u32..=1_000_000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(Distance::from_echo_micros(lo) <= Distance::from_echo_micros(hi));
        }
    }
}

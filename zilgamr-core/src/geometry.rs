//! Radar geometry
//!
//! Two angle conventions are in play and must not be mixed:
//!
//! - the **logical angle** (-180°..=90°) drives everything drawn on screen;
//! - the **servo angle** (0°..=180°) is the logical angle linearly remapped
//!   for the actuator.
//!
//! Screen y grows downwards, so the projection subtracts the sine term.
//! Coordinates are rounded half away from zero.

use core::f64::consts::PI;

use libm::{cos, round, sin};

use crate::config::{ScreenGeometry, SweepConfig};
use crate::scan::Distance;

/// Absolute pixel position
///
/// May lie outside the panel; drawing clips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Map a logical angle onto the servo's 0..=`servo_max` travel
///
/// `round((angle - start) * servo_max / span)`. Angles outside the sweep
/// range are clamped to its ends.
pub fn servo_angle(logical: i16, sweep: &SweepConfig) -> u8 {
    let span = sweep.span();
    if span <= 0 {
        return 0;
    }
    let offset = (logical as i32 - sweep.start_angle as i32).clamp(0, span);
    let max = sweep.servo_max as i32;
    ((offset * max + span / 2) / span) as u8
}

/// The radar pivot (sensor position on screen)
pub const fn pivot(geometry: &ScreenGeometry) -> ScreenPoint {
    ScreenPoint::new(geometry.center_x, geometry.pivot_y)
}

/// Project a polar coordinate around the pivot onto the screen
pub fn polar_to_screen(geometry: &ScreenGeometry, angle_deg: i16, radius: f64) -> ScreenPoint {
    let rad = angle_deg as f64 * (PI / 180.0);
    let x = geometry.center_x as f64 + radius * cos(rad);
    let y = geometry.pivot_y as f64 - radius * sin(rad);
    ScreenPoint::new(round(x) as i32, round(y) as i32)
}

/// End of the sweep needle for a logical angle
pub fn sweep_endpoint(geometry: &ScreenGeometry, angle_deg: i16) -> ScreenPoint {
    polar_to_screen(geometry, angle_deg, geometry.scan_length as f64)
}

/// Where a detection marker goes, if the distance is drawn at all
pub fn detection_point(
    geometry: &ScreenGeometry,
    angle_deg: i16,
    distance: Distance,
) -> Option<ScreenPoint> {
    if !distance.is_within(geometry.visual_range_cm) {
        return None;
    }
    let radius = (distance.cm() as u32 * geometry.marker_scale_x100) as f64 / 100.0;
    Some(polar_to_screen(geometry, angle_deg, radius))
}

/// Radius of grid ring `index` (0-based)
pub const fn ring_radius(geometry: &ScreenGeometry, index: i32) -> i32 {
    geometry.ring_spacing * (index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const G: ScreenGeometry = ScreenGeometry::DEFAULT;
    const S: SweepConfig = SweepConfig::DEFAULT;

    #[test]
    fn test_servo_mapping_ends() {
        assert_eq!(servo_angle(-180, &S), 0);
        assert_eq!(servo_angle(90, &S), 180);
        assert_eq!(servo_angle(0, &S), 120);
        assert_eq!(servo_angle(-90, &S), 60);
    }

    #[test]
    fn test_servo_mapping_rounds() {
        // 2 * 2/3 = 1.33 -> 1, 4 * 2/3 = 2.67 -> 3
        assert_eq!(servo_angle(-178, &S), 1);
        assert_eq!(servo_angle(-176, &S), 3);
    }

    #[test]
    fn test_servo_mapping_clamps() {
        assert_eq!(servo_angle(-200, &S), 0);
        assert_eq!(servo_angle(120, &S), 180);
    }

    #[test]
    fn test_sweep_endpoint_at_zero() {
        assert_eq!(
            sweep_endpoint(&G, 0),
            ScreenPoint::new(G.center_x + 105, G.pivot_y)
        );
    }

    #[test]
    fn test_sweep_endpoint_straight_up_and_left() {
        assert_eq!(sweep_endpoint(&G, 90), ScreenPoint::new(80, 13));
        assert_eq!(sweep_endpoint(&G, -180), ScreenPoint::new(-25, 118));
        // Below the baseline, off the bottom of the panel
        assert_eq!(sweep_endpoint(&G, -90), ScreenPoint::new(80, 223));
    }

    #[test]
    fn test_detection_point_at_zero() {
        // 1.15 * 50 = 57.5, rounded away from zero
        assert_eq!(
            detection_point(&G, 0, Distance::from_cm(50)),
            Some(ScreenPoint::new(G.center_x + 58, G.pivot_y))
        );
    }

    #[test]
    fn test_detection_point_gating() {
        assert!(detection_point(&G, 30, Distance::from_cm(99)).is_some());
        assert!(detection_point(&G, 30, Distance::from_cm(100)).is_none());
        assert!(detection_point(&G, 30, Distance::NO_ECHO).is_none());
    }

    #[test]
    fn test_ring_radii() {
        let radii: [i32; 4] = core::array::from_fn(|i| ring_radius(&G, i as i32));
        assert_eq!(radii, [29, 58, 87, 116]);
    }

    proptest! {
        #[test]
        fn prop_servo_command_in_range(step in 0i16..136) {
            let angle = -180 + step * 2;
            let servo = servo_angle(angle, &S);
            prop_assert!(servo <= 180);

            // round((a + 180) * 180 / 270) with ties impossible (x * 2/3)
            let exact = (angle as f64 + 180.0) * 180.0 / 270.0;
            prop_assert_eq!(servo as f64, round(exact));
        }

        #[test]
        fn prop_servo_mapping_monotonic(a in -180i16..=90, b in -180i16..=90) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(servo_angle(lo, &S) <= servo_angle(hi, &S));
        }

        #[test]
        fn prop_marker_never_past_needle(angle in -180i16..=90, cm in 0u16..100) {
            let marker = detection_point(&G, angle, Distance::from_cm(cm)).unwrap();
            let dx = (marker.x - G.center_x) as i64;
            let dy = (marker.y - G.pivot_y) as i64;
            // 1.15 * 99 = 113.85, plus rounding slack
            prop_assert!(dx * dx + dy * dy <= 115 * 115);
        }
    }
}

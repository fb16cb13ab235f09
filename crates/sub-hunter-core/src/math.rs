//! Geometry helpers shared by every entity behavior.
//!
//! Headings are compass-style: degrees measured clockwise from "up" (+Y),
//! kept in the half-open domain `(0, 360]`. A heading of `360` points up,
//! `90` points right.
//!
//! # Example
//!
//! ```
//! use sub_hunter_core::math::{bearing, distance, heading_vector};
//! use glam::Vec2;
//!
//! assert_eq!(distance(Vec2::ZERO, Vec2::new(3.0, 4.0)), 5.0);
//!
//! let east = heading_vector(90.0);
//! assert!((east - Vec2::X).length() < 1e-6);
//!
//! let b = bearing(Vec2::ZERO, Vec2::new(0.0, -10.0));
//! assert!((b - 180.0).abs() < 1e-4);
//! ```

use glam::Vec2;

/// Upper bound of the heading domain.
pub const FULL_TURN: f32 = 360.0;

/// Lowest heading that does not wrap when steering.
///
/// Steering wraps upward when the new heading drops below this value.
pub const HEADING_FLOOR: f32 = 1.0;

/// Euclidean distance between two points.
#[must_use]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Unit vector for a compass heading in degrees.
///
/// `x = sin(h)`, `y = cos(h)`, so heading 0/360 is +Y and 90 is +X.
#[must_use]
pub fn heading_vector(heading_deg: f32) -> Vec2 {
    let (sin, cos) = heading_deg.to_radians().sin_cos();
    Vec2::new(sin, cos)
}

/// Compass bearing from `from` towards `to`, in degrees within `[0, 360]`.
///
/// Coincident points yield `180`.
#[must_use]
pub fn bearing(from: Vec2, to: Vec2) -> f32 {
    let delta = from - to;
    180.0 + delta.x.atan2(delta.y).to_degrees()
}

/// Applies a turn of `change` degrees to `heading`, wrapping into `(0, 360]`.
///
/// The wrap rule is asymmetric: a result above 360 wraps down by 360, a
/// result below 1 wraps up by 360. A result of exactly `0` therefore becomes
/// `360` and never rests at zero.
///
/// # Example
///
/// ```
/// use sub_hunter_core::math::steer_heading;
///
/// assert_eq!(steer_heading(360.0, 5.0), 5.0);
/// assert_eq!(steer_heading(5.0, -5.0), 360.0);
/// assert_eq!(steer_heading(90.0, -5.0), 85.0);
/// ```
#[must_use]
pub fn steer_heading(heading: f32, change: f32) -> f32 {
    let turned = heading + change;
    if turned > FULL_TURN {
        turned - FULL_TURN
    } else if turned < HEADING_FLOOR {
        let wrapped = turned + FULL_TURN;
        // (0, 1) would wrap past 360
        if wrapped > FULL_TURN {
            turned
        } else {
            wrapped
        }
    } else {
        turned
    }
}

/// Returns true when `heading` lies in `(0, 360]`.
#[must_use]
pub fn is_normalized(heading: f32) -> bool {
    heading > 0.0 && heading <= FULL_TURN
}

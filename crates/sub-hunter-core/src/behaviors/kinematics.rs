//! Shared motion integration and proximity detonation scan.
//!
//! Every moving entity runs [`advance`] once per tick:
//!
//! 1. `acceleration = thrust / 10 - speed * drag`
//! 2. `speed += acceleration` (per tick, not scaled by `dt`)
//! 3. `position += heading_vector(heading) * speed * dt`
//! 4. if still a live explosive, scan the other live explosives for one
//!    strictly closer than the detonation radius
//!
//! The first match in ID order produces a [`Command::Detonate`]. Applying it
//! is the detonation resolver's job.

use glam::Vec2;

use crate::behavior::TickContext;
use crate::entity::{EntityId, Kinematics};
use crate::math::{distance, heading_vector};
use crate::output::{Command, Output};
use crate::world_view::WorldView;

/// Thrust is divided by this before it becomes acceleration.
pub const THRUST_SCALE: f32 = 10.0;

/// Integrates one tick of motion without scanning.
pub fn integrate(kinematics: &mut Kinematics, dt: f32, drag: f32) {
    kinematics.acceleration = kinematics.thrust / THRUST_SCALE - kinematics.speed * drag;
    kinematics.speed += kinematics.acceleration;
    kinematics.position += heading_vector(kinematics.heading) * kinematics.speed * dt;
}

/// Finds the first live explosive within `radius` of `position`.
///
/// Returns `None` when `kinematics` itself cannot detonate.
#[must_use]
pub fn scan_for_contact(
    kinematics: &Kinematics,
    view: &WorldView<'_>,
    radius: f32,
) -> Option<(EntityId, Vec2)> {
    if !kinematics.is_live_explosive() {
        return None;
    }
    view.others()
        .find(|other| {
            other.kinematics().is_live_explosive()
                && distance(kinematics.position, other.position()) < radius
        })
        .map(|other| (other.id(), kinematics.position))
}

/// Integrates motion and scans for a detonation.
pub fn advance(id: EntityId, kinematics: &mut Kinematics, ctx: &TickContext<'_>) -> Vec<Output> {
    integrate(kinematics, ctx.dt, ctx.config.drag_coefficient);
    scan_for_contact(kinematics, &ctx.view, ctx.config.detonation_radius)
        .map(|(other, at)| {
            Output::Command(Command::Detonate {
                source: id,
                other,
                at,
            })
        })
        .into_iter()
        .collect()
}

//! Stock behaviors for every entity kind.
//!
//! - [`PlayerBehavior`]: throttle-driven motion, sonar pulse, wake trail,
//!   destruction countdown
//! - [`EnemyBehavior`]: waypoint patrol
//! - [`TorpedoBehavior`]: fuse arming and expiry
//! - [`TrailBehavior`]: fade-out
//! - [`ExplosionBehavior`]: fade-out
//!
//! Motion and proximity detonation are shared through [`kinematics`];
//! steering and torpedo cooldown are shared by the two submarine kinds
//! through [`submarine`].

pub mod enemy;
pub mod explosion;
pub mod kinematics;
pub mod player;
pub mod submarine;
pub mod torpedo;
pub mod trail;

pub use enemy::EnemyBehavior;
pub use explosion::ExplosionBehavior;
pub use player::PlayerBehavior;
pub use torpedo::TorpedoBehavior;
pub use trail::TrailBehavior;

//! Sonar scope rendering model.
//!
//! The core never draws. Instead [`Frame::capture`] turns the arena into a
//! list of [`DrawItem`]s in scope coordinates (world position minus the
//! player's position, so the player sits at the origin), plus a [`Hud`].
//! Anything at or beyond the scope radius is clipped.
//!
//! A [`PresentationSurface`] consumes frames and audio cues. [`render_frame`]
//! isolates failures: a primitive the surface cannot draw is logged and
//! skipped, and the rest of the frame is still drawn.
//!
//! # Draw order
//!
//! The scope face comes first, then entities newest to oldest, so the
//! player is drawn last and stays on top. Trail markers are drawn by their
//! parent ship, immediately before the ship itself.
//!
//! # Example
//!
//! ```
//! use sub_hunter_core::simulation::Simulation;
//! use sub_hunter_core::scope::{DrawPrimitive, TorpedoStatus};
//!
//! let sim = Simulation::standard_scenario(7);
//! let frame = sim.frame().unwrap();
//!
//! assert!(matches!(frame.items[0].primitive, DrawPrimitive::ScopeFace { .. }));
//! assert_eq!(frame.hud.torpedo, TorpedoStatus::Ready);
//! assert_eq!(frame.hud.torpedo.to_string(), "Torpedo Ready [Enter]");
//! ```

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::arena::Arena;
use crate::config::SimConfig;
use crate::control::speed_label;
use crate::entity::{
    EnemyComponents, Entity, EntityId, EntityInner, ExplosionComponents, PlayerComponents,
    TorpedoComponents,
};
use crate::error::SurfaceError;
use crate::math::distance;
use crate::output::AudioCue;
use crate::simulation::TickReport;
use crate::sonar::CONTACT_SPEED_CEILING;

/// Radius of a trail marker dot.
pub const TRAIL_DOT_RADIUS: f32 = 4.0;
/// Radius of a torpedo dot.
pub const TORPEDO_DOT_RADIUS: f32 = 5.0;
/// Explosion radius growth per second of age.
pub const EXPLOSION_GROWTH: f32 = 5.0;
/// Blur radius per unit of speed below the ceiling.
pub const BLUR_RADIUS_SCALE: f32 = 6.0;
/// Trail alpha lost per whole second of age.
pub const TRAIL_FADE_PER_SECOND: i32 = 25;

// =============================================================================
// Primitives
// =============================================================================

/// RGBA colour.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Colour {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
    /// Opacity
    pub a: u8,
}

impl Colour {
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Armed-soon torpedo.
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    /// Armed torpedo.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Explosion.
    pub const RED: Self = Self::rgb(255, 0, 0);
    /// Scope background.
    pub const NAVY_BLUE: Self = Self::rgb(0, 0, 128);
    /// Scope rim.
    pub const DARK_OLIVE_GREEN: Self = Self::rgb(85, 107, 47);

    /// Creates an opaque colour.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Returns the same colour with a different opacity.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

/// Which sprite to draw for a submarine.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteKind {
    /// The pilot's boat
    Player,
    /// A revealed enemy
    Enemy,
}

/// One drawing instruction in scope coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawPrimitive {
    /// Scope background disc and rim.
    ScopeFace {
        /// Scope radius
        radius: f32,
    },
    /// A submarine sprite.
    Sprite {
        /// Sprite to use
        kind: SpriteKind,
        /// Centre
        center: Vec2,
        /// Rotation in degrees, counter-clockwise (the negated heading)
        angle: f32,
    },
    /// A filled circle.
    Disc {
        /// Centre
        center: Vec2,
        /// Radius
        radius: f32,
        /// Fill
        colour: Colour,
    },
    /// A circle outline (the sonar pulse).
    Ring {
        /// Centre
        center: Vec2,
        /// Radius
        radius: f32,
        /// Stroke
        colour: Colour,
    },
    /// Large centred text.
    Banner {
        /// Text to show
        text: String,
    },
}

/// A primitive and the entity it depicts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawItem {
    /// Entity depicted; `None` for the scope face.
    pub entity: Option<EntityId>,
    /// What to draw.
    pub primitive: DrawPrimitive,
}

// =============================================================================
// HUD
// =============================================================================

/// Torpedo tube state shown on the HUD.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub enum TorpedoStatus {
    /// A torpedo can be fired.
    Ready,
    /// Seconds until reload completes.
    Loading(f32),
}

impl TorpedoStatus {
    /// Status for a remaining cooldown.
    #[must_use]
    pub fn from_cooldown(remaining: f32) -> Self {
        if remaining <= 0.0 {
            Self::Ready
        } else {
            Self::Loading(remaining)
        }
    }
}

impl fmt::Display for TorpedoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready => write!(f, "Torpedo Ready [Enter]"),
            Self::Loading(t) => write!(f, "Loading Torpedo ({t:.1})"),
        }
    }
}

/// Player-facing text overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    /// Player grid location (world position floored to tens).
    pub location: Vec2,
    /// Player heading in degrees.
    pub heading: f32,
    /// Named throttle setting.
    pub speed: String,
    /// Torpedo tube state.
    pub torpedo: TorpedoStatus,
}

impl Hud {
    fn for_player(ship: &Entity, player: &PlayerComponents) -> Self {
        Self {
            location: (ship.position() / 10.0).floor(),
            heading: ship.kinematics().heading,
            speed: speed_label(player.throttle).to_owned(),
            torpedo: TorpedoStatus::from_cooldown(player.submarine.torpedo_time),
        }
    }
}

impl fmt::Display for Hud {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Vessel Location:\nX: {:.2}\nY: {:.2}\nHeading: {}\nSpeed: {}",
            self.location.x, self.location.y, self.heading, self.speed
        )
    }
}

// =============================================================================
// Frame
// =============================================================================

/// Everything needed to draw one frame of the scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Tick the frame was captured after.
    pub tick: u64,
    /// Primitives in draw order.
    pub items: Vec<DrawItem>,
    /// Text overlay.
    pub hud: Hud,
}

/// Projection from world to scope coordinates around one origin.
#[derive(Debug, Clone, Copy)]
struct Projection {
    origin: Vec2,
    radius: f32,
}

impl Projection {
    fn project(self, world: Vec2) -> Option<Vec2> {
        (distance(world, self.origin) < self.radius).then(|| world - self.origin)
    }
}

impl Frame {
    /// Captures the arena as seen from `player`.
    ///
    /// Returns `None` if `player` is not a live player entity.
    #[must_use]
    pub fn capture(arena: &Arena, player: EntityId, config: &SimConfig) -> Option<Self> {
        let ship = arena.get_live(player)?;
        let components = ship.as_player()?;
        let scope = Projection {
            origin: ship.position(),
            radius: config.scope_radius,
        };

        let mut items = vec![DrawItem {
            entity: None,
            primitive: DrawPrimitive::ScopeFace {
                radius: config.scope_radius,
            },
        }];
        let entities: Vec<&Entity> = arena.live_entities().collect();
        for entity in entities.into_iter().rev() {
            let id = entity.id();
            let primitives: Vec<(EntityId, DrawPrimitive)> = match entity.inner() {
                EntityInner::Player(p) => trail_primitives(arena, p, config)
                    .into_iter()
                    .chain(player_primitives(entity, p, config).into_iter().map(|prim| (id, prim)))
                    .collect(),
                EntityInner::Enemy(e) => enemy_primitive(entity, e, scope)
                    .map(|prim| (id, prim))
                    .into_iter()
                    .collect(),
                EntityInner::Torpedo(t) => torpedo_primitive(entity, t, scope)
                    .map(|prim| (id, prim))
                    .into_iter()
                    .collect(),
                EntityInner::Explosion(x) => explosion_primitive(entity, x, scope)
                    .map(|prim| (id, prim))
                    .into_iter()
                    .collect(),
                EntityInner::Trail(_) => Vec::new(),
            };
            items.extend(primitives.into_iter().map(|(source, primitive)| DrawItem {
                entity: Some(source),
                primitive,
            }));
        }

        Some(Self {
            tick: arena.current_tick(),
            items,
            hud: Hud::for_player(ship, components),
        })
    }
}

fn player_primitives(
    ship: &Entity,
    player: &PlayerComponents,
    config: &SimConfig,
) -> Vec<DrawPrimitive> {
    if ship.kinematics().is_exploded() {
        return vec![DrawPrimitive::Banner {
            text: "Game Over".to_owned(),
        }];
    }
    let mut primitives = vec![DrawPrimitive::Sprite {
        kind: SpriteKind::Player,
        center: Vec2::ZERO,
        angle: -ship.kinematics().heading,
    }];
    if player.is_pinging() {
        primitives.push(DrawPrimitive::Ring {
            center: Vec2::ZERO,
            radius: config.ping.ring_radius(player.ping_time),
            colour: Colour::WHITE,
        });
    }
    primitives
}

/// Trail dots, projected around each marker's own parent ship.
fn trail_primitives(
    arena: &Arena,
    player: &PlayerComponents,
    config: &SimConfig,
) -> Vec<(EntityId, DrawPrimitive)> {
    player
        .trails
        .iter()
        .filter_map(|&id| {
            let marker = arena.get_live(id)?;
            let trail = marker.as_trail()?;
            let parent = arena.get_live(trail.parent)?;
            let scope = Projection {
                origin: parent.position(),
                radius: config.scope_radius,
            };
            let center = scope.project(marker.position())?;
            Some((
                id,
                DrawPrimitive::Disc {
                    center,
                    radius: TRAIL_DOT_RADIUS,
                    colour: Colour::WHITE.with_alpha(trail_alpha(trail.age)),
                },
            ))
        })
        .collect()
}

fn enemy_primitive(
    ship: &Entity,
    enemy: &EnemyComponents,
    scope: Projection,
) -> Option<DrawPrimitive> {
    let center = scope.project(ship.position())?;
    let speed = ship.kinematics().speed;
    Some(if enemy.pinged {
        DrawPrimitive::Sprite {
            kind: SpriteKind::Enemy,
            center,
            angle: -ship.kinematics().heading,
        }
    } else {
        DrawPrimitive::Disc {
            center: center + enemy.offset,
            radius: blur_radius(speed),
            colour: Colour::WHITE.with_alpha(blur_alpha(speed)),
        }
    })
}

fn torpedo_primitive(
    entity: &Entity,
    torpedo: &TorpedoComponents,
    scope: Projection,
) -> Option<DrawPrimitive> {
    let center = scope.project(entity.position())?;
    let colour = if torpedo.age < torpedo.fuse_length {
        Colour::GREEN
    } else {
        Colour::BLACK
    };
    Some(DrawPrimitive::Disc {
        center,
        radius: TORPEDO_DOT_RADIUS,
        colour,
    })
}

fn explosion_primitive(
    entity: &Entity,
    explosion: &ExplosionComponents,
    scope: Projection,
) -> Option<DrawPrimitive> {
    let center = scope.project(entity.position())?;
    Some(DrawPrimitive::Disc {
        center,
        radius: explosion.age * EXPLOSION_GROWTH,
        colour: Colour::RED,
    })
}

/// Radius of an unrevealed contact's blur; shrinks to nothing at the ceiling.
#[must_use]
pub fn blur_radius(speed: f32) -> f32 {
    ((CONTACT_SPEED_CEILING - speed) * BLUR_RADIUS_SCALE).max(0.0)
}

/// Opacity of an unrevealed contact's blur; faster contacts are louder.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn blur_alpha(speed: f32) -> u8 {
    ((speed * 255.0 / CONTACT_SPEED_CEILING).floor() + 1.0).clamp(0.0, 255.0) as u8
}

/// Opacity of a trail marker, fading per whole second of age.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn trail_alpha(age: f32) -> u8 {
    let faded = 255 - age.floor() as i32 * TRAIL_FADE_PER_SECOND;
    faded.clamp(0, 255) as u8
}

// =============================================================================
// Presentation
// =============================================================================

/// Something that can show frames and play sounds.
pub trait PresentationSurface {
    /// Draws one primitive.
    ///
    /// # Errors
    ///
    /// Returns a [`SurfaceError`] if the primitive could not be drawn; the
    /// rest of the frame is still attempted.
    fn draw(&mut self, item: &DrawItem) -> Result<(), SurfaceError>;

    /// Shows the text overlay.
    ///
    /// # Errors
    ///
    /// Returns a [`SurfaceError`] if the overlay could not be drawn.
    fn hud(&mut self, hud: &Hud) -> Result<(), SurfaceError>;

    /// Plays a sound. Fire and forget.
    fn play(&mut self, cue: AudioCue);

    /// Ends the session.
    fn close(&mut self);
}

/// Outcome of pushing one frame through a surface.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenderStats {
    /// Primitives drawn successfully.
    pub drawn: usize,
    /// Primitives (and HUD) the surface rejected.
    pub failed: usize,
}

/// Draws a frame, logging and skipping primitives the surface rejects.
pub fn render_frame(frame: &Frame, surface: &mut dyn PresentationSurface) -> RenderStats {
    let mut stats = RenderStats::default();
    for item in &frame.items {
        match surface.draw(item) {
            Ok(()) => stats.drawn += 1,
            Err(err) => {
                stats.failed += 1;
                warn!(entity = ?item.entity, error = %err, "draw failed");
            }
        }
    }
    if let Err(err) = surface.hud(&frame.hud) {
        stats.failed += 1;
        warn!(error = %err, "hud draw failed");
    }
    stats
}

/// Presents one tick: plays its cues, draws the frame, and closes the
/// surface once the game is over.
pub fn present(
    report: &TickReport,
    frame: Option<&Frame>,
    surface: &mut dyn PresentationSurface,
) -> RenderStats {
    for cue in report.cues() {
        surface.play(cue);
    }
    let stats = frame.map_or_else(RenderStats::default, |f| render_frame(f, surface));
    if report.game_over {
        surface.close();
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{EntityTag, Kinematics, TrailComponents};

    fn arena_with_player(position: Vec2) -> (Arena, EntityId) {
        let mut arena = Arena::new();
        let player = arena.spawn(
            Kinematics::new(position, 0.0, 90.0),
            EntityInner::Player(PlayerComponents::default()),
        );
        (arena, player)
    }

    fn primitives_for(frame: &Frame, id: EntityId) -> Vec<&DrawPrimitive> {
        frame
            .items
            .iter()
            .filter(|i| i.entity == Some(id))
            .map(|i| &i.primitive)
            .collect()
    }

    #[derive(Default)]
    struct Recorder {
        drawn: Vec<DrawItem>,
        fail_on: Option<EntityId>,
        hud: Option<Hud>,
        cues: Vec<AudioCue>,
        closed: bool,
    }

    impl PresentationSurface for Recorder {
        fn draw(&mut self, item: &DrawItem) -> Result<(), SurfaceError> {
            if item.entity.is_some() && item.entity == self.fail_on {
                return Err(SurfaceError::Draw("sprite missing".into()));
            }
            self.drawn.push(item.clone());
            Ok(())
        }

        fn hud(&mut self, hud: &Hud) -> Result<(), SurfaceError> {
            self.hud = Some(hud.clone());
            Ok(())
        }

        fn play(&mut self, cue: AudioCue) {
            self.cues.push(cue);
        }

        fn close(&mut self) {
            self.closed = true;
        }
    }

    mod style_tests {
        use super::*;

        #[test]
        fn blur_fades_with_speed() {
            assert_eq!(blur_radius(10.0), 180.0);
            assert_eq!(blur_radius(40.0), 0.0);
            assert_eq!(blur_radius(50.0), 0.0);
            assert_eq!(blur_alpha(10.0), 64);
            assert_eq!(blur_alpha(0.0), 1);
            assert_eq!(blur_alpha(40.0), 255);
            assert_eq!(blur_alpha(-10.0), 0);
        }

        #[test]
        fn trail_alpha_steps_per_second() {
            assert_eq!(trail_alpha(0.0), 255);
            assert_eq!(trail_alpha(0.9), 255);
            assert_eq!(trail_alpha(1.0), 230);
            assert_eq!(trail_alpha(4.99), 155);
        }

        #[test]
        fn torpedo_status_text() {
            assert_eq!(TorpedoStatus::from_cooldown(0.0), TorpedoStatus::Ready);
            assert_eq!(
                TorpedoStatus::from_cooldown(3.26).to_string(),
                "Loading Torpedo (3.3)"
            );
        }

        #[test]
        fn hud_text() {
            let hud = Hud {
                location: Vec2::new(-3.0, 12.0),
                heading: 90.0,
                speed: "Ahead Slow".into(),
                torpedo: TorpedoStatus::Ready,
            };
            assert_eq!(
                hud.to_string(),
                "Vessel Location:\nX: -3.00\nY: 12.00\nHeading: 90\nSpeed: Ahead Slow"
            );
        }
    }

    mod capture_tests {
        use super::*;

        #[test]
        fn no_frame_without_player() {
            let arena = Arena::new();
            assert!(Frame::capture(&arena, EntityId::new(0), &SimConfig::default()).is_none());
        }

        #[test]
        fn hud_reflects_player() {
            let (mut arena, player) = arena_with_player(Vec2::new(-25.0, 129.0));
            if let Some(p) = arena.get_mut(player).and_then(Entity::as_player_mut) {
                p.throttle = 20;
                p.submarine.torpedo_time = 2.0;
            }
            let frame = Frame::capture(&arena, player, &SimConfig::default()).unwrap();
            assert_eq!(frame.hud.location, Vec2::new(-3.0, 12.0));
            assert_eq!(frame.hud.speed, "Ahead Standard");
            assert_eq!(frame.hud.torpedo, TorpedoStatus::Loading(2.0));
        }

        #[test]
        fn hidden_enemy_is_a_jittered_blur() {
            let (mut arena, player) = arena_with_player(Vec2::new(100.0, 100.0));
            let enemy = arena.spawn(
                Kinematics::new(Vec2::new(150.0, 100.0), 10.0, 270.0),
                EntityInner::Enemy(EnemyComponents {
                    offset: Vec2::new(6.0, -3.0),
                    ..EnemyComponents::default()
                }),
            );
            let frame = Frame::capture(&arena, player, &SimConfig::default()).unwrap();
            assert_eq!(
                primitives_for(&frame, enemy),
                vec![&DrawPrimitive::Disc {
                    center: Vec2::new(56.0, -3.0),
                    radius: 180.0,
                    colour: Colour::WHITE.with_alpha(64),
                }]
            );
        }

        #[test]
        fn revealed_enemy_is_a_sprite() {
            let (mut arena, player) = arena_with_player(Vec2::ZERO);
            let enemy = arena.spawn(
                Kinematics::new(Vec2::new(0.0, 50.0), 10.0, 270.0),
                EntityInner::Enemy(EnemyComponents {
                    pinged: true,
                    ..EnemyComponents::default()
                }),
            );
            let frame = Frame::capture(&arena, player, &SimConfig::default()).unwrap();
            assert_eq!(
                primitives_for(&frame, enemy),
                vec![&DrawPrimitive::Sprite {
                    kind: SpriteKind::Enemy,
                    center: Vec2::new(0.0, 50.0),
                    angle: -270.0,
                }]
            );
        }

        #[test]
        fn distant_entities_are_clipped() {
            let (mut arena, player) = arena_with_player(Vec2::ZERO);
            let far = arena.spawn(
                Kinematics::new(Vec2::new(0.0, 290.0), 40.0, 90.0),
                EntityInner::Torpedo(TorpedoComponents::default()),
            );
            let frame = Frame::capture(&arena, player, &SimConfig::default()).unwrap();
            assert!(primitives_for(&frame, far).is_empty());
        }

        #[test]
        fn torpedo_and_explosion_colours() {
            let (mut arena, player) = arena_with_player(Vec2::ZERO);
            let fresh = arena.spawn(
                Kinematics::new(Vec2::new(10.0, 0.0), 40.0, 90.0),
                EntityInner::Torpedo(TorpedoComponents::default()),
            );
            let armed = arena.spawn(
                Kinematics::new(Vec2::new(20.0, 0.0), 40.0, 90.0),
                EntityInner::Torpedo(TorpedoComponents {
                    age: 2.0,
                    ..TorpedoComponents::default()
                }),
            );
            let boom = arena.spawn(
                Kinematics::new(Vec2::new(30.0, 0.0), 0.0, 360.0),
                EntityInner::Explosion(ExplosionComponents { age: 2.0 }),
            );
            let frame = Frame::capture(&arena, player, &SimConfig::default()).unwrap();
            let colour_of = |id| match primitives_for(&frame, id)[0] {
                DrawPrimitive::Disc { colour, radius, .. } => (*colour, *radius),
                other => panic!("unexpected {other:?}"),
            };
            assert_eq!(colour_of(fresh), (Colour::GREEN, 5.0));
            assert_eq!(colour_of(armed), (Colour::BLACK, 5.0));
            assert_eq!(colour_of(boom), (Colour::RED, 10.0));
        }

        #[test]
        fn player_draws_last_with_trails_and_ring() {
            let (mut arena, player) = arena_with_player(Vec2::new(5.0, 5.0));
            let trail = arena.spawn(
                Kinematics::stationary(Vec2::new(5.0, 0.0)),
                EntityInner::Trail(TrailComponents {
                    parent: player,
                    age: 1.5,
                }),
            );
            arena.spawn(
                Kinematics::new(Vec2::new(50.0, 0.0), 10.0, 90.0),
                EntityInner::Enemy(EnemyComponents::default()),
            );
            if let Some(p) = arena.get_mut(player).and_then(Entity::as_player_mut) {
                p.trails.push(trail);
                p.ping_time = 10;
            }

            let frame = Frame::capture(&arena, player, &SimConfig::default()).unwrap();
            let n = frame.items.len();
            assert_eq!(n, 5);
            assert_eq!(
                frame.items[n - 3],
                DrawItem {
                    entity: Some(trail),
                    primitive: DrawPrimitive::Disc {
                        center: Vec2::new(0.0, -5.0),
                        radius: 4.0,
                        colour: Colour::WHITE.with_alpha(230),
                    },
                }
            );
            assert!(matches!(
                frame.items[n - 2].primitive,
                DrawPrimitive::Sprite {
                    kind: SpriteKind::Player,
                    ..
                }
            ));
            assert_eq!(
                frame.items[n - 1].primitive,
                DrawPrimitive::Ring {
                    center: Vec2::ZERO,
                    radius: 50.0,
                    colour: Colour::WHITE,
                }
            );
        }

        #[test]
        fn stale_trail_handles_are_skipped() {
            let (mut arena, player) = arena_with_player(Vec2::ZERO);
            if let Some(p) = arena.get_mut(player).and_then(Entity::as_player_mut) {
                p.trails.push(EntityId::new(99));
            }
            let frame = Frame::capture(&arena, player, &SimConfig::default()).unwrap();
            assert_eq!(arena.count_tag(EntityTag::Trail), 0);
            assert_eq!(frame.items.len(), 2);
        }

        #[test]
        fn destroyed_player_shows_game_over() {
            let (mut arena, player) = arena_with_player(Vec2::ZERO);
            if let Some(e) = arena.get_mut(player) {
                e.kinematics_mut().detonate();
            }
            let frame = Frame::capture(&arena, player, &SimConfig::default()).unwrap();
            assert_eq!(
                primitives_for(&frame, player),
                vec![&DrawPrimitive::Banner {
                    text: "Game Over".into()
                }]
            );
        }
    }

    mod render_tests {
        use super::*;

        #[test]
        fn failing_primitive_does_not_abort_the_frame() {
            let (mut arena, player) = arena_with_player(Vec2::ZERO);
            let a = arena.spawn(
                Kinematics::new(Vec2::new(0.0, 40.0), 10.0, 90.0),
                EntityInner::Enemy(EnemyComponents::default()),
            );
            arena.spawn(
                Kinematics::new(Vec2::new(0.0, 80.0), 10.0, 90.0),
                EntityInner::Enemy(EnemyComponents::default()),
            );
            let frame = Frame::capture(&arena, player, &SimConfig::default()).unwrap();
            let mut surface = Recorder {
                fail_on: Some(a),
                ..Recorder::default()
            };

            let stats = render_frame(&frame, &mut surface);
            assert_eq!(stats, RenderStats { drawn: 3, failed: 1 });
            assert_eq!(surface.drawn.len(), 3);
            assert!(surface.hud.is_some());
            assert!(surface.cues.is_empty());
            assert!(!surface.closed);
        }

        #[test]
        fn present_plays_cues_and_closes_on_game_over() {
            use crate::output::Event;

            let player = EntityId::new(0);
            let report = TickReport {
                tick: 12,
                events: vec![
                    Event::ContactPinged {
                        enemy: EntityId::new(1),
                    },
                    Event::GameOver { player },
                ],
                removed: Vec::new(),
                game_over: true,
            };
            let mut surface = Recorder::default();
            let stats = present(&report, None, &mut surface);

            assert_eq!(stats, RenderStats::default());
            assert_eq!(surface.cues, vec![AudioCue::Ping]);
            assert!(surface.closed);
        }
    }
}

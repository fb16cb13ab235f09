//! Detonation resolver.
//!
//! Applies [`Command::Detonate`]: the contact explodes first, then the
//! scanning entity, then a single explosion marker is spawned at the
//! scanner's position. Exploding stops the entity and sets its terminal
//! `EXPLODED` flag. Enemies and torpedoes are marked for removal; the
//! player stays in the arena and starts its destruction countdown.
//!
//! A party that has already been removed or has already exploded is left
//! alone; the marker and event are still produced for the remaining party.

use tracing::{debug, trace};

use crate::arena::Arena;
use crate::entity::{EntityId, EntityInner, ExplosionComponents, Kinematics};
use crate::math::FULL_TURN;
use crate::output::{Command, Event, Output, OutputKind};

use super::Resolver;

/// Resolver for [`Command::Detonate`].
#[derive(Debug, Default, Clone, Copy)]
pub struct DetonationResolver;

impl Resolver for DetonationResolver {
    fn handles(&self) -> &[OutputKind] {
        &[OutputKind::Command]
    }

    fn resolve(&self, outputs: &[&Output], arena: &mut Arena, events: &mut Vec<Event>) {
        for output in outputs {
            let Some(&Command::Detonate { source, other, at }) = output.as_command() else {
                continue;
            };
            let other_exploded = explode(arena, other);
            let source_exploded = explode(arena, source);
            if !other_exploded && !source_exploded {
                trace!(%source, %other, "both parties already spent");
                continue;
            }
            let explosion = arena.spawn(
                spent_marker(at),
                EntityInner::Explosion(ExplosionComponents::default()),
            );
            debug!(%source, %other, ?at, %explosion, "detonation");
            events.push(Event::Detonation {
                source,
                other,
                at,
                explosion,
            });
        }
    }
}

/// Kinematics for an explosion marker: motionless and already exploded.
fn spent_marker(at: glam::Vec2) -> Kinematics {
    let mut kinematics = Kinematics::new(at, 0.0, FULL_TURN);
    kinematics.detonate();
    kinematics
}

/// Explodes one entity. Returns false if it was missing or already exploded.
fn explode(arena: &mut Arena, id: EntityId) -> bool {
    let Some(entity) = arena.get_mut(id) else {
        trace!(entity = %id, "detonation target already gone");
        return false;
    };
    if !entity.kinematics_mut().detonate() {
        return false;
    }
    if let Some(player) = entity.as_player_mut() {
        player.explosion_time = Some(0.0);
        debug!(player = %id, "player destroyed");
        return true;
    }
    arena.mark_for_removal(id);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{EnemyComponents, Entity, EntityTag, PlayerComponents, TorpedoComponents};
    use glam::Vec2;

    fn detonate(source: EntityId, other: EntityId, at: Vec2) -> Output {
        Output::Command(Command::Detonate { source, other, at })
    }

    #[test]
    fn both_parties_explode_and_one_marker_spawns() {
        let mut arena = Arena::new();
        let a = arena.spawn(
            Kinematics::new(Vec2::ZERO, 10.0, 90.0),
            EntityInner::Enemy(EnemyComponents::default()),
        );
        let b = arena.spawn(
            Kinematics::new(Vec2::new(15.0, 0.0), 40.0, 270.0),
            EntityInner::Torpedo(TorpedoComponents::default()),
        );
        let mut events = Vec::new();
        let output = detonate(a, b, Vec2::ZERO);
        DetonationResolver.resolve(&[&output], &mut arena, &mut events);

        for id in [a, b] {
            let k = arena.get(id).unwrap().kinematics();
            assert!(k.is_exploded());
            assert_eq!(k.speed, 0.0);
            assert!(arena.is_pending_removal(id));
        }
        assert_eq!(arena.count_tag(EntityTag::Explosion), 1);
        let marker = arena.ids_with_tag(EntityTag::Explosion).next().unwrap();
        let marker_kin = arena.get(marker).unwrap().kinematics();
        assert_eq!(marker_kin.position, Vec2::ZERO);
        assert!(marker_kin.is_exploded());
        assert_eq!(
            events,
            vec![Event::Detonation {
                source: a,
                other: b,
                at: Vec2::ZERO,
                explosion: marker
            }]
        );
    }

    #[test]
    fn player_is_not_removed() {
        let mut arena = Arena::new();
        let player = arena.spawn(
            Kinematics::new(Vec2::ZERO, 20.0, 360.0),
            EntityInner::Player(PlayerComponents::default()),
        );
        let enemy = arena.spawn(
            Kinematics::new(Vec2::new(0.0, 10.0), 10.0, 180.0),
            EntityInner::Enemy(EnemyComponents::default()),
        );
        let mut events = Vec::new();
        let output = detonate(player, enemy, Vec2::ZERO);
        DetonationResolver.resolve(&[&output], &mut arena, &mut events);

        assert!(arena.is_live(player));
        let p = arena.get(player).unwrap();
        assert!(p.kinematics().is_exploded());
        assert_eq!(p.as_player().and_then(|c| c.explosion_time), Some(0.0));
        assert!(arena.is_pending_removal(enemy));
    }

    #[test]
    fn spent_parties_do_not_detonate_again() {
        let mut arena = Arena::new();
        let a = arena.spawn(
            Kinematics::new(Vec2::ZERO, 0.0, 90.0),
            EntityInner::Enemy(EnemyComponents::default()),
        );
        let b = arena.spawn(
            Kinematics::new(Vec2::new(5.0, 0.0), 0.0, 90.0),
            EntityInner::Enemy(EnemyComponents::default()),
        );
        let mut events = Vec::new();
        let first = detonate(a, b, Vec2::ZERO);
        let second = detonate(b, a, Vec2::new(5.0, 0.0));
        DetonationResolver.resolve(&[&first, &second], &mut arena, &mut events);

        assert_eq!(events.len(), 1);
        assert_eq!(arena.count_tag(EntityTag::Explosion), 1);
        assert_eq!(arena.compact().len(), 2);
    }

    #[test]
    fn missing_party_is_tolerated() {
        let mut arena = Arena::new();
        let a = arena.spawn(
            Kinematics::new(Vec2::ZERO, 0.0, 90.0),
            EntityInner::Enemy(EnemyComponents::default()),
        );
        let mut events = Vec::new();
        let output = detonate(a, EntityId::new(77), Vec2::ZERO);
        DetonationResolver.resolve(&[&output], &mut arena, &mut events);

        assert!(arena.get(a).is_some_and(|e: &Entity| e.kinematics().is_exploded()));
        assert_eq!(events.len(), 1);
    }
}

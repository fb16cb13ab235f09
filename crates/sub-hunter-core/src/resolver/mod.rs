//! Resolvers apply behavior outputs to the arena.
//!
//! Behaviors only see a read-only view of the world; every change that
//! reaches beyond the updating entity is expressed as an [`Output`] and
//! applied here, immediately after the entity that produced it has been
//! put back into the arena.
//!
//! # Routing
//!
//! Each resolver declares which output kinds it handles via
//! [`Resolver::handles()`]. Outputs are filtered by kind and passed to each
//! resolver in registration order. Resolvers skip outputs of their kind that
//! they do not understand.
//!
//! # Available Resolvers
//!
//! - [`DetonationResolver`]: explodes both parties and spawns the marker
//! - [`LifecycleResolver`]: spawns and despawns entities
//! - [`EventResolver`]: forwards events to the tick report

mod detonation;
mod event;
mod lifecycle;

pub use detonation::DetonationResolver;
pub use event::EventResolver;
pub use lifecycle::{compact, LifecycleResolver};

use crate::arena::Arena;
use crate::output::{Event, Output, OutputKind};

/// Applies outputs to the arena.
///
/// # Example
///
/// ```
/// use sub_hunter_core::arena::Arena;
/// use sub_hunter_core::output::{Event, Output, OutputKind};
/// use sub_hunter_core::resolver::Resolver;
///
/// struct CountingResolver;
///
/// impl Resolver for CountingResolver {
///     fn handles(&self) -> &[OutputKind] {
///         &[OutputKind::Command]
///     }
///
///     fn resolve(&self, outputs: &[&Output], _arena: &mut Arena, _events: &mut Vec<Event>) {
///         assert!(outputs.iter().all(|o| o.kind() == OutputKind::Command));
///     }
/// }
/// ```
pub trait Resolver: Send + Sync {
    /// Returns the output kinds this resolver handles.
    fn handles(&self) -> &[OutputKind];

    /// Applies `outputs` to `arena`, appending any resulting events.
    ///
    /// Must be deterministic given the same arena and output order.
    fn resolve(&self, outputs: &[&Output], arena: &mut Arena, events: &mut Vec<Event>);
}

/// Returns the stock resolvers in application order.
#[must_use]
pub fn default_resolvers() -> Vec<Box<dyn Resolver>> {
    vec![
        Box::new(DetonationResolver),
        Box::new(LifecycleResolver),
        Box::new(EventResolver),
    ]
}

/// Routes `outputs` through `resolvers` by kind.
pub fn apply(
    resolvers: &[Box<dyn Resolver>],
    outputs: &[Output],
    arena: &mut Arena,
    events: &mut Vec<Event>,
) {
    if outputs.is_empty() {
        return;
    }
    for resolver in resolvers {
        let handles = resolver.handles();
        let routed: Vec<&Output> = outputs
            .iter()
            .filter(|o| handles.contains(&o.kind()))
            .collect();
        if !routed.is_empty() {
            resolver.resolve(&routed, arena, events);
        }
    }
}

//! Event resolver: forwards behavior events to the tick report.
//!
//! Does not mutate the arena.

use crate::arena::Arena;
use crate::output::{Event, Output, OutputKind};

use super::Resolver;

/// Resolver that copies event outputs, in order, into the tick's event list.
///
/// # Example
///
/// ```
/// use sub_hunter_core::resolver::{EventResolver, Resolver};
/// use sub_hunter_core::output::OutputKind;
///
/// assert_eq!(EventResolver.handles(), &[OutputKind::Event]);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct EventResolver;

impl Resolver for EventResolver {
    fn handles(&self) -> &[OutputKind] {
        &[OutputKind::Event]
    }

    fn resolve(&self, outputs: &[&Output], _arena: &mut Arena, events: &mut Vec<Event>) {
        events.extend(outputs.iter().filter_map(|o| o.as_event()).cloned());
    }
}

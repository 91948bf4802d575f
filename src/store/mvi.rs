//! Intent/reducer primitives for unidirectional state updates.
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ readers
//! ```
//!
//! - **State**: self-contained snapshot, cloned out to readers
//! - **Intent**: a requested change
//! - **Reducer**: pure function that transforms state based on intents

/// Marker trait for state snapshots.
pub trait State: Clone + PartialEq + Default + Send + Sync + 'static {}

/// Marker trait for intent objects.
pub trait Intent: Send + 'static {}

/// Reducer transforms state based on intents.
///
/// The reducer is the only place where state transitions happen.
/// It must be a pure function: (State, Intent) -> State
pub trait Reducer {
    type State: State;
    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}

//! Global payload store.
//!
//! Holds a single untyped value, initially `null`. The only mutation is
//! [`StoreIntent::SetPayload`], which replaces the value wholesale. Writes
//! are visible to every reader as soon as the call returns.

pub mod mvi;

use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use serde_json::Value;

use mvi::{Intent, Reducer, State};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StoreState {
    pub payload: Value,
    /// Number of committed intents. Lets readers notice a change cheaply.
    pub version: u64,
}

impl State for StoreState {}

#[derive(Debug, Clone)]
pub enum StoreIntent {
    /// Replace the payload. No merging, no validation.
    SetPayload(Value),
}

impl Intent for StoreIntent {}

pub struct PayloadReducer;

impl Reducer for PayloadReducer {
    type State = StoreState;
    type Intent = StoreIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            StoreIntent::SetPayload(payload) => StoreState {
                payload,
                version: state.version + 1,
            },
        }
    }
}

/// Shared handle to the store. Clones point at the same state.
#[derive(Clone, Default)]
pub struct Store {
    inner: Arc<RwLock<StoreState>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an intent through the reducer.
    pub fn commit(&self, intent: StoreIntent) {
        let mut guard = self.inner.write();
        let state = std::mem::take(&mut *guard);
        *guard = PayloadReducer::reduce(state, intent);
        tracing::debug!(version = guard.version, "store updated");
    }

    pub fn set_payload(&self, payload: Value) {
        self.commit(StoreIntent::SetPayload(payload));
    }

    /// Serialize `value` and store it as the payload.
    pub fn set_payload_from<T: Serialize>(&self, value: &T) -> Result<(), serde_json::Error> {
        let payload = serde_json::to_value(value)?;
        self.set_payload(payload);
        Ok(())
    }

    pub fn payload(&self) -> Value {
        self.inner.read().payload.clone()
    }

    pub fn version(&self) -> u64 {
        self.inner.read().version
    }

    pub fn snapshot(&self) -> StoreState {
        self.inner.read().clone()
    }
}

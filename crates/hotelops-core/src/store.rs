// ── Generation-guarded result slots ──
//
// A fetch takes a `Ticket` before it starts and hands it back with the
// result. The result is only stored if no newer fetch began and the slot
// was not reset in the meantime, so a slow response can never overwrite a
// fresher one.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::warn;

/// Proof that a fetch started at a given generation.
#[derive(Debug)]
#[must_use = "a ticket must be handed back to `Slot::apply`"]
pub struct Ticket {
    generation: u64,
}

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

struct SlotState<T> {
    generation: u64,
    value: Option<Arc<T>>,
}

/// Latest-wins holder for one piece of fetched state.
pub struct Slot<T> {
    name: &'static str,
    state: watch::Sender<SlotState<T>>,
}

impl<T> Slot<T> {
    pub fn new(name: &'static str) -> Self {
        let (state, _) = watch::channel(SlotState {
            generation: 0,
            value: None,
        });
        Self { name, state }
    }

    /// Start a fetch. Any ticket issued earlier becomes stale.
    pub fn begin(&self) -> Ticket {
        let mut generation = 0;
        self.state.send_modify(|s| {
            s.generation += 1;
            generation = s.generation;
        });
        Ticket { generation }
    }

    /// Store `value` if `ticket` is still current. Returns `false` and drops
    /// the value when a newer fetch or a reset happened since.
    pub fn apply(&self, ticket: Ticket, value: impl Into<Arc<T>>) -> bool {
        let mut value = Some(value.into());
        let applied = self.state.send_if_modified(|s| {
            if s.generation == ticket.generation {
                s.value = value.take();
                true
            } else {
                false
            }
        });
        if !applied {
            warn!(
                slot = self.name,
                ticket = ticket.generation,
                "dropping stale result"
            );
        }
        applied
    }

    /// Forget the stored value and invalidate outstanding tickets.
    pub fn reset(&self) {
        self.state.send_modify(|s| {
            s.generation += 1;
            s.value = None;
        });
    }

    /// The most recently applied value.
    pub fn latest(&self) -> Option<Arc<T>> {
        self.state.borrow().value.clone()
    }

    pub fn generation(&self) -> u64 {
        self.state.borrow().generation
    }
}

impl<T> std::fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Slot")
            .field("name", &self.name)
            .field("generation", &state.generation)
            .field("filled", &state.value.is_some())
            .finish()
    }
}

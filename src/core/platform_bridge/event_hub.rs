//=========================================================================
// Event Hub
//=========================================================================
//
// Fans platform events out to any number of input listeners.
//
// Architecture:
// ```text
//   Platform ──dispatch()──► EventHub ──try_send──► Sender ─┐
//                               │                           │ bounded
//                               └─ attach() ──► InputListener(Receiver)
//                                                    │
//                                                    └─ poll(&mut InputState)
// ```
//
// Registration is explicit: `attach()` returns an owner handle, and
// dropping that handle unregisters it. Listeners whose receiver has gone
// away are also pruned on the next dispatch.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError, TrySendError};
use log::{debug, trace, warn};

//=== Internal Dependencies ===============================================

use super::{PlatformEvent, TickControl};
use crate::core::input::InputState;

//=== ListenerId ==========================================================

/// Identity of one hub registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

//=== EventHub ============================================================

/// Shared registry of input listeners.
///
/// Cloning is cheap and every clone refers to the same registry. The hub
/// is `Send + Sync`; listeners may attach from any thread.
#[derive(Clone)]
pub struct EventHub {
    inner: Arc<Mutex<HubInner>>,
}

struct HubInner {
    next_id: u64,
    capacity: usize,
    subscribers: Vec<Subscriber>,
}

struct Subscriber {
    id: ListenerId,
    sender: Sender<PlatformEvent>,
}

impl EventHub {
    //--- Construction -----------------------------------------------------

    /// Creates a hub whose listeners buffer up to `capacity` events each.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");

        Self {
            inner: Arc::new(Mutex::new(HubInner {
                next_id: 0,
                capacity,
                subscribers: Vec::new(),
            })),
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers a new listener and returns its owner handle.
    pub fn attach(&self) -> InputListener {
        let mut inner = self.lock();

        let id = ListenerId(inner.next_id);
        inner.next_id += 1;

        let (sender, receiver) = bounded(inner.capacity);
        inner.subscribers.push(Subscriber { id, sender });

        debug!(
            target: "input",
            "Listener {:?} attached ({} total)",
            id,
            inner.subscribers.len()
        );

        InputListener {
            id,
            receiver,
            hub: Arc::downgrade(&self.inner),
        }
    }

    /// Number of currently registered listeners.
    pub fn listener_count(&self) -> usize {
        self.lock().subscribers.len()
    }

    //--- Dispatch ---------------------------------------------------------

    /// Sends `event` to every listener; returns how many received it.
    ///
    /// Never blocks. A listener whose buffer is full misses this event
    /// (logged); a listener whose receiver is gone is unregistered.
    pub fn dispatch(&self, event: PlatformEvent) -> usize {
        let mut inner = self.lock();
        let mut delivered = 0;

        inner.subscribers.retain(|subscriber| {
            match subscriber.sender.try_send(event.clone()) {
                Ok(()) => {
                    delivered += 1;
                    true
                }
                Err(TrySendError::Full(_)) => {
                    warn!(
                        target: "input",
                        "Listener {:?} is full, dropping event",
                        subscriber.id
                    );
                    true
                }
                Err(TrySendError::Disconnected(_)) => {
                    debug!(
                        target: "input",
                        "Listener {:?} disconnected, pruning",
                        subscriber.id
                    );
                    false
                }
            }
        });

        trace!(target: "input", "Dispatched event to {} listeners", delivered);
        delivered
    }

    //--- Internal Helpers -------------------------------------------------

    fn lock(&self) -> MutexGuard<'_, HubInner> {
        lock_hub(&self.inner)
    }
}

/// Locks the registry, recovering from a poisoned mutex (the registry is
/// a plain list and stays consistent across a panicking holder).
fn lock_hub(inner: &Mutex<HubInner>) -> MutexGuard<'_, HubInner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

//=== InputListener =======================================================

/// Owner handle of one hub registration.
///
/// Dropping it unregisters the listener. Once the hub itself has been
/// dropped (every `EventHub` clone gone), `poll` reports
/// [`TickControl::Exit`].
pub struct InputListener {
    id: ListenerId,
    receiver: Receiver<PlatformEvent>,
    hub: Weak<Mutex<HubInner>>,
}

impl InputListener {
    /// Upper bound on events drained per `poll`, to avoid starving the
    /// caller when the platform floods the channel.
    pub const MAX_EVENTS_PER_POLL: usize = 100;

    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Drains pending events into `state`.
    ///
    /// Returns [`TickControl::Exit`] when the window was closed or the hub
    /// is gone, [`TickControl::Continue`] otherwise.
    pub fn poll(&self, state: &mut InputState) -> TickControl {
        let mut drained = 0;

        while drained < Self::MAX_EVENTS_PER_POLL {
            match self.receiver.try_recv() {
                Ok(PlatformEvent::Inputs { discrete, continuous }) => {
                    state.apply_all(&discrete);
                    state.apply_all(&continuous);
                    drained += 1;
                }
                Ok(PlatformEvent::WindowClosed) => return TickControl::Exit,
                Err(TryRecvError::Disconnected) => return TickControl::Exit,
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= Self::MAX_EVENTS_PER_POLL {
            warn!(target: "input", "Event queue backlog: drained {} batches this poll", drained);
        }

        TickControl::Continue
    }

    /// Unregisters explicitly (same as dropping).
    pub fn detach(self) {
        drop(self);
    }
}

impl Drop for InputListener {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade() {
            let mut inner = lock_hub(&hub);
            inner.subscribers.retain(|subscriber| subscriber.id != self.id);
            debug!(
                target: "input",
                "Listener {:?} detached ({} remaining)",
                self.id,
                inner.subscribers.len()
            );
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

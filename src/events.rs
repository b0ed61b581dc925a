//! Button events raised from interrupt context, and debouncing.
//!
//! Edge-triggered button handlers must stay short: they may not draw, block
//! or touch game state directly. Instead each handler stamps the edge with
//! the current time and pushes an [`InputEvent`] into an [`EventQueue`].
//! The main loop drains the queue once per frame and is the only code that
//! mutates the game.
//!
//! ```text
//!  shoot IRQ ──┐
//!              ├──► EventQueue (lock-free, bounded) ──► main loop (drain per frame)
//!  mode IRQ ───┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use rs_bunkers::events::{Debouncer, EventKind, EventQueue, InputEvent};
//!
//! static EVENTS: EventQueue = EventQueue::new();
//!
//! // Inside an interrupt handler
//! EVENTS.push(InputEvent::new(EventKind::Shoot, 1200));
//!
//! // In the main loop
//! let mut drained = 0;
//! EVENTS.drain(|event| {
//!     assert_eq!(event.kind, EventKind::Shoot);
//!     drained += 1;
//! });
//! assert_eq!(drained, 1);
//!
//! let mut debounce = Debouncer::new(300);
//! assert!(debounce.accept(1000));
//! assert!(!debounce.accept(1100));
//! assert!(debounce.accept(1400));
//! ```

use heapless::mpmc::MpMcQueue;

/// Capacity of the event queue. Must be a power of two.
pub const EVENT_QUEUE_CAPACITY: usize = 16;

/// Which control raised the event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    /// Shoot button pressed.
    Shoot,
    /// Joystick SW pressed: toggle gyro/joystick control.
    ModeSwitch,
}

/// A button edge stamped with the time it happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputEvent {
    /// Which control fired.
    pub kind: EventKind,
    /// Clock reading at the edge, in milliseconds.
    pub at_ms: u64,
}

impl InputEvent {
    /// Creates a new event.
    #[inline]
    pub const fn new(kind: EventKind, at_ms: u64) -> Self {
        Self { kind, at_ms }
    }
}

/// Bounded multi-producer queue shared between interrupt handlers and the
/// main loop.
///
/// `push` never blocks. When the queue is full the event is dropped, the
/// same as a missed edge.
pub struct EventQueue {
    inner: MpMcQueue<InputEvent, EVENT_QUEUE_CAPACITY>,
}

impl EventQueue {
    /// Creates an empty queue. Usable in `static` items.
    pub const fn new() -> Self {
        Self {
            inner: MpMcQueue::new(),
        }
    }

    /// Enqueues an event. Returns false if it was dropped because the
    /// queue is full.
    #[inline]
    pub fn push(&self, event: InputEvent) -> bool {
        self.inner.enqueue(event).is_ok()
    }

    /// Dequeues the oldest event.
    #[inline]
    pub fn pop(&self) -> Option<InputEvent> {
        self.inner.dequeue()
    }

    /// Hands every queued event to `f`, oldest first.
    pub fn drain<F: FnMut(InputEvent)>(&self, mut f: F) {
        while let Some(event) = self.pop() {
            f(event);
        }
    }

    /// Discards every queued event.
    pub fn clear(&self) {
        while self.pop().is_some() {}
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Rejects events closer than a fixed window to the last accepted one.
///
/// Mechanical buttons bounce, producing several edges per press. Only the
/// first edge of a burst is accepted. The first event ever seen is always
/// accepted.
#[derive(Clone, Copy, Debug)]
pub struct Debouncer {
    window_ms: u64,
    last_accepted: Option<u64>,
}

impl Debouncer {
    /// Creates a debouncer with the given window.
    pub const fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            last_accepted: None,
        }
    }

    /// Returns true and records `at_ms` if the event is outside the window.
    pub fn accept(&mut self, at_ms: u64) -> bool {
        if let Some(last) = self.last_accepted {
            if at_ms.saturating_sub(last) <= self.window_ms {
                return false;
            }
        }
        self.last_accepted = Some(at_ms);
        true
    }

    /// The debounce window in milliseconds.
    #[inline]
    pub const fn window_ms(&self) -> u64 {
        self.window_ms
    }
}

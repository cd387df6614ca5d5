//! Per-frame tick source with handle-based subscriptions.
//!
//! The host drives a [`Ticker`] once per frame. Subscribers register with
//! [`Ticker::add`], which returns a [`TickHandle`]; unsubscribing consumes
//! the handle, so there is never any ambiguity about which registration is
//! being removed.

use std::cell::RefCell;
use std::rc::Rc;

/// Timing information passed to per-frame callbacks.
#[derive(Clone, Copy, Debug)]
pub struct Tick {
    /// Seconds since the previous tick.
    pub delta: f32,
    /// Seconds since the ticker was created.
    pub elapsed: f64,
}

/// Subscription token returned by [`Ticker::add`].
///
/// Not cloneable: passing it to [`Ticker::remove`] consumes the
/// subscription.
#[derive(Debug)]
pub struct TickHandle(u64);

type TickFn = Rc<RefCell<dyn FnMut(&Tick)>>;

struct TickerInner {
    next_id: u64,
    subscribers: Vec<(u64, TickFn)>,
    elapsed: f64,
}

/// A shared per-frame tick source.
///
/// Clones refer to the same ticker. Dispatch runs over a snapshot of the
/// subscriber list, so callbacks may subscribe or unsubscribe (including
/// themselves) mid-tick; such changes take effect on the next tick.
#[derive(Clone)]
pub struct Ticker {
    inner: Rc<RefCell<TickerInner>>,
}

impl Ticker {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(TickerInner {
                next_id: 0,
                subscribers: Vec::new(),
                elapsed: 0.0,
            })),
        }
    }

    /// Subscribe a per-frame callback. The returned handle is the only way
    /// to unsubscribe it.
    pub fn add(&self, callback: impl FnMut(&Tick) + 'static) -> TickHandle {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner
            .subscribers
            .push((id, Rc::new(RefCell::new(callback))));
        TickHandle(id)
    }

    /// Unsubscribe, consuming the handle.
    pub fn remove(&self, handle: TickHandle) {
        self.inner
            .borrow_mut()
            .subscribers
            .retain(|(id, _)| *id != handle.0);
    }

    /// Advance time by `delta` seconds and dispatch to every subscriber.
    pub fn tick(&self, delta: f32) {
        let (tick, callbacks) = {
            let mut inner = self.inner.borrow_mut();
            inner.elapsed += delta as f64;
            let tick = Tick {
                delta,
                elapsed: inner.elapsed,
            };
            let callbacks: Vec<TickFn> = inner
                .subscribers
                .iter()
                .map(|(_, callback)| callback.clone())
                .collect();
            (tick, callbacks)
        };
        for callback in callbacks {
            (&mut *callback.borrow_mut())(&tick);
        }
    }

    /// Seconds accumulated across all ticks so far.
    pub fn elapsed(&self) -> f64 {
        self.inner.borrow().elapsed
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new()
    }
}

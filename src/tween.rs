//! Ticker-driven animation helpers for scene entry/exit futures.
//!
//! `show`/`hide` hand the director a future that resolves when the animation
//! finishes; the animation itself is advanced by the host's [`Ticker`]. This
//! module covers the common cases: [`Tween`] for alpha fades over a
//! [`DisplayNode`], and [`Gate`] when the completion condition is custom
//! logic.

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

use crate::display::DisplayNode;
use crate::scene::SceneFuture;
use crate::ticker::{TickHandle, Ticker};

/// Easing functions for animation curves.
#[derive(Clone, Copy, Debug, Default)]
pub enum Easing {
    /// Constant speed throughout.
    #[default]
    Linear,
    /// Start slow, accelerate.
    EaseIn,
    /// Start fast, decelerate.
    EaseOut,
    /// Start slow, speed up, then slow down.
    EaseInOut,
}

impl Easing {
    /// Apply the easing function to a linear progress value (0.0 to 1.0).
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

#[derive(Default)]
struct GateState {
    open: bool,
    waker: Option<Waker>,
}

/// A manually completed [`SceneFuture`].
///
/// Hand [`wait`](Gate::wait) to the director and call [`open`](Gate::open)
/// when your animation finishes:
///
/// ```ignore
/// fn hide(&mut self) -> Option<SceneFuture> {
///     let gate = Gate::new();
///     self.start_exit_effect(gate.clone());
///     Some(gate.wait())
/// }
/// ```
///
/// One pending waiter at a time is supported.
#[derive(Clone, Default)]
pub struct Gate {
    state: Rc<RefCell<GateState>>,
}

impl Gate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Future that resolves once [`open`](Gate::open) has been called.
    pub fn wait(&self) -> SceneFuture {
        Box::pin(GateFuture {
            state: self.state.clone(),
        })
    }

    /// Complete the pending future. Idempotent.
    pub fn open(&self) {
        let mut state = self.state.borrow_mut();
        state.open = true;
        if let Some(waker) = state.waker.take() {
            waker.wake();
        }
    }

    pub fn is_open(&self) -> bool {
        self.state.borrow().open
    }
}

struct GateFuture {
    state: Rc<RefCell<GateState>>,
}

impl Future for GateFuture {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let mut state = self.state.borrow_mut();
        if state.open {
            Poll::Ready(())
        } else {
            state.waker = Some(cx.waker().clone());
            Poll::Pending
        }
    }
}

/// An alpha fade over a [`DisplayNode`], advanced by a [`Ticker`].
///
/// # Example
///
/// ```ignore
/// fn show(&mut self) -> Option<SceneFuture> {
///     Some(
///         Tween::alpha(&self.view, 0.0, 1.0, 0.3)
///             .easing(Easing::EaseOut)
///             .run(&self.ticker),
///     )
/// }
/// ```
pub struct Tween {
    node: DisplayNode,
    from: f32,
    to: f32,
    duration: f32,
    easing: Easing,
}

impl Tween {
    /// Fade `node` from `from` to `to` alpha over `duration` seconds.
    pub fn alpha(node: &DisplayNode, from: f32, to: f32, duration: f32) -> Self {
        Self {
            node: node.clone(),
            from,
            to,
            duration,
            easing: Easing::default(),
        }
    }

    /// Set the easing curve (default: linear).
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Subscribe to `ticker` and return a future that resolves once the
    /// target value is reached. The starting value is applied immediately;
    /// zero or negative durations complete on the first tick.
    pub fn run(self, ticker: &Ticker) -> SceneFuture {
        let Tween {
            node,
            from,
            to,
            duration,
            easing,
        } = self;

        let gate = Gate::new();
        let done = gate.clone();
        // The callback needs its own handle to unsubscribe itself, which
        // only exists after `add` returns.
        let slot: Rc<RefCell<Option<TickHandle>>> = Rc::new(RefCell::new(None));

        node.set_alpha(from);
        let handle = ticker.add({
            let ticker = ticker.clone();
            let slot = slot.clone();
            let mut t = 0.0f32;
            move |tick| {
                t += tick.delta;
                let progress = if duration <= 0.0 {
                    1.0
                } else {
                    (t / duration).clamp(0.0, 1.0)
                };
                node.set_alpha(from + (to - from) * easing.apply(progress));
                if progress >= 1.0 {
                    if let Some(handle) = slot.borrow_mut().take() {
                        ticker.remove(handle);
                    }
                    done.open();
                }
            }
        });
        *slot.borrow_mut() = Some(handle);

        gate.wait()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::task::Waker;

    fn poll_once(future: &mut SceneFuture) -> Poll<()> {
        let mut cx = Context::from_waker(Waker::noop());
        future.as_mut().poll(&mut cx)
    }

    #[test]
    fn easing_curves_hit_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
        ] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
            // Out-of-range input clamps.
            assert_eq!(easing.apply(2.0), 1.0);
            assert_eq!(easing.apply(-1.0), 0.0);
        }
    }

    #[test]
    fn ease_in_lags_ease_out() {
        let t = 0.25;
        assert!(Easing::EaseIn.apply(t) < Easing::Linear.apply(t));
        assert!(Easing::EaseOut.apply(t) > Easing::Linear.apply(t));
    }

    #[test]
    fn gate_resolves_after_open() {
        let gate = Gate::new();
        let mut future = gate.wait();

        assert_eq!(poll_once(&mut future), Poll::Pending);
        gate.open();
        assert!(gate.is_open());
        assert_eq!(poll_once(&mut future), Poll::Ready(()));
    }

    #[test]
    fn tween_drives_alpha_and_resolves() {
        let ticker = Ticker::new();
        let node = DisplayNode::new("fade");
        node.set_alpha(1.0);

        let mut future = Tween::alpha(&node, 0.0, 1.0, 0.2).run(&ticker);
        assert_eq!(node.alpha(), 0.0);
        assert_eq!(poll_once(&mut future), Poll::Pending);

        ticker.tick(0.1);
        assert!((node.alpha() - 0.5).abs() < 1e-5);
        assert_eq!(poll_once(&mut future), Poll::Pending);

        ticker.tick(0.1);
        assert_eq!(node.alpha(), 1.0);
        assert_eq!(poll_once(&mut future), Poll::Ready(()));
        // The tween unsubscribed itself.
        assert_eq!(ticker.subscriber_count(), 0);
    }

    #[test]
    fn zero_duration_tween_completes_on_first_tick() {
        let ticker = Ticker::new();
        let node = DisplayNode::new("pop");

        let mut future = Tween::alpha(&node, 1.0, 0.0, 0.0).run(&ticker);
        ticker.tick(0.016);
        assert_eq!(node.alpha(), 0.0);
        assert_eq!(poll_once(&mut future), Poll::Ready(()));
    }
}

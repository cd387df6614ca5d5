//! Minimal single-threaded task queue for frame loops.
//!
//! Transition futures need polling while the host keeps ticking: a gated
//! transition only makes progress when [`Ticker::tick`](crate::Ticker::tick)
//! advances the animations and loads it is waiting on. [`LocalTasks`] holds
//! spawned futures and polls each once per [`pump`](LocalTasks::pump), so a
//! frame loop interleaves them with ticks:
//!
//! ```ignore
//! tasks.spawn(async move {
//!     if let Err(err) = director.go_to_scene::<TitleScene>(None).await {
//!         log::error!("transition failed: {err}");
//!     }
//! });
//! loop {
//!     ticker.tick(dt);
//!     tasks.pump();
//! }
//! ```
//!
//! When nothing has to happen between suspension points,
//! `pollster::block_on` is the simpler entry.

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

type LocalFuture = Pin<Box<dyn Future<Output = ()>>>;

/// A poll-per-pump queue of futures. Clones share the queue.
#[derive(Clone, Default)]
pub struct LocalTasks {
    queue: Rc<RefCell<Vec<LocalFuture>>>,
}

impl LocalTasks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a future. It is first polled on the next `pump`.
    pub fn spawn(&self, future: impl Future<Output = ()> + 'static) {
        self.queue.borrow_mut().push(Box::pin(future));
    }

    /// Poll every queued task once, dropping those that complete. Call once
    /// per frame after `Ticker::tick`. Tasks spawned from inside a task run
    /// on the next pump.
    pub fn pump(&self) {
        let mut active = std::mem::take(&mut *self.queue.borrow_mut());
        let mut cx = Context::from_waker(Waker::noop());
        active.retain_mut(|task| task.as_mut().poll(&mut cx) == Poll::Pending);
        self.queue.borrow_mut().extend(active);
    }

    /// Number of tasks still pending.
    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tween::Gate;
    use std::cell::Cell;

    #[test]
    fn ready_tasks_complete_on_first_pump() {
        let tasks = LocalTasks::new();
        let ran = Rc::new(Cell::new(false));

        let flag = ran.clone();
        tasks.spawn(async move { flag.set(true) });
        assert_eq!(tasks.len(), 1);

        tasks.pump();
        assert!(ran.get());
        assert!(tasks.is_empty());
    }

    #[test]
    fn pending_tasks_survive_pumps_until_unblocked() {
        let tasks = LocalTasks::new();
        let gate = Gate::new();

        let wait = gate.wait();
        tasks.spawn(async move { wait.await });

        tasks.pump();
        tasks.pump();
        assert_eq!(tasks.len(), 1);

        gate.open();
        tasks.pump();
        assert!(tasks.is_empty());
    }

    #[test]
    fn tasks_spawned_mid_pump_run_next_pump() {
        let tasks = LocalTasks::new();
        let ran = Rc::new(Cell::new(false));

        let inner_tasks = tasks.clone();
        let flag = ran.clone();
        tasks.spawn(async move {
            inner_tasks.spawn(async move { flag.set(true) });
        });

        tasks.pump();
        assert!(!ran.get());
        tasks.pump();
        assert!(ran.get());
    }
}

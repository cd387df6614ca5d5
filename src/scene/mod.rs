//! Scene and overlay lifecycle management.
//!
//! This module is the heart of the crate: the [`SceneDirector`] decides
//! which scene and overlay are live, and sequences the asynchronous work
//! around switching them.
//!
//! # The transition protocol
//!
//! The primary and overlay slots run the same protocol, with every stage
//! fully awaited before the next begins:
//!
//! 1. **Teardown.** The current occupant's `hide` animation is awaited, its
//!    tick subscription is consumed, and its view is detached. The instance
//!    stays cached for reuse.
//! 2. **Asset gate.** If the target declares bundles that are not resident,
//!    the shared loading scene (when configured) occupies the slot while
//!    the [`BundleProvider`](crate::BundleProvider) loads them. A load
//!    failure removes the loading scene, leaves the slot empty, and
//!    propagates to the caller; the target is never shown.
//! 3. **Prepare.** The registry instance is looked up or lazily built, then
//!    `prepare` runs with the caller's payload on every attach, reused
//!    instance or not.
//! 4. **Attach.** The view joins the slot's layer, the resize binding fires
//!    with current dimensions, `update` is subscribed, and the `show`
//!    animation is awaited.
//!
//! Ticks keep flowing to every *other* subscribed scene while a transition
//! is suspended; the transitioning slot's scene is simply absent from the
//! ticker between teardown and attach.
//!
//! # Caller contract
//!
//! Transitions on the same slot are rejected while one is in flight
//! ([`DirectorError::SlotBusy`]); transitions on different slots are
//! independent. There is no cancellation: poll every transition future to
//! completion.
//!
//! # Example
//!
//! ```ignore
//! use proscenium::{App, DirectorOptions, SceneDirector};
//!
//! let app = App::new();
//! let director = SceneDirector::new();
//! director.initialize(DirectorOptions::new(app.clone()));
//!
//! pollster::block_on(director.go_to_scene::<TitleScene>(None))?;
//! app.ticker().tick(1.0 / 60.0);
//! ```

mod director;
mod scene;

pub use director::{DirectorError, DirectorOptions, SceneDirector, SlotKind};
pub use scene::{Scene, SceneFuture, SceneKind, ScenePayload, SharedScene};

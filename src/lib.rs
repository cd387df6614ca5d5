//! # Proscenium
//!
//! **Scene and overlay lifecycle management for real-time applications.**
//!
//! Proscenium decides which scene is on stage, sequences show/hide
//! animations and asset loading around scene switches, and fans a single
//! per-frame tick out to whatever is currently live. Rendering stays yours:
//! the crate manages a lightweight display tree the host mirrors, not
//! pixels.
//!
//! ## Quick Start
//!
//! ```no_run
//! use proscenium::{App, DirectorOptions, DisplayNode, Scene, SceneDirector, SceneKind};
//!
//! struct TitleScene {
//!     view: DisplayNode,
//! }
//!
//! impl Scene for TitleScene {
//!     fn view(&self) -> &DisplayNode {
//!         &self.view
//!     }
//! }
//!
//! impl SceneKind for TitleScene {
//!     const SCENE_ID: &'static str = "title";
//!
//!     fn create(_app: &App) -> Self {
//!         Self { view: DisplayNode::new("title") }
//!     }
//! }
//!
//! let app = App::new();
//! let director = SceneDirector::new();
//! director.initialize(DirectorOptions::new(app.clone()));
//!
//! pollster::block_on(director.go_to_scene::<TitleScene>(None)).unwrap();
//! app.ticker().tick(1.0 / 60.0);
//! ```
//!
//! ## Philosophy
//!
//! - **One instance per scene type** — scenes are registered lazily and
//!   reused; `prepare` re-runs on every visit.
//! - **Animations are futures** — `show`/`hide` return completion futures
//!   the director awaits, while ticks keep flowing to everything else.
//! - **Explicit handles** — tick subscriptions are tokens, the director is
//!   a passed-around value, and there is no global state.
//! - **Bring your own renderer** — [`DisplayNode`] is the thin seam between
//!   lifecycle and drawing.

mod app;
mod assets;
mod display;
pub mod scene;
mod tasks;
mod ticker;
pub mod tween;

pub use app::App;
pub use assets::{BundleError, BundleProvider, LoadFuture, PreloadedBundles};
pub use display::DisplayNode;
pub use scene::{
    DirectorError, DirectorOptions, Scene, SceneDirector, SceneFuture, SceneKind, ScenePayload,
    SharedScene, SlotKind,
};
pub use tasks::LocalTasks;
pub use ticker::{Tick, TickHandle, Ticker};
pub use tween::{Easing, Gate, Tween};

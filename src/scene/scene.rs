//! The scene capability contract.

use std::any::Any;
use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use crate::app::App;
use crate::display::DisplayNode;
use crate::ticker::Tick;

/// Future resolved when an entry or exit animation completes.
pub type SceneFuture = Pin<Box<dyn Future<Output = ()>>>;

/// Payload handed to [`Scene::prepare`] on attach.
pub type ScenePayload = Box<dyn Any>;

/// Shared handle to a scene instance, as stored in the director's registry.
pub type SharedScene = Rc<RefCell<dyn Scene>>;

/// A unit of displayable content managed by the
/// [`SceneDirector`](crate::SceneDirector).
///
/// Only [`view`](Scene::view) is required. The other hooks default to
/// no-ops, and `show`/`hide` to `None`, which the director treats as an
/// instantaneous animation; a scene implements exactly the lifecycle it
/// cares about.
///
/// Futures returned by `show`/`hide` must not borrow the scene: start the
/// animation in the method body (typically a [`Tween`](crate::tween::Tween)
/// against the scene's view, or custom state advanced by `update`) and
/// return a completion future. The director keeps ticking the scene while
/// the future is pending, so `update` continues to run during the scene's
/// own animations.
pub trait Scene {
    /// The scene's root display node. Attached to a slot layer while the
    /// scene is live.
    fn view(&self) -> &DisplayNode;

    /// Synchronous initialization, invoked once per attach before the view
    /// joins its layer. `payload` is whatever the caller passed to the
    /// triggering transition; reused instances see it again on every attach.
    fn prepare(&mut self, _payload: Option<ScenePayload>) {}

    /// Entry animation; resolves when the scene is fully presented.
    fn show(&mut self) -> Option<SceneFuture> {
        None
    }

    /// Exit animation; resolves when the scene is safe to detach.
    fn hide(&mut self) -> Option<SceneFuture> {
        None
    }

    /// Per-frame hook. Runs while the scene is attached, including during
    /// its own `show`/`hide` animations.
    fn update(&mut self, _tick: &Tick) {}

    /// Viewport change. Also invoked once at attach with the dimensions the
    /// director last saw, so the scene lays out before its first paint.
    fn resize(&mut self, _width: f32, _height: f32) {}

    /// Release owned resources. Invoked only at director shutdown.
    fn destroy(&mut self) {}
}

/// Static half of the scene contract: identity, asset requirements, and
/// construction.
///
/// The director's registry caches one instance per [`SCENE_ID`]; the
/// instance is built lazily on first transition and reused afterwards.
///
/// [`SCENE_ID`]: SceneKind::SCENE_ID
///
/// # Example
///
/// ```ignore
/// struct GameScene {
///     view: DisplayNode,
/// }
///
/// impl SceneKind for GameScene {
///     const SCENE_ID: &'static str = "game";
///     const ASSET_BUNDLES: &'static [&'static str] = &["game"];
///
///     fn create(_app: &App) -> Self {
///         Self { view: DisplayNode::new("game") }
///     }
/// }
/// ```
pub trait SceneKind: Scene + Sized + 'static {
    /// Stable identifier, unique per scene type. Registry key.
    const SCENE_ID: &'static str;

    /// Bundles that must be resident before the scene is first displayed.
    const ASSET_BUNDLES: &'static [&'static str] = &[];

    /// Construct the single reusable instance. `app` carries the host
    /// handles (ticker, stage, bundles) a scene may keep for its animations.
    fn create(app: &App) -> Self;
}

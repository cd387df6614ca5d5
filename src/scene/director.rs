//! The scene director: two slot state machines and the transition protocol.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use thiserror::Error;

use super::scene::{Scene, SceneKind, ScenePayload, SharedScene};
use crate::app::App;
use crate::assets::BundleError;
use crate::display::DisplayNode;
use crate::ticker::{Tick, TickHandle};

/// Which of the director's two slots a transition targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotKind {
    /// The main scene layer.
    Primary,
    /// The layer rendered above the primary scene.
    Overlay,
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotKind::Primary => write!(f, "primary"),
            SlotKind::Overlay => write!(f, "overlay"),
        }
    }
}

/// Errors surfaced by director operations.
#[derive(Debug, Error)]
pub enum DirectorError {
    /// An operation other than `initialize` ran before setup or after
    /// shutdown.
    #[error("scene director is not initialized")]
    NotInitialized,
    /// A transition was issued on a slot whose previous transition has not
    /// resolved yet.
    #[error("{slot} slot is busy with an in-flight transition")]
    SlotBusy { slot: SlotKind },
    /// Bundle loading failed; the slot was left without an occupant.
    #[error("asset load failed: {0}")]
    AssetLoad(#[from] BundleError),
}

/// Configuration for [`SceneDirector::initialize`].
pub struct DirectorOptions {
    app: App,
    parent: Option<DisplayNode>,
    loading_scene: Option<SharedScene>,
}

impl DirectorOptions {
    pub fn new(app: App) -> Self {
        Self {
            app,
            parent: None,
            loading_scene: None,
        }
    }

    /// Container the director's layers are added to (default: the app
    /// stage).
    pub fn parent(mut self, container: &DisplayNode) -> Self {
        self.parent = Some(container.clone());
        self
    }

    /// Shared scene displayed while a transition waits on asset bundles.
    pub fn loading_scene<S: Scene + 'static>(mut self, scene: S) -> Self {
        self.loading_scene = Some(Rc::new(RefCell::new(scene)));
        self
    }
}

/// Phase of a slot's transition state machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum SlotPhase {
    #[default]
    Idle,
    TearingDown,
    Loading,
    Attaching,
}

/// A scene currently wired into a slot: the instance plus its tick
/// subscription.
struct Occupant {
    scene: SharedScene,
    update: TickHandle,
}

#[derive(Default)]
struct Slot {
    occupant: Option<Occupant>,
    resize: Option<Rc<dyn Fn()>>,
    phase: SlotPhase,
}

/// Everything a transition needs to know about its target before the
/// instance exists.
struct SceneRequest {
    id: &'static str,
    bundles: &'static [&'static str],
    build: fn(&App) -> SharedScene,
}

impl SceneRequest {
    fn of<S: SceneKind>() -> Self {
        fn build<S: SceneKind>(app: &App) -> SharedScene {
            Rc::new(RefCell::new(S::create(app)))
        }
        Self {
            id: S::SCENE_ID,
            bundles: S::ASSET_BUNDLES,
            build: build::<S>,
        }
    }
}

struct Inner {
    scene_layer: DisplayNode,
    overlay_layer: DisplayNode,
    registry: HashMap<&'static str, SharedScene>,
    primary: Slot,
    overlay: Slot,
    loading_scene: Option<SharedScene>,
    viewport: Rc<Cell<(f32, f32)>>,
    app: Option<App>,
    destroyed: bool,
}

impl Inner {
    fn layer(&self, kind: SlotKind) -> &DisplayNode {
        match kind {
            SlotKind::Primary => &self.scene_layer,
            SlotKind::Overlay => &self.overlay_layer,
        }
    }

    fn slot(&self, kind: SlotKind) -> &Slot {
        match kind {
            SlotKind::Primary => &self.primary,
            SlotKind::Overlay => &self.overlay,
        }
    }

    fn slot_mut(&mut self, kind: SlotKind) -> &mut Slot {
        match kind {
            SlotKind::Primary => &mut self.primary,
            SlotKind::Overlay => &mut self.overlay,
        }
    }
}

/// Coordinates which scene and overlay are live and sequences the
/// transitions between them.
///
/// The director owns two display layers (scene below, overlay above), a
/// registry of one reusable instance per [`SceneKind::SCENE_ID`], and, per
/// slot, the occupant's tick subscription and resize binding. A transition
/// runs teardown → asset gate → prepare → attach, awaiting each stage before
/// the next begins; the [`scene`](crate::scene) module docs walk through the
/// protocol.
///
/// `SceneDirector` is a cheaply cloneable single-threaded handle: clones
/// refer to the same director, and every operation takes `&self`, so a
/// primary transition, an overlay transition, and resize notifications can
/// all be in flight together. Transitions on the *same* slot are serialized
/// by rejection: issuing one while the slot's previous transition is still
/// pending fails with [`DirectorError::SlotBusy`].
///
/// A transition future must be polled to completion; dropping it mid-flight
/// strands the slot in a busy phase. Scene hooks that panic likewise leave
/// the slot's bookkeeping wherever the protocol had gotten to; the director
/// never catches or retries.
#[derive(Clone)]
pub struct SceneDirector {
    inner: Rc<RefCell<Inner>>,
}

impl SceneDirector {
    /// Create an uninitialized director. Every operation besides
    /// [`initialize`] fails with [`DirectorError::NotInitialized`] until
    /// [`initialize`] has run.
    ///
    /// [`initialize`]: SceneDirector::initialize
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                scene_layer: DisplayNode::new("scene-layer"),
                overlay_layer: DisplayNode::new("overlay-layer"),
                registry: HashMap::new(),
                primary: Slot::default(),
                overlay: Slot::default(),
                loading_scene: None,
                viewport: Rc::new(Cell::new((0.0, 0.0))),
                app: None,
                destroyed: false,
            })),
        }
    }

    /// Attach the director to its host.
    ///
    /// Adds the scene layer and then the overlay layer to the configured
    /// parent (the overlay must be added second so it renders above), and
    /// stores the optional loading scene. Callable exactly once: a repeat
    /// call logs a warning and changes nothing.
    pub fn initialize(&self, options: DirectorOptions) {
        let mut inner = self.inner.borrow_mut();
        if inner.app.is_some() || inner.destroyed {
            log::warn!("scene director already initialized; ignoring");
            return;
        }
        let parent = options
            .parent
            .unwrap_or_else(|| options.app.stage().clone());
        parent.add_child(&inner.scene_layer);
        parent.add_child(&inner.overlay_layer);
        inner.loading_scene = options.loading_scene;
        inner.app = Some(options.app);
        log::debug!("scene director initialized");
    }

    /// The host application handle.
    pub fn app(&self) -> Result<App, DirectorError> {
        self.inner
            .borrow()
            .app
            .clone()
            .ok_or(DirectorError::NotInitialized)
    }

    /// Replace the shared loading scene.
    pub fn set_loading_scene<S: Scene + 'static>(&self, scene: S) {
        self.inner.borrow_mut().loading_scene = Some(Rc::new(RefCell::new(scene)));
    }

    /// The layer primary scenes are attached to.
    pub fn scene_layer(&self) -> DisplayNode {
        self.inner.borrow().scene_layer.clone()
    }

    /// The layer overlays are attached to; renders above the scene layer.
    pub fn overlay_layer(&self) -> DisplayNode {
        self.inner.borrow().overlay_layer.clone()
    }

    /// Transition the primary slot to scene `S`.
    ///
    /// Tears down the current primary scene (awaiting its exit animation),
    /// gates on `S`'s asset bundles, then prepares, attaches, and shows the
    /// registry instance of `S`. Resolves once the entry animation finishes.
    pub async fn go_to_scene<S: SceneKind>(
        &self,
        payload: Option<ScenePayload>,
    ) -> Result<(), DirectorError> {
        self.transition(SlotKind::Primary, SceneRequest::of::<S>(), payload)
            .await
    }

    /// Transition the overlay slot to scene `S`. Independent of the primary
    /// slot; both scenes receive ticks while an overlay is up.
    pub async fn show_overlay<S: SceneKind>(
        &self,
        payload: Option<ScenePayload>,
    ) -> Result<(), DirectorError> {
        self.transition(SlotKind::Overlay, SceneRequest::of::<S>(), payload)
            .await
    }

    /// Tear down the current overlay, if any. A no-op when the overlay slot
    /// is empty.
    pub async fn hide_overlay(&self) -> Result<(), DirectorError> {
        self.ensure_ready()?;
        if self
            .inner
            .borrow()
            .slot(SlotKind::Overlay)
            .occupant
            .is_none()
        {
            return Ok(());
        }
        self.begin(SlotKind::Overlay)?;
        self.detach_occupant(SlotKind::Overlay).await;
        self.finish(SlotKind::Overlay);
        Ok(())
    }

    /// Record the new viewport and dispatch it to the live scenes, primary
    /// slot before overlay slot. Each bound dispatcher re-reads the stored
    /// viewport when invoked, so a scene attached later still sees the
    /// latest dimensions.
    pub fn notify_resize(&self, width: f32, height: f32) -> Result<(), DirectorError> {
        self.ensure_ready()?;
        let (primary, overlay) = {
            let inner = self.inner.borrow();
            inner.viewport.set((width, height));
            (
                inner.primary.resize.clone(),
                inner.overlay.resize.clone(),
            )
        };
        if let Some(dispatch) = primary {
            dispatch();
        }
        if let Some(dispatch) = overlay {
            dispatch();
        }
        Ok(())
    }

    /// Tear the director down: every registered scene is unhooked from the
    /// ticker and destroyed, the registry is cleared, and both layers are
    /// destroyed. The director is unusable afterwards; calling `shutdown`
    /// twice is not supported.
    pub fn shutdown(&self) -> Result<(), DirectorError> {
        self.ensure_ready()?;
        let scenes: Vec<SharedScene> = {
            let mut inner = self.inner.borrow_mut();
            let inner = &mut *inner;
            let ticker = match &inner.app {
                Some(app) => app.ticker().clone(),
                None => return Err(DirectorError::NotInitialized),
            };
            for slot in [&mut inner.primary, &mut inner.overlay] {
                if let Some(occupant) = slot.occupant.take() {
                    ticker.remove(occupant.update);
                }
                slot.resize = None;
                slot.phase = SlotPhase::Idle;
            }
            inner.loading_scene = None;
            inner.scene_layer.destroy();
            inner.overlay_layer.destroy();
            inner.viewport.set((0.0, 0.0));
            inner.app = None;
            inner.destroyed = true;
            inner.registry.drain().map(|(_, scene)| scene).collect()
        };
        let count = scenes.len();
        for scene in scenes {
            scene.borrow_mut().destroy();
        }
        log::debug!("scene director shut down; {count} scene(s) destroyed");
        Ok(())
    }

    // ========================================================================
    // Transition protocol
    // ========================================================================

    async fn transition(
        &self,
        kind: SlotKind,
        request: SceneRequest,
        payload: Option<ScenePayload>,
    ) -> Result<(), DirectorError> {
        self.ensure_ready()?;
        self.begin(kind)?;
        log::debug!("{kind} slot: transition to '{}'", request.id);
        let result = self.run_transition(kind, &request, payload).await;
        self.finish(kind);
        if let Err(err) = &result {
            log::error!("{kind} slot: transition to '{}' failed: {err}", request.id);
        }
        result
    }

    /// The teardown → load → attach sequence, with the slot already marked
    /// busy. Each stage is fully awaited before the next begins.
    async fn run_transition(
        &self,
        kind: SlotKind,
        request: &SceneRequest,
        payload: Option<ScenePayload>,
    ) -> Result<(), DirectorError> {
        // 1. Teardown whatever currently occupies the slot. The instance
        //    stays cached in the registry.
        self.detach_occupant(kind).await;

        // 2. Asset gate: the loading scene occupies the slot while bundles
        //    load, and is torn down by the same protocol on either outcome.
        let app = self.app()?;
        if !request.bundles.is_empty() && !app.bundles().all_loaded(request.bundles) {
            self.set_phase(kind, SlotPhase::Loading);
            let loading = self.inner.borrow().loading_scene.clone();
            if let Some(scene) = &loading {
                self.attach(kind, scene.clone()).await;
            }
            let outcome = app.bundles().load(request.bundles).await;
            if loading.is_some() {
                self.detach_occupant(kind).await;
            }
            outcome?;
        }

        // 3. Instantiate or reuse via the registry, then prepare. `prepare`
        //    runs on every attach, reused instance or not.
        self.set_phase(kind, SlotPhase::Attaching);
        let app = self.app()?;
        let cached = self.inner.borrow().registry.get(request.id).cloned();
        let scene = match cached {
            Some(scene) => scene,
            None => {
                let scene = (request.build)(&app);
                self.inner
                    .borrow_mut()
                    .registry
                    .insert(request.id, scene.clone());
                scene
            }
        };
        scene.borrow_mut().prepare(payload);

        // 4. Attach and await the entry animation.
        self.attach(kind, scene).await;
        Ok(())
    }

    /// Entry half of the protocol: parent the view, bind and fire the resize
    /// dispatcher, subscribe `update`, then await `show`.
    async fn attach(&self, kind: SlotKind, scene: SharedScene) {
        let Ok(app) = self.app() else { return };
        let (layer, viewport) = {
            let inner = self.inner.borrow();
            (inner.layer(kind).clone(), inner.viewport.clone())
        };
        layer.add_child(scene.borrow().view());

        // The dispatcher reads the viewport cell at call time rather than
        // capturing dimensions, so late notifications never go stale.
        let dispatcher: Rc<dyn Fn()> = {
            let scene = scene.clone();
            Rc::new(move || {
                let (width, height) = viewport.get();
                scene.borrow_mut().resize(width, height);
            })
        };
        dispatcher();

        // Subscribing a closure over this instance's handle keeps repeat
        // registrations of the same scene type from cross-firing.
        let update = app.ticker().add({
            let scene = scene.clone();
            move |tick: &Tick| scene.borrow_mut().update(tick)
        });

        {
            let mut inner = self.inner.borrow_mut();
            let slot = inner.slot_mut(kind);
            slot.resize = Some(dispatcher);
            slot.occupant = Some(Occupant {
                scene: scene.clone(),
                update,
            });
        }

        let show = scene.borrow_mut().show();
        if let Some(show) = show {
            show.await;
        }
    }

    /// Teardown half of the protocol: await `hide`, unsubscribe `update`,
    /// detach the view. The scene keeps ticking until `hide` resolves.
    async fn detach_occupant(&self, kind: SlotKind) {
        let (occupant, layer, ticker) = {
            let mut inner = self.inner.borrow_mut();
            let layer = inner.layer(kind).clone();
            let ticker = inner.app.as_ref().map(|app| app.ticker().clone());
            let slot = inner.slot_mut(kind);
            slot.resize = None;
            (slot.occupant.take(), layer, ticker)
        };
        let Some(occupant) = occupant else { return };

        let hide = occupant.scene.borrow_mut().hide();
        if let Some(hide) = hide {
            hide.await;
        }
        if let Some(ticker) = ticker {
            ticker.remove(occupant.update);
        }
        layer.remove_child(occupant.scene.borrow().view());
    }

    // ========================================================================
    // Slot phase machine
    // ========================================================================

    fn ensure_ready(&self) -> Result<(), DirectorError> {
        let inner = self.inner.borrow();
        if inner.app.is_some() && !inner.destroyed {
            Ok(())
        } else {
            Err(DirectorError::NotInitialized)
        }
    }

    /// Claim the slot for a transition; rejected while a previous one is in
    /// flight.
    fn begin(&self, kind: SlotKind) -> Result<(), DirectorError> {
        let mut inner = self.inner.borrow_mut();
        let slot = inner.slot_mut(kind);
        if slot.phase != SlotPhase::Idle {
            return Err(DirectorError::SlotBusy { slot: kind });
        }
        slot.phase = SlotPhase::TearingDown;
        Ok(())
    }

    fn set_phase(&self, kind: SlotKind, phase: SlotPhase) {
        self.inner.borrow_mut().slot_mut(kind).phase = phase;
    }

    fn finish(&self, kind: SlotKind) {
        self.set_phase(kind, SlotPhase::Idle);
    }
}

impl Default for SceneDirector {
    fn default() -> Self {
        Self::new()
    }
}

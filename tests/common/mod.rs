//! Shared harness for the integration tests: probe scenes that journal
//! every lifecycle hook, and a scriptable bundle provider.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

use proscenium::{
    App, BundleError, BundleProvider, DirectorOptions, DisplayNode, Gate, LoadFuture, Scene,
    SceneDirector, SceneFuture, SceneKind, ScenePayload, Tick,
};

/// Event journal plus animation gates, shared by every probe scene in a
/// test.
#[derive(Default)]
pub struct Hub {
    events: RefCell<Vec<String>>,
    show_gates: RefCell<HashMap<&'static str, Gate>>,
    hide_gates: RefCell<HashMap<&'static str, Gate>>,
}

thread_local! {
    static HUB: Rc<Hub> = Rc::new(Hub::default());
}

/// The current test's hub. Each `#[test]` runs on its own thread, so state
/// never leaks between tests.
pub fn hub() -> Rc<Hub> {
    HUB.with(|hub| hub.clone())
}

impl Hub {
    pub fn log(&self, event: impl Into<String>) {
        self.events.borrow_mut().push(event.into());
    }

    /// Drain the journal.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }

    pub fn count(&self, event: &str) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|entry| entry.as_str() == event)
            .count()
    }

    /// Make `show` on the given scene id wait on the returned gate.
    pub fn gate_show(&self, id: &'static str) -> Gate {
        let gate = Gate::new();
        self.show_gates.borrow_mut().insert(id, gate.clone());
        gate
    }

    /// Make `hide` on the given scene id wait on the returned gate.
    pub fn gate_hide(&self, id: &'static str) -> Gate {
        let gate = Gate::new();
        self.hide_gates.borrow_mut().insert(id, gate.clone());
        gate
    }

    fn show_future(&self, id: &str) -> Option<SceneFuture> {
        self.show_gates.borrow().get(id).map(|gate| gate.wait())
    }

    fn hide_future(&self, id: &str) -> Option<SceneFuture> {
        self.hide_gates.borrow().get(id).map(|gate| gate.wait())
    }
}

fn describe(payload: Option<ScenePayload>) -> String {
    match payload {
        Some(payload) => match payload.downcast::<i32>() {
            Ok(value) => value.to_string(),
            Err(_) => "opaque".to_string(),
        },
        None => "none".to_string(),
    }
}

macro_rules! probe_scene {
    ($ty:ident, $id:literal) => {
        probe_scene!($ty, $id, &[]);
    };
    ($ty:ident, $id:literal, $bundles:expr) => {
        pub struct $ty {
            view: DisplayNode,
        }

        impl Scene for $ty {
            fn view(&self) -> &DisplayNode {
                &self.view
            }

            fn prepare(&mut self, payload: Option<ScenePayload>) {
                hub().log(format!("{}:prepare:{}", $id, describe(payload)));
            }

            fn show(&mut self) -> Option<SceneFuture> {
                hub().log(format!("{}:show", $id));
                hub().show_future($id)
            }

            fn hide(&mut self) -> Option<SceneFuture> {
                hub().log(format!("{}:hide", $id));
                hub().hide_future($id)
            }

            fn update(&mut self, _tick: &Tick) {
                hub().log(format!("{}:update", $id));
            }

            fn resize(&mut self, width: f32, height: f32) {
                hub().log(format!("{}:resize:{width}x{height}", $id));
            }

            fn destroy(&mut self) {
                hub().log(format!("{}:destroy", $id));
            }
        }

        impl SceneKind for $ty {
            const SCENE_ID: &'static str = $id;
            const ASSET_BUNDLES: &'static [&'static str] = $bundles;

            fn create(_app: &App) -> Self {
                hub().log(format!("{}:create", $id));
                Self {
                    view: DisplayNode::new($id),
                }
            }
        }
    };
}

probe_scene!(SceneA, "a");
probe_scene!(SceneB, "b");
probe_scene!(PauseProbe, "pause");
probe_scene!(BundledScene, "bundled", &["world"]);

/// Instance-configured loading scene; journals under `loading:*`.
pub struct LoadingProbe {
    view: DisplayNode,
}

impl LoadingProbe {
    pub fn new() -> Self {
        Self {
            view: DisplayNode::new("loading"),
        }
    }
}

impl Scene for LoadingProbe {
    fn view(&self) -> &DisplayNode {
        &self.view
    }

    fn show(&mut self) -> Option<SceneFuture> {
        hub().log("loading:show");
        hub().show_future("loading")
    }

    fn hide(&mut self) -> Option<SceneFuture> {
        hub().log("loading:hide");
        hub().hide_future("loading")
    }

    fn update(&mut self, _tick: &Tick) {
        hub().log("loading:update");
    }

    fn resize(&mut self, width: f32, height: f32) {
        hub().log(format!("loading:resize:{width}x{height}"));
    }
}

struct PendingLoad {
    gate: Gate,
    result: Result<(), BundleError>,
}

/// Bundle provider whose next load can be gated and forced to a scripted
/// outcome. Unscripted loads resolve immediately.
#[derive(Clone, Default)]
pub struct ScriptedBundles {
    loaded: Rc<RefCell<HashSet<String>>>,
    script: Rc<RefCell<Option<PendingLoad>>>,
}

impl ScriptedBundles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_loaded(&self, bundle: &str) {
        self.loaded.borrow_mut().insert(bundle.to_string());
    }

    /// The next `load` waits on the returned gate, then yields `result`
    /// (marking the bundles resident on success).
    pub fn script(&self, result: Result<(), BundleError>) -> Gate {
        let gate = Gate::new();
        *self.script.borrow_mut() = Some(PendingLoad {
            gate: gate.clone(),
            result,
        });
        gate
    }
}

impl BundleProvider for ScriptedBundles {
    fn is_loaded(&self, bundle: &str) -> bool {
        self.loaded.borrow().contains(bundle)
    }

    fn load(&self, bundles: &[&str]) -> LoadFuture {
        hub().log(format!("load:{}", bundles.join("+")));
        let names: Vec<String> = bundles.iter().map(|name| name.to_string()).collect();
        let loaded = self.loaded.clone();
        let pending = self.script.borrow_mut().take();
        Box::pin(async move {
            match pending {
                Some(PendingLoad { gate, result }) => {
                    gate.wait().await;
                    if result.is_ok() {
                        loaded.borrow_mut().extend(names);
                    }
                    result
                }
                None => {
                    loaded.borrow_mut().extend(names);
                    Ok(())
                }
            }
        })
    }
}

/// An initialized director wired to a [`ScriptedBundles`] provider.
pub struct Fixture {
    pub app: App,
    pub director: SceneDirector,
    pub bundles: ScriptedBundles,
}

pub fn fixture() -> Fixture {
    fixture_inner(false)
}

/// Like [`fixture`], with a [`LoadingProbe`] configured as the shared
/// loading scene.
pub fn fixture_with_loading() -> Fixture {
    fixture_inner(true)
}

fn fixture_inner(with_loading: bool) -> Fixture {
    let bundles = ScriptedBundles::new();
    let app = App::new().with_bundles(bundles.clone());
    let director = SceneDirector::new();
    let mut options = DirectorOptions::new(app.clone());
    if with_loading {
        options = options.loading_scene(LoadingProbe::new());
    }
    director.initialize(options);
    Fixture {
        app,
        director,
        bundles,
    }
}

/// Poll a future once with a no-op waker.
pub fn poll_once<F>(future: &mut F) -> Poll<F::Output>
where
    F: Future + Unpin,
{
    let mut cx = Context::from_waker(Waker::noop());
    Pin::new(future).poll(&mut cx)
}

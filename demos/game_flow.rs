//! A scripted title → game → pause flow, driven by a headless frame loop.
//!
//! This demo exercises the whole lifecycle: a loading scene that fills the
//! slot while the "game" bundle loads, fade animations on the title scene,
//! and a pause overlay ticking on top of the game. Run with
//! `cargo run --example game_flow`.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use proscenium::tween::{Easing, Gate, Tween};
use proscenium::{
    App, BundleProvider, DirectorOptions, DisplayNode, LoadFuture, LocalTasks, Scene,
    SceneDirector, SceneFuture, SceneKind, ScenePayload, TickHandle, Tick, Ticker,
};

/// Bundle provider that pretends every load takes half a second of frame
/// time.
#[derive(Clone)]
struct SlowBundles {
    loaded: Rc<RefCell<HashSet<String>>>,
    ticker: Ticker,
}

impl SlowBundles {
    fn new(ticker: Ticker) -> Self {
        Self {
            loaded: Rc::new(RefCell::new(HashSet::new())),
            ticker,
        }
    }
}

impl BundleProvider for SlowBundles {
    fn is_loaded(&self, bundle: &str) -> bool {
        self.loaded.borrow().contains(bundle)
    }

    fn load(&self, bundles: &[&str]) -> LoadFuture {
        println!("      (loading bundles: {})", bundles.join(", "));
        let names: Vec<String> = bundles.iter().map(|name| name.to_string()).collect();
        let loaded = self.loaded.clone();
        let gate = Gate::new();

        let opener = gate.clone();
        let slot: Rc<RefCell<Option<TickHandle>>> = Rc::new(RefCell::new(None));
        let handle = self.ticker.add({
            let ticker = self.ticker.clone();
            let slot = slot.clone();
            let mut t = 0.0f32;
            move |tick| {
                t += tick.delta;
                if t >= 0.5 {
                    if let Some(handle) = slot.borrow_mut().take() {
                        ticker.remove(handle);
                    }
                    opener.open();
                }
            }
        });
        *slot.borrow_mut() = Some(handle);

        Box::pin(async move {
            gate.wait().await;
            loaded.borrow_mut().extend(names);
            Ok(())
        })
    }
}

/// Pulsing "Loading..." placeholder shown while bundles fetch.
struct LoadingScene {
    view: DisplayNode,
    bar: DisplayNode,
    progress: f32,
}

impl LoadingScene {
    fn new() -> Self {
        let view = DisplayNode::new("loading");
        let bar = DisplayNode::new("loading-bar");
        view.add_child(&bar);
        Self {
            view,
            bar,
            progress: 0.0,
        }
    }
}

impl Scene for LoadingScene {
    fn view(&self) -> &DisplayNode {
        &self.view
    }

    fn update(&mut self, tick: &Tick) {
        self.progress = (self.progress + tick.delta).fract();
        self.bar.set_alpha(self.progress);
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.bar.set_position(width / 2.0 - 150.0, height / 2.0);
    }
}

/// Title screen that fades in and out.
struct TitleScene {
    view: DisplayNode,
    ticker: Ticker,
}

impl Scene for TitleScene {
    fn view(&self) -> &DisplayNode {
        &self.view
    }

    fn show(&mut self) -> Option<SceneFuture> {
        Some(
            Tween::alpha(&self.view, 0.0, 1.0, 0.4)
                .easing(Easing::EaseOut)
                .run(&self.ticker),
        )
    }

    fn hide(&mut self) -> Option<SceneFuture> {
        Some(
            Tween::alpha(&self.view, 1.0, 0.0, 0.4)
                .easing(Easing::EaseIn)
                .run(&self.ticker),
        )
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.view.set_position(width / 2.0, height / 3.0);
    }
}

impl SceneKind for TitleScene {
    const SCENE_ID: &'static str = "title";

    fn create(app: &App) -> Self {
        Self {
            view: DisplayNode::new("title"),
            ticker: app.ticker().clone(),
        }
    }
}

/// The game proper: a player node circling the screen center while the
/// score climbs.
struct GameScene {
    view: DisplayNode,
    player: DisplayNode,
    center: (f32, f32),
    score: f32,
}

impl Scene for GameScene {
    fn view(&self) -> &DisplayNode {
        &self.view
    }

    fn prepare(&mut self, _payload: Option<ScenePayload>) {
        self.score = 0.0;
    }

    fn update(&mut self, tick: &Tick) {
        self.score += tick.delta * 10.0;
        let angle = tick.elapsed as f32;
        self.player.set_position(
            self.center.0 + angle.cos() * 100.0,
            self.center.1 + angle.sin() * 100.0,
        );
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.center = (width / 2.0, height / 2.0);
    }
}

impl SceneKind for GameScene {
    const SCENE_ID: &'static str = "game";
    const ASSET_BUNDLES: &'static [&'static str] = &["game"];

    fn create(_app: &App) -> Self {
        let view = DisplayNode::new("game");
        let player = DisplayNode::new("player");
        view.add_child(&player);
        Self {
            view,
            player,
            center: (0.0, 0.0),
            score: 0.0,
        }
    }
}

/// Dimming panel shown over the game while paused.
struct PauseOverlay {
    view: DisplayNode,
    panel: DisplayNode,
}

impl Scene for PauseOverlay {
    fn view(&self) -> &DisplayNode {
        &self.view
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.panel
            .set_position(width / 2.0 - 150.0, height / 2.0 - 100.0);
    }
}

impl SceneKind for PauseOverlay {
    const SCENE_ID: &'static str = "pause";

    fn create(_app: &App) -> Self {
        let view = DisplayNode::new("pause");
        view.set_alpha(0.7);
        let panel = DisplayNode::new("pause-panel");
        view.add_child(&panel);
        Self { view, panel }
    }
}

fn main() {
    let app = App::new();
    let bundles = SlowBundles::new(app.ticker().clone());
    let app = app.with_bundles(bundles);

    let director = SceneDirector::new();
    director.initialize(DirectorOptions::new(app.clone()).loading_scene(LoadingScene::new()));
    director.notify_resize(1280.0, 720.0).unwrap();

    let tasks = LocalTasks::new();
    let ticker = app.ticker().clone();

    let dt = 1.0 / 60.0;
    let mut time = 0.0f32;
    let mut step = 0;

    while time < 10.0 {
        match step {
            0 => {
                step = 1;
                println!("[{time:4.1}s] -> title scene");
                let director = director.clone();
                tasks.spawn(async move {
                    director
                        .go_to_scene::<TitleScene>(None)
                        .await
                        .expect("title transition");
                    println!("       title on stage");
                });
            }
            1 if time >= 2.0 => {
                step = 2;
                println!("[{time:4.1}s] -> game scene (bundle not resident yet)");
                let director = director.clone();
                tasks.spawn(async move {
                    director
                        .go_to_scene::<GameScene>(None)
                        .await
                        .expect("game transition");
                    println!("       game on stage");
                });
            }
            2 if time >= 4.5 => {
                step = 3;
                println!("[{time:4.1}s] -> pause overlay");
                let director = director.clone();
                tasks.spawn(async move {
                    director
                        .show_overlay::<PauseOverlay>(None)
                        .await
                        .expect("pause overlay");
                    println!("       paused (game keeps ticking underneath)");
                });
            }
            3 if time >= 6.0 => {
                step = 4;
                println!("[{time:4.1}s] -> resume");
                let director = director.clone();
                tasks.spawn(async move {
                    director.hide_overlay().await.expect("hide overlay");
                });
            }
            4 if time >= 7.5 => {
                step = 5;
                println!("[{time:4.1}s] -> back to title (instance reused)");
                let director = director.clone();
                tasks.spawn(async move {
                    director
                        .go_to_scene::<TitleScene>(None)
                        .await
                        .expect("return to title");
                    println!("       title on stage again");
                });
            }
            _ => {}
        }

        ticker.tick(dt);
        tasks.pump();
        time += dt;
    }

    director.shutdown().unwrap();
    println!("[{time:4.1}s] shut down");
}

//! Smallest possible setup: one scene, a handful of ticks, a resize.
//!
//! Run with `cargo run --example basic_usage`.

use proscenium::{App, DirectorOptions, DisplayNode, ScenePayload, Tick};
use proscenium::{Scene, SceneDirector, SceneKind};

struct HelloScene {
    view: DisplayNode,
    frames: u32,
}

impl Scene for HelloScene {
    fn view(&self) -> &DisplayNode {
        &self.view
    }

    fn prepare(&mut self, _payload: Option<ScenePayload>) {
        self.frames = 0;
    }

    fn update(&mut self, _tick: &Tick) {
        self.frames += 1;
        if self.frames % 60 == 0 {
            println!("hello scene has seen {} frames", self.frames);
        }
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.view.set_position(width / 2.0, height / 2.0);
        println!("hello scene centered in {width}x{height}");
    }
}

impl SceneKind for HelloScene {
    const SCENE_ID: &'static str = "hello";

    fn create(_app: &App) -> Self {
        Self {
            view: DisplayNode::new("hello"),
            frames: 0,
        }
    }
}

fn main() {
    let app = App::new();
    let director = SceneDirector::new();
    director.initialize(DirectorOptions::new(app.clone()));
    director.notify_resize(800.0, 600.0).unwrap();

    // No animations or bundles involved, so the transition resolves without
    // the frame loop having to run.
    pollster::block_on(director.go_to_scene::<HelloScene>(None)).unwrap();

    for _ in 0..120 {
        app.ticker().tick(1.0 / 60.0);
    }

    director.notify_resize(1024.0, 768.0).unwrap();

    for _ in 0..60 {
        app.ticker().tick(1.0 / 60.0);
    }

    director.shutdown().unwrap();
    println!("done");
}

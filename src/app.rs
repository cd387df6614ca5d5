//! Host application handle.

use std::rc::Rc;

use crate::assets::{BundleProvider, PreloadedBundles};
use crate::display::DisplayNode;
use crate::ticker::Ticker;

/// Cloneable bundle of host services the lifecycle layer hangs off.
///
/// The host owns its render loop; an `App` only carries the handles scenes
/// and the [`SceneDirector`](crate::SceneDirector) need: the stage container
/// layers are parented under, the per-frame [`Ticker`] the host drives, and
/// the [`BundleProvider`] the asset gate consults. Scenes receive `&App` at
/// construction and keep clones of whatever they need; there is no global
/// accessor.
#[derive(Clone)]
pub struct App {
    stage: DisplayNode,
    ticker: Ticker,
    bundles: Rc<dyn BundleProvider>,
}

impl App {
    /// Host handle with a fresh stage, ticker, and an empty
    /// [`PreloadedBundles`] provider.
    pub fn new() -> Self {
        Self {
            stage: DisplayNode::new("stage"),
            ticker: Ticker::new(),
            bundles: Rc::new(PreloadedBundles::new()),
        }
    }

    /// Replace the asset-bundle provider.
    pub fn with_bundles(mut self, provider: impl BundleProvider + 'static) -> Self {
        self.bundles = Rc::new(provider);
        self
    }

    /// Root container of the display tree.
    pub fn stage(&self) -> &DisplayNode {
        &self.stage
    }

    /// The per-frame tick source.
    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    /// The asset-bundle provider.
    pub fn bundles(&self) -> &dyn BundleProvider {
        self.bundles.as_ref()
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

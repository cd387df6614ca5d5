//! Asset-bundle gating.
//!
//! Scenes declare the bundles they need via
//! [`SceneKind::ASSET_BUNDLES`](crate::SceneKind::ASSET_BUNDLES); the
//! director consults a [`BundleProvider`] before first display and shows the
//! shared loading scene while bundles are fetched. What a bundle is, and how
//! its bytes arrive, belongs to the host; this module only defines the
//! seam plus [`PreloadedBundles`], an in-memory provider for demos and
//! tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use thiserror::Error;

/// Future returned by [`BundleProvider::load`].
pub type LoadFuture = Pin<Box<dyn Future<Output = Result<(), BundleError>>>>;

/// A bundle failed to load.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BundleError {
    /// The provider has no bundle registered under this name.
    #[error("unknown asset bundle '{0}'")]
    Unknown(String),
    /// The provider failed while fetching the bundle.
    #[error("failed to load asset bundle '{bundle}': {reason}")]
    Load { bundle: String, reason: String },
}

/// Reports bundle residency and performs bundle loading.
///
/// Implementations are single-threaded; use interior mutability for load
/// state. The future returned by [`load`](BundleProvider::load) must not
/// borrow the provider, because the caller may tick the frame loop while it
/// is pending.
pub trait BundleProvider {
    /// Whether the named bundle is resident.
    fn is_loaded(&self, bundle: &str) -> bool;

    /// Begin loading the named bundles, resolving once all are resident.
    fn load(&self, bundles: &[&str]) -> LoadFuture;

    /// Whether every named bundle is resident.
    fn all_loaded(&self, bundles: &[&str]) -> bool {
        bundles.iter().all(|bundle| self.is_loaded(bundle))
    }
}

/// In-memory bundle registry.
///
/// Bundles are declared up front with [`register`](PreloadedBundles::register)
/// and flip to resident when `load` is awaited; loading an unregistered name
/// fails with [`BundleError::Unknown`]. Clones share state, so a host can
/// keep a handle after passing one to [`App`](crate::App).
#[derive(Clone, Default)]
pub struct PreloadedBundles {
    bundles: Rc<RefCell<HashMap<String, bool>>>,
}

impl PreloadedBundles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a bundle, initially not resident.
    pub fn register(&self, bundle: impl Into<String>) {
        self.bundles
            .borrow_mut()
            .entry(bundle.into())
            .or_insert(false);
    }

    /// Builder-style [`register`](PreloadedBundles::register).
    pub fn with(self, bundle: impl Into<String>) -> Self {
        self.register(bundle);
        self
    }
}

impl BundleProvider for PreloadedBundles {
    fn is_loaded(&self, bundle: &str) -> bool {
        self.bundles.borrow().get(bundle).copied().unwrap_or(false)
    }

    fn load(&self, bundles: &[&str]) -> LoadFuture {
        let mut map = self.bundles.borrow_mut();
        if let Some(missing) = bundles.iter().find(|name| !map.contains_key(**name)) {
            let err = BundleError::Unknown((*missing).to_string());
            return Box::pin(std::future::ready(Err(err)));
        }
        for name in bundles {
            map.insert((*name).to_string(), true);
        }
        Box::pin(std::future::ready(Ok(())))
    }
}

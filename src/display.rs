//! Minimal display-list abstraction.
//!
//! The lifecycle layer only needs enough of a container tree to parent
//! scenes into layers: identity, add/remove, destruction, and the alpha and
//! position channels that fade/layout animations touch. A host with a real
//! renderer mirrors these operations onto its own scene graph each frame.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

struct NodeInner {
    label: String,
    children: Vec<DisplayNode>,
    alpha: f32,
    position: (f32, f32),
    destroyed: bool,
}

/// Cloneable handle to a node in the display tree.
///
/// Clones refer to the same node; [`same`](DisplayNode::same) compares that
/// identity. Nodes are cheap to create and single-threaded.
#[derive(Clone)]
pub struct DisplayNode {
    inner: Rc<RefCell<NodeInner>>,
}

impl DisplayNode {
    /// Create a detached node. The label only shows up in debug output.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(NodeInner {
                label: label.into(),
                children: Vec::new(),
                alpha: 1.0,
                position: (0.0, 0.0),
                destroyed: false,
            })),
        }
    }

    /// The label this node was created with.
    pub fn label(&self) -> String {
        self.inner.borrow().label.clone()
    }

    /// Whether two handles refer to the same node.
    pub fn same(&self, other: &DisplayNode) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Append `child`. Adding a node that is already a child is a no-op, so
    /// the child list never holds duplicates.
    pub fn add_child(&self, child: &DisplayNode) {
        let mut inner = self.inner.borrow_mut();
        if !inner.children.iter().any(|existing| existing.same(child)) {
            inner.children.push(child.clone());
        }
    }

    /// Detach `child`. Returns whether it was present.
    pub fn remove_child(&self, child: &DisplayNode) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.children.len();
        inner.children.retain(|existing| !existing.same(child));
        inner.children.len() != before
    }

    /// Whether `child` is a direct child of this node.
    pub fn contains(&self, child: &DisplayNode) -> bool {
        self.inner
            .borrow()
            .children
            .iter()
            .any(|existing| existing.same(child))
    }

    /// Number of direct children.
    pub fn child_count(&self) -> usize {
        self.inner.borrow().children.len()
    }

    pub fn alpha(&self) -> f32 {
        self.inner.borrow().alpha
    }

    pub fn set_alpha(&self, alpha: f32) {
        self.inner.borrow_mut().alpha = alpha;
    }

    pub fn position(&self) -> (f32, f32) {
        self.inner.borrow().position
    }

    pub fn set_position(&self, x: f32, y: f32) {
        self.inner.borrow_mut().position = (x, y);
    }

    /// Drop all children and mark the node unusable. Other handles to the
    /// node observe the destroyed state; the node is never revived.
    pub fn destroy(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.children.clear();
        inner.destroyed = true;
    }

    pub fn is_destroyed(&self) -> bool {
        self.inner.borrow().destroyed
    }
}

impl fmt::Debug for DisplayNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("DisplayNode")
            .field("label", &inner.label)
            .field("children", &inner.children.len())
            .field("destroyed", &inner.destroyed)
            .finish()
    }
}

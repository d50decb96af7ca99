//! Scene-graph node arena and binding metadata.
//!
//! The decoded tree uses index-based ownership: one flat arena of node
//! entries whose child lists hold indices. The root has no parent; every
//! other node has exactly one.

use std::any::Any;
use std::fmt;

use smallvec::SmallVec;

use crate::stream::format::{TARGET_DOCUMENT_ROOT, TARGET_NONE, TARGET_OWNER};
use crate::util::Vec2;

/// Index of a node in a [`SceneGraph`] arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Contract for the concrete node instances produced by builders.
///
/// The crate never interprets a node beyond this trait: the content size is
/// the coordinate frame for the node's children, and [`as_any`] lets the
/// host downcast back to its concrete type.
///
/// [`as_any`]: SceneNode::as_any
pub trait SceneNode: Any {
    /// The 2D extent children of this node interpret size-relative
    /// properties against.
    fn content_size(&self) -> Vec2;

    /// Downcasting access for the host application.
    fn as_any(&self) -> &dyn Any;

    /// Mutable downcasting access for the host application.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Which object a decoded node asked to be bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BindingKind {
    /// Bind to a member of the document root node.
    DocumentRoot,
    /// Bind to a member of the caller-supplied owner.
    Owner,
    /// A target code this reader does not know; preserved as-is.
    Unknown(u64),
}

impl BindingKind {
    /// Map a wire target code to a binding kind. `TARGET_NONE` has no
    /// binding and never reaches this point.
    pub fn from_raw(raw: u64) -> Self {
        debug_assert_ne!(raw, TARGET_NONE);
        match raw {
            TARGET_DOCUMENT_ROOT => Self::DocumentRoot,
            TARGET_OWNER => Self::Owner,
            other => Self::Unknown(other),
        }
    }
}

/// Member-variable binding decoded with a node.
///
/// The stream carries these as inert metadata; the reader records them on
/// the node entry and leaves the actual field assignment to the host (see
/// [`SceneGraph::bindings`]).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    pub kind: BindingKind,
    pub name: String,
}

/// One node in the arena: the builder-produced payload plus tree edges and
/// binding metadata.
pub struct NodeEntry {
    pub(crate) payload: Box<dyn SceneNode>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: SmallVec<[NodeId; 4]>,
    pub(crate) binding: Option<Binding>,
}

/// A fully decoded node tree.
///
/// Node ids are assigned in decode order (depth-first pre-order), so the
/// root is always id 0.
pub struct SceneGraph {
    pub(crate) nodes: Vec<NodeEntry>,
    pub(crate) root: NodeId,
}

// Payloads are trait objects, so a derive is not possible; report the
// tree shape instead.
impl fmt::Debug for SceneGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneGraph")
            .field("root", &self.root)
            .field("nodes", &self.nodes.len())
            .finish()
    }
}

impl SceneGraph {
    /// The root node: the first node constructed during the decode.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes in the graph.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the graph holds no nodes (never the case for a successful
    /// decode, which always produces at least the root).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The payload built for a node.
    pub fn payload(&self, id: NodeId) -> &dyn SceneNode {
        &*self.nodes[id.index()].payload
    }

    /// Mutable access to a node's payload.
    pub fn payload_mut(&mut self, id: NodeId) -> &mut dyn SceneNode {
        &mut *self.nodes[id.index()].payload
    }

    /// A node's children, in stream (encoding) order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.index()].children
    }

    /// A node's parent, `None` for the root.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent
    }

    /// The binding decoded with a node, if any.
    pub fn binding(&self, id: NodeId) -> Option<&Binding> {
        self.nodes[id.index()].binding.as_ref()
    }

    /// All member-variable bindings in decode order.
    ///
    /// The host walks these after the decode and applies its own
    /// name-to-field strategy against the root or the owner.
    pub fn bindings(&self) -> impl Iterator<Item = (NodeId, &Binding)> {
        self.nodes.iter().enumerate().filter_map(|(i, entry)| {
            entry.binding.as_ref().map(|b| (NodeId(i as u32), b))
        })
    }

    /// Ids of all nodes in decode order (pre-order of the tree).
    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len() as u32).map(NodeId)
    }
}

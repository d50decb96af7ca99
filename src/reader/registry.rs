//! Node-type dispatch: the builder capability trait and its registry.

use std::collections::HashMap;
use std::sync::Arc;

use super::node::{NodeId, SceneNode};
use super::GraphDecoder;
use crate::util::{Error, Result};

/// Per-type decoding and construction logic, selected by type name.
///
/// A builder consumes exactly the property bytes belonging to its type from
/// the shared cursor (through the [`GraphDecoder`] primitives) and returns a
/// fully initialized node. It must not read the child count or children;
/// the decoder applies that uniformly after every builder returns.
pub trait NodeBuilder: Send + Sync {
    fn build(
        &self,
        parent: Option<NodeId>,
        decoder: &mut GraphDecoder<'_>,
    ) -> Result<Box<dyn SceneNode>>;
}

/// Mapping from type name to builder.
///
/// Registration happens before any decode; during a decode the registry is
/// read-only and may be shared across reader instances.
#[derive(Default)]
pub struct BuilderRegistry {
    builders: HashMap<String, Arc<dyn NodeBuilder>>,
}

impl BuilderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a builder for a type name. The last registration for a
    /// given name wins.
    pub fn register(&mut self, type_name: impl Into<String>, builder: Arc<dyn NodeBuilder>) {
        self.builders.insert(type_name.into(), builder);
    }

    /// Look up the builder for a type name.
    ///
    /// An unknown name is a fatal decode error: without the builder the
    /// stream's property bytes for that node cannot be consumed and nothing
    /// after them is readable.
    pub fn lookup(&self, type_name: &str) -> Result<Arc<dyn NodeBuilder>> {
        self.builders
            .get(type_name)
            .cloned()
            .ok_or_else(|| Error::UnknownNodeType(type_name.to_string()))
    }

    /// True if a builder is registered for the given type name.
    pub fn contains(&self, type_name: &str) -> bool {
        self.builders.contains_key(type_name)
    }

    /// Number of registered builders.
    #[inline]
    pub fn len(&self) -> usize {
        self.builders.len()
    }

    /// True if no builders are registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.builders.is_empty()
    }
}

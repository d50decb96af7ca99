//! High-level ccbi reader: header validation, string-cache population, and
//! recursive node-graph construction.
//!
//! [`CcbReader`] is the reusable entry point: it owns the builder registry
//! and configuration and can decode any number of streams. Each call to
//! [`CcbReader::decode`] runs a single-threaded, synchronous [`GraphDecoder`]
//! session over one byte buffer; builders are handed the session so all
//! property reads share the one cursor.

use std::any::Any;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::stream::format::{CCB_MAGIC, CCB_VERSION, DEFAULT_MAX_DEPTH, TARGET_NONE};
use crate::stream::{BitCursor, StringCache};
use crate::util::{Error, Result, Vec2};

mod node;
pub mod path;
mod registry;

pub use node::{Binding, BindingKind, NodeId, SceneGraph, SceneNode};
pub use registry::{BuilderRegistry, NodeBuilder};

/// Reader for ccbi streams.
///
/// Holds the builder registry and decode configuration. Builders must be
/// registered before the first decode call; the registry is read-only while
/// a decode is in flight.
pub struct CcbReader {
    registry: BuilderRegistry,
    max_depth: usize,
}

impl Default for CcbReader {
    fn default() -> Self {
        Self::new()
    }
}

impl CcbReader {
    /// Create a reader with an empty registry.
    pub fn new() -> Self {
        Self::with_registry(BuilderRegistry::new())
    }

    /// Create a reader around an existing registry.
    pub fn with_registry(registry: BuilderRegistry) -> Self {
        Self {
            registry,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Register a builder for a node type name.
    pub fn register(&mut self, type_name: impl Into<String>, builder: Arc<dyn NodeBuilder>) {
        self.registry.register(type_name, builder);
    }

    /// Access the registry.
    pub fn registry(&self) -> &BuilderRegistry {
        &self.registry
    }

    /// Override the node-graph recursion limit.
    ///
    /// The format has no structural depth bound, so adversarial input could
    /// otherwise exhaust the stack.
    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.max_depth = max_depth;
    }

    /// Decode a complete ccbi stream into a scene graph.
    ///
    /// `owner` is an opaque host object threaded through to builders and
    /// binding consumers; the reader never inspects it. `default_size` is
    /// the coordinate frame used for the root node, which has no parent to
    /// derive one from.
    pub fn decode(
        &self,
        bytes: &[u8],
        owner: Option<&dyn Any>,
        default_size: Vec2,
    ) -> Result<SceneGraph> {
        let mut decoder = GraphDecoder {
            cursor: BitCursor::new(bytes),
            strings: StringCache::default(),
            registry: &self.registry,
            owner,
            root_container_size: default_size,
            nodes: Vec::new(),
            root: None,
            depth: 0,
            max_depth: self.max_depth,
            loaded_resources: HashSet::new(),
        };

        decoder.read_header()?;
        decoder.strings = StringCache::read_from(&mut decoder.cursor)?;
        decoder.read_node(None)?;

        let root = decoder
            .root
            .ok_or_else(|| Error::invalid("stream contains no root node"))?;
        Ok(SceneGraph {
            nodes: decoder.nodes,
            root,
        })
    }

    /// Load a whole file and decode it.
    ///
    /// A missing file fails before any header work, like any other early
    /// decode failure.
    pub fn decode_file(
        &self,
        path: impl AsRef<Path>,
        owner: Option<&dyn Any>,
        default_size: Vec2,
    ) -> Result<SceneGraph> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound(path.to_path_buf())
            } else {
                Error::Io(e)
            }
        })?;
        self.decode(&bytes, owner, default_size)
    }
}

/// One in-flight decode session.
///
/// Owns the cursor, string cache and node arena for a single stream, and is
/// the surface builders read their property bytes through. Not designed for
/// concurrent use; one session decodes one stream.
pub struct GraphDecoder<'a> {
    cursor: BitCursor<'a>,
    strings: StringCache,
    registry: &'a BuilderRegistry,
    owner: Option<&'a dyn Any>,
    root_container_size: Vec2,
    nodes: Vec<node::NodeEntry>,
    root: Option<NodeId>,
    depth: usize,
    max_depth: usize,
    loaded_resources: HashSet<String>,
}

impl<'a> GraphDecoder<'a> {
    /// Validate magic bytes and format version.
    fn read_header(&mut self) -> Result<()> {
        // A buffer too short to hold the magic is rejected the same way as
        // a wrong magic.
        let magic = self.cursor.read_bytes(4).map_err(|_| Error::BadMagic)?;
        if magic != CCB_MAGIC {
            return Err(Error::BadMagic);
        }

        let version = self.cursor.read_var_uint()?;
        if version != CCB_VERSION {
            log::warn!(
                "incompatible ccbi file version (file: {version}, reader: {CCB_VERSION})"
            );
            return Err(Error::VersionMismatch {
                found: version,
                supported: CCB_VERSION,
            });
        }

        Ok(())
    }

    /// Decode one node and, recursively, its children (depth-first
    /// pre-order, matching encoding order).
    fn read_node(&mut self, parent: Option<NodeId>) -> Result<NodeId> {
        if self.depth >= self.max_depth {
            return Err(Error::DepthLimitExceeded(self.max_depth));
        }
        self.depth += 1;

        let type_name = self.read_cached_string()?;

        let target = self.cursor.read_var_uint()?;
        let binding = if target != TARGET_NONE {
            let name = self.read_cached_string()?;
            Some(Binding {
                kind: BindingKind::from_raw(target),
                name,
            })
        } else {
            None
        };

        let builder = self.registry.lookup(&type_name)?;
        let payload = builder.build(parent, self)?;

        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node::NodeEntry {
            payload,
            parent,
            children: SmallVec::new(),
            binding,
        });

        // The first node constructed is the root; it is never overwritten.
        if self.root.is_none() {
            self.root = Some(id);
        }

        let num_children = self.cursor.read_var_uint()?;
        for _ in 0..num_children {
            let child = self.read_node(Some(id))?;
            self.nodes[id.index()].children.push(child);
        }

        self.depth -= 1;
        Ok(id)
    }

    /// Read a string-cache index and resolve it.
    pub fn read_cached_string(&mut self) -> Result<String> {
        let index = self.cursor.read_var_uint()? as usize;
        Ok(self.strings.resolve(index)?.to_string())
    }

    /// Read a boolean property.
    pub fn read_bool(&mut self) -> Result<bool> {
        self.cursor.read_bool()
    }

    /// Read a raw byte property.
    pub fn read_byte(&mut self) -> Result<u8> {
        self.cursor.read_byte()
    }

    /// Read an unsigned variable-length integer property.
    pub fn read_var_uint(&mut self) -> Result<u64> {
        self.cursor.read_var_uint()
    }

    /// Read a signed variable-length integer property.
    pub fn read_var_int(&mut self) -> Result<i64> {
        self.cursor.read_var_int()
    }

    /// Read a tagged float property.
    pub fn read_float(&mut self) -> Result<f32> {
        self.cursor.read_float()
    }

    /// The owner object supplied by the caller, if any. Opaque to the
    /// reader; builders and binding consumers decide what it is.
    pub fn owner(&self) -> Option<&'a dyn Any> {
        self.owner
    }

    /// The coordinate frame for size-relative properties of a node being
    /// built: the parent's content size, or the caller-supplied default
    /// frame when there is no parent.
    pub fn container_size(&self, node: Option<NodeId>) -> Vec2 {
        match node {
            Some(id) => self.nodes[id.index()].payload.content_size(),
            None => self.root_container_size,
        }
    }

    /// The root node id, once the first node has been constructed.
    ///
    /// Builders of later nodes may reference the root before the decode
    /// finishes (the root is recorded as soon as it exists).
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// A node already in the arena (parents are always present before
    /// their children are built).
    pub fn payload(&self, id: NodeId) -> &dyn SceneNode {
        &*self.nodes[id.index()].payload
    }

    /// Record that an auxiliary resource (sprite sheet, sub-document) has
    /// been loaded during this decode.
    pub fn mark_resource_loaded(&mut self, name: impl Into<String>) {
        self.loaded_resources.insert(name.into());
    }

    /// True if an auxiliary resource was already loaded during this decode.
    pub fn is_resource_loaded(&self, name: &str) -> bool {
        self.loaded_resources.contains(name)
    }

    /// Bare session over a buffer, for unit tests that drive a builder
    /// directly.
    #[cfg(test)]
    pub(crate) fn for_tests(bytes: &'a [u8], registry: &'a BuilderRegistry) -> Self {
        Self {
            cursor: BitCursor::new(bytes),
            strings: StringCache::default(),
            registry,
            owner: None,
            root_container_size: Vec2::ZERO,
            nodes: Vec::new(),
            root: None,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
            loaded_resources: HashSet::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::StreamWriter;

    #[test]
    fn test_bad_magic() {
        let reader = CcbReader::new();
        let err = reader
            .decode(b"nope....", None, Vec2::ZERO)
            .unwrap_err();
        assert!(matches!(err, Error::BadMagic));
    }

    #[test]
    fn test_short_buffer_is_bad_magic() {
        let reader = CcbReader::new();
        assert!(matches!(
            reader.decode(b"ib", None, Vec2::ZERO),
            Err(Error::BadMagic)
        ));
        assert!(matches!(
            reader.decode(b"", None, Vec2::ZERO),
            Err(Error::BadMagic)
        ));
    }

    #[test]
    fn test_version_mismatch() {
        let mut w = StreamWriter::new();
        w.write_header(CCB_VERSION + 7).unwrap();
        // Nothing after the version: rejection must not read further.
        let bytes = w.into_bytes();

        let reader = CcbReader::new();
        let err = reader.decode(&bytes, None, Vec2::ZERO).unwrap_err();
        assert!(matches!(
            err,
            Error::VersionMismatch { found, supported }
                if found == CCB_VERSION + 7 && supported == CCB_VERSION
        ));
    }

    #[test]
    fn test_resource_bookkeeping() {
        let registry = BuilderRegistry::new();
        let bytes = [];
        let mut decoder = GraphDecoder::for_tests(&bytes, &registry);
        assert!(!decoder.is_resource_loaded("sheet.plist"));
        decoder.mark_resource_loaded("sheet.plist");
        assert!(decoder.is_resource_loaded("sheet.plist"));
    }
}

//! # ccbi
//!
//! Rust reader for the CocosBuilder binary scene-graph format (`.ccbi` files).
//!
//! CocosBuilder and the original CCBReader were developed for cocos2d; all
//! rights to the original belong to their authors. This is an independent
//! Rust implementation aiming to match the wire format exactly.
//!
//! A `.ccbi` file is a compact bit-packed stream: a 4-byte magic, a format
//! version, a deduplicated string cache, and then a recursive node graph in
//! which every node names its type through the string cache. Decoding a node
//! is dispatched to a registered [`NodeBuilder`] for that type name; the
//! decoder assembles the returned nodes into an index-based [`SceneGraph`].
//!
//! ## Modules
//!
//! - [`util`] - Errors and math re-exports
//! - [`stream`] - Bit-level cursor, primitive decode/encode, string cache
//! - [`reader`] - Builder registry and the graph decoder
//!
//! ## Example
//!
//! ```ignore
//! use ccbi::prelude::*;
//!
//! let mut reader = CcbReader::new();
//! reader.register("CCNode", std::sync::Arc::new(MyNodeBuilder));
//!
//! let graph = reader.decode_file("menu.ccbi", None, Vec2::new(480.0, 320.0))?;
//! println!("root has {} children", graph.children(graph.root()).len());
//! ```

pub mod util;
pub mod stream;
pub mod reader;

// Re-export commonly used types
pub use util::{Error, Result, Vec2};
pub use stream::{BitCursor, StreamWriter, StringCache};
pub use reader::{
    Binding, BindingKind, BuilderRegistry, CcbReader, GraphDecoder, NodeBuilder, NodeId,
    SceneGraph, SceneNode,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::reader::{
        Binding, BindingKind, BuilderRegistry, CcbReader, GraphDecoder, NodeBuilder, NodeId,
        SceneGraph, SceneNode,
    };
    pub use crate::stream::{BitCursor, StreamWriter, StringCache};
    pub use crate::util::{Error, Result, Vec2};
}

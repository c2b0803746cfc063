//! Scene hierarchy
//!
//! A tree of nodes deriving world transforms from parent-child local
//! transforms, root to leaf, once per frame.

pub mod graph;

pub use graph::SceneNode;

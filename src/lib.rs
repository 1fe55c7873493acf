//! # kdthree
//!
//! `kdthree` is a Rust library for a 3D K-D tree whose queries report not just
//! their answer but how they got there, so that a viewer can replay each step.
//! It is designed to be used in Rust as well as compiled to WebAssembly (WASM).
//!
//! ## Features
//!
//! - **Insertion-built tree**: points are inserted one by one, the splitting axis
//!   cycles X → Y → Z with depth, and points tying with a node on its axis are dropped.
//! - **Traced lookup**: exact point lookup recording every node on the descent.
//! - **Sphere queries**: all points within a radius, with the full visitation
//!   trace and per-step membership needed for animation.
//! - **Diagram layout**: inorder ranks and depths for drawing the tree in 2D.
//! - **Barriers**: the splitting plane of every node, clipped by its ancestors.
//! - **Export**: a JSON snapshot of the tree shape for browser viewers.
//!
//! ## Example
//!
//! See the `demos/` directory for a JSON export and a printed sphere trace.
//!
//! ## Main Interface
//!
//! The primary entry point is the [`KdTree`] struct.

mod barrier;
mod bounds;
mod error;
mod export;
mod kdtree;
mod layout;
mod point;
mod query;
mod wasm;

pub use barrier::Barrier;
pub use bounds::BoundingBox;
pub use bounds::DEFAULT_EXTENT_MAX;
pub use bounds::DEFAULT_EXTENT_MIN;
pub use error::KdTreeError;
pub use export::NodeSnapshot;
pub use export::TreeExport;
pub use kdtree::KdNode;
pub use kdtree::KdTree;
pub use kdtree::OVERALL_BOUND_MARGIN;
pub use kdtree::SAMPLE_POINTS;
pub use layout::DisplayCoord;
pub use layout::Layout;
pub use point::cmp_points;
pub use point::distance;
pub use point::distance_sq;
pub use point::Axis;
pub use point::Point;
pub use query::Lookup;
pub use query::PathStep;
pub use query::SphereQuery;
pub use query::TraceStep;
pub use wasm::KdTree3D;

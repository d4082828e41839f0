//! Core tree layout, traversal and playback library.
//!
//! Main components:
//! - [`tree`]: immutable tree nodes (binary, ternary, general).
//! - [`bst`]: persistent, step-by-step binary search tree insertion.
//! - [`traversal`]: preorder / inorder / postorder visiting orders.
//! - [`layout`]: span-based canvas positions for rendering.
//! - [`playback`]: tick-driven build and traversal animation state machine.
//! - [`schedule`]: fixed-cadence tick pacing for render loops.
//! - [`input`]: parsing user-entered value lists.
//! - [`presets`]: built-in example trees.
//! - [`config`]: layout metrics and tick intervals.
//! - [`error`]: rejected requests and configuration errors.
//! - [`types`]: shared type aliases and IDs.

pub mod bst;
pub mod config;
pub mod error;
pub mod input;
pub mod layout;
pub mod playback;
pub mod presets;
pub mod schedule;
pub mod traversal;
pub mod tree;
pub mod types;

// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Interactive viewer for a resizable, wood-textured box.
//!
//! A box wearing a six-map wood-board material sits above a grid floor.
//! The user orbits it with the mouse, types new width and depth values,
//! and asks the camera to fly to the box's front or left side.
//!
//! # Key entry points
//!
//! - [`BoxEngine`] - GPU resources plus scene state, driven once per frame
//! - [`BoxCommand`] - every user action (resize, fly-to, orbit)
//! - [`options::Options`] - TOML-backed configuration
//! - [`Viewer`] - standalone winit window (`viewer` feature)
//!
//! # Architecture
//!
//! Hosts translate platform events into [`InputEvent`]s or commands and
//! call [`BoxEngine::frame`] each display refresh. The frame advances the
//! camera controller (orbit damping or an in-flight approach), uploads
//! any changed uniforms and draws the floor then the box in one pass.
//! Material maps are loaded as a batch before the engine is built; a
//! failed batch aborts startup with every failing map listed.

pub mod assets;
pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod options;
pub mod renderer;
pub mod scene;
pub mod util;
#[cfg(all(feature = "viewer", not(target_arch = "wasm32")))]
pub mod viewer;
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

pub use engine::command::BoxCommand;
pub use engine::BoxEngine;
pub use error::WoodboxError;
pub use input::{InputEvent, MouseButton};
#[cfg(all(feature = "viewer", not(target_arch = "wasm32")))]
pub use viewer::Viewer;

//! Seating canvas: geometry, document model, and interaction engine for table layouts.
//!
//! This crate is compiled to WebAssembly and runs in the browser, but everything
//! except [`engine::Engine`] and [`render`] is plain Rust and is shared with the
//! native planner crate. It owns the canvas side of the seating editor:
//! computing where seats sit on round and rectangular tables, translating raw
//! pointer input into table moves, rotations, and guest drops, keeping the
//! pan/zoom camera, and drawing the scene. The host is responsible only for
//! wiring DOM events to the engine and persisting the resulting
//! [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Tables, guests, families, and the in-memory [`doc::SeatingDoc`] |
//! | [`layout`] | Seat positions, footprints, bounding boxes, placement slots |
//! | [`camera`] | Pan/zoom camera, coordinate conversions, fit-to-bounds |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`hit`] | Hit-testing against seats and table bodies |
//! | [`render`] | Scene rendering to a 2D canvas context |
//! | [`consts`] | Shared numeric constants (zoom limits, table geometry, etc.) |

pub mod camera;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod hit;
pub mod input;
pub mod layout;
pub mod render;

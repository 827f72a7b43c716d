//! Scene-graph engine for small interactive 2D scenes.
//!
//! The crate owns everything between the host's frame callback and its
//! drawing surface: a tree of positioned, styled entities, the per-frame
//! update/paint/input cycle, collision-checked movement, time-stepped
//! animations and the pointer-interaction state machine. The host supplies a
//! [`surface::Surface`], a [`surface::FrameScheduler`] and raw input, and
//! calls [`render::Renderer::frame`] whenever a requested frame fires.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`entity`] | Entity state, owned children and overridable hooks |
//! | [`render`] | The frame loop and per-frame hook context |
//! | [`stage`] | Ordered top-level entity set |
//! | [`movement`] | Collision-checked movement |
//! | [`collision`] | Overlap predicates between regions |
//! | [`geometry`] | Points, sizes and shaped regions |
//! | [`animation`] | Stepped animations and the fade/flash/typewriter builders |
//! | [`pointer`] | Pointer input snapshots and hover/click transitions |
//! | [`effects`] | Transform, alpha, fill, stroke and debug overlay around `render` |
//! | [`content`] | Built-in content: shapes, clear boxes, text, images |
//! | [`style`] | Fill, stroke, gradients, shadows and symbolic positions |
//! | [`keys`] | Exact-match key combination bindings |
//! | [`scene`] | Scenes and the game that switches between them |
//! | [`widgets`] | Button and checkbox |
//! | [`dialogue`] | JSON dialogue scripts and the dialogue box |
//! | [`config`] | Game configuration |
//! | [`surface`] | Host capabilities plus recording/manual doubles |
//! | [`error`] | Engine error taxonomy |
//! | [`consts`] | Shared constants and palette |
//! | `web` | Browser surface and `requestAnimationFrame` scheduler (feature `web`) |

pub mod animation;
pub mod collision;
pub mod config;
pub mod consts;
pub mod content;
pub mod dialogue;
pub mod effects;
pub mod entity;
pub mod error;
pub mod geometry;
pub mod keys;
pub mod movement;
pub mod pointer;
pub mod render;
pub mod scene;
pub mod stage;
pub mod style;
pub mod surface;
#[cfg(feature = "web")]
pub mod web;
pub mod widgets;

//! Animated node-graph background.
//!
//! A small 2D particle simulation drawn behind the page:
//! - Nodes drift at low speed, optionally with sinusoidal wandering
//! - Pairs closer than a threshold are joined by lines that fade with distance
//! - Nodes can lean toward the pointer and relax back when it leaves
//! - Colors follow the page's `data-theme` on every frame
//!
//! # Example
//!
//! ```ignore
//! use particle_field::{FieldConfig, ParticleFieldCanvas};
//!
//! view! { <ParticleFieldCanvas config=FieldConfig::interactive() /> }
//! ```

mod component;
pub mod config;
mod engine;
mod node;
mod render;
mod state;
pub mod surface;
pub mod theme;

pub use component::ParticleFieldCanvas;
pub use config::FieldConfig;
pub use engine::{FRAME_DT, FieldEngine};
pub use surface::{CanvasSurface, Surface};
pub use theme::{Color, DocumentTheme, Palette, ThemeMode, ThemePalettes, ThemeSource};

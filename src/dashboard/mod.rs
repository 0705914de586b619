//! Dashboard slides and render surfaces.
//!
//! Turns loaded KPI data into element-id/text pairs with status classes and
//! writes them to any [`RenderSurface`].

pub mod slides;
pub mod surface;

pub use slides::{build_slides, period_label, Slide, SlideEntry, SlideKind};
pub use surface::{render, MemorySurface, RenderSurface};

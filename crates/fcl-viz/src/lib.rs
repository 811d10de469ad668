//! # fcl-viz: Solution Maps
//!
//! Draws a solved facility-location request as a PNG: customers, every
//! candidate, the opened facilities and assignment lines, on an extent fitted
//! to the points. The result is meant for embedding in a JSON response, so
//! [`render_map_base64`] never fails the caller; it falls back to a
//! placeholder image and logs the cause.

mod render;
mod scene;

pub use render::{
    encode_png, placeholder_png, png_to_base64, render_map_base64, render_map_png, MapRenderer,
    PlottersMapRenderer,
};
pub use scene::MapScene;

use thiserror::Error;

/// Rendering failures. Callers log these rather than propagate them.
#[derive(Error, Debug)]
pub enum VizError {
    #[error("invalid image size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("invalid scene: {0}")]
    InvalidScene(String),

    #[error("drawing failed: {0}")]
    Draw(String),

    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

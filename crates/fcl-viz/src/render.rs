use crate::{MapScene, VizError};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgb, RgbImage};
use plotters::prelude::*;
use tracing::{error, warn};

const MAX_SIDE: u32 = 8192;

/// Renders a [`MapScene`] to PNG bytes.
pub trait MapRenderer: Send + Sync {
    fn render_png(&self, scene: &MapScene) -> Result<Vec<u8>, VizError>;
}

/// Bitmap renderer built on `plotters`.
///
/// Customers are small blue dots, every candidate a grey triangle, chosen
/// facilities larger red triangles, and each assignment a thin green line.
/// No basemap or text is drawn.
#[derive(Debug, Clone, Copy)]
pub struct PlottersMapRenderer {
    pub width: u32,
    pub height: u32,
}

impl Default for PlottersMapRenderer {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
        }
    }
}

impl PlottersMapRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl MapRenderer for PlottersMapRenderer {
    fn render_png(&self, scene: &MapScene) -> Result<Vec<u8>, VizError> {
        check_size(self.width, self.height)?;
        scene.validate()?;

        let mut buffer = vec![0u8; self.width as usize * self.height as usize * 3];
        {
            let root =
                BitMapBackend::with_buffer(&mut buffer, (self.width, self.height)).into_drawing_area();
            root.fill(&WHITE).map_err(draw_err)?;

            let (lng_range, lat_range) = scene.extent();
            let mut chart = ChartBuilder::on(&root)
                .margin(12)
                .build_cartesian_2d(lng_range, lat_range)
                .map_err(draw_err)?;

            let link_style = GREEN.mix(0.3).stroke_width(1);
            chart
                .draw_series(scene.links().map(|(c, f)| {
                    PathElement::new(
                        vec![(c.longitude, c.latitude), (f.longitude, f.latitude)],
                        link_style,
                    )
                }))
                .map_err(draw_err)?;

            chart
                .draw_series(
                    scene
                        .customers
                        .iter()
                        .map(|c| Circle::new((c.longitude, c.latitude), 3, BLUE.filled())),
                )
                .map_err(draw_err)?;

            let grey = RGBColor(128, 128, 128);
            chart
                .draw_series(
                    scene
                        .candidates
                        .iter()
                        .map(|f| TriangleMarker::new((f.longitude, f.latitude), 6, grey.filled())),
                )
                .map_err(draw_err)?;

            chart
                .draw_series(scene.chosen.iter().map(|&j| {
                    let f = scene.candidates[j];
                    TriangleMarker::new((f.longitude, f.latitude), 10, RED.filled())
                }))
                .map_err(draw_err)?;

            root.present().map_err(draw_err)?;
        }

        encode_png(&buffer, self.width, self.height)
    }
}

fn draw_err(err: impl std::fmt::Display) -> VizError {
    VizError::Draw(err.to_string())
}

fn check_size(width: u32, height: u32) -> Result<(), VizError> {
    if width == 0 || height == 0 || width > MAX_SIDE || height > MAX_SIDE {
        return Err(VizError::InvalidSize { width, height });
    }
    Ok(())
}

/// Encode a packed RGB buffer as PNG.
pub fn encode_png(rgb: &[u8], width: u32, height: u32) -> Result<Vec<u8>, VizError> {
    let mut out = Vec::new();
    PngEncoder::new(&mut out).write_image(rgb, width, height, ExtendedColorType::Rgb8)?;
    Ok(out)
}

/// Grey image with a red cross, shown when the real map cannot be drawn.
pub fn placeholder_png(width: u32, height: u32) -> Result<Vec<u8>, VizError> {
    check_size(width, height)?;
    let (w, h) = (f64::from(width), f64::from(height));
    let thickness = (w.min(h) / 60.0).max(1.5);
    let image = RgbImage::from_fn(width, height, |x, y| {
        let (x, y) = (f64::from(x), f64::from(y));
        // distance to each diagonal, in pixels
        let d1 = (h * x - w * y).abs() / w.hypot(h);
        let d2 = (h * x + w * y - w * h).abs() / w.hypot(h);
        if d1 < thickness || d2 < thickness {
            Rgb([200, 40, 40])
        } else {
            Rgb([235, 235, 235])
        }
    });
    encode_png(image.as_raw(), width, height)
}

/// Render `scene` to PNG, replacing a failed render with [`placeholder_png`]
/// at 500x300. `None` only when the placeholder fails as well.
pub fn render_map_png(renderer: &dyn MapRenderer, scene: &MapScene) -> Option<Vec<u8>> {
    match renderer.render_png(scene) {
        Ok(png) => Some(png),
        Err(err) => {
            warn!("map rendering failed: {err}; using placeholder");
            match placeholder_png(500, 300) {
                Ok(png) => Some(png),
                Err(err) => {
                    error!("placeholder map failed: {err}");
                    None
                }
            }
        }
    }
}

/// Base64 text of PNG bytes, as carried in `map_base64`.
pub fn png_to_base64(png: &[u8]) -> String {
    STANDARD.encode(png)
}

/// [`render_map_png`], base64-encoded.
pub fn render_map_base64(renderer: &dyn MapRenderer, scene: &MapScene) -> Option<String> {
    render_map_png(renderer, scene).map(|png| png_to_base64(&png))
}

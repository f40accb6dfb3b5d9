//! Compositor - Painter's-Algorithm Stacking
//!
//! Paints the selected element images onto a fresh canvas in layer order.
//! Ordering is the only layering mechanism: later layers are drawn after,
//! and therefore on top of, earlier ones.

use image::imageops::{self, FilterType};
use image::RgbaImage;
use std::path::Path;
use thiserror::Error;

use crate::signature::Draw;

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("Cannot read image {0}: {1}")]
    Unreadable(String, #[source] std::io::Error),

    #[error("Cannot decode image {0}: {1}")]
    Undecodable(String, #[source] image::ImageError),
}

#[derive(Debug, Error)]
pub enum CompositionError {
    #[error("Layer {layer} element {element}: {source}")]
    ElementLoad {
        layer: String,
        element: String,
        #[source]
        source: ResourceError,
    },
}

/// Seam for element pixel loading, so tests and alternative stores can
/// substitute the filesystem.
pub trait ResourceLoader {
    fn load(&self, path: &Path) -> Result<RgbaImage, ResourceError>;
}

/// Default loader: decode from the local filesystem.
pub struct FsImageLoader;

impl ResourceLoader for FsImageLoader {
    fn load(&self, path: &Path) -> Result<RgbaImage, ResourceError> {
        let bytes = std::fs::read(path)
            .map_err(|e| ResourceError::Unreadable(path.display().to_string(), e))?;
        let decoded = image::load_from_memory(&bytes)
            .map_err(|e| ResourceError::Undecodable(path.display().to_string(), e))?;
        Ok(decoded.to_rgba8())
    }
}

/// Composes draws onto a canvas of the run's configured size.
pub struct Compositor {
    width: u32,
    height: u32,
    loader: Box<dyn ResourceLoader>,
}

impl Compositor {
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_loader(width, height, Box::new(FsImageLoader))
    }

    pub fn with_loader(width: u32, height: u32, loader: Box<dyn ResourceLoader>) -> Self {
        Self {
            width,
            height,
            loader,
        }
    }

    /// Paint every pick in the draw, in layer order, onto a transparent
    /// canvas. Elements are stretched to the canvas size when they differ;
    /// no other scaling or placement logic exists. A load failure discards
    /// the partially painted canvas.
    pub fn compose(&self, draw: &Draw) -> Result<RgbaImage, CompositionError> {
        let mut canvas = RgbaImage::new(self.width, self.height);

        for pick in &draw.picks {
            let element = self
                .loader
                .load(&pick.element_path)
                .map_err(|source| CompositionError::ElementLoad {
                    layer: pick.layer_name.clone(),
                    element: pick.element_name.clone(),
                    source,
                })?;

            let element = if element.dimensions() == (self.width, self.height) {
                element
            } else {
                imageops::resize(&element, self.width, self.height, FilterType::Triangle)
            };

            imageops::overlay(&mut canvas, &element, 0, 0);
        }

        Ok(canvas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::DrawPick;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn solid_png(dir: &Path, name: &str, w: u32, h: u32, rgba: [u8; 4]) -> PathBuf {
        let path = dir.join(name);
        let img = RgbaImage::from_pixel(w, h, image::Rgba(rgba));
        img.save(&path).unwrap();
        path
    }

    fn pick(layer_id: usize, path: PathBuf) -> DrawPick {
        DrawPick {
            layer_id,
            layer_name: format!("layer-{}", layer_id),
            element_index: 0,
            element_name: "solid".to_string(),
            element_path: path,
        }
    }

    #[test]
    fn test_later_layer_occludes_earlier() {
        let tmp = TempDir::new().unwrap();
        let red = solid_png(tmp.path(), "red.png", 4, 4, [255, 0, 0, 255]);
        let blue = solid_png(tmp.path(), "blue.png", 4, 4, [0, 0, 255, 255]);

        let compositor = Compositor::new(4, 4);
        let draw = Draw::new(vec![pick(0, red), pick(1, blue)]);
        let canvas = compositor.compose(&draw).unwrap();

        assert_eq!(canvas.get_pixel(0, 0).0, [0, 0, 255, 255]);
        assert_eq!(canvas.get_pixel(3, 3).0, [0, 0, 255, 255]);
    }

    #[test]
    fn test_transparent_top_leaves_base_visible() {
        let tmp = TempDir::new().unwrap();
        let red = solid_png(tmp.path(), "red.png", 4, 4, [255, 0, 0, 255]);
        let clear = solid_png(tmp.path(), "clear.png", 4, 4, [0, 255, 0, 0]);

        let compositor = Compositor::new(4, 4);
        let draw = Draw::new(vec![pick(0, red), pick(1, clear)]);
        let canvas = compositor.compose(&draw).unwrap();

        assert_eq!(canvas.get_pixel(2, 2).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_element_stretched_to_canvas() {
        let tmp = TempDir::new().unwrap();
        let red = solid_png(tmp.path(), "red.png", 2, 2, [255, 0, 0, 255]);

        let compositor = Compositor::new(8, 8);
        let draw = Draw::new(vec![pick(0, red)]);
        let canvas = compositor.compose(&draw).unwrap();

        assert_eq!(canvas.dimensions(), (8, 8));
        assert_eq!(canvas.get_pixel(7, 7).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_missing_element_fails() {
        let compositor = Compositor::new(4, 4);
        let draw = Draw::new(vec![pick(0, PathBuf::from("/nonexistent/element.png"))]);
        let result = compositor.compose(&draw);
        assert!(matches!(
            result,
            Err(CompositionError::ElementLoad { .. })
        ));
    }
}

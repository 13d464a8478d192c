//! Canvas 2D backend (web only)

use std::collections::HashMap;

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlImageElement};

use super::Surface;
use crate::error::{OctovoltError, Result};
use crate::sim::Sprite;

/// Draws sprites from `<img>` elements onto a `<canvas>`
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    images: HashMap<Sprite, HtmlImageElement>,
}

impl CanvasSurface {
    /// Grab the 2D context and look up every sprite image by id
    pub fn new(canvas: HtmlCanvasElement, document: &Document) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .ok_or_else(|| OctovoltError::Platform("no 2d context".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| OctovoltError::Platform("context is not 2d".into()))?;

        let mut images = HashMap::new();
        for sprite in Sprite::ALL {
            let img = document
                .get_element_by_id(sprite.element_id())
                .ok_or_else(|| {
                    OctovoltError::Platform(format!("missing sprite #{}", sprite.element_id()))
                })?
                .dyn_into::<HtmlImageElement>()
                .map_err(|_| {
                    OctovoltError::Platform(format!("#{} is not an image", sprite.element_id()))
                })?;
            images.insert(sprite, img);
        }

        Ok(Self {
            canvas,
            ctx,
            images,
        })
    }

    /// Match the backing store to the window
    pub fn resize(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn draw_sprite(&mut self, sprite: Sprite, pos: Vec2, dimension: f32) {
        let Some(img) = self.images.get(&sprite) else {
            return;
        };
        let d = dimension as f64;
        if let Err(e) = self
            .ctx
            .draw_image_with_html_image_element_and_dw_and_dh(img, pos.x as f64, pos.y as f64, d, d)
        {
            log::warn!("Draw {:?} failed: {:?}", sprite, e);
        }
    }
}

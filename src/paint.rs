//! Shared painting helpers: checkerboard backdrop, thumb rings and
//! cached raster images.

use std::sync::Arc;

use floem::context::PaintCx;
use floem::kurbo::{Circle, Point, Rect};
use floem::peniko::{self, Blob, Color};
use floem_renderer::Renderer;

use crate::color::Rgba;
use crate::constants;

const LIGHT: Color = Color::rgb8(255, 255, 255);
const DARK: Color = Color::rgb8(204, 204, 204);
const SHADOW: Color = Color::rgba8(0, 0, 0, 80);
pub(crate) const OUTLINE: Color = Color::rgba8(0, 0, 0, 40);

pub(crate) fn to_color(c: Rgba) -> Color {
    Color::rgba8(c.r, c.g, c.b, c.alpha_byte())
}

/// Paint a checkerboard pattern into `rect`.
pub(crate) fn paint_checkerboard(cx: &mut PaintCx, rect: Rect) {
    let cell = constants::CHECKER_CELL;
    cx.fill(&rect, LIGHT, 0.0);
    let cols = (rect.width() / cell).ceil() as usize;
    let rows = (rect.height() / cell).ceil() as usize;
    for row in 0..rows {
        for col in 0..cols {
            if (row + col) % 2 == 1 {
                let x = rect.x0 + col as f64 * cell;
                let y = rect.y0 + row as f64 * cell;
                let cell_rect = Rect::new(x, y, (x + cell).min(rect.x1), (y + cell).min(rect.y1));
                cx.fill(&cell_rect, DARK, 0.0);
            }
        }
    }
}

/// White ring with a thin dark edge on both sides.
pub(crate) fn paint_ring(cx: &mut PaintCx, center: Point, radius: f64) {
    cx.stroke(
        &Circle::new(center, radius),
        SHADOW,
        &floem::kurbo::Stroke::new(1.0),
    );
    cx.stroke(
        &Circle::new(center, radius - 1.5),
        Color::WHITE,
        &floem::kurbo::Stroke::new(2.0),
    );
    cx.stroke(
        &Circle::new(center, radius - 3.0),
        SHADOW,
        &floem::kurbo::Stroke::new(1.0),
    );
}

/// An RGBA8 image rebuilt only when its key or pixel size changes.
pub(crate) struct RasterCache<K> {
    img: Option<peniko::Image>,
    hash: Vec<u8>,
    key: Option<(K, u32, u32)>,
}

impl<K: PartialEq> RasterCache<K> {
    pub(crate) fn new() -> Self {
        Self {
            img: None,
            hash: Vec::new(),
            key: None,
        }
    }

    /// Rasterizes through `fill(width, height)` when stale, then draws
    /// into `rect`.
    pub(crate) fn draw(
        &mut self,
        cx: &mut PaintCx,
        rect: Rect,
        key: K,
        fill: impl FnOnce(u32, u32) -> Vec<u8>,
    ) {
        let scale = cx.scale().max(1.0);
        let pw = (rect.width() * scale).round() as u32;
        let ph = (rect.height() * scale).round() as u32;
        if pw == 0 || ph == 0 {
            return;
        }
        let stale = match &self.key {
            Some((k, w, h)) => *k != key || *w != pw || *h != ph,
            None => true,
        };
        if stale {
            let pixels = fill(pw, ph);
            let blob = Blob::new(Arc::new(pixels));
            self.hash = blob.id().to_le_bytes().to_vec();
            self.img = Some(peniko::Image::new(blob, peniko::Format::Rgba8, pw, ph));
            self.key = Some((key, pw, ph));
        }
        if let Some(ref img) = self.img {
            cx.draw_img(
                floem_renderer::Img {
                    img: img.clone(),
                    hash: &self.hash,
                },
                rect,
            );
        }
    }
}

/// Rows of identical pixels produced column by column.
pub(crate) fn rasterize_columns(width: u32, height: u32, column: impl Fn(u32) -> Rgba) -> Vec<u8> {
    let mut buf = vec![0u8; (width * height * 4) as usize];
    for px in 0..width {
        let c = column(px);
        let a = c.alpha_byte();
        for py in 0..height {
            let offset = ((py * width + px) * 4) as usize;
            buf[offset] = c.r;
            buf[offset + 1] = c.g;
            buf[offset + 2] = c.b;
            buf[offset + 3] = a;
        }
    }
    buf
}

/// Position of pixel column `px` as a fraction of `width`.
pub(crate) fn column_fraction(px: u32, width: u32) -> f64 {
    px as f64 / (width.saturating_sub(1)).max(1) as f64
}

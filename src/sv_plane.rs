//! Saturation/value plane.
//!
//! x maps to saturation (0 at the left edge), y to value (1 at the top).
//! The plane is rasterized for the current hue only, so it always shows
//! the full s/v range; the image is rebuilt when the hue or pixel size
//! changes and scaled by the renderer otherwise.

use floem::kurbo::{Point, Rect};

use floem::reactive::create_effect;
use floem::views::Decorators;
use floem::{
    context::{ComputeLayoutCx, EventCx, PaintCx, UpdateCx},
    event::{Event, EventPropagation},
    View, ViewId,
};
use floem_renderer::Renderer;

use crate::color::Hsva;
use crate::constants;
use crate::math;
use crate::paint::{self, RasterCache};
use crate::picker::Surface;
use crate::surface::{PickerSink, SurfaceDrag};

/// Rasterize the plane for `hue` (degrees) to an RGBA8 buffer.
fn rasterize_plane(width: u32, height: u32, hue: f64) -> Vec<u8> {
    let mut buf = vec![0u8; (width * height * 4) as usize];
    for py in 0..height {
        let v = 1.0 - paint::column_fraction(py, height);
        let row_offset = (py * width * 4) as usize;
        for px in 0..width {
            let s = paint::column_fraction(px, width);
            let (r, g, b) = math::hsv_to_rgb(hue, s, v);
            let offset = row_offset + (px * 4) as usize;
            buf[offset] = math::to_byte(r);
            buf[offset + 1] = math::to_byte(g);
            buf[offset + 2] = math::to_byte(b);
            buf[offset + 3] = 255;
        }
    }
    buf
}

pub(crate) struct SvPlane {
    id: ViewId,
    drag: SurfaceDrag,
    color: Hsva,
    size: floem::taffy::prelude::Size<f32>,
    raster: RasterCache<u32>,
}

/// Creates the plane. `color` is read reactively; input goes to `sink`.
pub(crate) fn sv_plane(color: impl Fn() -> Hsva + 'static, sink: PickerSink) -> SvPlane {
    let id = ViewId::new();

    create_effect(move |_| {
        id.update_state(color());
    });

    SvPlane {
        id,
        drag: SurfaceDrag::new(Surface::SaturationValue, sink),
        color: Hsva::default(),
        size: Default::default(),
        raster: RasterCache::new(),
    }
    .style(|s| {
        s.width_full()
            .height(constants::PLANE_HEIGHT)
            .border_radius(constants::RADIUS)
            .cursor(floem::style::CursorStyle::Default)
    })
}

impl View for SvPlane {
    fn id(&self) -> ViewId {
        self.id
    }

    fn update(&mut self, _cx: &mut UpdateCx, state: Box<dyn std::any::Any>) {
        if let Ok(color) = state.downcast::<Hsva>() {
            self.color = *color;
            self.id.request_layout();
        }
    }

    fn event_before_children(&mut self, cx: &mut EventCx, event: &Event) -> EventPropagation {
        self.drag.event(cx, self.id, self.size, event)
    }

    fn compute_layout(&mut self, _cx: &mut ComputeLayoutCx) -> Option<Rect> {
        let layout = self.id.get_layout().unwrap_or_default();
        self.size = layout.size;
        None
    }

    fn paint(&mut self, cx: &mut PaintCx) {
        let w = self.size.width as f64;
        let h = self.size.height as f64;
        if w == 0.0 || h == 0.0 {
            return;
        }
        let rect = Rect::new(0.0, 0.0, w, h);
        let rrect = rect.to_rounded_rect(constants::RADIUS as f64);

        cx.save();
        cx.clip(&rrect);
        // hundredths of a degree are plenty to key the raster
        let hue = self.color.h;
        let key = (hue * 100.0).round() as u32;
        self.raster
            .draw(cx, rect, key, |pw, ph| rasterize_plane(pw, ph, hue));
        cx.restore();

        cx.stroke(&rrect, paint::OUTLINE, &floem::kurbo::Stroke::new(1.0));

        let cursor = Point::new(self.color.s * w, (1.0 - self.color.v) * h);
        paint::paint_ring(cx, cursor, constants::CURSOR_RADIUS + 1.0);
        let fill = paint::to_color(self.color.with_alpha(1.0).to_rgba());
        cx.fill(
            &floem::kurbo::Circle::new(cursor, constants::CURSOR_RADIUS - 3.0),
            fill,
            0.0,
        );
    }
}

//! Alpha slider with checkerboard background + transparent-to-opaque gradient.

use floem::kurbo::{Point, Rect};

use floem::reactive::create_effect;
use floem::views::Decorators;
use floem::{
    context::{ComputeLayoutCx, EventCx, PaintCx, UpdateCx},
    event::{Event, EventPropagation},
    View, ViewId,
};
use floem_renderer::Renderer;

use crate::color::{self, Hsva, Rgba};
use crate::constants;
use crate::paint::{self, RasterCache};
use crate::picker::Surface;
use crate::surface::{PickerSink, SurfaceDrag};

pub(crate) struct AlphaSlider {
    id: ViewId,
    drag: SurfaceDrag,
    alpha: f64,
    /// Current color made opaque; the strip fades it in from the left.
    base: Rgba,
    size: floem::taffy::prelude::Size<f32>,
    raster: RasterCache<(u8, u8, u8)>,
}

/// Creates an alpha slider. 0.0 (transparent) at the left, 1.0 at the right.
pub(crate) fn alpha_slider(color: impl Fn() -> Hsva + 'static, sink: PickerSink) -> AlphaSlider {
    let id = ViewId::new();

    create_effect(move |_| {
        id.update_state(color());
    });

    AlphaSlider {
        id,
        drag: SurfaceDrag::new(Surface::Alpha, sink),
        alpha: 1.0,
        base: Rgba::default(),
        size: Default::default(),
        raster: RasterCache::new(),
    }
    .style(|s| {
        s.height(constants::SLIDER_HEIGHT)
            .border_radius(constants::THUMB_RADIUS as f32)
            .cursor(floem::style::CursorStyle::Pointer)
    })
}

impl View for AlphaSlider {
    fn id(&self) -> ViewId {
        self.id
    }

    fn update(&mut self, _cx: &mut UpdateCx, state: Box<dyn std::any::Any>) {
        if let Ok(c) = state.downcast::<Hsva>() {
            self.alpha = c.a;
            self.base = c.to_rgba().opaque_copy();
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
        let rrect = rect.to_rounded_rect(constants::THUMB_RADIUS);

        cx.save();
        cx.clip(&rrect);
        paint::paint_checkerboard(cx, rect);
        let base = self.base;
        let transparent = Rgba::new(base.r, base.g, base.b, 0.0);
        self.raster.draw(cx, rect, (base.r, base.g, base.b), |pw, ph| {
            paint::rasterize_columns(pw, ph, |px| {
                color::lerp_rgba(transparent, base, paint::column_fraction(px, pw))
            })
        });
        cx.restore();

        cx.stroke(&rrect, paint::OUTLINE, &floem::kurbo::Stroke::new(1.0));

        let r = constants::THUMB_RADIUS;
        let x = (self.alpha * w).min(w - r).max(r);
        paint::paint_ring(cx, Point::new(x, h / 2.0), r);
    }
}

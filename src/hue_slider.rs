//! Hue slider (0–360°, left to right).
//!
//! The rainbow strip never changes, so it is rasterized once per pixel
//! size rather than drawn with a peniko gradient.

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
use crate::paint::{self, RasterCache};
use crate::picker::Surface;
use crate::surface::{PickerSink, SurfaceDrag};

struct HueUpdate(f64);

pub(crate) struct HueSlider {
    id: ViewId,
    drag: SurfaceDrag,
    hue: f64,
    size: floem::taffy::prelude::Size<f32>,
    raster: RasterCache<()>,
}

pub(crate) fn hue_slider(color: impl Fn() -> Hsva + 'static, sink: PickerSink) -> HueSlider {
    let id = ViewId::new();

    create_effect(move |_| {
        id.update_state(HueUpdate(color().h));
    });

    HueSlider {
        id,
        drag: SurfaceDrag::new(Surface::Hue, sink),
        hue: 0.0,
        size: Default::default(),
        raster: RasterCache::new(),
    }
    .style(|s| {
        s.height(constants::SLIDER_HEIGHT)
            .border_radius(constants::THUMB_RADIUS as f32)
            .cursor(floem::style::CursorStyle::Pointer)
    })
}

impl View for HueSlider {
    fn id(&self) -> ViewId {
        self.id
    }

    fn update(&mut self, _cx: &mut UpdateCx, state: Box<dyn std::any::Any>) {
        if let Ok(update) = state.downcast::<HueUpdate>() {
            self.hue = update.0;
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
        self.raster.draw(cx, rect, (), |pw, ph| {
            paint::rasterize_columns(pw, ph, |px| {
                let t = paint::column_fraction(px, pw);
                Hsva::new(t * 360.0, 1.0, 1.0, 1.0).to_rgba()
            })
        });
        cx.restore();

        cx.stroke(&rrect, paint::OUTLINE, &floem::kurbo::Stroke::new(1.0));

        let r = constants::THUMB_RADIUS;
        let x = (self.hue / 360.0 * w).min(w - r).max(r);
        paint::paint_ring(cx, Point::new(x, h / 2.0), r);
    }
}

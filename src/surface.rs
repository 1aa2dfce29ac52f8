//! Pointer plumbing shared by the picker's drag surfaces.

use std::rc::Rc;

use floem::context::EventCx;
use floem::event::{Event, EventPropagation};
use floem::kurbo::{Point, Rect};
use floem::ViewId;

use crate::picker::{PickerInput, Surface};

/// Delivers picker input, along with the sending surface's local rect on
/// pointer down.
pub(crate) type PickerSink = Rc<dyn Fn(PickerInput, Option<(Surface, Rect)>)>;

/// Drag capture for one surface view.
pub(crate) struct SurfaceDrag {
    surface: Surface,
    held: bool,
    sink: PickerSink,
}

impl SurfaceDrag {
    pub(crate) fn new(surface: Surface, sink: PickerSink) -> Self {
        Self {
            surface,
            held: false,
            sink,
        }
    }

    /// Turns pointer events into picker input. Once pressed, the view is
    /// made active so moves and the release keep arriving outside its bounds.
    pub(crate) fn event(
        &mut self,
        cx: &mut EventCx,
        id: ViewId,
        size: floem::taffy::prelude::Size<f32>,
        event: &Event,
    ) -> EventPropagation {
        match event {
            Event::PointerDown(e) => {
                cx.update_active(id);
                self.held = true;
                let rect = Rect::from_origin_size(
                    Point::ZERO,
                    (size.width as f64, size.height as f64),
                );
                (self.sink)(
                    PickerInput::PointerDown {
                        surface: self.surface,
                        pos: e.pos,
                    },
                    Some((self.surface, rect)),
                );
                id.request_layout();
                EventPropagation::Stop
            }
            Event::PointerMove(e) if self.held => {
                (self.sink)(PickerInput::PointerMove { pos: e.pos }, None);
                id.request_layout();
                EventPropagation::Stop
            }
            Event::PointerUp(_) | Event::FocusLost if self.held => {
                self.held = false;
                (self.sink)(PickerInput::PointerUp, None);
                EventPropagation::Continue
            }
            _ => EventPropagation::Continue,
        }
    }
}

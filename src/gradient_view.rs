//! Gradient stop editor view.
//!
//! A preview track with the stop handles hanging below it. Pressing a
//! handle's tab drags the stop, pressing its color chip opens a picker bound
//! to that stop, and pressing empty track adds a stop there.

use std::rc::Rc;

use floem::kurbo::{Point, Rect, Size};
use floem::peniko::Color;
use floem::prelude::*;
use floem::reactive::{create_effect, RwSignal, SignalGet, SignalUpdate, SignalWith};
use floem::{
    context::{ComputeLayoutCx, EventCx, PaintCx, UpdateCx},
    event::{Event, EventPropagation},
    View, ViewId,
};
use floem_renderer::Renderer;

use crate::constants;
use crate::gradient::{GradientEditor, GradientKind, GradientStop, StopPart, StopTrack};
use crate::inputs::{number_input, text_button};
use crate::paint::{self, to_color, RasterCache};
use crate::picker::PickerConfig;
use crate::picker_view::{picker_panel, popup_layer, popup_size, PanelLink, PanelState};
use crate::surface::PickerSink;

struct TrackUpdate {
    stops: Vec<GradientStop>,
    active: Option<usize>,
}

pub(crate) struct GradientTrack {
    id: ViewId,
    editor: RwSignal<GradientEditor>,
    /// Window origin of this view, for anchoring the stop picker.
    origin: RwSignal<Point>,
    viewport: RwSignal<Size>,
    held: bool,
    stops: Vec<GradientStop>,
    active: Option<usize>,
    size: floem::taffy::prelude::Size<f32>,
    raster: RasterCache<Vec<(u64, String)>>,
}

fn gradient_track(
    editor: RwSignal<GradientEditor>,
    origin: RwSignal<Point>,
    viewport: RwSignal<Size>,
) -> GradientTrack {
    let id = ViewId::new();

    create_effect(move |_| {
        let update = editor.with(|e| TrackUpdate {
            stops: e.stops().to_vec(),
            active: e.active_index(),
        });
        id.update_state(update);
    });

    GradientTrack {
        id,
        editor,
        origin,
        viewport,
        held: false,
        stops: Vec::new(),
        active: None,
        size: Default::default(),
        raster: RasterCache::new(),
    }
    .style(|s| {
        s.width_full()
            .height(
                constants::TRACK_HEIGHT
                    + (constants::STOP_TAB_HEIGHT + constants::STOP_SWATCH_HEIGHT) as f32,
            )
            .cursor(floem::style::CursorStyle::Pointer)
    })
}

impl GradientTrack {
    /// The preview strip, inset so the end handles stay inside the view.
    fn track(&self) -> StopTrack {
        let half = constants::STOP_HANDLE_WIDTH / 2.0;
        let w = self.size.width as f64;
        StopTrack::new(Rect::new(
            half,
            0.0,
            (w - half).max(half),
            constants::TRACK_HEIGHT as f64,
        ))
    }

    fn press(&mut self, cx: &mut EventCx, pos: Point) {
        let track = self.track();
        match track.hit_test(&self.stops, self.active, pos) {
            Some((index, StopPart::Tab)) => {
                cx.update_active(self.id);
                self.held = true;
                let width = track.rect.width();
                self.editor
                    .update(|e| e.begin_drag(index, pos.x, width));
            }
            Some((index, StopPart::Swatch)) => {
                let offset = self.stops[index].offset;
                let local = track.handle_rect(offset);
                let anchor = local + self.origin.get_untracked().to_vec2();
                let viewport = self.viewport.get_untracked();
                self.editor.update(|e| {
                    e.open_stop_picker(index, anchor, popup_size(), viewport);
                });
            }
            None if track.rect.contains(pos) => {
                let offset = track.offset_at(pos.x);
                self.editor.update(|e| {
                    if let Err(err) = e.add_stop(offset, None) {
                        log::warn!("could not add stop: {err}");
                    }
                });
            }
            None => {}
        }
    }
}

impl View for GradientTrack {
    fn id(&self) -> ViewId {
        self.id
    }

    fn update(&mut self, _cx: &mut UpdateCx, state: Box<dyn std::any::Any>) {
        if let Ok(update) = state.downcast::<TrackUpdate>() {
            self.stops = update.stops;
            self.active = update.active;
            self.id.request_layout();
        }
    }

    fn event_before_children(&mut self, cx: &mut EventCx, event: &Event) -> EventPropagation {
        match event {
            Event::PointerDown(e) => {
                self.press(cx, e.pos);
                EventPropagation::Stop
            }
            Event::PointerMove(e) if self.held => {
                let x = e.pos.x;
                self.editor.update(|ed| {
                    ed.drag_to(x);
                });
                EventPropagation::Stop
            }
            Event::PointerUp(_) | Event::FocusLost if self.held => {
                self.held = false;
                self.editor.update(|ed| {
                    ed.end_drag();
                });
                EventPropagation::Continue
            }
            _ => EventPropagation::Continue,
        }
    }

    fn compute_layout(&mut self, _cx: &mut ComputeLayoutCx) -> Option<Rect> {
        let layout = self.id.get_layout().unwrap_or_default();
        self.size = layout.size;
        None
    }

    fn paint(&mut self, cx: &mut PaintCx) {
        if self.size.width == 0.0 || self.size.height == 0.0 {
            return;
        }
        let track = self.track();
        let rect = track.rect;
        let rrect = rect.to_rounded_rect(constants::RADIUS as f64);

        cx.save();
        cx.clip(&rrect);
        paint::paint_checkerboard(cx, rect);
        let key: Vec<(u64, String)> = self
            .stops
            .iter()
            .map(|s| (s.offset.to_bits(), s.color.clone()))
            .collect();
        let editor = self.editor;
        self.raster.draw(cx, rect, key, |pw, ph| {
            let preview = editor.with_untracked(|e| e.render_preview(pw as usize));
            paint::rasterize_columns(pw, ph, |px| {
                preview.get(px as usize).copied().unwrap_or_default()
            })
        });
        cx.restore();
        cx.stroke(&rrect, paint::OUTLINE, &floem::kurbo::Stroke::new(1.0));

        // active handle last so it sits on top
        let order = (0..self.stops.len())
            .filter(|&i| Some(i) != self.active)
            .chain(self.active.filter(|&i| i < self.stops.len()));
        for index in order {
            let stop = &self.stops[index];
            let (tab, swatch) = track.handle_rects(stop.offset);
            let is_active = Some(index) == self.active;
            let edge = if is_active {
                Color::rgb8(40, 40, 40)
            } else {
                Color::rgb8(150, 150, 150)
            };
            cx.fill(&tab.to_rounded_rect(2.0), edge, 0.0);

            let chip = swatch.to_rounded_rect(2.0);
            cx.save();
            cx.clip(&chip);
            paint::paint_checkerboard(cx, swatch);
            let c = crate::color::Rgba::from_hex(&stop.color).unwrap_or_default();
            cx.fill(&swatch, to_color(c), 0.0);
            cx.restore();
            let width = if is_active { 2.0 } else { 1.0 };
            cx.stroke(&chip, edge, &floem::kurbo::Stroke::new(width));
        }
    }
}

fn kind_button(
    editor: RwSignal<GradientEditor>,
    text: &'static str,
    kind: GradientKind,
) -> impl IntoView {
    text_button(text, move || editor.update(|e| e.set_kind(kind))).style(move |s| {
        let selected = editor.with(|e| e.settings().kind) == kind;
        s.apply_if(selected, |s| {
            s.background(Color::rgb8(210, 225, 245))
                .border_color(Color::rgb8(120, 150, 200))
        })
    })
}

fn settings_row(editor: RwSignal<GradientEditor>) -> impl IntoView {
    let is_linear = move || editor.with(|e| e.settings().kind) == GradientKind::Linear;

    let linear = number_input(
        "Angle",
        move || editor.with(|e| e.settings().angle),
        move |v| editor.update(|e| e.set_angle(v)),
    )
    .style(move |s| s.apply_if(!is_linear(), |s| s.hide()));

    let radial = h_stack((
        number_input(
            "X %",
            move || editor.with(|e| e.settings().center_x),
            move |v| {
                editor.update(|e| {
                    let y = e.settings().center_y;
                    e.set_radial_center(v, y);
                })
            },
        ),
        number_input(
            "Y %",
            move || editor.with(|e| e.settings().center_y),
            move |v| {
                editor.update(|e| {
                    let x = e.settings().center_x;
                    e.set_radial_center(x, v);
                })
            },
        ),
        number_input(
            "R %",
            move || editor.with(|e| e.settings().radius),
            move |v| editor.update(|e| e.set_radius(v)),
        ),
    ))
    .style(move |s| s.gap(4.0).apply_if(is_linear(), |s| s.hide()));

    h_stack((
        kind_button(editor, "Linear", GradientKind::Linear),
        kind_button(editor, "Radial", GradientKind::Radial),
        linear,
        radial,
    ))
    .style(|s| s.gap(constants::GAP).items_start())
}

fn stop_actions(
    editor: RwSignal<GradientEditor>,
    notice: RwSignal<Option<String>>,
) -> impl IntoView {
    h_stack((
        text_button("Add stop", move || {
            let mut result = Ok(0);
            editor.update(|e| result = e.add_stop_between_active());
            if let Err(err) = result {
                log::warn!("could not add stop: {err}");
            }
        }),
        text_button("Delete stop", move || {
            let mut result = Ok(());
            editor.update(|e| result = e.delete_active_stop());
            if let Err(err) = result {
                notice.set(Some(err.to_string()));
            }
        }),
    ))
    .style(|s| s.gap(constants::GAP))
}

/// Blocking notice: stays until dismissed.
fn notice_bar(notice: RwSignal<Option<String>>) -> impl IntoView {
    h_stack((
        label(move || notice.get().unwrap_or_default()).style(|s| {
            s.flex_grow(1.0)
                .font_size(constants::INPUT_FONT)
                .color(Color::rgb8(140, 40, 40))
        }),
        text_button("OK", move || notice.set(None)),
    ))
    .style(move |s| {
        s.gap(constants::GAP)
            .items_center()
            .padding(4.0)
            .border_radius(3.0)
            .background(Color::rgb8(253, 236, 236))
            .apply_if(notice.with(|n| n.is_none()), |s| s.hide())
    })
}

/// Creates the gradient stop editor bound to `editor`.
pub(crate) fn gradient_view(
    editor: RwSignal<GradientEditor>,
    viewport: RwSignal<Size>,
) -> impl IntoView {
    let origin = RwSignal::new(Point::ZERO);
    let notice = RwSignal::new(None::<String>);

    let sink: PickerSink = Rc::new(move |input, layout| {
        editor.update(|e| {
            if let Some((surface, rect)) = layout {
                if let Some(picker) = e.stop_picker_mut() {
                    picker.set_surface_rect(surface, rect);
                }
            }
            e.stop_picker_input(input);
        });
    });

    let panel = picker_panel(PanelLink {
        state: Rc::new(move || {
            editor
                .with(|e| e.stop_picker().map(PanelState::of))
                .unwrap_or_default()
        }),
        swatches: PickerConfig::default().swatches,
        sink,
    });

    let body = v_stack((
        gradient_track(editor, origin, viewport).on_move(move |p| origin.set(p)),
        settings_row(editor),
        stop_actions(editor, notice),
        notice_bar(notice),
    ))
    .style(|s| s.gap(constants::GAP).width_full());

    stack((
        body,
        popup_layer(
            panel,
            move || editor.with(|e| e.stop_picker().is_some()),
            move || editor.with(|e| e.stop_picker_origin()).unwrap_or_default(),
            origin,
            viewport,
            move |_| editor.update(|e| e.close_stop_picker()),
        ),
    ))
    .style(|s| s.width_full())
}

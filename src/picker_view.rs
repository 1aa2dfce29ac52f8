//! Picker popup: s/v plane, hue and alpha sliders, previews, hex and alpha
//! fields, swatches and apply/cancel. Also the trigger button that opens it.

use std::rc::Rc;

use floem::event::{Event, EventListener};
use floem::kurbo::{Point, Rect, Size};
use floem::prelude::*;
use floem::reactive::{create_effect, RwSignal, SignalGet, SignalUpdate, SignalWith};

#[cfg(feature = "alpha")]
use crate::alpha_slider::alpha_slider;
use crate::color::{Hsva, Rgba};
use crate::constants;
use crate::hue_slider::hue_slider;
#[cfg(feature = "alpha")]
use crate::inputs::alpha_input;
use crate::inputs::{copy_button, hex_input, text_button};
use crate::paint::to_color;
use crate::picker::{ColorPicker, PickerInput};
use crate::surface::PickerSink;
use crate::sv_plane::sv_plane;

/// What the panel displays, read from whichever picker it is bound to.
#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct PanelState {
    pub color: Hsva,
    pub hex: String,
    pub alpha: i64,
    pub previous: String,
}

impl PanelState {
    pub(crate) fn of(picker: &ColorPicker) -> Self {
        Self {
            color: picker.color(),
            hex: picker.hex_text(),
            alpha: picker.alpha_percent(),
            previous: picker.previous().to_hexa(),
        }
    }
}

/// Connects a panel to its picker.
#[derive(Clone)]
pub(crate) struct PanelLink {
    /// Tracked read of the bound picker.
    pub state: Rc<dyn Fn() -> PanelState>,
    pub swatches: Vec<String>,
    pub sink: PickerSink,
}

fn preview_tile(color: impl Fn() -> Rgba + 'static) -> impl IntoView {
    empty().style(move |s| {
        s.width(constants::SWATCH_SIZE * 1.5)
            .height(constants::SWATCH_SIZE * 1.5)
            .border_radius(constants::RADIUS)
            .border(1.0)
            .border_color(Color::rgb8(180, 180, 180))
            .background(to_color(color()))
    })
}

fn swatch_grid(swatches: Vec<String>, sink: PickerSink) -> impl IntoView {
    let tiles = swatches
        .into_iter()
        .enumerate()
        .filter_map(|(index, hex)| Rgba::from_hex(&hex).ok().map(|c| (index, c)))
        .map(move |(index, c)| {
            let sink = sink.clone();
            empty()
                .style(move |s| {
                    s.size(constants::SWATCH_SIZE, constants::SWATCH_SIZE)
                        .border_radius(3.0)
                        .border(1.0)
                        .border_color(Color::rgba8(0, 0, 0, 40))
                        .background(to_color(c))
                        .cursor(floem::style::CursorStyle::Pointer)
                })
                .on_event_stop(EventListener::PointerDown, move |_| {
                    sink(PickerInput::Swatch(index), None);
                })
        });
    h_stack_from_iter(tiles).style(|s| s.flex_wrap(floem::style::FlexWrap::Wrap).gap(4.0))
}

/// The popup body.
pub(crate) fn picker_panel(link: PanelLink) -> impl IntoView {
    let PanelLink {
        state,
        swatches,
        sink,
    } = link;

    let color = {
        let state = state.clone();
        move || state().color
    };

    let hex_row = {
        let (s1, s2, s3, s4) = (state.clone(), state.clone(), state.clone(), state.clone());
        let commit_sink = sink.clone();
        #[cfg(feature = "alpha")]
        let alpha_sink = sink.clone();
        #[cfg(feature = "alpha")]
        let s5 = state.clone();
        h_stack((
            preview_tile(move || {
                Rgba::from_hex(&s1().previous).unwrap_or_default()
            }),
            preview_tile(move || s2().color.to_rgba()),
            hex_input(
                move || s3().hex,
                move |text| commit_sink(PickerInput::HexCommit(text), None),
            ),
            #[cfg(feature = "alpha")]
            alpha_input(
                move || s5().alpha,
                move |text| alpha_sink(PickerInput::AlphaCommit(text), None),
            ),
            copy_button(move || s4().hex),
        ))
        .style(|s| s.gap(4.0).items_center())
    };

    let actions = {
        let (apply, cancel) = (sink.clone(), sink.clone());
        h_stack((
            empty().style(|s| s.flex_grow(1.0)),
            text_button("Cancel", move || cancel(PickerInput::Cancel, None)),
            text_button("Apply", move || apply(PickerInput::Apply, None)),
        ))
        .style(|s| s.gap(constants::GAP).items_center())
    };

    v_stack((
        sv_plane(color.clone(), sink.clone()),
        hue_slider(color.clone(), sink.clone()),
        #[cfg(feature = "alpha")]
        alpha_slider(color, sink.clone()),
        hex_row,
        swatch_grid(swatches, sink),
        actions,
    ))
    .style(|s| {
        s.width(constants::POPUP_WIDTH)
            .gap(constants::GAP)
            .padding(constants::PADDING)
            .border_radius(6.0)
            .border(1.0)
            .border_color(Color::rgb8(200, 200, 200))
            .background(Color::rgb8(242, 242, 242))
    })
    // keep presses inside the popup away from the backdrop
    .on_event_stop(EventListener::PointerDown, |_| {})
}

pub(crate) fn popup_size() -> Size {
    Size::new(constants::POPUP_WIDTH as f64, constants::POPUP_HEIGHT)
}

/// Positions `panel` at `origin` (window coordinates) above a window-sized
/// backdrop that reports presses outside the panel to `on_outside`.
/// `host` is the window origin of the view this layer is placed in.
pub(crate) fn popup_layer(
    panel: impl IntoView + 'static,
    visible: impl Fn() -> bool + 'static,
    origin: impl Fn() -> Point + 'static,
    host: RwSignal<Point>,
    viewport: RwSignal<Size>,
    on_outside: impl Fn(Point) + 'static,
) -> impl IntoView {
    let backdrop = empty()
        .style(move |s| {
            let host = host.get();
            let vp = viewport.get();
            s.absolute()
                .inset_left(-host.x as f32)
                .inset_top(-host.y as f32)
                .width(vp.width as f32)
                .height(vp.height as f32)
        })
        .on_event_stop(EventListener::PointerDown, move |e| {
            if let Event::PointerDown(pe) = e {
                // the backdrop sits at the window origin
                on_outside(pe.pos);
            }
        });

    let panel = container(panel).style(move |s| {
        let host = host.get();
        let at = origin();
        s.absolute()
            .inset_left((at.x - host.x) as f32)
            .inset_top((at.y - host.y) as f32)
    });

    stack((backdrop, panel)).style(move |s| {
        s.absolute()
            .inset_left(0.0)
            .inset_top(0.0)
            .z_index(100)
            .apply_if(!visible(), |s| s.hide())
    })
}

/// Swatch button plus popup, bound to `picker`.
pub(crate) fn picker_with_trigger(
    picker: RwSignal<ColorPicker>,
    viewport: RwSignal<Size>,
) -> impl IntoView {
    let trigger_origin = RwSignal::new(Point::ZERO);
    let trigger_size = RwSignal::new(Size::ZERO);

    // the picker needs the trigger in window coordinates for outside clicks
    create_effect(move |_| {
        let rect = Rect::from_origin_size(trigger_origin.get(), trigger_size.get());
        picker.update(|p| p.set_trigger_rect(Some(rect)));
    });

    let origin = move || {
        let vp = viewport.get();
        picker
            .with(|p| p.popup_origin(popup_size(), vp))
            .unwrap_or_default()
    };

    // record the popup rect while open so outside clicks can be told apart
    create_effect(move |_| {
        if picker.with(|p| p.is_open()) {
            let at = origin();
            let rect = Rect::from_origin_size(at, popup_size());
            if picker.with_untracked(|p| p.popup_rect()) != rect {
                picker.update(|p| p.set_popup_rect(rect));
            }
        }
    });

    let sink: PickerSink = Rc::new(move |input, layout| {
        picker.update(|p| {
            if let Some((surface, rect)) = layout {
                p.set_surface_rect(surface, rect);
            }
            p.handle(input);
        });
    });

    let swatches = picker.with_untracked(|p| p.swatches().to_vec());
    let panel = picker_panel(PanelLink {
        state: Rc::new(move || picker.with(PanelState::of)),
        swatches,
        sink,
    });

    let trigger = empty()
        .style(move |s| {
            let c = picker.with(|p| p.color().to_rgba());
            s.size(constants::TRIGGER_SIZE, constants::TRIGGER_SIZE)
                .border_radius(constants::RADIUS)
                .border(1.0)
                .border_color(Color::rgb8(180, 180, 180))
                .background(to_color(c))
                .cursor(floem::style::CursorStyle::Pointer)
        })
        .on_move(move |p| trigger_origin.set(p))
        .on_resize(move |r| trigger_size.set(r.size()))
        .on_event_stop(EventListener::PointerDown, move |_| {
            picker.update(|p| p.toggle());
        });

    stack((
        trigger,
        popup_layer(
            panel,
            move || picker.with(|p| p.is_open()),
            origin,
            trigger_origin,
            viewport,
            move |pos| {
                picker.update(|p| {
                    // a press on the trigger while open closes, like a toggle
                    if !p.pointer_down_outside(pos) {
                        p.toggle();
                    }
                });
            },
        ),
    ))
}

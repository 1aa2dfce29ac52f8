//! Text inputs that commit on Enter or focus loss, plus the copy button.
//!
//! None of them clamp or rewrite what the user typed. A commit the owner
//! rejects leaves the text as typed until the underlying value changes.

use floem::event::{Event, EventListener, EventPropagation};
use floem::prelude::*;
use floem::reactive::{create_effect, RwSignal, SignalGet, SignalUpdate};

use crate::constants;

fn is_enter(event: &Event) -> bool {
    match event {
        Event::KeyDown(ke) => {
            ke.key.logical_key == floem::keyboard::Key::Named(floem::keyboard::NamedKey::Enter)
        }
        _ => false,
    }
}

/// Text field mirroring `source`, handing its text to `on_commit`.
fn commit_field(
    source: impl Fn() -> String + 'static,
    on_commit: impl Fn(String) + 'static,
    width: f32,
) -> impl IntoView {
    let text = RwSignal::new(String::new());

    create_effect(move |_| {
        let value = source();
        if text.get_untracked() != value {
            text.set(value);
        }
    });

    let on_commit = std::rc::Rc::new(on_commit);
    let on_commit_key = on_commit.clone();

    text_input(text)
        .style(move |s| {
            s.width(width)
                .padding(2.0)
                .font_size(constants::INPUT_FONT)
                .font_family("monospace".to_string())
                .background(Color::WHITE)
                .border(1.0)
                .border_color(Color::rgb8(200, 200, 200))
                .border_radius(3.0)
        })
        .on_event_stop(EventListener::FocusLost, move |_| {
            on_commit(text.get_untracked());
        })
        .on_event(EventListener::KeyDown, move |e| {
            if is_enter(e) {
                on_commit_key(text.get_untracked());
                return EventPropagation::Stop;
            }
            EventPropagation::Continue
        })
}

/// Hex field. Only strictly valid `#RGB`, `#RRGGBB` or `#RRGGBBAA` text
/// takes effect; that check belongs to the receiver of `on_commit`.
pub(crate) fn hex_input(
    hex: impl Fn() -> String + 'static,
    on_commit: impl Fn(String) + 'static,
) -> impl IntoView {
    commit_field(hex, on_commit, constants::HEX_INPUT_WIDTH)
}

/// Alpha percentage field (0–100) with a `%` label to its right.
#[cfg(feature = "alpha")]
pub(crate) fn alpha_input(
    percent: impl Fn() -> i64 + 'static,
    on_commit: impl Fn(String) + 'static,
) -> impl IntoView {
    h_stack((
        commit_field(
            move || percent().to_string(),
            on_commit,
            constants::ALPHA_INPUT_WIDTH,
        ),
        label(|| "%").style(|s| {
            s.font_size(constants::LABEL_FONT)
                .color(Color::rgb8(120, 120, 120))
        }),
    ))
    .style(|s| s.items_center().gap(2.0))
}

/// Labelled numeric field. Text that does not parse to a finite number is
/// ignored.
pub(crate) fn number_input(
    lbl: &'static str,
    value: impl Fn() -> f64 + 'static,
    on_commit: impl Fn(f64) + 'static,
) -> impl IntoView {
    v_stack((
        commit_field(
            move || format!("{}", value().round() as i64),
            move |raw| {
                match raw.trim().parse::<f64>() {
                    Ok(num) if num.is_finite() => on_commit(num),
                    _ => log::debug!("ignoring number input {raw:?}"),
                }
            },
            constants::NUMBER_INPUT_WIDTH,
        ),
        label(move || lbl).style(|s| {
            s.font_size(constants::LABEL_FONT)
                .color(Color::rgb8(120, 120, 120))
                .justify_content(Some(floem::taffy::AlignContent::Center))
        }),
    ))
    .style(|s| s.items_center().gap(1.0))
}

/// A small copy button that copies the result of `get_text` to the clipboard.
pub(crate) fn copy_button(get_text: impl Fn() -> String + 'static) -> impl IntoView {
    let pressed = RwSignal::new(false);
    container(
        label(|| lucide_icons::Icon::Copy.unicode().to_string()).style(move |s| {
            let c = if pressed.get() {
                Color::rgb8(80, 80, 80)
            } else {
                Color::rgb8(120, 120, 120)
            };
            s.font_size(14.0).font_family("lucide".to_string()).color(c)
        }),
    )
    .style(|s| {
        s.size(20.0, 20.0)
            .items_center()
            .justify_center()
            .border_radius(3.0)
            .cursor(floem::style::CursorStyle::Pointer)
            .hover(|s| s.background(Color::rgb8(230, 230, 230)))
    })
    .on_event_stop(EventListener::PointerDown, move |_| {
        pressed.set(true);
    })
    .on_event_stop(EventListener::PointerUp, move |_| {
        pressed.set(false);
        copy_to_clipboard(&get_text());
    })
}

fn copy_to_clipboard(text: &str) {
    match arboard::Clipboard::new() {
        Ok(mut clipboard) => {
            if let Err(err) = clipboard.set_text(text) {
                log::warn!("clipboard write failed: {err}");
            }
        }
        Err(err) => log::warn!("clipboard unavailable: {err}"),
    }
}

/// Small text button used for apply/cancel and the stop actions.
pub(crate) fn text_button(text: &'static str, on_click: impl Fn() + 'static) -> impl IntoView {
    label(move || text)
        .style(|s| {
            s.font_size(constants::INPUT_FONT)
                .padding_horiz(8.0)
                .padding_vert(3.0)
                .border(1.0)
                .border_color(Color::rgb8(200, 200, 200))
                .border_radius(3.0)
                .background(Color::WHITE)
                .cursor(floem::style::CursorStyle::Pointer)
                .hover(|s| s.background(Color::rgb8(230, 230, 230)))
        })
        .on_event_stop(EventListener::PointerUp, move |_| on_click())
}

//! # floem-gradient
//!
//! Color and gradient editing for a wallpaper designer built on
//! [Floem](https://github.com/lapce/floem).
//!
//! - [`ColorPicker`]: HSV picker state with a saturation/value plane, hue
//!   and alpha sliders, hex and alpha fields, swatches and apply/cancel.
//! - [`GradientEditor`]: ordered color stops with drag, add and delete, a
//!   per-stop picker and linear/radial output for a canvas.
//! - [`EditorState`] and [`DesignStore`]: the document side of the designer,
//!   driving any [`Scene`] implementation and persisting saved designs.
//!
//! Both editors are plain structs. The views in this crate hold them in an
//! `RwSignal` and feed pointer and keyboard input through them, so the same
//! logic can be driven headless.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use floem::kurbo::Size;
//! use floem::prelude::*;
//! use floem_gradient::{color_picker, gradient_editor, ColorPicker, GradientEditor};
//!
//! let viewport = RwSignal::new(Size::new(1280.0, 800.0));
//! let picker = RwSignal::new(ColorPicker::new("#3B82F6"));
//! let editor = RwSignal::new(GradientEditor::new(Size::new(1920.0, 1080.0)));
//! // Use `color_picker(picker, viewport)` and `gradient_editor(editor, viewport)`
//! // in your Floem view tree.
//! ```
//!
//! Callbacks registered with `on_change`, `on_open`, `on_close` and
//! `on_preview` run while the signal is being updated, so they must not read
//! the signal that owns the picker or editor.

#[cfg(feature = "alpha")]
mod alpha_slider;
mod color;
mod constants;
mod document;
mod error;
mod gradient;
mod gradient_view;
mod hue_slider;
mod inputs;
mod math;
mod paint;
mod picker;
mod picker_view;
mod scene;
mod store;
mod surface;
mod sv_plane;

pub use color::{
    component_to_hex, hex_to_hsva, hsva_to_rgba, is_valid_hex, lerp_rgba, rgb_to_hex,
    rgba_to_hexa, rgba_to_hsva, Hsva, Rgba,
};
pub use constants::{DEFAULT_COLOR, MIN_STOPS, PRESET_COLORS};
pub use document::{
    BackgroundMode, CanvasFit, EditorState, PropertyPanel, DEFAULT_BACKGROUND, DEFAULT_HEIGHT,
    DEFAULT_WIDTH,
};
pub use error::{Error, Result};
pub use gradient::{
    linear_endpoints, radial_geometry, ColorStop, GradientDefinition, GradientEditor,
    GradientGeometry, GradientKind, GradientSettings, GradientStop, StopId, StopPart, StopTrack,
};
pub use picker::{place_popup, ColorChange, ColorPicker, PickerConfig, PickerInput, Surface};
pub use scene::{
    Background, ExportOptions, ImageFormat, ObjectId, ObjectInfo, Property, Scene,
    SelectionChanged, ShapeKind, ShapeProps,
};
pub use store::{data_url, Design, DesignStore, THUMBNAIL_OPTIONS};

use std::sync::Once;

use floem::kurbo::Size;
use floem::prelude::*;
use floem::reactive::RwSignal;
use floem::text::FONT_SYSTEM;

static LOAD_LUCIDE_FONT: Once = Once::new();

fn load_icon_font() {
    LOAD_LUCIDE_FONT.call_once(|| {
        FONT_SYSTEM
            .lock()
            .db_mut()
            .load_font_data(lucide_icons::LUCIDE_FONT_BYTES.to_vec());
    });
}

/// Creates a swatch button that opens a picker popup.
///
/// The view reads from and writes to `picker`. `viewport` is the window size;
/// the popup is placed inside it and presses anywhere outside close it.
pub fn color_picker(picker: RwSignal<ColorPicker>, viewport: RwSignal<Size>) -> impl IntoView {
    load_icon_font();
    picker_view::picker_with_trigger(picker, viewport)
}

/// Creates the gradient stop editor: preview track, stop handles, per-stop
/// picker and linear/radial settings.
pub fn gradient_editor(
    editor: RwSignal<GradientEditor>,
    viewport: RwSignal<Size>,
) -> impl IntoView {
    load_icon_font();
    gradient_view::gradient_view(editor, viewport)
}

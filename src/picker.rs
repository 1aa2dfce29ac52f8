//! Headless HSVA color picker.
//!
//! [`ColorPicker`] owns one color and turns pointer drags on its three
//! control surfaces, text commits, swatch clicks and apply/cancel into
//! [`ColorChange`] events. It knows nothing about windows: the view layer
//! reports where the surfaces are (`set_surface_rect`) and forwards input as
//! [`PickerInput`]. That keeps every interaction testable with plain
//! coordinates.

use floem::kurbo::{Point, Rect, Size};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::color::{self, Hsva, Rgba};
use crate::constants;

/// Highest hue a hue drag can produce. Keeps the right edge of the slider
/// from wrapping back to the left.
const MAX_DRAG_HUE: f64 = 360.0 - 1e-6;

/// The three draggable control surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Surface {
    /// 2D plane: x → saturation, y → value (inverted).
    SaturationValue,
    Hue,
    Alpha,
}

/// One user interaction with the picker.
#[derive(Debug, Clone, PartialEq)]
pub enum PickerInput {
    PointerDown { surface: Surface, pos: Point },
    /// Document-level move; only does something while a drag is captured.
    PointerMove { pos: Point },
    PointerUp,
    HexCommit(String),
    /// Alpha percentage text (0–100).
    AlphaCommit(String),
    Swatch(usize),
    Apply,
    Cancel,
}

impl PickerInput {
    /// True for updates that happen on every pointer tick.
    pub fn is_live(&self) -> bool {
        matches!(
            self,
            PickerInput::PointerDown { .. } | PickerInput::PointerMove { .. }
        )
    }
}

/// Payload of every change notification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorChange {
    pub hsva: Hsva,
    pub rgba: Rgba,
    /// `#RRGGBB`
    pub hex: String,
    /// `#RRGGBB` or `#RRGGBBAA`
    pub hexa: String,
    /// Set by apply/cancel; live drags and text edits are not final.
    pub is_final: bool,
}

impl ColorChange {
    fn new(hsva: Hsva, is_final: bool) -> Self {
        Self {
            hsva,
            rgba: hsva.to_rgba(),
            hex: hsva.to_hex(),
            hexa: hsva.to_hexa(),
            is_final,
        }
    }
}

/// Construction options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickerConfig {
    pub initial_color: String,
    pub swatches: Vec<String>,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            initial_color: constants::DEFAULT_COLOR.to_string(),
            swatches: constants::PRESET_COLORS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct SurfaceRects {
    saturation_value: Rect,
    hue: Rect,
    alpha: Rect,
}

impl SurfaceRects {
    fn get(&self, surface: Surface) -> Rect {
        match surface {
            Surface::SaturationValue => self.saturation_value,
            Surface::Hue => self.hue,
            Surface::Alpha => self.alpha,
        }
    }

    fn get_mut(&mut self, surface: Surface) -> &mut Rect {
        match surface {
            Surface::SaturationValue => &mut self.saturation_value,
            Surface::Hue => &mut self.hue,
            Surface::Alpha => &mut self.alpha,
        }
    }
}

type ChangeCallback = Box<dyn Fn(&ColorChange)>;
type NotifyCallback = Box<dyn Fn()>;

pub struct ColorPicker {
    color: Hsva,
    /// Color recorded on open; cancel reverts to it.
    previous: Hsva,
    open: bool,
    /// Surface currently capturing pointer moves.
    drag: Option<Surface>,
    surfaces: SurfaceRects,
    popup: Rect,
    /// Present when the picker hangs off a button; absent in embedded mode.
    trigger: Option<Rect>,
    swatches: Vec<String>,
    on_change: Option<ChangeCallback>,
    on_open: Option<NotifyCallback>,
    on_close: Option<NotifyCallback>,
}

impl ColorPicker {
    /// Creates a closed picker. Invalid hex falls back to the default color.
    pub fn new(initial_hex: &str) -> Self {
        Self::with_config(PickerConfig {
            initial_color: initial_hex.to_string(),
            ..PickerConfig::default()
        })
    }

    pub fn with_config(config: PickerConfig) -> Self {
        let color = color::hex_to_hsva(&config.initial_color).unwrap_or_else(|e| {
            warn!("{e}; using {}", constants::DEFAULT_COLOR);
            color::hex_to_hsva(constants::DEFAULT_COLOR).unwrap_or_default()
        });
        Self {
            color,
            previous: color,
            open: false,
            drag: None,
            surfaces: SurfaceRects::default(),
            popup: Rect::ZERO,
            trigger: None,
            swatches: config.swatches,
            on_change: None,
            on_open: None,
            on_close: None,
        }
    }

    pub fn on_change(mut self, f: impl Fn(&ColorChange) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    pub fn on_open(mut self, f: impl Fn() + 'static) -> Self {
        self.on_open = Some(Box::new(f));
        self
    }

    pub fn on_close(mut self, f: impl Fn() + 'static) -> Self {
        self.on_close = Some(Box::new(f));
        self
    }

    pub fn color(&self) -> Hsva {
        self.color
    }

    /// Color captured by the last `open`/`apply`.
    pub fn previous(&self) -> Hsva {
        self.previous
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn dragging(&self) -> Option<Surface> {
        self.drag
    }

    pub fn swatches(&self) -> &[String] {
        &self.swatches
    }

    pub fn set_surface_rect(&mut self, surface: Surface, rect: Rect) {
        *self.surfaces.get_mut(surface) = rect;
    }

    pub fn set_popup_rect(&mut self, rect: Rect) {
        self.popup = rect;
    }

    pub fn popup_rect(&self) -> Rect {
        self.popup
    }

    pub fn set_trigger_rect(&mut self, rect: Option<Rect>) {
        self.trigger = rect;
    }

    pub fn open(&mut self) {
        self.previous = self.color;
        self.open = true;
        debug!("picker opened at {}", self.previous.to_hexa());
        if let Some(cb) = &self.on_open {
            cb();
        }
    }

    /// Hides the popup and releases any drag. Does not revert the color.
    pub fn close(&mut self) {
        self.drag = None;
        if !self.open {
            return;
        }
        self.open = false;
        debug!("picker closed at {}", self.color.to_hexa());
        if let Some(cb) = &self.on_close {
            cb();
        }
    }

    pub fn toggle(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open();
        }
    }

    /// Dispatches one interaction. Returns the emitted change, if any.
    pub fn handle(&mut self, input: PickerInput) -> Option<ColorChange> {
        match input {
            PickerInput::PointerDown { surface, pos } => Some(self.pointer_down(surface, pos)),
            PickerInput::PointerMove { pos } => self.pointer_move(pos),
            PickerInput::PointerUp => {
                self.pointer_up();
                None
            }
            PickerInput::HexCommit(text) => self.commit_hex(&text),
            PickerInput::AlphaCommit(text) => self.commit_alpha(&text),
            PickerInput::Swatch(index) => self.select_swatch(index),
            PickerInput::Apply => Some(self.apply()),
            PickerInput::Cancel => Some(self.cancel()),
        }
    }

    /// Starts a drag on `surface` and applies the press position.
    pub fn pointer_down(&mut self, surface: Surface, pos: Point) -> ColorChange {
        self.drag = Some(surface);
        self.apply_pointer(surface, pos);
        self.emit(false)
    }

    /// Applies a move to the captured surface. Ignored without a capture.
    pub fn pointer_move(&mut self, pos: Point) -> Option<ColorChange> {
        let surface = self.drag?;
        self.apply_pointer(surface, pos);
        Some(self.emit(false))
    }

    /// Ends the drag. Returns whether one was active.
    pub fn pointer_up(&mut self) -> bool {
        self.drag.take().is_some()
    }

    fn apply_pointer(&mut self, surface: Surface, pos: Point) {
        let rect = self.surfaces.get(surface);
        let fx = fraction(pos.x - rect.x0, rect.width());
        match surface {
            Surface::SaturationValue => {
                let fy = fraction(pos.y - rect.y0, rect.height());
                self.color = Hsva::new(self.color.h, fx, 1.0 - fy, self.color.a);
            }
            Surface::Hue => {
                self.color = self.color.with_hue((fx * 360.0).min(MAX_DRAG_HUE));
            }
            Surface::Alpha => {
                self.color = self.color.with_alpha(fx);
            }
        }
    }

    /// Hex text commit. Only strictly valid `#`-prefixed hex takes effect.
    /// Committing the text already shown is a no-op, so the exact color
    /// (including the hue of a gray) survives a focus change.
    pub fn commit_hex(&mut self, text: &str) -> Option<ColorChange> {
        let text = text.trim();
        if text.eq_ignore_ascii_case(&self.hex_text()) {
            return None;
        }
        if !color::is_valid_hex(text) {
            debug!("ignoring hex input {text:?}");
            return None;
        }
        self.color = color::hex_to_hsva(text).ok()?;
        Some(self.emit(false))
    }

    /// Alpha percentage commit. Values outside 0–100 are rejected, not clamped.
    pub fn commit_alpha(&mut self, text: &str) -> Option<ColorChange> {
        let percent = text.trim().trim_end_matches('%').trim().parse::<f64>().ok()?;
        if !(0.0..=100.0).contains(&percent) {
            debug!("ignoring alpha input {text:?}");
            return None;
        }
        if percent == self.alpha_percent() as f64 {
            return None;
        }
        self.color = self.color.with_alpha(percent / 100.0);
        Some(self.emit(false))
    }

    /// Takes hue/saturation/value from a swatch, keeps the current alpha.
    pub fn select_swatch(&mut self, index: usize) -> Option<ColorChange> {
        let swatch = color::hex_to_hsva(self.swatches.get(index)?).ok()?;
        self.color = swatch.with_alpha(self.color.a);
        Some(self.emit(false))
    }

    /// Commits the current color and closes.
    pub fn apply(&mut self) -> ColorChange {
        self.previous = self.color;
        self.close();
        self.emit(true)
    }

    /// Restores the color recorded at open and closes.
    pub fn cancel(&mut self) -> ColorChange {
        self.color = self.previous;
        self.close();
        self.emit(true)
    }

    /// Pointer down anywhere in the window. Closes when it lands outside
    /// both the popup and the trigger; returns whether it closed.
    pub fn pointer_down_outside(&mut self, pos: Point) -> bool {
        if !self.open || self.popup.contains(pos) {
            return false;
        }
        if self.trigger.map_or(false, |t| t.contains(pos)) {
            return false;
        }
        self.close();
        true
    }

    /// Popup origin next to the trigger; `None` in embedded mode.
    pub fn popup_origin(&self, popup: Size, viewport: Size) -> Option<Point> {
        self.trigger.map(|t| place_popup(t, popup, viewport))
    }

    fn emit(&self, is_final: bool) -> ColorChange {
        let change = ColorChange::new(self.color, is_final);
        if let Some(cb) = &self.on_change {
            cb(&change);
        }
        change
    }

    /// Value shown in the alpha text field.
    pub fn alpha_percent(&self) -> i64 {
        (self.color.a * 100.0).round() as i64
    }

    /// Value shown in the hex text field.
    pub fn hex_text(&self) -> String {
        self.color.to_hexa()
    }
}

/// Offset along a surface as 0.0–1.0, clamped to its bounds.
fn fraction(offset: f64, extent: f64) -> f64 {
    if extent <= 0.0 {
        return 0.0;
    }
    (offset / extent).clamp(0.0, 1.0)
}

/// Places a popup of size `popup` under `anchor`, centered on it.
///
/// Flips above when the bottom would be clipped, then clamps horizontally
/// to the viewport with [`constants::VIEWPORT_MARGIN`].
pub fn place_popup(anchor: Rect, popup: Size, viewport: Size) -> Point {
    let gap = constants::POPUP_GAP;
    let margin = constants::VIEWPORT_MARGIN;

    let mut left = anchor.x0 + anchor.width() / 2.0 - popup.width / 2.0;
    let mut top = anchor.y1 + gap;
    if top + popup.height > viewport.height - margin {
        top = anchor.y0 - popup.height - gap;
    }
    if left < margin {
        left = margin;
    }
    if left + popup.width > viewport.width - margin {
        left = viewport.width - popup.width - margin;
    }
    Point::new(left, top)
}

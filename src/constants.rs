//! Sizing, color, and styling constants for the picker and gradient editor.

/// 1D slider track height
pub const SLIDER_HEIGHT: f32 = 14.0;

/// Saturation/value plane height
pub const PLANE_HEIGHT: f32 = 150.0;

/// Popup width
pub const POPUP_WIDTH: f32 = 232.0;

/// Popup height used for placement
pub const POPUP_HEIGHT: f64 = 320.0;

/// Edge of the trigger swatch button
pub const TRIGGER_SIZE: f32 = 28.0;

/// Pointer ring radius on the saturation/value plane
pub const CURSOR_RADIUS: f64 = 6.0;

/// Thumb radius on 1D sliders
pub const THUMB_RADIUS: f64 = 7.0;

/// Border radius for slider tracks
pub const RADIUS: f32 = 4.0;

/// Gap between picker elements
pub const GAP: f32 = 8.0;

/// Padding around the whole picker
pub const PADDING: f32 = 8.0;

/// Hex input field width
pub const HEX_INPUT_WIDTH: f32 = 80.0;

/// Alpha percentage field width
pub const ALPHA_INPUT_WIDTH: f32 = 32.0;

/// Numeric settings field width
pub const NUMBER_INPUT_WIDTH: f32 = 40.0;

/// Input font size
pub const INPUT_FONT: f32 = 11.0;

/// Label font size
pub const LABEL_FONT: f32 = 10.0;

/// Swatch tile edge
pub const SWATCH_SIZE: f32 = 16.0;

/// Checkerboard cell size (for alpha backgrounds)
pub const CHECKER_CELL: f64 = 5.0;

/// Space between a trigger and its popup
pub const POPUP_GAP: f64 = 10.0;

/// Minimum distance kept between a popup and the viewport edges
pub const VIEWPORT_MARGIN: f64 = 10.0;

/// Gradient track height
pub const TRACK_HEIGHT: f32 = 28.0;

/// Stop handle width (a grab tab under the track, then a color swatch)
pub const STOP_HANDLE_WIDTH: f64 = 14.0;

/// Height of the color swatch hanging below the grab tab
pub const STOP_SWATCH_HEIGHT: f64 = 14.0;

/// Height of the grab tab directly below the track
pub const STOP_TAB_HEIGHT: f64 = 8.0;

/// Fewest stops a gradient may have
pub const MIN_STOPS: usize = 2;

/// Default initial color for a picker
pub const DEFAULT_COLOR: &str = "#FF0000";

/// Default palette offered as swatches
pub const PRESET_COLORS: [&str; 18] = [
    "#FF0000", "#FF8000", "#FFFF00", "#80FF00", "#00FF00", "#00FF80", "#00FFFF", "#0080FF",
    "#0000FF", "#8000FF", "#FF00FF", "#FF0080", "#FFFFFF", "#CCCCCC", "#999999", "#666666",
    "#333333", "#000000",
];

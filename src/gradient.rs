//! Gradient stop editor.
//!
//! [`GradientEditor`] owns an ordered list of color stops on `[0, 1]`, the
//! active selection, the drag in progress and the gradient geometry
//! settings. Every committed mutation recomputes a [`GradientDefinition`]
//! and hands it to `on_change`; live drags only refresh `on_preview`.
//!
//! Stop colors are edited through an embedded [`ColorPicker`] bound to one
//! stop at a time (see [`GradientEditor::open_stop_picker`]).

use std::cmp::Ordering;

use floem::kurbo::{Point, Rect, Size};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::color::{self, Rgba};
use crate::constants;
use crate::error::{Error, Result};
use crate::picker::{self, ColorPicker, PickerInput};

/// Stable identity of a stop; survives re-sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StopId(u64);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub id: StopId,
    /// Position along the gradient, 0.0–1.0.
    pub offset: f64,
    /// `#RRGGBB` or `#RRGGBBAA`
    pub color: String,
}

impl GradientStop {
    fn rgba(&self) -> Rgba {
        Rgba::from_hex(&self.color).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientKind {
    #[default]
    Linear,
    Radial,
}

/// User-facing gradient parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientSettings {
    pub kind: GradientKind,
    /// Degrees; 0 runs left to right, 90 top to bottom.
    pub angle: f64,
    /// Radial center, percent of canvas width.
    pub center_x: f64,
    /// Radial center, percent of canvas height.
    pub center_y: f64,
    /// Percent of the farthest corner's distance from the center.
    pub radius: f64,
}

impl Default for GradientSettings {
    fn default() -> Self {
        Self {
            kind: GradientKind::Linear,
            angle: 0.0,
            center_x: 50.0,
            center_y: 50.0,
            radius: 100.0,
        }
    }
}

/// Stop as handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub offset: f64,
    pub color: String,
}

/// Canvas-space geometry of a gradient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GradientGeometry {
    Linear { x1: f64, y1: f64, x2: f64, y2: f64 },
    Radial { cx: f64, cy: f64, r: f64 },
}

/// Output artifact for the renderer; recomputed on every commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientDefinition {
    #[serde(flatten)]
    pub geometry: GradientGeometry,
    /// Sorted by offset.
    pub stops: Vec<ColorStop>,
}

impl GradientDefinition {
    pub fn kind(&self) -> GradientKind {
        match self.geometry {
            GradientGeometry::Linear { .. } => GradientKind::Linear,
            GradientGeometry::Radial { .. } => GradientKind::Radial,
        }
    }
}

/// Linear endpoints for `angle` such that the line spans the whole canvas:
/// the corners are projected onto the direction and the extremes kept.
pub fn linear_endpoints(canvas: Size, angle: f64) -> (Point, Point) {
    let (sin, cos) = angle.to_radians().sin_cos();
    let center = Point::new(canvas.width / 2.0, canvas.height / 2.0);
    let corners = [
        Point::new(0.0, 0.0),
        Point::new(canvas.width, 0.0),
        Point::new(0.0, canvas.height),
        Point::new(canvas.width, canvas.height),
    ];
    let (mut min, mut max) = (f64::INFINITY, f64::NEG_INFINITY);
    for corner in corners {
        let t = (corner.x - center.x) * cos + (corner.y - center.y) * sin;
        min = min.min(t);
        max = max.max(t);
    }
    (
        Point::new(center.x + cos * min, center.y + sin * min),
        Point::new(center.x + cos * max, center.y + sin * max),
    )
}

/// Radial center and radius from percentage settings.
pub fn radial_geometry(canvas: Size, center_x: f64, center_y: f64, radius: f64) -> (Point, f64) {
    let center = Point::new(
        canvas.width * center_x / 100.0,
        canvas.height * center_y / 100.0,
    );
    let farthest = [
        Point::new(0.0, 0.0),
        Point::new(canvas.width, 0.0),
        Point::new(0.0, canvas.height),
        Point::new(canvas.width, canvas.height),
    ]
    .into_iter()
    .map(|corner| corner.distance(center))
    .fold(0.0, f64::max);
    (center, farthest * radius / 100.0)
}

/// Which part of a stop handle was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopPart {
    /// Grab tab; starts a drag.
    Tab,
    /// Color chip; opens the stop picker.
    Swatch,
}

/// Geometry of the preview track and the stop handles hanging below it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StopTrack {
    pub rect: Rect,
}

impl StopTrack {
    pub fn new(rect: Rect) -> Self {
        Self { rect }
    }

    pub fn x_for(&self, offset: f64) -> f64 {
        self.rect.x0 + offset * self.rect.width()
    }

    /// Offset under a pointer x, clamped to the track.
    pub fn offset_at(&self, x: f64) -> f64 {
        if self.rect.width() <= 0.0 {
            return 0.0;
        }
        ((x - self.rect.x0) / self.rect.width()).clamp(0.0, 1.0)
    }

    /// (tab, swatch) rects for a stop at `offset`.
    pub fn handle_rects(&self, offset: f64) -> (Rect, Rect) {
        let half = constants::STOP_HANDLE_WIDTH / 2.0;
        let x = self.x_for(offset);
        let tab = Rect::new(x - half, self.rect.y1, x + half, self.rect.y1 + constants::STOP_TAB_HEIGHT);
        let swatch = Rect::new(
            x - half,
            tab.y1,
            x + half,
            tab.y1 + constants::STOP_SWATCH_HEIGHT,
        );
        (tab, swatch)
    }

    /// Full handle rect, used to anchor the stop picker.
    pub fn handle_rect(&self, offset: f64) -> Rect {
        let (tab, swatch) = self.handle_rects(offset);
        tab.union(swatch)
    }

    /// Topmost handle under `pos`. The active stop is painted last, so it
    /// wins ties.
    pub fn hit_test(
        &self,
        stops: &[GradientStop],
        active: Option<usize>,
        pos: Point,
    ) -> Option<(usize, StopPart)> {
        let hit = |index: usize| {
            let (tab, swatch) = self.handle_rects(stops[index].offset);
            if swatch.contains(pos) {
                Some((index, StopPart::Swatch))
            } else if tab.contains(pos) {
                Some((index, StopPart::Tab))
            } else {
                None
            }
        };
        if let Some(found) = active.filter(|&i| i < stops.len()).and_then(hit) {
            return Some(found);
        }
        (0..stops.len()).rev().find_map(hit)
    }
}

#[derive(Debug, Clone, Copy)]
struct StopDrag {
    id: StopId,
    start_x: f64,
    start_offset: f64,
    track_width: f64,
}

/// Picker bound to a single stop while its color is being edited.
struct StopPicker {
    stop: StopId,
    picker: ColorPicker,
    origin: Point,
}

type DefinitionCallback = Box<dyn Fn(&GradientDefinition)>;
type PreviewCallback = Box<dyn Fn(&[GradientStop])>;

pub struct GradientEditor {
    stops: Vec<GradientStop>,
    next_id: u64,
    active: Option<usize>,
    drag: Option<StopDrag>,
    settings: GradientSettings,
    canvas: Size,
    stop_picker: Option<StopPicker>,
    /// Bumped on every commit.
    revision: u64,
    on_change: Option<DefinitionCallback>,
    on_preview: Option<PreviewCallback>,
}

impl GradientEditor {
    /// Two stops, black at 0 and white at 1.
    pub fn new(canvas: Size) -> Self {
        let mut editor = Self {
            stops: Vec::new(),
            next_id: 0,
            active: None,
            drag: None,
            settings: GradientSettings::default(),
            canvas,
            stop_picker: None,
            revision: 0,
            on_change: None,
            on_preview: None,
        };
        let first = editor.make_stop(0.0, "#000000".to_string());
        let last = editor.make_stop(1.0, "#FFFFFF".to_string());
        editor.stops = vec![first, last];
        editor
    }

    /// Starts from explicit `(offset, color)` stops.
    pub fn with_stops(canvas: Size, stops: &[(f64, &str)]) -> Result<Self> {
        if stops.len() < constants::MIN_STOPS {
            return Err(Error::MinimumStops {
                min: constants::MIN_STOPS,
            });
        }
        let mut editor = Self::new(canvas);
        editor.stops.clear();
        for &(offset, hex) in stops {
            if !offset.is_finite() {
                return Err(Error::NonFiniteOffset(offset));
            }
            let color = normalize_color(hex)?;
            let stop = editor.make_stop(offset.clamp(0.0, 1.0), color);
            editor.stops.push(stop);
        }
        editor.sort();
        Ok(editor)
    }

    pub fn on_change(mut self, f: impl Fn(&GradientDefinition) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    pub fn on_preview(mut self, f: impl Fn(&[GradientStop]) + 'static) -> Self {
        self.on_preview = Some(Box::new(f));
        self
    }

    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active_stop(&self) -> Option<&GradientStop> {
        self.active.and_then(|i| self.stops.get(i))
    }

    pub fn settings(&self) -> &GradientSettings {
        &self.settings
    }

    pub fn canvas_size(&self) -> Size {
        self.canvas
    }

    /// Number of committed mutations so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn select(&mut self, index: Option<usize>) {
        self.active = index.filter(|&i| i < self.stops.len());
    }

    fn make_stop(&mut self, offset: f64, color: String) -> GradientStop {
        let id = StopId(self.next_id);
        self.next_id += 1;
        GradientStop { id, offset, color }
    }

    fn index_of(&self, id: StopId) -> Option<usize> {
        self.stops.iter().position(|s| s.id == id)
    }

    fn sort(&mut self) {
        self.stops
            .sort_by(|a, b| a.offset.partial_cmp(&b.offset).unwrap_or(Ordering::Equal));
    }

    /// Stops ordered by offset, independent of an in-flight drag.
    fn sorted(&self) -> Vec<&GradientStop> {
        let mut sorted: Vec<&GradientStop> = self.stops.iter().collect();
        sorted.sort_by(|a, b| a.offset.partial_cmp(&b.offset).unwrap_or(Ordering::Equal));
        sorted
    }

    /// Color at `offset`, interpolated between the bracketing stops.
    pub fn sample(&self, offset: f64) -> Rgba {
        let sorted = self.sorted();
        let left = sorted.iter().rev().find(|s| s.offset <= offset);
        let right = sorted.iter().find(|s| s.offset >= offset);
        match (left, right) {
            (Some(l), Some(r)) => {
                let span = r.offset - l.offset;
                if span <= f64::EPSILON {
                    l.rgba()
                } else {
                    color::lerp_rgba(l.rgba(), r.rgba(), (offset - l.offset) / span)
                }
            }
            (Some(only), None) | (None, Some(only)) => only.rgba(),
            (None, None) => Rgba::default(),
        }
    }

    /// Adds a stop and makes it active. Without a color, the color under
    /// `offset` is used. Returns the new stop's index.
    pub fn add_stop(&mut self, offset: f64, color: Option<&str>) -> Result<usize> {
        if !offset.is_finite() {
            return Err(Error::NonFiniteOffset(offset));
        }
        let offset = offset.clamp(0.0, 1.0);
        let color = match color {
            Some(hex) => normalize_color(hex)?,
            None => color::rgba_to_hexa(self.sample(offset), false),
        };
        let stop = self.make_stop(offset, color);
        let id = stop.id;
        debug!("adding stop {} at {offset:.3}", stop.color);
        self.stops.push(stop);
        self.sort();
        self.active = self.index_of(id);
        self.commit();
        Ok(self.active.unwrap_or_default())
    }

    /// Removes the active stop. Refused when it would leave fewer than two.
    pub fn delete_active_stop(&mut self) -> Result<()> {
        if self.stops.len() <= constants::MIN_STOPS {
            warn!("refusing to delete: only {} stops left", self.stops.len());
            return Err(Error::MinimumStops {
                min: constants::MIN_STOPS,
            });
        }
        let index = self
            .active
            .filter(|&i| i < self.stops.len())
            .ok_or(Error::NoActiveStop)?;
        let removed = self.stops.remove(index);
        if self.stop_picker.as_ref().map(|p| p.stop) == Some(removed.id) {
            self.close_stop_picker();
        }
        self.active = None;
        self.commit();
        Ok(())
    }

    /// Inserts a stop after the active one (or between the first two when
    /// nothing is selected). Returns the new stop's index.
    pub fn add_stop_between_active(&mut self) -> Result<usize> {
        let (offset, color) = {
            let sorted = self.sorted();
            match self.active_stop() {
                Some(active) => match sorted.iter().find(|s| s.offset > active.offset) {
                    Some(next) => ((active.offset + next.offset) / 2.0, None),
                    None => ((active.offset + 1.0) / 2.0, Some(active.color.clone())),
                },
                None => ((sorted[0].offset + sorted[1].offset) / 2.0, None),
            }
        };
        self.add_stop(offset, color.as_deref())
    }

    /// Pointer down on a stop's tab.
    pub fn begin_drag(&mut self, index: usize, pointer_x: f64, track_width: f64) {
        if !(pointer_x.is_finite() && track_width.is_finite()) {
            return;
        }
        let Some(stop) = self.stops.get(index) else {
            return;
        };
        self.drag = Some(StopDrag {
            id: stop.id,
            start_x: pointer_x,
            start_offset: stop.offset,
            track_width,
        });
        self.active = Some(index);
    }

    /// Live move: updates the dragged stop's offset without re-sorting.
    /// Returns the new offset.
    pub fn drag_to(&mut self, pointer_x: f64) -> Option<f64> {
        if !pointer_x.is_finite() {
            return None;
        }
        let drag = self.drag?;
        let index = self.index_of(drag.id)?;
        let delta = if drag.track_width > 0.0 {
            (pointer_x - drag.start_x) / drag.track_width
        } else {
            0.0
        };
        let offset = (drag.start_offset + delta).clamp(0.0, 1.0);
        self.stops[index].offset = offset;
        self.preview();
        Some(offset)
    }

    /// Pointer up: re-sorts and re-finds the dragged stop by identity.
    pub fn end_drag(&mut self) -> bool {
        let Some(drag) = self.drag.take() else {
            return false;
        };
        self.sort();
        self.active = self.index_of(drag.id);
        debug!("stop dragged to index {:?}", self.active);
        self.commit();
        true
    }

    /// Binds a picker to stop `index`, opens it and returns where it
    /// should appear: centered under the handle, flipped above when the
    /// viewport bottom would clip it.
    pub fn open_stop_picker(
        &mut self,
        index: usize,
        anchor: Rect,
        popup: Size,
        viewport: Size,
    ) -> Option<Point> {
        let stop = self.stops.get(index)?;
        let (id, color) = (stop.id, stop.color.clone());
        self.close_stop_picker();
        let mut picker = ColorPicker::new(&color);
        picker.open();
        let origin = picker::place_popup(anchor, popup, viewport);
        picker.set_popup_rect(Rect::from_origin_size(origin, popup));
        self.stop_picker = Some(StopPicker {
            stop: id,
            picker,
            origin,
        });
        self.active = Some(index);
        Some(origin)
    }

    pub fn close_stop_picker(&mut self) {
        if let Some(mut session) = self.stop_picker.take() {
            session.picker.close();
        }
    }

    pub fn stop_picker(&self) -> Option<&ColorPicker> {
        self.stop_picker.as_ref().map(|p| &p.picker)
    }

    /// For reporting surface layout to the bound picker.
    pub fn stop_picker_mut(&mut self) -> Option<&mut ColorPicker> {
        self.stop_picker.as_mut().map(|p| &mut p.picker)
    }

    pub fn stop_picker_origin(&self) -> Option<Point> {
        self.stop_picker.as_ref().map(|p| p.origin)
    }

    /// Index of the stop the picker is bound to.
    pub fn stop_picker_target(&self) -> Option<usize> {
        self.stop_picker.as_ref().and_then(|p| self.index_of(p.stop))
    }

    /// Forwards one interaction to the bound picker and writes the result
    /// into the stop. Pointer ticks refresh the preview only; everything
    /// else commits a new definition.
    pub fn stop_picker_input(&mut self, input: PickerInput) -> bool {
        let live = input.is_live();
        let releases = matches!(input, PickerInput::PointerUp);
        let Some(session) = self.stop_picker.as_mut() else {
            return false;
        };
        let change = session.picker.handle(input);
        let (id, still_open) = (session.stop, session.picker.is_open());
        if !still_open {
            self.stop_picker = None;
        }
        let Some(index) = self.index_of(id) else {
            return false;
        };
        match change {
            Some(change) => {
                self.stops[index].color = change.hexa;
                if live {
                    self.preview();
                } else {
                    self.commit();
                }
                true
            }
            None if releases => {
                // the drag ended: render the color the preview has shown
                self.commit();
                true
            }
            None => false,
        }
    }

    pub fn set_kind(&mut self, kind: GradientKind) {
        self.settings.kind = kind;
        self.commit();
    }

    pub fn set_angle(&mut self, degrees: f64) {
        if !degrees.is_finite() {
            debug!("ignoring angle {degrees}");
            return;
        }
        self.settings.angle = degrees;
        self.commit();
    }

    pub fn set_radial_center(&mut self, x_percent: f64, y_percent: f64) {
        if !(x_percent.is_finite() && y_percent.is_finite()) {
            debug!("ignoring radial center {x_percent}, {y_percent}");
            return;
        }
        self.settings.center_x = x_percent.clamp(0.0, 100.0);
        self.settings.center_y = y_percent.clamp(0.0, 100.0);
        self.commit();
    }

    pub fn set_radius(&mut self, percent: f64) {
        if !percent.is_finite() {
            debug!("ignoring radius {percent}");
            return;
        }
        self.settings.radius = percent.max(0.0);
        self.commit();
    }

    pub fn set_canvas_size(&mut self, canvas: Size) {
        self.canvas = canvas;
        self.commit();
    }

    /// Current definition for the renderer.
    pub fn definition(&self) -> GradientDefinition {
        let s = &self.settings;
        let geometry = match s.kind {
            GradientKind::Linear => {
                let (p1, p2) = linear_endpoints(self.canvas, s.angle);
                GradientGeometry::Linear {
                    x1: p1.x,
                    y1: p1.y,
                    x2: p2.x,
                    y2: p2.y,
                }
            }
            GradientKind::Radial => {
                let (c, r) = radial_geometry(self.canvas, s.center_x, s.center_y, s.radius);
                GradientGeometry::Radial { cx: c.x, cy: c.y, r }
            }
        };
        GradientDefinition {
            geometry,
            stops: self
                .sorted()
                .into_iter()
                .map(|s| ColorStop {
                    offset: s.offset,
                    color: s.color.clone(),
                })
                .collect(),
        }
    }

    /// Left-to-right preview colors, one per column. Ignores the
    /// configured angle and kind.
    pub fn render_preview(&self, columns: usize) -> Vec<Rgba> {
        let last = columns.saturating_sub(1).max(1) as f64;
        (0..columns).map(|x| self.sample(x as f64 / last)).collect()
    }

    fn preview(&self) {
        if let Some(cb) = &self.on_preview {
            cb(&self.stops);
        }
    }

    fn commit(&mut self) {
        self.revision += 1;
        self.preview();
        if let Some(cb) = &self.on_change {
            let definition = self.definition();
            debug!(
                "gradient committed: {:?}, {} stops",
                definition.kind(),
                definition.stops.len()
            );
            cb(&definition);
        }
    }
}

/// Validates a stop color and brings it to canonical uppercase form.
fn normalize_color(hex: &str) -> Result<String> {
    Ok(color::rgba_to_hexa(Rgba::from_hex(hex)?, false))
}

//! Application state for the wallpaper editor.
//!
//! [`EditorState`] holds everything the editor tracks between events:
//! canvas size, background mode, the selected object and the property
//! panel values shown for it. It owns the background [`GradientEditor`]
//! and borrows the [`Scene`] for each operation.

use floem::kurbo::{Point, Size, Vec2};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::color;
use crate::error::{Error, Result};
use crate::gradient::GradientEditor;
use crate::scene::{
    Background, ExportOptions, ImageFormat, ObjectId, ObjectInfo, Property, Scene,
    SelectionChanged, ShapeKind, ShapeProps,
};

pub const DEFAULT_WIDTH: u32 = 1920;
pub const DEFAULT_HEIGHT: u32 = 1080;
pub const DEFAULT_BACKGROUND: &str = "#F0F0F0";

/// Edge length of new shapes (diameter for circles, length for lines).
const SHAPE_SIZE: f64 = 100.0;
const LINE_STROKE_WIDTH: f64 = 5.0;
const SHAPE_COLOR: &str = "#000000";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundMode {
    #[default]
    Solid,
    Gradient,
}

/// Share of the container's shorter side kept free around the canvas.
const FIT_PADDING: f64 = 0.05;

/// Scale and offset that fit the canvas inside its on-screen container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasFit {
    pub zoom: f64,
    /// Top-left corner of the scaled canvas inside the container.
    pub offset: Vec2,
}

impl CanvasFit {
    /// The zoom readout, e.g. `50` for half size.
    pub fn zoom_percent(&self) -> i64 {
        (self.zoom * 100.0).round() as i64
    }
}

/// Values shown in (and read back from) the property panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyPanel {
    pub color: String,
    /// Percent, 0–100.
    pub opacity: f64,
    /// Pixels on the canvas.
    pub size: f64,
    /// Degrees.
    pub rotation: f64,
}

impl PropertyPanel {
    pub fn from_object(object: &ObjectInfo) -> Self {
        Self {
            color: object
                .edit_color()
                .unwrap_or(SHAPE_COLOR)
                .to_string(),
            opacity: (object.opacity * 100.0).round(),
            size: object.display_size(),
            rotation: object.angle,
        }
    }
}

pub struct EditorState {
    width: u32,
    height: u32,
    background: BackgroundMode,
    solid_color: String,
    selected: Option<ObjectId>,
    panel: Option<PropertyPanel>,
    gradient: GradientEditor,
    /// Gradient revision last handed to the scene.
    pushed_revision: Option<u64>,
}

impl Default for EditorState {
    fn default() -> Self {
        let canvas = Size::new(DEFAULT_WIDTH as f64, DEFAULT_HEIGHT as f64);
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            background: BackgroundMode::Solid,
            solid_color: DEFAULT_BACKGROUND.to_string(),
            selected: None,
            panel: None,
            gradient: GradientEditor::new(canvas),
            pushed_revision: None,
        }
    }
}

impl EditorState {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        check_size(width, height)?;
        let mut state = Self::default();
        state.width = width;
        state.height = height;
        state.gradient = GradientEditor::new(state.canvas_size());
        Ok(state)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn canvas_size(&self) -> Size {
        Size::new(self.width as f64, self.height as f64)
    }

    /// Largest zoom that shows the whole canvas in `container` with a
    /// padding of 5% of its shorter side, centered.
    pub fn fit_zoom(&self, container: Size) -> CanvasFit {
        let padding = container.width.min(container.height) * FIT_PADDING;
        let canvas = self.canvas_size();
        let zoom = ((container.width - padding * 2.0) / canvas.width)
            .min((container.height - padding * 2.0) / canvas.height)
            .max(0.0);
        let offset = Vec2::new(
            (container.width - canvas.width * zoom) / 2.0,
            (container.height - canvas.height * zoom) / 2.0,
        );
        CanvasFit { zoom, offset }
    }

    pub fn background_mode(&self) -> BackgroundMode {
        self.background
    }

    pub fn solid_color(&self) -> &str {
        &self.solid_color
    }

    pub fn selected(&self) -> Option<ObjectId> {
        self.selected
    }

    /// Panel values for the selected object; `None` hides the panel.
    pub fn panel(&self) -> Option<&PropertyPanel> {
        self.panel.as_ref()
    }

    pub fn gradient(&self) -> &GradientEditor {
        &self.gradient
    }

    /// The background as the scene should currently paint it.
    pub fn background(&self) -> Background {
        match self.background {
            BackgroundMode::Solid => Background::Solid {
                color: self.solid_color.clone(),
            },
            BackgroundMode::Gradient => Background::Gradient(self.gradient.definition()),
        }
    }

    /// Objects a resize to `width`×`height` would discard: those whose
    /// center falls outside the new canvas.
    pub fn resize_casualties(&self, scene: &dyn Scene, width: u32, height: u32) -> Vec<ObjectId> {
        let (w, h) = (width as f64, height as f64);
        scene
            .objects()
            .into_iter()
            .filter(|o| !(0.0..=w).contains(&o.center.x) || !(0.0..=h).contains(&o.center.y))
            .map(|o| o.id)
            .collect()
    }

    /// Changes the canvas size. When content would be discarded nothing
    /// happens until the caller retries with `confirmed` set. Returns the
    /// removed objects.
    pub fn resize_canvas(
        &mut self,
        scene: &mut dyn Scene,
        width: u32,
        height: u32,
        confirmed: bool,
    ) -> Result<Vec<ObjectId>> {
        check_size(width, height)?;
        let casualties = self.resize_casualties(scene, width, height);
        if !casualties.is_empty() && !confirmed {
            debug!(
                "resize to {width}x{height} would discard {} objects, awaiting confirmation",
                casualties.len()
            );
            return Err(Error::ConfirmationRequired);
        }
        for &id in &casualties {
            scene.remove(id);
        }
        if self.selected.is_some_and(|id| casualties.contains(&id)) {
            self.clear_selection();
        }
        self.width = width;
        self.height = height;
        self.gradient.set_canvas_size(self.canvas_size());
        self.push_background(scene);
        info!("canvas resized to {width}x{height}");
        Ok(casualties)
    }

    /// Adds a black shape centered on the canvas and selects it.
    pub fn add_shape(&mut self, scene: &mut dyn Scene, kind: ShapeKind) -> ObjectId {
        let props = default_shape(kind, self.canvas_size());
        let id = scene.add_shape(kind, props);
        scene.set_active(Some(id));
        self.on_selection(
            scene,
            SelectionChanged {
                selected: Some(id),
            },
        );
        debug!("added {kind:?} as {id:?}");
        id
    }

    /// Syncs the panel with a selection reported by the scene.
    pub fn on_selection(&mut self, scene: &dyn Scene, event: SelectionChanged) {
        let object = event.selected.and_then(|id| scene.object(id));
        match object {
            Some(object) => {
                self.selected = Some(object.id);
                self.panel = Some(PropertyPanel::from_object(&object));
            }
            None => self.clear_selection(),
        }
    }

    /// Applies the panel values to the selected object. Validation runs
    /// before anything is written; a scene failure midway restores the
    /// object's previous properties.
    pub fn update_properties(&mut self, scene: &mut dyn Scene, panel: PropertyPanel) -> Result<()> {
        let id = self.selected.ok_or(Error::NoSelection)?;
        let object = scene.object(id).ok_or(Error::NoSelection)?;
        if !color::is_valid_hex(&panel.color) {
            warn!("ignoring property color {:?}", panel.color);
            return Err(Error::InvalidHex(panel.color));
        }

        let properties = panel_properties(&object, &panel);
        for property in properties {
            if let Err(err) = scene.set_property(id, property) {
                warn!("property update on {id:?} failed: {err}");
                restore(scene, &object);
                return Err(err);
            }
        }
        self.panel = scene.object(id).map(|o| PropertyPanel {
            color: panel.color.clone(),
            ..PropertyPanel::from_object(&o)
        });
        Ok(())
    }

    pub fn bring_forward(&self, scene: &mut dyn Scene) -> Result<()> {
        let id = self.selected.ok_or(Error::NoSelection)?;
        scene.bring_forward(id);
        Ok(())
    }

    pub fn send_backward(&self, scene: &mut dyn Scene) -> Result<()> {
        let id = self.selected.ok_or(Error::NoSelection)?;
        scene.send_backward(id);
        Ok(())
    }

    /// Moves the selected object to `index` in paint order.
    pub fn move_selected_to(&self, scene: &mut dyn Scene, index: usize) -> Result<()> {
        let id = self.selected.ok_or(Error::NoSelection)?;
        scene.move_to(id, index);
        Ok(())
    }

    pub fn delete_selected(&mut self, scene: &mut dyn Scene) -> Result<()> {
        let id = self.selected.ok_or(Error::NoSelection)?;
        scene.remove(id);
        scene.set_active(None);
        self.clear_selection();
        debug!("deleted {id:?}");
        Ok(())
    }

    pub fn set_solid_background(&mut self, scene: &mut dyn Scene, hex: &str) -> Result<()> {
        let rgba = color::Rgba::from_hex(hex)?;
        self.solid_color = color::rgba_to_hexa(rgba, false);
        self.background = BackgroundMode::Solid;
        self.push_background(scene);
        Ok(())
    }

    pub fn use_gradient_background(&mut self, scene: &mut dyn Scene) {
        self.background = BackgroundMode::Gradient;
        self.pushed_revision = None;
        self.push_background(scene);
    }

    /// Runs `edit` against the gradient editor and pushes the background
    /// if it committed a new definition.
    pub fn edit_gradient<R>(
        &mut self,
        scene: &mut dyn Scene,
        edit: impl FnOnce(&mut GradientEditor) -> R,
    ) -> R {
        let result = edit(&mut self.gradient);
        if self.background == BackgroundMode::Gradient
            && self.pushed_revision != Some(self.gradient.revision())
        {
            self.push_background(scene);
        }
        result
    }

    /// Rasterizes the scene at full size.
    pub fn export(&self, scene: &dyn Scene, format: ImageFormat, quality: f64) -> Result<Vec<u8>> {
        let options = ExportOptions {
            format,
            quality: quality.clamp(0.0, 1.0),
            multiplier: 1.0,
        };
        let bytes = scene.export(&options).map_err(|err| {
            warn!("export failed: {err}");
            err
        })?;
        info!(
            "exported {}x{} {:?} ({} bytes)",
            self.width,
            self.height,
            format,
            bytes.len()
        );
        Ok(bytes)
    }

    /// Replaces the scene with a saved document. Nothing changes unless
    /// the document parses and the scene accepts it.
    pub fn load_document(
        &mut self,
        scene: &mut dyn Scene,
        width: u32,
        height: u32,
        json: &str,
    ) -> Result<()> {
        check_size(width, height)?;
        let document: serde_json::Value = serde_json::from_str(json)?;
        scene.load_document(&document)?;
        self.width = width;
        self.height = height;
        self.gradient.set_canvas_size(self.canvas_size());
        if self.background == BackgroundMode::Gradient {
            self.pushed_revision = Some(self.gradient.revision());
        }
        self.clear_selection();
        Ok(())
    }

    fn clear_selection(&mut self) {
        self.selected = None;
        self.panel = None;
    }

    fn push_background(&mut self, scene: &mut dyn Scene) {
        if self.background == BackgroundMode::Gradient {
            self.pushed_revision = Some(self.gradient.revision());
        }
        scene.set_background(self.background());
    }
}

fn check_size(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidCanvasSize { width, height });
    }
    Ok(())
}

fn default_shape(kind: ShapeKind, canvas: Size) -> ShapeProps {
    let center = Point::new(canvas.width / 2.0, canvas.height / 2.0);
    let filled = ShapeProps {
        center,
        width: SHAPE_SIZE,
        height: SHAPE_SIZE,
        radius: None,
        fill: Some(SHAPE_COLOR.to_string()),
        stroke: None,
        stroke_width: 0.0,
    };
    match kind {
        ShapeKind::Rectangle | ShapeKind::Triangle => filled,
        ShapeKind::Circle => ShapeProps {
            radius: Some(SHAPE_SIZE / 2.0),
            ..filled
        },
        ShapeKind::Line => ShapeProps {
            height: 0.0,
            fill: None,
            stroke: Some(SHAPE_COLOR.to_string()),
            stroke_width: LINE_STROKE_WIDTH,
            ..filled
        },
    }
}

/// Translates panel values into scene properties for `object`.
fn panel_properties(object: &ObjectInfo, panel: &PropertyPanel) -> Vec<Property> {
    let mut properties = Vec::new();
    let fill_editable = object
        .fill
        .as_deref()
        .is_some_and(|fill| fill != "transparent");
    if fill_editable {
        properties.push(Property::Fill(panel.color.clone()));
    } else if object.stroke.is_some() {
        properties.push(Property::Stroke(panel.color.clone()));
    }

    properties.push(Property::Opacity((panel.opacity / 100.0).clamp(0.0, 1.0)));

    let size = panel.size.max(0.0);
    let base_width = if object.width > 0.0 { object.width } else { SHAPE_SIZE };
    match object.kind {
        ShapeKind::Circle => properties.push(Property::Radius(size / 2.0)),
        ShapeKind::Rectangle | ShapeKind::Triangle => {
            let scale = size / base_width;
            properties.push(Property::Scale { x: scale, y: scale });
        }
        ShapeKind::Line => properties.push(Property::Scale {
            x: size / base_width,
            y: object.scale_y,
        }),
    }

    properties.push(Property::Rotation(panel.rotation));
    properties
}

/// Best-effort rollback after a failed update.
fn restore(scene: &mut dyn Scene, object: &ObjectInfo) {
    let mut properties = vec![
        Property::Opacity(object.opacity),
        Property::Scale {
            x: object.scale_x,
            y: object.scale_y,
        },
        Property::Rotation(object.angle),
    ];
    if let Some(fill) = &object.fill {
        properties.push(Property::Fill(fill.clone()));
    }
    if let Some(stroke) = &object.stroke {
        properties.push(Property::Stroke(stroke.clone()));
    }
    if let Some(radius) = object.radius {
        properties.push(Property::Radius(radius));
    }
    for property in properties {
        let _ = scene.set_property(object.id, property);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gradient::GradientGeometry;
    use crate::scene::testing::MemoryScene;

    fn setup() -> (EditorState, MemoryScene) {
        (EditorState::default(), MemoryScene::default())
    }

    #[test]
    fn canvas_fits_container_with_padding() {
        let state = EditorState::default();
        let fit = state.fit_zoom(Size::new(1000.0, 600.0));
        assert!((fit.zoom - 940.0 / 1920.0).abs() < 1e-12);
        assert!((fit.offset.x - 30.0).abs() < 1e-9);
        assert!((fit.offset.y - (600.0 - 1080.0 * fit.zoom) / 2.0).abs() < 1e-9);
        assert_eq!(fit.zoom_percent(), 49);

        let tall = EditorState::new(500, 1000).unwrap();
        let fit = tall.fit_zoom(Size::new(1000.0, 600.0));
        assert!((fit.zoom - 0.54).abs() < 1e-12);
        assert_eq!(fit.zoom_percent(), 54);

        assert_eq!(state.fit_zoom(Size::ZERO).zoom, 0.0);
    }

    #[test]
    fn shapes_are_centered_with_source_defaults() {
        let (mut state, mut scene) = setup();
        let rect = state.add_shape(&mut scene, ShapeKind::Rectangle);
        let circle = state.add_shape(&mut scene, ShapeKind::Circle);
        let line = state.add_shape(&mut scene, ShapeKind::Line);

        let rect = scene.object(rect).unwrap();
        assert_eq!(rect.center, Point::new(960.0, 540.0));
        assert_eq!((rect.width, rect.height), (100.0, 100.0));
        assert_eq!(rect.fill.as_deref(), Some("#000000"));

        assert_eq!(scene.object(circle).unwrap().radius, Some(50.0));

        let line_info = scene.object(line).unwrap();
        assert_eq!(line_info.fill, None);
        assert_eq!(line_info.stroke.as_deref(), Some("#000000"));

        // the newest shape is selected and the panel shows it
        assert_eq!(state.selected(), Some(line));
        assert_eq!(scene.active_object(), Some(line));
        assert_eq!(state.panel().unwrap().size, 100.0);
    }

    #[test]
    fn selection_event_with_nothing_hides_panel() {
        let (mut state, mut scene) = setup();
        state.add_shape(&mut scene, ShapeKind::Circle);
        assert!(state.panel().is_some());
        state.on_selection(&scene, SelectionChanged { selected: None });
        assert_eq!(state.selected(), None);
        assert!(state.panel().is_none());
    }

    #[test]
    fn panel_edits_fill_or_stroke() {
        let (mut state, mut scene) = setup();
        let rect = state.add_shape(&mut scene, ShapeKind::Rectangle);
        state
            .update_properties(
                &mut scene,
                PropertyPanel {
                    color: "#FF0000".to_string(),
                    opacity: 50.0,
                    size: 200.0,
                    rotation: 45.0,
                },
            )
            .unwrap();
        let info = scene.object(rect).unwrap();
        assert_eq!(info.fill.as_deref(), Some("#FF0000"));
        assert_eq!(info.opacity, 0.5);
        assert_eq!((info.scale_x, info.scale_y), (2.0, 2.0));
        assert_eq!(info.angle, 45.0);
        assert_eq!(state.panel().unwrap().size, 200.0);

        let line = state.add_shape(&mut scene, ShapeKind::Line);
        state
            .update_properties(
                &mut scene,
                PropertyPanel {
                    color: "#00FF00".to_string(),
                    opacity: 100.0,
                    size: 50.0,
                    rotation: 0.0,
                },
            )
            .unwrap();
        let info = scene.object(line).unwrap();
        assert_eq!(info.stroke.as_deref(), Some("#00FF00"));
        assert_eq!(info.fill, None);
        assert_eq!((info.scale_x, info.scale_y), (0.5, 1.0));
    }

    #[test]
    fn circle_size_sets_radius() {
        let (mut state, mut scene) = setup();
        let circle = state.add_shape(&mut scene, ShapeKind::Circle);
        let mut panel = state.panel().unwrap().clone();
        panel.size = 300.0;
        state.update_properties(&mut scene, panel).unwrap();
        assert_eq!(scene.object(circle).unwrap().radius, Some(150.0));
    }

    #[test]
    fn invalid_panel_color_changes_nothing() {
        let (mut state, mut scene) = setup();
        let rect = state.add_shape(&mut scene, ShapeKind::Rectangle);
        let before = scene.object(rect).unwrap();
        let mut panel = state.panel().unwrap().clone();
        panel.color = "red".to_string();
        panel.opacity = 10.0;
        assert!(matches!(
            state.update_properties(&mut scene, panel),
            Err(Error::InvalidHex(_))
        ));
        assert_eq!(scene.object(rect).unwrap(), before);
    }

    #[test]
    fn operations_without_selection_report_it() {
        let (mut state, mut scene) = setup();
        assert!(matches!(state.bring_forward(&mut scene), Err(Error::NoSelection)));
        assert!(matches!(state.delete_selected(&mut scene), Err(Error::NoSelection)));
    }

    #[test]
    fn layer_order_follows_selection() {
        let (mut state, mut scene) = setup();
        let a = state.add_shape(&mut scene, ShapeKind::Rectangle);
        let b = state.add_shape(&mut scene, ShapeKind::Circle);
        let c = state.add_shape(&mut scene, ShapeKind::Triangle);

        state.on_selection(&scene, SelectionChanged { selected: Some(a) });
        state.bring_forward(&mut scene).unwrap();
        assert_eq!(scene.order(), vec![b, a, c]);
        state.move_selected_to(&mut scene, 2).unwrap();
        assert_eq!(scene.order(), vec![b, c, a]);
        state.send_backward(&mut scene).unwrap();
        assert_eq!(scene.order(), vec![b, a, c]);

        state.delete_selected(&mut scene).unwrap();
        assert_eq!(scene.order(), vec![b, c]);
        assert!(state.panel().is_none());
    }

    #[test]
    fn shrinking_canvas_needs_confirmation_when_content_is_lost() {
        let (mut state, mut scene) = setup();
        let id = state.add_shape(&mut scene, ShapeKind::Rectangle);

        // center (960, 540) survives a shrink to 1000x600
        assert_eq!(state.resize_canvas(&mut scene, 1000, 600, false).unwrap(), vec![]);

        assert!(matches!(
            state.resize_canvas(&mut scene, 500, 500, false),
            Err(Error::ConfirmationRequired)
        ));
        assert_eq!((state.width(), state.height()), (1000, 600));
        assert_eq!(scene.objects().len(), 1);

        let removed = state.resize_canvas(&mut scene, 500, 500, true).unwrap();
        assert_eq!(removed, vec![id]);
        assert!(scene.objects().is_empty());
        assert_eq!(state.selected(), None);
        assert_eq!(state.gradient().canvas_size(), Size::new(500.0, 500.0));
    }

    #[test]
    fn zero_size_is_rejected() {
        let (mut state, mut scene) = setup();
        assert!(matches!(
            state.resize_canvas(&mut scene, 0, 100, true),
            Err(Error::InvalidCanvasSize { width: 0, height: 100 })
        ));
        assert!(EditorState::new(10, 0).is_err());
    }

    #[test]
    fn solid_background_is_normalized() {
        let (mut state, mut scene) = setup();
        state.set_solid_background(&mut scene, "#abc").unwrap();
        assert_eq!(
            scene.background,
            Some(Background::Solid {
                color: "#AABBCC".to_string()
            })
        );
        assert!(state.set_solid_background(&mut scene, "#zzz").is_err());
        assert_eq!(state.solid_color(), "#AABBCC");
    }

    #[test]
    fn gradient_commits_reach_the_scene() {
        let (mut state, mut scene) = setup();
        state.use_gradient_background(&mut scene);
        let Some(Background::Gradient(def)) = &scene.background else {
            panic!("expected a gradient background");
        };
        assert_eq!(def.stops.len(), 2);

        state
            .edit_gradient(&mut scene, |g| g.add_stop(0.5, None))
            .unwrap();
        let Some(Background::Gradient(def)) = &scene.background else {
            panic!("expected a gradient background");
        };
        assert_eq!(def.stops.len(), 3);
        assert_eq!(def.stops[1].color, "#808080");

        // a live drag only previews, so the scene keeps the last commit
        state.edit_gradient(&mut scene, |g| {
            g.begin_drag(1, 0.0, 100.0);
            g.drag_to(20.0);
        });
        let Some(Background::Gradient(def)) = &scene.background else {
            panic!("expected a gradient background");
        };
        assert_eq!(def.stops[1].offset, 0.5);
        state.edit_gradient(&mut scene, |g| g.end_drag());
        let Some(Background::Gradient(def)) = &scene.background else {
            panic!("expected a gradient background");
        };
        assert!((def.stops[1].offset - 0.7).abs() < 1e-9);
    }

    #[test]
    fn resize_regenerates_gradient_geometry() {
        let (mut state, mut scene) = setup();
        state.use_gradient_background(&mut scene);
        state.resize_canvas(&mut scene, 1000, 500, false).unwrap();
        let Some(Background::Gradient(def)) = &scene.background else {
            panic!("expected a gradient background");
        };
        match def.geometry {
            GradientGeometry::Linear { x1, x2, .. } => {
                assert!((x1 - 0.0).abs() < 1e-9);
                assert!((x2 - 1000.0).abs() < 1e-9);
            }
            _ => panic!("expected linear geometry"),
        }
    }

    #[test]
    fn failed_export_is_reported() {
        let (state, mut scene) = setup();
        assert_eq!(
            state.export(&scene, ImageFormat::Png, 1.0).unwrap(),
            b"image/png".to_vec()
        );
        scene.fail_export = true;
        assert!(matches!(
            state.export(&scene, ImageFormat::Jpeg, 0.8),
            Err(Error::Scene(_))
        ));
    }

    #[test]
    fn loading_a_document_replaces_the_scene() {
        let (mut state, mut scene) = setup();
        state.add_shape(&mut scene, ShapeKind::Rectangle);
        let json = serde_json::to_string(&scene.to_document().unwrap()).unwrap();

        let mut other = MemoryScene::default();
        let mut fresh = EditorState::default();
        fresh.load_document(&mut other, 800, 600, &json).unwrap();
        assert_eq!(other.objects().len(), 1);
        assert_eq!((fresh.width(), fresh.height()), (800, 600));

        // malformed documents leave everything alone
        assert!(fresh.load_document(&mut other, 10, 10, "{not json").is_err());
        assert_eq!(fresh.width(), 800);
        assert_eq!(other.objects().len(), 1);
    }
}

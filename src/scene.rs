//! Contract with the rendering collaborator.
//!
//! The scene graph, its document format and its rasterizer live outside
//! this crate. [`Scene`] is everything the editor needs from them.

use floem::kurbo::Point;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::gradient::GradientDefinition;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u64);

#[derive(Serialize, Deserialize)]
#[serde(remote = "Point")]
struct PointDef {
    x: f64,
    y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Circle,
    Triangle,
    Line,
}

/// Creation parameters. Shapes are positioned by their center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeProps {
    #[serde(with = "PointDef")]
    pub center: Point,
    /// Width (rectangle, triangle) or length (line).
    pub width: f64,
    pub height: f64,
    /// Circles only.
    pub radius: Option<f64>,
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: f64,
}

/// A settable object property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Property {
    Fill(String),
    Stroke(String),
    /// 0.0–1.0
    Opacity(f64),
    Scale { x: f64, y: f64 },
    /// Degrees
    Rotation(f64),
    Radius(f64),
}

/// Snapshot of one drawable object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectInfo {
    pub id: ObjectId,
    pub kind: ShapeKind,
    #[serde(with = "PointDef")]
    pub center: Point,
    pub width: f64,
    pub height: f64,
    pub radius: Option<f64>,
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub opacity: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub angle: f64,
}

impl ObjectInfo {
    /// Color the property panel edits: the fill, unless it is absent or
    /// transparent, then the stroke.
    pub fn edit_color(&self) -> Option<&str> {
        match self.fill.as_deref() {
            Some(fill) if fill != "transparent" => Some(fill),
            _ => self.stroke.as_deref(),
        }
    }

    /// On-canvas size shown in the property panel.
    pub fn display_size(&self) -> f64 {
        match (self.kind, self.radius) {
            (ShapeKind::Circle, Some(r)) => r * 2.0,
            _ => self.width * self.scale_x,
        }
    }
}

/// Fill painted beneath every object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Background {
    Solid { color: String },
    Gradient(GradientDefinition),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    pub fn mime(self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExportOptions {
    pub format: ImageFormat,
    /// 0.0–1.0, ignored by lossless formats.
    pub quality: f64,
    /// Output scale relative to the canvas.
    pub multiplier: f64,
}

/// The one selection event shape: either an object or nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionChanged {
    pub selected: Option<ObjectId>,
}

/// Retained-mode 2D scene owned by the renderer.
///
/// Object order is paint order: index 0 is painted first (bottom).
pub trait Scene {
    fn add_shape(&mut self, kind: ShapeKind, props: ShapeProps) -> ObjectId;

    fn set_property(&mut self, id: ObjectId, property: Property) -> Result<()>;

    /// One step up in paint order.
    fn bring_forward(&mut self, id: ObjectId);

    /// One step down in paint order.
    fn send_backward(&mut self, id: ObjectId);

    fn move_to(&mut self, id: ObjectId, index: usize);

    fn remove(&mut self, id: ObjectId);

    fn set_active(&mut self, id: Option<ObjectId>);

    fn active_object(&self) -> Option<ObjectId>;

    /// All objects in paint order.
    fn objects(&self) -> Vec<ObjectInfo>;

    fn object(&self, id: ObjectId) -> Option<ObjectInfo> {
        self.objects().into_iter().find(|o| o.id == id)
    }

    fn set_background(&mut self, background: Background);

    fn to_document(&self) -> Result<serde_json::Value>;

    /// Replaces the whole scene.
    fn load_document(&mut self, document: &serde_json::Value) -> Result<()>;

    fn export(&self, options: &ExportOptions) -> Result<Vec<u8>>;
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory scene used by unit tests.

    use super::*;
    use crate::error::Error;

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub(crate) struct MemoryScene {
        pub objects: Vec<ObjectInfo>,
        pub background: Option<Background>,
        #[serde(skip)]
        pub active: Option<ObjectId>,
        next_id: u64,
        #[serde(skip)]
        pub fail_export: bool,
    }

    impl MemoryScene {
        fn position(&self, id: ObjectId) -> Option<usize> {
            self.objects.iter().position(|o| o.id == id)
        }

        pub fn order(&self) -> Vec<ObjectId> {
            self.objects.iter().map(|o| o.id).collect()
        }
    }

    impl Scene for MemoryScene {
        fn add_shape(&mut self, kind: ShapeKind, props: ShapeProps) -> ObjectId {
            let id = ObjectId(self.next_id);
            self.next_id += 1;
            self.objects.push(ObjectInfo {
                id,
                kind,
                center: props.center,
                width: props.width,
                height: props.height,
                radius: props.radius,
                fill: props.fill,
                stroke: props.stroke,
                opacity: 1.0,
                scale_x: 1.0,
                scale_y: 1.0,
                angle: 0.0,
            });
            id
        }

        fn set_property(&mut self, id: ObjectId, property: Property) -> Result<()> {
            let index = self
                .position(id)
                .ok_or_else(|| Error::Scene(format!("no object {id:?}")))?;
            let o = &mut self.objects[index];
            match property {
                Property::Fill(c) => o.fill = Some(c),
                Property::Stroke(c) => o.stroke = Some(c),
                Property::Opacity(a) => o.opacity = a,
                Property::Scale { x, y } => {
                    o.scale_x = x;
                    o.scale_y = y;
                }
                Property::Rotation(a) => o.angle = a,
                Property::Radius(r) => o.radius = Some(r),
            }
            Ok(())
        }

        fn bring_forward(&mut self, id: ObjectId) {
            if let Some(i) = self.position(id) {
                if i + 1 < self.objects.len() {
                    self.objects.swap(i, i + 1);
                }
            }
        }

        fn send_backward(&mut self, id: ObjectId) {
            if let Some(i) = self.position(id) {
                if i > 0 {
                    self.objects.swap(i, i - 1);
                }
            }
        }

        fn move_to(&mut self, id: ObjectId, index: usize) {
            if let Some(i) = self.position(id) {
                let o = self.objects.remove(i);
                let index = index.min(self.objects.len());
                self.objects.insert(index, o);
            }
        }

        fn remove(&mut self, id: ObjectId) {
            self.objects.retain(|o| o.id != id);
            if self.active == Some(id) {
                self.active = None;
            }
        }

        fn set_active(&mut self, id: Option<ObjectId>) {
            self.active = id;
        }

        fn active_object(&self) -> Option<ObjectId> {
            self.active
        }

        fn objects(&self) -> Vec<ObjectInfo> {
            self.objects.clone()
        }

        fn set_background(&mut self, background: Background) {
            self.background = Some(background);
        }

        fn to_document(&self) -> Result<serde_json::Value> {
            Ok(serde_json::to_value(self)?)
        }

        fn load_document(&mut self, document: &serde_json::Value) -> Result<()> {
            *self = serde_json::from_value(document.clone())?;
            Ok(())
        }

        fn export(&self, options: &ExportOptions) -> Result<Vec<u8>> {
            if self.fail_export {
                return Err(Error::Scene("rasterizer unavailable".to_string()));
            }
            Ok(options.format.mime().as_bytes().to_vec())
        }
    }
}

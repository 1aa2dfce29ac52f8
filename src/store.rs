//! Saved designs, kept as one JSON file.

use std::fs;
use std::path::{Path, PathBuf};

use base64::{engine::general_purpose, Engine as _};
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::document::EditorState;
use crate::error::{Error, Result};
use crate::scene::{ExportOptions, ImageFormat, Scene};

const STORE_FILE: &str = "designs.json";

/// Thumbnails are small, low quality JPEGs.
pub const THUMBNAIL_OPTIONS: ExportOptions = ExportOptions {
    format: ImageFormat::Jpeg,
    quality: 0.3,
    multiplier: 0.1,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Design {
    /// Milliseconds since the epoch at save time.
    pub id: i64,
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// Serialized scene document.
    pub json: String,
    /// `data:` URL of a thumbnail image.
    pub thumbnail: String,
    pub date: DateTime<Utc>,
}

impl Design {
    /// Snapshots the current scene. A blank name is replaced by
    /// [`Design::default_name`]. Fails without side effects if the
    /// scene cannot be serialized or rasterized.
    pub fn capture(name: &str, state: &EditorState, scene: &dyn Scene) -> Result<Self> {
        let json = serde_json::to_string(&scene.to_document()?)?;
        let thumbnail = scene.export(&THUMBNAIL_OPTIONS)?;
        let date = Utc::now();
        Ok(Self {
            id: date.timestamp_millis(),
            name: if name.trim().is_empty() {
                Self::default_name()
            } else {
                name.to_string()
            },
            width: state.width(),
            height: state.height(),
            json,
            thumbnail: data_url(THUMBNAIL_OPTIONS.format, &thumbnail),
            date,
        })
    }

    /// Name offered when saving: "Wallpaper" plus the local time.
    pub fn default_name() -> String {
        format!("Wallpaper {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"))
    }
}

pub fn data_url(format: ImageFormat, bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        format.mime(),
        general_purpose::STANDARD.encode(bytes)
    )
}

/// Designs in save order, persisted after every change.
#[derive(Debug)]
pub struct DesignStore {
    path: PathBuf,
    designs: Vec<Design>,
}

impl DesignStore {
    /// Opens (or starts) a store at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let designs = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            debug!("no design store at {:?}, starting empty", path);
            Vec::new()
        };
        Ok(Self { path, designs })
    }

    /// The store in the platform config directory.
    pub fn open_default() -> Result<Self> {
        let dirs = ProjectDirs::from("com", "floem", "floem-gradient").ok_or(Error::NoConfigDir)?;
        Self::open(dirs.config_dir().join(STORE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn list(&self) -> &[Design] {
        &self.designs
    }

    pub fn get(&self, id: i64) -> Option<&Design> {
        self.designs.iter().find(|d| d.id == id)
    }

    /// Stores `design`, bumping its id if another design already uses it.
    /// Returns the stored id.
    pub fn add(&mut self, mut design: Design) -> Result<i64> {
        while self.get(design.id).is_some() {
            design.id += 1;
        }
        let id = design.id;
        self.designs.push(design);
        if let Err(err) = self.save() {
            self.designs.pop();
            return Err(err);
        }
        info!("saved design {id}");
        Ok(id)
    }

    pub fn remove(&mut self, id: i64) -> Result<Design> {
        let index = self
            .designs
            .iter()
            .position(|d| d.id == id)
            .ok_or(Error::DesignNotFound(id))?;
        let design = self.designs.remove(index);
        if let Err(err) = self.save() {
            self.designs.insert(index, design);
            return Err(err);
        }
        info!("removed design {id}");
        Ok(design)
    }

    /// Captures the current scene and stores it.
    pub fn save_current(
        &mut self,
        name: &str,
        state: &EditorState,
        scene: &dyn Scene,
    ) -> Result<i64> {
        let design = Design::capture(name, state, scene).map_err(|err| {
            warn!("could not capture design {name:?}: {err}");
            err
        })?;
        self.add(design)
    }

    /// Restores design `id` into the scene.
    pub fn load_into(&self, id: i64, state: &mut EditorState, scene: &mut dyn Scene) -> Result<()> {
        let design = self.get(id).ok_or(Error::DesignNotFound(id))?;
        state.load_document(scene, design.width, design.height, &design.json)?;
        info!("loaded design {id} ({})", design.name);
        Ok(())
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.designs)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::testing::MemoryScene;
    use crate::scene::ShapeKind;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn temp_store_path() -> PathBuf {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let n = COUNTER.fetch_add(1, Ordering::SeqCst);
        std::env::temp_dir()
            .join(format!("floem-gradient-{}-{n}", std::process::id()))
            .join(STORE_FILE)
    }

    #[test]
    fn saves_lists_and_reopens() {
        let path = temp_store_path();
        let mut state = EditorState::default();
        let mut scene = MemoryScene::default();
        state.add_shape(&mut scene, ShapeKind::Circle);

        let mut store = DesignStore::open(&path).unwrap();
        assert!(store.list().is_empty());
        let id = store.save_current("first", &state, &scene).unwrap();

        let design = store.get(id).unwrap();
        assert_eq!((design.width, design.height), (1920, 1080));
        assert!(design.thumbnail.starts_with("data:image/jpeg;base64,"));

        let reopened = DesignStore::open(&path).unwrap();
        assert_eq!(reopened.list(), store.list());

        let mut fresh_state = EditorState::default();
        let mut fresh_scene = MemoryScene::default();
        reopened
            .load_into(id, &mut fresh_state, &mut fresh_scene)
            .unwrap();
        assert_eq!(fresh_scene.objects().len(), 1);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn blank_name_gets_a_default() {
        let state = EditorState::default();
        let scene = MemoryScene::default();
        let design = Design::capture("  ", &state, &scene).unwrap();
        assert!(design.name.starts_with("Wallpaper "));
        let named = Design::capture("Sunset", &state, &scene).unwrap();
        assert_eq!(named.name, "Sunset");
    }

    #[test]
    fn duplicate_ids_are_bumped() {
        let path = temp_store_path();
        let mut store = DesignStore::open(&path).unwrap();
        let design = Design {
            id: 42,
            name: "a".into(),
            width: 10,
            height: 10,
            json: "{}".into(),
            thumbnail: String::new(),
            date: Utc::now(),
        };
        assert_eq!(store.add(design.clone()).unwrap(), 42);
        assert_eq!(store.add(design).unwrap(), 43);

        store.remove(42).unwrap();
        assert!(matches!(store.remove(42), Err(Error::DesignNotFound(42))));
        assert_eq!(store.list().len(), 1);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn failed_thumbnail_saves_nothing() {
        let path = temp_store_path();
        let state = EditorState::default();
        let mut scene = MemoryScene::default();
        scene.fail_export = true;
        let mut store = DesignStore::open(&path).unwrap();
        assert!(matches!(
            store.save_current("broken", &state, &scene),
            Err(Error::Scene(_))
        ));
        assert!(store.list().is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn data_url_encodes_bytes() {
        assert_eq!(data_url(ImageFormat::Png, b"hi"), "data:image/png;base64,aGk=");
    }
}

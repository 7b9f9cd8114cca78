//! Saved designs.
//!
//! All designs live as one JSON list under a single storage key. The list is
//! read once at startup; afterwards the in-memory copy is authoritative and
//! every save or delete rewrites the whole list.

use std::collections::HashMap;

use egui::Color32;
use image::RgbaImage;
use serde::{Deserialize, Deserializer, Serialize};

use crate::shape::NailShape;
use crate::snapshot::{self, SnapshotError};
use crate::surface::NAIL_COUNT;
use crate::texture::NailTexture;

pub const STORAGE_KEY: &str = "nail_designs";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no design with id {0}")]
    NotFound(String),

    #[error("design has {found} thumbnails, expected {expected}", expected = NAIL_COUNT)]
    MissingThumbnails { found: usize },

    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("failed to serialize designs: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// String storage the design list is persisted in.
pub trait KeyValueStore {
    fn get_string(&self, key: &str) -> Option<String>;
    fn set_string(&mut self, key: &str, value: String);
}

/// In-memory storage, used when the platform has none and in tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_string(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set_string(&mut self, key: &str, value: String) {
        self.values.insert(key.to_owned(), value);
    }
}

/// Persists through eframe's storage (local storage on the web, a RON file
/// natively).
pub struct EframeStorage<'a>(pub &'a mut dyn eframe::Storage);

impl KeyValueStore for EframeStorage<'_> {
    fn get_string(&self, key: &str) -> Option<String> {
        self.0.get_string(key)
    }

    fn set_string(&mut self, key: &str, value: String) {
        self.0.set_string(key, value);
        self.0.flush();
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignRecord {
    pub id: String,
    pub name: String,
    pub date: String,
    #[serde(with = "crate::color::hex_array_serde")]
    pub nail_colors: [Color32; NAIL_COUNT],
    #[serde(deserialize_with = "shape_by_name")]
    pub nail_shape: NailShape,
    #[serde(deserialize_with = "texture_by_name")]
    pub nail_texture: NailTexture,
    /// One `data:image/png;base64,` URI per nail.
    pub thumbnails: Vec<String>,
}

fn shape_by_name<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NailShape, D::Error> {
    Ok(NailShape::from_name(&String::deserialize(deserializer)?))
}

fn texture_by_name<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NailTexture, D::Error> {
    Ok(NailTexture::from_name(&String::deserialize(deserializer)?))
}

/// Current editor state, captured at save time.
#[derive(Debug, Clone)]
pub struct DesignDraft {
    pub nail_colors: [Color32; NAIL_COUNT],
    pub shape: NailShape,
    pub texture: NailTexture,
    pub snapshots: Vec<RgbaImage>,
}

/// A saved design, decoded and ready to apply to the editor.
#[derive(Debug, Clone)]
pub struct LoadedDesign {
    pub id: String,
    pub nail_colors: [Color32; NAIL_COUNT],
    pub shape: NailShape,
    pub texture: NailTexture,
    pub rasters: Vec<RgbaImage>,
}

#[derive(Debug, Default)]
pub struct DesignStore {
    designs: Vec<DesignRecord>,
}

impl DesignStore {
    /// Read the saved list. A missing key is an empty list; so is a corrupt
    /// one, after logging it.
    pub fn open(storage: &dyn KeyValueStore) -> Self {
        Self::from_saved(storage.get_string(STORAGE_KEY).as_deref())
    }

    /// Same as [`Self::open`], given the raw stored value.
    pub fn from_saved(json: Option<&str>) -> Self {
        let designs = match json {
            None => Vec::new(),
            Some(json) => match serde_json::from_str(json) {
                Ok(designs) => designs,
                Err(err) => {
                    log::error!("Ignoring corrupt saved designs: {err}");
                    Vec::new()
                }
            },
        };
        log::info!("Loaded {} saved designs", designs.len());
        Self { designs }
    }

    pub fn list(&self) -> &[DesignRecord] {
        &self.designs
    }

    pub fn get(&self, id: &str) -> Option<&DesignRecord> {
        self.designs.iter().find(|design| design.id == id)
    }

    pub fn save(
        &mut self,
        storage: &mut dyn KeyValueStore,
        name: &str,
        draft: &DesignDraft,
    ) -> Result<DesignRecord, StoreError> {
        if draft.snapshots.len() != NAIL_COUNT {
            return Err(StoreError::MissingThumbnails {
                found: draft.snapshots.len(),
            });
        }
        let thumbnails = draft
            .snapshots
            .iter()
            .map(snapshot::to_data_uri)
            .collect::<Result<Vec<_>, _>>()?;

        let name = name.trim();
        let record = DesignRecord {
            id: uuid::Uuid::new_v4().to_string(),
            name: if name.is_empty() {
                format!("Design {}", self.designs.len() + 1)
            } else {
                name.to_owned()
            },
            date: chrono::Local::now().format("%Y-%m-%d %H:%M").to_string(),
            nail_colors: draft.nail_colors,
            nail_shape: draft.shape,
            nail_texture: draft.texture,
            thumbnails,
        };

        self.designs.push(record.clone());
        if let Err(err) = self.persist(storage) {
            self.designs.pop();
            return Err(err);
        }
        log::info!("Saved design {:?} ({})", record.name, record.id);
        Ok(record)
    }

    pub fn delete(
        &mut self,
        storage: &mut dyn KeyValueStore,
        id: &str,
    ) -> Result<DesignRecord, StoreError> {
        let index = self
            .designs
            .iter()
            .position(|design| design.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_owned()))?;
        let removed = self.designs.remove(index);
        if let Err(err) = self.persist(storage) {
            self.designs.insert(index, removed);
            return Err(err);
        }
        log::info!("Deleted design {id}");
        Ok(removed)
    }

    /// Decode a design. Nothing is applied here, so a bad thumbnail leaves
    /// the editor untouched.
    pub fn load(&self, id: &str) -> Result<LoadedDesign, StoreError> {
        let record = self
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_owned()))?;
        if record.thumbnails.len() != NAIL_COUNT {
            return Err(StoreError::MissingThumbnails {
                found: record.thumbnails.len(),
            });
        }
        let rasters = record
            .thumbnails
            .iter()
            .map(|uri| snapshot::from_data_uri(uri))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(LoadedDesign {
            id: record.id.clone(),
            nail_colors: record.nail_colors,
            shape: record.nail_shape,
            texture: record.nail_texture,
            rasters,
        })
    }

    fn persist(&self, storage: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        let json = serde_json::to_string(&self.designs)?;
        storage.set_string(STORAGE_KEY, json);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> DesignDraft {
        DesignDraft {
            nail_colors: [Color32::RED; NAIL_COUNT],
            shape: NailShape::Almond,
            texture: NailTexture::Metallic,
            snapshots: vec![RgbaImage::from_pixel(4, 6, image::Rgba([1, 2, 3, 255])); NAIL_COUNT],
        }
    }

    #[test]
    fn missing_key_is_an_empty_list() {
        let store = DesignStore::open(&MemoryStorage::new());
        assert!(store.list().is_empty());
    }

    #[test]
    fn corrupt_json_is_an_empty_list() {
        let mut storage = MemoryStorage::new();
        storage.set_string(STORAGE_KEY, "[{not json".to_owned());
        assert!(DesignStore::open(&storage).list().is_empty());
    }

    #[test]
    fn every_save_rewrites_the_whole_list() {
        let mut storage = MemoryStorage::new();
        let mut store = DesignStore::open(&storage);
        let first = store.save(&mut storage, "Sunset", &draft()).unwrap();
        let second = store.save(&mut storage, "", &draft()).unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(second.name, "Design 2");

        let reopened = DesignStore::open(&storage);
        assert_eq!(reopened.list(), store.list());

        store.delete(&mut storage, &first.id).unwrap();
        let reopened = DesignStore::open(&storage);
        assert_eq!(reopened.list().len(), 1);
        assert_eq!(reopened.list()[0].id, second.id);
    }

    #[test]
    fn records_use_the_browser_layout() {
        let mut storage = MemoryStorage::new();
        let mut store = DesignStore::open(&storage);
        store.save(&mut storage, "Layout", &draft()).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&storage.get_string(STORAGE_KEY).unwrap()).unwrap();
        let record = &json[0];
        assert_eq!(record["nailShape"], "almond");
        assert_eq!(record["nailTexture"], "metallic");
        assert_eq!(record["nailColors"][4], "#FF0000");
        assert_eq!(record["thumbnails"].as_array().unwrap().len(), NAIL_COUNT);
    }

    #[test]
    fn unknown_shape_names_fall_back() {
        let mut storage = MemoryStorage::new();
        let json = r##"[{"id":"a","name":"Old","date":"2024-01-01","nailColors":["#000000","#000000","#000000","#000000","#000000"],"nailShape":"ballerina","nailTexture":"chrome","thumbnails":[]}]"##;
        storage.set_string(STORAGE_KEY, json.to_owned());
        let store = DesignStore::open(&storage);
        assert_eq!(store.list()[0].nail_shape, NailShape::Round);
        assert_eq!(store.list()[0].nail_texture, NailTexture::Glossy);
        assert!(matches!(
            store.load("a"),
            Err(StoreError::MissingThumbnails { found: 0 })
        ));
    }

    #[test]
    fn unknown_ids_are_reported() {
        let mut storage = MemoryStorage::new();
        let mut store = DesignStore::open(&storage);
        assert!(matches!(
            store.delete(&mut storage, "nope"),
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(store.load("nope"), Err(StoreError::NotFound(_))));
    }
}

//! Placed modules.

use super::metadata::{ModuleMetadata, ModuleType};
use crate::transform::{normalize_angle, ModuleTransform};
use campkit_core::Error::InvalidGeometry;
use campkit_core::{Bounds, Position, Size};
use chrono::{DateTime, Utc};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// A typed object placed on the map.
///
/// The `type` written to JSON is derived from the metadata variant, so the two
/// can never disagree.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "ModuleRecord")]
pub struct Module {
    pub id: String,
    pub position: Position,
    pub size: Size,
    /// Degrees in `[0, 360)`.
    pub rotation: f64,
    /// Paint order; higher draws on top.
    pub z_index: i32,
    pub locked: bool,
    pub visible: bool,
    pub metadata: ModuleMetadata,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Module {
    /// Creates a module with a fresh id.
    pub fn new(metadata: ModuleMetadata, position: Position, size: Size) -> Self {
        Self::with_id(uuid::Uuid::new_v4().to_string(), metadata, position, size)
    }

    /// Creates a module with default metadata for `module_type`.
    pub fn of_type(module_type: ModuleType, position: Position, size: Size) -> Self {
        Self::new(ModuleMetadata::default_for(module_type), position, size)
    }

    pub fn with_id(
        id: impl Into<String>,
        metadata: ModuleMetadata,
        position: Position,
        size: Size,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            position,
            size,
            rotation: 0.0,
            z_index: 0,
            locked: false,
            visible: true,
            metadata,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn module_type(&self) -> ModuleType {
        self.metadata.module_type()
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_parts(self.position, self.size)
    }

    pub fn transform(&self) -> ModuleTransform {
        ModuleTransform::new(self.position, self.size, self.rotation)
    }

    /// Applies a transform and bumps `updated_at`.
    pub fn apply_transform(&mut self, transform: &ModuleTransform) {
        self.position = transform.position;
        self.size = transform.size;
        self.rotation = normalize_angle(transform.rotation);
        self.touch();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Serialize for Module {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Module", 11)?;
        s.serialize_field("id", &self.id)?;
        s.serialize_field("type", &self.module_type())?;
        s.serialize_field("position", &self.position)?;
        s.serialize_field("size", &self.size)?;
        s.serialize_field("rotation", &self.rotation)?;
        s.serialize_field("zIndex", &self.z_index)?;
        s.serialize_field("locked", &self.locked)?;
        s.serialize_field("visible", &self.visible)?;
        s.serialize_field("metadata", &self.metadata)?;
        s.serialize_field("createdAt", &self.created_at)?;
        s.serialize_field("updatedAt", &self.updated_at)?;
        s.end()
    }
}

/// Wire shape of a module before its metadata is decoded against `type`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModuleRecord {
    id: String,
    #[serde(rename = "type")]
    module_type: ModuleType,
    position: Position,
    size: Size,
    #[serde(default)]
    rotation: f64,
    #[serde(default)]
    z_index: i32,
    #[serde(default)]
    locked: bool,
    #[serde(default = "default_visible")]
    visible: bool,
    #[serde(default)]
    metadata: serde_json::Value,
    #[serde(default = "Utc::now")]
    created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    updated_at: DateTime<Utc>,
}

fn default_visible() -> bool {
    true
}

impl TryFrom<ModuleRecord> for Module {
    type Error = serde_json::Error;

    fn try_from(record: ModuleRecord) -> Result<Self, Self::Error> {
        let size = record.size;
        if !(size.width.is_finite() && size.height.is_finite())
            || size.width <= 0.0
            || size.height <= 0.0
        {
            return Err(serde::de::Error::custom(InvalidGeometry(format!(
                "module {} has size {}x{}",
                record.id, size.width, size.height
            ))));
        }
        let metadata = ModuleMetadata::from_json(record.module_type, record.metadata)?;
        Ok(Self {
            id: record.id,
            position: record.position,
            size,
            rotation: normalize_angle(record.rotation),
            z_index: record.z_index,
            locked: record.locked,
            visible: record.visible,
            metadata,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

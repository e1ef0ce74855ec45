//! Kind-specific module metadata.
//!
//! The set of module kinds is closed. Each kind owns exactly one metadata
//! shape, so a module's `type` fully determines which fields it carries.

use serde::{Deserialize, Serialize};

/// Discriminant written as the module's `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleType {
    Campsite,
    Building,
    Reception,
    ToiletBlock,
    ShowerBlock,
    Parking,
    Road,
    Playground,
    WaterPoint,
    PowerHookup,
    WasteStation,
}

impl ModuleType {
    pub const ALL: [ModuleType; 11] = [
        ModuleType::Campsite,
        ModuleType::Building,
        ModuleType::Reception,
        ModuleType::ToiletBlock,
        ModuleType::ShowerBlock,
        ModuleType::Parking,
        ModuleType::Road,
        ModuleType::Playground,
        ModuleType::WaterPoint,
        ModuleType::PowerHookup,
        ModuleType::WasteStation,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ModuleType::Campsite => "campsite",
            ModuleType::Building => "building",
            ModuleType::Reception => "reception",
            ModuleType::ToiletBlock => "toilet_block",
            ModuleType::ShowerBlock => "shower_block",
            ModuleType::Parking => "parking",
            ModuleType::Road => "road",
            ModuleType::Playground => "playground",
            ModuleType::WaterPoint => "water_point",
            ModuleType::PowerHookup => "power_hookup",
            ModuleType::WasteStation => "waste_station",
        }
    }

    /// Human readable name for labels.
    pub fn display_name(self) -> &'static str {
        match self {
            ModuleType::Campsite => "Campsite",
            ModuleType::Building => "Building",
            ModuleType::Reception => "Reception",
            ModuleType::ToiletBlock => "Toilet block",
            ModuleType::ShowerBlock => "Shower block",
            ModuleType::Parking => "Parking",
            ModuleType::Road => "Road",
            ModuleType::Playground => "Playground",
            ModuleType::WaterPoint => "Water point",
            ModuleType::PowerHookup => "Power hookup",
            ModuleType::WasteStation => "Waste station",
        }
    }
}

impl std::fmt::Display for ModuleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PitchSurface {
    #[default]
    Grass,
    Gravel,
    Hardstanding,
    Sand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct Hookups {
    pub electric: bool,
    pub water: bool,
    pub sewer: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct CampsiteMetadata {
    pub pitch_number: Option<String>,
    pub capacity: u32,
    pub price_per_night: f64,
    pub hookups: Hookups,
    pub surface: PitchSurface,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct BuildingMetadata {
    pub name: Option<String>,
    pub floors: u32,
    pub purpose: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ReceptionMetadata {
    pub opening_hours: Option<String>,
    pub staffed: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ToiletBlockMetadata {
    pub toilets: u32,
    pub accessible: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ShowerBlockMetadata {
    pub showers: u32,
    pub hot_water: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ParkingMetadata {
    pub spaces: u32,
    pub covered: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoadSurface {
    #[default]
    Asphalt,
    Gravel,
    Dirt,
    Paved,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct RoadMetadata {
    pub surface_type: RoadSurface,
    /// km/h
    pub speed_limit: Option<u32>,
    pub one_way: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct PlaygroundMetadata {
    pub min_age: Option<u32>,
    pub max_age: Option<u32>,
    pub fenced: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct WaterPointMetadata {
    pub drinking_water: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct PowerHookupMetadata {
    pub amperage: u32,
    pub sockets: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct WasteStationMetadata {
    pub recycling: bool,
    pub chemical_disposal: bool,
}

/// Metadata of a placed module, one variant per [`ModuleType`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ModuleMetadata {
    Campsite(CampsiteMetadata),
    Building(BuildingMetadata),
    Reception(ReceptionMetadata),
    ToiletBlock(ToiletBlockMetadata),
    ShowerBlock(ShowerBlockMetadata),
    Parking(ParkingMetadata),
    Road(RoadMetadata),
    Playground(PlaygroundMetadata),
    WaterPoint(WaterPointMetadata),
    PowerHookup(PowerHookupMetadata),
    WasteStation(WasteStationMetadata),
}

impl ModuleMetadata {
    pub fn module_type(&self) -> ModuleType {
        match self {
            ModuleMetadata::Campsite(_) => ModuleType::Campsite,
            ModuleMetadata::Building(_) => ModuleType::Building,
            ModuleMetadata::Reception(_) => ModuleType::Reception,
            ModuleMetadata::ToiletBlock(_) => ModuleType::ToiletBlock,
            ModuleMetadata::ShowerBlock(_) => ModuleType::ShowerBlock,
            ModuleMetadata::Parking(_) => ModuleType::Parking,
            ModuleMetadata::Road(_) => ModuleType::Road,
            ModuleMetadata::Playground(_) => ModuleType::Playground,
            ModuleMetadata::WaterPoint(_) => ModuleType::WaterPoint,
            ModuleMetadata::PowerHookup(_) => ModuleType::PowerHookup,
            ModuleMetadata::WasteStation(_) => ModuleType::WasteStation,
        }
    }

    /// Default metadata for a kind.
    pub fn default_for(module_type: ModuleType) -> Self {
        match module_type {
            ModuleType::Campsite => ModuleMetadata::Campsite(Default::default()),
            ModuleType::Building => ModuleMetadata::Building(Default::default()),
            ModuleType::Reception => ModuleMetadata::Reception(Default::default()),
            ModuleType::ToiletBlock => ModuleMetadata::ToiletBlock(Default::default()),
            ModuleType::ShowerBlock => ModuleMetadata::ShowerBlock(Default::default()),
            ModuleType::Parking => ModuleMetadata::Parking(Default::default()),
            ModuleType::Road => ModuleMetadata::Road(Default::default()),
            ModuleType::Playground => ModuleMetadata::Playground(Default::default()),
            ModuleType::WaterPoint => ModuleMetadata::WaterPoint(Default::default()),
            ModuleType::PowerHookup => ModuleMetadata::PowerHookup(Default::default()),
            ModuleType::WasteStation => ModuleMetadata::WasteStation(Default::default()),
        }
    }

    /// Decodes a JSON metadata object using the shape owned by `module_type`.
    ///
    /// A missing (`null`) object decodes to the kind's defaults.
    pub fn from_json(
        module_type: ModuleType,
        value: serde_json::Value,
    ) -> Result<Self, serde_json::Error> {
        if value.is_null() {
            return Ok(Self::default_for(module_type));
        }
        Ok(match module_type {
            ModuleType::Campsite => ModuleMetadata::Campsite(serde_json::from_value(value)?),
            ModuleType::Building => ModuleMetadata::Building(serde_json::from_value(value)?),
            ModuleType::Reception => ModuleMetadata::Reception(serde_json::from_value(value)?),
            ModuleType::ToiletBlock => ModuleMetadata::ToiletBlock(serde_json::from_value(value)?),
            ModuleType::ShowerBlock => ModuleMetadata::ShowerBlock(serde_json::from_value(value)?),
            ModuleType::Parking => ModuleMetadata::Parking(serde_json::from_value(value)?),
            ModuleType::Road => ModuleMetadata::Road(serde_json::from_value(value)?),
            ModuleType::Playground => ModuleMetadata::Playground(serde_json::from_value(value)?),
            ModuleType::WaterPoint => ModuleMetadata::WaterPoint(serde_json::from_value(value)?),
            ModuleType::PowerHookup => ModuleMetadata::PowerHookup(serde_json::from_value(value)?),
            ModuleType::WasteStation => {
                ModuleMetadata::WasteStation(serde_json::from_value(value)?)
            }
        })
    }
}

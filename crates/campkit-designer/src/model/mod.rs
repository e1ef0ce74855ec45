//! Map data model: modules, their kind-specific metadata, and the map itself.

mod map;
mod metadata;
mod module;

pub use map::{CampsiteMap, MapMetadata};
pub use metadata::{
    BuildingMetadata, CampsiteMetadata, Hookups, ModuleMetadata, ModuleType, ParkingMetadata,
    PitchSurface, PlaygroundMetadata, PowerHookupMetadata, ReceptionMetadata, RoadMetadata,
    RoadSurface, ShowerBlockMetadata, ToiletBlockMetadata, WasteStationMetadata,
    WaterPointMetadata,
};
pub use module::Module;

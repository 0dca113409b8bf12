//! Fleet registry domain entities.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Labels for the seven ship fields, in wire column order.
pub const SHIP_FIELD_LABELS: [&str; 7] = [
    "Id",
    "Name",
    "Displacement",
    "Home port",
    "Captain",
    "Berth number",
    "Destination",
];

/// A persisted fleet entry with a store-assigned unique id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShipRecord {
    /// Unique identifier, assigned on creation and immutable thereafter.
    pub id: i32,
    /// Ship name.
    pub name: String,
    /// Displacement in tons.
    pub displacement: f64,
    /// Home port.
    pub port: String,
    /// Captain's name.
    pub captain: String,
    /// Assigned berth number.
    pub berth_number: i32,
    /// Current destination.
    pub target: String,
}

/// The create/update payload, lacking an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShipInput {
    /// Ship name.
    pub name: String,
    /// Displacement in tons.
    pub displacement: f64,
    /// Home port.
    pub port: String,
    /// Captain's name.
    pub captain: String,
    /// Assigned berth number.
    pub berth_number: i32,
    /// Current destination.
    pub target: String,
}

impl ShipRecord {
    /// Display values for the seven fields, matching [`SHIP_FIELD_LABELS`].
    ///
    /// Both export formats render these same strings so that a row in the
    /// spreadsheet reads identically to a block in the document.
    pub fn field_values(&self) -> [String; 7] {
        [
            self.id.to_string(),
            self.name.clone(),
            format!("{} tons", self.displacement),
            self.port.clone(),
            self.captain.clone(),
            self.berth_number.to_string(),
            self.target.clone(),
        ]
    }
}

impl ShipInput {
    /// Attach a store-assigned id, producing a full record.
    pub fn into_record(self, id: i32) -> ShipRecord {
        ShipRecord {
            id,
            name: self.name,
            displacement: self.displacement,
            port: self.port,
            captain: self.captain,
            berth_number: self.berth_number,
            target: self.target,
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_ship() -> ShipRecord {
    ShipRecord {
        id: 4,
        name: "Nautilus".to_string(),
        displacement: 2000.0,
        port: "Lorient".to_string(),
        captain: "Nemo".to_string(),
        berth_number: 4,
        target: "Atlantic".to_string(),
    }
}

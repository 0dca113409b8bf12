//! Database models for the Harbormaster server.

use diesel::prelude::*;
use harbormaster_core::{ShipInput, ShipRecord};

use crate::schema::ships;

#[derive(Debug, Clone, Queryable, Identifiable, Selectable)]
#[diesel(table_name = ships)]
/// Ship database record, columns in registry order.
pub struct ShipRow {
    /// Sequence-assigned identifier.
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
    pub berth_num: i32,
    /// Current destination.
    pub target: String,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = ships)]
/// Insertable ship row; the store assigns the id.
pub struct NewShipRow {
    /// Ship name.
    pub name: String,
    /// Displacement in tons.
    pub displacement: f64,
    /// Home port.
    pub port: String,
    /// Captain's name.
    pub captain: String,
    /// Assigned berth number.
    pub berth_num: i32,
    /// Current destination.
    pub target: String,
}

impl From<ShipRow> for ShipRecord {
    fn from(row: ShipRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            displacement: row.displacement,
            port: row.port,
            captain: row.captain,
            berth_number: row.berth_num,
            target: row.target,
        }
    }
}

impl From<&ShipInput> for NewShipRow {
    fn from(input: &ShipInput) -> Self {
        Self {
            name: input.name.clone(),
            displacement: input.displacement,
            port: input.port.clone(),
            captain: input.captain.clone(),
            berth_num: input.berth_number,
            target: input.target.clone(),
        }
    }
}

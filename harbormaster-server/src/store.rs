//! Registry store: CRUD over the `ships` table.
//!
//! Ids come from the table's sequence, so they increase monotonically and
//! are never reused after a delete. Mutations run inside a transaction and
//! roll back on failure, so no partial write is ever visible.

use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::OptionalExtension;
use harbormaster_core::{ShipInput, ShipRecord};

use crate::error::RegistryError;
use crate::models::{NewShipRow, ShipRow};
use crate::schema::ships;

/// Persist a new ship and return it with its assigned id.
pub fn insert_ship(
    conn: &mut PgConnection,
    input: &ShipInput,
) -> Result<ShipRecord, RegistryError> {
    let values = NewShipRow::from(input);
    let row = conn
        .transaction::<ShipRow, diesel::result::Error, _>(|conn| {
            diesel::insert_into(ships::table)
                .values(&values)
                .get_result(conn)
        })
        .map_err(RegistryError::storage)?;
    Ok(row.into())
}

/// Return every ship, ordered by ascending id.
pub fn list_ships(conn: &mut PgConnection) -> Result<Vec<ShipRecord>, RegistryError> {
    let rows: Vec<ShipRow> = ships::table
        .order(ships::id.asc())
        .load(conn)
        .map_err(RegistryError::storage)?;
    Ok(rows.into_iter().map(ShipRecord::from).collect())
}

/// Look up a single ship by id.
pub fn get_ship(conn: &mut PgConnection, id: i32) -> Result<ShipRecord, RegistryError> {
    let row: Option<ShipRow> = ships::table
        .find(id)
        .first(conn)
        .optional()
        .map_err(RegistryError::storage)?;
    row.map(ShipRecord::from)
        .ok_or(RegistryError::NotFound(id))
}

/// Replace every field except the id; NotFound if the id is absent.
pub fn update_ship(
    conn: &mut PgConnection,
    id: i32,
    input: &ShipInput,
) -> Result<ShipRecord, RegistryError> {
    let values = NewShipRow::from(input);
    let row = conn
        .transaction::<Option<ShipRow>, diesel::result::Error, _>(|conn| {
            diesel::update(ships::table.find(id))
                .set(&values)
                .get_result(conn)
                .optional()
        })
        .map_err(RegistryError::storage)?;
    row.map(ShipRecord::from)
        .ok_or(RegistryError::NotFound(id))
}

/// Remove a ship by id; NotFound if it was already absent.
pub fn delete_ship(conn: &mut PgConnection, id: i32) -> Result<(), RegistryError> {
    let deleted = conn
        .transaction::<usize, diesel::result::Error, _>(|conn| {
            diesel::delete(ships::table.find(id)).execute(conn)
        })
        .map_err(RegistryError::storage)?;
    if deleted == 0 {
        return Err(RegistryError::NotFound(id));
    }
    Ok(())
}

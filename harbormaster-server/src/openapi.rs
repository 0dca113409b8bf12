//! OpenAPI specification for the Harbormaster server.

use utoipa::OpenApi;

use harbormaster_core::{ShipInput, ShipRecord};

use crate::routes::{DeleteResponse, ErrorResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::list_ships,
        crate::routes::get_ship,
        crate::routes::create_ship,
        crate::routes::update_ship,
        crate::routes::delete_ship,
        crate::routes::download_fleet_document,
        crate::routes::download_ship_document,
        crate::routes::download_fleet_spreadsheet,
        crate::routes::download_ship_spreadsheet,
        crate::routes::openapi_json
    ),
    components(
        schemas(ShipRecord, ShipInput, DeleteResponse, ErrorResponse)
    ),
    tags(
        (name = "ships", description = "Fleet registry CRUD"),
        (name = "export", description = "Document and spreadsheet downloads"),
        (name = "system", description = "System endpoints")
    )
)]
/// OpenAPI specification for the Harbormaster server.
pub struct ApiDoc;

//! HTTP handlers for the Harbormaster server.

use actix_web::http::header;
use actix_web::{HttpResponse, Responder, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use harbormaster_core::{
    FLEET_DOCUMENT_FILENAME, FLEET_SPREADSHEET_FILENAME, ShipInput, render_fleet_document,
    render_fleet_spreadsheet, render_ship_document, render_ship_spreadsheet,
    ship_document_filename, ship_spreadsheet_filename,
};

use crate::db::DbPool;
use crate::error::RegistryError;
use crate::openapi::ApiDoc;
use crate::store;

/// Media type for Word document attachments.
const DOCUMENT_MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
/// Media type for spreadsheet attachments.
const SPREADSHEET_MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Clone)]
/// Shared application state for handlers.
pub struct AppState {
    /// Database connection pool.
    pub pool: DbPool,
}

/// Error response payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message.
    pub message: String,
}

/// Confirmation payload returned by the delete operation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    /// Confirmation message.
    pub data: String,
}

/// JSON extractor configuration mapping malformed payloads to 422.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        actix_web::error::InternalError::from_response(
            err,
            HttpResponse::UnprocessableEntity().json(ErrorResponse { message }),
        )
        .into()
    })
}

/// Map a registry error to its HTTP response at the service boundary.
///
/// Storage and export detail stays in the server log; clients get a
/// generic message.
fn error_response(err: &RegistryError) -> HttpResponse {
    match err {
        RegistryError::NotFound(_) | RegistryError::EmptyRegistry => {
            HttpResponse::NotFound().json(ErrorResponse {
                message: err.to_string(),
            })
        }
        RegistryError::Storage(detail) => {
            log::error!("storage failure: {detail}");
            HttpResponse::InternalServerError().json(ErrorResponse {
                message: "storage unavailable".to_string(),
            })
        }
        RegistryError::Export(detail) => {
            log::error!("export failure: {detail}");
            HttpResponse::InternalServerError().json(ErrorResponse {
                message: "export failed".to_string(),
            })
        }
    }
}

fn task_failed(err: actix_web::error::BlockingError) -> HttpResponse {
    log::error!("registry task failed: {err}");
    HttpResponse::InternalServerError().json(ErrorResponse {
        message: "registry task failed".to_string(),
    })
}

fn attachment(bytes: Vec<u8>, filename: &str, media_type: &str) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(media_type)
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ))
        .body(bytes)
}

#[utoipa::path(
    get,
    path = "/ships",
    responses(
        (status = 200, description = "Every ship in the registry", body = [harbormaster_core::ShipRecord]),
        (status = 500, description = "Storage unavailable", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[get("/ships")]
/// List every ship in the registry.
pub async fn list_ships(state: web::Data<AppState>) -> impl Responder {
    let pool = state.pool.clone();
    let result = web::block(move || {
        let mut conn = pool.get().map_err(RegistryError::storage)?;
        store::list_ships(&mut conn)
    })
    .await;

    match result {
        Ok(Ok(ships)) => HttpResponse::Ok().json(ships),
        Ok(Err(err)) => error_response(&err),
        Err(err) => task_failed(err),
    }
}

#[utoipa::path(
    get,
    path = "/ships/{id}",
    params(
        ("id" = i32, Path, description = "Ship identifier")
    ),
    responses(
        (status = 200, description = "The requested ship", body = harbormaster_core::ShipRecord),
        (status = 404, description = "Ship not found", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[get("/ships/{id}")]
/// Fetch a single ship by id.
pub async fn get_ship(state: web::Data<AppState>, path: web::Path<i32>) -> impl Responder {
    let id = path.into_inner();
    let pool = state.pool.clone();
    let result = web::block(move || {
        let mut conn = pool.get().map_err(RegistryError::storage)?;
        store::get_ship(&mut conn, id)
    })
    .await;

    match result {
        Ok(Ok(ship)) => HttpResponse::Ok().json(ship),
        Ok(Err(err)) => error_response(&err),
        Err(err) => task_failed(err),
    }
}

#[utoipa::path(
    post,
    path = "/ships",
    request_body = ShipInput,
    responses(
        (status = 200, description = "The created ship with its new id", body = harbormaster_core::ShipRecord),
        (status = 422, description = "Malformed input", body = ErrorResponse),
        (status = 500, description = "Storage unavailable", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[post("/ships")]
/// Register a new ship; the store assigns its id.
pub async fn create_ship(
    state: web::Data<AppState>,
    payload: web::Json<ShipInput>,
) -> impl Responder {
    let input = payload.into_inner();
    let pool = state.pool.clone();
    let result = web::block(move || {
        let mut conn = pool.get().map_err(RegistryError::storage)?;
        store::insert_ship(&mut conn, &input)
    })
    .await;

    match result {
        Ok(Ok(ship)) => HttpResponse::Ok().json(ship),
        Ok(Err(err)) => error_response(&err),
        Err(err) => task_failed(err),
    }
}

#[utoipa::path(
    put,
    path = "/ships/{id}",
    params(
        ("id" = i32, Path, description = "Ship identifier")
    ),
    request_body = ShipInput,
    responses(
        (status = 200, description = "The updated ship", body = harbormaster_core::ShipRecord),
        (status = 404, description = "Ship not found", body = ErrorResponse),
        (status = 422, description = "Malformed input", body = ErrorResponse),
        (status = 500, description = "Storage unavailable", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[put("/ships/{id}")]
/// Replace every field of a ship except its id.
pub async fn update_ship(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    payload: web::Json<ShipInput>,
) -> impl Responder {
    let id = path.into_inner();
    let input = payload.into_inner();
    let pool = state.pool.clone();
    let result = web::block(move || {
        let mut conn = pool.get().map_err(RegistryError::storage)?;
        store::update_ship(&mut conn, id, &input)
    })
    .await;

    match result {
        Ok(Ok(ship)) => HttpResponse::Ok().json(ship),
        Ok(Err(err)) => error_response(&err),
        Err(err) => task_failed(err),
    }
}

#[utoipa::path(
    delete,
    path = "/ships/{id}",
    params(
        ("id" = i32, Path, description = "Ship identifier")
    ),
    responses(
        (status = 200, description = "Deletion confirmation", body = DeleteResponse),
        (status = 404, description = "Ship not found", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[delete("/ships/{id}")]
/// Remove a ship from the registry.
pub async fn delete_ship(state: web::Data<AppState>, path: web::Path<i32>) -> impl Responder {
    let id = path.into_inner();
    let pool = state.pool.clone();
    let result = web::block(move || {
        let mut conn = pool.get().map_err(RegistryError::storage)?;
        store::delete_ship(&mut conn, id)
    })
    .await;

    match result {
        Ok(Ok(())) => HttpResponse::Ok().json(DeleteResponse {
            data: "ship deleted".to_string(),
        }),
        Ok(Err(err)) => error_response(&err),
        Err(err) => task_failed(err),
    }
}

#[utoipa::path(
    get,
    path = "/ships/download_word",
    responses(
        (status = 200, description = "Fleet document attachment"),
        (status = 404, description = "Registry is empty", body = ErrorResponse)
    ),
    tag = "export"
)]
#[get("/ships/download_word")]
/// Download the whole fleet as a Word document.
pub async fn download_fleet_document(state: web::Data<AppState>) -> impl Responder {
    let pool = state.pool.clone();
    let result = web::block(move || {
        let mut conn = pool.get().map_err(RegistryError::storage)?;
        let ships = store::list_ships(&mut conn)?;
        if ships.is_empty() {
            return Err(RegistryError::EmptyRegistry);
        }
        Ok(render_fleet_document(&ships)?)
    })
    .await;

    match result {
        Ok(Ok(bytes)) => attachment(bytes, FLEET_DOCUMENT_FILENAME, DOCUMENT_MEDIA_TYPE),
        Ok(Err(err)) => error_response(&err),
        Err(err) => task_failed(err),
    }
}

#[utoipa::path(
    get,
    path = "/ships/download_word/{id}",
    params(
        ("id" = i32, Path, description = "Ship identifier")
    ),
    responses(
        (status = 200, description = "Single-ship document attachment"),
        (status = 404, description = "Ship not found", body = ErrorResponse)
    ),
    tag = "export"
)]
#[get("/ships/download_word/{id}")]
/// Download a single ship as a Word document.
pub async fn download_ship_document(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> impl Responder {
    let id = path.into_inner();
    let pool = state.pool.clone();
    let result = web::block(move || {
        let mut conn = pool.get().map_err(RegistryError::storage)?;
        let ship = store::get_ship(&mut conn, id)?;
        Ok(render_ship_document(&ship)?)
    })
    .await;

    match result {
        Ok(Ok(bytes)) => attachment(bytes, &ship_document_filename(id), DOCUMENT_MEDIA_TYPE),
        Ok(Err(err)) => error_response(&err),
        Err(err) => task_failed(err),
    }
}

#[utoipa::path(
    get,
    path = "/ships/download_excel",
    responses(
        (status = 200, description = "Fleet spreadsheet attachment"),
        (status = 404, description = "Registry is empty", body = ErrorResponse)
    ),
    tag = "export"
)]
#[get("/ships/download_excel")]
/// Download the whole fleet as a spreadsheet.
pub async fn download_fleet_spreadsheet(state: web::Data<AppState>) -> impl Responder {
    let pool = state.pool.clone();
    let result = web::block(move || {
        let mut conn = pool.get().map_err(RegistryError::storage)?;
        let ships = store::list_ships(&mut conn)?;
        if ships.is_empty() {
            return Err(RegistryError::EmptyRegistry);
        }
        Ok(render_fleet_spreadsheet(&ships)?)
    })
    .await;

    match result {
        Ok(Ok(bytes)) => attachment(bytes, FLEET_SPREADSHEET_FILENAME, SPREADSHEET_MEDIA_TYPE),
        Ok(Err(err)) => error_response(&err),
        Err(err) => task_failed(err),
    }
}

#[utoipa::path(
    get,
    path = "/ships/download_excel/{id}",
    params(
        ("id" = i32, Path, description = "Ship identifier")
    ),
    responses(
        (status = 200, description = "Single-ship spreadsheet attachment"),
        (status = 404, description = "Ship not found", body = ErrorResponse)
    ),
    tag = "export"
)]
#[get("/ships/download_excel/{id}")]
/// Download a single ship as a spreadsheet.
pub async fn download_ship_spreadsheet(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> impl Responder {
    let id = path.into_inner();
    let pool = state.pool.clone();
    let result = web::block(move || {
        let mut conn = pool.get().map_err(RegistryError::storage)?;
        let ship = store::get_ship(&mut conn, id)?;
        Ok(render_ship_spreadsheet(&ship)?)
    })
    .await;

    match result {
        Ok(Ok(bytes)) => attachment(bytes, &ship_spreadsheet_filename(id), SPREADSHEET_MEDIA_TYPE),
        Ok(Err(err)) => error_response(&err),
        Err(err) => task_failed(err),
    }
}

#[utoipa::path(
    get,
    path = "/openapi.json",
    responses(
        (status = 200, description = "OpenAPI document", body = serde_json::Value)
    ),
    tag = "system"
)]
#[get("/openapi.json")]
/// Serve the OpenAPI document.
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test};
    use harbormaster_core::ShipRecord;

    use crate::db::TestDatabase;

    const ZIP_MAGIC: [u8; 2] = [0x50, 0x4b];

    // Export routes register ahead of the {id} matchers so the literal
    // download segments are never parsed as ids.
    macro_rules! test_service {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data(json_config())
                    .app_data($state.clone())
                    .service(list_ships)
                    .service(create_ship)
                    .service(download_fleet_document)
                    .service(download_ship_document)
                    .service(download_fleet_spreadsheet)
                    .service(download_ship_spreadsheet)
                    .service(get_ship)
                    .service(update_ship)
                    .service(delete_ship)
                    .service(openapi_json),
            )
        };
    }

    fn test_state() -> (web::Data<AppState>, TestDatabase) {
        let mut test_db = TestDatabase::new();
        let pool = test_db.pool();
        (web::Data::new(AppState { pool }), test_db)
    }

    fn nautilus() -> ShipInput {
        ShipInput {
            name: "Nautilus".to_string(),
            displacement: 2000.0,
            port: "Lorient".to_string(),
            captain: "Nemo".to_string(),
            berth_number: 4,
            target: "Atlantic".to_string(),
        }
    }

    fn aurora() -> ShipInput {
        ShipInput {
            name: "Aurora".to_string(),
            displacement: 6731.0,
            port: "Saint Petersburg".to_string(),
            captain: "Nikolsky".to_string(),
            berth_number: 12,
            target: "Baltic".to_string(),
        }
    }

    macro_rules! create_ship {
        ($app:expr, $input:expr) => {{
            let req = test::TestRequest::post()
                .uri("/ships")
                .set_json($input)
                .to_request();
            let record: ShipRecord = test::call_and_read_body_json($app, req).await;
            record
        }};
    }

    #[actix_web::test]
    async fn create_then_get_returns_identical_record() {
        let (state, _db) = test_state();
        let app = test_service!(state).await;

        let created = create_ship!(&app, &nautilus());
        assert!(created.id > 0);

        let req = test::TestRequest::get()
            .uri(&format!("/ships/{}", created.id))
            .to_request();
        let fetched: ShipRecord = test::call_and_read_body_json(&app, req).await;

        assert_eq!(fetched, created);
        assert_eq!(fetched, nautilus().into_record(created.id));
    }

    #[actix_web::test]
    async fn get_missing_ship_returns_not_found_message() {
        let (state, _db) = test_state();
        let app = test_service!(state).await;

        let req = test::TestRequest::get().uri("/ships/9999").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: ErrorResponse = test::read_body_json(resp).await;
        assert!(body.message.contains("not found"));
    }

    #[actix_web::test]
    async fn list_returns_ships_in_id_order() {
        let (state, _db) = test_state();
        let app = test_service!(state).await;

        let first = create_ship!(&app, &nautilus());
        let second = create_ship!(&app, &aurora());

        let req = test::TestRequest::get().uri("/ships").to_request();
        let ships: Vec<ShipRecord> = test::call_and_read_body_json(&app, req).await;

        assert_eq!(ships.len(), 2);
        assert_eq!(ships[0], first);
        assert_eq!(ships[1], second);
    }

    #[actix_web::test]
    async fn create_rejects_malformed_payload() {
        let (state, _db) = test_state();
        let app = test_service!(state).await;

        let req = test::TestRequest::post()
            .uri("/ships")
            .set_json(serde_json::json!({ "name": "Nautilus" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let req = test::TestRequest::get().uri("/ships").to_request();
        let ships: Vec<ShipRecord> = test::call_and_read_body_json(&app, req).await;
        assert!(ships.is_empty());
    }

    #[actix_web::test]
    async fn update_replaces_fields_and_keeps_id() {
        let (state, _db) = test_state();
        let app = test_service!(state).await;

        let created = create_ship!(&app, &nautilus());
        let req = test::TestRequest::put()
            .uri(&format!("/ships/{}", created.id))
            .set_json(aurora())
            .to_request();
        let updated: ShipRecord = test::call_and_read_body_json(&app, req).await;

        assert_eq!(updated.id, created.id);
        assert_eq!(updated, aurora().into_record(created.id));

        let req = test::TestRequest::get()
            .uri(&format!("/ships/{}", created.id))
            .to_request();
        let fetched: ShipRecord = test::call_and_read_body_json(&app, req).await;
        assert_eq!(fetched, updated);
    }

    #[actix_web::test]
    async fn update_missing_ship_returns_not_found() {
        let (state, _db) = test_state();
        let app = test_service!(state).await;

        let req = test::TestRequest::put()
            .uri("/ships/9999")
            .set_json(aurora())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn delete_confirms_then_reports_not_found() {
        let (state, _db) = test_state();
        let app = test_service!(state).await;

        let created = create_ship!(&app, &nautilus());
        let uri = format!("/ships/{}", created.id);

        let req = test::TestRequest::delete().uri(&uri).to_request();
        let confirmation: DeleteResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(confirmation.data, "ship deleted");

        let req = test::TestRequest::delete().uri(&uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get().uri(&uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn fleet_document_export_requires_a_nonempty_registry() {
        let (state, _db) = test_state();
        let app = test_service!(state).await;

        let req = test::TestRequest::get()
            .uri("/ships/download_word")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn fleet_spreadsheet_export_requires_a_nonempty_registry() {
        let (state, _db) = test_state();
        let app = test_service!(state).await;

        let req = test::TestRequest::get()
            .uri("/ships/download_excel")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn fleet_document_export_downloads_attachment() {
        let (state, _db) = test_state();
        let app = test_service!(state).await;
        create_ship!(&app, &nautilus());

        let req = test::TestRequest::get()
            .uri("/ships/download_word")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let disposition = resp
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .expect("content disposition");
        assert!(disposition.contains("attachment"));
        assert!(disposition.contains("fleet.docx"));

        let body = test::read_body(resp).await;
        assert_eq!(&body[..2], &ZIP_MAGIC);
    }

    #[actix_web::test]
    async fn ship_spreadsheet_export_names_file_after_id() {
        let (state, _db) = test_state();
        let app = test_service!(state).await;
        let created = create_ship!(&app, &nautilus());

        let req = test::TestRequest::get()
            .uri(&format!("/ships/download_excel/{}", created.id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let disposition = resp
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .expect("content disposition");
        assert!(disposition.contains(&format!("ship_{}.xlsx", created.id)));

        let body = test::read_body(resp).await;
        assert_eq!(&body[..2], &ZIP_MAGIC);
    }

    #[actix_web::test]
    async fn ship_document_export_missing_id_returns_not_found() {
        let (state, _db) = test_state();
        let app = test_service!(state).await;

        let req = test::TestRequest::get()
            .uri("/ships/download_word/9999")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}

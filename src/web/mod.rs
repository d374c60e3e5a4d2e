//! Web API module for ImmoKPA.
//!
//! This module provides a REST API over the valuation engine and the
//! property store, for a browser-based form front end.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `POST /api/valuation` - Validate and value a set of inputs
//! - `POST /api/validate` - Validate inputs only
//! - `GET /api/tables` - Reference tables in use
//! - `GET /api/tables/index/{year}` - Resolve the construction-price index for a year
//! - `GET /api/properties` - List stored properties
//! - `POST /api/properties` - Create a property
//! - `GET /api/properties/{id}` - Load a property
//! - `PUT /api/properties/{id}` - Rename a property and/or replace its inputs
//! - `DELETE /api/properties/{id}` - Delete a property
//! - `GET /api/properties/{id}/valuation` - Value a stored property
//! - `PUT /api/properties/active` - Switch the active property

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use uuid::Uuid;

use crate::config::Config;
use crate::models::{BuildingType, Property, PropertyInputs, ValuationResult, QUALITY_TIER_COUNT};
use crate::services::PropertyStore;
use crate::tables::{IndexResolution, ReferenceTables};
use crate::validation::{InputValidator, ValidationReport};
use crate::valuation::ValuationEngine;

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for the web API.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    config: Arc<Config>,
    /// Reference tables (immutable after load)
    tables: Arc<ReferenceTables>,
    /// Property store, serialized behind a lock
    store: Arc<Mutex<PropertyStore>>,
}

impl AppState {
    /// Creates a new application state with the store in `data_dir`.
    pub fn new(config: Config, data_dir: PathBuf) -> anyhow::Result<Self> {
        let tables = config.reference_tables();
        let store = PropertyStore::open(&data_dir)?;
        Ok(Self {
            config: Arc::new(config),
            tables: Arc::new(tables),
            store: Arc::new(Mutex::new(store)),
        })
    }

    /// Returns the property store path.
    pub fn store_path(&self) -> Result<PathBuf, ApiFailure> {
        Ok(self.lock_store()?.path().to_path_buf())
    }

    fn lock_store(&self) -> Result<MutexGuard<'_, PropertyStore>, ApiFailure> {
        self.store.lock().map_err(|_| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError::new("Property store is unavailable")),
            )
        })
    }

    fn value(&self, inputs: &PropertyInputs) -> Result<ValuationResult, ApiFailure> {
        let report = InputValidator::new().validate(inputs);
        if !report.is_valid() {
            return Err((
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ApiError::with_fields("Invalid inputs", report)),
            ));
        }
        Ok(ValuationEngine::new(&self.tables).compute(&inputs.to_valuation_input()))
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Current health status (e.g., "healthy").
    pub status: String,
    /// Application version.
    pub version: String,
}

/// Valuation response.
#[derive(Debug, Serialize)]
pub struct ValuationResponse {
    /// Engine output.
    pub result: ValuationResult,
}

/// Validation response.
#[derive(Debug, Serialize)]
pub struct ValidationResponse {
    /// Whether all inputs passed.
    pub valid: bool,
    /// Message per failed field.
    pub errors: ValidationReport,
}

/// One year of the construction-price index.
#[derive(Debug, Serialize)]
pub struct IndexEntry {
    /// Calendar year.
    pub year: i32,
    /// Index value (2010 = 100).
    pub value: f64,
}

/// Unit costs of one building type.
#[derive(Debug, Serialize)]
pub struct UnitCostRow {
    /// Building type key.
    pub building_type: BuildingType,
    /// Display label.
    pub label: String,
    /// Cost per square meter for tiers 1 to 5.
    pub costs: [f64; QUALITY_TIER_COUNT],
}

/// Reference tables response.
#[derive(Debug, Serialize)]
pub struct TablesResponse {
    /// Construction-price index, ascending by year.
    pub construction_price_index: Vec<IndexEntry>,
    /// Unit-cost matrix.
    pub unit_costs: Vec<UnitCostRow>,
}

/// Property list response.
#[derive(Debug, Serialize)]
pub struct PropertyListResponse {
    /// All stored properties.
    pub properties: Vec<Property>,
    /// Id of the active property.
    pub active_property_id: Option<Uuid>,
}

/// Property creation request.
#[derive(Debug, Deserialize)]
pub struct CreatePropertyRequest {
    /// Display name.
    pub name: String,
    /// Initial inputs; configured defaults if absent.
    #[serde(default)]
    pub inputs: Option<PropertyInputs>,
}

/// Property update request.
#[derive(Debug, Deserialize)]
pub struct UpdatePropertyRequest {
    /// New display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Replacement inputs.
    #[serde(default)]
    pub inputs: Option<PropertyInputs>,
}

/// Active property selection.
#[derive(Debug, Serialize, Deserialize)]
pub struct ActivePropertyRequest {
    /// Property to activate.
    pub id: Uuid,
}

/// API error response.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Error message.
    pub error: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Per-field validation messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<ValidationReport>,
}

impl ApiError {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
            fields: None,
        }
    }

    fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
            fields: None,
        }
    }

    fn with_fields(error: impl Into<String>, fields: ValidationReport) -> Self {
        Self {
            error: error.into(),
            details: None,
            fields: Some(fields),
        }
    }
}

/// Error half of every handler result.
pub type ApiFailure = (StatusCode, Json<ApiError>);

type ApiResult<T> = Result<Json<T>, ApiFailure>;

fn not_found(id: Uuid) -> ApiFailure {
    (
        StatusCode::NOT_FOUND,
        Json(ApiError::new(format!("Property not found: {}", id))),
    )
}

fn internal(error: &str, e: &anyhow::Error) -> ApiFailure {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiError::with_details(error, format!("{:#}", e))),
    )
}

/// Checks a new name before touching the store.
fn check_name(store: &PropertyStore, name: &str, exclude: Option<Uuid>) -> Result<(), ApiFailure> {
    let name = Property::normalize_name(name).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError::with_details("Invalid property name", e.to_string())),
        )
    })?;
    if store
        .list()
        .iter()
        .any(|p| Some(p.id) != exclude && p.has_name(&name))
    {
        return Err((
            StatusCode::CONFLICT,
            Json(ApiError::new(format!(
                "A property named '{}' already exists",
                name
            ))),
        ));
    }
    Ok(())
}

// ============================================================================
// Valuation Handlers
// ============================================================================

/// GET /health - Health check endpoint.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// POST /api/valuation - Validate and value inputs.
async fn compute_valuation(
    State(state): State<AppState>,
    Json(inputs): Json<PropertyInputs>,
) -> ApiResult<ValuationResponse> {
    let result = state.value(&inputs)?;
    Ok(Json(ValuationResponse { result }))
}

/// POST /api/validate - Validate inputs only.
async fn validate_inputs(Json(inputs): Json<PropertyInputs>) -> Json<ValidationResponse> {
    let errors = InputValidator::new().validate(&inputs);
    Json(ValidationResponse {
        valid: errors.is_valid(),
        errors,
    })
}

/// GET /api/tables - Reference tables in use.
async fn get_tables(State(state): State<AppState>) -> Json<TablesResponse> {
    let construction_price_index = state
        .tables
        .price_index()
        .iter()
        .map(|(year, value)| IndexEntry { year, value })
        .collect();
    let unit_costs = BuildingType::ALL
        .iter()
        .map(|building_type| UnitCostRow {
            building_type: *building_type,
            label: building_type.display_name().to_string(),
            costs: *state.tables.unit_costs().costs(*building_type),
        })
        .collect();

    Json(TablesResponse {
        construction_price_index,
        unit_costs,
    })
}

/// GET /api/tables/index/{year} - Resolve the index for a year.
async fn resolve_index(
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> Json<IndexResolution> {
    Json(state.tables.price_index().resolve(year))
}

// ============================================================================
// Property Handlers
// ============================================================================

/// GET /api/properties - List stored properties.
async fn list_properties(State(state): State<AppState>) -> ApiResult<PropertyListResponse> {
    let store = state.lock_store()?;
    Ok(Json(PropertyListResponse {
        properties: store.list().to_vec(),
        active_property_id: store.active_id(),
    }))
}

/// POST /api/properties - Create a property (becomes active).
async fn create_property(
    State(state): State<AppState>,
    Json(request): Json<CreatePropertyRequest>,
) -> Result<(StatusCode, Json<Property>), ApiFailure> {
    let mut store = state.lock_store()?;
    check_name(&store, &request.name, None)?;

    let inputs = request
        .inputs
        .unwrap_or_else(|| state.config.default_inputs());
    let property = store
        .create(&request.name, inputs)
        .map_err(|e| internal("Failed to create property", &e))?;

    Ok((StatusCode::CREATED, Json(property)))
}

/// GET /api/properties/{id} - Load a property.
async fn get_property(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Property> {
    let store = state.lock_store()?;
    store
        .get(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found(id))
}

/// PUT /api/properties/{id} - Rename and/or replace inputs.
async fn update_property(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdatePropertyRequest>,
) -> ApiResult<Property> {
    let mut store = state.lock_store()?;
    if store.get(id).is_none() {
        return Err(not_found(id));
    }

    if let Some(name) = &request.name {
        check_name(&store, name, Some(id))?;
        store
            .rename(id, name)
            .map_err(|e| internal("Failed to rename property", &e))?;
    }
    if let Some(inputs) = request.inputs {
        store
            .update_inputs(id, inputs)
            .map_err(|e| internal("Failed to update property", &e))?;
    }

    store.get(id).cloned().map(Json).ok_or_else(|| not_found(id))
}

/// DELETE /api/properties/{id} - Delete a property.
async fn delete_property(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiFailure> {
    let mut store = state.lock_store()?;
    if store.get(id).is_none() {
        return Err(not_found(id));
    }
    store
        .delete(id, state.config.default_inputs())
        .map_err(|e| internal("Failed to delete property", &e))?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/properties/{id}/valuation - Value a stored property.
async fn property_valuation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<ValuationResponse> {
    let inputs = {
        let store = state.lock_store()?;
        store
            .get(id)
            .map(|p| p.inputs.clone())
            .ok_or_else(|| not_found(id))?
    };
    let result = state.value(&inputs)?;
    Ok(Json(ValuationResponse { result }))
}

/// PUT /api/properties/active - Switch the active property.
async fn set_active_property(
    State(state): State<AppState>,
    Json(request): Json<ActivePropertyRequest>,
) -> ApiResult<ActivePropertyRequest> {
    let mut store = state.lock_store()?;
    if store.get(request.id).is_none() {
        return Err(not_found(request.id));
    }
    store
        .set_active(request.id)
        .map_err(|e| internal("Failed to switch property", &e))?;
    Ok(Json(request))
}

// ============================================================================
// Router Setup
// ============================================================================

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    // Permissive CORS: the server runs locally next to the form front end
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Valuation endpoints
        .route("/api/valuation", post(compute_valuation))
        .route("/api/validate", post(validate_inputs))
        // Reference tables
        .route("/api/tables", get(get_tables))
        .route("/api/tables/index/{year}", get(resolve_index))
        // Property endpoints
        .route(
            "/api/properties",
            get(list_properties).post(create_property),
        )
        .route("/api/properties/active", put(set_active_property))
        .route(
            "/api/properties/{id}",
            get(get_property)
                .put(update_property)
                .delete(delete_property),
        )
        .route("/api/properties/{id}/valuation", get(property_valuation))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs the web server.
///
/// Creates the default property first if the store is empty.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or the server fails to start.
pub async fn run_server(config: Config, data_dir: PathBuf, addr: SocketAddr) -> anyhow::Result<()> {
    let defaults = config.default_inputs();
    let state = AppState::new(config, data_dir)?;
    {
        let mut store = state
            .store
            .lock()
            .map_err(|_| anyhow::anyhow!("Property store lock poisoned"))?;
        let active = store.ensure_default(defaults)?;
        info!("Active property: {}", active.name);
    }
    let app = create_router(state);

    info!("Starting ImmoKPA web server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

//! HTTP server for the bistro API.
//!
//! Serves the customer menu, the kitchen board and the two ordering
//! endpoints on top of a shared [`BistroEngine`].

use axum::{
	extract::{rejection::JsonRejection, DefaultBodyLimit, Path, State},
	http::{header, HeaderValue, Method},
	response::Json,
	routing::{get, post},
	Router,
};
use bistro_config::{ApiConfig, CorsConfig};
use bistro_core::BistroEngine;
use bistro_types::{
	APIError, KitchenResponse, MenuResponse, Order, PlaceOrderRequest, PlaceOrderResponse,
	UpdateStatusRequest, UpdateStatusResponse,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
	cors::{AllowOrigin, CorsLayer},
	timeout::TimeoutLayer,
	trace::TraceLayer,
};

/// Shared application state for the API server.
#[derive(Clone)]
pub struct AppState {
	/// Engine owning the menu and the order store.
	pub engine: Arc<BistroEngine>,
}

/// Builds the router with every route and middleware layer.
pub fn build_router(engine: Arc<BistroEngine>, api_config: &ApiConfig) -> Router {
	let app_state = AppState { engine };

	Router::new()
		.route("/", get(handle_menu))
		.route("/kitchen", get(handle_kitchen))
		.nest(
			"/api",
			Router::new()
				.route("/place-order", post(handle_place_order))
				.route("/update-status", post(handle_update_status))
				.route("/orders/{id}", get(handle_get_order_by_id)),
		)
		.layer(
			ServiceBuilder::new()
				.layer(TraceLayer::new_for_http())
				.layer(TimeoutLayer::new(Duration::from_secs(
					api_config.timeout_seconds,
				)))
				.layer(cors_layer(api_config.cors.as_ref()))
				.layer(DefaultBodyLimit::max(api_config.max_request_size)),
		)
		.with_state(app_state)
}

/// Starts the HTTP server for the API.
pub async fn start_server(
	api_config: ApiConfig,
	engine: Arc<BistroEngine>,
) -> Result<(), Box<dyn std::error::Error>> {
	let app = build_router(engine, &api_config);

	let bind_address = format!("{}:{}", api_config.host, api_config.port);
	let listener = TcpListener::bind(&bind_address).await?;

	tracing::info!("Bistro API server starting on {}", bind_address);

	axum::serve(listener, app).await?;

	Ok(())
}

/// Any origin when unconfigured or when `"*"` is listed, otherwise only the
/// listed origins.
fn cors_layer(cors: Option<&CorsConfig>) -> CorsLayer {
	let Some(cors) = cors else {
		return CorsLayer::permissive();
	};
	if cors.allowed_origins.iter().any(|origin| origin == "*") {
		return CorsLayer::permissive();
	}

	let origins: Vec<HeaderValue> = cors
		.allowed_origins
		.iter()
		.filter_map(|origin| match origin.parse::<HeaderValue>() {
			Ok(value) => Some(value),
			Err(_) => {
				tracing::warn!(%origin, "Ignoring invalid CORS origin");
				None
			},
		})
		.collect();

	CorsLayer::new()
		.allow_origin(AllowOrigin::list(origins))
		.allow_methods([Method::GET, Method::POST])
		.allow_headers([header::CONTENT_TYPE])
}

/// Turns a body the JSON extractor refused into the failure envelope.
fn bad_body(rejection: JsonRejection) -> APIError {
	tracing::warn!(error = %rejection.body_text(), "Rejected request body");
	APIError::BadRequest {
		message: rejection.body_text(),
	}
}

/// Handles GET / requests.
async fn handle_menu(State(state): State<AppState>) -> Json<MenuResponse> {
	Json(crate::apis::views::menu(&state.engine))
}

/// Handles GET /kitchen requests.
async fn handle_kitchen(
	State(state): State<AppState>,
) -> Result<Json<KitchenResponse>, APIError> {
	crate::apis::views::kitchen(&state.engine).await.map(Json)
}

/// Handles POST /api/place-order requests.
async fn handle_place_order(
	State(state): State<AppState>,
	payload: Result<Json<PlaceOrderRequest>, JsonRejection>,
) -> Result<Json<PlaceOrderResponse>, APIError> {
	let Json(request) = payload.map_err(bad_body)?;

	match crate::apis::order::place_order(request, &state.engine).await {
		Ok(response) => Ok(Json(response)),
		Err(e) => {
			tracing::warn!("Order placement failed: {}", e);
			Err(e)
		},
	}
}

/// Handles POST /api/update-status requests.
async fn handle_update_status(
	State(state): State<AppState>,
	payload: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> Result<Json<UpdateStatusResponse>, APIError> {
	let Json(request) = payload.map_err(bad_body)?;

	match crate::apis::order::update_status(request, &state.engine).await {
		Ok(response) => Ok(Json(response)),
		Err(e) => {
			tracing::warn!("Status update failed: {}", e);
			Err(e)
		},
	}
}

/// Handles GET /api/orders/{id} requests.
async fn handle_get_order_by_id(
	Path(id): Path<String>,
	State(state): State<AppState>,
) -> Result<Json<Order>, APIError> {
	crate::apis::order::get_order_by_id(&id, &state.engine)
		.await
		.map(Json)
}

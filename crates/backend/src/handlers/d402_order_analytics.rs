use axum::extract::{Query, State};
use axum::Json;
use contracts::dashboards::d402_order_analytics::{
    DateBounds, OrderAnalyticsRequest, OrderAnalyticsResponse,
};

use crate::dashboards::d402_order_analytics::{repository, service};
use crate::system::state::AppState;

/// GET /api/d402/date_bounds
pub async fn get_date_bounds(State(state): State<AppState>) -> Json<DateBounds> {
    Json(repository::get_date_bounds(&state.dataset))
}

/// GET /api/d402/order_analytics?date_from=YYYY-MM-DD&date_to=YYYY-MM-DD
///
/// Aggregation over the in-memory dataset cannot fail; malformed dates are
/// rejected with 400 by the `Query` extractor.
pub async fn get_order_analytics(
    State(state): State<AppState>,
    Query(req): Query<OrderAnalyticsRequest>,
) -> Json<OrderAnalyticsResponse> {
    let response = service::get_order_analytics(&state.dataset, &req, &state.presentation);
    Json(response)
}

use axum::{
    extract::{Query, State},
    Json,
};
use validator::Validate;

use crate::error::AppResult;
use crate::handlers::decode_rows;
use crate::models::biometrics::BiometricsEntry;
use crate::models::daily_log::HistoryQuery;
use crate::models::schema::Table;
use crate::AppState;

pub async fn list_biometrics(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<Vec<BiometricsEntry>>> {
    query.validate()?;

    let rows = state.store.select(Table::Biometrics, &query).await?;
    Ok(Json(decode_rows(rows)?))
}

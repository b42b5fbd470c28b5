use axum::{
    extract::{Query, State},
    Json,
};
use validator::Validate;

use crate::error::AppResult;
use crate::handlers::decode_rows;
use crate::models::daily_log::{DailyLogEntry, HistoryQuery};
use crate::models::schema::Table;
use crate::AppState;

pub async fn list_daily_logs(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<Vec<DailyLogEntry>>> {
    query.validate()?;

    let rows = state.store.select(Table::DailyLogs, &query).await?;
    let logs = decode_rows(rows)?;

    Ok(Json(logs))
}

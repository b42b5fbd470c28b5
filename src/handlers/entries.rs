use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;

use crate::dto::{FormQuery, FormResponse, SaveEntryRequest};
use crate::error::{AppError, AppResult};
use crate::models::schema::fields_for;
use crate::models::source::SourceSet;
use crate::services::assembler::assemble;
use crate::services::gateway::SaveReceipt;
use crate::AppState;

pub async fn form_fields(Query(query): Query<FormQuery>) -> AppResult<Json<FormResponse>> {
    let sources = query.source_set().map_err(AppError::Validation)?;
    let fields = fields_for(&sources);
    Ok(Json(FormResponse { sources, fields }))
}

pub async fn save_entry(
    State(state): State<AppState>,
    Json(body): Json<SaveEntryRequest>,
) -> AppResult<Json<SaveReceipt>> {
    let date = body.date.unwrap_or_else(|| Utc::now().date_naive());
    let sources = body.sources.unwrap_or_else(SourceSet::form_default);

    let assembled = assemble(date, &sources, &body.values, state.config.inclusion_policy())?;
    let receipt = state
        .gateway
        .save(&assembled.daily_log, &assembled.biometrics)
        .await?;

    Ok(Json(receipt))
}

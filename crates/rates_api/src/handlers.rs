use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use models::{AnnualEvolution, EvolutionReport};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, state::SharedState, Result};

/// Largest number of decimals a formatted amount can carry.
const MAX_DECIMAL_PLACES: u32 = 28;

#[derive(Debug, Deserialize)]
pub struct CurrencyQuery {
    pub value: String,
    pub decimals: Option<String>,
    #[serde(default)]
    pub taxes: bool,
}

#[derive(Debug, Serialize)]
pub struct CurrencyResponse {
    #[serde(rename = "valor")]
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct DateTimeResponse {
    #[serde(rename = "fecha")]
    pub date: String,
}

fn parse_decimal_places(raw: Option<&str>) -> Result<Option<u32>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    match raw.trim().parse::<u32>() {
        Ok(places) if places <= MAX_DECIMAL_PLACES => Ok(Some(places)),
        _ => Err(ApiError::InvalidDecimalPlaces(raw.to_string())),
    }
}

/// GET /api/currency?value=1.234,56&decimals=2&taxes=true
/// Formats a single quote; unparseable text comes back as "?"
pub async fn format_currency(
    State(state): State<SharedState>,
    Query(query): Query<CurrencyQuery>,
) -> Result<impl IntoResponse> {
    let decimals = parse_decimal_places(query.decimals.as_deref())?;

    let value = if query.taxes {
        state.formatter.format_with_taxes(&query.value, decimals)
    } else {
        state.formatter.format(&query.value, decimals)
    };

    Ok(Json(CurrencyResponse { value }))
}

/// POST /api/evolution
/// Builds the month-by-month report from a raw annual evolution payload
pub async fn get_evolution(
    State(state): State<SharedState>,
    Json(raw): Json<AnnualEvolution>,
) -> Json<EvolutionReport> {
    if raw.is_empty() {
        tracing::warn!("Received an empty evolution payload");
    }
    tracing::debug!("Building evolution report for {} months", raw.len());
    Json(formatting::evolution(&raw, &state.formatter))
}

/// POST /api/evolution/taxes
/// Same as /api/evolution with the configured tax applied to every month
pub async fn get_evolution_with_taxes(
    State(state): State<SharedState>,
    Json(raw): Json<AnnualEvolution>,
) -> Json<EvolutionReport> {
    tracing::debug!(
        "Building taxed evolution report for {} months ({}% tax)",
        raw.len(),
        state.formatter.tax_percent()
    );
    Json(formatting::evolution_with_taxes(&raw, &state.formatter))
}

/// GET /api/datetime
/// Current Buenos Aires date and time
pub async fn get_date_time() -> impl IntoResponse {
    Json(DateTimeResponse {
        date: formatting::get_date_time(),
    })
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "rates-api"
    }))
}

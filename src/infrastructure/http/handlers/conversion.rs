//! Currency Conversion HTTP Handlers

use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use std::sync::Arc;

use crate::application::CalculateConversion;
use crate::domain::conversion::{CurrencyConversion, ExchangeClientKind};
use crate::infrastructure::http::dto::ConversionPath;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::ConversionState;

/// 通用客户端换算
///
/// GET /currency-conversion/from/:from/to/:to/quantity/:quantity
pub async fn calculate_currency_conversion(
    State(state): State<Arc<ConversionState>>,
    path: Result<Path<ConversionPath>, PathRejection>,
) -> Result<Json<CurrencyConversion>, ApiError> {
    convert(&state, path, ExchangeClientKind::Generic).await
}

/// 声明式客户端换算
///
/// GET /currency-conversion-feign/from/:from/to/:to/quantity/:quantity
pub async fn calculate_currency_conversion_feign(
    State(state): State<Arc<ConversionState>>,
    path: Result<Path<ConversionPath>, PathRejection>,
) -> Result<Json<CurrencyConversion>, ApiError> {
    convert(&state, path, ExchangeClientKind::Declarative).await
}

async fn convert(
    state: &ConversionState,
    path: Result<Path<ConversionPath>, PathRejection>,
    client: ExchangeClientKind,
) -> Result<Json<CurrencyConversion>, ApiError> {
    // 参数绑定失败时不会调用上游
    let Path(params) = path.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let conversion = state
        .conversion_handler
        .handle(CalculateConversion {
            from: params.from,
            to: params.to,
            quantity: params.quantity,
            client,
        })
        .await?;

    Ok(Json(conversion))
}

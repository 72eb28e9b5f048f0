//! Conversion Command Handlers

use std::collections::HashMap;
use std::sync::Arc;

use crate::application::commands::CalculateConversion;
use crate::application::error::ApplicationError;
use crate::application::ports::{
    exchange_value_uri_template, CurrencyExchangeProxyPort, RestClientPort,
};
use crate::domain::conversion::{CurrencyConversion, ExchangeClientKind, ExchangeQuote};

/// CalculateConversion Handler - 计算货币换算
///
/// 两种客户端形态共享同一个出站调用，只影响 `environment` 后缀
pub struct CalculateConversionHandler {
    rest_client: Arc<dyn RestClientPort>,
    exchange_proxy: Arc<dyn CurrencyExchangeProxyPort>,
    exchange_service: String,
}

impl CalculateConversionHandler {
    pub fn new(
        rest_client: Arc<dyn RestClientPort>,
        exchange_proxy: Arc<dyn CurrencyExchangeProxyPort>,
        exchange_service: impl Into<String>,
    ) -> Self {
        Self {
            rest_client,
            exchange_proxy,
            exchange_service: exchange_service.into(),
        }
    }

    pub async fn handle(
        &self,
        cmd: CalculateConversion,
    ) -> Result<CurrencyConversion, ApplicationError> {
        let quote = match cmd.client {
            ExchangeClientKind::Generic => self.fetch_with_rest_client(&cmd.from, &cmd.to).await?,
            ExchangeClientKind::Declarative => {
                self.exchange_proxy
                    .retrieve_exchange_value(&cmd.from, &cmd.to)
                    .await?
            }
        };

        let conversion =
            CurrencyConversion::calculate(cmd.from, cmd.to, cmd.quantity, &quote, cmd.client);

        tracing::info!(
            from = %conversion.from(),
            to = %conversion.to(),
            quantity = %conversion.quantity(),
            conversion_multiple = %conversion.conversion_multiple(),
            total = %conversion.total_calculated_amount(),
            client = ?cmd.client,
            "Currency conversion calculated"
        );

        Ok(conversion)
    }

    async fn fetch_with_rest_client(
        &self,
        from: &str,
        to: &str,
    ) -> Result<ExchangeQuote, ApplicationError> {
        let uri_variables = HashMap::from([
            ("from".to_string(), from.to_string()),
            ("to".to_string(), to.to_string()),
        ]);

        let entity = self
            .rest_client
            .get(&exchange_value_uri_template(&self.exchange_service), &uri_variables)
            .await?
            .into_json::<ExchangeQuote>()?;

        tracing::debug!(status = %entity.status, "Exchange value retrieved via rest client");

        Ok(entity.into_body()?)
    }
}

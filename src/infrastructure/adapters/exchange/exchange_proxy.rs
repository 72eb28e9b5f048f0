//! Currency Exchange Proxy - 声明式汇率客户端
//!
//! 实现 CurrencyExchangeProxyPort，URI 模板和服务名在这里固定，
//! 线上调用委托给与通用客户端相同的 RestClientPort

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::application::ports::{
    exchange_value_uri_template, CurrencyExchangeProxyPort, ExchangeClientError, RestClientPort,
};
use crate::domain::conversion::ExchangeQuote;

/// 汇率服务默认逻辑名
pub const CURRENCY_EXCHANGE_SERVICE: &str = "currency-exchange";

pub struct HttpCurrencyExchangeProxy {
    rest_client: Arc<dyn RestClientPort>,
    uri_template: String,
}

impl HttpCurrencyExchangeProxy {
    pub fn new(rest_client: Arc<dyn RestClientPort>, service_name: &str) -> Self {
        Self {
            rest_client,
            uri_template: exchange_value_uri_template(service_name),
        }
    }
}

#[async_trait]
impl CurrencyExchangeProxyPort for HttpCurrencyExchangeProxy {
    async fn retrieve_exchange_value(
        &self,
        from: &str,
        to: &str,
    ) -> Result<ExchangeQuote, ExchangeClientError> {
        let uri_variables = HashMap::from([
            ("from".to_string(), from.to_string()),
            ("to".to_string(), to.to_string()),
        ]);

        self.rest_client
            .get(&self.uri_template, &uri_variables)
            .await?
            .into_json::<ExchangeQuote>()?
            .into_body()
    }
}

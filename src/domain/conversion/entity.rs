//! Conversion Context - Entities

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// 换算结果的固定 ID
pub const CONVERSION_ID: i64 = 10001;

/// 调用汇率服务所用的客户端形态
///
/// 两种形态走同一个线上调用，只影响 `environment` 的后缀
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeClientKind {
    /// 通用 HTTP 客户端（URI 模板 + 变量）
    Generic,
    /// 声明式客户端（只传 from/to）
    Declarative,
}

impl ExchangeClientKind {
    /// 追加到上游 environment 之后的标记
    pub fn environment_suffix(&self) -> &'static str {
        match self {
            Self::Generic => "rest template",
            Self::Declarative => "feign",
        }
    }
}

/// 汇率服务返回的报价
///
/// 与 CurrencyConversion 同形，但只有 `conversionMultiple` 和 `environment` 是必需字段
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeQuote {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(with = "super::json_decimal")]
    pub conversion_multiple: BigDecimal,
    pub environment: String,
}

/// 货币换算结果
///
/// 不变量:
/// - `total_calculated_amount == quantity * conversion_multiple`（任意精度十进制，不舍入）
/// - 构造后不可修改，生命周期为一次请求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyConversion {
    id: i64,
    from: String,
    to: String,
    #[serde(with = "super::json_decimal")]
    quantity: BigDecimal,
    #[serde(with = "super::json_decimal")]
    conversion_multiple: BigDecimal,
    #[serde(with = "super::json_decimal")]
    total_calculated_amount: BigDecimal,
    environment: String,
}

impl CurrencyConversion {
    /// 根据上游报价计算换算结果
    pub fn calculate(
        from: impl Into<String>,
        to: impl Into<String>,
        quantity: BigDecimal,
        quote: &ExchangeQuote,
        client: ExchangeClientKind,
    ) -> Self {
        let total_calculated_amount = &quantity * &quote.conversion_multiple;

        Self {
            id: CONVERSION_ID,
            from: from.into(),
            to: to.into(),
            quantity,
            conversion_multiple: quote.conversion_multiple.clone(),
            total_calculated_amount,
            environment: format!("{} {}", quote.environment, client.environment_suffix()),
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn quantity(&self) -> &BigDecimal {
        &self.quantity
    }

    pub fn conversion_multiple(&self) -> &BigDecimal {
        &self.conversion_multiple
    }

    pub fn total_calculated_amount(&self) -> &BigDecimal {
        &self.total_calculated_amount
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }
}

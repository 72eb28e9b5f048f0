//! Data Transfer Objects

use bigdecimal::BigDecimal;
use serde::{Deserialize, Deserializer};
use std::str::FromStr;

/// 换算接口的路径参数
///
/// `/from/{from}/to/{to}/quantity/{quantity}`
#[derive(Debug, Clone, Deserialize)]
pub struct ConversionPath {
    pub from: String,
    pub to: String,
    #[serde(deserialize_with = "deserialize_quantity")]
    pub quantity: BigDecimal,
}

/// 数量按任意精度十进制解析，支持普通与科学计数法写法
fn deserialize_quantity<'de, D>(deserializer: D) -> Result<BigDecimal, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    BigDecimal::from_str(&raw)
        .map_err(|_| serde::de::Error::custom(format!("invalid decimal quantity: {}", raw)))
}

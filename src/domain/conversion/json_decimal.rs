//! BigDecimal <-> JSON number
//!
//! 以 JSON 数字（而非字符串）读写十进制值，保留全部有效位，
//! 依赖 serde_json 的 `arbitrary_precision`

use bigdecimal::BigDecimal;
use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Number;
use std::str::FromStr;

pub fn serialize<S>(value: &BigDecimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let number = Number::from_str(&value.to_string()).map_err(S::Error::custom)?;
    number.serialize(serializer)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<BigDecimal, D::Error>
where
    D: Deserializer<'de>,
{
    let number = Number::deserialize(deserializer)?;
    BigDecimal::from_str(&number.to_string()).map_err(D::Error::custom)
}

//! Conversion Commands

use bigdecimal::BigDecimal;

use crate::domain::conversion::ExchangeClientKind;

/// 计算货币换算
#[derive(Debug, Clone)]
pub struct CalculateConversion {
    pub from: String,
    pub to: String,
    pub quantity: BigDecimal,
    /// 取汇率所用的客户端形态
    pub client: ExchangeClientKind,
}

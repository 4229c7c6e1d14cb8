//! 供應模型

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 採購訂單行（預計收貨）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseOrderLine {
    /// 物料ID
    pub component_id: String,

    /// 訂購數量
    pub quantity: Decimal,

    /// 預計到貨日期
    pub arrival_date: NaiveDate,

    /// 來源單據（如採購單號）
    pub source_ref: Option<String>,
}

impl PurchaseOrderLine {
    /// 創建新的採購訂單行
    pub fn new(component_id: impl Into<String>, quantity: Decimal, arrival_date: NaiveDate) -> Self {
        Self {
            component_id: component_id.into(),
            quantity,
            arrival_date,
            source_ref: None,
        }
    }

    /// 建構器模式：設置來源單據
    pub fn with_source_ref(mut self, source_ref: impl Into<String>) -> Self {
        self.source_ref = Some(source_ref.into());
        self
    }
}

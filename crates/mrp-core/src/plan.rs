//! 淨需求計劃結果模型

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 淨需求結果（只為淨需求 > 0 的期間產生）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetRequirementResult {
    /// 物料ID
    pub component_id: String,

    /// 需求期間
    pub period_date: NaiveDate,

    /// 下單日期（需求期間 - 採購提前期）
    pub release_date: NaiveDate,

    /// 總需求
    pub gross_requirement: Decimal,

    /// 期初庫存
    pub opening_inventory: Decimal,

    /// 安全庫存
    pub safety_stock: Decimal,

    /// 採購到貨
    pub scheduled_receipt: Decimal,

    /// 淨需求（已套用批量規則）
    pub net_requirement: Decimal,

    /// 期末庫存
    pub closing_inventory: Decimal,

    /// 生產提前期（天）
    pub production_lead_time_days: u32,

    /// 採購提前期（天）
    pub purchase_lead_time_days: u32,
}

impl NetRequirementResult {
    /// 期間庫存平衡：期初 + 到貨 + 淨需求 - 總需求 = 期末
    pub fn is_balanced(&self) -> bool {
        self.opening_inventory
            .checked_add(self.scheduled_receipt)
            .and_then(|q| q.checked_add(self.net_requirement))
            .and_then(|q| q.checked_sub(self.gross_requirement))
            == Some(self.closing_inventory)
    }
}

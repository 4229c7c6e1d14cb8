//! 批量規則實現

use mrp_core::{LotSizeRule, Result};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// 批量規則計算器
pub struct LotSizingCalculator;

impl LotSizingCalculator {
    /// 套用最小批量與批量倍數
    ///
    /// `lot_size(5, 20, 10) = 20`，`lot_size(25, 20, 10) = 30`，原始需求 <= 0 時為 0。
    pub fn lot_size(raw_need: Decimal, min_lot: Decimal, lot_multiple: Decimal) -> Result<Decimal> {
        LotSizeRule::new(String::new(), min_lot, lot_multiple).adjust_order_quantity(raw_need)
    }
}

/// 批量規則查詢表（未設定的物料為批對批）
#[derive(Debug, Clone, Default)]
pub struct LotSizingTable {
    rules: HashMap<String, LotSizeRule>,
}

impl LotSizingTable {
    /// 從批量規則建立查詢表（重複物料以最後一筆為準）
    pub fn from_rules(rules: &[LotSizeRule]) -> Self {
        let rules = rules
            .iter()
            .map(|rule| (rule.component_id.clone(), rule.clone()))
            .collect();
        Self { rules }
    }

    /// 物料的批量規則
    pub fn rule_for(&self, component_id: &str) -> LotSizeRule {
        self.rules
            .get(component_id)
            .cloned()
            .unwrap_or_else(|| LotSizeRule::lot_for_lot(component_id))
    }
}

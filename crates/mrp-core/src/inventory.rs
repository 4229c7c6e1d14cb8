//! 庫存模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 庫存快照（每個物料一筆）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventorySnapshot {
    /// 物料ID
    pub component_id: String,

    /// 現有庫存
    pub on_hand_qty: Decimal,

    /// 安全庫存
    pub safety_stock: Decimal,
}

impl InventorySnapshot {
    /// 創建新的庫存快照
    pub fn new(component_id: impl Into<String>, on_hand_qty: Decimal, safety_stock: Decimal) -> Self {
        Self {
            component_id: component_id.into(),
            on_hand_qty,
            safety_stock,
        }
    }

    /// 檢查庫存是否低於安全庫存
    pub fn is_below_safety_stock(&self) -> bool {
        self.on_hand_qty < self.safety_stock
    }
}

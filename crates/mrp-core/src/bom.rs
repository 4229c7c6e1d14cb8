//! BOM 結構模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// BOM 組成關係（父項 → 子項）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BomEdge {
    /// 父項物料
    pub parent_id: String,

    /// 子項物料
    pub child_id: String,

    /// 每單位父項所需子項用量
    pub quantity_per: Decimal,
}

impl BomEdge {
    /// 創建新的 BOM 關係
    pub fn new(parent_id: impl Into<String>, child_id: impl Into<String>, quantity_per: Decimal) -> Self {
        Self {
            parent_id: parent_id.into(),
            child_id: child_id.into(),
            quantity_per,
        }
    }
}

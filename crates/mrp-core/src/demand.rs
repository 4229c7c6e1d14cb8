//! 需求模型

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 生產計劃行（獨立需求，展開的起點）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionPlanLine {
    /// 計劃行ID
    pub id: Uuid,

    /// 產品物料
    pub product_id: String,

    /// 需求數量
    pub quantity: Decimal,

    /// 交期
    pub due_date: NaiveDate,
}

impl ProductionPlanLine {
    /// 創建新的計劃行
    pub fn new(product_id: impl Into<String>, quantity: Decimal, due_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            product_id: product_id.into(),
            quantity,
            due_date,
        }
    }

    /// 建構器模式：指定計劃行ID（從外部系統載入時使用）
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }
}

/// 毛需求（BOM 展開結果）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrossRequirement {
    /// 物料ID
    pub component_id: String,

    /// 需求日期（已扣除生產提前期）
    pub required_date: NaiveDate,

    /// 需求數量
    pub quantity: Decimal,

    /// 展開層級（根 = 0）
    pub level: u32,

    /// 來源計劃行
    pub plan_line_id: Uuid,

    /// 追溯路徑（根產品 → 本物料）
    pub path: Vec<String>,
}

impl GrossRequirement {
    /// 直接父項（根需求沒有父項）
    pub fn parent_id(&self) -> Option<&str> {
        let len = self.path.len();
        if len < 2 {
            return None;
        }
        Some(self.path[len - 2].as_str())
    }
}

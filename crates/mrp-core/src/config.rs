//! MRP 配置模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{MrpError, Result};

/// 物料提前期（天）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadTime {
    /// 物料ID
    pub component_id: String,

    /// 生產提前期：子件須在此日數之前備妥
    pub production_days: u32,

    /// 採購提前期：用於推算下單日期
    pub purchase_days: u32,
}

impl LeadTime {
    /// 創建新的提前期記錄
    pub fn new(component_id: impl Into<String>, production_days: u32, purchase_days: u32) -> Self {
        Self {
            component_id: component_id.into(),
            production_days,
            purchase_days,
        }
    }
}

/// 批量規則（最小批量 + 批量倍數）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotSizeRule {
    /// 物料ID
    pub component_id: String,

    /// 最小批量
    pub min_lot: Decimal,

    /// 批量倍數（必須 >= 1）
    pub lot_multiple: Decimal,
}

impl LotSizeRule {
    /// 創建新的批量規則
    pub fn new(component_id: impl Into<String>, min_lot: Decimal, lot_multiple: Decimal) -> Self {
        Self {
            component_id: component_id.into(),
            min_lot,
            lot_multiple,
        }
    }

    /// 批對批（無批量約束）
    pub fn lot_for_lot(component_id: impl Into<String>) -> Self {
        Self::new(component_id, Decimal::ZERO, Decimal::ONE)
    }

    /// 調整訂購量以符合批量規則
    ///
    /// 原始需求 <= 0 時返回 0；否則先補足最小批量，
    /// 再向上取整到批量倍數（已是倍數則不變）。取整超出數值範圍時返回 `QuantityOverflow`。
    pub fn adjust_order_quantity(&self, raw_need: Decimal) -> Result<Decimal> {
        if raw_need <= Decimal::ZERO {
            return Ok(Decimal::ZERO);
        }

        let mut quantity = raw_need.max(self.min_lot);

        if self.lot_multiple > Decimal::ONE {
            let remainder = quantity
                .checked_rem(self.lot_multiple)
                .ok_or_else(|| MrpError::overflow(&self.component_id, "批量取餘"))?;
            if remainder > Decimal::ZERO {
                quantity = (quantity - remainder)
                    .checked_add(self.lot_multiple)
                    .ok_or_else(|| MrpError::overflow(&self.component_id, "批量向上取整"))?;
            }
        }

        Ok(quantity)
    }
}

/// 產能檢查模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CapacityMode {
    /// 僅報告超出產能的資源/日期（預設）
    #[default]
    Report,
    /// 遇到第一個超出產能即中止計算
    Strict,
}

/// 計劃執行配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanningConfig {
    /// 產能檢查模式
    pub capacity_mode: CapacityMode,

    /// 工作執行緒數量（None = 依可用核心數）
    pub worker_threads: Option<usize>,

    /// 是否執行資料一致性檢查
    pub check_consistency: bool,
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            capacity_mode: CapacityMode::Report,
            worker_threads: None,
            check_consistency: true,
        }
    }
}

impl PlanningConfig {
    /// 從 JSON 字串載入配置（缺少的欄位使用預設值）
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| MrpError::Config(e.to_string()))?;

        if config.worker_threads == Some(0) {
            return Err(MrpError::Config("worker_threads 必須大於 0".to_string()));
        }

        Ok(config)
    }

    /// 建構器模式：設置產能檢查模式
    pub fn with_capacity_mode(mut self, mode: CapacityMode) -> Self {
        self.capacity_mode = mode;
        self
    }

    /// 建構器模式：設置工作執行緒數量
    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = Some(threads.max(1));
        self
    }

    /// 建構器模式：設置是否執行一致性檢查
    pub fn with_consistency_check(mut self, enabled: bool) -> Self {
        self.check_consistency = enabled;
        self
    }

    /// 是否為嚴格產能模式
    pub fn is_strict_capacity(&self) -> bool {
        self.capacity_mode == CapacityMode::Strict
    }
}

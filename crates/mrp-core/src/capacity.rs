//! 產能模型

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 資源可用產能（某資源於某日）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapacityRecord {
    /// 資源ID（工作中心、產線）
    pub resource_id: String,

    /// 日期
    pub date: NaiveDate,

    /// 可用產能
    pub available: Decimal,
}

impl CapacityRecord {
    /// 創建新的產能記錄
    pub fn new(resource_id: impl Into<String>, date: NaiveDate, available: Decimal) -> Self {
        Self {
            resource_id: resource_id.into(),
            date,
            available,
        }
    }
}

/// 物料對資源的單位耗用
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceRequirement {
    /// 物料ID
    pub component_id: String,

    /// 資源ID
    pub resource_id: String,

    /// 每單位物料耗用的資源量
    pub usage_per_unit: Decimal,
}

impl ResourceRequirement {
    /// 創建新的資源耗用記錄
    pub fn new(
        component_id: impl Into<String>,
        resource_id: impl Into<String>,
        usage_per_unit: Decimal,
    ) -> Self {
        Self {
            component_id: component_id.into(),
            resource_id: resource_id.into(),
            usage_per_unit,
        }
    }
}

/// 產能檢查結果（某資源於某日）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityCheckResult {
    /// 資源ID
    pub resource_id: String,

    /// 日期
    pub date: NaiveDate,

    /// 資源使用量
    pub consumption: Decimal,

    /// 可用產能（None 表示無限制）
    pub capacity: Option<Decimal>,

    /// 是否超出產能
    pub is_violated: bool,

    /// 超出量
    pub overage: Decimal,
}

impl CapacityCheckResult {
    /// 依使用量與可用產能建立檢查結果
    pub fn evaluate(
        resource_id: impl Into<String>,
        date: NaiveDate,
        consumption: Decimal,
        capacity: Option<Decimal>,
    ) -> Self {
        let overage = capacity
            .map(|cap| consumption.saturating_sub(cap).max(Decimal::ZERO))
            .unwrap_or(Decimal::ZERO);

        Self {
            resource_id: resource_id.into(),
            date,
            consumption,
            capacity,
            is_violated: overage > Decimal::ZERO,
            overage,
        }
    }
}

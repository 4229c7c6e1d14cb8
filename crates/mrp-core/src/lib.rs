//! # MRP Core
//!
//! 核心資料模型與類型定義

pub mod bom;
pub mod capacity;
pub mod config;
pub mod demand;
pub mod input;
pub mod inventory;
pub mod plan;
pub mod supply;

use chrono::NaiveDate;
use rust_decimal::Decimal;

// Re-export 主要類型
pub use bom::BomEdge;
pub use capacity::{CapacityCheckResult, CapacityRecord, ResourceRequirement};
pub use config::{CapacityMode, LeadTime, LotSizeRule, PlanningConfig};
pub use demand::{GrossRequirement, ProductionPlanLine};
pub use input::PlanningInput;
pub use inventory::InventorySnapshot;
pub use plan::NetRequirementResult;
pub use supply::PurchaseOrderLine;

/// MRP 錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum MrpError {
    /// 路徑包含根物料到重複物料的完整祖先序列
    #[error("檢測到 BOM 循環引用: {}", .path.join(" -> "))]
    CircularReference { path: Vec<String> },

    #[error("輸入資料不符約定 [{entity}]: {message}")]
    ContractViolation { entity: String, message: String },

    #[error("資源 {resource} 於 {date} 超出產能：使用量 {consumption}，可用產能 {capacity}")]
    CapacityViolation {
        resource: String,
        date: NaiveDate,
        consumption: Decimal,
        capacity: Decimal,
    },

    #[error("內部不變量被破壞（物料 {material}）: {message}")]
    InvariantBreak { material: String, message: String },

    #[error("物料 {material} 數量溢出: {context}")]
    QuantityOverflow { material: String, context: String },

    #[error("無效的日期: {0}")]
    InvalidDate(String),

    #[error("配置解析錯誤: {0}")]
    Config(String),

    #[error("工作執行緒池建立失敗: {0}")]
    WorkerPool(String),
}

impl MrpError {
    /// 創建輸入約定錯誤
    pub fn contract(entity: &str, message: impl Into<String>) -> Self {
        Self::ContractViolation {
            entity: entity.to_string(),
            message: message.into(),
        }
    }

    /// 創建不變量錯誤
    pub fn invariant(material: &str, message: impl Into<String>) -> Self {
        Self::InvariantBreak {
            material: material.to_string(),
            message: message.into(),
        }
    }

    /// 創建數量溢出錯誤
    pub fn overflow(material: &str, context: impl Into<String>) -> Self {
        Self::QuantityOverflow {
            material: material.to_string(),
            context: context.into(),
        }
    }

    /// 循環本身（從第一次出現的重複物料開始）
    ///
    /// 非循環錯誤時返回 `None`。
    pub fn cycle(&self) -> Option<&[String]> {
        match self {
            Self::CircularReference { path } => {
                let repeated = path.last()?;
                let start = path.iter().position(|code| code == repeated)?;
                Some(&path[start..])
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, MrpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_message_carries_full_path() {
        let err = MrpError::CircularReference {
            path: vec!["P1".into(), "A".into(), "B".into(), "A".into()],
        };

        assert_eq!(err.to_string(), "檢測到 BOM 循環引用: P1 -> A -> B -> A");
        assert_eq!(
            err.cycle().unwrap(),
            &["A".to_string(), "B".to_string(), "A".to_string()]
        );
    }

    #[test]
    fn test_overflow_message_names_material() {
        let err = MrpError::overflow("M001", "用量相乘");
        assert_eq!(err.to_string(), "物料 M001 數量溢出: 用量相乘");
    }

    #[test]
    fn test_cycle_on_other_errors() {
        let err = MrpError::InvalidDate("overflow".into());
        assert!(err.cycle().is_none());
    }
}

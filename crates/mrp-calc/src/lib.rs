//! # MRP Calculation Engine
//!
//! 核心 MRP 計算引擎：BOM 展開、毛需求彙總、淨需求計算

pub mod aggregation;
pub mod bom_graph;
pub mod bucketing;
pub mod calculator;
pub mod classification;
pub mod consistency;
pub mod explosion;
pub mod lead_time;
pub mod lot_sizing;
pub mod netting;

use serde::Serialize;

// Re-export 主要類型
pub use aggregation::{AggregationCalculator, MaterialBuckets};
pub use bom_graph::{BomGraph, BomNode, BomTree};
pub use calculator::MrpCalculator;
pub use classification::{BomStructureSummary, MaterialClass, MaterialClassifier};
pub use netting::{MaterialPolicy, NettingCalculator, PeriodProjection};

/// MRP 計算結果
#[derive(Debug, Clone, Serialize)]
pub struct MrpResult {
    /// 毛需求（展開順序）
    pub gross_requirements: Vec<mrp_core::GrossRequirement>,

    /// 淨需求（按物料編碼排序，物料內按日期排序）
    pub net_requirements: Vec<mrp_core::NetRequirementResult>,

    /// 警告信息
    pub warnings: Vec<MrpWarning>,

    /// 計算耗時（毫秒），不參與序列化
    #[serde(skip)]
    pub calculation_time_ms: Option<u128>,
}

impl MrpResult {
    /// 創建空的計算結果
    pub fn empty() -> Self {
        Self {
            gross_requirements: Vec::new(),
            net_requirements: Vec::new(),
            warnings: Vec::new(),
            calculation_time_ms: None,
        }
    }

    /// 添加警告
    pub fn add_warning(&mut self, warning: MrpWarning) {
        self.warnings.push(warning);
    }

    /// 某物料的淨需求
    pub fn net_requirements_for<'a>(
        &'a self,
        component_id: &'a str,
    ) -> impl Iterator<Item = &'a mrp_core::NetRequirementResult> + 'a {
        self.net_requirements
            .iter()
            .filter(move |r| r.component_id == component_id)
    }
}

/// MRP 警告
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MrpWarning {
    pub component_id: String,
    pub message: String,
    pub severity: WarningSeverity,
}

impl MrpWarning {
    pub fn new(component_id: String, message: String, severity: WarningSeverity) -> Self {
        Self {
            component_id,
            message,
            severity,
        }
    }

    pub fn info(component_id: String, message: String) -> Self {
        Self::new(component_id, message, WarningSeverity::Info)
    }

    pub fn warning(component_id: String, message: String) -> Self {
        Self::new(component_id, message, WarningSeverity::Warning)
    }

    pub fn error(component_id: String, message: String) -> Self {
        Self::new(component_id, message, WarningSeverity::Error)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum WarningSeverity {
    Info,
    Warning,
    Error,
}

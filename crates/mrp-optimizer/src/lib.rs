//! # MRP Optimizer
//!
//! 產能可行性檢查：以資源耗用率核對淨需求是否超出可用產能

pub mod capacity;

use mrp_core::CapacityCheckResult;
use serde::Serialize;

// Re-export 主要類型
pub use capacity::CapacityChecker;

/// 產能檢查報告
#[derive(Debug, Clone, Default, Serialize)]
pub struct CapacityReport {
    /// 每個（資源, 日期）的檢查結果，按資源、日期排序
    pub checks: Vec<CapacityCheckResult>,

    /// 檢查信息
    pub messages: Vec<String>,
}

impl CapacityReport {
    /// 由檢查結果建立報告
    pub fn new(checks: Vec<CapacityCheckResult>) -> Self {
        let messages = checks
            .iter()
            .filter(|c| c.is_violated)
            .map(|c| {
                format!(
                    "資源 {} 於 {} 超出產能 {}",
                    c.resource_id, c.date, c.overage
                )
            })
            .collect();

        Self { checks, messages }
    }

    /// 是否所有資源都在產能內
    pub fn is_feasible(&self) -> bool {
        self.checks.iter().all(|c| !c.is_violated)
    }

    /// 超出產能的檢查結果
    pub fn violations(&self) -> impl Iterator<Item = &CapacityCheckResult> {
        self.checks.iter().filter(|c| c.is_violated)
    }
}

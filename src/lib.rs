//! # MRP Planner
//!
//! 物料需求計劃：BOM 展開、時段淨需求計算、產能可行性檢查
//!
//! ## 流程
//!
//! BOM 圖建立 → 需求展開 → 彙總 → 淨需求計算 → 產能檢查，
//! 物料分類與 BOM 結構分析獨立於同一組 BOM 資料。
//!
//! ```no_run
//! use mrp_planner::{PlanningEngine, PlanningConfig, PlanningInput};
//!
//! # fn demo(input: PlanningInput) -> mrp_planner::Result<()> {
//! let outcome = PlanningEngine::new(PlanningConfig::default()).run(&input)?;
//! for row in &outcome.net_requirements {
//!     println!("{} {} {}", row.component_id, row.period_date, row.net_requirement);
//! }
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;

use mrp_calc::{BomGraph, MrpCalculator, MrpWarning};
use mrp_core::{CapacityCheckResult, GrossRequirement, NetRequirementResult};
use mrp_optimizer::CapacityChecker;
use serde::Serialize;

pub use mrp_calc::{BomStructureSummary, MaterialClass, MaterialClassifier};
pub use mrp_core::{
    BomEdge, CapacityMode, CapacityRecord, InventorySnapshot, LeadTime, LotSizeRule,
    MrpError, PlanningConfig, PlanningInput, ProductionPlanLine, PurchaseOrderLine,
    ResourceRequirement, Result,
};
pub use mrp_optimizer::CapacityReport;
pub use {mrp_calc, mrp_core, mrp_optimizer};

/// 一次完整計劃運算的輸出
#[derive(Debug, Clone, Serialize)]
pub struct PlanningOutcome {
    /// 毛需求（展開順序）
    pub gross_requirements: Vec<GrossRequirement>,

    /// 淨需求（按物料編碼排序，物料內按日期排序）
    pub net_requirements: Vec<NetRequirementResult>,

    /// 產能檢查（按資源、日期排序）
    pub capacity_checks: Vec<CapacityCheckResult>,

    /// 庫存物料分類
    pub classifications: BTreeMap<String, MaterialClass>,

    /// BOM 結構摘要（圖中有循環時為 None）
    pub bom_summary: Option<BomStructureSummary>,

    /// 警告信息
    pub warnings: Vec<MrpWarning>,

    /// 計算耗時（毫秒），不參與序列化
    #[serde(skip)]
    pub calculation_time_ms: Option<u128>,
}

impl PlanningOutcome {
    /// 超出產能的檢查結果
    pub fn capacity_violations(&self) -> impl Iterator<Item = &CapacityCheckResult> {
        self.capacity_checks.iter().filter(|c| c.is_violated)
    }
}

/// 計劃引擎
///
/// 全有或全無：任何致命錯誤都會中止整次運算，不返回部分結果。
pub struct PlanningEngine {
    config: PlanningConfig,
}

impl PlanningEngine {
    pub fn new(config: PlanningConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlanningConfig {
        &self.config
    }

    /// 執行完整計劃運算
    pub fn run(&self, input: &PlanningInput) -> Result<PlanningOutcome> {
        let start_time = std::time::Instant::now();

        let graph = BomGraph::from_edges(&input.bom_edges);
        let mrp = MrpCalculator::new(self.config.clone()).calculate_with_graph(input, &graph)?;

        let checker = CapacityChecker::new(&input.resource_requirements, &input.capacities);
        let capacity = checker.check_with_mode(&mrp.net_requirements, self.config.capacity_mode)?;

        let classifications = MaterialClassifier::classify(
            &graph,
            input.inventories.iter().map(|inv| inv.component_id.as_str()),
        );
        let bom_summary = BomStructureSummary::analyze(&graph);

        tracing::info!(
            "計劃完成：淨需求 {} 筆，產能檢查 {} 筆（超出 {} 筆），耗時 {:?}",
            mrp.net_requirements.len(),
            capacity.checks.len(),
            capacity.violations().count(),
            start_time.elapsed()
        );

        Ok(PlanningOutcome {
            gross_requirements: mrp.gross_requirements,
            net_requirements: mrp.net_requirements,
            capacity_checks: capacity.checks,
            classifications,
            bom_summary,
            warnings: mrp.warnings,
            calculation_time_ms: Some(start_time.elapsed().as_millis()),
        })
    }
}

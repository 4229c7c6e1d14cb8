//! MRP 主計算器

use mrp_core::{
    GrossRequirement, InventorySnapshot, MrpError, NetRequirementResult, PlanningConfig,
    PlanningInput, Result,
};
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::aggregation::{AggregationCalculator, MaterialBuckets};
use crate::bom_graph::{BomGraph, BomTree};
use crate::consistency::ConsistencyChecker;
use crate::explosion::ExplosionCalculator;
use crate::lead_time::LeadTimeTable;
use crate::lot_sizing::LotSizingTable;
use crate::netting::{MaterialPolicy, NettingCalculator};
use crate::MrpResult;

/// MRP 計算器
pub struct MrpCalculator {
    config: PlanningConfig,
}

impl MrpCalculator {
    /// 創建新的 MRP 計算器
    pub fn new(config: PlanningConfig) -> Self {
        Self { config }
    }

    /// 主 MRP 計算入口
    ///
    /// 任何致命錯誤（循環引用、不變量破壞、日期溢出）都會中止整次計算。
    pub fn calculate(&self, input: &PlanningInput) -> Result<MrpResult> {
        let graph = BomGraph::from_edges(&input.bom_edges);
        self.calculate_with_graph(input, &graph)
    }

    /// 使用呼叫端已建立的 BOM 圖計算（圖必須由 `input.bom_edges` 建立）
    pub fn calculate_with_graph(&self, input: &PlanningInput, graph: &BomGraph) -> Result<MrpResult> {
        tracing::info!(
            "開始 MRP 計算：計劃 {} 筆，BOM {} 筆，庫存 {} 筆，採購訂單 {} 筆",
            input.production_plan.len(),
            input.bom_edges.len(),
            input.inventories.len(),
            input.purchase_orders.len()
        );

        let start_time = std::time::Instant::now();

        input.validate()?;

        let pool = build_worker_pool(self.config.worker_threads)?;
        let mut result = pool.install(|| self.run(input, graph))?;

        result.calculation_time_ms = Some(start_time.elapsed().as_millis());

        tracing::info!("MRP 計算完成，耗時 {:?}", start_time.elapsed());
        tracing::info!("淨需求數量: {}", result.net_requirements.len());

        Ok(result)
    }

    fn run(&self, input: &PlanningInput, graph: &BomGraph) -> Result<MrpResult> {
        let mut result = MrpResult::empty();

        // Step 1: 資料一致性檢查
        tracing::debug!("Step 1: 資料一致性檢查（BOM 邊 {} 條）", graph.edge_count());
        if self.config.check_consistency {
            for warning in ConsistencyChecker::check(input, graph) {
                tracing::warn!("{}: {}", warning.component_id, warning.message);
                result.add_warning(warning);
            }
        }

        // Step 2: 為每個產品建立結構樹（含循環檢查）
        tracing::debug!("Step 2: 建立產品結構樹");
        let trees = self.build_trees(input, graph)?;
        tracing::debug!("產品數量: {}", trees.len());

        // Step 3: 展開毛需求
        tracing::debug!("Step 3: 展開毛需求");
        let lead_times = LeadTimeTable::from_records(&input.lead_times);
        result.gross_requirements = self.explode_plan(input, &trees, &lead_times)?;
        tracing::debug!("毛需求數量: {}", result.gross_requirements.len());

        // Step 4: 按（物料, 日期）彙總
        tracing::debug!("Step 4: 彙總毛需求與採購到貨");
        let demand = AggregationCalculator::aggregate_requirements(&result.gross_requirements)?;
        let receipts = AggregationCalculator::aggregate_receipts(&input.purchase_orders)?;
        tracing::debug!("物料數量: {}", demand.material_count());

        // Step 5: 逐物料計算淨需求
        tracing::debug!("Step 5: 逐物料計算淨需求");
        result.net_requirements = self.net_all(input, &lead_times, &demand, &receipts)?;

        Ok(result)
    }

    /// 為計劃中出現的每個產品建立一次結構樹
    fn build_trees(&self, input: &PlanningInput, graph: &BomGraph) -> Result<BTreeMap<String, BomTree>> {
        let products: Vec<&str> = input
            .production_plan
            .iter()
            .map(|line| line.product_id.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        // 依產品編碼順序取第一個錯誤，錯誤訊息與執行緒排程無關
        let built: Vec<Result<(String, BomTree)>> = products
            .par_iter()
            .map(|product| Ok((product.to_string(), graph.build_tree(product)?)))
            .collect();

        built.into_iter().collect()
    }

    /// 展開所有計劃行，輸出保持計劃行順序
    fn explode_plan(
        &self,
        input: &PlanningInput,
        trees: &BTreeMap<String, BomTree>,
        lead_times: &LeadTimeTable,
    ) -> Result<Vec<GrossRequirement>> {
        let exploded: Vec<Result<Vec<GrossRequirement>>> = input
            .production_plan
            .par_iter()
            .map(|line| {
                let tree = trees.get(&line.product_id).ok_or_else(|| {
                    MrpError::invariant(&line.product_id, "找不到產品結構樹")
                })?;
                ExplosionCalculator::explode(line, tree, lead_times)
            })
            .collect();

        let mut requirements = Vec::new();
        for batch in exploded {
            requirements.extend(batch?);
        }
        Ok(requirements)
    }

    /// 平行計算每個有毛需求的物料；每個物料內部逐期順序計算
    fn net_all(
        &self,
        input: &PlanningInput,
        lead_times: &LeadTimeTable,
        demand: &MaterialBuckets,
        receipts: &MaterialBuckets,
    ) -> Result<Vec<NetRequirementResult>> {
        let inventory_map = create_inventory_map(&input.inventories);
        let lot_sizes = LotSizingTable::from_rules(&input.lot_sizes);

        let materials: Vec<&String> = demand.materials().collect();
        let netted: Vec<Result<Vec<NetRequirementResult>>> = materials
            .par_iter()
            .map(|component_id| {
                tracing::debug!("計算物料 MRP: {}", component_id);

                let policy = material_policy(component_id, &inventory_map, &lot_sizes, lead_times);
                NettingCalculator::calculate(
                    component_id,
                    &policy,
                    demand.get(component_id),
                    receipts.get(component_id),
                )
            })
            .collect();

        let mut results = Vec::new();
        for rows in netted {
            results.extend(rows?);
        }

        // 穩定排序：輸出順序與完成順序無關
        results.sort_by(|a, b| a.component_id.cmp(&b.component_id));
        Ok(results)
    }

    pub fn config(&self) -> &PlanningConfig {
        &self.config
    }
}

/// 創建庫存映射（重複物料以最後一筆為準）
fn create_inventory_map(inventories: &[InventorySnapshot]) -> HashMap<&str, &InventorySnapshot> {
    inventories
        .iter()
        .map(|inv| (inv.component_id.as_str(), inv))
        .collect()
}

fn material_policy(
    component_id: &str,
    inventory_map: &HashMap<&str, &InventorySnapshot>,
    lot_sizes: &LotSizingTable,
    lead_times: &LeadTimeTable,
) -> MaterialPolicy {
    let mut policy = MaterialPolicy::new(component_id)
        .with_lot_rule(lot_sizes.rule_for(component_id))
        .with_lead_times(
            lead_times.production_days(component_id),
            lead_times.purchase_days(component_id),
        );

    if let Some(inv) = inventory_map.get(component_id) {
        policy = policy.with_inventory(inv.on_hand_qty, inv.safety_stock);
    }
    policy
}

/// 建立有上限的工作執行緒池（預設依可用核心數）
fn build_worker_pool(worker_threads: Option<usize>) -> Result<rayon::ThreadPool> {
    let threads = worker_threads.unwrap_or_else(|| {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    });

    rayon::ThreadPoolBuilder::new()
        .num_threads(threads.max(1))
        .thread_name(|idx| format!("mrp-worker-{idx}"))
        .build()
        .map_err(|e| MrpError::WorkerPool(e.to_string()))
}

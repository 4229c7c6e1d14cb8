//! 資料一致性檢查

use mrp_core::PlanningInput;
use std::collections::BTreeSet;

use crate::bom_graph::BomGraph;
use crate::MrpWarning;

/// 資料一致性檢查器
///
/// 只產生警告，不中止計算。
pub struct ConsistencyChecker;

impl ConsistencyChecker {
    pub fn check(input: &PlanningInput, graph: &BomGraph) -> Vec<MrpWarning> {
        let mut warnings = Vec::new();

        let products: BTreeSet<&str> = input
            .production_plan
            .iter()
            .map(|line| line.product_id.as_str())
            .collect();

        for product in &products {
            if !graph.parents().contains(*product) {
                warnings.push(MrpWarning::warning(
                    product.to_string(),
                    "生產計劃中的產品未在 BOM 中定義為父項".to_string(),
                ));
            }
        }

        let stocked: BTreeSet<&str> = input
            .inventories
            .iter()
            .map(|inv| inv.component_id.as_str())
            .collect();

        let referenced: BTreeSet<&str> = products.union(&graph.materials()).copied().collect();
        for id in referenced.difference(&stocked) {
            warnings.push(MrpWarning::warning(
                id.to_string(),
                "物料缺少庫存記錄，以庫存 0、安全庫存 0 計算".to_string(),
            ));
        }

        for inv in &input.inventories {
            if inv.is_below_safety_stock() {
                warnings.push(MrpWarning::info(
                    inv.component_id.clone(),
                    format!(
                        "現有庫存 {} 已低於安全庫存 {}",
                        inv.on_hand_qty, inv.safety_stock
                    ),
                ));
            }
        }

        if let Some(cycle) = graph.find_cycle() {
            let anchor = cycle.first().cloned().unwrap_or_default();
            warnings.push(MrpWarning::error(
                anchor,
                format!("BOM 中存在循環引用: {}", cycle.join(" -> ")),
            ));
        }

        warnings
    }
}

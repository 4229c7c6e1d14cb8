//! 需求展開（毛需求計算）

use chrono::NaiveDate;
use mrp_core::{GrossRequirement, MrpError, ProductionPlanLine, Result};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::bom_graph::{BomNode, BomTree};
use crate::lead_time::{LeadTimeCalculator, LeadTimeTable};

/// 需求展開計算器
pub struct ExplosionCalculator;

impl ExplosionCalculator {
    /// 展開單一計劃行
    ///
    /// 每個節點：需求日期 = 繼承日期 - 本物料生產提前期，數量 = 父項數量 × 用量。
    /// 子項以父項調整後的日期為基準，層級 = 父項層級 + 1。
    /// 輸出為前序（父項先於子項）。
    pub fn explode(
        line: &ProductionPlanLine,
        tree: &BomTree,
        lead_times: &LeadTimeTable,
    ) -> Result<Vec<GrossRequirement>> {
        if tree.root_id() != line.product_id {
            return Err(MrpError::invariant(
                &line.product_id,
                format!("計劃行產品與結構樹根物料 {} 不一致", tree.root_id()),
            ));
        }

        let mut requirements = Vec::with_capacity(tree.node_count());
        let mut path = Vec::new();
        Self::explode_node(
            &tree.root,
            line.quantity,
            line.due_date,
            line.id,
            lead_times,
            &mut path,
            &mut requirements,
        )?;

        tracing::debug!(
            "展開計劃行 {} ({}): 深度 {}，產生毛需求 {} 筆",
            line.id,
            line.product_id,
            tree.depth(),
            requirements.len()
        );

        Ok(requirements)
    }

    fn explode_node(
        node: &BomNode,
        quantity: Decimal,
        inherited_date: NaiveDate,
        plan_line_id: Uuid,
        lead_times: &LeadTimeTable,
        path: &mut Vec<String>,
        out: &mut Vec<GrossRequirement>,
    ) -> Result<()> {
        let production_days = lead_times.production_days(&node.component_id);
        let adjusted_date = LeadTimeCalculator::calculate_order_date(inherited_date, production_days)?;

        path.push(node.component_id.clone());
        out.push(GrossRequirement {
            component_id: node.component_id.clone(),
            required_date: adjusted_date,
            quantity,
            level: node.level,
            plan_line_id,
            path: path.clone(),
        });

        for child in &node.children {
            let child_quantity = quantity
                .checked_mul(child.quantity_per)
                .ok_or_else(|| {
                    MrpError::overflow(
                        &child.component_id,
                        format!("{quantity} × 用量 {}", child.quantity_per),
                    )
                })?;
            Self::explode_node(
                child,
                child_quantity,
                adjusted_date,
                plan_line_id,
                lead_times,
                path,
                out,
            )?;
        }
        path.pop();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bom_graph::BomGraph;
    use mrp_core::{BomEdge, LeadTime};

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, day).unwrap()
    }

    fn bike_graph() -> BomGraph {
        BomGraph::from_edges(&[
            BomEdge::new("BIKE", "FRAME", Decimal::ONE),
            BomEdge::new("BIKE", "WHEEL", Decimal::from(2)),
            BomEdge::new("FRAME", "STEEL-TUBE", Decimal::from(3)),
        ])
    }

    #[test]
    fn test_quantities_multiply_along_path() {
        let tree = bike_graph().build_tree("BIKE").unwrap();
        let line = ProductionPlanLine::new("BIKE", Decimal::from(10), date(20));

        let reqs = ExplosionCalculator::explode(&line, &tree, &LeadTimeTable::default()).unwrap();

        let ids: Vec<_> = reqs.iter().map(|r| r.component_id.as_str()).collect();
        assert_eq!(ids, ["BIKE", "FRAME", "STEEL-TUBE", "WHEEL"]);

        assert_eq!(reqs[0].quantity, Decimal::from(10));
        assert_eq!(reqs[1].quantity, Decimal::from(10));
        assert_eq!(reqs[2].quantity, Decimal::from(30));
        assert_eq!(reqs[3].quantity, Decimal::from(20));

        assert_eq!(reqs[0].level, 0);
        assert_eq!(reqs[2].level, 2);
        assert!(reqs.iter().all(|r| r.plan_line_id == line.id));
        assert_eq!(reqs[2].path, ["BIKE", "FRAME", "STEEL-TUBE"]);
    }

    #[test]
    fn test_dates_offset_by_cumulative_production_lead_time() {
        let tree = bike_graph().build_tree("BIKE").unwrap();
        let line = ProductionPlanLine::new("BIKE", Decimal::from(10), date(20));
        let lead_times = LeadTimeTable::from_records(&[
            LeadTime::new("BIKE", 7, 0),
            LeadTime::new("FRAME", 5, 0),
            LeadTime::new("STEEL-TUBE", 2, 9),
            LeadTime::new("WHEEL", 3, 0),
        ]);

        let reqs = ExplosionCalculator::explode(&line, &tree, &lead_times).unwrap();

        // BIKE: 20 - 7 = 13
        assert_eq!(reqs[0].required_date, date(13));
        // FRAME: 13 - 5 = 8
        assert_eq!(reqs[1].required_date, date(8));
        // STEEL-TUBE: 8 - 2 = 6（採購提前期不影響展開）
        assert_eq!(reqs[2].required_date, date(6));
        // WHEEL: 13 - 3 = 10
        assert_eq!(reqs[3].required_date, date(10));
    }

    #[test]
    fn test_diamond_emits_one_record_per_path() {
        let graph = BomGraph::from_edges(&[
            BomEdge::new("A", "B", Decimal::from(2)),
            BomEdge::new("A", "C", Decimal::from(3)),
            BomEdge::new("B", "D", Decimal::from(5)),
            BomEdge::new("C", "D", Decimal::from(7)),
        ]);
        let tree = graph.build_tree("A").unwrap();
        let line = ProductionPlanLine::new("A", Decimal::ONE, date(10));

        let reqs = ExplosionCalculator::explode(&line, &tree, &LeadTimeTable::default()).unwrap();
        let d_quantities: Vec<_> = reqs
            .iter()
            .filter(|r| r.component_id == "D")
            .map(|r| r.quantity)
            .collect();

        assert_eq!(d_quantities, [Decimal::from(10), Decimal::from(21)]);
    }

    #[test]
    fn test_quantity_overflow_is_an_error() {
        // 1e15 × 1e8 × 1e8 超出 Decimal 範圍
        let graph = BomGraph::from_edges(&[
            BomEdge::new("P", "A", Decimal::from(100_000_000)),
            BomEdge::new("A", "B", Decimal::from(100_000_000)),
        ]);
        let tree = graph.build_tree("P").unwrap();
        let line = ProductionPlanLine::new("P", Decimal::from(1_000_000_000_000_000i64), date(10));

        let err = ExplosionCalculator::explode(&line, &tree, &LeadTimeTable::default()).unwrap_err();
        assert!(matches!(err, MrpError::QuantityOverflow { ref material, .. } if material == "B"));
    }

    #[test]
    fn test_mismatched_tree_is_invariant_break() {
        let tree = bike_graph().build_tree("FRAME").unwrap();
        let line = ProductionPlanLine::new("BIKE", Decimal::ONE, date(10));

        let err = ExplosionCalculator::explode(&line, &tree, &LeadTimeTable::default()).unwrap_err();
        assert!(matches!(err, MrpError::InvariantBreak { .. }));
    }
}

//! 物料分類與 BOM 結構分析

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::bom_graph::BomGraph;

/// 物料類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MaterialClass {
    /// 原材料：只作為子項
    Raw,
    /// 中間件：既是父項又是子項
    Intermediate,
    /// 成品：只作為父項
    Finished,
    /// 未出現在 BOM 中
    Unknown,
}

/// 物料分類器
pub struct MaterialClassifier;

impl MaterialClassifier {
    /// 依 BOM 拓撲為庫存中的物料分類
    pub fn classify<'a>(
        graph: &BomGraph,
        inventory_ids: impl IntoIterator<Item = &'a str>,
    ) -> BTreeMap<String, MaterialClass> {
        inventory_ids
            .into_iter()
            .map(|id| (id.to_string(), Self::class_of(graph, id)))
            .collect()
    }

    /// 單一物料的類型
    pub fn class_of(graph: &BomGraph, component_id: &str) -> MaterialClass {
        let is_parent = graph.parents().contains(component_id);
        let is_child = graph.children().contains(component_id);

        match (is_parent, is_child) {
            (false, true) => MaterialClass::Raw,
            (true, false) => MaterialClass::Finished,
            (true, true) => MaterialClass::Intermediate,
            (false, false) => MaterialClass::Unknown,
        }
    }
}

/// BOM 結構摘要
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BomStructureSummary {
    pub raw_count: usize,
    pub intermediate_count: usize,
    pub finished_count: usize,
    pub total_count: usize,
    /// 最大層級（成品 = 0）
    pub max_level: u32,
    /// 層級 → 物料數
    pub level_distribution: BTreeMap<u32, usize>,
}

impl BomStructureSummary {
    /// 分析 BOM 結構
    ///
    /// 物料層級 = 距離任一成品的最長路徑。圖中有循環時層級無意義，返回 `None`。
    pub fn analyze(graph: &BomGraph) -> Option<Self> {
        let levels = Self::levels(graph)?;

        let mut summary = Self {
            raw_count: 0,
            intermediate_count: 0,
            finished_count: 0,
            total_count: levels.len(),
            max_level: levels.values().copied().max().unwrap_or(0),
            level_distribution: BTreeMap::new(),
        };

        for (id, level) in &levels {
            match MaterialClassifier::class_of(graph, id) {
                MaterialClass::Raw => summary.raw_count += 1,
                MaterialClass::Intermediate => summary.intermediate_count += 1,
                MaterialClass::Finished => summary.finished_count += 1,
                MaterialClass::Unknown => {}
            }
            *summary.level_distribution.entry(*level).or_insert(0) += 1;
        }

        Some(summary)
    }

    /// 拓撲排序（Kahn）計算最長路徑層級
    fn levels(graph: &BomGraph) -> Option<BTreeMap<String, u32>> {
        let materials = graph.materials();

        let mut in_degree: BTreeMap<&str, usize> = materials.iter().map(|m| (*m, 0)).collect();
        for parent in graph.parents() {
            for child in graph.children_of(parent) {
                *in_degree.entry(child.component_id.as_str()).or_insert(0) += 1;
            }
        }

        let mut levels: BTreeMap<String, u32> = BTreeMap::new();
        let mut queue: VecDeque<&str> = in_degree
            .iter()
            .filter(|(_, degree)| **degree == 0)
            .map(|(id, _)| *id)
            .collect();
        for id in &queue {
            levels.insert(id.to_string(), 0);
        }

        let mut visited: BTreeSet<&str> = BTreeSet::new();
        while let Some(id) = queue.pop_front() {
            visited.insert(id);
            let level = levels.get(id).copied().unwrap_or(0);

            for child in graph.children_of(id) {
                let child_id = child.component_id.as_str();
                let entry = levels.entry(child_id.to_string()).or_insert(0);
                *entry = (*entry).max(level + 1);

                if let Some(degree) = in_degree.get_mut(child_id) {
                    *degree -= 1;
                    if *degree == 0 {
                        queue.push_back(child_id);
                    }
                }
            }
        }

        // 有循環的物料永遠不會入隊
        if visited.len() != materials.len() {
            return None;
        }
        Some(levels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mrp_core::BomEdge;
    use rust_decimal::Decimal;

    fn edge(parent: &str, child: &str) -> BomEdge {
        BomEdge::new(parent, child, Decimal::ONE)
    }

    #[test]
    fn test_classify_chain() {
        let graph = BomGraph::from_edges(&[edge("A", "B"), edge("B", "C")]);

        let classes = MaterialClassifier::classify(&graph, ["A", "B", "C", "Z"]);

        assert_eq!(classes["A"], MaterialClass::Finished);
        assert_eq!(classes["B"], MaterialClass::Intermediate);
        assert_eq!(classes["C"], MaterialClass::Raw);
        assert_eq!(classes["Z"], MaterialClass::Unknown);
    }

    #[test]
    fn test_only_inventory_materials_are_labelled() {
        let graph = BomGraph::from_edges(&[edge("A", "B")]);
        let classes = MaterialClassifier::classify(&graph, ["B"]);

        assert_eq!(classes.len(), 1);
        assert_eq!(classes["B"], MaterialClass::Raw);
    }

    #[test]
    fn test_structure_summary() {
        // 樣本資料：P001/P002 → C001..C003 → M001..M003
        let graph = BomGraph::from_edges(&[
            edge("P001", "C001"),
            edge("P001", "C002"),
            edge("P002", "C001"),
            edge("P002", "C003"),
            edge("C001", "M001"),
            edge("C001", "M002"),
            edge("C002", "M003"),
        ]);

        let summary = BomStructureSummary::analyze(&graph).unwrap();

        assert_eq!(summary.finished_count, 2);
        assert_eq!(summary.intermediate_count, 2);
        assert_eq!(summary.raw_count, 4);
        assert_eq!(summary.total_count, 8);
        assert_eq!(summary.max_level, 2);
        assert_eq!(summary.level_distribution[&0], 2);
        assert_eq!(summary.level_distribution[&1], 3);
        assert_eq!(summary.level_distribution[&2], 3);
    }

    #[test]
    fn test_level_is_longest_path() {
        // A → B → C 與 A → C：C 的層級為 2
        let graph = BomGraph::from_edges(&[edge("A", "B"), edge("B", "C"), edge("A", "C")]);
        let summary = BomStructureSummary::analyze(&graph).unwrap();

        assert_eq!(summary.max_level, 2);
        assert_eq!(summary.level_distribution.get(&1), Some(&1));
    }

    #[test]
    fn test_cyclic_graph_has_no_summary() {
        let graph = BomGraph::from_edges(&[edge("A", "B"), edge("B", "A")]);
        assert!(BomStructureSummary::analyze(&graph).is_none());
    }
}

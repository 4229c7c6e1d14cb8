//! BOM 圖與產品結構樹

use mrp_core::{BomEdge, MrpError, Result};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

/// 子項連結
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BomChild {
    pub component_id: String,
    pub quantity_per: Decimal,
}

/// BOM 圖（父項 → 子項鄰接表）
///
/// 子項保持輸入順序，展開結果因此可重現。
#[derive(Debug, Clone, Default)]
pub struct BomGraph {
    adjacency: HashMap<String, Vec<BomChild>>,
    parents: BTreeSet<String>,
    children: BTreeSet<String>,
    edge_count: usize,
}

impl BomGraph {
    /// 創建空的 BOM 圖
    pub fn new() -> Self {
        Self::default()
    }

    /// 從 BOM 關係建立圖
    pub fn from_edges(edges: &[BomEdge]) -> Self {
        let mut graph = Self::new();
        for edge in edges {
            graph.add_edge(edge);
        }
        graph
    }

    /// 添加一條 BOM 關係
    pub fn add_edge(&mut self, edge: &BomEdge) {
        self.adjacency
            .entry(edge.parent_id.clone())
            .or_default()
            .push(BomChild {
                component_id: edge.child_id.clone(),
                quantity_per: edge.quantity_per,
            });
        self.parents.insert(edge.parent_id.clone());
        self.children.insert(edge.child_id.clone());
        self.edge_count += 1;
    }

    /// 物料的直接子項
    pub fn children_of(&self, component_id: &str) -> &[BomChild] {
        self.adjacency
            .get(component_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// 曾作為父項出現的物料
    pub fn parents(&self) -> &BTreeSet<String> {
        &self.parents
    }

    /// 曾作為子項出現的物料
    pub fn children(&self) -> &BTreeSet<String> {
        &self.children
    }

    /// 圖中所有物料
    pub fn materials(&self) -> BTreeSet<&str> {
        self.parents
            .iter()
            .chain(self.children.iter())
            .map(String::as_str)
            .collect()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// 從根物料建立產品結構樹
    ///
    /// 深度優先展開，沿途攜帶祖先路徑；物料在自身路徑上重複出現時
    /// 返回 `CircularReference`（路徑 = 祖先序列 + 重複物料）。
    /// 菱形結構不合併，每條路徑各自展開。
    pub fn build_tree(&self, root_id: &str) -> Result<BomTree> {
        let mut ancestors = Vec::new();
        let root = self.build_node(root_id, Decimal::ONE, 0, &mut ancestors)?;
        Ok(BomTree { root })
    }

    fn build_node(
        &self,
        component_id: &str,
        quantity_per: Decimal,
        level: u32,
        ancestors: &mut Vec<String>,
    ) -> Result<BomNode> {
        if ancestors.iter().any(|a| a == component_id) {
            let mut path = ancestors.clone();
            path.push(component_id.to_string());
            return Err(MrpError::CircularReference { path });
        }

        ancestors.push(component_id.to_string());
        let children = self
            .children_of(component_id)
            .iter()
            .map(|child| {
                self.build_node(&child.component_id, child.quantity_per, level + 1, ancestors)
            })
            .collect::<Result<Vec<_>>>();
        ancestors.pop();

        Ok(BomNode {
            component_id: component_id.to_string(),
            quantity_per,
            level,
            children: children?,
        })
    }

    /// 掃描整張圖（不限於計劃中的根產品）尋找循環
    ///
    /// 返回循環片段，例如 `[A, B, A]`。
    pub fn find_cycle(&self) -> Option<Vec<String>> {
        let mut finished: BTreeSet<&str> = BTreeSet::new();
        let mut stack: Vec<&str> = Vec::new();

        for parent in &self.parents {
            if let Some(cycle) = self.visit(parent, &mut stack, &mut finished) {
                return Some(cycle);
            }
        }
        None
    }

    fn visit<'a>(
        &'a self,
        component_id: &'a str,
        stack: &mut Vec<&'a str>,
        finished: &mut BTreeSet<&'a str>,
    ) -> Option<Vec<String>> {
        if finished.contains(component_id) {
            return None;
        }
        if let Some(start) = stack.iter().position(|c| *c == component_id) {
            let mut cycle: Vec<String> = stack[start..].iter().map(|c| c.to_string()).collect();
            cycle.push(component_id.to_string());
            return Some(cycle);
        }

        stack.push(component_id);
        for child in self.children_of(component_id) {
            if let Some(cycle) = self.visit(&child.component_id, stack, finished) {
                return Some(cycle);
            }
        }
        stack.pop();
        finished.insert(component_id);
        None
    }
}

/// 產品結構樹節點
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BomNode {
    pub component_id: String,
    /// 每單位父項用量（根節點為 1）
    pub quantity_per: Decimal,
    pub level: u32,
    pub children: Vec<BomNode>,
}

impl BomNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// 單一產品的結構樹
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BomTree {
    pub root: BomNode,
}

impl BomTree {
    pub fn root_id(&self) -> &str {
        &self.root.component_id
    }

    /// 節點總數（菱形結構的每條路徑分別計算）
    pub fn node_count(&self) -> usize {
        fn count(node: &BomNode) -> usize {
            1 + node.children.iter().map(count).sum::<usize>()
        }
        count(&self.root)
    }

    /// 最深層級
    pub fn depth(&self) -> u32 {
        fn deepest(node: &BomNode) -> u32 {
            if node.is_leaf() {
                return node.level;
            }
            node.children.iter().map(deepest).max().unwrap_or(node.level)
        }
        deepest(&self.root)
    }
}

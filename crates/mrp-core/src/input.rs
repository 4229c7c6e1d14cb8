//! 計劃輸入資料集

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    BomEdge, CapacityRecord, InventorySnapshot, LeadTime, LotSizeRule, MrpError,
    ProductionPlanLine, PurchaseOrderLine, ResourceRequirement, Result,
};

/// 單次計劃執行的全部輸入表
///
/// 由上游匯入/驗證層提供，核心只做防禦性檢查。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanningInput {
    pub production_plan: Vec<ProductionPlanLine>,
    pub bom_edges: Vec<BomEdge>,
    pub inventories: Vec<InventorySnapshot>,
    pub purchase_orders: Vec<PurchaseOrderLine>,
    pub lead_times: Vec<LeadTime>,
    pub lot_sizes: Vec<LotSizeRule>,
    pub capacities: Vec<CapacityRecord>,
    pub resource_requirements: Vec<ResourceRequirement>,
}

impl PlanningInput {
    /// 創建只含計劃與 BOM 的輸入
    pub fn new(production_plan: Vec<ProductionPlanLine>, bom_edges: Vec<BomEdge>) -> Self {
        Self {
            production_plan,
            bom_edges,
            ..Self::default()
        }
    }

    /// 建構器模式：設置庫存
    pub fn with_inventories(mut self, inventories: Vec<InventorySnapshot>) -> Self {
        self.inventories = inventories;
        self
    }

    /// 建構器模式：設置採購訂單
    pub fn with_purchase_orders(mut self, purchase_orders: Vec<PurchaseOrderLine>) -> Self {
        self.purchase_orders = purchase_orders;
        self
    }

    /// 建構器模式：設置提前期
    pub fn with_lead_times(mut self, lead_times: Vec<LeadTime>) -> Self {
        self.lead_times = lead_times;
        self
    }

    /// 建構器模式：設置批量規則
    pub fn with_lot_sizes(mut self, lot_sizes: Vec<LotSizeRule>) -> Self {
        self.lot_sizes = lot_sizes;
        self
    }

    /// 建構器模式：設置產能
    pub fn with_capacities(mut self, capacities: Vec<CapacityRecord>) -> Self {
        self.capacities = capacities;
        self
    }

    /// 建構器模式：設置資源耗用
    pub fn with_resource_requirements(mut self, requirements: Vec<ResourceRequirement>) -> Self {
        self.resource_requirements = requirements;
        self
    }

    /// 防禦性檢查輸入約定
    ///
    /// 上游已完成型別轉換與格式驗證，這裡只確認數值範圍與物料編碼，
    /// 發現第一個違規即返回 `ContractViolation`。
    pub fn validate(&self) -> Result<()> {
        for line in &self.production_plan {
            require_code("production_plan", &line.product_id)?;
            require_positive("production_plan", &line.product_id, "需求數量", line.quantity)?;
        }

        for edge in &self.bom_edges {
            require_code("bom_edges", &edge.parent_id)?;
            require_code("bom_edges", &edge.child_id)?;
            require_positive(
                "bom_edges",
                &format!("{} -> {}", edge.parent_id, edge.child_id),
                "用量",
                edge.quantity_per,
            )?;
        }

        for inv in &self.inventories {
            require_code("inventories", &inv.component_id)?;
            require_non_negative("inventories", &inv.component_id, "庫存數量", inv.on_hand_qty)?;
            require_non_negative("inventories", &inv.component_id, "安全庫存", inv.safety_stock)?;
        }

        for po in &self.purchase_orders {
            require_code("purchase_orders", &po.component_id)?;
            require_positive("purchase_orders", &po.component_id, "訂單數量", po.quantity)?;
        }

        for lt in &self.lead_times {
            require_code("lead_times", &lt.component_id)?;
        }

        for rule in &self.lot_sizes {
            require_code("lot_sizes", &rule.component_id)?;
            require_non_negative("lot_sizes", &rule.component_id, "最小批量", rule.min_lot)?;
            if rule.lot_multiple < Decimal::ONE {
                return Err(MrpError::contract(
                    "lot_sizes",
                    format!("{} 的批量倍數必須 >= 1，實際為 {}", rule.component_id, rule.lot_multiple),
                ));
            }
        }

        for cap in &self.capacities {
            require_code("capacities", &cap.resource_id)?;
            require_non_negative(
                "capacities",
                &format!("{}@{}", cap.resource_id, cap.date),
                "可用產能",
                cap.available,
            )?;
        }

        for req in &self.resource_requirements {
            require_code("resource_requirements", &req.component_id)?;
            require_code("resource_requirements", &req.resource_id)?;
            require_non_negative(
                "resource_requirements",
                &format!("{}/{}", req.component_id, req.resource_id),
                "單位用量",
                req.usage_per_unit,
            )?;
        }

        Ok(())
    }
}

fn require_code(entity: &str, code: &str) -> Result<()> {
    if code.trim().is_empty() {
        return Err(MrpError::contract(entity, "物料或資源編碼不可為空"));
    }
    Ok(())
}

fn require_positive(entity: &str, key: &str, field: &str, value: Decimal) -> Result<()> {
    if value <= Decimal::ZERO {
        return Err(MrpError::contract(
            entity,
            format!("{key} 的{field}必須大於 0，實際為 {value}"),
        ));
    }
    Ok(())
}

fn require_non_negative(entity: &str, key: &str, field: &str, value: Decimal) -> Result<()> {
    if value < Decimal::ZERO {
        return Err(MrpError::contract(
            entity,
            format!("{key} 的{field}不能為負數，實際為 {value}"),
        ));
    }
    Ok(())
}

//! 淨需求計算

use chrono::NaiveDate;
use mrp_core::{LotSizeRule, MrpError, NetRequirementResult, Result};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::aggregation::TimePhased;
use crate::bucketing::BucketingCalculator;
use crate::lead_time::LeadTimeCalculator;

/// 單一物料的計劃參數
#[derive(Debug, Clone)]
pub struct MaterialPolicy {
    /// 現有庫存（期初）
    pub on_hand: Decimal,
    /// 安全庫存
    pub safety_stock: Decimal,
    /// 批量規則
    pub lot_rule: LotSizeRule,
    /// 生產提前期（天）
    pub production_lead_days: u32,
    /// 採購提前期（天）
    pub purchase_lead_days: u32,
}

impl MaterialPolicy {
    /// 無庫存、無批量約束、零提前期
    pub fn new(component_id: &str) -> Self {
        Self {
            on_hand: Decimal::ZERO,
            safety_stock: Decimal::ZERO,
            lot_rule: LotSizeRule::lot_for_lot(component_id),
            production_lead_days: 0,
            purchase_lead_days: 0,
        }
    }

    pub fn with_inventory(mut self, on_hand: Decimal, safety_stock: Decimal) -> Self {
        self.on_hand = on_hand;
        self.safety_stock = safety_stock;
        self
    }

    pub fn with_lot_rule(mut self, lot_rule: LotSizeRule) -> Self {
        self.lot_rule = lot_rule;
        self
    }

    pub fn with_lead_times(mut self, production_days: u32, purchase_days: u32) -> Self {
        self.production_lead_days = production_days;
        self.purchase_lead_days = purchase_days;
        self
    }
}

/// 單一期間的庫存推算
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodProjection {
    pub date: NaiveDate,
    pub gross_requirement: Decimal,
    pub scheduled_receipt: Decimal,
    pub opening_inventory: Decimal,
    /// 套用批量規則前的需求
    pub raw_need: Decimal,
    pub net_requirement: Decimal,
    pub closing_inventory: Decimal,
}

/// 淨需求計算器
pub struct NettingCalculator;

impl NettingCalculator {
    /// 推算每個期間的庫存與淨需求
    ///
    /// 期間依日期遞增，逐期順序計算（後一期依賴前一期期末庫存）：
    /// `raw = max(0, 安全庫存 + 需求 - 到貨 - 庫存)`，淨需求 = 批量調整後的 raw。
    /// 每期只補足本期下限，不回頭修改前期結果。
    pub fn project(
        component_id: &str,
        policy: &MaterialPolicy,
        demand: Option<&TimePhased>,
        receipts: Option<&TimePhased>,
    ) -> Result<Vec<PeriodProjection>> {
        let periods = BucketingCalculator::create_time_buckets(demand, receipts);
        let mut projections = Vec::with_capacity(periods.len());
        let mut running_inventory = policy.on_hand;

        for date in periods {
            let gross_req = quantity_on(demand, date);
            let scheduled_receipt = quantity_on(receipts, date);

            let overflow = |context: &str| MrpError::overflow(component_id, format!("{date} {context}"));

            let raw_need = policy
                .safety_stock
                .checked_add(gross_req)
                .and_then(|q| q.checked_sub(scheduled_receipt))
                .and_then(|q| q.checked_sub(running_inventory))
                .ok_or_else(|| overflow("需求計算"))?
                .max(Decimal::ZERO);
            let net_req = policy.lot_rule.adjust_order_quantity(raw_need)?;

            if net_req < Decimal::ZERO {
                return Err(MrpError::invariant(
                    component_id,
                    format!("{date} 淨需求為負數: {net_req}"),
                ));
            }

            let opening_inventory = running_inventory;
            running_inventory = running_inventory
                .checked_add(scheduled_receipt)
                .and_then(|q| q.checked_add(net_req))
                .and_then(|q| q.checked_sub(gross_req))
                .ok_or_else(|| overflow("期末庫存"))?;

            if running_inventory < policy.safety_stock {
                return Err(MrpError::invariant(
                    component_id,
                    format!(
                        "{date} 期末庫存 {running_inventory} 低於安全庫存 {}",
                        policy.safety_stock
                    ),
                ));
            }

            projections.push(PeriodProjection {
                date,
                gross_requirement: gross_req,
                scheduled_receipt,
                opening_inventory,
                raw_need,
                net_requirement: net_req,
                closing_inventory: running_inventory,
            });
        }

        Ok(projections)
    }

    /// 計算淨需求結果（只輸出淨需求 > 0 的期間）
    pub fn calculate(
        component_id: &str,
        policy: &MaterialPolicy,
        demand: Option<&TimePhased>,
        receipts: Option<&TimePhased>,
    ) -> Result<Vec<NetRequirementResult>> {
        let projections = Self::project(component_id, policy, demand, receipts)?;

        let results = projections
            .into_iter()
            .filter(|p| p.net_requirement > Decimal::ZERO)
            .map(|p| {
                let release_date =
                    LeadTimeCalculator::calculate_order_date(p.date, policy.purchase_lead_days)?;
                Ok(NetRequirementResult {
                    component_id: component_id.to_string(),
                    period_date: p.date,
                    release_date,
                    gross_requirement: p.gross_requirement,
                    opening_inventory: p.opening_inventory,
                    safety_stock: policy.safety_stock,
                    scheduled_receipt: p.scheduled_receipt,
                    net_requirement: p.net_requirement,
                    closing_inventory: p.closing_inventory,
                    production_lead_time_days: policy.production_lead_days,
                    purchase_lead_time_days: policy.purchase_lead_days,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!("物料 {} 淨需求: {} 筆", component_id, results.len());

        Ok(results)
    }
}

fn quantity_on(phased: Option<&TimePhased>, date: NaiveDate) -> Decimal {
    phased
        .and_then(|p| p.get(&date))
        .copied()
        .unwrap_or(Decimal::ZERO)
}

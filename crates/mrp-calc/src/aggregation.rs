//! 毛需求與預計收貨彙總

use chrono::NaiveDate;
use mrp_core::{GrossRequirement, MrpError, PurchaseOrderLine, Result};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// 時間分段數量（日期 → 數量）
pub type TimePhased = BTreeMap<NaiveDate, Decimal>;

/// 按（物料, 日期）彙總後的數量
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialBuckets {
    by_material: BTreeMap<String, TimePhased>,
}

impl MaterialBuckets {
    /// 累加某物料某日的數量
    pub fn add(&mut self, component_id: &str, date: NaiveDate, quantity: Decimal) -> Result<()> {
        let total = self
            .by_material
            .entry(component_id.to_string())
            .or_default()
            .entry(date)
            .or_insert(Decimal::ZERO);
        *total = total
            .checked_add(quantity)
            .ok_or_else(|| MrpError::overflow(component_id, format!("{date} 數量彙總")))?;
        Ok(())
    }

    /// 某物料的時間分段數量
    pub fn get(&self, component_id: &str) -> Option<&TimePhased> {
        self.by_material.get(component_id)
    }

    /// 某物料某日的數量（沒有記錄時為 0）
    pub fn quantity(&self, component_id: &str, date: NaiveDate) -> Decimal {
        self.get(component_id)
            .and_then(|dates| dates.get(&date))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// 有數量的物料（按編碼排序）
    pub fn materials(&self) -> impl Iterator<Item = &String> {
        self.by_material.keys()
    }

    pub fn material_count(&self) -> usize {
        self.by_material.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_material.is_empty()
    }
}

/// 彙總計算器
pub struct AggregationCalculator;

impl AggregationCalculator {
    /// 按（物料, 需求日期）加總毛需求
    pub fn aggregate_requirements(requirements: &[GrossRequirement]) -> Result<MaterialBuckets> {
        let mut buckets = MaterialBuckets::default();
        for req in requirements {
            buckets.add(&req.component_id, req.required_date, req.quantity)?;
        }
        Ok(buckets)
    }

    /// 按（物料, 到貨日期）加總採購訂單
    pub fn aggregate_receipts(purchase_orders: &[PurchaseOrderLine]) -> Result<MaterialBuckets> {
        let mut buckets = MaterialBuckets::default();
        for po in purchase_orders {
            buckets.add(&po.component_id, po.arrival_date, po.quantity)?;
        }
        Ok(buckets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    fn gross(id: &str, day: u32, qty: i64) -> GrossRequirement {
        GrossRequirement {
            component_id: id.to_string(),
            required_date: date(day),
            quantity: Decimal::from(qty),
            level: 1,
            plan_line_id: Uuid::nil(),
            path: vec![id.to_string()],
        }
    }

    #[test]
    fn test_sum_by_material_and_date() {
        let buckets = AggregationCalculator::aggregate_requirements(&[
            gross("C001", 10, 200),
            gross("M001", 5, 30),
            gross("C001", 10, 80),
            gross("C001", 1, 15),
        ])
        .unwrap();

        assert_eq!(buckets.material_count(), 2);
        assert_eq!(buckets.quantity("C001", date(10)), Decimal::from(280));
        assert_eq!(buckets.quantity("C001", date(1)), Decimal::from(15));
        assert_eq!(buckets.quantity("C001", date(2)), Decimal::ZERO);
        assert_eq!(buckets.quantity("NOPE", date(1)), Decimal::ZERO);

        assert_eq!(buckets.materials().collect::<Vec<_>>(), ["C001", "M001"]);
    }

    #[test]
    fn test_receipts_on_same_day_are_summed() {
        let buckets = AggregationCalculator::aggregate_receipts(&[
            PurchaseOrderLine::new("M001", Decimal::from(50), date(2)),
            PurchaseOrderLine::new("M001", Decimal::from(25), date(2)),
        ])
        .unwrap();

        assert_eq!(buckets.quantity("M001", date(2)), Decimal::from(75));
        assert_eq!(buckets.materials().collect::<Vec<_>>(), ["M001"]);
    }

    #[test]
    fn test_same_day_sum_overflow_is_an_error() {
        let mut huge = gross("C001", 3, 0);
        huge.quantity = Decimal::MAX;

        let err = AggregationCalculator::aggregate_requirements(&[huge.clone(), huge]).unwrap_err();
        assert!(matches!(err, MrpError::QuantityOverflow { ref material, .. } if material == "C001"));
    }
}

//! 產能可行性檢查

use chrono::NaiveDate;
use mrp_core::{
    CapacityCheckResult, CapacityMode, CapacityRecord, MrpError, NetRequirementResult,
    ResourceRequirement, Result,
};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

use crate::CapacityReport;

/// 產能檢查器
///
/// 只讀取已算好的淨需求，不回寫任何淨需求結果。
pub struct CapacityChecker {
    /// 物料 → 資源 → 單位耗用
    usage: HashMap<String, BTreeMap<String, Decimal>>,
    /// (資源, 日期) → 可用產能
    capacity: HashMap<(String, NaiveDate), Decimal>,
}

impl CapacityChecker {
    /// 建立產能檢查器（重複的耗用或產能記錄以最後一筆為準）
    pub fn new(requirements: &[ResourceRequirement], capacities: &[CapacityRecord]) -> Self {
        let mut usage: HashMap<String, BTreeMap<String, Decimal>> = HashMap::new();
        for req in requirements {
            usage
                .entry(req.component_id.clone())
                .or_default()
                .insert(req.resource_id.clone(), req.usage_per_unit);
        }

        let capacity = capacities
            .iter()
            .map(|rec| ((rec.resource_id.clone(), rec.date), rec.available))
            .collect();

        Self { usage, capacity }
    }

    /// 累計每個（資源, 日期）的使用量，略過使用量為 0 的組合
    pub fn consumption(
        &self,
        net_requirements: &[NetRequirementResult],
    ) -> Result<BTreeMap<(String, NaiveDate), Decimal>> {
        let mut consumption: BTreeMap<(String, NaiveDate), Decimal> = BTreeMap::new();

        for net in net_requirements {
            let Some(rates) = self.usage.get(&net.component_id) else {
                continue;
            };
            for (resource_id, rate) in rates {
                let used = consumption
                    .entry((resource_id.clone(), net.period_date))
                    .or_insert(Decimal::ZERO);
                *used = net
                    .net_requirement
                    .checked_mul(*rate)
                    .and_then(|q| used.checked_add(q))
                    .ok_or_else(|| {
                        MrpError::overflow(
                            &net.component_id,
                            format!("{} 資源 {} 耗用", net.period_date, resource_id),
                        )
                    })?;
            }
        }

        consumption.retain(|_, used| *used != Decimal::ZERO);
        Ok(consumption)
    }

    /// 產能報告：超出產能只記錄，不中止
    pub fn check(&self, net_requirements: &[NetRequirementResult]) -> Result<CapacityReport> {
        let checks: Vec<CapacityCheckResult> = self
            .consumption(net_requirements)?
            .into_iter()
            .map(|((resource_id, date), used)| {
                let available = self.capacity.get(&(resource_id.clone(), date)).copied();
                CapacityCheckResult::evaluate(resource_id, date, used, available)
            })
            .collect();

        let report = CapacityReport::new(checks);
        for message in &report.messages {
            tracing::warn!("{}", message);
        }
        tracing::info!(
            "產能檢查完成：{} 筆，超出 {} 筆",
            report.checks.len(),
            report.messages.len()
        );

        Ok(report)
    }

    /// 依模式檢查產能；嚴格模式遇到第一筆超出（按資源、日期順序）即返回錯誤
    pub fn check_with_mode(
        &self,
        net_requirements: &[NetRequirementResult],
        mode: CapacityMode,
    ) -> Result<CapacityReport> {
        let report = self.check(net_requirements)?;

        if mode == CapacityMode::Strict {
            if let Some(first) = report.violations().next() {
                return Err(MrpError::CapacityViolation {
                    resource: first.resource_id.clone(),
                    date: first.date,
                    consumption: first.consumption,
                    capacity: first.capacity.unwrap_or(Decimal::ZERO),
                });
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, d).unwrap()
    }

    fn net(component_id: &str, period_date: NaiveDate, qty: i64) -> NetRequirementResult {
        let qty = Decimal::from(qty);
        NetRequirementResult {
            component_id: component_id.to_string(),
            period_date,
            release_date: period_date,
            gross_requirement: qty,
            opening_inventory: Decimal::ZERO,
            safety_stock: Decimal::ZERO,
            scheduled_receipt: Decimal::ZERO,
            net_requirement: qty,
            closing_inventory: Decimal::ZERO,
            production_lead_time_days: 0,
            purchase_lead_time_days: 0,
        }
    }

    #[rstest]
    #[case::within_capacity(2, 30, false, 0)]
    #[case::over_capacity(10, 150, true, 50)]
    fn test_single_resource(
        #[case] rate: i64,
        #[case] consumption: i64,
        #[case] violated: bool,
        #[case] overage: i64,
    ) {
        let checker = CapacityChecker::new(
            &[ResourceRequirement::new("M", "R", Decimal::from(rate))],
            &[CapacityRecord::new("R", day(5), Decimal::from(100))],
        );

        let report = checker.check(&[net("M", day(5), 15)]).unwrap();

        assert_eq!(report.checks.len(), 1);
        let check = &report.checks[0];
        assert_eq!(check.consumption, Decimal::from(consumption));
        assert_eq!(check.capacity, Some(Decimal::from(100)));
        assert_eq!(check.is_violated, violated);
        assert_eq!(check.overage, Decimal::from(overage));
        assert_eq!(report.is_feasible(), !violated);
    }

    #[test]
    fn test_shared_resource_accumulates() {
        let checker = CapacityChecker::new(
            &[
                ResourceRequirement::new("C001", "LINE-1", Decimal::from(2)),
                ResourceRequirement::new("C002", "LINE-1", Decimal::from(3)),
            ],
            &[CapacityRecord::new("LINE-1", day(5), Decimal::from(100))],
        );

        let consumption = checker
            .consumption(&[net("C001", day(5), 20), net("C002", day(5), 10)])
            .unwrap();

        assert_eq!(consumption[&("LINE-1".to_string(), day(5))], Decimal::from(70));
    }

    #[test]
    fn test_missing_capacity_is_unlimited() {
        let checker = CapacityChecker::new(
            &[ResourceRequirement::new("M", "R", Decimal::from(1000))],
            &[],
        );

        let report = checker.check(&[net("M", day(5), 15)]).unwrap();

        assert_eq!(report.checks[0].capacity, None);
        assert!(!report.checks[0].is_violated);
        assert_eq!(report.checks[0].overage, Decimal::ZERO);
    }

    #[test]
    fn test_zero_consumption_is_skipped() {
        let checker = CapacityChecker::new(
            &[
                ResourceRequirement::new("M", "R", Decimal::ZERO),
                ResourceRequirement::new("M", "S", Decimal::ONE),
            ],
            &[],
        );

        let report = checker.check(&[net("M", day(5), 15), net("UNUSED", day(5), 15)]).unwrap();

        assert_eq!(report.checks.len(), 1);
        assert_eq!(report.checks[0].resource_id, "S");
    }

    #[test]
    fn test_strict_mode_aborts_on_first_violation() {
        let checker = CapacityChecker::new(
            &[ResourceRequirement::new("M", "R", Decimal::from(10))],
            &[
                CapacityRecord::new("R", day(5), Decimal::from(100)),
                CapacityRecord::new("R", day(6), Decimal::from(100)),
            ],
        );
        let rows = [net("M", day(6), 20), net("M", day(5), 15)];

        let report = checker.check_with_mode(&rows, CapacityMode::Report).unwrap();
        assert_eq!(report.violations().count(), 2);

        let err = checker.check_with_mode(&rows, CapacityMode::Strict).unwrap_err();
        match err {
            MrpError::CapacityViolation { resource, date, consumption, capacity } => {
                assert_eq!(resource, "R");
                assert_eq!(date, day(5));
                assert_eq!(consumption, Decimal::from(150));
                assert_eq!(capacity, Decimal::from(100));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_usage_last_wins() {
        let checker = CapacityChecker::new(
            &[
                ResourceRequirement::new("M", "R", Decimal::from(10)),
                ResourceRequirement::new("M", "R", Decimal::from(2)),
            ],
            &[],
        );

        let consumption = checker.consumption(&[net("M", day(5), 15)]).unwrap();
        assert_eq!(consumption[&("R".to_string(), day(5))], Decimal::from(30));
    }

    #[test]
    fn test_duplicate_capacity_last_wins() {
        let checker = CapacityChecker::new(
            &[ResourceRequirement::new("M", "R", Decimal::ONE)],
            &[
                CapacityRecord::new("R", day(5), Decimal::from(5)),
                CapacityRecord::new("R", day(5), Decimal::from(50)),
            ],
        );

        let report = checker.check(&[net("M", day(5), 15)]).unwrap();
        assert!(report.is_feasible());
    }

    #[test]
    fn test_consumption_overflow_is_an_error() {
        let checker = CapacityChecker::new(&[ResourceRequirement::new("M", "R", Decimal::MAX)], &[]);

        let err = checker.check(&[net("M", day(5), 15)]).unwrap_err();
        assert!(matches!(err, MrpError::QuantityOverflow { ref material, .. } if material == "M"));
    }
}

//! 交期計算

use chrono::{Days, NaiveDate};
use mrp_core::{LeadTime, MrpError, Result};
use std::collections::HashMap;

/// 提前期查詢表（未設定的物料提前期為 0）
#[derive(Debug, Clone, Default)]
pub struct LeadTimeTable {
    entries: HashMap<String, LeadTime>,
}

impl LeadTimeTable {
    /// 從提前期記錄建立查詢表（重複物料以最後一筆為準）
    pub fn from_records(records: &[LeadTime]) -> Self {
        let entries = records
            .iter()
            .map(|lt| (lt.component_id.clone(), lt.clone()))
            .collect();
        Self { entries }
    }

    /// 生產提前期（天）
    pub fn production_days(&self, component_id: &str) -> u32 {
        self.entries
            .get(component_id)
            .map(|lt| lt.production_days)
            .unwrap_or(0)
    }

    /// 採購提前期（天）
    pub fn purchase_days(&self, component_id: &str) -> u32 {
        self.entries
            .get(component_id)
            .map(|lt| lt.purchase_days)
            .unwrap_or(0)
    }
}

/// 交期計算器（日曆天）
pub struct LeadTimeCalculator;

impl LeadTimeCalculator {
    /// 計算下單日期（向後推算提前期）
    pub fn calculate_order_date(required_date: NaiveDate, lead_time_days: u32) -> Result<NaiveDate> {
        required_date
            .checked_sub_days(Days::new(u64::from(lead_time_days)))
            .ok_or_else(|| {
                MrpError::InvalidDate(format!("{required_date} 向前推算 {lead_time_days} 天超出日期範圍"))
            })
    }
}

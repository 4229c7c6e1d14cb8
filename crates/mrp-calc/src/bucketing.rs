//! 時間分桶

use chrono::NaiveDate;

use crate::aggregation::TimePhased;

/// 時間分桶計算器
pub struct BucketingCalculator;

impl BucketingCalculator {
    /// 創建單一物料的時間桶
    ///
    /// 只取該物料有需求或有預計收貨的日期，排序且不重複。
    pub fn create_time_buckets(
        demand: Option<&TimePhased>,
        receipts: Option<&TimePhased>,
    ) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = demand
            .into_iter()
            .chain(receipts)
            .flat_map(|phased| phased.keys().copied())
            .collect();

        Self::merge_buckets(&mut dates);
        dates
    }

    /// 合併重複的日期桶
    pub fn merge_buckets(buckets: &mut Vec<NaiveDate>) {
        buckets.sort();
        buckets.dedup();
    }
}

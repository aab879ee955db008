use std::time::Duration;

use anyhow::Result;
use chrono::{Datelike, Local};
use moka::future::Cache;
use once_cell::sync::Lazy;

use crate::engine::aggregate::{MonthlyAggregate, RemoteMonthlyAggregate};
use crate::engine::shift::DefaultShift;
use crate::store::AppStore;

/// (employee_id, year, month)
pub type SummaryKey = (u64, i32, u32);

/// Cached monthly aggregates for on-site employees. The persisted summary
/// rows stay authoritative for other readers; this only skips recomputes.
pub static ONSITE_SUMMARY_CACHE: Lazy<Cache<SummaryKey, MonthlyAggregate>> = Lazy::new(|| {
    Cache::builder()
        .max_capacity(100_000)
        .time_to_live(Duration::from_secs(600)) // current-month figures track the clock
        .build()
});

pub static REMOTE_SUMMARY_CACHE: Lazy<Cache<SummaryKey, RemoteMonthlyAggregate>> =
    Lazy::new(|| {
        Cache::builder()
            .max_capacity(100_000)
            .time_to_live(Duration::from_secs(600))
            .build()
    });

pub async fn invalidate_onsite(employee_id: u64, year: i32, month: u32) {
    ONSITE_SUMMARY_CACHE.invalidate(&(employee_id, year, month)).await;
}

pub async fn invalidate_remote(employee_id: u64, year: i32, month: u32) {
    REMOTE_SUMMARY_CACHE.invalidate(&(employee_id, year, month)).await;
}

/// Shift, holiday and leave edits can move any month for any employee.
pub fn invalidate_all() {
    ONSITE_SUMMARY_CACHE.invalidate_all();
    REMOTE_SUMMARY_CACHE.invalidate_all();
}

/// Precomputes the current month for all active employees so the first
/// report and payroll views after startup hit warm entries.
pub async fn warmup_summary_cache(store: &AppStore, default_shift: DefaultShift) -> Result<()> {
    let today = Local::now().date_naive();
    let (year, month) = (today.year(), today.month());

    let mut inserts = Vec::new();
    for employee in store.list_employees(false, None) {
        let data = store.onsite_month(employee.id, year, month, today, default_shift)?;
        inserts.push(ONSITE_SUMMARY_CACHE.insert((employee.id, year, month), data.aggregate));
    }
    let onsite_count = inserts.len();
    futures::future::join_all(inserts).await;

    let mut inserts = Vec::new();
    for employee in store.list_remote_employees(false, None) {
        let data = store.remote_month(employee.id, year, month, today)?;
        inserts.push(REMOTE_SUMMARY_CACHE.insert((employee.id, year, month), data.aggregate));
    }
    let remote_count = inserts.len();
    futures::future::join_all(inserts).await;

    log::info!(
        "Summary cache warmup complete: {} on-site + {} remote employees for {}/{}",
        onsite_count,
        remote_count,
        year,
        month
    );

    Ok(())
}

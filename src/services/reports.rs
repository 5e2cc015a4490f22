//! Dashboard, history and CSV reporting over utilization records

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::NaiveDate;
use indexmap::IndexMap;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::{
    clock::Clock,
    error::AppResult,
    models::{
        enums::OwnershipType,
        report::{
            ActiveFilter, ChartPoint, DashboardReport, FilterOptions, HistoryFilter,
            HistoryReport, HistorySort,
        },
        utilization::UtilizationRecord,
    },
    repository::Repository,
};

pub const CSV_HEADER: [&str; 7] = [
    "Equipment Name",
    "Floor",
    "Ownership",
    "Status",
    "Daily Cost",
    "Total Days",
    "Total Cost",
];

/// Aggregates over the active records of a dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveSummary {
    pub total_daily_cost: Decimal,
    pub rental_daily_cost: Decimal,
    pub owned_daily_cost: Decimal,
    pub total_items: i64,
    pub owned_items: i64,
    pub efficiency_score: f64,
    pub chart: Vec<ChartPoint>,
}

/// Sums, counts and the by-floor chart for active records.
///
/// Chart labels come out in byte order; [`order_by_floor_listing`] applies the
/// database collation used everywhere else.
pub fn summarize_active(records: &[UtilizationRecord]) -> ActiveSummary {
    let mut total_daily_cost = Decimal::ZERO;
    let mut rental_daily_cost = Decimal::ZERO;
    let mut owned_daily_cost = Decimal::ZERO;
    let mut owned_items = 0i64;
    let mut by_floor: BTreeMap<&str, Decimal> = BTreeMap::new();

    for record in records {
        total_daily_cost += record.daily_cost;
        match record.ownership_type {
            OwnershipType::Owned => {
                owned_daily_cost += record.daily_cost;
                owned_items += 1;
            }
            OwnershipType::Rental => rental_daily_cost += record.daily_cost,
        }
        *by_floor.entry(record.floor_name.as_str()).or_insert(Decimal::ZERO) += record.daily_cost;
    }

    let total_items = records.len() as i64;
    let efficiency_score = if total_items > 0 {
        owned_items as f64 / total_items as f64 * 100.0
    } else {
        0.0
    };

    ActiveSummary {
        total_daily_cost,
        rental_daily_cost,
        owned_daily_cost,
        total_items,
        owned_items,
        efficiency_score,
        chart: by_floor
            .into_iter()
            .map(|(label, value)| ChartPoint {
                label: label.to_string(),
                value,
            })
            .collect(),
    }
}

/// Reorder chart points to follow `floors` (names as listed by the database).
/// Labels missing from the listing go last.
pub fn order_by_floor_listing(chart: &mut [ChartPoint], floors: &[String]) {
    let position: HashMap<&str, usize> = floors
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i))
        .collect();
    chart.sort_by_cached_key(|point| {
        position
            .get(point.label.as_str())
            .copied()
            .unwrap_or(usize::MAX)
    });
}

/// Dashboard chart title reflecting the active filters
pub fn chart_title(filter: &ActiveFilter) -> String {
    let base = "Cost Breakdown by Floor";
    match (filter.floor.as_deref(), filter.equipment.as_deref()) {
        (Some(floor), Some(equipment)) => format!("{} - {} on {}", base, equipment, floor),
        (Some(floor), None) => format!("{} - {} Only", base, floor),
        (None, Some(equipment)) => format!("{} - {} Only", base, equipment),
        (None, None) => base.to_string(),
    }
}

/// Order ended records; end-date orders are stable over record id.
pub fn sort_history(records: &mut [UtilizationRecord], sort: HistorySort, today: NaiveDate) {
    match sort {
        HistorySort::EndDateAsc => records.sort_by_key(|r| (r.end_date, r.id)),
        HistorySort::EndDateDesc => {
            records.sort_by(|a, b| (b.end_date, b.id).cmp(&(a.end_date, a.id)))
        }
        HistorySort::TotalCostAsc => records.sort_by_cached_key(|r| r.total_cost(today)),
        HistorySort::TotalCostDesc => {
            records.sort_by_cached_key(|r| std::cmp::Reverse(r.total_cost(today)))
        }
    }
}

/// Summed total cost per floor, floors in order of their first record by id
pub fn history_chart(records: &[UtilizationRecord], today: NaiveDate) -> Vec<ChartPoint> {
    let mut ordered: Vec<&UtilizationRecord> = records.iter().collect();
    ordered.sort_by_key(|r| r.id);

    let mut by_floor: IndexMap<&str, Decimal> = IndexMap::new();
    for record in ordered {
        *by_floor.entry(record.floor_name.as_str()).or_insert(Decimal::ZERO) +=
            record.total_cost(today);
    }

    by_floor
        .into_iter()
        .map(|(label, value)| ChartPoint {
            label: label.to_string(),
            value,
        })
        .collect()
}

/// Money with exactly two decimals
pub fn format_money(value: Decimal) -> String {
    format!(
        "{:.2}",
        value.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
    )
}

fn escape_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        let escaped = value.replace('"', "\"\"");
        format!("\"{escaped}\"")
    } else {
        value.to_string()
    }
}

/// CSV document with one row per record, CRLF line endings
pub fn render_csv(records: &[UtilizationRecord], today: NaiveDate) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(CSV_HEADER.join(","));

    for record in records {
        let days = record.total_days(today);
        let row = [
            escape_field(&record.equipment_name),
            escape_field(&record.floor_name),
            record.ownership_type.as_str().to_string(),
            record.status().to_string(),
            format_money(record.daily_cost),
            days.to_string(),
            format_money(crate::models::utilization::total_cost(record.daily_cost, days)),
        ];
        lines.push(row.join(","));
    }

    let mut body = lines.join("\r\n");
    body.push_str("\r\n");
    body
}

#[derive(Clone)]
pub struct ReportsService {
    repository: Repository,
    clock: Arc<dyn Clock>,
}

impl ReportsService {
    pub fn new(repository: Repository, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    async fn filter_options(&self) -> AppResult<FilterOptions> {
        let floors = self.repository.floors.list().await?;
        let equipment = self.repository.equipment_types.list().await?;
        Ok(FilterOptions {
            floors: floors.into_iter().map(|f| f.name).collect(),
            equipment: equipment.into_iter().map(|e| e.name).collect(),
        })
    }

    /// Active records with cost totals and efficiency
    pub async fn dashboard(&self, filter: &ActiveFilter) -> AppResult<DashboardReport> {
        let today = self.clock.today();
        let records = self.repository.utilization.list_active(filter).await?;
        let filter_options = self.filter_options().await?;
        let mut summary = summarize_active(&records);
        order_by_floor_listing(&mut summary.chart, &filter_options.floors);

        tracing::debug!(
            floor = ?filter.floor,
            equipment = ?filter.equipment,
            total_items = summary.total_items,
            "Built dashboard"
        );

        Ok(DashboardReport {
            records: records.into_iter().map(|r| r.into_view(today)).collect(),
            total_daily_cost: summary.total_daily_cost,
            rental_daily_cost: summary.rental_daily_cost,
            owned_daily_cost: summary.owned_daily_cost,
            total_items: summary.total_items,
            owned_items: summary.owned_items,
            efficiency_score: summary.efficiency_score,
            chart_title: chart_title(filter),
            chart: summary.chart,
            filter_options,
        })
    }

    /// Ended records with their summed cost
    pub async fn history(&self, filter: &HistoryFilter) -> AppResult<HistoryReport> {
        let today = self.clock.today();
        let sort = filter.sort();
        let mut records = self.repository.utilization.list_history(filter).await?;
        sort_history(&mut records, sort, today);

        let total_history_cost: Decimal = records.iter().map(|r| r.total_cost(today)).sum();
        let chart = history_chart(&records, today);

        tracing::debug!(
            total_records = records.len(),
            sort = %sort,
            "Built history report"
        );

        Ok(HistoryReport {
            total_records: records.len() as i64,
            records: records.into_iter().map(|r| r.into_view(today)).collect(),
            total_history_cost,
            sort,
            chart,
            filter_options: self.filter_options().await?,
        })
    }

    /// CSV export of the active records the dashboard would show
    pub async fn export_csv(&self, filter: &ActiveFilter) -> AppResult<String> {
        let records = self.repository.utilization.list_active(filter).await?;
        tracing::info!(rows = records.len(), "Exporting utilization CSV");
        Ok(render_csv(&records, self.clock.today()))
    }
}

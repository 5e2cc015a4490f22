//! Typed filter criteria and report payloads for the dashboard, history and
//! record listings.
//!
//! Query strings coming from filter forms submit empty values for unused
//! dropdowns; those are read as "no filter".

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, NoneAsEmptyString};
use utoipa::{IntoParams, ToSchema};

use super::enums::OwnershipType;
use super::utilization::UtilizationView;

/// Filters for active records (dashboard and CSV export)
#[serde_as]
#[derive(Debug, Default, Clone, PartialEq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ActiveFilter {
    /// Exact floor name
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub floor: Option<String>,
    /// Exact equipment type name
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub equipment: Option<String>,
}

/// Ordering of the history listing
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum HistorySort {
    #[serde(rename = "end_date")]
    EndDateAsc,
    /// Newest first
    #[default]
    #[serde(rename = "-end_date")]
    EndDateDesc,
    #[serde(rename = "total_cost")]
    TotalCostAsc,
    #[serde(rename = "-total_cost")]
    TotalCostDesc,
}

impl HistorySort {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistorySort::EndDateAsc => "end_date",
            HistorySort::EndDateDesc => "-end_date",
            HistorySort::TotalCostAsc => "total_cost",
            HistorySort::TotalCostDesc => "-total_cost",
        }
    }
}

impl std::fmt::Display for HistorySort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for HistorySort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "end_date" => Ok(HistorySort::EndDateAsc),
            "-end_date" => Ok(HistorySort::EndDateDesc),
            "total_cost" => Ok(HistorySort::TotalCostAsc),
            "-total_cost" => Ok(HistorySort::TotalCostDesc),
            _ => Err(format!("Invalid sort key: {}", s)),
        }
    }
}

/// Filters for historical (ended) records
#[serde_as]
#[derive(Debug, Default, Clone, PartialEq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HistoryFilter {
    /// Exact floor name
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub floor: Option<String>,
    /// Exact equipment type name
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub equipment: Option<String>,
    /// Earliest end date, inclusive (YYYY-MM-DD)
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[param(value_type = Option<String>, format = Date)]
    pub from_date: Option<NaiveDate>,
    /// Latest end date, inclusive (YYYY-MM-DD)
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[param(value_type = Option<String>, format = Date)]
    pub to_date: Option<NaiveDate>,
    /// OWNED or RENTAL
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[param(value_type = Option<String>)]
    pub ownership: Option<OwnershipType>,
    /// end_date, -end_date (default), total_cost or -total_cost
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[param(value_type = Option<String>)]
    pub sort: Option<HistorySort>,
}

impl HistoryFilter {
    pub fn sort(&self) -> HistorySort {
        self.sort.unwrap_or_default()
    }
}

/// Filters for the record administration listing
#[serde_as]
#[derive(Debug, Default, Clone, PartialEq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RecordQuery {
    /// Case-insensitive match on equipment or floor name
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub search: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub floor: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub equipment: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[param(value_type = Option<String>)]
    pub ownership: Option<OwnershipType>,
}

/// One bar of the cost-by-floor chart
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ChartPoint {
    pub label: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub value: Decimal,
}

/// Names offered by the floor and equipment filter dropdowns
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct FilterOptions {
    pub floors: Vec<String>,
    pub equipment: Vec<String>,
}

/// Active utilization overview
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardReport {
    pub records: Vec<UtilizationView>,
    #[schema(value_type = String)]
    pub total_daily_cost: Decimal,
    #[schema(value_type = String)]
    pub rental_daily_cost: Decimal,
    #[schema(value_type = String)]
    pub owned_daily_cost: Decimal,
    pub total_items: i64,
    pub owned_items: i64,
    /// Share of active items that are owned, in percent
    pub efficiency_score: f64,
    pub chart_title: String,
    /// Summed daily cost per floor, by floor name
    pub chart: Vec<ChartPoint>,
    pub filter_options: FilterOptions,
}

/// Ended utilization overview
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HistoryReport {
    pub records: Vec<UtilizationView>,
    #[schema(value_type = String)]
    pub total_history_cost: Decimal,
    pub total_records: i64,
    pub sort: HistorySort,
    /// Summed total cost per floor
    pub chart: Vec<ChartPoint>,
    pub filter_options: FilterOptions,
}

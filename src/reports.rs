// The report views.
//
// Each function takes an immutable snapshot of the loaded records plus its
// slice of the configuration and returns a fresh table, sentence, or chart
// series for one deck slot. Views are independent of each other; the only
// shared state is the input.
use crate::config::{RankConfig, WindowConfig};
use crate::lookup::HsLookup;
use crate::ranked::{self, Group};
use crate::timefill;
use crate::types::{
    ChartSeries, ChartValues, ConsigneeRow, DestinationRow, ExportRecord, HeatMapRow, HsExportRow,
    HsImportRow, HsImportTrailingRow, ImportRecord, MonthlyImportRow, RecentShipmentRow,
    YearlyExportRow, YearlyImportRow,
};
use crate::util::{
    first_line_capitalized, format_int, format_mdy, format_number, format_quantity, month_label,
    month_name, round2_str, two_digit_codes,
};
use chrono::{Datelike, NaiveDate};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// Import records whose month falls within the 12 months before `as_of`
/// (inclusive of the same month one year earlier, so up to 13 calendar
/// months can appear).
pub fn trailing_twelve_months(imports: &[ImportRecord], as_of: NaiveDate) -> Vec<ImportRecord> {
    let start = format!("{:04}-{:02}", as_of.year() - 1, as_of.month());
    imports
        .iter()
        .filter(|r| r.month.as_str() >= start.as_str())
        .cloned()
        .collect()
}

// ---- exports ----

/// Top destinations by export value, with Others and Total rows.
pub fn shipment_destinations(exports: &[ExportRecord], cfg: &RankConfig) -> Vec<DestinationRow> {
    let groups = ranked::sum_groups(
        exports
            .iter()
            .map(|r| (r.destination.clone(), None, r.value_usd)),
    );
    ranked::rank(groups, cfg.top_n)
        .into_rows()
        .map(|row| DestinationRow {
            destination: row.label,
            value: format_int(row.value as i64),
            percentage: row.percentage,
        })
        .collect()
}

/// Full per-destination totals backing the world heat map, sorted descending.
pub fn destination_totals(exports: &[ExportRecord]) -> Vec<HeatMapRow> {
    let mut groups = ranked::sum_groups(
        exports
            .iter()
            .map(|r| (r.destination.clone(), None, r.value_usd)),
    );
    groups.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));
    groups
        .into_iter()
        .map(|g| HeatMapRow {
            destination: g.label,
            value: g.value,
        })
        .collect()
}

pub fn exports_summary_sentence(exports: &[ExportRecord]) -> String {
    let Some((first, last)) = month_range(exports.iter().map(|r| r.month.as_str())) else {
        return "The China export records contained no shipments.".to_string();
    };
    let value_m = exports.iter().map(|r| r.value_usd).sum::<f64>() / 1e6;
    let regions: HashSet<&str> = exports.iter().map(|r| r.country_of_sale.as_str()).collect();
    let codes: HashSet<&str> = exports.iter().map(|r| r.hs_code.as_str()).collect();
    format!(
        "The China exports between {} and {} showed that the products were exported to {} regions, under {} HS codes and valued at {} million USD.",
        month_name(first),
        month_name(last),
        regions.len(),
        codes.len(),
        round2_str(value_m)
    )
}

#[derive(Debug, Default, Clone, Copy)]
struct ExportTotals {
    total: f64,
    us: f64,
}

fn yearly_export_totals(
    exports: &[ExportRecord],
    cfg: &WindowConfig,
    as_of: NaiveDate,
) -> Vec<(String, ExportTotals)> {
    let mut by_year: HashMap<String, ExportTotals> = HashMap::new();
    for r in exports {
        let e = by_year.entry(r.year.to_string()).or_default();
        e.total += r.value_usd;
        if r.destination == "United States" {
            e.us += r.value_usd;
        }
    }
    // The export window ends at the last year present in the data. An empty
    // dataset anchors on the reference date so the row count still holds.
    let end_year = exports
        .iter()
        .map(|r| r.year)
        .max()
        .unwrap_or_else(|| as_of.year());
    let end = NaiveDate::from_ymd_opt(end_year, 1, 1).unwrap_or(as_of);
    let periods = timefill::trailing_window(cfg.granularity, end, cfg.periods);
    timefill::fill(&periods, &by_year)
}

/// Yearly export values (total and US-bound) over the configured window.
pub fn yearly_exports(
    exports: &[ExportRecord],
    cfg: &WindowConfig,
    as_of: NaiveDate,
) -> Vec<YearlyExportRow> {
    yearly_export_totals(exports, cfg, as_of)
        .into_iter()
        .map(|(year, t)| YearlyExportRow {
            year,
            total: format_number(t.total, 0),
            us: format_number(t.us, 0),
        })
        .collect()
}

pub fn yearly_exports_chart(
    exports: &[ExportRecord],
    cfg: &WindowConfig,
    as_of: NaiveDate,
) -> ChartSeries {
    let filled = yearly_export_totals(exports, cfg, as_of);
    ChartSeries {
        categories: filled.iter().map(|(y, _)| y.clone()).collect(),
        series: vec![
            ChartValues {
                name: "Total".to_string(),
                values: filled.iter().map(|(_, t)| t.total).collect(),
            },
            ChartValues {
                name: "US".to_string(),
                values: filled.iter().map(|(_, t)| t.us).collect(),
            },
        ],
    }
}

/// Top 6-digit HS codes by export value. The synthetic Others and Total rows
/// repeat their label in both label columns.
pub fn hs_exports(exports: &[ExportRecord], cfg: &RankConfig) -> Vec<HsExportRow> {
    let groups = ranked::sum_groups(exports.iter().map(|r| {
        (
            r.hs_code.clone(),
            Some(r.hs_description.clone()),
            r.value_usd,
        )
    }));
    let summary = ranked::rank(groups, cfg.top_n);
    let mut rows: Vec<HsExportRow> = summary
        .kept
        .iter()
        .map(|row| HsExportRow {
            hs_code: row.label.clone(),
            description: row.description.clone().unwrap_or_default(),
            value: format_int(row.value as i64),
            percentage: row.percentage.clone(),
        })
        .collect();
    for row in [&summary.others, &summary.total] {
        rows.push(HsExportRow {
            hs_code: row.label.clone(),
            description: row.label.clone(),
            value: format_int(row.value as i64),
            percentage: row.percentage.clone(),
        });
    }
    rows
}

pub fn hs_exports_summary_sentence(exports: &[ExportRecord]) -> String {
    let Some((first, last)) = month_range(exports.iter().map(|r| r.month.as_str())) else {
        return "The China export records contained no shipments.".to_string();
    };
    let codes: HashSet<(&str, &str)> = exports
        .iter()
        .map(|r| (r.hs_code.as_str(), r.hs_description.as_str()))
        .collect();
    format!(
        "The China export records between {} and {} showed that a total of {} 6-digit HS codes were exported.",
        month_name(first),
        month_name(last),
        codes.len()
    )
}

// ---- imports ----

#[derive(Debug, Default, Clone, Copy)]
struct ImportCounts {
    shipments: f64,
    containers: f64,
}

fn yearly_import_counts(
    imports: &[ImportRecord],
    cfg: &WindowConfig,
    as_of: NaiveDate,
) -> Vec<(String, ImportCounts)> {
    let mut by_year: HashMap<String, ImportCounts> = HashMap::new();
    for r in imports {
        let e = by_year.entry(r.year.to_string()).or_default();
        e.shipments += 1.0;
        e.containers += r.containers as f64;
    }
    let periods = timefill::trailing_window(cfg.granularity, as_of, cfg.periods);
    let mut filled = timefill::fill(&periods, &by_year);
    // The final row is the partially elapsed current year; project it to a
    // full-year estimate. Yearly only; monthly series are never scaled.
    if let Some((_, counts)) = filled.last_mut() {
        let scale = timefill::seasonal_scale(as_of);
        counts.shipments *= scale;
        counts.containers *= scale;
    }
    filled
}

/// Yearly import shipments and containers over the configured window, the
/// current year extrapolated to a full-year estimate.
pub fn yearly_imports(
    imports: &[ImportRecord],
    cfg: &WindowConfig,
    as_of: NaiveDate,
) -> Vec<YearlyImportRow> {
    yearly_import_counts(imports, cfg, as_of)
        .into_iter()
        .map(|(year, c)| YearlyImportRow {
            year,
            shipments: c.shipments as i64,
            containers: c.containers as i64,
        })
        .collect()
}

pub fn yearly_imports_chart(rows: &[YearlyImportRow]) -> ChartSeries {
    ChartSeries {
        categories: rows.iter().map(|r| r.year.clone()).collect(),
        series: vec![
            ChartValues {
                name: "Number of Shipments".to_string(),
                values: rows.iter().map(|r| r.shipments as f64).collect(),
            },
            ChartValues {
                name: "Number of Containers".to_string(),
                values: rows.iter().map(|r| r.containers as f64).collect(),
            },
        ],
    }
}

pub fn yearly_imports_summary_sentence(imports: &[ImportRecord]) -> String {
    let shipments = imports.len();
    let containers: i64 = imports.iter().map(|r| r.containers).sum();
    format!(
        "The US import records for the last 5 years showed that {shipments} shipments and {containers} containers were imported to US."
    )
}

/// Monthly import shipments and containers for the trailing window. Months
/// are labelled for the chart axis ("Mar-17").
pub fn monthly_imports(
    imports_12: &[ImportRecord],
    cfg: &WindowConfig,
    as_of: NaiveDate,
) -> Vec<MonthlyImportRow> {
    let mut by_month: HashMap<String, ImportCounts> = HashMap::new();
    for r in imports_12 {
        let e = by_month.entry(r.month.clone()).or_default();
        e.shipments += 1.0;
        e.containers += r.containers as f64;
    }
    let periods = timefill::trailing_window(cfg.granularity, as_of, cfg.periods);
    timefill::fill(&periods, &by_month)
        .into_iter()
        .map(|(month, c)| MonthlyImportRow {
            month: month_label(&month),
            shipments: c.shipments as i64,
            containers: c.containers as i64,
        })
        .collect()
}

pub fn monthly_imports_chart(rows: &[MonthlyImportRow]) -> ChartSeries {
    ChartSeries {
        categories: rows.iter().map(|r| r.month.clone()).collect(),
        series: vec![
            ChartValues {
                name: "Number of Shipments".to_string(),
                values: rows.iter().map(|r| r.shipments as f64).collect(),
            },
            ChartValues {
                name: "Number of Containers".to_string(),
                values: rows.iter().map(|r| r.containers as f64).collect(),
            },
        ],
    }
}

/// 2-digit HS categories for a set of import records, one counted unit per
/// code mention. Multi-code cells contribute once per embedded code.
fn hs_import_categories(imports: &[ImportRecord]) -> Vec<Group> {
    ranked::count_groups(imports.iter().flat_map(|r| two_digit_codes(&r.hs_code)))
}

/// Ranked 2-digit HS category table for one period.
pub fn hs_imports(imports: &[ImportRecord], lookup: &HsLookup, cfg: &RankConfig) -> Vec<HsImportRow> {
    let mut groups = hs_import_categories(imports);
    for g in &mut groups {
        g.description = match lookup.describe(&g.label) {
            Some(d) => Some(d.to_string()),
            None => {
                warn!(code = %g.label, "no description for HS category");
                None
            }
        };
    }
    let summary = ranked::rank(groups, cfg.top_n);
    let mut rows: Vec<HsImportRow> = summary
        .kept
        .iter()
        .map(|row| HsImportRow {
            hs_code: row.label.clone(),
            description: row.description.clone().unwrap_or_default(),
            containers: row.value as i64,
            percentage: row.percentage.clone(),
        })
        .collect();
    for row in [&summary.others, &summary.total] {
        rows.push(HsImportRow {
            hs_code: row.label.clone(),
            description: row.label.clone(),
            containers: row.value as i64,
            percentage: row.percentage.clone(),
        });
    }
    rows
}

/// Historical HS category table joined with trailing-12-month figures.
/// Categories absent from the trailing window leave those cells empty.
pub fn hs_imports_with_trailing(
    imports: &[ImportRecord],
    imports_12: &[ImportRecord],
    lookup: &HsLookup,
    cfg: &RankConfig,
) -> Vec<HsImportTrailingRow> {
    let historical = hs_imports(imports, lookup, cfg);
    let trailing = hs_imports(imports_12, lookup, cfg);
    let by_code: HashMap<&str, &HsImportRow> =
        trailing.iter().map(|r| (r.hs_code.as_str(), r)).collect();
    historical
        .into_iter()
        .map(|h| {
            let recent = by_code.get(h.hs_code.as_str());
            HsImportTrailingRow {
                containers_12: recent.map(|r| r.containers.to_string()).unwrap_or_default(),
                percentage_12: recent.map(|r| r.percentage.clone()).unwrap_or_default(),
                hs_code: h.hs_code,
                description: h.description,
                containers_total: h.containers,
                percentage_total: h.percentage,
            }
        })
        .collect()
}

pub fn hs_imports_summary_sentence(imports: &[ImportRecord]) -> String {
    let n = hs_import_categories(imports).len();
    format!("{n} 2-digit-HS-goods were recorded in the last 5 years. The top goods are:")
}

/// Top consignees by number of shipments.
pub fn consignees_imports(imports: &[ImportRecord], cfg: &RankConfig) -> Vec<ConsigneeRow> {
    let groups = ranked::count_groups(imports.iter().map(|r| r.consignee.clone()));
    ranked::rank(groups, cfg.top_n)
        .into_rows()
        .map(|row| ConsigneeRow {
            consignee: row.label,
            shipments: row.value as i64,
            percentage: row.percentage,
        })
        .collect()
}

pub fn consignees_summary_sentence(imports: &[ImportRecord]) -> String {
    let n = distinct_consignees(imports);
    format!("{n} US consignees were recorded in the last 5 years. The top customers are:")
}

pub fn consignees_12_summary_sentence(imports_12: &[ImportRecord]) -> String {
    let n = distinct_consignees(imports_12);
    format!("{n} US consignees were recorded in the past 12 months. The top customers are:")
}

fn distinct_consignees(imports: &[ImportRecord]) -> usize {
    imports
        .iter()
        .map(|r| r.consignee.as_str())
        .collect::<HashSet<_>>()
        .len()
}

/// The most recent shipments in source order (the input files arrive
/// newest-first).
pub fn recent_shipments(imports: &[ImportRecord], limit: usize) -> Vec<RecentShipmentRow> {
    imports
        .iter()
        .take(limit)
        .map(|r| RecentShipmentRow {
            arrival_date: format_mdy(r.arrival_date),
            destination: r.destination.clone(),
            consignee: r.consignee.clone(),
            quantity: format_quantity(r.quantity),
            weight_kg: r.weight_kg as i64,
            goods_shipped: first_line_capitalized(&r.goods_shipped),
        })
        .collect()
}

fn month_range<'a, I>(months: I) -> Option<(&'a str, &'a str)>
where
    I: Iterator<Item = &'a str> + Clone,
{
    let first = months.clone().min()?;
    let last = months.max()?;
    Some((first, last))
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

// Raw rows mirror the CSV headers exactly; everything is optional text until
// the loader has validated it.

#[derive(Debug, Deserialize)]
pub struct RawExportRow {
    #[serde(rename = "Shipment Month")]
    pub shipment_month: Option<String>,
    #[serde(rename = "Shipment Destination")]
    pub destination: Option<String>,
    #[serde(rename = "Value of Goods (USD)")]
    pub value_usd: Option<String>,
    #[serde(rename = "HS Code")]
    pub hs_code: Option<String>,
    #[serde(rename = "HS Code Description")]
    pub hs_description: Option<String>,
    #[serde(rename = "Country of Sale")]
    pub country_of_sale: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawImportRow {
    #[serde(rename = "Arrival Date")]
    pub arrival_date: Option<String>,
    #[serde(rename = "Shipment Destination")]
    pub destination: Option<String>,
    #[serde(rename = "Consignee")]
    pub consignee: Option<String>,
    #[serde(rename = "HS Code")]
    pub hs_code: Option<String>,
    #[serde(rename = "Number of Containers")]
    pub containers: Option<String>,
    #[serde(rename = "Quantity")]
    pub quantity: Option<String>,
    #[serde(rename = "Weight (kg)")]
    pub weight_kg: Option<String>,
    #[serde(rename = "Goods Shipped")]
    pub goods_shipped: Option<String>,
}

/// One validated export shipment. `year` and `month` are derived once at load
/// time so the views never touch the raw date again.
#[derive(Debug, Clone)]
pub struct ExportRecord {
    pub shipment_month: NaiveDate,
    pub year: i32,
    pub month: String,
    pub destination: String,
    pub value_usd: f64,
    pub hs_code: String,
    pub hs_description: String,
    pub country_of_sale: String,
}

/// One validated import shipment. The HS code cell may hold several
/// semicolon-separated codes.
#[derive(Debug, Clone)]
pub struct ImportRecord {
    pub arrival_date: NaiveDate,
    pub year: i32,
    pub month: String,
    pub destination: String,
    pub consignee: String,
    pub hs_code: String,
    pub containers: i64,
    pub quantity: f64,
    pub weight_kg: f64,
    pub goods_shipped: String,
}

// Report rows. Column renames reproduce the deck template's table headers;
// cells that the template shows as text are already-formatted strings.

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct DestinationRow {
    #[serde(rename = "Shipment Destination")]
    #[tabled(rename = "Shipment Destination")]
    pub destination: String,
    #[serde(rename = "Value of Goods (USD)")]
    #[tabled(rename = "Value of Goods (USD)")]
    pub value: String,
    #[serde(rename = "Percentage of Sale")]
    #[tabled(rename = "Percentage of Sale")]
    pub percentage: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct YearlyExportRow {
    pub year: String,
    #[serde(rename = "Total")]
    #[tabled(rename = "Total")]
    pub total: String,
    #[serde(rename = "US")]
    #[tabled(rename = "US")]
    pub us: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct HsExportRow {
    #[serde(rename = "HS Code")]
    #[tabled(rename = "HS Code")]
    pub hs_code: String,
    #[serde(rename = "HS Code Description")]
    #[tabled(rename = "HS Code Description")]
    pub description: String,
    #[serde(rename = "Value of Goods (USD)")]
    #[tabled(rename = "Value of Goods (USD)")]
    pub value: String,
    #[serde(rename = "Percentage of Sale")]
    #[tabled(rename = "Percentage of Sale")]
    pub percentage: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct YearlyImportRow {
    pub year: String,
    #[serde(rename = "Number of Shipments")]
    #[tabled(rename = "Number of Shipments")]
    pub shipments: i64,
    #[serde(rename = "Number of Containers")]
    #[tabled(rename = "Number of Containers")]
    pub containers: i64,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct MonthlyImportRow {
    pub month: String,
    #[serde(rename = "Number of Shipments")]
    #[tabled(rename = "Number of Shipments")]
    pub shipments: i64,
    #[serde(rename = "Number of Containers")]
    #[tabled(rename = "Number of Containers")]
    pub containers: i64,
}

/// 2-digit HS category table for a single period (historical or trailing 12
/// months). The metric counts code mentions, one per code in a multi-code
/// cell, under the template's "Number of Containers" header.
#[derive(Debug, Serialize, Tabled, Clone)]
pub struct HsImportRow {
    #[serde(rename = "HS Code")]
    #[tabled(rename = "HS Code")]
    pub hs_code: String,
    #[serde(rename = "HS Code Description")]
    #[tabled(rename = "HS Code Description")]
    pub description: String,
    #[serde(rename = "Number of Containers")]
    #[tabled(rename = "Number of Containers")]
    pub containers: i64,
    #[serde(rename = "Percentage (historical)")]
    #[tabled(rename = "Percentage (historical)")]
    pub percentage: String,
}

/// Historical HS category table joined with the trailing-12-month figures.
/// Codes absent from the trailing window leave those cells empty.
#[derive(Debug, Serialize, Tabled, Clone)]
pub struct HsImportTrailingRow {
    #[serde(rename = "HS Code")]
    #[tabled(rename = "HS Code")]
    pub hs_code: String,
    #[serde(rename = "HS Code Description")]
    #[tabled(rename = "HS Code Description")]
    pub description: String,
    #[serde(rename = "Number of Containers (historical total)")]
    #[tabled(rename = "Number of Containers (historical total)")]
    pub containers_total: i64,
    #[serde(rename = "Percentage (historical)")]
    #[tabled(rename = "Percentage (historical)")]
    pub percentage_total: String,
    #[serde(rename = "Number of Containers (past 12 months)")]
    #[tabled(rename = "Number of Containers (past 12 months)")]
    pub containers_12: String,
    #[serde(rename = "Percentage (past 12 months)")]
    #[tabled(rename = "Percentage (past 12 months)")]
    pub percentage_12: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct ConsigneeRow {
    #[serde(rename = "Consignee")]
    #[tabled(rename = "Consignee")]
    pub consignee: String,
    #[serde(rename = "Number of Shipments")]
    #[tabled(rename = "Number of Shipments")]
    pub shipments: i64,
    #[serde(rename = "Percentage of Shipments (past 5 years)")]
    #[tabled(rename = "Percentage of Shipments (past 5 years)")]
    pub percentage: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct RecentShipmentRow {
    #[serde(rename = "Arrival Date")]
    #[tabled(rename = "Arrival Date")]
    pub arrival_date: String,
    #[serde(rename = "Shipment Destination")]
    #[tabled(rename = "Shipment Destination")]
    pub destination: String,
    #[serde(rename = "Consignee")]
    #[tabled(rename = "Consignee")]
    pub consignee: String,
    #[serde(rename = "Quantity")]
    #[tabled(rename = "Quantity")]
    pub quantity: String,
    #[serde(rename = "Weight (kg)")]
    #[tabled(rename = "Weight (kg)")]
    pub weight_kg: i64,
    #[serde(rename = "Goods Shipped")]
    #[tabled(rename = "Goods Shipped")]
    pub goods_shipped: String,
}

/// Per-destination export totals backing the world heat map widget. Unranked
/// and untruncated; keyed by the country name the map joins on.
#[derive(Debug, Serialize, Tabled, Clone)]
pub struct HeatMapRow {
    #[serde(rename = "Shipment Destination")]
    #[tabled(rename = "Shipment Destination")]
    pub destination: String,
    #[serde(rename = "Value of Goods (USD)")]
    #[tabled(rename = "Value of Goods (USD)")]
    pub value: f64,
}

/// Data handed to a chart widget: one category axis plus up to two series.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSeries {
    pub categories: Vec<String>,
    pub series: Vec<ChartValues>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartValues {
    pub name: String,
    pub values: Vec<f64>,
}

// CSV ingestion.
//
// The schema is validated once here; downstream views only ever see typed
// records. Any row that fails validation aborts the load with the file and
// line, so no partial deck is ever written from malformed input.
use crate::error::{ReportError, Result};
use crate::types::{ExportRecord, ImportRecord, RawExportRow, RawImportRow};
use crate::util::{month_key, parse_date_safe, parse_f64_safe, parse_i64_safe};
use chrono::Datelike;
use std::io;
use std::path::Path;
use tracing::info;

pub fn load_exports(path: &Path) -> Result<Vec<ExportRecord>> {
    let rdr = csv::Reader::from_path(path).map_err(|e| ReportError::csv(path, e))?;
    let records = read_exports(rdr, &path.display().to_string())?;
    info!(rows = records.len(), file = %path.display(), "loaded export records");
    Ok(records)
}

pub fn load_imports(path: &Path) -> Result<Vec<ImportRecord>> {
    let rdr = csv::Reader::from_path(path).map_err(|e| ReportError::csv(path, e))?;
    let records = read_imports(rdr, &path.display().to_string())?;
    info!(rows = records.len(), file = %path.display(), "loaded import records");
    Ok(records)
}

pub fn read_exports<R: io::Read>(mut rdr: csv::Reader<R>, source: &str) -> Result<Vec<ExportRecord>> {
    let mut out = Vec::new();
    for (idx, result) in rdr.deserialize::<RawExportRow>().enumerate() {
        // line 1 is the header
        let line = idx as u64 + 2;
        let row = result.map_err(|e| ReportError::schema(source, line, "record", e.to_string()))?;
        let date = parse_date_safe(row.shipment_month.as_deref())
            .ok_or_else(|| ReportError::schema(source, line, "Shipment Month", bad(&row.shipment_month)))?;
        let value_usd = parse_f64_safe(row.value_usd.as_deref())
            .ok_or_else(|| ReportError::schema(source, line, "Value of Goods (USD)", bad(&row.value_usd)))?;
        out.push(ExportRecord {
            year: date.year(),
            month: month_key(date),
            shipment_month: date,
            destination: clean(row.destination),
            value_usd,
            hs_code: clean(row.hs_code),
            hs_description: clean(row.hs_description),
            country_of_sale: clean(row.country_of_sale),
        });
    }
    Ok(out)
}

pub fn read_imports<R: io::Read>(mut rdr: csv::Reader<R>, source: &str) -> Result<Vec<ImportRecord>> {
    let mut out = Vec::new();
    for (idx, result) in rdr.deserialize::<RawImportRow>().enumerate() {
        let line = idx as u64 + 2;
        let row = result.map_err(|e| ReportError::schema(source, line, "record", e.to_string()))?;
        let date = parse_date_safe(row.arrival_date.as_deref())
            .ok_or_else(|| ReportError::schema(source, line, "Arrival Date", bad(&row.arrival_date)))?;
        let containers = parse_i64_safe(row.containers.as_deref())
            .ok_or_else(|| ReportError::schema(source, line, "Number of Containers", bad(&row.containers)))?;
        let quantity = parse_f64_safe(row.quantity.as_deref())
            .ok_or_else(|| ReportError::schema(source, line, "Quantity", bad(&row.quantity)))?;
        let weight_kg = parse_f64_safe(row.weight_kg.as_deref())
            .ok_or_else(|| ReportError::schema(source, line, "Weight (kg)", bad(&row.weight_kg)))?;
        out.push(ImportRecord {
            year: date.year(),
            month: month_key(date),
            arrival_date: date,
            destination: clean(row.destination),
            consignee: clean(row.consignee),
            hs_code: clean(row.hs_code),
            containers,
            quantity,
            weight_kg,
            // goods text keeps its line breaks; views take the first line
            goods_shipped: row.goods_shipped.unwrap_or_default(),
        });
    }
    Ok(out)
}

fn clean(v: Option<String>) -> String {
    v.unwrap_or_default().trim().to_string()
}

fn bad(v: &Option<String>) -> String {
    match v {
        Some(s) => format!("could not parse {s:?}"),
        None => "missing value".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReportError;

    const EXPORTS: &str = "\
Shipment Month,Shipment Destination,Value of Goods (USD),HS Code,HS Code Description,Country of Sale
2017-03,United States,700,850440,Static converters,United States
2017-04,Canada,200,850440,Static converters,Canada
";

    const IMPORTS: &str = "\
Arrival Date,Shipment Destination,Consignee,HS Code,Number of Containers,Quantity,Weight (kg),Goods Shipped
2018-06-15,Los Angeles,Acme Corp,01; 0203,2,100,2500.5,\"ELECTRIC KETTLES
HS CODE 851610\"
";

    #[test]
    fn exports_parse_and_derive_year_month() {
        let rdr = csv::Reader::from_reader(EXPORTS.as_bytes());
        let records = read_exports(rdr, "inline").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].year, 2017);
        assert_eq!(records[0].month, "2017-03");
        assert_eq!(records[0].value_usd, 700.0);
        assert_eq!(records[1].destination, "Canada");
    }

    #[test]
    fn imports_parse_multiline_goods() {
        let rdr = csv::Reader::from_reader(IMPORTS.as_bytes());
        let records = read_imports(rdr, "inline").unwrap();
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.month, "2018-06");
        assert_eq!(r.containers, 2);
        assert_eq!(r.hs_code, "01; 0203");
        assert!(r.goods_shipped.contains('\n'));
    }

    #[test]
    fn bad_date_is_a_schema_error_with_line_number() {
        let data = "\
Shipment Month,Shipment Destination,Value of Goods (USD),HS Code,HS Code Description,Country of Sale
not-a-date,United States,700,850440,Static converters,United States
";
        let rdr = csv::Reader::from_reader(data.as_bytes());
        let err = read_exports(rdr, "inline").unwrap_err();
        match err {
            ReportError::InputSchema { line, column, .. } => {
                assert_eq!(line, 2);
                assert_eq!(column, "Shipment Month");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_numeric_metric_is_fatal() {
        let data = "\
Arrival Date,Shipment Destination,Consignee,HS Code,Number of Containers,Quantity,Weight (kg),Goods Shipped
2018-06-15,Los Angeles,Acme Corp,01,lots,100,2500,Widgets
";
        let rdr = csv::Reader::from_reader(data.as_bytes());
        let err = read_imports(rdr, "inline").unwrap_err();
        assert!(matches!(err, ReportError::InputSchema { column: "Number of Containers", .. }));
    }

    #[test]
    fn load_from_disk_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("China_Exports_sample.csv");
        std::fs::write(&path, EXPORTS).unwrap();
        let records = load_exports(&path).unwrap();
        assert_eq!(records.len(), 2);
    }
}

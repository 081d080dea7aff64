// Report sink.
//
// Each view lands in a numbered slot of the deck: the table as a CSV file,
// the narrative sentence in a shared manifest written at the end, and chart
// series as JSON. Slot numbering follows the deck template. Console previews
// use markdown tables, truncated to a few rows.
use crate::error::{ReportError, Result};
use crate::types::ChartSeries;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};
use tracing::info;

pub struct DeckSink {
    out_dir: PathBuf,
    sentences: BTreeMap<String, String>,
}

impl DeckSink {
    pub fn new(out_dir: &Path) -> Result<Self> {
        fs::create_dir_all(out_dir).map_err(|e| ReportError::io(out_dir, e))?;
        Ok(Self {
            out_dir: out_dir.to_path_buf(),
            sentences: BTreeMap::new(),
        })
    }

    /// Write a view's table into its slot file.
    pub fn table<T: Serialize>(&self, slot: u8, name: &str, rows: &[T]) -> Result<PathBuf> {
        let path = self.slot_path(slot, name, "csv");
        write_csv(&path, rows)?;
        info!(slot, file = %path.display(), "wrote table");
        Ok(path)
    }

    /// Queue a narrative sentence for the manifest.
    pub fn sentence(&mut self, slot: u8, name: &str, text: &str) {
        self.sentences
            .insert(format!("slot{slot:02}_{name}"), text.to_string());
    }

    /// Write chart series data for a slot's chart widget.
    pub fn chart(&self, slot: u8, name: &str, series: &ChartSeries) -> Result<PathBuf> {
        let path = self.slot_path(slot, name, "json");
        write_json(&path, series)?;
        info!(slot, file = %path.display(), "wrote chart series");
        Ok(path)
    }

    /// Flush the collected sentences. Call once after every view is placed.
    pub fn finish(&self) -> Result<PathBuf> {
        let path = self.out_dir.join("sentences.json");
        write_json(&path, &self.sentences)?;
        Ok(path)
    }

    fn slot_path(&self, slot: u8, name: &str, ext: &str) -> PathBuf {
        self.out_dir.join(format!("slot{slot:02}_{name}.{ext}"))
    }
}

pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path).map_err(|e| ReportError::csv(path, e))?;
    for r in rows {
        wtr.serialize(r).map_err(|e| ReportError::csv(path, e))?;
    }
    wtr.flush().map_err(|e| ReportError::io(path, e))?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let s = serde_json::to_string_pretty(value).map_err(|e| ReportError::json(path, e))?;
    fs::write(path, s).map_err(|e| ReportError::io(path, e))?;
    Ok(())
}

/// Print the first `max_rows` rows of a table as markdown.
pub fn preview_table<T>(rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().cloned().take(max_rows).collect();
    if slice.is_empty() {
        println!("(no rows)\n");
        return;
    }
    let table_str = Table::new(slice).with(Style::markdown()).to_string();
    println!("{}\n", table_str);
}

//! Export of intervals and statistics to CSV, JSON and Excel.
//!
//! The JSON export of intervals is a [`Snapshot`], the same document
//! `tally import` reads, so an export can be re-imported elsewhere. CSV has
//! no room for two tables, so exporting everything as CSV writes two files
//! with `_intervals` / `_stats` suffixes; Excel puts them on two worksheets.

use crate::libs::aggregation::{self, AggregationBucket};
use crate::libs::colors;
use crate::libs::interval::IntervalRecord;
use crate::libs::schema::Snapshot;
use crate::libs::time_math;
use crate::libs::view::category_label;
use anyhow::Result;
use chrono::{Local, NaiveDate};
use rust_xlsxwriter::{Color, Format, Workbook, Worksheet};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    Excel,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Excel => "xlsx",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportData {
    /// Every interval in the range.
    Intervals,
    /// Per-category totals for the range.
    Stats,
    All,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsRow {
    pub category: String,
    pub color: String,
    pub intervals: usize,
    pub total_seconds: u64,
    pub formatted_time: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsExport {
    pub from: String,
    pub to: String,
    pub categories: Vec<StatsRow>,
    pub total_time: String,
    pub total_intervals: usize,
}

impl StatsExport {
    pub fn new(from: NaiveDate, to: NaiveDate, buckets: &[AggregationBucket], uncategorized_label: &str) -> Self {
        let keys: Vec<&str> = buckets.iter().map(|b| b.key.as_str()).collect();
        let palette = colors::assign_colors(&keys);
        StatsExport {
            from: time_math::date_to_string(from),
            to: time_math::date_to_string(to),
            categories: buckets
                .iter()
                .map(|b| StatsRow {
                    category: category_label(&b.key, uncategorized_label).to_string(),
                    color: palette.get(&b.key).copied().unwrap_or(colors::PALETTE[0]).to_string(),
                    intervals: b.intervals,
                    total_seconds: b.total_seconds,
                    formatted_time: b.formatted_time.clone(),
                })
                .collect(),
            total_time: aggregation::total_duration(buckets),
            total_intervals: buckets.iter().map(|b| b.intervals).sum(),
        }
    }
}

/// Everything an export may need; the command assembles it from the store.
pub struct ExportBundle {
    pub snapshot: Snapshot,
    pub stats: StatsExport,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FullExport<'a> {
    #[serde(flatten)]
    snapshot: &'a Snapshot,
    stats: &'a StatsExport,
}

const INTERVAL_HEADERS: [&str; 8] = ["ID", "Name", "Date", "Start", "End", "Duration", "Next day", "Category"];
const STATS_HEADERS: [&str; 5] = ["Category", "Color", "Intervals", "Seconds", "Time"];

fn interval_row(interval: &IntervalRecord) -> [String; 8] {
    [
        interval.id.map(|id| id.to_string()).unwrap_or_default(),
        interval.name.clone(),
        interval.date.clone(),
        interval.start_time.clone(),
        interval.end_time.clone(),
        interval.duration.clone(),
        interval.is_dif_days.to_string(),
        interval.category.clone(),
    ]
}

fn hex_color(hex: &str) -> Option<Color> {
    u32::from_str_radix(hex.trim_start_matches('#'), 16).ok().map(Color::RGB)
}

pub struct Exporter {
    format: ExportFormat,
    output_path: PathBuf,
}

impl Exporter {
    /// Without a path, writes `tally_export_<timestamp>.<ext>` in the current directory.
    pub fn new(format: ExportFormat, output_path: Option<PathBuf>) -> Self {
        let default_name = format!("tally_export_{}", Local::now().format("%Y%m%d_%H%M%S"));
        let output_path =
            output_path.unwrap_or_else(|| PathBuf::from(format!("{}.{}", default_name, format.extension())));

        Self { format, output_path }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Writes the requested data and returns the paths of the files written.
    pub fn export(&self, data: ExportData, bundle: &ExportBundle) -> Result<Vec<PathBuf>> {
        match (data, self.format) {
            (ExportData::Intervals, ExportFormat::Csv) => self.intervals_csv(&self.output_path, &bundle.snapshot.intervals)?,
            (ExportData::Stats, ExportFormat::Csv) => self.stats_csv(&self.output_path, &bundle.stats)?,
            (ExportData::All, ExportFormat::Csv) => {
                let intervals_path = self.suffixed("intervals");
                let stats_path = self.suffixed("stats");
                self.intervals_csv(&intervals_path, &bundle.snapshot.intervals)?;
                self.stats_csv(&stats_path, &bundle.stats)?;
                return Ok(vec![intervals_path, stats_path]);
            }
            (ExportData::Intervals, ExportFormat::Json) => self.write_json(&bundle.snapshot)?,
            (ExportData::Stats, ExportFormat::Json) => self.write_json(&bundle.stats)?,
            (ExportData::All, ExportFormat::Json) => self.write_json(&FullExport {
                snapshot: &bundle.snapshot,
                stats: &bundle.stats,
            })?,
            (data, ExportFormat::Excel) => {
                let mut workbook = Workbook::new();
                if matches!(data, ExportData::Intervals | ExportData::All) {
                    Self::intervals_sheet(workbook.add_worksheet(), &bundle.snapshot.intervals)?;
                }
                if matches!(data, ExportData::Stats | ExportData::All) {
                    Self::stats_sheet(workbook.add_worksheet(), &bundle.stats)?;
                }
                workbook.save(&self.output_path)?;
            }
        }
        Ok(vec![self.output_path.clone()])
    }

    fn suffixed(&self, suffix: &str) -> PathBuf {
        let stem = self
            .output_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "tally_export".to_string());
        self.output_path
            .with_file_name(format!("{}_{}.{}", stem, suffix, self.format.extension()))
    }

    fn write_json<T: Serialize>(&self, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        File::create(&self.output_path)?.write_all(json.as_bytes())?;
        Ok(())
    }

    fn intervals_csv(&self, path: &Path, intervals: &[IntervalRecord]) -> Result<()> {
        let mut wtr = csv::Writer::from_path(path)?;
        wtr.write_record(INTERVAL_HEADERS)?;
        for interval in intervals {
            wtr.write_record(interval_row(interval))?;
        }
        wtr.flush()?;
        Ok(())
    }

    fn stats_csv(&self, path: &Path, stats: &StatsExport) -> Result<()> {
        let mut wtr = csv::Writer::from_path(path)?;
        wtr.write_record(STATS_HEADERS)?;
        for row in &stats.categories {
            wtr.write_record([
                row.category.clone(),
                row.color.clone(),
                row.intervals.to_string(),
                row.total_seconds.to_string(),
                row.formatted_time.clone(),
            ])?;
        }
        wtr.write_record(["Total", "", stats.total_intervals.to_string().as_str(), "", stats.total_time.as_str()])?;
        wtr.flush()?;
        Ok(())
    }

    fn intervals_sheet(worksheet: &mut Worksheet, intervals: &[IntervalRecord]) -> Result<()> {
        let header_format = Format::new().set_bold().set_background_color(Color::Gray);
        worksheet.set_name("Intervals")?;
        for (col, header) in INTERVAL_HEADERS.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
        }
        for (i, interval) in intervals.iter().enumerate() {
            let row = i as u32 + 1;
            worksheet.write_number(row, 0, interval.id.unwrap_or(0) as f64)?;
            worksheet.write_string(row, 1, &interval.name)?;
            worksheet.write_string(row, 2, &interval.date)?;
            worksheet.write_string(row, 3, &interval.start_time)?;
            worksheet.write_string(row, 4, &interval.end_time)?;
            worksheet.write_string(row, 5, &interval.duration)?;
            worksheet.write_boolean(row, 6, interval.is_dif_days)?;
            worksheet.write_string(row, 7, &interval.category)?;
        }
        worksheet.autofit();
        Ok(())
    }

    fn stats_sheet(worksheet: &mut Worksheet, stats: &StatsExport) -> Result<()> {
        let header_format = Format::new().set_bold().set_background_color(Color::Gray);
        let title_format = Format::new().set_bold().set_font_size(14.0);
        worksheet.set_name("Statistics")?;
        worksheet.write_string_with_format(0, 0, format!("{} .. {}", stats.from, stats.to), &title_format)?;
        for (col, header) in STATS_HEADERS.iter().enumerate() {
            worksheet.write_string_with_format(2, col as u16, *header, &header_format)?;
        }

        let mut row = 3;
        for entry in &stats.categories {
            worksheet.write_string(row, 0, &entry.category)?;
            match hex_color(&entry.color) {
                Some(color) => worksheet.write_string_with_format(row, 1, &entry.color, &Format::new().set_background_color(color))?,
                None => worksheet.write_string(row, 1, &entry.color)?,
            };
            worksheet.write_number(row, 2, entry.intervals as f64)?;
            worksheet.write_number(row, 3, entry.total_seconds as f64)?;
            worksheet.write_string(row, 4, &entry.formatted_time)?;
            row += 1;
        }

        row += 1;
        worksheet.write_string_with_format(row, 0, "Total", &header_format)?;
        worksheet.write_number(row, 2, stats.total_intervals as f64)?;
        worksheet.write_string(row, 4, &stats.total_time)?;
        worksheet.autofit();
        Ok(())
    }
}

// File and console sinks for computed reports.
//
// The export document lands as Markdown plus a JSON twin, and every chart in
// it is written as a long-format CSV series file for the charting
// collaborator. Console previews go through `tabled`.
use std::path::{Path, PathBuf};

use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use crate::chart::ChartSpec;
use crate::document::{slug, ExportDocument};
use crate::error::Result;
use crate::format::format_number;
use crate::types::ChartPreviewRow;

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

pub fn write_markdown(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content)?;
    Ok(())
}

/// Write a chart's series as long-format CSV: one row per (series, label,
/// value) point.
pub fn write_chart_csv(path: &Path, chart: &ChartSpec) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(["Series", "Label", "Value"])?;
    for series in &chart.series {
        for point in &series.points {
            let value = point.value.to_string();
            wtr.write_record([series.name.as_str(), point.label.as_str(), value.as_str()])?;
        }
    }
    wtr.flush()?;
    Ok(())
}

/// Write an export document and its chart series under `dir`, returning the
/// paths written. The Markdown/JSON pair shares the artifact's file stem.
pub fn export_document(dir: &Path, doc: &ExportDocument) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let stem = doc
        .file_name
        .strip_suffix(".docx")
        .unwrap_or(&doc.file_name);
    let mut written = Vec::new();

    let md_path = dir.join(format!("{stem}.md"));
    write_markdown(&md_path, &doc.render_markdown())?;
    written.push(md_path);

    let json_path = dir.join(format!("{stem}.json"));
    write_json(&json_path, doc)?;
    written.push(json_path);

    for section in &doc.sections {
        let csv_path = dir.join(format!("{}.csv", slug(&section.chart.title)));
        write_chart_csv(&csv_path, &section.chart)?;
        written.push(csv_path);
    }
    Ok(written)
}

/// Print the first `max_rows` rows of a report as a Markdown table.
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

/// Print a chart spec as a label/series/value table.
pub fn preview_chart(chart: &ChartSpec, max_rows: usize) {
    println!("{} [{}]", chart.title, chart.y_label);
    let rows: Vec<ChartPreviewRow> = chart
        .series
        .iter()
        .flat_map(|series| {
            series.points.iter().map(|p| ChartPreviewRow {
                label: p.label.clone(),
                series: series.name.clone(),
                value: format_number(p.value, 2),
            })
        })
        .collect();
    preview_table(&rows, max_rows);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::yoy_document;
    use crate::reports::summarize_yoy;
    use crate::types::YoyRecord;

    #[test]
    fn export_writes_markdown_json_and_chart_series() {
        let records = vec![
            YoyRecord {
                product: "A".to_string(),
                qty_prior_year: 100.0,
                qty_campaign: 150.0,
                change: Some(0.5),
            },
            YoyRecord {
                product: "B".to_string(),
                qty_prior_year: 200.0,
                qty_campaign: 150.0,
                change: Some(-0.25),
            },
        ];
        let summary = summarize_yoy(&records);
        let doc = yoy_document(&records, &summary);

        let dir = tempfile::tempdir().unwrap();
        let written = export_document(dir.path(), &doc).unwrap();
        // markdown + json + one csv per chart section
        assert_eq!(written.len(), 2 + doc.sections.len());
        for path in &written {
            assert!(path.exists(), "{} missing", path.display());
        }
        assert!(dir.path().join("YOY_Executive_Summary.md").exists());

        let csv = std::fs::read_to_string(dir.path().join("yoy_sales_change_by_product.csv"))
            .unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("Series,Label,Value"));
        assert_eq!(lines.next(), Some("YOY Change,A,50"));
    }
}

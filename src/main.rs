// Entry point and interactive navigation.
//
// The console menu selects among six campaign reports. Each selection runs
// the full load -> aggregate -> narrative -> chart-preview pipeline to
// completion, then offers the executive-summary export. Failures are handled
// at the page boundary; the session itself never dies on a bad source file.
use std::io::{self, Write};
use std::path::Path;

use once_cell::sync::Lazy;

use campaign_report::config::AppConfig;
use campaign_report::document::{self, ExportDocument};
use campaign_report::error::ReportError;
use campaign_report::format::format_int;
use campaign_report::loader::{self, LoadReport};
use campaign_report::types::YoyPreviewRow;
use campaign_report::{chart, fixtures, narrative, output, reports};

static CONFIG: Lazy<AppConfig> = Lazy::new(|| AppConfig::load(Path::new("report_config.json")));

/// Read a single line of input after printing a prompt.
fn read_line(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

fn prompt_yes_no(prompt: &str) -> bool {
    loop {
        match read_line(prompt).to_uppercase().as_str() {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

fn print_load_report(report: &LoadReport) {
    for warning in &report.warnings {
        println!("Warning: {warning}");
    }
    println!(
        "Processing dataset... ({} rows loaded, {} kept after cleaning)\n",
        format_int(report.total_rows as i64),
        format_int(report.kept_rows as i64)
    );
}

fn print_findings(heading: &str, findings: &[String]) {
    println!("{heading}");
    for finding in findings {
        println!("- {finding}");
    }
    println!();
}

/// Write the export artifacts and tell the user where they landed.
fn export_and_report(doc: &ExportDocument) {
    match output::export_document(&CONFIG.export_dir, doc) {
        Ok(written) => {
            println!("{} ready ({}).", doc.file_name, document::DOCX_MIME);
            for path in written {
                println!("  wrote {}", path.display());
            }
            println!();
        }
        Err(e) => {
            eprintln!("Failed to generate document: {e}\n");
        }
    }
}

fn yoy_page() {
    println!("YOY Analysis\n");
    let (records, report) = match loader::load_yoy(&CONFIG.yoy_path()) {
        Ok(out) => out,
        Err(ReportError::SourceNotFound(path)) => {
            println!("File `{}` not found.\n", path.display());
            return;
        }
        Err(e) => {
            eprintln!("Error reading YOY file: {e}\n");
            return;
        }
    };
    print_load_report(&report);

    let summary = reports::summarize_yoy(&records);
    let previews: Vec<YoyPreviewRow> = records.iter().map(Into::into).collect();
    output::preview_table(&previews, 5);
    output::preview_chart(&chart::yoy_change_chart(&records), 6);
    output::preview_chart(&chart::yoy_volume_chart(&records), 6);
    print_findings("Key Findings", &narrative::yoy_key_findings(&summary));

    if prompt_yes_no("Generate YOY Executive Summary (Y/N): ") {
        export_and_report(&document::yoy_document(&records, &summary));
    }
}

fn prior_periods_page() {
    println!("Campaign Prior Periods Analysis\n");
    let (records, report) = match loader::load_prior_periods(&CONFIG.prior_periods_path()) {
        Ok(out) => out,
        Err(ReportError::SourceNotFound(path)) => {
            println!("File `{}` not found.\n", path.display());
            return;
        }
        Err(e) => {
            eprintln!("Error reading Prior Periods file: {e}\n");
            return;
        }
    };
    print_load_report(&report);

    let summary = reports::summarize_prior_periods(&records);
    output::preview_chart(&chart::prior_campaign_vs_avg_chart(&records), 6);
    output::preview_chart(&chart::prior_increase_chart(&records), 6);
    print_findings(
        "Key Findings",
        &narrative::prior_periods_key_findings(&summary),
    );

    if prompt_yes_no("Generate Prior Periods Summary (Y/N): ") {
        export_and_report(&document::prior_periods_document(&records, &summary));
    }
}

fn category_page() {
    println!("Campaign Category Share Analysis\n");
    let fixture = fixtures::load_or(
        CONFIG.category_fixture.as_deref(),
        fixtures::CategoryShareFixture::default,
    );
    let summary = reports::summarize_category(&fixture);
    output::preview_chart(&chart::category_share_chart(&fixture, &CONFIG.brand), 6);
    output::preview_chart(&chart::category_comparison_chart(&fixture, &CONFIG.brand), 6);
    print_findings(
        "Key Findings",
        &narrative::category_key_findings(&summary, &CONFIG.brand),
    );

    if prompt_yes_no("Generate Category Share Executive Summary (Y/N): ") {
        export_and_report(&document::category_document(&fixture, &summary, &CONFIG.brand));
    }
}

fn units_page() {
    println!("Campaign Units Analysis (Pre, During, Post)\n");
    let fixture = fixtures::load_or(CONFIG.units_fixture.as_deref(), fixtures::campaign_units);
    let summary = reports::summarize_phases(&fixture);
    output::preview_chart(
        &chart::phase_volume_chart(
            &fixture,
            "Units Sold per Product: Pre-, During-, and Post-Campaign",
            "Units Sold",
        ),
        6,
    );
    output::preview_chart(
        &chart::phase_change_chart(
            &fixture,
            chart::PhaseComparison::VsPre,
            "% Change in Units Sold: Campaign vs Pre-Campaign",
            "% Change (Campaign vs Pre)",
        ),
        6,
    );
    print_findings("Key Findings", &narrative::units_key_findings(&summary));

    if prompt_yes_no("Generate Units Executive Summary (Y/N): ") {
        export_and_report(&document::units_document(&fixture, &summary));
    }
}

fn sales_amount_page() {
    println!("Campaign Sales Amount Analysis (Pre, During, Post)\n");
    let fixture = fixtures::load_or(
        CONFIG.sales_fixture.as_deref(),
        fixtures::campaign_sales_amount,
    );
    let summary = reports::summarize_phases(&fixture);
    output::preview_chart(
        &chart::phase_volume_chart(
            &fixture,
            "Sales Amount per Product: Pre-, During-, and Post-Campaign",
            "Sales Amount (ZAR)",
        ),
        6,
    );
    output::preview_chart(
        &chart::phase_change_chart(
            &fixture,
            chart::PhaseComparison::VsPre,
            "% Change in Sales Amount: Campaign vs Pre-Campaign",
            "% Change (Campaign vs Pre Sales)",
        ),
        6,
    );
    print_findings(
        "Key Findings",
        &narrative::sales_key_findings(&summary, &CONFIG.currency_symbol),
    );

    if prompt_yes_no("Generate Sales Amount Executive Summary (Y/N): ") {
        export_and_report(&document::sales_document(
            &fixture,
            &summary,
            &CONFIG.currency_symbol,
        ));
    }
}

fn demographics_page() {
    println!("Shopper Demographics\n");
    let fixture = fixtures::load_or(
        CONFIG.demographics_fixture.as_deref(),
        fixtures::DemographicsFixture::default,
    );
    let summary = reports::summarize_demographics(&fixture);
    output::preview_chart(&chart::demographics_day_chart(&summary), 7);
    output::preview_chart(&chart::demographics_gender_chart(&summary), 2);
    output::preview_chart(&chart::demographics_age_chart(&summary), 6);
    print_findings(
        "Key Findings",
        &narrative::demographics_key_findings(&summary),
    );

    if prompt_yes_no("Generate Demographics Executive Summary (Y/N): ") {
        export_and_report(&document::demographics_document(&summary));
    }
}

fn main() {
    env_logger::init();
    println!("{}\n", CONFIG.dashboard_title());
    loop {
        println!("Select Report:");
        println!("[1] YOY Analysis");
        println!("[2] Prior Periods");
        println!("[3] Category Analysis");
        println!("[4] Campaign Units Analysis");
        println!("[5] Campaign Sales Amount Analysis");
        println!("[6] Demographics");
        println!("[0] Exit\n");
        match read_line("Enter choice: ").as_str() {
            "1" => yoy_page(),
            "2" => prior_periods_page(),
            "3" => category_page(),
            "4" => units_page(),
            "5" => sales_amount_page(),
            "6" => demographics_page(),
            "0" => {
                println!("Exiting the program.");
                break;
            }
            _ => println!("Invalid choice. Please enter 0-6.\n"),
        }
    }
}

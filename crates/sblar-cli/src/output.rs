//! Findings and catalog formatters.
//!
//! Every formatter returns the rendered text so callers decide where it goes.

use anyhow::{Context, Result, anyhow};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;

use sblar_model::{ConfigDiagnostic, FieldValue, Finding, Phase, Scope, Severity, ValidationResult};
use sblar_validate::Catalog;

/// Longest value shown in a table cell before it is cut short.
pub const MAX_CELL_CHARS: usize = 50;

const CSV_COLUMNS: [&str; 7] = [
    "validation_type",
    "validation_id",
    "validation_name",
    "row",
    "unique_identifier",
    "fig_link",
    "validation_description",
];

/// One line per finding record, field/value pairs appended as
/// `field_1, value_1, field_2, value_2, ...`.
pub fn findings_csv(result: &ValidationResult) -> Result<String> {
    let pairs = result
        .findings
        .iter()
        .map(|finding| finding.fields.len())
        .max()
        .unwrap_or(0);
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header: Vec<String> = CSV_COLUMNS.iter().map(|column| (*column).to_string()).collect();
    for idx in 1..=pairs {
        header.push(format!("field_{idx}"));
        header.push(format!("value_{idx}"));
    }
    writer.write_record(&header).context("write csv header")?;

    for finding in &result.findings {
        let fig_link = finding.fig_link().unwrap_or_default();
        for record in &finding.records {
            let mut row = vec![
                finding.severity.label().to_string(),
                finding.rule_id.clone(),
                finding.name.clone(),
                record.record_no().to_string(),
                record.uid.clone(),
                fig_link.clone(),
                finding.description.clone(),
            ];
            for field in &record.fields {
                row.push(field.name.clone());
                row.push(field.value.clone());
            }
            row.resize(header.len(), String::new());
            writer
                .write_record(&row)
                .with_context(|| format!("write csv row for {}", finding.rule_id))?;
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| anyhow!("flush csv output: {}", err.error()))?;
    String::from_utf8(bytes).context("csv output is not utf-8")
}

#[derive(Serialize)]
struct JsonFinding<'a> {
    validation: JsonValidation<'a>,
    records: Vec<JsonRecord<'a>>,
}

#[derive(Serialize)]
struct JsonValidation<'a> {
    id: &'a str,
    name: &'a str,
    description: &'a str,
    severity: Severity,
    scope: Scope,
    fig_link: Option<String>,
}

#[derive(Serialize)]
struct JsonRecord<'a> {
    record_no: usize,
    uid: &'a str,
    fields: &'a [FieldValue],
}

fn json_finding(finding: &Finding) -> JsonFinding<'_> {
    JsonFinding {
        validation: JsonValidation {
            id: &finding.rule_id,
            name: &finding.name,
            description: &finding.description,
            severity: finding.severity,
            scope: finding.scope,
            fig_link: finding.fig_link(),
        },
        records: finding
            .records
            .iter()
            .map(|record| JsonRecord {
                record_no: record.record_no(),
                uid: &record.uid,
                fields: &record.fields,
            })
            .collect(),
    }
}

/// Findings as a pretty-printed JSON array.
pub fn findings_json(result: &ValidationResult) -> Result<String> {
    let findings: Vec<JsonFinding<'_>> = result.findings.iter().map(json_finding).collect();
    serde_json::to_string_pretty(&findings).context("serialize findings")
}

/// Findings as a table, one row per finding record.
pub fn findings_table(result: &ValidationResult) -> String {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Rule"),
        header_cell("Name"),
        header_cell("Row"),
        header_cell("UID"),
        header_cell("Values"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    for finding in &result.findings {
        for record in &finding.records {
            let values: Vec<String> = record
                .fields
                .iter()
                .map(|field| format!("{}={}", field.name, truncate(&field.value, MAX_CELL_CHARS)))
                .collect();
            table.add_row(vec![
                severity_cell(finding.severity),
                Cell::new(&finding.rule_id),
                Cell::new(&finding.name),
                Cell::new(record.record_no()),
                Cell::new(truncate(&record.uid, MAX_CELL_CHARS)),
                Cell::new(values.join("\n")),
            ]);
        }
        if finding.is_truncated() {
            let hidden = finding.total_records - finding.records.len();
            table.add_row(vec![
                dim_cell(""),
                dim_cell(&finding.rule_id),
                dim_cell(format!("{hidden} more record(s) not shown")),
                dim_cell("-"),
                dim_cell("-"),
                dim_cell("-"),
            ]);
        }
    }
    table.to_string()
}

/// Checks that were skipped because they could not run.
pub fn diagnostics_table(diagnostics: &[ConfigDiagnostic]) -> String {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Phase"),
        header_cell("Rule"),
        header_cell("Name"),
        header_cell("Problem"),
    ]);
    apply_table_style(&mut table);
    for diagnostic in diagnostics {
        table.add_row(vec![
            Cell::new(diagnostic.phase.label()),
            Cell::new(&diagnostic.rule_id),
            Cell::new(&diagnostic.name),
            Cell::new(&diagnostic.message).fg(Color::Yellow),
        ]);
    }
    table.to_string()
}

/// Summary line printed after every validation.
///
/// Any finding, warnings included, makes the status `FAILURE`. The count is
/// one per failing record of each check, not one per check.
pub fn status_line(result: &ValidationResult) -> String {
    let status = if result.is_valid() { "SUCCESS" } else { "FAILURE" };
    let findings: usize = result.findings.iter().map(|finding| finding.total_records).sum();
    format!("status: {status}, findings: {findings}")
}

#[derive(Serialize)]
struct JsonCheck<'a> {
    phase: Phase,
    id: &'a str,
    name: &'a str,
    severity: Severity,
    scope: Scope,
    predicate: &'static str,
    fields: Vec<&'a str>,
    description: &'a str,
    fig_link: Option<String>,
}

fn catalog_rows(catalog: &Catalog, phase: Option<Phase>) -> Vec<JsonCheck<'_>> {
    catalog
        .all_checks()
        .filter(|(check_phase, _)| phase.is_none_or(|wanted| wanted == *check_phase))
        .map(|(check_phase, check)| JsonCheck {
            phase: check_phase,
            id: &check.rule_id,
            name: &check.name,
            severity: check.severity,
            scope: check.scope(),
            predicate: check.predicate.kind(),
            fields: check.target_fields(),
            description: &check.description,
            fig_link: check
                .fig_anchor
                .as_ref()
                .map(|anchor| format!("{}#{anchor}", sblar_model::FIG_BASE_URL)),
        })
        .collect()
}

/// Catalog listing as JSON.
pub fn catalog_json(catalog: &Catalog, phase: Option<Phase>) -> Result<String> {
    serde_json::to_string_pretty(&catalog_rows(catalog, phase)).context("serialize catalog")
}

/// Catalog listing as a table.
pub fn catalog_table(catalog: &Catalog, phase: Option<Phase>) -> String {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Phase"),
        header_cell("Rule"),
        header_cell("Severity"),
        header_cell("Scope"),
        header_cell("Name"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    for row in catalog_rows(catalog, phase) {
        table.add_row(vec![
            Cell::new(row.phase.number()),
            Cell::new(row.id),
            severity_cell(row.severity),
            Cell::new(row.scope.label()),
            Cell::new(row.name),
            Cell::new(truncate(row.description, 80)),
        ]);
    }
    table.to_string()
}

/// Cut `value` to at most `max` characters, marking the cut with `...`.
pub fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut cut: String = value.chars().take(keep).collect();
    cut.push_str("...");
    cut
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(160);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn severity_cell(severity: Severity) -> Cell {
    match severity {
        Severity::Error => Cell::new("ERROR").fg(Color::Red).add_attribute(Attribute::Bold),
        Severity::Warning => Cell::new("WARN").fg(Color::Yellow),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("short", 50), "short");
        let long = "é".repeat(60);
        let cut = truncate(&long, 50);
        assert_eq!(cut.chars().count(), 50);
        assert!(cut.ends_with("..."));
    }
}

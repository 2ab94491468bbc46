use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};
use mugen_model::{Diagnostic, Severity};
use mugen_project::{LocalCoord, Project};
use mugen_sff::{SffHeader, SpriteFile};
use serde::Serialize;

use crate::commands::{CheckResult, SchemaListing};

pub fn print_check(result: &CheckResult) {
    let project = &result.project;
    println!("Character: {} ({})", project.display_name(), project.name());
    println!("Definition: {}", project.manifest().path().display());
    println!("{}", overview_table(project));

    let shown = result.shown();
    if !shown.is_empty() {
        println!();
        println!("Diagnostics:");
        println!("{}", diagnostics_table(&shown));
    }
    println!();
    println!("{}", severity_counts(project));
}

/// Manifest fields and resolved files.
pub fn overview_table(project: &Project) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Value")]);
    apply_table_style(&mut table);

    let state_files = if project.state_files().is_empty() {
        "-".to_string()
    } else {
        project
            .state_files()
            .iter()
            .map(|file| file.key())
            .collect::<Vec<_>>()
            .join(", ")
    };
    let rows = [
        ("mugenversion", project.version().to_string()),
        ("localcoord", project.local_coord().to_string()),
        ("cmd", project.cmd().path().display().to_string()),
        ("cns", project.cns().path().display().to_string()),
        (
            "stcommon",
            format!(
                "{} ({})",
                project.common().path().display(),
                project.common_source()
            ),
        ),
        ("state files", state_files),
        ("statedefs", project.statedefs().len().to_string()),
    ];
    for (field, value) in rows {
        table.add_row(vec![Cell::new(field).add_attribute(Attribute::Bold), Cell::new(value)]);
    }
    table
}

pub fn diagnostics_table(diagnostics: &[&Diagnostic]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("File"),
        header_cell("Message"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    for diagnostic in diagnostics {
        table.add_row(vec![
            severity_cell(diagnostic.severity),
            diagnostic
                .file
                .as_deref()
                .map_or_else(|| dim_cell("-"), Cell::new),
            Cell::new(&diagnostic.message),
        ]);
    }
    table
}

/// One-line totals, e.g. `0 errors, 1 warning, 2 info, 0 debug`.
pub fn severity_counts(project: &Project) -> String {
    let report = project.diagnostics();
    Severity::ALL
        .iter()
        .rev()
        .map(|severity| {
            let count = report.count(*severity);
            let label = match severity {
                Severity::Error if count != 1 => "errors",
                Severity::Error => "error",
                Severity::Warning if count != 1 => "warnings",
                Severity::Warning => "warning",
                Severity::Info => "info",
                Severity::Debug => "debug",
            };
            format!("{count} {label}")
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Serialize)]
struct CheckJson<'a> {
    name: &'a str,
    display_name: &'a str,
    version: &'a str,
    local_coord: LocalCoord,
    has_errors: bool,
    diagnostics: Vec<&'a Diagnostic>,
}

pub fn check_json(result: &CheckResult) -> serde_json::Result<String> {
    let project = &result.project;
    serde_json::to_string_pretty(&CheckJson {
        name: project.name(),
        display_name: project.display_name(),
        version: project.version(),
        local_coord: project.local_coord(),
        has_errors: result.has_errors(),
        diagnostics: result.shown(),
    })
}

pub fn sff_table(sprite: &SpriteFile) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    let header = sprite.header();
    let mut rows = vec![("version", header.version().to_string())];
    match header {
        SffHeader::V1(h) => rows.extend([
            ("groups", h.group_count.to_string()),
            ("sprites", h.sprite_count.to_string()),
            ("first subfile offset", h.subfile_offset.to_string()),
            ("subheader length", h.subheader_length.to_string()),
        ]),
        SffHeader::V2(h) => rows.extend([
            ("sprites", h.sprite_count.to_string()),
            ("first sprite offset", h.first_sprite_offset.to_string()),
            ("palettes", h.palette_count.to_string()),
            ("first palette offset", h.first_palette_offset.to_string()),
            ("ldata offset", h.ldata_offset.to_string()),
            ("ldata length", h.ldata_length.to_string()),
            ("tdata offset", h.tdata_offset.to_string()),
            ("tdata length", h.tdata_length.to_string()),
        ]),
    }
    for (field, value) in rows {
        table.add_row(vec![Cell::new(field).add_attribute(Attribute::Bold), Cell::new(value)]);
    }
    table
}

pub fn schema_table(listing: &SchemaListing) -> Table {
    let mut table = Table::new();
    apply_table_style(&mut table);
    match listing {
        SchemaListing::Controllers(controllers) => {
            table.set_header(vec![header_cell("Controller"), header_cell("Parameters")]);
            align_column(&mut table, 1, CellAlignment::Right);
            for (name, count) in controllers {
                table.add_row(vec![
                    Cell::new(name).fg(Color::Blue),
                    count_cell(*count, Color::Reset),
                ]);
            }
        }
        SchemaListing::Controller(controller) => {
            table.set_header(vec![
                header_cell("Parameter"),
                header_cell("Type"),
                header_cell("Required"),
            ]);
            align_column(&mut table, 2, CellAlignment::Center);
            for property in &controller.properties {
                let required = if property.optional {
                    dim_cell("-")
                } else {
                    Cell::new("yes").fg(Color::Yellow)
                };
                table.add_row(vec![
                    Cell::new(&property.name).add_attribute(Attribute::Bold),
                    Cell::new(property.describe()),
                    required,
                ]);
            }
        }
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
    if table.column_count() >= 3 {
        table.set_constraints(vec![
            ColumnConstraint::LowerBoundary(Width::Fixed(9)),
            ColumnConstraint::UpperBoundary(Width::Fixed(10)),
            ColumnConstraint::UpperBoundary(Width::Percentage(80)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn severity_cell(severity: Severity) -> Cell {
    let cell = Cell::new(severity.label()).fg(severity_color(severity));
    match severity {
        Severity::Error => cell.add_attribute(Attribute::Bold),
        _ => cell,
    }
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Error => Color::Red,
        Severity::Warning => Color::Yellow,
        Severity::Info => Color::Cyan,
        Severity::Debug => Color::DarkGrey,
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

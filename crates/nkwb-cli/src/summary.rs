use chrono::NaiveDateTime;
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use nkwb_ingest::SkippedRow;
use nkwb_model::TimeWindow;

use crate::types::{LoadedExports, RecordingListing};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn print_patients(loaded: &LoadedExports) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("ID"),
        header_cell("Name"),
        header_cell("Sex"),
        header_cell("Birth date"),
        header_cell("EEGs"),
        header_cell("Videos"),
        header_cell("Skipped"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 4..=6 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for patient in &loaded.patients {
        table.add_row(vec![
            Cell::new(&patient.patient_id)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&patient.patient_name),
            Cell::new(&patient.sex),
            patient
                .birth_date
                .map_or_else(|| dim_cell("-"), Cell::new),
            Cell::new(patient.eegs.len()),
            Cell::new(patient.videos.len()),
            count_cell(loaded.skipped_for(&patient.patient_id), Color::Yellow),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{} patients", loaded.patients.len()))
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        Cell::new(loaded.patients.iter().map(|p| p.eegs.len()).sum::<usize>())
            .add_attribute(Attribute::Bold),
        Cell::new(loaded.patients.iter().map(|p| p.videos.len()).sum::<usize>())
            .add_attribute(Attribute::Bold),
        count_cell(loaded.skipped_total(), Color::Yellow).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    print_file_table(loaded);
    print_skipped_table(loaded);
}

fn print_file_table(loaded: &LoadedExports) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Export"),
        header_cell("Patients"),
        header_cell("Recordings"),
        header_cell("Skipped"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=3 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for file in &loaded.files {
        table.add_row(vec![
            Cell::new(file.path.display()),
            Cell::new(file.patients),
            Cell::new(file.recordings),
            count_cell(file.skipped.len(), Color::Yellow),
        ]);
    }
    println!();
    println!("Exports:");
    println!("{table}");
}

fn print_skipped_table(loaded: &LoadedExports) {
    let skipped: Vec<(&str, &SkippedRow)> = loaded
        .files
        .iter()
        .flat_map(|file| {
            let name = file
                .path
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or_default();
            file.skipped.iter().map(move |skip| (name, skip))
        })
        .collect();
    if skipped.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Export"),
        header_cell("Row"),
        header_cell("Section"),
        header_cell("Patient"),
        header_cell("Reason"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (name, skip) in skipped {
        table.add_row(vec![
            Cell::new(name),
            // Spreadsheet applications number rows from 1.
            Cell::new(skip.row + 1),
            Cell::new(skip.section),
            skip.patient_id
                .as_deref()
                .map_or_else(|| dim_cell("-"), Cell::new),
            Cell::new(&skip.reason).fg(Color::Yellow),
        ]);
    }
    println!();
    println!("Skipped:");
    println!("{table}");
}

pub fn print_recordings(listing: &RecordingListing) {
    println!("Patient: {}", listing.patient_id);
    println!("Window: {}", describe_window(&listing.window));
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Kind"),
        header_cell("Start"),
        header_cell("End"),
        header_cell("Detail"),
        header_cell("Path"),
    ]);
    apply_table_style(&mut table);
    for eeg in &listing.eegs {
        table.add_row(vec![
            Cell::new("EEG").fg(Color::Blue).add_attribute(Attribute::Bold),
            timestamp_cell(eeg.start),
            timestamp_cell(eeg.end),
            Cell::new(&eeg.exam_number),
            Cell::new(eeg.path.display()),
        ]);
    }
    for video in &listing.videos {
        let detail = if video.clipped {
            Cell::new("clipped").fg(Color::Yellow)
        } else {
            dim_cell("full")
        };
        table.add_row(vec![
            Cell::new("VIDEO")
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
            timestamp_cell(video.start),
            timestamp_cell(video.end),
            detail,
            Cell::new(video.path.display()),
        ]);
    }
    println!("{table}");
    println!(
        "{} EEG, {} video",
        listing.eegs.len(),
        listing.videos.len()
    );
}

pub fn describe_window(window: &TimeWindow) -> String {
    let bound = |value: Option<NaiveDateTime>| {
        value.map_or_else(|| "*".to_string(), |ts| ts.format(TIMESTAMP_FORMAT).to_string())
    };
    format!("[{}, {}]", bound(window.after), bound(window.before))
}

fn timestamp_cell(value: NaiveDateTime) -> Cell {
    Cell::new(value.format(TIMESTAMP_FORMAT))
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(160);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
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

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

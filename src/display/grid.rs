//! Preview of a parsed grid before any column is mapped

use tabled::builder::Builder;
use tabled::settings::Style;

use crate::import::RawGrid;

/// Render the first `rows` rows of a grid with column numbers on top
pub fn format_grid_preview(grid: &RawGrid, rows: usize) -> String {
    if grid.is_empty() {
        return "Empty file.\n".to_string();
    }

    let width = grid.width();
    let mut builder = Builder::default();
    builder.push_record((1..=width).map(|i| format!("#{}", i)));
    for row in grid.rows().iter().take(rows) {
        let mut record: Vec<String> = row.iter().map(|c| c.as_text().into_owned()).collect();
        record.resize(width, String::new());
        builder.push_record(record);
    }

    let mut table = builder.build();
    table.with(Style::psql());

    let mut output = format!("{}\n", table);
    if grid.len() > rows {
        output.push_str(&format!("... {} more rows\n", grid.len() - rows));
    }
    output
}

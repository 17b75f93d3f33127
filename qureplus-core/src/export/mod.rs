pub mod csv;

pub use csv::{CsvExport, export_filename, render_summary_csv};

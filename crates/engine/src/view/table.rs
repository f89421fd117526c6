//! Record table model and its HTML rendering.

use stackwatch_types::Record;
use stackwatch_util::date_handling::parse_server_timestamp;
use stackwatch_util::{PLACEHOLDER, escape_html};

use crate::locale::Localizer;

/// Display strings for one record. Values are raw text; escaping happens
/// when the row is rendered as markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordRow {
    pub id: String,
    pub name: String,
    pub value: String,
    pub created_at: String,
}

impl RecordRow {
    pub fn from_record(record: &Record, localizer: &dyn Localizer) -> Self {
        let value = record
            .value
            .as_deref()
            .filter(|value| !value.is_empty())
            .unwrap_or(PLACEHOLDER)
            .to_string();
        let created_at = record
            .created_at
            .as_deref()
            .and_then(parse_server_timestamp)
            .map(|timestamp| localizer.format_timestamp(&timestamp))
            .unwrap_or_else(|| PLACEHOLDER.to_string());

        Self {
            id: record.id.to_string(),
            name: record.name.clone(),
            value,
            created_at,
        }
    }

    pub fn cells(&self) -> [&str; 4] {
        [&self.id, &self.name, &self.value, &self.created_at]
    }
}

/// Rows of the data table. An empty table renders a single "no data" row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordTable {
    rows: Vec<RecordRow>,
}

impl RecordTable {
    pub const COLUMNS: [&'static str; 4] = ["ID", "Name", "Value", "Created"];

    pub fn from_records(records: Option<&[Record]>, localizer: &dyn Localizer) -> Self {
        let rows = records
            .unwrap_or_default()
            .iter()
            .map(|record| RecordRow::from_record(record, localizer))
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[RecordRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `<tr>` elements for the table body, every cell escaped.
    pub fn to_html(&self, no_data: &str) -> String {
        if self.rows.is_empty() {
            return format!(r#"<tr><td colspan="4" class="text-center">{}</td></tr>"#, escape_html(no_data));
        }
        self.rows
            .iter()
            .map(|row| {
                let cells: String = row.cells().iter().map(|cell| format!("<td>{}</td>", escape_html(cell))).collect();
                format!("<tr>{cells}</tr>")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

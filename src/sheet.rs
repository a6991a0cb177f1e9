//! Delimited-table codec for the attendance table and export artifacts.

use std::fs;
use std::io;
use std::path::Path;

/// A named table: one header row plus data rows.
#[derive(Debug, Clone)]
pub struct Sheet {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            name: name.into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Serialize header plus rows, one record per line.
    pub fn to_csv(&self) -> String {
        let mut output = String::new();

        output.push_str(&join_fields(&self.columns));
        output.push('\n');

        for row in &self.rows {
            output.push_str(&join_fields(row));
            output.push('\n');
        }

        output
    }

    pub fn write(&self, path: &Path) -> io::Result<()> {
        fs::write(path, self.to_csv())
    }
}

/// Escape one field (handle commas, quotes, newlines).
pub fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn join_fields(fields: &[String]) -> String {
    fields
        .iter()
        .map(|f| escape_field(f))
        .collect::<Vec<_>>()
        .join(",")
}

/// Split one record line into fields, honoring doubled-quote escaping.
pub fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut field));
            }
            _ => field.push(c),
        }
    }
    fields.push(field);

    fields
}

/// An ordered collection of sheets serialized into one multi-section text
/// artifact. Each section starts with a `# <name>` heading.
#[derive(Debug, Default)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_sheet(&mut self, sheet: Sheet) {
        self.sheets.push(sheet);
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    pub fn write(&self, path: &Path) -> io::Result<()> {
        let mut output = String::new();

        for sheet in &self.sheets {
            output.push_str(&format!("# {}\n", sheet.name));
            output.push_str(&sheet.to_csv());
            output.push('\n');
        }

        fs::write(path, output)
    }
}

//! Column-aligned table rendering for ledger listings.

/// Describes how a column aligns its contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
}

/// Specifies a single column of the rendered table.
#[derive(Clone, Debug)]
pub struct TableColumn {
    pub header: &'static str,
    pub alignment: Alignment,
}

/// A table with column metadata and rows of cell text.
pub struct Table {
    columns: Vec<TableColumn>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<TableColumn>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn compute_widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let mut width = column.header.chars().count();
                for row in &self.rows {
                    if let Some(cell) = row.get(idx) {
                        width = width.max(cell.chars().count());
                    }
                }
                width
            })
            .collect()
    }

    fn render_row(&self, row: &[String], widths: &[usize]) -> String {
        let cells: Vec<String> = self
            .columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let cell = row.get(idx).map(String::as_str).unwrap_or("");
                match column.alignment {
                    Alignment::Left => format!("{cell:<width$}", width = widths[idx]),
                    Alignment::Right => format!("{cell:>width$}", width = widths[idx]),
                }
            })
            .collect();
        cells.join("  ").trim_end().to_string()
    }

    /// Renders headers, a dashed rule, and every row.
    pub fn render(&self) -> String {
        let widths = self.compute_widths();
        let headers: Vec<String> = self
            .columns
            .iter()
            .map(|column| column.header.to_string())
            .collect();

        let mut out = String::new();
        out.push_str(&self.render_row(&headers, &widths));
        out.push('\n');
        let rule_len = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        out.push_str(&"-".repeat(rule_len));
        for row in &self.rows {
            out.push('\n');
            out.push_str(&self.render_row(row, &widths));
        }
        out
    }
}

//! Tab-separated dumps of the printable area

use std::io::{self, Write};

use crate::sheet::{CellView, Sheet};

impl Sheet {
    /// Write every printable cell's value, tab-separated, one line per row.
    /// Absent cells print as empty fields.
    pub fn print_values<W: Write>(&self, writer: W) -> io::Result<()> {
        self.print_cells(writer, |cell| cell.value().to_string())
    }

    /// Write every printable cell's raw text, tab-separated, one line per row
    pub fn print_texts<W: Write>(&self, writer: W) -> io::Result<()> {
        self.print_cells(writer, |cell| cell.text())
    }

    fn print_cells<W, F>(&self, mut writer: W, render: F) -> io::Result<()>
    where
        W: Write,
        F: Fn(&CellView<'_>) -> String,
    {
        for row in self.rows() {
            for (col, cell) in row.iter().enumerate() {
                if col > 0 {
                    writer.write_all(b"\t")?;
                }
                if let Some(cell) = cell {
                    writer.write_all(render(cell).as_bytes())?;
                }
            }
            writer.write_all(b"\n")?;
        }
        writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tabula_core::Position;

    fn render(sheet: &Sheet, values: bool) -> String {
        let mut out = Vec::new();
        if values {
            sheet.print_values(&mut out).unwrap();
        } else {
            sheet.print_texts(&mut out).unwrap();
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_empty_sheet_prints_nothing() {
        let sheet = Sheet::new();
        assert_eq!(render(&sheet, true), "");
        assert_eq!(render(&sheet, false), "");
    }

    #[test]
    fn test_values_and_texts() {
        let mut sheet = Sheet::new();
        sheet.set_cell(Position::new(0, 0), "=(1+2)*3").unwrap();
        sheet.set_cell(Position::new(0, 2), "'=escaped").unwrap();
        sheet.set_cell(Position::new(1, 1), "=1/0").unwrap();

        assert_eq!(render(&sheet, true), "9\t\t=escaped\n\t#DIV/0!\t\n");
        assert_eq!(render(&sheet, false), "=(1+2)*3\t\t'=escaped\n\t=1/0\t\n");
    }

    #[test]
    fn test_placeholders_print_empty() {
        let mut sheet = Sheet::new();
        sheet.set_cell(Position::new(1, 1), "=A1").unwrap();
        assert_eq!(render(&sheet, true), "\t\n\t0\n");
    }
}

use crate::aggregate::ResultTable;
use crate::error::Result;
use crate::landscape::Landscape;

use chrono::Local;
use csv::WriterBuilder;
use std::{
    fmt::Write as _,
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

/// Writes the table as `X,Y,Count` rows, most sampled first, into a
/// timestamped file under `output_dir` (current directory when `None`).
pub fn export_to_csv_with_path(table: &ResultTable, output_dir: Option<&Path>) -> Result<PathBuf> {
    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
    let filename = format!("samples_{timestamp}.csv");

    let file_path = if let Some(dir) = output_dir {
        std::fs::create_dir_all(dir)?;
        dir.join(&filename)
    } else {
        filename.into()
    };

    let file = File::create(&file_path)?;
    let mut wtr = WriterBuilder::new().from_writer(BufWriter::new(file));

    wtr.write_record(["X", "Y", "Count"])?;
    let mut rows: Vec<((usize, usize), u64)> = table.iter().collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    for ((x, y), count) in rows {
        wtr.write_record([x.to_string(), y.to_string(), count.to_string()])?;
    }

    wtr.flush()?;
    Ok(file_path)
}

/// Formats a grid with two-character cells, one row per line.
pub fn render_grid<T: std::fmt::Display>(rows: &[Vec<T>]) -> String {
    let mut out = String::new();
    for row in rows {
        let line = row
            .iter()
            .map(|v| format!("{v:>2}"))
            .collect::<Vec<_>>()
            .join(" ");
        let _ = writeln!(out, "{line}");
    }
    out
}

/// Landscape and sample counts, one above the other
pub fn render_report(landscape: &Landscape, table: &ResultTable) -> String {
    format!(
        "Landscape:\n{}\nSamples:\n{}",
        render_grid(landscape.rows()),
        render_grid(&table.grid())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{Sample, interpret_samples};
    use crate::variables::VariableLayout;
    use tempfile::TempDir;

    fn table() -> ResultTable {
        let layout = VariableLayout::new(2);
        let samples = vec![
            Sample::new(vec![true, false], 3),
            Sample::new(vec![false, true], 8),
        ];
        interpret_samples(layout, &samples)
    }

    #[test]
    fn test_csv_content_format() {
        let temp_dir = TempDir::new().unwrap();
        let path = export_to_csv_with_path(&table(), Some(temp_dir.path())).unwrap();

        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("samples_"));
        assert!(name.ends_with(".csv"));

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines, vec!["X,Y,Count", "0,1,8", "1,0,3"]);
    }

    #[test]
    fn test_export_empty_table() {
        let temp_dir = TempDir::new().unwrap();
        let empty = interpret_samples(VariableLayout::new(3), std::iter::empty::<&Sample>());
        let path = export_to_csv_with_path(&empty, Some(temp_dir.path())).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "X,Y,Count\n");
    }

    #[test]
    fn test_export_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        let path = export_to_csv_with_path(&table(), Some(&nested)).unwrap();
        assert!(path.starts_with(&nested));
        assert!(path.exists());
    }

    #[test]
    fn test_render_grid() {
        let rendered = render_grid(&[vec![4, 12], vec![0, 3]]);
        assert_eq!(rendered, " 4 12\n 0  3\n");
    }

    #[test]
    fn test_render_report() {
        let land = Landscape::new(vec![vec![1, 2], vec![3, 4]]).unwrap();
        let report = render_report(&land, &table());
        assert_eq!(report, "Landscape:\n 1  2\n 3  4\n\nSamples:\n 0  8\n 3  0\n");
    }
}

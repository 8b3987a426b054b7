use crate::args::InputArgs;
use crate::types::InputFormat;
use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;
use termtable_data::TableData;

/// Read the table named by `args`: a file path, or stdin for `-` / no path.
pub fn read_table(args: &InputArgs) -> Result<TableData> {
    let path = args.file.as_deref().filter(|p| *p != Path::new("-"));

    let content = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    let format = args
        .input
        .or_else(|| path.map(InputFormat::from_path))
        .unwrap_or_else(|| InputFormat::sniff(&content));

    let source = path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "stdin".to_string());
    parse_table(&content, format, !args.no_header_row)
        .with_context(|| format!("Failed to parse {} as {}", source, format))
}

pub fn parse_table(content: &str, format: InputFormat, has_headers: bool) -> Result<TableData> {
    let data = match format {
        InputFormat::Csv => TableData::from_csv(content, has_headers)?,
        InputFormat::Json => TableData::from_json(content)?,
    };
    tracing::debug!(
        %format,
        rows = data.row_count(),
        columns = data.column_count(),
        "parsed input"
    );
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_parse_csv_with_and_without_headers() {
        let data = parse_table("name,age\nAlice,30\n", InputFormat::Csv, true).unwrap();
        assert_eq!(data.headers(), ["name", "age"]);
        assert_eq!(data.row_count(), 1);

        let data = parse_table("name,age\nAlice,30\n", InputFormat::Csv, false).unwrap();
        assert_eq!(data.headers(), ["Column 1", "Column 2"]);
        assert_eq!(data.row_count(), 2);
    }

    #[test]
    fn test_parse_json_rejects_non_array() {
        assert!(parse_table("{\"a\": 1}", InputFormat::Json, true).is_err());
    }

    #[test]
    fn test_read_table_uses_extension() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("users.json");
        std::fs::write(&path, r#"[{"name": "Alice"}, {"name": "Bob"}]"#)?;

        let data = read_table(&InputArgs {
            file: Some(path),
            ..Default::default()
        })?;
        assert_eq!(data.headers(), ["name"]);
        assert_eq!(data.row_count(), 2);
        Ok(())
    }

    #[test]
    fn test_explicit_format_overrides_extension() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("users.txt");
        std::fs::write(&path, r#"[{"name": "Alice"}]"#)?;

        let data = read_table(&InputArgs {
            file: Some(path),
            input: Some(InputFormat::Json),
            no_header_row: false,
        })?;
        assert_eq!(data.headers(), ["name"]);
        Ok(())
    }

    #[test]
    fn test_missing_file_names_the_path() {
        let err = read_table(&InputArgs {
            file: Some(PathBuf::from("/nonexistent/table.csv")),
            ..Default::default()
        })
        .unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/table.csv"));
    }
}

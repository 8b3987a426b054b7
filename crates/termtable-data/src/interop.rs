use crate::error::{Error, Result};
use crate::table::TableData;
use crate::value::CellValue;
use serde_json::{Map, Value};
use std::io::Read;

impl TableData {
    /// Rows as plain vectors, optionally preceded by the header row.
    pub fn to_array(&self, include_headers: bool) -> Vec<Vec<CellValue>> {
        let mut out = Vec::with_capacity(self.row_count() + 1);
        if include_headers {
            out.push(self.headers().iter().map(CellValue::from).collect());
        }
        out.extend(self.rows().iter().cloned());
        out
    }

    /// Each row as an ordered `header -> value` map. Duplicate headers keep
    /// the last value.
    pub fn to_associative_array(&self) -> Vec<Map<String, Value>> {
        self.rows()
            .iter()
            .map(|row| {
                self.headers()
                    .iter()
                    .zip(row)
                    .map(|(h, v)| (h.clone(), v.to_json_value()))
                    .collect()
            })
            .collect()
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let records = Value::Array(
            self.to_associative_array()
                .into_iter()
                .map(Value::Object)
                .collect(),
        );
        let json = if pretty {
            serde_json::to_string_pretty(&records)?
        } else {
            serde_json::to_string(&records)?
        };
        Ok(json)
    }

    pub fn to_csv(&self, include_headers: bool) -> Result<String> {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        if include_headers {
            writer.write_record(self.headers())?;
        }
        for row in self.rows() {
            writer.write_record(row.iter().map(|v| v.to_string()))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|err| Error::Io(std::io::Error::other(err.to_string())))?;
        String::from_utf8(bytes).map_err(|err| Error::Format(err.to_string()))
    }

    /// First row is the header row.
    pub fn from_array(rows: Vec<Vec<CellValue>>) -> Self {
        let mut rows = rows.into_iter();
        let headers: Vec<String> = rows
            .next()
            .map(|h| h.iter().map(|v| v.to_string()).collect())
            .unwrap_or_default();
        Self::new(headers, rows.collect())
    }

    /// Parse a JSON array of objects. Headers are the union of object keys in
    /// first-seen order; keys missing from a record become empty cells.
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        let Value::Array(items) = value else {
            return Err(Error::Format(
                "expected a JSON array of objects".to_string(),
            ));
        };

        let mut records = Vec::with_capacity(items.len());
        for (i, item) in items.into_iter().enumerate() {
            match item {
                Value::Object(map) => records.push(map),
                other => {
                    return Err(Error::Format(format!(
                        "record {} is not an object (found {})",
                        i,
                        json_kind(&other)
                    )));
                }
            }
        }

        let mut headers: Vec<String> = Vec::new();
        for record in &records {
            for key in record.keys() {
                if !headers.contains(key) {
                    headers.push(key.clone());
                }
            }
        }

        let rows = records
            .into_iter()
            .map(|mut record| {
                headers
                    .iter()
                    .map(|h| {
                        record
                            .remove(h)
                            .map(CellValue::from)
                            .unwrap_or_else(|| CellValue::Str(String::new()))
                    })
                    .collect()
            })
            .collect();

        Ok(Self::new(headers, rows))
    }

    pub fn from_csv(text: &str, has_headers: bool) -> Result<Self> {
        Self::from_csv_reader(text.as_bytes(), has_headers)
    }

    /// Without a header row, headers are named `Column 1..n`.
    pub fn from_csv_reader<R: Read>(reader: R, has_headers: bool) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut records: Vec<Vec<String>> = Vec::new();
        for record in reader.records() {
            let record = record?;
            records.push(record.iter().map(str::to_string).collect());
        }

        let mut records = records.into_iter();
        let headers = if has_headers {
            records.next().unwrap_or_default()
        } else {
            Vec::new()
        };
        let rows: Vec<Vec<CellValue>> = records
            .map(|r| r.into_iter().map(CellValue::Str).collect())
            .collect();

        let headers = if has_headers {
            headers
        } else {
            let width = rows.iter().map(Vec::len).max().unwrap_or(0);
            (1..=width).map(|i| format!("Column {}", i)).collect()
        };

        Ok(Self::new(headers, rows))
    }

    pub fn from_json_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::from_json(&text)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users() -> TableData {
        TableData::new(
            ["name", "note"],
            vec![
                vec!["Alice".into(), "likes \"quotes\"".into()],
                vec!["Bob".into(), "a,b".into()],
                vec!["Carol".into(), "multi\nline".into()],
            ],
        )
    }

    #[test]
    fn test_csv_quotes_special_fields() {
        let csv = users().to_csv(true).unwrap();
        let expected = "name,note\nAlice,\"likes \"\"quotes\"\"\"\nBob,\"a,b\"\nCarol,\"multi\nline\"\n";
        assert_eq!(csv, expected);
    }

    #[test]
    fn test_csv_round_trip() {
        let data = users();
        let parsed = TableData::from_csv(&data.to_csv(true).unwrap(), true).unwrap();
        assert_eq!(parsed.headers(), data.headers());
        assert_eq!(parsed.rows(), data.rows());
    }

    #[test]
    fn test_csv_without_headers_names_columns() {
        let parsed = TableData::from_csv("1,2,3\n4,5\n", false).unwrap();
        assert_eq!(parsed.headers(), &["Column 1", "Column 2", "Column 3"]);
        assert_eq!(parsed.row_count(), 2);
        assert_eq!(parsed.row(1)[2], CellValue::from(""));
    }

    #[test]
    fn test_json_union_of_keys() {
        let data = TableData::from_json(r#"[{"a": 1, "b": "x"}, {"c": true, "a": 2.5}]"#).unwrap();
        assert_eq!(data.headers(), &["a", "b", "c"]);
        assert_eq!(data.row(1), &[CellValue::Float(2.5), "".into(), CellValue::Bool(true)]);
    }

    #[test]
    fn test_json_output_keeps_header_order() {
        let data = TableData::new(
            ["zeta", "alpha"],
            vec![vec![CellValue::Int(1), "x".into()]],
        );
        assert_eq!(data.to_json(false).unwrap(), r#"[{"zeta":1,"alpha":"x"}]"#);
    }

    #[test]
    fn test_malformed_json_is_format_error() {
        let err = TableData::from_json("[{\"a\": 1,").unwrap_err();
        assert!(err.is_format());

        let err = TableData::from_json("{\"a\": 1}").unwrap_err();
        assert!(matches!(err, Error::Format(_)));

        let err = TableData::from_json("[1, 2]").unwrap_err();
        assert!(err.to_string().contains("record 0 is not an object"));
    }

    #[test]
    fn test_from_array_uses_first_row_as_headers() {
        let data = TableData::from_array(vec![
            vec!["id".into(), "name".into()],
            vec![CellValue::Int(1), "Ann".into()],
        ]);
        assert_eq!(data.headers(), &["id", "name"]);
        assert_eq!(data.to_array(true).len(), 2);
        assert_eq!(data.to_array(false)[0][1], CellValue::from("Ann"));
    }
}

use crate::stats::ColumnStats;
use crate::value::{CellValue, ColumnType};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Headers plus rows, every row normalized to the header count.
///
/// Operations that look like mutations (`filter_rows`, `sort_by_column`,
/// `add_row`, ...) return a new `TableData` and leave `self` untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct TableData {
    headers: Vec<String>,
    rows: Vec<Vec<CellValue>>,
    column_types: Vec<ColumnType>,
}

impl Default for TableData {
    fn default() -> Self {
        Self::new(Vec::<String>::new(), Vec::new())
    }
}

impl TableData {
    pub fn new<H, S>(headers: H, rows: Vec<Vec<CellValue>>) -> Self
    where
        H: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        let width = headers.len();
        let rows: Vec<Vec<CellValue>> = rows
            .into_iter()
            .map(|row| normalize_row(row, width))
            .collect();
        let column_types = (0..width)
            .map(|i| ColumnType::infer(rows.iter().map(|row| &row[i])))
            .collect();

        Self {
            headers,
            rows,
            column_types,
        }
    }

    fn with_rows(&self, rows: Vec<Vec<CellValue>>) -> Self {
        Self::new(self.headers.clone(), rows)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the first header equal to `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn column_values(&self, index: usize) -> Vec<&CellValue> {
        if index >= self.column_count() {
            return Vec::new();
        }
        self.rows.iter().map(|row| &row[index]).collect()
    }

    /// Inferred type; out-of-range indices read as `String`.
    pub fn column_type(&self, index: usize) -> ColumnType {
        self.column_types
            .get(index)
            .copied()
            .unwrap_or(ColumnType::String)
    }

    pub fn column_types(&self) -> &[ColumnType] {
        &self.column_types
    }

    pub fn column_statistics(&self, index: usize) -> ColumnStats {
        ColumnStats::compute(&self.column_values(index), self.column_type(index))
    }

    pub fn cell_value(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    pub fn row(&self, index: usize) -> &[CellValue] {
        self.rows.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn filter_rows<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&[CellValue]) -> bool,
    {
        let rows = self
            .rows
            .iter()
            .filter(|row| predicate(row))
            .cloned()
            .collect();
        self.with_rows(rows)
    }

    /// Stable sort. Numeric columns compare numerically (empty values first),
    /// everything else compares the display strings.
    pub fn sort_by_column(&self, index: usize, ascending: bool) -> Self {
        if index >= self.column_count() {
            return self.clone();
        }

        let numeric = self.column_type(index).is_numeric();
        let mut rows = self.rows.clone();
        rows.sort_by(|a, b| {
            let ordering = if numeric {
                compare_numeric(&a[index], &b[index])
            } else {
                a[index].to_string().cmp(&b[index].to_string())
            };
            if ascending { ordering } else { ordering.reverse() }
        });
        self.with_rows(rows)
    }

    pub fn limit(&self, count: usize, offset: usize) -> Self {
        let rows = self.rows.iter().skip(offset).take(count).cloned().collect();
        self.with_rows(rows)
    }

    pub fn add_row(&self, values: Vec<CellValue>) -> Self {
        let mut rows = self.rows.clone();
        rows.push(values);
        self.with_rows(rows)
    }

    /// Out-of-range indices return an unchanged copy.
    pub fn remove_row(&self, index: usize) -> Self {
        let mut rows = self.rows.clone();
        if index < rows.len() {
            rows.remove(index);
        }
        self.with_rows(rows)
    }

    /// Map every row; results are re-normalized to the header count.
    pub fn transform<F>(&self, mapper: F) -> Self
    where
        F: FnMut(&[CellValue]) -> Vec<CellValue>,
    {
        let mut mapper = mapper;
        let rows = self.rows.iter().map(|row| mapper(row)).collect();
        self.with_rows(rows)
    }

    /// Project onto the given column indices; unknown indices are skipped.
    pub fn select_columns(&self, indices: &[usize]) -> Self {
        let indices: Vec<usize> = indices
            .iter()
            .copied()
            .filter(|i| *i < self.column_count())
            .collect();
        let headers: Vec<String> = indices.iter().map(|i| self.headers[*i].clone()).collect();
        let rows = self
            .rows
            .iter()
            .map(|row| indices.iter().map(|i| row[*i].clone()).collect())
            .collect();
        Self::new(headers, rows)
    }

    /// Distinct values in first-seen order.
    pub fn unique_values(&self, index: usize) -> Vec<CellValue> {
        let mut seen = std::collections::HashSet::new();
        self.column_values(index)
            .into_iter()
            .filter(|v| seen.insert(v.to_string()))
            .cloned()
            .collect()
    }

    /// Occurrences of each distinct value, ordered by first appearance.
    pub fn value_counts(&self, index: usize) -> Vec<(String, usize)> {
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut counts: Vec<(String, usize)> = Vec::new();

        for value in self.column_values(index) {
            let key = value.to_string();
            match positions.get(&key) {
                Some(&pos) => counts[pos].1 += 1,
                None => {
                    positions.insert(key.clone(), counts.len());
                    counts.push((key, 1));
                }
            }
        }

        counts
    }
}

fn normalize_row(mut row: Vec<CellValue>, width: usize) -> Vec<CellValue> {
    row.truncate(width);
    row.resize(width, CellValue::Str(String::new()));
    row
}

fn compare_numeric(a: &CellValue, b: &CellValue) -> Ordering {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

use crate::value::{CellValue, ColumnType};
use serde::Serialize;
use std::collections::HashSet;

/// Summary statistics for a single column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnStats {
    pub count: usize,
    pub non_empty: usize,
    pub unique: usize,
    pub column_type: ColumnType,
    /// Only present for numeric columns with at least one value
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub avg: Option<f64>,
}

impl ColumnStats {
    pub fn compute(values: &[&CellValue], column_type: ColumnType) -> Self {
        let non_empty: Vec<&CellValue> = values.iter().copied().filter(|v| !v.is_empty()).collect();
        let unique = non_empty
            .iter()
            .map(|v| v.to_string())
            .collect::<HashSet<_>>()
            .len();

        let (min, max, avg) = if column_type.is_numeric() {
            numeric_summary(non_empty.iter().filter_map(|v| v.as_f64()))
        } else {
            (None, None, None)
        };

        Self {
            count: values.len(),
            non_empty: non_empty.len(),
            unique,
            column_type,
            min,
            max,
            avg,
        }
    }
}

fn numeric_summary(numbers: impl Iterator<Item = f64>) -> (Option<f64>, Option<f64>, Option<f64>) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    let mut n = 0usize;

    for x in numbers {
        min = min.min(x);
        max = max.max(x);
        sum += x;
        n += 1;
    }

    if n == 0 {
        (None, None, None)
    } else {
        (Some(min), Some(max), Some(sum / n as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_stats() {
        let values = [
            CellValue::Int(10),
            CellValue::from(""),
            CellValue::Int(20),
            CellValue::Int(30),
            CellValue::Int(20),
        ];
        let refs: Vec<&CellValue> = values.iter().collect();
        let stats = ColumnStats::compute(&refs, ColumnType::Integer);

        assert_eq!(stats.count, 5);
        assert_eq!(stats.non_empty, 4);
        assert_eq!(stats.unique, 3);
        assert_eq!(stats.min, Some(10.0));
        assert_eq!(stats.max, Some(30.0));
        assert_eq!(stats.avg, Some(20.0));
    }

    #[test]
    fn test_string_stats_have_no_range() {
        let values = [CellValue::from("a"), CellValue::from("b")];
        let refs: Vec<&CellValue> = values.iter().collect();
        let stats = ColumnStats::compute(&refs, ColumnType::String);

        assert_eq!(stats.unique, 2);
        assert!(stats.min.is_none());
        assert!(stats.avg.is_none());
    }
}

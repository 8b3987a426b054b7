//! Column width negotiation.
//!
//! Distributes the horizontal budget left after borders and padding among
//! the visible columns. Fixed widths are honored exactly; every other column
//! stays within `[max(min_width, 3), max_width]`. When the budget cannot hold
//! even the lower bounds, every flexible column drops to its lower bound and
//! the table is allowed to overflow.

use crate::column::{Alignment, Column};
use crate::style::TableStyle;
use crate::text::display_width;
use std::cmp::Reverse;
use termtable_data::TableData;

pub const MIN_COLUMN_WIDTH: usize = 3;
pub const AUTO_MAX_WIDTH: usize = 50;

#[derive(Debug, Clone, Copy)]
struct FlexColumn {
    slot: usize,
    lower: usize,
    ideal: usize,
}

/// Stateless width negotiation service.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnCalculator;

impl ColumnCalculator {
    /// One column per header: numeric columns align right, text columns
    /// left, and long free-text columns are capped at [`AUTO_MAX_WIDTH`].
    pub fn auto_configure_columns(data: &TableData) -> Vec<Column> {
        data.headers()
            .iter()
            .enumerate()
            .map(|(i, header)| {
                let align = if data.column_type(i).is_numeric() {
                    Alignment::Right
                } else {
                    Alignment::Left
                };
                let longest = data
                    .column_values(i)
                    .iter()
                    .map(|v| display_width(&v.to_string()))
                    .max()
                    .unwrap_or(0);

                let column = Column::new(header.as_str()).align(align);
                if longest > AUTO_MAX_WIDTH {
                    column.max_width(AUTO_MAX_WIDTH)
                } else {
                    column
                }
            })
            .collect()
    }

    /// Complete a caller-supplied column list against the data: an empty
    /// list is auto-configured, missing trailing entries get default columns
    /// and extra entries are dropped.
    pub fn resolve_columns(data: &TableData, columns: &[Column]) -> Vec<Column> {
        if columns.is_empty() {
            return Self::auto_configure_columns(data);
        }
        data.headers()
            .iter()
            .enumerate()
            .map(|(i, header)| {
                columns
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| Column::new(header.as_str()))
            })
            .collect()
    }

    pub fn visible_indices(columns: &[Column]) -> Vec<usize> {
        columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.visible)
            .map(|(i, _)| i)
            .collect()
    }

    /// Width of one rendered line for the given content widths.
    pub fn table_width(widths: &[usize], style: &TableStyle) -> usize {
        let n = widths.len();
        widths.iter().sum::<usize>() + style.border_width(n) + n * style.total_padding()
    }

    /// Lower bound of each column; the layout for budgets too small to
    /// negotiate.
    pub fn calculate_responsive_widths(columns: &[&Column]) -> Vec<usize> {
        columns.iter().map(|c| lower_bound(c)).collect()
    }

    /// One content width per visible column, in column order.
    pub fn calculate_widths(
        data: &TableData,
        columns: &[Column],
        max_width: usize,
        style: &TableStyle,
    ) -> Vec<usize> {
        let columns = Self::resolve_columns(data, columns);
        let visible = Self::visible_indices(&columns);
        let n = visible.len();
        if n == 0 {
            return Vec::new();
        }

        let overhead = style.border_width(n) + n * style.total_padding();
        let mut budget = max_width.saturating_sub(overhead);
        let mut widths = vec![0; n];
        let mut flex = Vec::new();
        let mut flex_columns = Vec::new();

        for (slot, &index) in visible.iter().enumerate() {
            let column = &columns[index];
            if let Some(fixed) = column.width {
                widths[slot] = fixed;
                budget = budget.saturating_sub(fixed);
                continue;
            }

            let lower = lower_bound(column);
            let upper = column.max_width.unwrap_or(usize::MAX).max(lower);
            let values: Vec<String> = data
                .column_values(index)
                .into_iter()
                .map(|v| column.format_value(v))
                .collect();
            let ideal = column.calculate_ideal_width(&values).clamp(lower, upper);

            flex.push(FlexColumn { slot, lower, ideal });
            flex_columns.push(column);
        }

        let sum_ideal: usize = flex.iter().map(|f| f.ideal).sum();
        let sum_lower: usize = flex.iter().map(|f| f.lower).sum();

        let negotiated: Vec<usize> = if sum_ideal <= budget {
            tracing::debug!(mode = "fit", budget, sum_ideal, "column widths");
            flex.iter().map(|f| f.ideal).collect()
        } else if sum_lower > budget {
            tracing::debug!(mode = "responsive", budget, sum_lower, "column widths");
            Self::calculate_responsive_widths(&flex_columns)
        } else {
            tracing::debug!(mode = "proportional", budget, sum_ideal, "column widths");
            shrink_proportionally(&flex, budget)
        };

        for (f, width) in flex.iter().zip(negotiated) {
            widths[f.slot] = width;
        }
        tracing::trace!(?widths, max_width, "negotiated widths");
        widths
    }
}

fn lower_bound(column: &Column) -> usize {
    column
        .min_width
        .unwrap_or(MIN_COLUMN_WIDTH)
        .max(MIN_COLUMN_WIDTH)
}

/// Scale ideals by `budget / sum(ideal)` and settle rounding so the result
/// sums to exactly `budget`. Requires `sum(lower) <= budget < sum(ideal)`.
fn shrink_proportionally(flex: &[FlexColumn], budget: usize) -> Vec<usize> {
    let total: u128 = flex.iter().map(|f| f.ideal as u128).sum();
    let mut widths = Vec::with_capacity(flex.len());
    let mut remainders = Vec::with_capacity(flex.len());

    for f in flex {
        let scaled = f.ideal as u128 * budget as u128;
        widths.push(((scaled / total) as usize).clamp(f.lower, f.ideal));
        remainders.push(scaled % total);
    }

    let assigned: usize = widths.iter().sum();

    if assigned > budget {
        // Lower bounds pushed some columns above their share: take the excess
        // back from whoever has the most room above their own lower bound.
        let mut excess = assigned - budget;
        while excess > 0 {
            let mut donor: Option<usize> = None;
            for (i, f) in flex.iter().enumerate() {
                let slack = widths[i] - f.lower;
                if slack > 0 && donor.is_none_or(|d| slack >= widths[d] - flex[d].lower) {
                    donor = Some(i);
                }
            }
            let Some(d) = donor else { break };
            widths[d] -= 1;
            excess -= 1;
        }
    } else {
        let mut leftover = budget - assigned;
        let mut order: Vec<usize> = (0..flex.len()).collect();
        order.sort_by_key(|&i| Reverse(remainders[i]));

        while leftover > 0 {
            let mut progressed = false;
            for &i in &order {
                if leftover == 0 {
                    break;
                }
                if widths[i] < flex[i].ideal {
                    widths[i] += 1;
                    leftover -= 1;
                    progressed = true;
                }
            }
            if !progressed {
                break;
            }
        }
    }

    widths
}

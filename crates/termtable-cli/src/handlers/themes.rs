use crate::terminal::Environment;
use anyhow::Result;
use termtable_data::{CellValue, TableData};
use termtable_engine::{SAMPLE_DATA, TableBuilder, TableStyle, TableTheme};

pub fn handle(env: &Environment) -> Result<()> {
    let width = env.width_or_default();
    println!("{}", theme_list(width));

    // Without color every theme looks the same, so previews are skipped.
    if env.color {
        for name in TableTheme::preset_names() {
            if let Some(theme) = TableTheme::from_name(name) {
                println!();
                println!("{}", preview(theme, width));
            }
        }
    }
    Ok(())
}

pub fn theme_list(width: usize) -> String {
    let rows = TableTheme::preset_names()
        .iter()
        .filter_map(|name| TableTheme::from_name(name))
        .map(|theme| {
            vec![
                CellValue::from(theme.name.as_str()),
                CellValue::Bool(theme.use_alternating_rows),
                CellValue::from(theme.status_colors.len()),
            ]
        })
        .collect();
    TableBuilder::from_data(TableData::new(
        ["Theme", "Alternating rows", "Status colors"],
        rows,
    ))
    .style(TableStyle::simple())
    .max_width(width)
    .build()
}

fn preview(theme: TableTheme, width: usize) -> String {
    let title = theme.name.clone();
    TableBuilder::from_data(SAMPLE_DATA.clone())
        .theme(theme)
        .title(title)
        .max_width(width)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_list_names_every_preset() {
        let out = theme_list(80);
        for name in TableTheme::preset_names() {
            assert!(out.contains(&format!("| {name} ")), "missing {name}");
        }
        assert!(!out.contains('\x1b'));
    }

    #[test]
    fn test_preview_is_colored() {
        let out = preview(TableTheme::ocean(), 80);
        assert!(out.contains('\x1b'));
        assert!(out.contains("Alice"));
    }
}

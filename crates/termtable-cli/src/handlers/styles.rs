use crate::terminal::Environment;
use anyhow::Result;
use owo_colors::OwoColorize;
use termtable_engine::{SAMPLE_DATA, TableStyle, render_table};

pub fn handle(env: &Environment) -> Result<()> {
    println!("{}", preview(env.color, env.width_or_default()));
    Ok(())
}

/// Every style preset rendering the sample table, separated by blank lines.
pub fn preview(color: bool, width: usize) -> String {
    TableStyle::preset_names()
        .iter()
        .filter_map(|name| TableStyle::from_name(name).map(|style| (name, style)))
        .map(|(name, style)| {
            let heading = if color {
                name.bold().to_string()
            } else {
                name.to_string()
            };
            format!("{}\n{}", heading, render_table(&SAMPLE_DATA, &style, width))
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

use crate::args::RenderArgs;
use crate::input;
use crate::terminal::{Environment, FALLBACK_WIDTH};
use anyhow::{Context, Result, bail};
use termtable_data::TableData;
use termtable_engine::{TableBuilder, TableConfig};

pub fn handle(args: &RenderArgs, config: &TableConfig, env: &Environment) -> Result<()> {
    let data = input::read_table(&args.input)?;
    let output = render_to_string(data, args, config, env.color, env.width)?;
    println!("{}", output);
    Ok(())
}

/// Render `data` with the config file settings, overridden by the flags in
/// `args`. Width falls back from `--width` to the config file, then to
/// `terminal_width`, then to 80. Themes are dropped when `color` is false.
pub fn render_to_string(
    data: TableData,
    args: &RenderArgs,
    config: &TableConfig,
    color: bool,
    terminal_width: Option<usize>,
) -> Result<String> {
    let data = select_columns(data, &args.columns)?;
    let config = layer_flags(config, args, terminal_width);

    let mut builder = config
        .apply(TableBuilder::from_data(data))
        .context("Invalid table configuration")?;

    if !color {
        builder = builder.no_theme();
    }

    if let Some(name) = &args.sort {
        let index = column_index(builder.data(), name)?;
        builder = builder.sort_by(index, !args.desc);
    }

    if args.limit.is_some() || args.offset > 0 {
        builder = builder.limit(args.limit.unwrap_or(usize::MAX), args.offset);
    }

    Ok(builder.build())
}

fn layer_flags(config: &TableConfig, args: &RenderArgs, terminal_width: Option<usize>) -> TableConfig {
    let mut config = config.clone();
    if let Some(style) = &args.style {
        config.style = style.clone();
    }
    if let Some(theme) = &args.theme {
        config.theme = Some(theme.clone());
    }
    if let Some(title) = &args.title {
        config.title = Some(title.clone());
    }
    config.ascii |= args.ascii;
    if args.no_headers {
        config.show_headers = false;
    }
    config.max_width = Some(
        args.width
            .or(config.max_width)
            .or(terminal_width)
            .unwrap_or(FALLBACK_WIDTH),
    );
    config
}

fn column_index(data: &TableData, name: &str) -> Result<usize> {
    match data.column_index(name) {
        Some(index) => Ok(index),
        None => bail!(
            "unknown column '{}' (available: {})",
            name,
            data.headers().join(", ")
        ),
    }
}

fn select_columns(data: TableData, names: &[String]) -> Result<TableData> {
    if names.is_empty() {
        return Ok(data);
    }
    let indices = names
        .iter()
        .map(|name| column_index(&data, name.trim()))
        .collect::<Result<Vec<_>>>()?;
    Ok(data.select_columns(&indices))
}

#[cfg(test)]
mod tests {
    use super::*;
    use termtable_data::CellValue;

    fn scores() -> TableData {
        TableData::new(
            ["Name", "Score", "Team"],
            vec![
                vec!["Alice".into(), CellValue::Int(92), "red".into()],
                vec!["Bob".into(), CellValue::Int(78), "blue".into()],
                vec!["Cara".into(), CellValue::Int(85), "red".into()],
            ],
        )
    }

    fn simple() -> RenderArgs {
        RenderArgs {
            style: Some("simple".to_string()),
            width: Some(40),
            ..Default::default()
        }
    }

    #[test]
    fn test_flags_override_config() {
        let config = TableConfig::from_toml_str("style = \"markdown\"\ntitle = \"Scores\"").unwrap();
        let out = render_to_string(scores(), &simple(), &config, false, None).unwrap();
        assert!(out.starts_with("         Scores\n+"), "{out}");
    }

    #[test]
    fn test_column_selection_and_order() {
        let args = RenderArgs {
            columns: vec!["Team".to_string(), "Name".to_string()],
            ..simple()
        };
        let out = render_to_string(scores(), &args, &TableConfig::default(), false, None).unwrap();
        assert!(out.contains("| Team | Name  |"), "{out}");
        assert!(!out.contains("Score"));
    }

    #[test]
    fn test_unknown_column_is_an_error() {
        let args = RenderArgs {
            sort: Some("Rank".to_string()),
            ..simple()
        };
        let err = render_to_string(scores(), &args, &TableConfig::default(), false, None).unwrap_err();
        assert!(err.to_string().contains("unknown column 'Rank'"));
    }

    #[test]
    fn test_sort_desc_with_limit() {
        let args = RenderArgs {
            sort: Some("Score".to_string()),
            desc: true,
            limit: Some(2),
            ..simple()
        };
        let out = render_to_string(scores(), &args, &TableConfig::default(), false, None).unwrap();
        let alice = out.find("Alice").unwrap();
        let cara = out.find("Cara").unwrap();
        assert!(alice < cara);
        assert!(!out.contains("Bob"));
    }

    #[test]
    fn test_offset_without_limit() {
        let args = RenderArgs {
            offset: 2,
            ..simple()
        };
        let out = render_to_string(scores(), &args, &TableConfig::default(), false, None).unwrap();
        assert!(out.contains("Cara"));
        assert!(!out.contains("Alice"));
    }

    #[test]
    fn test_width_precedence() {
        let config = TableConfig::from_toml_str("max_width = 50").unwrap();
        let args = RenderArgs::default();
        assert_eq!(layer_flags(&config, &args, Some(120)).max_width, Some(50));
        assert_eq!(layer_flags(&TableConfig::default(), &args, Some(120)).max_width, Some(120));
        assert_eq!(layer_flags(&TableConfig::default(), &args, None).max_width, Some(80));

        let args = RenderArgs { width: Some(30), ..Default::default() };
        assert_eq!(layer_flags(&config, &args, Some(120)).max_width, Some(30));
    }

    #[test]
    fn test_theme_dropped_without_color() {
        let args = RenderArgs {
            theme: Some("colorful".to_string()),
            ..simple()
        };
        let plain = render_to_string(scores(), &args, &TableConfig::default(), false, None).unwrap();
        assert!(!plain.contains('\x1b'));

        let colored = render_to_string(scores(), &args, &TableConfig::default(), true, None).unwrap();
        assert!(colored.contains('\x1b'));
    }

    #[test]
    fn test_unknown_style_is_an_error() {
        let args = RenderArgs {
            style: Some("wavy".to_string()),
            ..Default::default()
        };
        assert!(render_to_string(scores(), &args, &TableConfig::default(), false, None).is_err());
    }
}

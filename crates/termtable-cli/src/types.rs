use clap::ValueEnum;
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum InputFormat {
    Csv,
    Json,
}

impl InputFormat {
    /// `.json` files are JSON; everything else is treated as CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => InputFormat::Json,
            _ => InputFormat::Csv,
        }
    }

    /// Guess from content: a leading `[` means JSON.
    pub fn sniff(content: &str) -> Self {
        if content.trim_start().starts_with('[') {
            InputFormat::Json
        } else {
            InputFormat::Csv
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputFormat::Csv => write!(f, "csv"),
            InputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum ConvertFormat {
    Csv,
    Json,
}

impl fmt::Display for ConvertFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertFormat::Csv => write!(f, "csv"),
            ConvertFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_format_from_path() {
        assert_eq!(InputFormat::from_path(Path::new("data.JSON")), InputFormat::Json);
        assert_eq!(InputFormat::from_path(Path::new("data.csv")), InputFormat::Csv);
        assert_eq!(InputFormat::from_path(Path::new("data")), InputFormat::Csv);
    }

    #[test]
    fn test_input_format_sniff() {
        assert_eq!(InputFormat::sniff("  \n[{\"a\": 1}]"), InputFormat::Json);
        assert_eq!(InputFormat::sniff("a,b\n1,2"), InputFormat::Csv);
    }
}

use is_terminal::IsTerminal;
use terminal_size::{Width, terminal_size};

pub const FALLBACK_WIDTH: usize = 80;

/// What the output sink supports, detected once per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Environment {
    pub color: bool,
    pub width: Option<usize>,
}

impl Environment {
    pub fn detect(no_color: bool) -> Self {
        let stdout_tty = std::io::stdout().is_terminal();
        Self {
            color: !no_color && stdout_tty && !no_color_env(),
            width: detect_width(),
        }
    }

    /// Plain output at a fixed width.
    pub fn plain(width: usize) -> Self {
        Self {
            color: false,
            width: Some(width),
        }
    }

    pub fn width_or_default(&self) -> usize {
        self.width.unwrap_or(FALLBACK_WIDTH)
    }
}

/// https://no-color.org: any non-empty value disables color.
fn no_color_env() -> bool {
    std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty())
}

fn detect_width() -> Option<usize> {
    if let Some((Width(w), _)) = terminal_size() {
        return Some(w as usize);
    }
    std::env::var("COLUMNS")
        .ok()
        .and_then(|c| c.trim().parse().ok())
        .filter(|w: &usize| *w > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_environment() {
        let env = Environment::plain(42);
        assert!(!env.color);
        assert_eq!(env.width_or_default(), 42);
        assert_eq!(
            Environment { color: false, width: None }.width_or_default(),
            FALLBACK_WIDTH
        );
    }

    #[test]
    fn test_no_color_flag_wins() {
        assert!(!Environment::detect(true).color);
    }
}

use std::io::IsTerminal;

use crate::logger::{error::LoggerError, format::LoggerFormat};

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub format: LoggerFormat,
    /// `EnvFilter` directive, e.g. `"info"` or `"countdown_core=trace,warn"`.
    pub level: String,
    pub with_targets: bool,
    pub use_color: bool,
}

impl LoggerConfig {
    /// Build a config from optional string overrides, keeping defaults for `None`.
    pub fn from_parts(format: Option<&str>, level: Option<&str>) -> Result<Self, LoggerError> {
        let mut cfg = Self::default();
        if let Some(format) = format {
            cfg.format = format.parse()?;
        }
        if let Some(level) = level {
            let level = level.trim();
            if level.is_empty() {
                return Err(LoggerError::InvalidLogLevel(level.to_string()));
            }
            cfg.level = level.to_string();
        }
        if cfg.format != LoggerFormat::Text {
            cfg.use_color = false;
        }
        Ok(cfg)
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        let use_color = cfg!(test) || std::io::stdout().is_terminal();
        Self {
            format: LoggerFormat::Text,
            level: "info".to_string(),
            with_targets: true,
            use_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_text_info() {
        let cfg = LoggerConfig::default();
        assert_eq!(cfg.format, LoggerFormat::Text);
        assert_eq!(cfg.level, "info");
        assert!(cfg.use_color);
    }

    #[test]
    fn overrides_apply() {
        let cfg = LoggerConfig::from_parts(Some("JSON"), Some(" debug ")).unwrap();
        assert_eq!(cfg.format, LoggerFormat::Json);
        assert_eq!(cfg.level, "debug");
        assert!(!cfg.use_color);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            LoggerConfig::from_parts(Some("xml"), None),
            Err(LoggerError::InvalidFormat(_))
        ));
        assert!(matches!(
            LoggerConfig::from_parts(None, Some("  ")),
            Err(LoggerError::InvalidLogLevel(_))
        ));
    }
}

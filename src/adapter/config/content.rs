use serde::Deserialize;

/// The parsed configuration file. Every section and key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Configuration {
    pub duration: DurationSection,
    pub points: PointsSection,
    pub message: MessageSection,
}

/// Phase lengths in minutes and the long-break cadence.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DurationSection {
    pub focus: u32,
    pub short_break: u32,
    pub long_break: u32,
    pub long_break_interval: u32,
}

impl Default for DurationSection {
    fn default() -> Self {
        Self {
            focus: 25,
            short_break: 5,
            long_break: 15,
            long_break_interval: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PointsSection {
    pub base: u32,
    pub task_bonus: u32,
}

impl Default for PointsSection {
    fn default() -> Self {
        Self {
            base: 25,
            task_bonus: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MessageSection {
    pub break_ended: String,
    pub break_skipped: String,
    pub points_fallback: String,
}

impl Default for MessageSection {
    fn default() -> Self {
        Self {
            break_ended: "Break's over! Ready to focus again?".to_owned(),
            break_skipped: "Break skipped. Start when you're ready!".to_owned(),
            points_fallback: "Points saved locally".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::adapter::config::reader::DEFAULT_CONTENT;

    #[test]
    fn parse_partial_configuration() {
        let content = r#"
            [duration]
            focus = 50

            [points]
            task_bonus = 15
        "#;
        let config: Configuration = toml::from_str(content).unwrap();

        assert_eq!(config.duration.focus, 50);
        assert_eq!(config.duration.short_break, 5);
        assert_eq!(config.points.base, 25);
        assert_eq!(config.points.task_bonus, 15);
        assert_eq!(config.message, MessageSection::default());
    }

    #[test]
    fn default_template_matches_defaults() {
        let config: Configuration = toml::from_str(DEFAULT_CONTENT).unwrap();
        assert_eq!(config, Configuration::default());
    }

    #[test]
    fn reject_unknown_keys() {
        assert!(toml::from_str::<Configuration>("[duration]\nfocuss = 3").is_err());
    }
}

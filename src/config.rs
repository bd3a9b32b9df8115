use std::path::{Path, PathBuf};

use anyhow::Result;
use crossterm::style::Stylize;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::{
    catalog::{DEFAULT_API_BASE_URL, DEFAULT_COVERS_BASE_URL},
    default_colors::*,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleConfig {
    bold:   bool,
    italic: bool,
    color:  crossterm::style::Color,
}

impl StyleConfig {
    fn style(&self, s: impl ToString) -> String {
        let mut s = s.to_string().with(self.color);
        if self.bold {
            s = s.bold();
        }
        if self.italic {
            s = s.italic();
        }
        s.to_string()
    }
}

pub trait Styleable {
    fn style(&self, c: &StyleConfig) -> String;
}

impl<T> Styleable for T
where
    T: ToString + std::fmt::Display,
{
    fn style(&self, c: &StyleConfig) -> String {
        c.style(self)
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            color:  COLOR_WHITE,
            bold:   false,
            italic: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub prefix:            String,
    pub suffix:            String,
    pub description:       String,
    pub separator:         String,
    pub style_prefix:      StyleConfig,
    pub style_suffix:      StyleConfig,
    pub style_description: StyleConfig,
    pub style_separator:   StyleConfig,
    pub style_content:     StyleConfig,
}

impl OutputConfig {
    pub fn format_str(&self, content: impl ToString) -> String {
        let prefix = self.prefix.style(&self.style_prefix);
        let suffix = self.suffix.style(&self.style_suffix);
        let content = content.to_string().style(&self.style_content);
        if self.description.is_empty() {
            return format!("{prefix}{content}{suffix}");
        }
        let description = self.description.style(&self.style_description);
        format!("{prefix}{description} {content}{suffix}")
    }

    pub fn format_vec(&self, content: &[impl std::fmt::Display]) -> String {
        let separator = self.separator.style(&self.style_separator);
        let joined = content
            .iter()
            .map(|x| x.style(&self.style_content))
            .collect::<Vec<_>>()
            .join(&separator);
        let prefix = self.prefix.style(&self.style_prefix);
        let suffix = self.suffix.style(&self.style_suffix);
        if self.description.is_empty() {
            return format!("{prefix}{joined}{suffix}");
        }
        let description = self.description.style(&self.style_description);
        format!("{prefix}{description} {joined}{suffix}")
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            prefix:            "".into(),
            suffix:            "".into(),
            description:       "".into(),
            separator:         ", ".into(),
            style_prefix:      StyleConfig::default(),
            style_suffix:      StyleConfig::default(),
            style_description: StyleConfig {
                italic: true,
                ..StyleConfig::default()
            },
            style_separator:   StyleConfig::default(),
            style_content:     StyleConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api_base_url:       String,
    pub covers_base_url:    String,
    /// Directory holding the favourites slot and the REPL history.
    pub data_location:      PathBuf,
    /// Subjects shown on a detail view.
    pub subject_limit:      usize,
    pub output_title:       OutputConfig,
    pub output_author:      OutputConfig,
    pub output_year:        OutputConfig,
    pub output_key:         OutputConfig,
    pub output_cover:       OutputConfig,
    pub output_description: OutputConfig,
    pub output_published:   OutputConfig,
    pub output_publisher:   OutputConfig,
    pub output_subject:     OutputConfig,
    pub output_lifespan:    OutputConfig,
    pub output_bio:         OutputConfig,
    pub output_notice:      OutputConfig,
    pub output_error:       OutputConfig,
}

impl Config {
    pub fn default_as_string() -> Result<String> {
        Ok(toml::to_string(&Self::default())?)
    }

    pub fn read_config() -> Result<Self> {
        Self::read_config_from("config.toml")
    }

    pub fn read_config_from(file: impl AsRef<Path>) -> Result<Self> {
        Ok(Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(file.as_ref()))
            .merge(Env::prefixed("TOMEFIND_"))
            .extract()?)
    }

    /// [Config::data_location] with `~` and environment variables expanded.
    pub fn data_dir(&self) -> Result<PathBuf> {
        Ok(shellexpand::path::full(&self.data_location)?.into_owned())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url:       DEFAULT_API_BASE_URL.into(),
            covers_base_url:    DEFAULT_COVERS_BASE_URL.into(),
            data_location:      PathBuf::from("~/.local/share/tomefind"),
            subject_limit:      10,
            output_title:       OutputConfig {
                style_content: StyleConfig {
                    color: COLOR_TITLE,
                    bold: true,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_author:      OutputConfig {
                description: "by".into(),
                style_content: StyleConfig {
                    color: COLOR_AUTHOR,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_year:        OutputConfig {
                description: "First published:".into(),
                style_content: StyleConfig {
                    color: COLOR_YEAR,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_key:         OutputConfig {
                prefix: "(".into(),
                suffix: ")".into(),
                style_content: StyleConfig {
                    color: COLOR_KEY,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_cover:       OutputConfig {
                description: "Cover:".into(),
                style_content: StyleConfig {
                    color: COLOR_DIMMED,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_description: OutputConfig::default(),
            output_published:   OutputConfig {
                description: "Published:".into(),
                style_content: StyleConfig {
                    color: COLOR_YEAR,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_publisher:   OutputConfig {
                description: "Publishers:".into(),
                style_content: StyleConfig {
                    color: COLOR_PUBLISHER,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_subject:     OutputConfig {
                description: "Subjects:".into(),
                style_content: StyleConfig {
                    color: COLOR_SUBJECT,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_lifespan:    OutputConfig {
                style_content: StyleConfig {
                    color: COLOR_DIMMED,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_bio:         OutputConfig::default(),
            output_notice:      OutputConfig {
                style_content: StyleConfig {
                    italic: true,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_error:       OutputConfig {
                description: "Error:".into(),
                style_content: StyleConfig {
                    color: COLOR_ERROR,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
        }
    }
}

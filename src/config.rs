use std::{
    fs,
    path::{
        Path,
        PathBuf,
    },
};

use serde::{
    Deserialize,
    Serialize,
};

use crate::CliError;

pub const CONFIG_FILE_NAME: &str = "v2fx_config.json";

/// Optional answers and output locations read from `v2fx_config.json`.
///
/// Any answer left out here is taken from the command line or asked for interactively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config
{
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fps: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<i64>,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub filter: FilterConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig
{
    pub output_dir: PathBuf,
    pub header_file: PathBuf,
    pub scratch_root: PathBuf,
    pub test_frame: usize,
}

/// Brightness/contrast adjustment applied before the monochrome conversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig
{
    pub brightness: f32,
    pub contrast: f32,
}

impl Default for OutputConfig
{
    fn default() -> Self
    {
        Self {
            output_dir: PathBuf::from("."),
            header_file: PathBuf::from("video.h"),
            scratch_root: PathBuf::from("temp"),
            test_frame: 1,
        }
    }
}

impl Default for FilterConfig
{
    fn default() -> Self
    {
        Self {
            brightness: -0.12,
            contrast: 1.5,
        }
    }
}

impl Config
{
    /// Starting point written by `v2fx init`.
    pub fn template() -> Self
    {
        Self {
            video_file: Some(PathBuf::from("input.mp4")),
            title: Some(String::from("My Video")),
            fps: Some(15),
            width: Some(128),
            height: Some(64),
            output: OutputConfig::default(),
            filter: FilterConfig::default(),
        }
    }

    /// Reads the config from `dir`, or the defaults when there is no config file.
    pub fn load(dir: &Path) -> Result<Config, CliError>
    {
        let config_file = dir.join(CONFIG_FILE_NAME);
        if !config_file.is_file()
        {
            log::debug!("No {} in {}, using defaults", CONFIG_FILE_NAME, dir.display());
            return Ok(Config::default());
        }
        let config_str = fs::read_to_string(&config_file).map_err(CliError::ConfigRead)?;
        serde_json::from_str(&config_str).map_err(CliError::ConfigParse)
    }

    pub fn write_template(dir: &Path) -> Result<PathBuf, CliError>
    {
        let config_file = dir.join(CONFIG_FILE_NAME);
        if config_file.exists()
        {
            return Err(CliError::ConfigExists(config_file));
        }
        fs::create_dir_all(dir).map_err(CliError::ConfigWrite)?;
        let config_str =
            serde_json::to_string_pretty(&Config::template()).map_err(CliError::ConfigParse)?;
        fs::write(&config_file, config_str).map_err(CliError::ConfigWrite)?;
        Ok(config_file)
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn missing_file_gives_defaults()
    {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.output.header_file, PathBuf::from("video.h"));
        assert_eq!(config.filter.contrast, 1.5);
    }

    #[test]
    fn partial_file_fills_in_defaults()
    {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{ "title": "Clip", "width": 86, "output": { "output_dir": "out" } }"#,
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();

        assert_eq!(config.title.as_deref(), Some("Clip"));
        assert_eq!(config.width, Some(86));
        assert_eq!(config.height, None);
        assert_eq!(config.output.output_dir, PathBuf::from("out"));
        assert_eq!(config.output.scratch_root, PathBuf::from("temp"));
        assert_eq!(config.filter, FilterConfig::default());
    }

    #[test]
    fn template_round_trips_and_is_not_overwritten()
    {
        let dir = tempfile::tempdir().unwrap();

        let path = Config::write_template(dir.path()).unwrap();

        assert_eq!(Config::load(dir.path()).unwrap(), Config::template());
        assert!(matches!(
            Config::write_template(dir.path()),
            Err(CliError::ConfigExists(existing)) if existing == path
        ));
    }

    #[test]
    fn malformed_file_is_a_parse_error()
    {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "{ not json").unwrap();

        assert!(matches!(Config::load(dir.path()), Err(CliError::ConfigParse(_))));
    }
}

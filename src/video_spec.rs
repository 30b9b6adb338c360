use std::path::{
    Path,
    PathBuf,
};

use crate::{
    ValidationError,
    encoder::BAND_HEIGHT,
};

pub const MAX_WIDTH: i64 = 128;
pub const MAX_HEIGHT: i64 = 64;
pub const MAX_TITLE_CHARS: usize = 19;

/// Parameters of one conversion, validated once and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoSpec
{
    source: PathBuf,
    title: String,
    fps: u16,
    width: u16,
    height: u16,
}

impl VideoSpec
{
    /// Validates the numeric fields and truncates the title to 19 characters.
    ///
    /// The source path is taken as given; use [`validate_source`] to check it exists.
    pub fn new(
        source: PathBuf,
        title: &str,
        fps: i64,
        width: i64,
        height: i64,
    ) -> Result<VideoSpec, ValidationError>
    {
        Ok(VideoSpec {
            source,
            title: truncate_title(title),
            fps: validate_fps(fps)?,
            width: validate_width(width)?,
            height: validate_height(height)?,
        })
    }

    pub fn source(&self) -> &Path
    {
        &self.source
    }

    pub fn title(&self) -> &str
    {
        &self.title
    }

    pub fn fps(&self) -> u16
    {
        self.fps
    }

    pub fn width(&self) -> u16
    {
        self.width
    }

    pub fn height(&self) -> u16
    {
        self.height
    }

    /// Source file name without directory or extension, e.g. `clip` for `videos/clip.mp4`.
    pub fn base_name(&self) -> String
    {
        self.source
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| String::from("video"))
    }

    pub fn artifact_file_name(&self) -> String
    {
        format!("{}.bin", self.base_name())
    }

    /// Bytes in one encoded frame: one byte per column per band.
    pub fn encoded_frame_len(&self) -> usize
    {
        self.width as usize * (self.height as usize / BAND_HEIGHT as usize)
    }
}

pub fn truncate_title(title: &str) -> String
{
    title.chars().take(MAX_TITLE_CHARS).collect()
}

pub fn validate_source(given: &str) -> Result<PathBuf, ValidationError>
{
    let given = given.trim();
    if given.is_empty()
    {
        return Err(ValidationError::MissingSource);
    }
    let path = PathBuf::from(given);
    if !path.is_file()
    {
        return Err(ValidationError::SourceNotFound(path));
    }
    Ok(path)
}

pub fn parse_number(
    field: &'static str,
    given: &str,
) -> Result<i64, ValidationError>
{
    given.trim().parse::<i64>().map_err(|_| ValidationError::NotANumber(field, given.to_string()))
}

pub fn validate_width(given: i64) -> Result<u16, ValidationError>
{
    if given > MAX_WIDTH
    {
        Err(ValidationError::WidthTooLarge(given))
    }
    else if given <= 0
    {
        Err(ValidationError::WidthNotPositive(given))
    }
    else if given % 2 != 0
    {
        Err(ValidationError::WidthOdd(given))
    }
    else
    {
        Ok(given as u16)
    }
}

pub fn validate_height(given: i64) -> Result<u16, ValidationError>
{
    if given > MAX_HEIGHT
    {
        Err(ValidationError::HeightTooLarge(given))
    }
    else if given <= 0
    {
        Err(ValidationError::HeightNotPositive(given))
    }
    else if given % BAND_HEIGHT as i64 != 0
    {
        Err(ValidationError::HeightNotMultipleOfEight(given))
    }
    else
    {
        Ok(given as u16)
    }
}

pub fn validate_fps(given: i64) -> Result<u16, ValidationError>
{
    if given <= 0
    {
        return Err(ValidationError::FpsNotPositive(given));
    }
    u16::try_from(given).map_err(|_| ValidationError::FpsTooLarge(given))
}

use std::{
    error::Error,
    fmt::{
        Display,
        Formatter,
    },
    path::PathBuf,
};

use crate::{
    FFmpegError,
    FormatResult,
    ImageError,
    IoError,
    SerdeJsonError,
};

#[derive(Debug, PartialEq, Eq)]
pub enum ValidationError
{
    MissingSource,
    SourceNotFound(PathBuf),
    NotANumber(&'static str, String),
    WidthTooLarge(i64),
    WidthNotPositive(i64),
    WidthOdd(i64),
    HeightTooLarge(i64),
    HeightNotPositive(i64),
    HeightNotMultipleOfEight(i64),
    FpsNotPositive(i64),
    FpsTooLarge(i64),
}

impl Error for ValidationError {}

impl Display for ValidationError
{
    fn fmt(
        &self,
        f: &mut Formatter,
    ) -> FormatResult
    {
        match self
        {
            Self::MissingSource => write!(f, "You must provide a video file."),
            Self::SourceNotFound(path) =>
            {
                write!(f, "The file could not be found at: {}", path.display())
            },
            Self::NotANumber(field, given) =>
            {
                write!(f, "The {} must be a whole number, got '{}'.", field, given)
            },
            Self::WidthTooLarge(_) => write!(f, "The width cannot be greater than 128 pixels."),
            Self::WidthNotPositive(_) => write!(f, "The width cannot be 0 or less."),
            Self::WidthOdd(width) => write!(f, "The width must be even, got {}!", width),
            Self::HeightTooLarge(_) => write!(f, "The height cannot be greater than 64 pixels."),
            Self::HeightNotPositive(_) => write!(f, "The height cannot be 0 or less."),
            Self::HeightNotMultipleOfEight(_) =>
            {
                write!(
                    f,
                    "The height must be a multiple of 8, such as: 8, 16, 24, 32, 40, 48, 56, or 64"
                )
            },
            Self::FpsNotPositive(_) => write!(f, "The frames per second must be a positive number."),
            Self::FpsTooLarge(fps) =>
            {
                write!(f, "The frames per second must fit in 16 bits, got {}.", fps)
            },
        }
    }
}

#[derive(Debug)]
pub enum CliError
{
    ConfigRead(IoError),
    ConfigParse(SerdeJsonError),
    ConfigExists(PathBuf),
    ConfigWrite(IoError),
    AccessCurrentDirectory,
    MissingInput(&'static str),
    PromptIo(IoError),
    InvalidArgument(ValidationError),
}

impl Error for CliError {}

impl Display for CliError
{
    fn fmt(
        &self,
        f: &mut Formatter,
    ) -> FormatResult
    {
        write!(f, "v2fx: ")?;
        match self
        {
            Self::ConfigRead(io_err) =>
            {
                write!(f, "Failed to read 'v2fx_config.json': {}", io_err)
            },
            Self::ConfigParse(serde_err) =>
            {
                write!(f, "Failed to parse 'v2fx_config.json': {}", serde_err)
            },
            Self::ConfigExists(path) =>
            {
                write!(f, "Refusing to overwrite existing config: {}", path.display())
            },
            Self::ConfigWrite(io_err) =>
            {
                write!(f, "Failed to write 'v2fx_config.json': {}", io_err)
            },
            Self::AccessCurrentDirectory => write!(f, "Could not access current directory"),
            Self::MissingInput(field) => write!(f, "Input ended before a {} was given", field),
            Self::PromptIo(io_err) => write!(f, "Failed to read from the terminal: {}", io_err),
            Self::InvalidArgument(validation_err) => write!(f, "{}", validation_err),
        }
    }
}

impl From<ValidationError> for CliError
{
    fn from(err: ValidationError) -> Self
    {
        Self::InvalidArgument(err)
    }
}

#[derive(Debug)]
pub enum ImplError
{
    FFmpeg(FFmpegError),
    FetchVideoStream,
    FilterGraph(&'static str),
    ImageRead(PathBuf, ImageError),
    ImageCreation,
    ImageSaving(ImageError),
    FrameSize((u32, u32), (u32, u32)),
    BandAlignment(u32),
    TooManyFrames(usize),
    FrameOutOfRange(usize, usize),
    FileWrite(IoError),
    FileSize(IoError),
    CreateDirectory(IoError),
    RemoveDirectory(IoError),
}

impl Error for ImplError {}

impl Display for ImplError
{
    fn fmt(
        &self,
        f: &mut Formatter,
    ) -> FormatResult
    {
        write!(f, "v2fx: ")?;
        match self
        {
            Self::FFmpeg(e) => write!(f, "Failed during video processing: {}", e),
            Self::FetchVideoStream => write!(f, "Failed to find a video stream in the input"),
            Self::FilterGraph(stage) => write!(f, "Failed to set up the filter graph ({})", stage),
            Self::ImageRead(path, e) =>
            {
                write!(f, "Failed to read frame {}: {}", path.display(), e)
            },
            Self::ImageCreation => write!(f, "Somehow failed to create image"),
            Self::ImageSaving(e) => write!(f, "Failed to save image: {}", e),
            Self::FrameSize(expected, found) =>
            {
                write!(
                    f,
                    "Frame is {}x{} but the video is {}x{}",
                    found.0, found.1, expected.0, expected.1
                )
            },
            Self::BandAlignment(height) =>
            {
                write!(f, "Frame height {} is not a multiple of 8", height)
            },
            Self::TooManyFrames(count) =>
            {
                write!(f, "{} frames do not fit in the 16-bit frame count field", count)
            },
            Self::FrameOutOfRange(frame, frame_count) =>
            {
                write!(f, "Frame {} is out of range of frame count: {}", frame, frame_count)
            },
            Self::FileWrite(e) => write!(f, "Failed to write file during output: {}", e),
            Self::FileSize(e) => write!(f, "Failed to read back the output size: {}", e),
            Self::CreateDirectory(e) =>
            {
                write!(f, "Failed to create directory during output: {}", e)
            },
            Self::RemoveDirectory(e) => write!(f, "Failed to clean up scratch frames: {}", e),
        }
    }
}

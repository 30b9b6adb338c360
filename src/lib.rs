pub mod command;
pub mod config;
pub mod container;
pub mod decode;
pub mod defines;
pub mod encoder;
pub mod error;
pub mod functions;
pub mod input;
pub mod monoframe;
pub mod output;
pub mod prompt;
pub mod video_spec;

pub use ffmpeg_next as ffmpeg;

pub use crate::{
    config::Config,
    container::{
        ContainerHeader,
        format_duration,
    },
    encoder::EncodedFrame,
    error::{
        CliError,
        ImplError,
        ValidationError,
    },
    monoframe::MonoFrame,
    video_spec::VideoSpec,
};

pub type FormatResult = std::fmt::Result;
pub type IoError = std::io::Error;
pub type SerdeJsonError = serde_json::Error;
pub type FFmpegError = ffmpeg::Error;
pub type ImageError = image::ImageError;

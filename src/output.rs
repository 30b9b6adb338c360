use std::{
    fs,
    path::{
        Path,
        PathBuf,
    },
    time::Instant,
};

use rayon::prelude::*;

use crate::{
    ContainerHeader,
    EncodedFrame,
    ImplError,
    MonoFrame,
    VideoSpec,
    config::{
        Config,
        OutputConfig,
    },
    container,
    decode,
    defines::VideoDefines,
    encoder,
    functions,
};

/// Per-video scratch directory for decoded frames, e.g. `temp/clip/`.
pub fn scratch_dir_for(
    output_config: &OutputConfig,
    spec: &VideoSpec,
) -> PathBuf
{
    output_config.scratch_root.join(spec.base_name())
}

/// Full conversion: decode, encode, write the artifact and `video.h`, then clean up.
pub fn convert(
    spec: &VideoSpec,
    config: &Config,
) -> Result<VideoDefines, ImplError>
{
    let started = Instant::now();
    let scratch_dir = scratch_dir_for(&config.output, spec);
    // Left over from an aborted run is fine, it gets reused
    fs::create_dir_all(&scratch_dir).map_err(ImplError::CreateDirectory)?;

    log::info!("Converting {} into frames...", spec.source().display());
    let frame_paths = decode::extract_frames(spec, &config.filter, &scratch_dir)?;

    log::info!("Creating video file {}...", spec.artifact_file_name());
    let frames = encode_frame_files(spec, &frame_paths)?;
    let defines = write_outputs(spec, &frames, &config.output)?;

    log::info!("Cleaning up...");
    fs::remove_dir_all(&scratch_dir).map_err(ImplError::RemoveDirectory)?;

    log::info!(
        "Converted {} frames in {}",
        defines.frame_count,
        functions::format_elapsed(started.elapsed().as_millis())
    );
    Ok(defines)
}

/// Thresholds and packs every decoded frame file, keeping their order.
pub fn encode_frame_files(
    spec: &VideoSpec,
    frame_paths: &[PathBuf],
) -> Result<Vec<EncodedFrame>, ImplError>
{
    let expected = (spec.width() as u32, spec.height() as u32);
    frame_paths
        .par_iter()
        .map(|path| {
            let frame = MonoFrame::open(path)?;
            if (frame.width, frame.height) != expected
            {
                return Err(ImplError::FrameSize(expected, (frame.width, frame.height)));
            }
            encoder::encode_frame(&frame)
        })
        .collect()
}

/// Writes `<basename>.bin` into the output directory, then the constants file.
pub fn write_outputs(
    spec: &VideoSpec,
    frames: &[EncodedFrame],
    output_config: &OutputConfig,
) -> Result<VideoDefines, ImplError>
{
    let duration = container::format_duration(frames.len(), spec.fps());
    let header = ContainerHeader::new(spec, frames.len(), &duration)?;

    fs::create_dir_all(&output_config.output_dir).map_err(ImplError::CreateDirectory)?;
    let artifact_path = output_config.output_dir.join(spec.artifact_file_name());
    let byte_size =
        container::write_artifact(&artifact_path, &header, spec.title(), &duration, frames)?;

    let defines = VideoDefines {
        title: spec.title().to_string(),
        duration,
        frame_count: frames.len(),
        fps: spec.fps(),
        width: spec.width(),
        height: spec.height(),
        byte_size,
    };
    log::info!("Creating {} file!", output_config.header_file.display());
    defines.write(&output_config.header_file)?;
    Ok(defines)
}

/// Decodes the video and saves one frame twice: as thresholded, and unpacked from its
/// encoded bytes. No artifact is written.
pub fn test_frame(
    spec: &VideoSpec,
    config: &Config,
) -> Result<(PathBuf, PathBuf), ImplError>
{
    let scratch_dir = scratch_dir_for(&config.output, spec);
    fs::create_dir_all(&scratch_dir).map_err(ImplError::CreateDirectory)?;
    let frame_paths = decode::extract_frames(spec, &config.filter, &scratch_dir)?;

    let frame_number = config.output.test_frame;
    let frame_path = frame_number
        .checked_sub(1)
        .and_then(|index| frame_paths.get(index))
        .ok_or(ImplError::FrameOutOfRange(frame_number, frame_paths.len()))?;

    let previews = save_previews(frame_path, frame_number, &config.output.output_dir)?;

    fs::remove_dir_all(&scratch_dir).map_err(ImplError::RemoveDirectory)?;
    Ok(previews)
}

fn save_previews(
    frame_path: &Path,
    frame_number: usize,
    output_dir: &Path,
) -> Result<(PathBuf, PathBuf), ImplError>
{
    fs::create_dir_all(output_dir).map_err(ImplError::CreateDirectory)?;
    let frame = MonoFrame::open(frame_path)?;
    let encoded = encoder::encode_frame(&frame)?;
    log::info!(
        "Frame {} has {} lit pixels and packs into {} bytes",
        frame_number,
        frame.lit_count(),
        encoded.len()
    );

    let thresholded_path = output_dir.join(format!("test_frame_{}.png", frame_number));
    let packed_path = output_dir.join(format!("packed_test_frame_{}.png", frame_number));
    frame.save_as(&thresholded_path)?;
    encoded.unpack().save_as(&packed_path)?;
    Ok((thresholded_path, packed_path))
}

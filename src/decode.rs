use std::path::{
    Path,
    PathBuf,
};

use image::RgbaImage;

use crate::{
    ImplError,
    VideoSpec,
    config::FilterConfig,
    ffmpeg,
};

/// Frame files are numbered from 1 with five digits, matching ffmpeg's `%05d.png`.
pub fn frame_file_name(index: usize) -> String
{
    format!("{:05}.png", index)
}

/// Resample, scale, adjust and reduce to 1 bit, then widen back to RGBA for the PNGs.
pub fn filter_description(
    spec: &VideoSpec,
    filter: &FilterConfig,
) -> String
{
    format!(
        "fps={},scale={}:{},eq=brightness={}:contrast={},format=pal8,format=monob,format=rgba",
        spec.fps(),
        spec.width(),
        spec.height(),
        filter.brightness,
        filter.contrast
    )
}

/// Decodes the source into `scratch_dir` as numbered PNGs and returns their paths in order.
pub fn extract_frames(
    spec: &VideoSpec,
    filter: &FilterConfig,
    scratch_dir: &Path,
) -> Result<Vec<PathBuf>, ImplError>
{
    ffmpeg::init().map_err(ImplError::FFmpeg)?;

    let mut input = ffmpeg::format::input(spec.source()).map_err(ImplError::FFmpeg)?;

    let video_stream =
        input.streams().best(ffmpeg::media::Type::Video).ok_or(ImplError::FetchVideoStream)?;

    let video_stream_index = video_stream.index();
    let time_base = video_stream.time_base();

    let mut decoder = ffmpeg::codec::context::Context::from_parameters(video_stream.parameters())
        .map_err(ImplError::FFmpeg)?
        .decoder()
        .video()
        .map_err(ImplError::FFmpeg)?;

    let mut graph = build_filter_graph(&decoder, time_base, &filter_description(spec, filter))?;
    let mut writer = FrameWriter::new(scratch_dir);

    for (stream, packet) in input.packets()
    {
        if stream.index() == video_stream_index
        {
            decoder.send_packet(&packet).map_err(ImplError::FFmpeg)?;
            drain_decoder(&mut decoder, &mut graph, &mut writer)?;
        }
    }
    // Flush decoder (could be storing extra frames)
    decoder.send_eof().map_err(ImplError::FFmpeg)?;
    drain_decoder(&mut decoder, &mut graph, &mut writer)?;

    graph
        .get("in")
        .ok_or(ImplError::FilterGraph("source"))?
        .source()
        .flush()
        .map_err(ImplError::FFmpeg)?;
    drain_filter(&mut graph, &mut writer)?;

    log::info!("Extracted {} frames into {}", writer.paths.len(), scratch_dir.display());
    Ok(writer.paths)
}

fn build_filter_graph(
    decoder: &ffmpeg::decoder::Video,
    time_base: ffmpeg::Rational,
    description: &str,
) -> Result<ffmpeg::filter::Graph, ImplError>
{
    let mut graph = ffmpeg::filter::Graph::new();

    let aspect = decoder.aspect_ratio();
    let (aspect_num, aspect_den) = if aspect.numerator() > 0
    {
        (aspect.numerator(), aspect.denominator())
    }
    else
    {
        (1, 1)
    };
    let args = format!(
        "video_size={}x{}:pix_fmt={}:time_base={}/{}:pixel_aspect={}/{}",
        decoder.width(),
        decoder.height(),
        ffmpeg::ffi::AVPixelFormat::from(decoder.format()) as i32,
        time_base.numerator(),
        time_base.denominator(),
        aspect_num,
        aspect_den
    );

    let buffer = ffmpeg::filter::find("buffer").ok_or(ImplError::FilterGraph("buffer"))?;
    let buffersink =
        ffmpeg::filter::find("buffersink").ok_or(ImplError::FilterGraph("buffersink"))?;

    graph.add(&buffer, "in", &args).map_err(ImplError::FFmpeg)?;
    graph.add(&buffersink, "out", "").map_err(ImplError::FFmpeg)?;
    graph
        .output("in", 0)
        .map_err(ImplError::FFmpeg)?
        .input("out", 0)
        .map_err(ImplError::FFmpeg)?
        .parse(description)
        .map_err(ImplError::FFmpeg)?;
    graph.validate().map_err(ImplError::FFmpeg)?;

    log::debug!("Filter graph: {} -> {}", args, description);
    Ok(graph)
}

fn drain_decoder(
    decoder: &mut ffmpeg::decoder::Video,
    graph: &mut ffmpeg::filter::Graph,
    writer: &mut FrameWriter,
) -> Result<(), ImplError>
{
    let mut decoded = ffmpeg::util::frame::video::Video::empty();
    while decoder.receive_frame(&mut decoded).is_ok()
    {
        // The fps filter needs presentation timestamps
        let timestamp = decoded.timestamp();
        decoded.set_pts(timestamp);
        graph
            .get("in")
            .ok_or(ImplError::FilterGraph("source"))?
            .source()
            .add(&decoded)
            .map_err(ImplError::FFmpeg)?;
        drain_filter(graph, writer)?;
    }
    Ok(())
}

fn drain_filter(
    graph: &mut ffmpeg::filter::Graph,
    writer: &mut FrameWriter,
) -> Result<(), ImplError>
{
    let mut filtered = ffmpeg::util::frame::video::Video::empty();
    while graph
        .get("out")
        .ok_or(ImplError::FilterGraph("sink"))?
        .sink()
        .frame(&mut filtered)
        .is_ok()
    {
        writer.write(&filtered)?;
    }
    Ok(())
}

struct FrameWriter<'a>
{
    dir: &'a Path,
    paths: Vec<PathBuf>,
}

impl<'a> FrameWriter<'a>
{
    fn new(dir: &'a Path) -> Self
    {
        Self {
            dir,
            paths: Vec::new(),
        }
    }

    fn write(
        &mut self,
        frame: &ffmpeg::util::frame::video::Video,
    ) -> Result<(), ImplError>
    {
        let image = rgba_image(frame)?;
        let path = self.dir.join(frame_file_name(self.paths.len() + 1));
        image.save(&path).map_err(ImplError::ImageSaving)?;
        log::debug!("Wrote {}", path.display());
        self.paths.push(path);
        Ok(())
    }
}

fn rgba_image(frame: &ffmpeg::util::frame::video::Video) -> Result<RgbaImage, ImplError>
{
    let width = frame.width();
    let height = frame.height();
    let stride = frame.stride(0);
    let row_len = width as usize * 4;
    let plane = frame.data(0);

    // Copy data row by row to handle stride
    let mut pixels = Vec::with_capacity(row_len * height as usize);
    for y in 0..height as usize
    {
        let row_start = y * stride;
        pixels.extend_from_slice(&plane[row_start..row_start + row_len]);
    }

    RgbaImage::from_raw(width, height, pixels).ok_or(ImplError::ImageCreation)
}

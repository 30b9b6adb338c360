use std::{
    fs::{
        self,
        File,
    },
    io::{
        BufWriter,
        Write,
    },
    path::Path,
};

use crate::{
    EncodedFrame,
    ImplError,
    IoError,
    VideoSpec,
};

/// Encoding revision written as the first header field.
pub const FORMAT_VERSION: u16 = 0;
pub const HEADER_LEN: usize = 14;
/// Longest title or duration stored in the artifact, excluding the NUL.
pub const MAX_STRING_BYTES: usize = 17;

/// Fixed 14-byte artifact header, seven big-endian u16 fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerHeader
{
    pub version: u16,
    pub width: u16,
    pub height: u16,
    pub frame_count: u16,
    pub fps: u16,
    pub title_len: u16,
    pub duration_len: u16,
}

impl ContainerHeader
{
    /// The two length fields count the NUL and use the full (19 character) title, even
    /// though at most 17 bytes of it are stored.
    pub fn new(
        spec: &VideoSpec,
        frame_count: usize,
        duration: &str,
    ) -> Result<ContainerHeader, ImplError>
    {
        let frame_count =
            u16::try_from(frame_count).map_err(|_| ImplError::TooManyFrames(frame_count))?;
        Ok(ContainerHeader {
            version: FORMAT_VERSION,
            width: spec.width(),
            height: spec.height(),
            frame_count,
            fps: spec.fps(),
            title_len: (spec.title().chars().count() + 1) as u16,
            duration_len: (duration.chars().count() + 1) as u16,
        })
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN]
    {
        let fields = [
            self.version,
            self.width,
            self.height,
            self.frame_count,
            self.fps,
            self.title_len,
            self.duration_len,
        ];
        let mut bytes = [0u8; HEADER_LEN];
        for (chunk, field) in bytes.chunks_exact_mut(2).zip(fields)
        {
            chunk.copy_from_slice(&field.to_be_bytes());
        }
        bytes
    }
}

/// Playback length as "1h, 2m, 5s", leaving out units that are zero.
pub fn format_duration(
    frame_count: usize,
    fps: u16,
) -> String
{
    if fps == 0
    {
        return String::new();
    }
    let seconds = frame_count / fps as usize;
    let units = [(seconds / 3600, 'h'), (seconds % 3600 / 60, 'm'), (seconds % 60, 's')];

    units
        .iter()
        .filter(|(value, _)| *value > 0)
        .map(|(value, unit)| format!("{}{}", value, unit))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Stored form of a header string: at most 17 ASCII bytes followed by a NUL.
///
/// Characters outside ASCII are stored as `?`.
pub fn nul_terminated(text: &str) -> Vec<u8>
{
    let mut bytes: Vec<u8> = text
        .chars()
        .take(MAX_STRING_BYTES)
        .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
        .collect();
    bytes.push(0);
    bytes
}

/// Size the artifact will have on disk.
pub fn artifact_len(
    title: &str,
    duration: &str,
    frames: &[EncodedFrame],
) -> usize
{
    HEADER_LEN
        + nul_terminated(title).len()
        + nul_terminated(duration).len()
        + frames.iter().map(EncodedFrame::len).sum::<usize>()
}

/// Header, title, duration, then every frame in order with no separators.
pub fn write_container<W: Write>(
    writer: &mut W,
    header: &ContainerHeader,
    title: &str,
    duration: &str,
    frames: &[EncodedFrame],
) -> Result<(), IoError>
{
    writer.write_all(&header.to_bytes())?;
    writer.write_all(&nul_terminated(title))?;
    writer.write_all(&nul_terminated(duration))?;
    for frame in frames
    {
        writer.write_all(&frame.data)?;
    }
    writer.flush()
}

/// Writes the artifact to `path` and returns its size as read back from the filesystem.
///
/// On failure the partially written file is left behind.
pub fn write_artifact(
    path: &Path,
    header: &ContainerHeader,
    title: &str,
    duration: &str,
    frames: &[EncodedFrame],
) -> Result<u64, ImplError>
{
    let file = File::create(path).map_err(ImplError::FileWrite)?;
    let mut writer = BufWriter::new(file);
    write_container(&mut writer, header, title, duration, frames).map_err(ImplError::FileWrite)?;
    drop(writer);

    let size = fs::metadata(path).map_err(ImplError::FileSize)?.len();
    log::debug!("Wrote {} bytes to {}", size, path.display());
    Ok(size)
}

#[cfg(test)]
mod tests
{
    use std::path::PathBuf;

    use super::*;

    fn spec(title: &str) -> VideoSpec
    {
        VideoSpec::new(PathBuf::from("test.mp4"), title, 15, 128, 64).unwrap()
    }

    #[test]
    fn duration_omits_zero_units()
    {
        assert_eq!(format_duration(125, 25), "5s");
        assert_eq!(format_duration(7200, 1), "2h");
        assert_eq!(format_duration(3725, 1), "1h, 2m, 5s");
        assert_eq!(format_duration(125, 1), "2m, 5s");
        assert_eq!(format_duration(3600, 1), "1h");
        assert_eq!(format_duration(3605, 1), "1h, 5s");
        assert_eq!(format_duration(0, 15), "");
    }

    #[test]
    fn duration_rounds_partial_seconds_down()
    {
        assert_eq!(format_duration(29, 15), "1s");
        assert_eq!(format_duration(14, 15), "");
    }

    #[test]
    fn header_fields_are_big_endian()
    {
        let header = ContainerHeader::new(&spec("Test"), 100, "5s").unwrap();
        assert_eq!(
            header.to_bytes(),
            [0x00, 0x00, 0x00, 0x80, 0x00, 0x40, 0x00, 0x64, 0x00, 0x0F, 0x00, 0x05, 0x00, 0x03]
        );
    }

    #[test]
    fn container_layout_matches_header_strings_then_frames()
    {
        let header = ContainerHeader::new(&spec("Test"), 2, "5s").unwrap();
        let frames = [
            EncodedFrame {
                data: vec![1, 2],
                width: 2,
                height: 8,
            },
            EncodedFrame {
                data: vec![3, 4],
                width: 2,
                height: 8,
            },
        ];
        let mut out = Vec::new();

        write_container(&mut out, &header, "Test", "5s", &frames).unwrap();

        assert_eq!(&out[HEADER_LEN..HEADER_LEN + 5], b"Test\0");
        assert_eq!(&out[HEADER_LEN + 5..HEADER_LEN + 8], b"5s\0");
        assert_eq!(&out[HEADER_LEN + 8..], &[1, 2, 3, 4]);
        assert_eq!(out.len(), artifact_len("Test", "5s", &frames));
    }

    #[test]
    fn long_title_keeps_full_length_field_but_stores_seventeen_bytes()
    {
        let spec = spec("Nineteen Characters and then some");
        assert_eq!(spec.title(), "Nineteen Characters");

        let header = ContainerHeader::new(&spec, 1, "").unwrap();

        assert_eq!(header.title_len, 20);
        assert_eq!(header.duration_len, 1);
        assert_eq!(nul_terminated(spec.title()), b"Nineteen Characte\0".to_vec());
    }

    #[test]
    fn non_ascii_is_replaced()
    {
        assert_eq!(nul_terminated("café"), b"caf?\0".to_vec());
    }

    #[test]
    fn frame_count_must_fit_in_header()
    {
        assert!(ContainerHeader::new(&spec("t"), 65_535, "").is_ok());
        assert!(matches!(
            ContainerHeader::new(&spec("t"), 65_536, ""),
            Err(ImplError::TooManyFrames(65_536))
        ));
    }

    #[test]
    fn artifact_size_is_read_back_from_disk()
    {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.bin");
        let header = ContainerHeader::new(&spec("Test"), 1, "5s").unwrap();
        let frames = [EncodedFrame {
            data: vec![0xAA; 1024],
            width: 128,
            height: 64,
        }];

        let size = write_artifact(&path, &header, "Test", "5s", &frames).unwrap();

        assert_eq!(size, (14 + 5 + 3 + 1024) as u64);
        assert_eq!(fs::read(&path).unwrap().len() as u64, size);
    }
}

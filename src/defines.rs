use std::{
    fmt::Write as _,
    fs,
    path::Path,
};

use crate::ImplError;

/// Last addressable byte of the external flash; data is placed so it ends there.
pub const FX_FLASH_END: u32 = 0xFF_FFFF;
pub const FX_PAGE_SIZE: u64 = 256;

/// Everything the player sketch needs to know about an artifact at compile time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoDefines
{
    pub title: String,
    pub duration: String,
    pub frame_count: usize,
    pub fps: u16,
    pub width: u16,
    pub height: u16,
    pub byte_size: u64,
}

impl VideoDefines
{
    pub fn page(&self) -> u32
    {
        fx_data_page(self.byte_size)
    }

    pub fn render(&self) -> String
    {
        let mut out = String::new();
        out.push_str("//Generated with v2fx\n");
        out.push_str("//\n");
        out.push_str("//\n");
        out.push_str("//\t\tPut this file with your Player.ino and\n");
        out.push_str("//\t\tcompile to play on your Arduboy!!\n");
        out.push_str("//\n");
        out.push_str("//\n");
        // Writing into a String cannot fail
        let _ = writeln!(out, "#define VIDEO_TITLE\t\t\t\t\"{}\"", c_escape(&self.title));
        let _ = writeln!(out, "#define VIDEO_DURATION\t\t\t\"{}\"", c_escape(&self.duration));
        let _ = writeln!(out, "#define VIDEO_FRAMES\t\t\t\"{}\"", self.frame_count);
        let _ = writeln!(out, "#define VIDEO_FPS\t\t\t\t\"{}\"", self.fps);
        let _ = writeln!(out, "#define VIDEO_FRAMERATE\t\t\t{}", self.fps);
        let _ = writeln!(out, "#define VIDEO_WIDTH\t\t\t\t\"{}\"", self.width);
        let _ = writeln!(out, "#define VIDEO_HEIGHT\t\t\t\"{}\"", self.height);
        let _ = writeln!(out, "#define FX_DATA_BYTES\t\t\t({})", self.byte_size);
        let _ = writeln!(out, "#define FX_DATA_PAGE\t\t\t(0x{:06x})", self.page());
        out
    }

    /// Replaces the whole file, never appends.
    pub fn write(
        &self,
        path: &Path,
    ) -> Result<(), ImplError>
    {
        fs::write(path, self.render()).map_err(ImplError::FileWrite)
    }
}

/// First 256-byte page of the artifact when it is flashed to end at `0xFFFFFF`.
pub fn fx_data_page(byte_size: u64) -> u32
{
    FX_FLASH_END - (byte_size / FX_PAGE_SIZE) as u32
}

fn c_escape(text: &str) -> String
{
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars()
    {
        match c
        {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            c if c.is_ascii() && !c.is_ascii_control() => escaped.push(c),
            _ => escaped.push('?'),
        }
    }
    escaped
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn defines() -> VideoDefines
    {
        VideoDefines {
            title: String::from("Bad Apple"),
            duration: String::from("3m, 39s"),
            frame_count: 3286,
            fps: 15,
            width: 128,
            height: 64,
            byte_size: 2560,
        }
    }

    #[test]
    fn page_counts_back_from_end_of_flash()
    {
        assert_eq!(fx_data_page(2560), 16_777_205);
        assert_eq!(fx_data_page(2561), 0xFF_FFFF - 10);
        assert_eq!(fx_data_page(255), 0xFF_FFFF);
        assert_eq!(defines().page(), 0xFF_FFF5);
    }

    #[test]
    fn renders_every_constant()
    {
        let text = defines().render();

        assert!(text.contains("#define VIDEO_TITLE\t\t\t\t\"Bad Apple\"\n"));
        assert!(text.contains("#define VIDEO_DURATION\t\t\t\"3m, 39s\"\n"));
        assert!(text.contains("#define VIDEO_FRAMES\t\t\t\"3286\"\n"));
        assert!(text.contains("#define VIDEO_FPS\t\t\t\t\"15\"\n"));
        assert!(text.contains("#define VIDEO_FRAMERATE\t\t\t15\n"));
        assert!(text.contains("#define VIDEO_WIDTH\t\t\t\t\"128\"\n"));
        assert!(text.contains("#define VIDEO_HEIGHT\t\t\t\"64\"\n"));
        assert!(text.contains("#define FX_DATA_BYTES\t\t\t(2560)\n"));
        assert!(text.contains("#define FX_DATA_PAGE\t\t\t(0xfffff5)\n"));
    }

    #[test]
    fn quotes_in_title_are_escaped()
    {
        let mut defines = defines();
        defines.title = String::from("Say \"hi\"");
        assert!(defines.render().contains("\"Say \\\"hi\\\"\""));
    }

    #[test]
    fn rewrites_instead_of_appending()
    {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("video.h");
        fs::write(&path, "stale contents that are much longer than nothing").unwrap();

        defines().write(&path).unwrap();
        defines().write(&path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), defines().render());
    }
}

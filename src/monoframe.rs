use std::path::Path;

use image::{
    ImageBuffer,
    Luma,
    Rgba,
    RgbaImage,
};

use crate::ImplError;

/// Channel sum (R+G+B+A) at or above which a pixel counts as lit.
pub const LIT_THRESHOLD: u32 = 380;

/// A binary raster: one byte per pixel, each either 0 (dark) or 1 (lit), row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonoFrame
{
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl MonoFrame
{
    pub fn new(
        data: Vec<u8>,
        width: u32,
        height: u32,
    ) -> MonoFrame
    {
        MonoFrame {
            data,
            width,
            height,
        }
    }

    pub fn solid(
        width: u32,
        height: u32,
        value: u8,
    ) -> MonoFrame
    {
        MonoFrame {
            data: vec![value; width as usize * height as usize],
            width,
            height,
        }
    }

    pub fn from_rgba(image: &RgbaImage) -> MonoFrame
    {
        let data = image.pixels().map(|pixel| is_lit(pixel) as u8).collect();
        MonoFrame::new(data, image.width(), image.height())
    }

    /// Reads a decoded frame from disk and thresholds it.
    pub fn open(path: &Path) -> Result<MonoFrame, ImplError>
    {
        let image =
            image::open(path).map_err(|e| ImplError::ImageRead(path.to_path_buf(), e))?.to_rgba8();
        Ok(MonoFrame::from_rgba(&image))
    }

    pub fn pixel(
        &self,
        x: u32,
        y: u32,
    ) -> u8
    {
        self.data[y as usize * self.width as usize + x as usize]
    }

    pub fn lit_count(&self) -> usize
    {
        self.data.iter().filter(|&&value| value != 0).count()
    }

    /// Saves the frame as a black and white PNG (lit pixels white).
    pub fn save_as(
        &self,
        filename: &Path,
    ) -> Result<(), ImplError>
    {
        let mut img_data = Vec::with_capacity(self.width as usize * self.height as usize);

        for y in 0..self.height
        {
            let row_start = y as usize * self.width as usize;
            let row_end = row_start + self.width as usize;
            img_data.extend(
                self.data[row_start..row_end].iter().map(|&value| if value != 0 { 255 } else { 0 }),
            );
        }

        let img: ImageBuffer<Luma<u8>, Vec<u8>> =
            ImageBuffer::from_raw(self.width, self.height, img_data)
                .ok_or(ImplError::ImageCreation)?;

        img.save(filename).map_err(ImplError::ImageSaving)?;
        log::info!("Saved PNG to {}", filename.display());
        Ok(())
    }
}

/// Alpha is part of the sum, so an opaque black pixel sums to 255 and stays dark.
pub fn is_lit(pixel: &Rgba<u8>) -> bool
{
    pixel.0.iter().map(|&channel| channel as u32).sum::<u32>() >= LIT_THRESHOLD
}

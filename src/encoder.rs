use crate::{
    ImplError,
    MonoFrame,
};

pub const BAND_HEIGHT: u32 = 8;

/// A frame packed in display memory order: for each 8-row band (top first), one byte per
/// column (left first), bit 0 holding the band's top row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedFrame
{
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl EncodedFrame
{
    pub fn len(&self) -> usize
    {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.data.is_empty()
    }

    pub fn bands(&self) -> u32
    {
        self.height / BAND_HEIGHT
    }

    /// Unpacks back into a binary raster.
    pub fn unpack(&self) -> MonoFrame
    {
        let mut frame = MonoFrame::solid(self.width, self.height, 0);
        for band in 0..self.bands()
        {
            for x in 0..self.width
            {
                let byte = self.data[(band * self.width + x) as usize];
                for bit in 0..BAND_HEIGHT
                {
                    let y = band * BAND_HEIGHT + bit;
                    frame.data[(y * self.width + x) as usize] = (byte >> bit) & 1;
                }
            }
        }
        frame
    }
}

pub fn encode_frame(frame: &MonoFrame) -> Result<EncodedFrame, ImplError>
{
    if frame.height % BAND_HEIGHT != 0
    {
        return Err(ImplError::BandAlignment(frame.height));
    }

    let mut data = Vec::with_capacity((frame.width * (frame.height / BAND_HEIGHT)) as usize);

    for band_top in (0..frame.height).step_by(BAND_HEIGHT as usize)
    {
        for x in 0..frame.width
        {
            // Bottom row first, so the top row ends up in bit 0
            let byte = (0..BAND_HEIGHT)
                .rev()
                .fold(0u8, |acc, row| (acc << 1) | (frame.pixel(x, band_top + row) & 1));
            data.push(byte);
        }
    }

    Ok(EncodedFrame {
        data,
        width: frame.width,
        height: frame.height,
    })
}

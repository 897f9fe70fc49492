//! 1-bit frame buffer for the e-paper panel.
//!
//! Pixels are packed eight to a byte, most significant bit first, rows
//! padded to whole bytes; the layout the panel controller expects. A set bit
//! is white. The buffer implements `embedded-graphics`' `DrawTarget`, so the
//! renderer draws into it with ordinary primitives and the host ships
//! [`FrameBuffer::bytes`] to the display driver.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

/// Packed monochrome frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    buffer: Vec<u8>,
}

impl FrameBuffer {
    /// New frame, all white.
    pub fn new(width: u32, height: u32) -> Self {
        // Each row has (width+7)/8 bytes
        let bytes_per_row = width.div_ceil(8);
        let buffer_size = (bytes_per_row * height) as usize;
        Self {
            width,
            height,
            buffer: vec![0xFF; buffer_size],
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn fill(&mut self, color: BinaryColor) {
        self.buffer.fill(if color.is_on() { 0x00 } else { 0xFF });
    }

    /// Off-screen writes are dropped.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: BinaryColor) {
        if x >= self.width || y >= self.height {
            return;
        }
        let (byte_index, bit_mask) = self.locate(x, y);
        match color {
            BinaryColor::Off => self.buffer[byte_index] |= bit_mask,
            BinaryColor::On => self.buffer[byte_index] &= !bit_mask,
        }
    }

    /// Colour at a pixel; off-screen reads as `None`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<BinaryColor> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let (byte_index, bit_mask) = self.locate(x, y);
        Some(if self.buffer[byte_index] & bit_mask == 0 {
            BinaryColor::On
        } else {
            BinaryColor::Off
        })
    }

    /// Number of black (`On`) pixels.
    pub fn count_on(&self) -> u32 {
        if self.width == 0 {
            return 0;
        }
        let bytes_per_row = self.width.div_ceil(8) as usize;
        // Unused low bits of each row's last byte
        let padding = bytes_per_row as u32 * 8 - self.width;
        let padding_mask = ((1u16 << padding) - 1) as u8;
        self.buffer
            .chunks(bytes_per_row)
            .map(|row| match row.split_last() {
                Some((last, body)) => {
                    body.iter().map(|b| b.count_zeros()).sum::<u32>()
                        + (last | padding_mask).count_zeros()
                }
                None => 0,
            })
            .sum()
    }

    fn locate(&self, x: u32, y: u32) -> (usize, u8) {
        let bytes_per_row = self.width.div_ceil(8);
        let byte_index = (y * bytes_per_row + x / 8) as usize;
        (byte_index, 0x80 >> (x % 8))
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x >= 0 && point.y >= 0 {
                self.set_pixel(point.x as u32, point.y as u32, color);
            }
        }
        Ok(())
    }
}

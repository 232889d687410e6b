//! 8x8 monochrome pixel buffer
//!
//! One byte per row, bit `x` of row `y` is the pixel in column `x`.
//! Row 0 is the first row handed to the matrix driver.

use heapless::Vec;

/// Matrix width and height
pub const SIZE: usize = 8;

/// Number of pixels on the matrix
pub const PIXEL_COUNT: usize = SIZE * SIZE;

/// A full 8x8 frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PixelBuffer {
    rows: [u8; SIZE],
}

impl PixelBuffer {
    /// All pixels off
    pub const fn new() -> Self {
        Self { rows: [0; SIZE] }
    }

    /// All pixels on
    pub const fn full() -> Self {
        Self { rows: [0xFF; SIZE] }
    }

    /// Build a buffer from raw row bytes
    pub const fn from_rows(rows: [u8; SIZE]) -> Self {
        Self { rows }
    }

    /// Raw row bytes, row 0 first
    pub fn rows(&self) -> &[u8; SIZE] {
        &self.rows
    }

    /// Mutable row bytes
    pub fn rows_mut(&mut self) -> &mut [u8; SIZE] {
        &mut self.rows
    }

    /// Turn every pixel off
    pub fn clear(&mut self) {
        self.rows = [0; SIZE];
    }

    /// OR `src` into this buffer
    ///
    /// Never clears a pixel, so merging is idempotent and order-independent.
    pub fn merge(&mut self, src: &PixelBuffer) {
        for (dst, src) in self.rows.iter_mut().zip(src.rows.iter()) {
            *dst |= *src;
        }
    }

    /// Pixel at column `x`, row `y` (both 0-7)
    pub fn get_pixel(&self, x: u8, y: u8) -> bool {
        debug_assert!((x as usize) < SIZE && (y as usize) < SIZE);
        (self.rows[y as usize] >> x) & 1 != 0
    }

    /// Set or clear the pixel at column `x`, row `y`
    pub fn set_pixel(&mut self, x: u8, y: u8, lit: bool) {
        debug_assert!((x as usize) < SIZE && (y as usize) < SIZE);
        let row = &mut self.rows[y as usize];
        if lit {
            *row |= 1 << x;
        } else {
            *row &= !(1 << x);
        }
    }

    /// Set or clear a pixel by linear index (`y * 8 + x`)
    pub fn set_index(&mut self, index: u8, lit: bool) {
        let (x, y) = index_to_xy(index);
        self.set_pixel(x, y, lit);
    }

    /// True if no pixel is lit
    pub fn is_blank(&self) -> bool {
        self.rows.iter().all(|&row| row == 0)
    }

    /// Number of lit pixels
    pub fn count_lit(&self) -> u32 {
        self.rows.iter().map(|row| row.count_ones()).sum()
    }

    /// Linear indices (`y * 8 + x`) of all lit pixels, row-major order
    pub fn lit_pixels(&self) -> Vec<u8, PIXEL_COUNT> {
        let mut lit = Vec::new();
        for y in 0..SIZE as u8 {
            for x in 0..SIZE as u8 {
                if self.get_pixel(x, y) {
                    // Capacity equals the pixel count, so this cannot overflow
                    let _ = lit.push(y * SIZE as u8 + x);
                }
            }
        }
        lit
    }
}

/// Split a linear pixel index into `(x, y)`
pub const fn index_to_xy(index: u8) -> (u8, u8) {
    (index & 7, index >> 3)
}

//! CPU surface for signature strokes - 8-bit RGBA storage

/// An 8-bit RGBA CPU surface
/// Stores pixels as [u8; 4] so the buffer maps one-to-one onto PNG RGBA8
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpuSurface {
    /// Surface dimensions in buffer pixels
    pub width: u32,
    pub height: u32,
    /// Pixel data in row-major order, each pixel is [r, g, b, a]
    pixels: Vec<[u8; 4]>,
}

impl CpuSurface {
    /// Create a new surface filled with the given color
    pub fn new(width: u32, height: u32, fill: [u8; 4]) -> Self {
        let pixel_count = (width as usize) * (height as usize);
        Self {
            width,
            height,
            pixels: vec![fill; pixel_count],
        }
    }

    /// Fill the whole surface with a solid color
    pub fn clear(&mut self, color: [u8; 4]) {
        self.pixels.fill(color);
    }

    /// Reallocate at a new size, filled with `fill`
    pub fn reinitialize(&mut self, width: u32, height: u32, fill: [u8; 4]) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels
            .resize((width as usize) * (height as usize), fill);
    }

    /// Returns None if coordinates are out of bounds
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = (y as usize) * (self.width as usize) + (x as usize);
        Some(self.pixels[index])
    }

    /// Does nothing if coordinates are out of bounds
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, color: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = (y as usize) * (self.width as usize) + (x as usize);
        self.pixels[index] = color;
    }

    /// Raw RGBA8 bytes, row-major, ready for PNG encoding
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }

    /// True when every pixel equals `color`
    pub fn is_uniform(&self, color: [u8; 4]) -> bool {
        self.pixels.iter().all(|p| *p == color)
    }
}

use crate::foundation::core::Canvas;
use crate::foundation::error::{PlotvidError, PlotvidResult};
use crate::foundation::math::unpremultiply_rgba8_in_place;

/// One rendered frame as tightly packed RGBA8 rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height * 4` bytes, row-major.
    pub data: Vec<u8>,
    /// Whether colour channels are premultiplied by alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Frame filled with a single RGBA8 value.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4], premultiplied: bool) -> Self {
        let n = width as usize * height as usize;
        Self {
            width,
            height,
            data: rgba.repeat(n),
            premultiplied,
        }
    }

    /// Check that `data` holds exactly `width * height` pixels.
    pub fn validate(&self) -> PlotvidResult<()> {
        let expected = self.width as usize * self.height as usize * 4;
        if self.data.len() != expected {
            return Err(PlotvidError::render(format!(
                "frame data holds {} bytes, expected {expected} for {}x{}",
                self.data.len(),
                self.width,
                self.height
            )));
        }
        Ok(())
    }

    /// Pixel at `(x, y)`, as stored.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Copy of the pixel data with straight alpha.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if self.premultiplied {
            unpremultiply_rgba8_in_place(&mut out);
        }
        out
    }
}

/// Surface that draw callbacks mutate and export drivers capture.
pub trait RenderTarget {
    /// Output size of [`render`](Self::render).
    fn canvas(&self) -> Canvas;

    /// Remove everything drawn so far: all plot areas and figure-level overlays.
    fn clear(&mut self);

    /// Rasterize the current contents.
    fn render(&mut self) -> PlotvidResult<FrameRGBA>;
}

impl<T: RenderTarget + ?Sized> RenderTarget for Box<T> {
    fn canvas(&self) -> Canvas {
        (**self).canvas()
    }

    fn clear(&mut self) {
        (**self).clear()
    }

    fn render(&mut self) -> PlotvidResult<FrameRGBA> {
        (**self).render()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/target.rs"]
mod tests;

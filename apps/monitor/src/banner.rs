use std::convert::Infallible;

use embedded_graphics::{
    Pixel,
    draw_target::DrawTarget,
    geometry::{Dimensions, Point, Size},
    mono_font::{MonoTextStyle, ascii::FONT_10X20},
    pixelcolor::Rgb888,
    prelude::*,
    primitives::Rectangle,
    text::Text,
};

/// Where the status banner sits, matching the preview layout.
const BANNER_ORIGIN: Point = Point::new(10, 30);

/// `DrawTarget` over an HWC RGB byte buffer so embedded-graphics can
/// rasterize text straight into a camera frame.
struct FrameTarget<'a> {
    buf: &'a mut [u8],
    width: usize,
    height: usize,
}

impl Dimensions for FrameTarget<'_> {
    fn bounding_box(&self) -> Rectangle {
        Rectangle::new(Point::zero(), Size::new(self.width as u32, self.height as u32))
    }
}

impl DrawTarget for FrameTarget<'_> {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x >= 0
                && (point.x as usize) < self.width
                && point.y >= 0
                && (point.y as usize) < self.height
            {
                let idx = (point.y as usize * self.width + point.x as usize) * 3;
                self.buf[idx] = color.r();
                self.buf[idx + 1] = color.g();
                self.buf[idx + 2] = color.b();
            }
        }
        Ok(())
    }
}

/// Draw the status banner into the top-left corner of an RGB frame.
pub fn draw_banner(buf: &mut [u8], width: usize, height: usize, text: &str, color: [u8; 3]) {
    let style = MonoTextStyle::new(&FONT_10X20, Rgb888::new(color[0], color[1], color[2]));
    let mut target = FrameTarget { buf, width, height };

    match Text::new(text, BANNER_ORIGIN, style).draw(&mut target) {
        Ok(_) => {}
        Err(infallible) => match infallible {},
    }
}

/// Linear RGBA tint of a primitive, each channel in `0.0..=1.0`.
///
/// Backgrounds use [`Elem::bg_col`](crate::Elem::bg_col), glyphs
/// [`Elem::text_col`](crate::Elem::text_col).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[repr(C)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    /// Default background: nothing is drawn behind the element.
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Color::rgba(r, g, b, 1.0)
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Color { r, g, b, a }
    }

    /// Opaque color from 8-bit channels.
    /// ```
    /// use zp_ui::color::Color;
    /// assert_eq!(Color::u_rgb(0xFF, 0x00, 0xFF), Color::rgb(1.0, 0.0, 1.0));
    /// ```
    pub fn u_rgb(r: u8, g: u8, b: u8) -> Self {
        let [r, g, b] = [r, g, b].map(|c| c as f32 / 255.0);
        Color::rgb(r, g, b)
    }
}

impl From<(f32, f32, f32)> for Color {
    fn from((r, g, b): (f32, f32, f32)) -> Self {
        Color::rgb(r, g, b)
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Color::u_rgb(r, g, b)
    }
}

/// `0xRRGGBB`, always opaque.
impl From<u32> for Color {
    fn from(hex: u32) -> Self {
        let [_, r, g, b] = hex.to_be_bytes();
        Color::u_rgb(r, g, b)
    }
}

impl From<Color> for macroquad::color::Color {
    fn from(c: Color) -> Self {
        macroquad::color::Color::new(c.r, c.g, c.b, c.a)
    }
}

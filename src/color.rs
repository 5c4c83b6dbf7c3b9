//! Palette colors and the hue/chroma/luminance model used to rotate them.
//!
//! Colors are kept in the container's 16-bit intermediate representation
//! (`0..=65535` per channel). Rotation happens in CIE LCh(ab) under a D65
//! white point, where hue is an angle in degrees and chroma/luminance are
//! independent of it, so a rotation changes "which color" without touching
//! brightness or saturation.

use palette::{Clamp, Lch, Srgb, convert::IntoColorUnclamped, white_point::D65};

const CHANNEL_MAX: f64 = 65535.0;

/// Chroma below this is float noise from converting an exact gray.
const ACHROMATIC_CHROMA: f64 = 1e-4;

/// A palette entry with 16-bit red, green, blue and alpha channels.
///
/// Alpha is carried as data: hue rotation never changes it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u16,
    pub g: u16,
    pub b: u16,
    pub a: u16,
}

impl Color {
    /// Fully transparent black, the entry a GIF transparent index decodes to.
    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);

    pub const fn new(r: u16, g: u16, b: u16, a: u16) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u16, g: u16, b: u16) -> Self {
        Self::new(r, g, b, u16::MAX)
    }

    /// Widens an 8-bit triple so that `0xff` maps to `0xffff`.
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::opaque(widen(r), widen(g), widen(b))
    }

    pub const fn to_rgb8(self) -> [u8; 3] {
        [narrow(self.r), narrow(self.g), narrow(self.b)]
    }

    pub const fn is_transparent(self) -> bool {
        self.a == 0
    }
}

const fn widen(value: u8) -> u16 {
    value as u16 * 257
}

const fn narrow(value: u16) -> u8 {
    (value >> 8) as u8
}

/// Hue in degrees on a circular scale, plus chroma and luminance.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Hcl {
    pub hue: f64,
    pub chroma: f64,
    pub luminance: f64,
}

/// Converts a color to its perceptual form.
///
/// Channels are treated as alpha-premultiplied and divided back out before
/// conversion. Two inputs have no meaningful hue and map to hue 0, chroma 0:
/// exact grays, and fully transparent colors (which also get luminance 0).
pub fn to_perceptual(color: Color) -> Hcl {
    if color.is_transparent() {
        return Hcl::default();
    }

    let alpha = f64::from(color.a);
    let rgb = Srgb::<f64>::new(
        f64::from(color.r) / alpha,
        f64::from(color.g) / alpha,
        f64::from(color.b) / alpha,
    );
    let lch: Lch<D65, f64> = rgb.into_color_unclamped();

    if lch.chroma.is_nan() || lch.chroma < ACHROMATIC_CHROMA {
        return Hcl {
            hue: 0.0,
            chroma: 0.0,
            luminance: lch.l,
        };
    }

    Hcl {
        hue: lch.hue.into_positive_degrees(),
        chroma: lch.chroma,
        luminance: lch.l,
    }
}

/// Converts a perceptual value back to an opaque color.
///
/// Hue may be any finite angle; it wraps. Results outside the sRGB gamut are
/// clamped channel by channel.
pub fn from_perceptual(hcl: Hcl) -> Color {
    let lch = Lch::<D65, f64>::new(hcl.luminance, hcl.chroma, hcl.hue);
    let rgb: Srgb<f64> = lch.into_color_unclamped();
    let rgb = rgb.clamp();
    Color::opaque(quantize(rgb.red), quantize(rgb.green), quantize(rgb.blue))
}

// `as` saturates and sends NaN to 0.
fn quantize(channel: f64) -> u16 {
    (channel * CHANNEL_MAX + 0.5) as u16
}

/// Rotates the hue of `color` by `offset` degrees.
///
/// Fully transparent colors come back untouched. Every other color keeps its
/// original alpha exactly, whatever the conversion does to the other channels.
pub fn shift_hue(offset: f64, color: Color) -> Color {
    if color.is_transparent() {
        return color;
    }

    let mut hcl = to_perceptual(color);
    hcl.hue += offset;

    Color {
        a: color.a,
        ..from_perceptual(hcl)
    }
}

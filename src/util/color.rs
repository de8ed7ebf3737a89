//! Hex color conversion.

/// Split a `0xRRGGBB` color into sRGB channels in `[0, 1]`.
#[must_use]
pub fn hex_to_srgb(hex: u32) -> [f32; 3] {
    let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
    [channel(16), channel(8), channel(0)]
}

/// sRGB transfer function inverse for one channel.
#[must_use]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// `0xRRGGBB` to linear RGB, the space lighting is computed in.
#[must_use]
pub fn hex_to_linear(hex: u32) -> [f32; 3] {
    hex_to_srgb(hex).map(srgb_to_linear)
}

/// Clear color for a `0xRRGGBB` background. sRGB surfaces encode on
/// write and take linear values; other surfaces store the raw channels.
#[must_use]
pub fn clear_color(hex: u32, srgb_surface: bool) -> wgpu::Color {
    let [r, g, b] = if srgb_surface {
        hex_to_linear(hex)
    } else {
        hex_to_srgb(hex)
    };
    wgpu::Color {
        r: f64::from(r),
        g: f64::from(g),
        b: f64::from(b),
        a: 1.0,
    }
}

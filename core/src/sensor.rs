//! Signal normalizer: raw sensor color to a scalar intensity in [0, 1].

use crate::types::{ColorSample, ReferenceColors, Rgb};

/// Position of `sample` on the off-to-on axis for one channel, clamped to
/// [0, 1]. A channel whose references coincide carries no information and
/// contributes a constant 0.5.
fn channel_intensity(sample: u8, off: u8, on: u8) -> f32 {
    if on == off {
        return 0.5;
    }
    let t = (sample as f32 - off as f32) / (on as f32 - off as f32);
    t.clamp(0.0, 1.0)
}

/// Mean per-channel inverse lerp between the off and on references.
/// Always in [0, 1], even for out-of-gamut or noisy samples.
pub fn normalize_color(color: Rgb, refs: &ReferenceColors) -> f32 {
    let r = channel_intensity(color.r, refs.off.r, refs.on.r);
    let g = channel_intensity(color.g, refs.off.g, refs.on.g);
    let b = channel_intensity(color.b, refs.off.b, refs.on.b);
    (r + g + b) / 3.0
}

pub fn normalize(sample: &ColorSample, refs: &ReferenceColors) -> f32 {
    normalize_color(sample.color, refs)
}

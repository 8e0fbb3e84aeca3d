//! Fixed-point colour blending for 24-bit RGB pixels.

/// Full weight: the source replaces the destination.
pub const OPAQUE_WEIGHT: u32 = 256;

/// Blend weight for a widget's raw alpha byte.
///
/// Raw alpha 0 maps to 256 (opaque), 255 maps to 1 (all but invisible).
#[inline]
pub fn weight_from_alpha(alpha: u8) -> u32 {
    256 - (alpha as u32 & 0xFF)
}

/// `(src * weight + dst * (256 - weight)) >> 8` per channel.
///
/// Weights above 256 are treated as 256.
#[inline]
pub fn blend(src: u32, dst: u32, weight: u32) -> u32 {
    let weight = weight.min(OPAQUE_WEIGHT);
    let inverse = OPAQUE_WEIGHT - weight;
    let r = (((src >> 16) & 0xFF) * weight + ((dst >> 16) & 0xFF) * inverse) >> 8;
    let g = (((src >> 8) & 0xFF) * weight + ((dst >> 8) & 0xFF) * inverse) >> 8;
    let b = ((src & 0xFF) * weight + (dst & 0xFF) * inverse) >> 8;
    (r << 16) | (g << 8) | b
}

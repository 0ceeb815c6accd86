pub mod math {
    pub fn degree_to_radian(degree: f32) -> f32 {
        degree * std::f32::consts::PI / 180.0
    }
}

/// Packed pixel helpers. Pixels are `0xAARRGGBB`.
pub mod color {
    pub fn clamp(color: glam::Vec4) -> glam::Vec4 {
        color.clamp(glam::Vec4::ZERO, glam::Vec4::ONE)
    }

    /// Channels are truncated, not rounded: `(c * 255.0) as u8`.
    pub fn pack_argb(color: glam::Vec4) -> u32 {
        let r = (color.x * 255.0) as u8;
        let g = (color.y * 255.0) as u8;
        let b = (color.z * 255.0) as u8;
        let a = (color.w * 255.0) as u8;

        (u32::from(a) << 24) | (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
    }

    /// Split a packed pixel into `[r, g, b, a]` bytes.
    pub fn unpack_argb(pixel: u32) -> [u8; 4] {
        let [a, r, g, b] = pixel.to_be_bytes();
        [r, g, b, a]
    }

}

//! Packed ARGB8888 colors used by the diagnostic renderer.

pub const BACKGROUND: u32 = 0xFFF4F4F0;
pub const DIVIDER: u32 = 0xFFB0B0B0;
pub const WIREFRAME: u32 = 0xFF101010;
pub const AXIS_X: u32 = 0xFFE03030;
pub const AXIS_Y: u32 = 0xFF30A030;
pub const AXIS_Z: u32 = 0xFF3050E0;
pub const INSIDE: u32 = 0xFF00B000;
pub const OUTSIDE: u32 = 0xFFE00000;

/// Split ARGB8888 into `[r, g, b, a]` bytes.
pub fn to_rgba_bytes(color: u32) -> [u8; 4] {
    let [a, r, g, b] = color.to_be_bytes();
    [r, g, b, a]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_moves_alpha_last() {
        assert_eq!(to_rgba_bytes(0xFFFF0080), [0xFF, 0x00, 0x80, 0xFF]);
        assert_eq!(to_rgba_bytes(INSIDE), [0x00, 0xB0, 0x00, 0xFF]);
    }
}

//! Per-position bit mixing of a minute index
//!
//! Each position gets its own mixer so adjacent minutes land on
//! unrelated words. All arithmetic is wrapping u32.

/// A minute mixer: takes a minute index, returns a 32-bit value
pub type Transform = fn(u32) -> u32;

/// Multiply by a large odd constant
pub fn multiply(minute: u32) -> u32 {
    minute.wrapping_mul(0x6D2B_79F5)
}

/// Rotate left by 13 bits
pub fn rotate(minute: u32) -> u32 {
    minute.rotate_left(13)
}

/// XOR with a fixed constant
pub fn xor(minute: u32) -> u32 {
    minute ^ 0xDEAD_BEEF
}

/// One linear congruential step (Numerical Recipes constants)
pub fn lcg(minute: u32) -> u32 {
    minute.wrapping_mul(0x0019_660D).wrapping_add(0x3C6E_F35F)
}

/// Exchange the odd and even bit lanes
pub fn swap_lanes(minute: u32) -> u32 {
    ((minute & 0x5555_5555) << 1) | ((minute & 0xAAAA_AAAA) >> 1)
}

/// Reference mixers, one per label position, in position order
pub const REFERENCE_TRANSFORMS: [Transform; 5] = [multiply, rotate, xor, lcg, swap_lanes];

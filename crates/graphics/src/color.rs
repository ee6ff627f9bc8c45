use bytemuck::Pod;
use bytemuck::Zeroable;

// All colors are in linear sRGB space.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    pub const TRANSPARENT: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    pub fn srgb(r: f32, g: f32, b: f32, a: f32) -> Self {
        let srgb =
            color::AlphaColor::<color::Srgb>::new([r, g, b, a]).convert::<color::LinearSrgb>();

        Self {
            r: srgb.components[0],
            g: srgb.components[1],
            b: srgb.components[2],
            a: srgb.components[3],
        }
    }

    pub fn srgb8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::srgb(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// Parses `#rrggbb` or `#rrggbbaa` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);

        if !matches!(digits.len(), 6 | 8) || !digits.is_ascii() {
            return Err(ColorParseError::Length(digits.len()));
        }

        // `from_str_radix` alone would accept a leading sign.
        let channel = |i: usize| {
            let pair = &digits[i..i + 2];
            if !pair.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(ColorParseError::Digit(pair.to_string()));
            }
            u8::from_str_radix(pair, 16).map_err(|_| ColorParseError::Digit(pair.to_string()))
        };

        let alpha = if digits.len() == 8 { channel(6)? } else { 255 };

        Ok(Self::srgb8(channel(0)?, channel(2)?, channel(4)?, alpha))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColorParseError {
    Length(usize),
    Digit(String),
}

impl std::fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColorParseError::Length(len) => {
                write!(f, "expected 6 or 8 hex digits, found {len}")
            }
            ColorParseError::Digit(pair) => write!(f, "invalid hex pair {pair:?}"),
        }
    }
}

impl std::error::Error for ColorParseError {}

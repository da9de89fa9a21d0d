use palette::{FromColor, Hsv, IntoColor, Lab, Srgb};

/// An RGB color in Cavasik's wire format: three channels, no alpha.
///
/// `Display` renders the `R,G,B` decimal form used by the color files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hsv(self) -> Hsv {
        let srgb: Srgb<f32> = Srgb::new(self.r, self.g, self.b).into_format();
        Hsv::from_color(srgb)
    }

    pub fn from_hsv(hsv: Hsv) -> Self {
        let srgb = Srgb::from_color(hsv);
        Self::from_srgb_f32(srgb)
    }

    /// Convert from CIELAB (the extraction pipeline clusters in Lab space).
    pub fn from_lab(lab: Lab) -> Self {
        let srgb = Srgb::from_color(lab);
        Self::from_srgb_f32(srgb)
    }

    pub fn to_lab(self) -> Lab {
        let srgb: Srgb<f32> = Srgb::new(self.r, self.g, self.b).into_format();
        srgb.into_color()
    }

    /// Scale each channel by `factor` directly in RGB space, truncating to
    /// integer. Used by the reversed-gradient background, which darkens
    /// componentwise rather than through HSV.
    pub fn scale(self, factor: f32) -> Self {
        Self {
            r: (f32::from(self.r) * factor).clamp(0.0, 255.0) as u8,
            g: (f32::from(self.g) * factor).clamp(0.0, 255.0) as u8,
            b: (f32::from(self.b) * factor).clamp(0.0, 255.0) as u8,
        }
    }

    /// Clamp to [0, 1] per channel, then truncate to integer [0, 255].
    fn from_srgb_f32(srgb: Srgb<f32>) -> Self {
        Self {
            r: (srgb.red.clamp(0.0, 1.0) * 255.0) as u8,
            g: (srgb.green.clamp(0.0, 1.0) * 255.0) as u8,
            b: (srgb.blue.clamp(0.0, 1.0) * 255.0) as u8,
        }
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{},{}", self.r, self.g, self.b)
    }
}

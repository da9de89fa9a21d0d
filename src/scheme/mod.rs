use clap::ValueEnum;
use palette::Hsv;

use crate::color::Rgb;

/// Stylistic palette-to-color-file schemes. Closed set; anything else a user
/// types or persists resolves to `DominantBg` at the parse boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Scheme {
    /// Solid background from the most dominant album color, vibrant gradient
    /// foreground.
    #[default]
    #[value(name = "dominant_bg")]
    DominantBg,
    /// Maximum-saturation style with complementary (hue-shifted) backgrounds.
    #[value(name = "neon")]
    Neon,
    /// Pure black background for maximum contrast.
    #[value(name = "black_bg")]
    BlackBg,
    /// Reversed, darkened palette as the background.
    #[value(name = "gradient_reverse")]
    GradientReverse,
}

/// Tunables for `dominant_bg`. Boosts are multiplicative in HSV space.
pub struct DominantBgParams {
    pub fg_saturation_boost: f32,
    pub fg_brightness_boost: f32,
    pub bg_saturation: f32,
    pub bg_brightness: f32,
}

/// Tunables for `neon`. Unlike the other schemes, `bg_saturation` and
/// `bg_brightness` here are absolute replacements, not multipliers.
pub struct NeonParams {
    pub fg_saturation_boost: f32,
    pub fg_brightness_boost: f32,
    /// Fraction of the hue circle; 0.5 is the complementary hue.
    pub bg_hue_shift: f32,
    pub bg_saturation: f32,
    pub bg_brightness: f32,
}

pub struct BlackBgParams {
    pub fg_saturation_boost: f32,
    pub fg_brightness_boost: f32,
}

/// Tunables for `gradient_reverse`. `bg_brightness` scales RGB channels
/// directly, without an HSV round trip.
pub struct GradientReverseParams {
    pub fg_saturation_boost: f32,
    pub fg_brightness_boost: f32,
    pub bg_brightness: f32,
}

pub const DOMINANT_BG: DominantBgParams = DominantBgParams {
    fg_saturation_boost: 1.4,
    fg_brightness_boost: 1.3,
    bg_saturation: 0.6,
    bg_brightness: 0.28,
};

pub const NEON: NeonParams = NeonParams {
    fg_saturation_boost: 1.5,
    fg_brightness_boost: 1.3,
    bg_hue_shift: 0.5,
    bg_saturation: 0.6,
    bg_brightness: 0.18,
};

pub const BLACK_BG: BlackBgParams = BlackBgParams {
    fg_saturation_boost: 1.3,
    fg_brightness_boost: 1.2,
};

pub const GRADIENT_REVERSE: GradientReverseParams = GradientReverseParams {
    fg_saturation_boost: 1.2,
    fg_brightness_boost: 1.1,
    bg_brightness: 0.3,
};

impl Scheme {
    pub const ALL: [Scheme; 4] = [
        Scheme::DominantBg,
        Scheme::Neon,
        Scheme::BlackBg,
        Scheme::GradientReverse,
    ];

    /// Parse a persisted scheme name. `None` means the caller should fall
    /// back to the default and warn.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "dominant_bg" => Some(Scheme::DominantBg),
            "neon" => Some(Scheme::Neon),
            "black_bg" => Some(Scheme::BlackBg),
            "gradient_reverse" => Some(Scheme::GradientReverse),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Scheme::DominantBg => "dominant_bg",
            Scheme::Neon => "neon",
            Scheme::BlackBg => "black_bg",
            Scheme::GradientReverse => "gradient_reverse",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Scheme::DominantBg => {
                "solid background from the most dominant album color, vibrant gradient foreground (default)"
            }
            Scheme::Neon => {
                "maximum saturation with complementary colored backgrounds; suits electronic and synthwave"
            }
            Scheme::BlackBg => "pure black background, maximum contrast",
            Scheme::GradientReverse => "reversed color palette background for visual depth",
        }
    }
}

/// Map a palette to (foreground, background) color sequences.
///
/// Pure and deterministic; both outputs have the palette's length and the
/// foreground always uses the shared HSV boost rule with the scheme's own
/// constants.
pub fn transform(palette: &[Rgb], scheme: Scheme) -> (Vec<Rgb>, Vec<Rgb>) {
    match scheme {
        Scheme::DominantBg => (
            boost_all(
                palette,
                DOMINANT_BG.fg_saturation_boost,
                DOMINANT_BG.fg_brightness_boost,
            ),
            dominant_background(palette),
        ),
        Scheme::Neon => (
            boost_all(palette, NEON.fg_saturation_boost, NEON.fg_brightness_boost),
            neon_background(palette),
        ),
        Scheme::BlackBg => (
            boost_all(
                palette,
                BLACK_BG.fg_saturation_boost,
                BLACK_BG.fg_brightness_boost,
            ),
            vec![Rgb::BLACK; palette.len()],
        ),
        Scheme::GradientReverse => (
            boost_all(
                palette,
                GRADIENT_REVERSE.fg_saturation_boost,
                GRADIENT_REVERSE.fg_brightness_boost,
            ),
            palette
                .iter()
                .rev()
                .map(|c| c.scale(GRADIENT_REVERSE.bg_brightness))
                .collect(),
        ),
    }
}

/// Shared foreground rule: multiply saturation and value in HSV, capped at 1.0.
fn boost(color: Rgb, saturation: f32, brightness: f32) -> Rgb {
    let mut hsv = color.to_hsv();
    hsv.saturation = (hsv.saturation * saturation).min(1.0);
    hsv.value = (hsv.value * brightness).min(1.0);
    Rgb::from_hsv(hsv)
}

fn boost_all(palette: &[Rgb], saturation: f32, brightness: f32) -> Vec<Rgb> {
    palette
        .iter()
        .map(|&c| boost(c, saturation, brightness))
        .collect()
}

/// One darkened copy of the most dominant color, replicated to a solid
/// background sequence.
fn dominant_background(palette: &[Rgb]) -> Vec<Rgb> {
    let Some(&dominant) = palette.first() else {
        return Vec::new();
    };
    let mut hsv = dominant.to_hsv();
    hsv.saturation = (hsv.saturation * DOMINANT_BG.bg_saturation).min(1.0);
    hsv.value = (hsv.value * DOMINANT_BG.bg_brightness).min(1.0);
    vec![Rgb::from_hsv(hsv); palette.len()]
}

/// Hue-shifted gradient: each palette color moves to its complementary hue
/// with fixed (absolute) saturation and value.
fn neon_background(palette: &[Rgb]) -> Vec<Rgb> {
    palette
        .iter()
        .map(|&c| {
            let hsv = c.to_hsv();
            let shifted = Hsv::new(
                hsv.hue + NEON.bg_hue_shift * 360.0,
                NEON.bg_saturation,
                NEON.bg_brightness,
            );
            Rgb::from_hsv(shifted)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_palette() -> Vec<Rgb> {
        vec![
            Rgb::new(200, 50, 50),
            Rgb::new(10, 10, 200),
            Rgb::new(0, 255, 0),
            Rgb::new(128, 128, 128),
            Rgb::new(255, 255, 0),
        ]
    }

    #[test]
    fn outputs_match_palette_length_for_every_scheme() {
        let palette = sample_palette();
        for scheme in Scheme::ALL {
            let (fg, bg) = transform(&palette, scheme);
            assert_eq!(fg.len(), palette.len(), "fg length for {scheme:?}");
            assert_eq!(bg.len(), palette.len(), "bg length for {scheme:?}");
        }
    }

    #[test]
    fn empty_palette_yields_empty_outputs() {
        for scheme in Scheme::ALL {
            let (fg, bg) = transform(&[], scheme);
            assert!(fg.is_empty() && bg.is_empty(), "{scheme:?}");
        }
    }

    #[test]
    fn boost_saturates_at_the_hsv_ceiling() {
        // Already-maximal colors clamp at s = v = 1.0 and pass through.
        assert_eq!(boost(Rgb::new(255, 255, 255), 1.5, 1.3), Rgb::new(255, 255, 255));
        assert_eq!(boost(Rgb::new(255, 0, 0), 1.5, 1.3), Rgb::new(255, 0, 0));
        assert_eq!(boost(Rgb::BLACK, 1.5, 1.3), Rgb::BLACK);
    }

    #[test]
    fn dominant_bg_background_is_solid_and_derived_from_first_entry() {
        let palette = sample_palette();
        let (_, bg) = transform(&palette, Scheme::DominantBg);
        for entry in &bg {
            assert_eq!(*entry, bg[0], "background must be a solid color");
        }

        // Only the first palette entry matters: perturbing the rest changes
        // nothing.
        let mut reordered = palette.clone();
        reordered[1..].reverse();
        let (_, bg2) = transform(&reordered, Scheme::DominantBg);
        assert_eq!(bg, bg2);

        // And it is a darkened version of that entry.
        let dominant_hsv = palette[0].to_hsv();
        let bg_hsv = bg[0].to_hsv();
        assert!(bg_hsv.value < dominant_hsv.value);
    }

    #[test]
    fn black_bg_background_is_all_zero() {
        let (_, bg) = transform(&sample_palette(), Scheme::BlackBg);
        assert!(bg.iter().all(|c| *c == Rgb::BLACK));
    }

    #[test]
    fn gradient_reverse_background_is_reversed_and_scaled() {
        let palette = sample_palette();
        let (_, bg) = transform(&palette, Scheme::GradientReverse);
        let n = palette.len();
        for (i, entry) in bg.iter().enumerate() {
            assert_eq!(*entry, palette[n - 1 - i].scale(0.3), "entry {i}");
        }
        // Spot-check the exact floored channels for the first source color.
        assert_eq!(bg[n - 1], Rgb::new(60, 15, 15));
        assert_eq!(bg[0], Rgb::new(76, 76, 0));
    }

    #[test]
    fn neon_background_shifts_hue_to_complementary() {
        let palette = sample_palette();
        let (_, bg) = transform(&palette, Scheme::Neon);
        for (src, out) in palette.iter().zip(&bg) {
            // Gray has no meaningful hue; skip it.
            if src.r == src.g && src.g == src.b {
                continue;
            }
            let src_hue = src.to_hsv().hue.into_positive_degrees();
            let out_hue = out.to_hsv().hue.into_positive_degrees();
            let diff = (out_hue - src_hue).rem_euclid(360.0);
            assert!(
                (diff - 180.0).abs() < 4.0,
                "hue shift for {src:?} was {diff} degrees"
            );
        }
    }

    #[test]
    fn neon_background_uses_absolute_saturation_and_value() {
        let (_, bg) = transform(&sample_palette(), Scheme::Neon);
        for out in &bg {
            let hsv = out.to_hsv();
            // Quantizing through u8 at value 0.18 is coarse; allow slack.
            assert!((hsv.value - 0.18).abs() < 0.02, "value was {}", hsv.value);
            assert!(
                (hsv.saturation - 0.6).abs() < 0.05,
                "saturation was {}",
                hsv.saturation
            );
        }
    }

    #[test]
    fn unknown_name_parses_to_none_and_default_matches_dominant_bg() {
        assert_eq!(Scheme::from_name("vaporwave"), None);
        let fallback = Scheme::from_name("vaporwave").unwrap_or_default();
        assert_eq!(fallback, Scheme::DominantBg);

        let palette = sample_palette();
        let (fg_a, bg_a) = transform(&palette, fallback);
        let (fg_b, bg_b) = transform(&palette, Scheme::DominantBg);
        assert_eq!(fg_a, fg_b);
        assert_eq!(bg_a, bg_b);
    }

    #[test]
    fn known_names_round_trip() {
        for scheme in Scheme::ALL {
            assert_eq!(Scheme::from_name(scheme.name()), Some(scheme));
        }
    }

    #[test]
    fn black_bg_end_to_end_example() {
        let palette = sample_palette();
        let (fg, bg) = transform(&palette, Scheme::BlackBg);

        assert_eq!(bg, vec![Rgb::BLACK; 5]);

        // First foreground entry: (200,50,50) in HSV is (0deg, 0.75, 200/255)
        // then s*1.3=0.975, v*1.2~=0.941, back to RGB ~= (240, 6, 6).
        let first = fg[0];
        assert!(
            (i16::from(first.r) - 240).abs() <= 1,
            "red was {}",
            first.r
        );
        assert!((i16::from(first.g) - 6).abs() <= 1, "green was {}", first.g);
        assert!((i16::from(first.b) - 6).abs() <= 1, "blue was {}", first.b);
    }
}

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{AppConfig, PaletteMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn with_alpha(self, alpha: f32) -> Rgba {
        Rgba { rgb: self, alpha }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub rgb: Rgb,
    pub alpha: f32,
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgba({}, {}, {}, {})",
            self.rgb.r, self.rgb.g, self.rgb.b, self.alpha
        )
    }
}

/// Fill and outline of one bar series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorPair {
    pub background: Rgba,
    pub border: Rgba,
}

impl ColorPair {
    pub fn from_rgb(rgb: Rgb) -> Self {
        Self::from_parts(rgb, rgb)
    }

    pub fn from_parts(background: Rgb, border: Rgb) -> Self {
        Self {
            background: background.with_alpha(0.5),
            border: border.with_alpha(1.0),
        }
    }
}

pub const SUM_COLOR: Rgb = Rgb::new(0, 123, 255);
pub const TEAM_FG_COLOR: Rgb = Rgb::new(255, 99, 132);
pub const TEAM_FT_COLOR: Rgb = Rgb::new(54, 162, 235);

pub trait ColorSource {
    fn next_rgb(&mut self) -> Rgb;

    /// Fill and outline are drawn independently.
    fn next_pair(&mut self) -> ColorPair {
        let background = self.next_rgb();
        let border = self.next_rgb();
        ColorPair::from_parts(background, border)
    }
}

pub struct RandomColors<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomColors<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomColors<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> ColorSource for RandomColors<R> {
    fn next_rgb(&mut self) -> Rgb {
        Rgb::new(
            self.rng.gen_range(0..=255),
            self.rng.gen_range(0..=255),
            self.rng.gen_range(0..=255),
        )
    }
}

/// Cycles through a fixed list of colors.
#[derive(Debug, Clone)]
pub struct FixedPalette {
    colors: Vec<Rgb>,
    next: usize,
}

impl Default for FixedPalette {
    fn default() -> Self {
        Self::new(vec![
            Rgb::new(31, 119, 180),
            Rgb::new(255, 127, 14),
            Rgb::new(44, 160, 44),
            Rgb::new(214, 39, 40),
            Rgb::new(148, 103, 189),
            Rgb::new(140, 86, 75),
            Rgb::new(227, 119, 194),
            Rgb::new(188, 189, 34),
            Rgb::new(23, 190, 207),
        ])
    }
}

impl FixedPalette {
    pub fn new(colors: Vec<Rgb>) -> Self {
        Self { colors, next: 0 }
    }
}

impl ColorSource for FixedPalette {
    fn next_rgb(&mut self) -> Rgb {
        if self.colors.is_empty() {
            return SUM_COLOR;
        }
        let color = self.colors[self.next % self.colors.len()];
        self.next = (self.next + 1) % self.colors.len();
        color
    }

    // One palette slot per series so fill and outline match.
    fn next_pair(&mut self) -> ColorPair {
        ColorPair::from_rgb(self.next_rgb())
    }
}

pub fn color_source_from_config(config: &AppConfig) -> Box<dyn ColorSource> {
    match (config.palette, config.color_seed) {
        (PaletteMode::Fixed, _) => Box::new(FixedPalette::default()),
        (PaletteMode::Random, Some(seed)) => Box::new(RandomColors::seeded(seed)),
        (PaletteMode::Random, None) => Box::new(RandomColors::from_entropy()),
    }
}

//! RGB values for abstract colorings.
//!
//! Factions use fixed colors. Clusters are open-ended, so their colors are
//! generated: either from a fixed categorical list extended along the
//! golden angle, or from an explicitly seeded generator. Both are
//! deterministic, and both never hand out the same RGB value twice or reuse
//! the neutral grey.

use std::fmt;

use ahash::{HashSet, HashSetExt};
use rand::{rngs::SmallRng, Rng, SeedableRng};

use super::{ClusterColor, ColorAssignment, PartitionColor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const NEUTRAL: Rgb = Rgb::new(0x80, 0x80, 0x80);
    pub const RED: Rgb = Rgb::new(0xd6, 0x27, 0x28);
    pub const BLUE: Rgb = Rgb::new(0x1f, 0x77, 0xb4);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// `hue` in degrees, `saturation` and `value` in `[0, 1]`.
    pub fn from_hsv(hue: f64, saturation: f64, value: f64) -> Self {
        let hue = hue.rem_euclid(360.0) / 60.0;
        let c = value * saturation;
        let x = c * (1.0 - (hue % 2.0 - 1.0).abs());
        let (r, g, b) = match hue as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = value - c;
        let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Rgb::new(channel(r), channel(g), channel(b))
    }

    /// The low 24 bits of `v` as `0xrrggbb`.
    pub const fn from_u24(v: u32) -> Self {
        Rgb::new((v >> 16) as u8, (v >> 8) as u8, v as u8)
    }

    /// Euclidean distance in RGB space.
    pub fn distance(self, other: Rgb) -> f64 {
        let d = |a: u8, b: u8| (a as f64 - b as f64).powi(2);
        (d(self.r, other.r) + d(self.g, other.g) + d(self.b, other.b)).sqrt()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<PartitionColor> for Rgb {
    fn from(color: PartitionColor) -> Self {
        match color {
            PartitionColor::FactionA => Rgb::RED,
            PartitionColor::FactionB => Rgb::BLUE,
            PartitionColor::Unclassified => Rgb::NEUTRAL,
        }
    }
}

/// Category-10 without its grey, red first so the root cluster is red.
const CATEGORICAL: [Rgb; 9] = [
    Rgb::RED,
    Rgb::BLUE,
    Rgb::new(0x2c, 0xa0, 0x2c),
    Rgb::new(0xff, 0x7f, 0x0e),
    Rgb::new(0x94, 0x67, 0xbd),
    Rgb::new(0x8c, 0x56, 0x4b),
    Rgb::new(0xe3, 0x77, 0xc2),
    Rgb::new(0x17, 0xbe, 0xcf),
    Rgb::new(0xbc, 0xbd, 0x22),
];

const GOLDEN_ANGLE: f64 = 137.507_764_050_037_85;
/// Saturation and value of the generated categorical colors, cycled by
/// index so that consecutive clusters differ in more than hue.
const RINGS: [(f64, f64); 6] = [
    (0.75, 0.85),
    (0.5, 0.85),
    (0.75, 0.65),
    (0.5, 0.65),
    (0.9, 0.5),
    (0.35, 0.95),
];
/// Odd, so stepping by it visits every 24-bit value once.
const SCAN_STRIDE: u32 = 0x9e_37_79;
const SEEDED_MIN_DISTANCE: f64 = 64.0;
const SEEDED_ATTEMPTS: usize = 64;
/// Past this many colors, spacing is no longer attempted.
const SEEDED_SPACED_LIMIT: usize = 256;

/// The `k`-th color after the fixed list: a golden-angle hue on its ring,
/// nudged by whole degrees past colors already taken. Once its ring is
/// exhausted, the first unused color of a full 24-bit scan.
fn generated(k: usize, used: &HashSet<Rgb>) -> Rgb {
    let (saturation, value) = RINGS[k % RINGS.len()];
    let hue = 20.0 + k as f64 * GOLDEN_ANGLE;
    (0..360)
        .map(|step| Rgb::from_hsv(hue + step as f64, saturation, value))
        .find(|c| !used.contains(c))
        .or_else(|| first_unused(k, used))
        .unwrap_or(Rgb::NEUTRAL)
}

/// `None` only when all of RGB space is taken.
fn first_unused(k: usize, used: &HashSet<Rgb>) -> Option<Rgb> {
    let start = (k as u32).wrapping_mul(SCAN_STRIDE);
    (0..1u32 << 24)
        .map(|i| Rgb::from_u24(start.wrapping_add(i.wrapping_mul(SCAN_STRIDE))))
        .find(|c| !used.contains(c))
}

/// How cluster indices become colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClusterPalette {
    #[default]
    Categorical,
    Seeded(u64),
}

impl ClusterPalette {
    /// The colors of clusters `0..n`.
    pub fn colors(&self, n: usize) -> Vec<Rgb> {
        let mut used = HashSet::with_capacity(n + 1);
        used.insert(Rgb::NEUTRAL);
        let mut out = Vec::with_capacity(n);
        match *self {
            ClusterPalette::Categorical => {
                for i in 0..n {
                    let color = match CATEGORICAL.get(i) {
                        Some(&c) => c,
                        None => generated(i - CATEGORICAL.len(), &used),
                    };
                    used.insert(color);
                    out.push(color);
                }
            }
            ClusterPalette::Seeded(seed) => {
                let mut rng = SmallRng::seed_from_u64(seed);
                for _ in 0..n {
                    let mut pick = || Rgb::new(rng.gen(), rng.gen(), rng.gen());
                    let attempts = if used.len() <= SEEDED_SPACED_LIMIT {
                        SEEDED_ATTEMPTS
                    } else {
                        0
                    };
                    let spaced = (0..attempts).map(|_| pick()).find(|c| {
                        used.iter()
                            .all(|&u| c.distance(u) >= SEEDED_MIN_DISTANCE)
                    });
                    let color = match spaced {
                        Some(c) => c,
                        None => std::iter::repeat_with(pick)
                            .find(|c| !used.contains(c))
                            .unwrap_or(Rgb::NEUTRAL),
                    };
                    used.insert(color);
                    out.push(color);
                }
            }
        }
        out
    }

    /// Colors for every cluster of `assignment`.
    pub fn resolve(&self, assignment: &ColorAssignment<ClusterColor>) -> Vec<Rgb> {
        self.colors(assignment.n_clusters())
    }
}

// Silkscreen - Static artwork printed below the LCD
//
// Newton devices have a silkscreened strip with soft buttons under the
// panel. The artwork ships as an XBM bitmap: 1 bpp, rows padded to a whole
// byte, least significant bit first, set bit = ink.

use super::geometry::Geometry;
use super::palette::{BLACK_COLOR, WHITE_COLOR};
use std::fs;
use std::io;
use std::path::Path;

/// Errors that can occur while loading silkscreen artwork
#[derive(Debug)]
pub enum SilkscreenError {
    /// I/O error
    Io(io::Error),

    /// Malformed XBM source
    Parse(String),
}

impl std::fmt::Display for SilkscreenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SilkscreenError::Io(e) => write!(f, "I/O error: {}", e),
            SilkscreenError::Parse(msg) => write!(f, "XBM parse error: {}", msg),
        }
    }
}

impl std::error::Error for SilkscreenError {}

impl From<io::Error> for SilkscreenError {
    fn from(e: io::Error) -> Self {
        SilkscreenError::Io(e)
    }
}

/// Decoded silkscreen artwork, one pixel level per byte
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Silkscreen {
    geometry: Geometry,
    pixels: Vec<u8>,
}

impl Silkscreen {
    /// Decode packed XBM bits
    ///
    /// # Arguments
    /// * `geometry` - Bitmap size in pixels
    /// * `bits` - Packed rows, `(width + 7) / 8` bytes each
    pub fn from_bits(geometry: Geometry, bits: &[u8]) -> Result<Self, SilkscreenError> {
        let count = geometry
            .validate()
            .map_err(|e| SilkscreenError::Parse(e.to_string()))?;

        let row_bytes = (geometry.width as usize).div_ceil(8);
        let needed = row_bytes * geometry.height as usize;
        if bits.len() < needed {
            return Err(SilkscreenError::Parse(format!(
                "expected {} bytes of bitmap data, found {}",
                needed,
                bits.len()
            )));
        }

        let mut pixels = Vec::with_capacity(count);
        for row in bits[..needed].chunks_exact(row_bytes) {
            for x in 0..geometry.width as usize {
                let ink = (row[x / 8] >> (x % 8)) & 1 == 1;
                pixels.push(if ink { BLACK_COLOR } else { WHITE_COLOR });
            }
        }

        Ok(Self { geometry, pixels })
    }

    /// Parse XBM source text
    pub fn parse_xbm(source: &str) -> Result<Self, SilkscreenError> {
        let mut width = None;
        let mut height = None;

        for line in source.lines() {
            let mut parts = line.split_whitespace();
            if parts.next() != Some("#define") {
                continue;
            }
            let (Some(name), Some(value)) = (parts.next(), parts.next()) else {
                continue;
            };
            let value: u32 = value
                .parse()
                .map_err(|_| SilkscreenError::Parse(format!("bad value for {}", name)))?;
            if name.ends_with("_width") {
                width = Some(value);
            } else if name.ends_with("_height") {
                height = Some(value);
            }
        }

        let width = width.ok_or_else(|| SilkscreenError::Parse("missing width".into()))?;
        let height = height.ok_or_else(|| SilkscreenError::Parse("missing height".into()))?;

        let start = source
            .find('{')
            .ok_or_else(|| SilkscreenError::Parse("missing bitmap data".into()))?;
        let end = source[start..]
            .find('}')
            .map(|i| start + i)
            .ok_or_else(|| SilkscreenError::Parse("unterminated bitmap data".into()))?;

        let bits = source[start + 1..end]
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(|token| {
                let digits = token
                    .strip_prefix("0x")
                    .or_else(|| token.strip_prefix("0X"))
                    .unwrap_or(token);
                u8::from_str_radix(digits, 16)
                    .map_err(|_| SilkscreenError::Parse(format!("bad byte {:?}", token)))
            })
            .collect::<Result<Vec<u8>, _>>()?;

        Self::from_bits(Geometry::new(width, height), &bits)
    }

    /// Load an XBM file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SilkscreenError> {
        let source = fs::read_to_string(path)?;
        Self::parse_xbm(&source)
    }

    /// Bitmap size
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Decoded pixel levels, row-major
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

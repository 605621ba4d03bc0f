use super::tables::{BASE, CSS4, TABLEAU};
use log::debug;
use rand::SeedableRng;
use rand::seq::index::sample;
use rand_pcg::Pcg64;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ColorError {
    #[error("unknown color table '{0}' (expected css4, tableau or base; load others from a file)")]
    UnknownTable(String),
    #[error("requested {requested} colors but table '{table}' only has {available}")]
    TooManyColors {
        table: String,
        requested: usize,
        available: usize,
    },
    #[error("at least one color must be requested")]
    ZeroColors,
    #[error("invalid hex color '{0}'")]
    InvalidHex(String),
    #[error("could not read color table {path}: {reason}")]
    Unreadable { path: String, reason: String },
    #[error("line {line} of color table is not 'name<TAB>#rrggbb': {text}")]
    BadEntry { line: usize, text: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorTable {
    #[default]
    Css4,
    Tableau,
    Base,
}

impl ColorTable {
    pub fn name(&self) -> &'static str {
        match self {
            ColorTable::Css4 => "css4",
            ColorTable::Tableau => "tableau",
            ColorTable::Base => "base",
        }
    }

    pub fn entries(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            ColorTable::Css4 => CSS4,
            ColorTable::Tableau => TABLEAU,
            ColorTable::Base => BASE,
        }
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Hex value of the entry at `idx`, `None` past the end of the table.
    pub fn hex(&self, idx: usize) -> Option<&'static str> {
        self.entries().get(idx).map(|(_, hex)| *hex)
    }

    /// Look up a color by name, case-insensitively.
    pub fn lookup(&self, name: &str) -> Option<&'static str> {
        self.entries()
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, hex)| *hex)
    }
}

impl FromStr for ColorTable {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "css4" | "css" => Ok(ColorTable::Css4),
            "tableau" | "tab" => Ok(ColorTable::Tableau),
            "base" => Ok(ColorTable::Base),
            _ => Err(ColorError::UnknownTable(s.to_string())),
        }
    }
}

impl fmt::Display for ColorTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Parse "#RRGGBB" or "RRGGBB".
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let digits = hex.trim_start_matches('#');
        let invalid = || ColorError::InvalidHex(hex.to_string());
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        Ok(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// A color table read at runtime, such as the xkcd color survey's
/// `rgb.txt`. Entries keep the order of the file.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomTable {
    name: String,
    entries: Vec<(String, String)>,
}

impl CustomTable {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ColorError> {
        let path = path.as_ref();
        let unreadable = |e: std::io::Error| ColorError::Unreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        };
        let file = File::open(path).map_err(unreadable)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "custom".to_string());
        Self::parse(&name, BufReader::new(file)).map_err(|e| match e {
            ColorError::Unreadable { reason, .. } => ColorError::Unreadable {
                path: path.display().to_string(),
                reason,
            },
            other => other,
        })
    }

    /// One `name<TAB>#rrggbb` entry per line. Blank lines and lines
    /// starting with `#` are skipped. Without a tab the hex value is the
    /// last whitespace-separated field.
    pub fn parse<R: BufRead>(name: &str, reader: R) -> Result<Self, ColorError> {
        let mut entries = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| ColorError::Unreadable {
                path: name.to_string(),
                reason: e.to_string(),
            })?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let bad = || ColorError::BadEntry {
                line: idx + 1,
                text: trimmed.to_string(),
            };
            let (color, hex) = match trimmed.split_once('\t') {
                Some(pair) => pair,
                None => trimmed.rsplit_once(char::is_whitespace).ok_or_else(bad)?,
            };
            let (color, hex) = (color.trim(), hex.trim());
            if color.is_empty() || Rgb::from_hex(hex).is_err() {
                return Err(bad());
            }
            entries.push((color.to_string(), hex.to_string()));
        }
        Ok(Self {
            name: name.to_string(),
            entries,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hex(&self, idx: usize) -> Option<&str> {
        self.entries.get(idx).map(|(_, hex)| hex.as_str())
    }

    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, hex)| hex.as_str())
    }

    pub fn random_colors(&self, n: usize, seed: Option<u64>) -> Result<Vec<&str>, ColorError> {
        check_count(n, &self.name, self.len())?;
        Ok(random_indices(n, self.len(), seed)
            .into_iter()
            .map(|idx| self.entries[idx].1.as_str())
            .collect())
    }

    pub fn spaced_colors(&self, n: usize) -> Result<Vec<&str>, ColorError> {
        check_count(n, &self.name, self.len())?;
        Ok(spaced_indices(n, self.len())
            .map(|idx| self.entries[idx].1.as_str())
            .collect())
    }
}

fn check_count(n: usize, table: &str, available: usize) -> Result<(), ColorError> {
    if n == 0 {
        return Err(ColorError::ZeroColors);
    }
    if n > available {
        return Err(ColorError::TooManyColors {
            table: table.to_string(),
            requested: n,
            available,
        });
    }
    Ok(())
}

fn random_indices(n: usize, len: usize, seed: Option<u64>) -> Vec<usize> {
    let mut rng = match seed {
        Some(s) => Pcg64::seed_from_u64(s),
        None => Pcg64::from_rng(&mut rand::rng()),
    };
    let picked = sample(&mut rng, len, n).into_vec();
    debug!("sampled {} of {} color indices", picked.len(), len);
    picked
}

/// Indices `round_half_even(i * len / n)` for `i` in `0..n`. Requires
/// `0 < n <= len`.
fn spaced_indices(n: usize, len: usize) -> impl Iterator<Item = usize> {
    let step = len as f64 / n as f64;
    (0..n).map(move |i| (i as f64 * step).round_ties_even() as usize)
}

/// `n` distinct colors drawn at random from `table`. A given `seed` always
/// yields the same selection; without one the generator is seeded from the
/// thread-local RNG.
pub fn random_colors(
    n: usize,
    table: ColorTable,
    seed: Option<u64>,
) -> Result<Vec<&'static str>, ColorError> {
    check_count(n, table.name(), table.len())?;
    let entries = table.entries();
    Ok(random_indices(n, table.len(), seed)
        .into_iter()
        .map(|idx| entries[idx].1)
        .collect())
}

/// `n` colors taken at evenly spaced positions through `table`, starting
/// with the first entry.
pub fn spaced_colors(n: usize, table: ColorTable) -> Result<Vec<&'static str>, ColorError> {
    check_count(n, table.name(), table.len())?;
    let entries = table.entries();
    Ok(spaced_indices(n, table.len())
        .map(|idx| entries[idx].1)
        .collect())
}

/// The default color cycle, repeated as often as needed to give `n` colors.
pub fn default_cycle(n: usize) -> Vec<&'static str> {
    TABLEAU.iter().cycle().take(n).map(|(_, hex)| *hex).collect()
}

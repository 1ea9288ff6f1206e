use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Units per tube in every generated level.
pub const CAPACITY: usize = 4;

const EMPTY_TUBE_REPR: &str = ".";

/// An opaque color token. Only equality carries meaning; the id is the
/// color's position in the palette that produced it.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(usize);

impl Color {
    pub const fn new(id: usize) -> Self {
        Color(id)
    }

    pub fn id(&self) -> usize {
        self.0
    }

    /// Parses labels like "A", "Z", "AA" (case-insensitive).
    pub fn from_label(label: &str) -> Result<Self> {
        let s = label.trim();
        Self::letters_to_id(s)
            .map(Color)
            .ok_or_else(|| Error::InvalidColor(s.to_string()))
    }

    /// Spreadsheet-style base-26 numbering: A=0, B=1, ..., Z=25, AA=26, AB=27, ...
    fn letters_to_id(s: &str) -> Option<usize> {
        let mut acc: usize = 0;
        let mut saw_any = false;

        for ch in s.chars() {
            if !ch.is_ascii_alphabetic() {
                return None;
            }
            let digit = (ch.to_ascii_uppercase() as u8 - b'A') as usize;
            // 1..26 while accumulating, back to 0-based at the end.
            acc = acc.checked_mul(26)?.checked_add(digit + 1)?;
            saw_any = true;
        }

        if !saw_any {
            return None;
        }
        acc.checked_sub(1)
    }

    pub fn label(&self) -> String {
        let mut chars = Vec::new();
        let mut id = self.0;
        loop {
            chars.push((b'A' + (id % 26) as u8) as char);
            if id < 26 {
                break;
            }
            id = id / 26 - 1;
        }
        chars.iter().rev().collect()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// A bounded stack of colors. `layers` runs bottom to top; the last element
/// is the pourable top.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tube {
    id: usize,
    layers: Vec<Color>,
}

impl Tube {
    pub fn new(id: usize, layers: Vec<Color>) -> Self {
        Self { id, layers }
    }

    pub fn empty(id: usize) -> Self {
        Self::new(id, Vec::new())
    }

    /// Parses a tube written bottom to top, e.g. "AAB", "A,B,AA" or "." for empty.
    pub fn new_from_repr(id: usize, repr: &str, capacity: usize) -> Result<Self> {
        let s = repr.trim();
        let mut layers = Vec::new();
        if !s.is_empty() && s != EMPTY_TUBE_REPR {
            if s.contains(',') {
                for token in s.split(',').filter(|t| !t.trim().is_empty()) {
                    layers.push(Color::from_label(token)?);
                }
            } else {
                for ch in s.chars() {
                    layers.push(Color::from_label(&ch.to_string())?);
                }
            }
        }
        if layers.len() > capacity {
            return Err(Error::TubeOverCapacity {
                len: layers.len(),
                capacity,
            });
        }
        Ok(Self::new(id, layers))
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn layers(&self) -> &[Color] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn is_full(&self, capacity: usize) -> bool {
        self.layers.len() >= capacity
    }

    pub fn free_space(&self, capacity: usize) -> usize {
        capacity.saturating_sub(self.layers.len())
    }

    pub fn top(&self) -> Option<Color> {
        self.layers.last().copied()
    }

    /// Number of contiguous units at the top sharing the top color.
    pub fn top_run_len(&self) -> usize {
        let Some(top) = self.top() else {
            return 0;
        };
        self.layers.iter().rev().take_while(|c| **c == top).count()
    }

    pub fn is_monochrome(&self) -> bool {
        match self.layers.first() {
            Some(first) => self.layers.iter().all(|c| c == first),
            None => true,
        }
    }

    /// Empty, or full and of a single color. A partial homogeneous tube is not solved.
    pub fn is_solved(&self, capacity: usize) -> bool {
        self.is_empty() || (self.layers.len() == capacity && self.is_monochrome())
    }

    pub fn text_representation(&self) -> String {
        if self.layers.is_empty() {
            return EMPTY_TUBE_REPR.to_string();
        }
        let labels: Vec<String> = self.layers.iter().map(Color::label).collect();
        let has_multi_char = labels.iter().any(|s| s.len() > 1);
        if !has_multi_char {
            return labels.concat();
        }
        let joined = labels.join(",");
        // A lone multi-letter label needs a comma to not read as one unit per letter.
        if labels.len() == 1 {
            format!("{joined},")
        } else {
            joined
        }
    }
}

impl fmt::Display for Tube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text_representation())
    }
}

/// Generator output, before tube identities are assigned.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDefinition {
    pub id: u32,
    pub tubes: Vec<Vec<Color>>,
    pub capacity: usize,
}

impl LevelDefinition {
    /// Fresh tubes for a level start; each tube's id is its position.
    pub fn instantiate(&self) -> Vec<Tube> {
        self.tubes
            .iter()
            .enumerate()
            .map(|(id, layers)| Tube::new(id, layers.clone()))
            .collect()
    }

    pub fn unit_count(&self) -> usize {
        self.tubes.iter().map(Vec::len).sum()
    }
}

/// Renders a board as space-separated tubes, e.g. "AAB BBA .".
pub fn format_board(tubes: &[Tube]) -> String {
    tubes
        .iter()
        .map(Tube::text_representation)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parses the output of [`format_board`]. Tube ids follow position.
pub fn parse_board(repr: &str, capacity: usize) -> Result<Vec<Tube>> {
    repr.split_whitespace()
        .enumerate()
        .map(|(id, token)| Tube::new_from_repr(id, token, capacity))
        .collect()
}

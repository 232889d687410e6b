//! Time-to-phrase composition
//!
//! Turns an `(hour, minute)` reading into the words lit on the plate:
//!
//! | minute (half-to on) | phrase                   |
//! |---------------------|--------------------------|
//! | 00-07               | NINE                     |
//! | 08-22               | A QUARTER PAST NINE      |
//! | 23-29               | HALF PAST NINE           |
//! | 30-37               | HALF TO TEN              |
//! | 38-52               | A QUARTER TO TEN         |
//! | 53-59               | TEN                      |
//!
//! With half-to disabled, HALF PAST runs until minute 37.

use crate::glyph::GlyphId;
use crate::pixels::PixelBuffer;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Minutes below this are shown as the full hour
pub const QUARTER_FROM: u8 = 8;

/// Minutes from here on are shown as "HALF"
pub const HALF_FROM: u8 = 15 + QUARTER_FROM;

/// Phrasing options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Phrasing {
    /// Allow "HALF TO X" from x:30; otherwise "HALF PAST" lasts until x:37
    pub half_to_enabled: bool,
}

impl Default for Phrasing {
    fn default() -> Self {
        Self {
            half_to_enabled: true,
        }
    }
}

impl Phrasing {
    /// First minute that counts down to the next hour
    pub fn countdown_from(&self) -> u8 {
        if self.half_to_enabled {
            30
        } else {
            38
        }
    }
}

/// Word relating the minutes to the hour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Relation {
    Past,
    To,
}

impl Relation {
    fn glyph(self) -> GlyphId {
        match self {
            Relation::Past => GlyphId::Past,
            Relation::To => GlyphId::To,
        }
    }
}

/// Minute word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Fraction {
    AQuarter,
    Half,
}

impl Fraction {
    fn glyph(self) -> GlyphId {
        match self {
            Fraction::AQuarter => GlyphId::AQuarter,
            Fraction::Half => GlyphId::Half,
        }
    }
}

/// The words that spell one time of day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Phrase {
    /// Hour numeral, 1-12
    pub hour: u8,
    /// Fraction and its relation to the hour; `None` on the full hour
    pub fraction: Option<(Fraction, Relation)>,
}

impl Phrase {
    /// Phrase for `hour` (0-23) and `minute` (0-59)
    pub fn for_time(hour: u8, minute: u8, phrasing: Phrasing) -> Self {
        let (mut hour, minute, relation) = if minute < phrasing.countdown_from() {
            (hour, minute, Relation::Past)
        } else {
            (hour + 1, 60 - minute, Relation::To)
        };

        hour %= 12;
        if hour == 0 {
            // there's no zero o'clock
            hour = 12;
        }

        let fraction = if minute < QUARTER_FROM {
            None
        } else if minute < HALF_FROM {
            Some((Fraction::AQuarter, relation))
        } else {
            Some((Fraction::Half, relation))
        };

        Self { hour, fraction }
    }

    /// Glyphs lit for this phrase, hour first
    pub fn glyphs(&self) -> impl Iterator<Item = GlyphId> {
        let hour = GlyphId::numeral(self.hour);
        let fraction = self.fraction.map(|(f, _)| f.glyph());
        let relation = self.fraction.map(|(_, r)| r.glyph());
        hour.into_iter().chain(fraction).chain(relation)
    }

    /// Render the phrase into a fresh buffer
    pub fn render(&self) -> PixelBuffer {
        let mut buf = PixelBuffer::new();
        for glyph in self.glyphs() {
            buf.merge(glyph.bitmap());
        }
        buf
    }
}

/// Compose the frame for `hour` (0-23) and `minute` (0-59)
pub fn compose(hour: u8, minute: u8, phrasing: Phrasing) -> PixelBuffer {
    Phrase::for_time(hour, minute, phrasing).render()
}

//! Glyph catalog for the letter plate
//!
//! The plate behind the matrix carries eight lines of eight letters. Listed
//! by buffer row (row 0 is the first row sent to the driver):
//!
//! ```text
//! row 0  S E V E N I N E
//! row 1  T W E L F O U R
//! row 2  F I V E I G H T
//! row 3  T H R E E T E N
//! row 4  S I X T W O N E
//! row 5  P A S T O D O T
//! row 6  Y Q U A R T E R
//! row 7  H A L F Z E R O
//! ```
//!
//! Bit `x` of a row lights the letter in column `x`. Words that share
//! letters ("EIGHT" and "FIVE", "TWO" and "ONE") overlap on the plate.

use crate::pixels::PixelBuffer;

/// Number of glyphs in the catalog
pub const GLYPH_COUNT: usize = 18;

/// Identifier of a word on the letter plate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum GlyphId {
    Zero = 0,
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Eleven,
    Twelve,
    /// "A QUARTER" (the Y of row 6 is unused filler)
    AQuarter,
    Half,
    Past,
    To,
    Dot,
}

static GLYPHS: [PixelBuffer; GLYPH_COUNT] = [
    PixelBuffer::from_rows([0, 0, 0, 0, 0, 0, 0, 240]),   // ZERO
    PixelBuffer::from_rows([0, 0, 0, 0, 224, 0, 0, 0]),   // ONE
    PixelBuffer::from_rows([0, 0, 0, 0, 56, 0, 0, 0]),    // TWO
    PixelBuffer::from_rows([0, 0, 0, 31, 0, 0, 0, 0]),    // THREE
    PixelBuffer::from_rows([0, 240, 0, 0, 0, 0, 0, 0]),   // FOUR
    PixelBuffer::from_rows([0, 0, 15, 0, 0, 0, 0, 0]),    // FIVE
    PixelBuffer::from_rows([0, 0, 0, 0, 7, 0, 0, 0]),     // SIX
    PixelBuffer::from_rows([31, 0, 0, 0, 0, 0, 0, 0]),    // SEVEN
    PixelBuffer::from_rows([0, 0, 248, 0, 0, 0, 0, 0]),   // EIGHT
    PixelBuffer::from_rows([240, 0, 0, 0, 0, 0, 0, 0]),   // NINE
    PixelBuffer::from_rows([0, 0, 0, 224, 0, 0, 0, 0]),   // TEN
    PixelBuffer::from_rows([30, 12, 0, 0, 0, 0, 0, 0]),   // EL-EVEN
    PixelBuffer::from_rows([12, 15, 0, 0, 0, 0, 0, 0]),   // TWEL-VE
    PixelBuffer::from_rows([0, 0, 0, 0, 0, 0, 254, 2]),   // A-QUARTER
    PixelBuffer::from_rows([0, 0, 0, 0, 0, 0, 0, 15]),    // HALF
    PixelBuffer::from_rows([0, 0, 0, 0, 0, 15, 0, 0]),    // PAST
    PixelBuffer::from_rows([0, 0, 0, 0, 0, 24, 0, 0]),    // TO
    PixelBuffer::from_rows([0, 0, 0, 0, 0, 224, 0, 0]),   // DOT
];

impl GlyphId {
    /// Every glyph, in catalog order
    pub const ALL: [GlyphId; GLYPH_COUNT] = [
        GlyphId::Zero,
        GlyphId::One,
        GlyphId::Two,
        GlyphId::Three,
        GlyphId::Four,
        GlyphId::Five,
        GlyphId::Six,
        GlyphId::Seven,
        GlyphId::Eight,
        GlyphId::Nine,
        GlyphId::Ten,
        GlyphId::Eleven,
        GlyphId::Twelve,
        GlyphId::AQuarter,
        GlyphId::Half,
        GlyphId::Past,
        GlyphId::To,
        GlyphId::Dot,
    ];

    /// Glyph for a numeral 0-12
    pub fn numeral(n: u8) -> Option<Self> {
        if n <= 12 {
            Some(Self::ALL[n as usize])
        } else {
            None
        }
    }

    /// The glyph's bitmap
    pub fn bitmap(self) -> &'static PixelBuffer {
        &GLYPHS[self as usize]
    }

    /// The word as printed on the plate
    pub fn word(self) -> &'static str {
        match self {
            GlyphId::Zero => "ZERO",
            GlyphId::One => "ONE",
            GlyphId::Two => "TWO",
            GlyphId::Three => "THREE",
            GlyphId::Four => "FOUR",
            GlyphId::Five => "FIVE",
            GlyphId::Six => "SIX",
            GlyphId::Seven => "SEVEN",
            GlyphId::Eight => "EIGHT",
            GlyphId::Nine => "NINE",
            GlyphId::Ten => "TEN",
            GlyphId::Eleven => "ELEVEN",
            GlyphId::Twelve => "TWELVE",
            GlyphId::AQuarter => "A QUARTER",
            GlyphId::Half => "HALF",
            GlyphId::Past => "PAST",
            GlyphId::To => "TO",
            GlyphId::Dot => "DOT",
        }
    }
}

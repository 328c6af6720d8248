use rand::seq::IndexedRandom;
use rand::Rng;

/// Glyphs that look like the letter O. Valid as an identifier start.
pub const LETTER_GLYPHS: &[char] = &[
    'O', 'Ó', 'Õ', 'Ô', 'Ò', 'Ö', 'Ō', 'Ŏ', 'Ő', 'Ơ', 'Θ', 'Ο',
];

/// Letter glyphs plus the digit zero.
pub const MIXED_GLYPHS: &[char] = &[
    '0', 'O', 'Ó', 'Õ', 'Ô', 'Ò', 'Ö', 'Ō', 'Ŏ', 'Ő', 'Ơ', 'Θ', 'Ο',
];

pub const DEFAULT_LENGTH: usize = 128;

#[derive(Debug, Clone, Copy)]
pub struct NameGenerator {
    length: usize,
}

impl Default for NameGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_LENGTH)
    }
}

impl NameGenerator {
    /// A zero length is clamped to one glyph.
    pub fn new(length: usize) -> Self {
        Self {
            length: length.max(1),
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Fresh identifier. Uniqueness is not checked.
    pub fn generate(&self) -> String {
        self.generate_with(&mut rand::rng())
    }

    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let mut name = String::with_capacity(self.length * 2);
        name.push(pick(LETTER_GLYPHS, rng));
        for _ in 1..self.length {
            name.push(pick(MIXED_GLYPHS, rng));
        }
        name
    }

    /// Letter-only run of `chars` glyphs, used as filler when scrubbing
    /// binaries. ASCII `O` is left out so every filler byte is non-ASCII.
    pub fn filler(&self, chars: usize) -> String {
        let mut rng = rand::rng();
        (0..chars.max(1))
            .map(|_| pick(&LETTER_GLYPHS[1..], &mut rng))
            .collect()
    }
}

fn pick<R: Rng + ?Sized>(glyphs: &[char], rng: &mut R) -> char {
    // the glyph tables are non-empty constants
    *glyphs.choose(rng).unwrap_or(&'Ο')
}

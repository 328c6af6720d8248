use launcher_obfuscator::naming::{NameGenerator, DEFAULT_LENGTH, LETTER_GLYPHS, MIXED_GLYPHS};
use proptest::prelude::*;

#[test]
fn default_name_has_128_glyphs() {
    let name = NameGenerator::default().generate();
    assert_eq!(name.chars().count(), DEFAULT_LENGTH);
}

#[test]
fn first_glyph_is_never_a_digit() {
    let names = NameGenerator::new(4);
    for _ in 0..500 {
        let first = names.generate().chars().next().unwrap();
        assert!(LETTER_GLYPHS.contains(&first), "bad leading glyph {first:?}");
        assert!(!first.is_ascii_digit());
    }
}

#[test]
fn glyphs_come_from_confusable_alphabet() {
    let name = NameGenerator::new(256).generate();
    assert!(name.chars().all(|c| MIXED_GLYPHS.contains(&c)));
}

#[test]
fn zero_length_is_clamped() {
    let names = NameGenerator::new(0);
    assert_eq!(names.length(), 1);
    assert_eq!(names.generate().chars().count(), 1);
}

#[test]
fn filler_is_entirely_non_ascii() {
    let filler = NameGenerator::default().filler(64);
    assert_eq!(filler.chars().count(), 64);
    assert!(filler.bytes().all(|b| !b.is_ascii()));
}

proptest! {
    #[test]
    fn configured_length_is_respected(len in 1usize..300) {
        let name = NameGenerator::new(len).generate();
        prop_assert_eq!(name.chars().count(), len);
        let first = name.chars().next().unwrap();
        prop_assert!(LETTER_GLYPHS.contains(&first));
    }
}

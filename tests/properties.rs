//! Property tests for the pitch encoding and its algebra.
//!
//! ```bash
//! cargo test --test properties
//! ```

use proptest::prelude::*;

use tonalrs::tonal::notation::alt_to_q;
use tonalrs::tonal::pitchparser::{parse_interval, read_pitch};
use tonalrs::{
    decode, distance, encode, from_midi, from_semitones, invert, midi, semitones, simplify_asc,
    transpose, Direction, Pitch, PitchProps, Stepname,
};

// ============================================================================
// Strategies
// ============================================================================

fn note_name() -> impl Strategy<Value = String> {
    (0usize..7, -3i32..=3, prop::option::of(-2i32..=10)).prop_map(|(step, alt, oct)| {
        let accidentals = if alt < 0 {
            "b".repeat(alt.unsigned_abs() as usize)
        } else {
            "#".repeat(alt as usize)
        };
        let octave = oct.map(|o| o.to_string()).unwrap_or_default();
        format!("{}{}{}", Stepname::ALL[step], accidentals, octave)
    })
}

fn note_with_octave() -> impl Strategy<Value = Pitch> {
    (0i32..7, -3i32..=3, -2i32..=10)
        .prop_filter_map("valid step", |(step, alt, oct)| encode(step, alt, Some(oct), None))
}

fn pitch_class() -> impl Strategy<Value = Pitch> {
    (0i32..7, -3i32..=3).prop_filter_map("valid step", |(step, alt)| encode(step, alt, None, None))
}

fn any_pitch() -> impl Strategy<Value = Pitch> {
    let dir = prop_oneof![Just(Direction::Ascending), Just(Direction::Descending)];
    prop_oneof![
        any::<i32>().prop_map(Pitch::class),
        (any::<i32>(), any::<i32>()).prop_map(|(fifths, oct)| Pitch::note(fifths, oct)),
        (any::<i32>(), any::<i32>(), dir)
            .prop_map(|(fifths, oct, dir)| Pitch::Interval { fifths, oct, dir }),
    ]
}

fn interval_name() -> impl Strategy<Value = String> {
    (1i32..=29, -3i32..=3, any::<bool>()).prop_map(|(num, alt, descending)| {
        let sign = if descending { "-" } else { "" };
        format!("{}{}{}", sign, alt_to_q(num, alt), num)
    })
}

// ============================================================================
// Codec
// ============================================================================

proptest! {
    /// Decoding an encoded note gives back its letter, accidentals and octave.
    #[test]
    fn encode_decode_inverse(step in 0i32..7, alt in -4i32..=4, oct in -2i32..=10) {
        let pitch = encode(step, alt, Some(oct), None).unwrap();
        prop_assert_eq!(
            decode(pitch),
            PitchProps { step: step as u8, alt, oct: Some(oct), dir: None }
        );
    }

    /// Pitch classes decode without an octave.
    #[test]
    fn encode_decode_pitch_class(step in 0i32..7, alt in -4i32..=4) {
        let pitch = encode(step, alt, None, None).unwrap();
        prop_assert_eq!(
            decode(pitch),
            PitchProps { step: step as u8, alt, oct: None, dir: None }
        );
    }

    /// Steps outside 0..=6 never encode.
    #[test]
    fn encode_rejects_steps(step in prop_oneof![i32::MIN..0, 7..i32::MAX], alt in -4i32..=4) {
        prop_assert_eq!(encode(step, alt, Some(4), None), None);
    }

    /// Re-encoding decoded props reproduces every variant.
    #[test]
    fn props_reencode(step in 0i32..7, alt in -4i32..=4, oct in -2i32..=10, descending in any::<bool>()) {
        let dir = if descending { Direction::Descending } else { Direction::Ascending };
        let interval = encode(step, alt, Some(oct), Some(dir)).unwrap();
        prop_assert_eq!(decode(interval).to_pitch(), Some(interval));
    }

    /// Any fields either encode to a measurable pitch or give `None`.
    #[test]
    fn encode_never_overflows(
        step in 0i32..7,
        alt in any::<i32>(),
        oct in any::<Option<i32>>(),
        descending in any::<Option<bool>>(),
    ) {
        let dir = descending.map(|d| if d { Direction::Descending } else { Direction::Ascending });
        if let Some(pitch) = encode(step, alt, oct, dir) {
            prop_assert!(pitch.height().is_some());
        }
    }
}

// ============================================================================
// Names
// ============================================================================

proptest! {
    /// Canonical note names survive parse and render unchanged.
    #[test]
    fn note_names_round_trip(name in note_name()) {
        let pitch = read_pitch(&name).unwrap();
        prop_assert_eq!(pitch.to_string(), name);
    }

    /// Canonical interval names survive parse and render unchanged.
    #[test]
    fn interval_names_round_trip(name in interval_name()) {
        let pitch = parse_interval(&name).unwrap().to_pitch().unwrap();
        prop_assert_eq!(pitch.to_string(), name);
    }

    /// Arbitrary text never panics the parser, and what it reads can be measured.
    #[test]
    fn parsing_never_panics(text in "[A-Gb#PMmAd0-9+ -]{0,12}") {
        if let Some(pitch) = read_pitch(&text) {
            prop_assert!(pitch.height().is_some());
            let _ = midi(pitch);
        }
    }

    /// Rendered interval names read back as the same interval, except the
    /// augmented ones (`A4`, `A12`), whose names are also note names.
    #[test]
    fn interval_names_reparse(name in interval_name()) {
        let pitch = parse_interval(&name).unwrap().to_pitch().unwrap();
        let reread = read_pitch(&pitch.to_string()).unwrap();
        if name.starts_with('A') && name[1..].chars().all(|c| c.is_ascii_digit()) {
            prop_assert!(reread.is_note());
        } else {
            prop_assert_eq!(reread, pitch);
        }
    }
}

// ============================================================================
// Algebra
// ============================================================================

proptest! {
    /// Moving a note by its distance to another lands on that note.
    #[test]
    fn distance_then_transpose_notes(a in note_with_octave(), b in note_with_octave()) {
        let interval = distance(a, b).unwrap();
        prop_assert_eq!(transpose(a, interval), Some(b));
    }

    /// The same holds for pitch classes.
    #[test]
    fn distance_then_transpose_classes(a in pitch_class(), b in pitch_class()) {
        let interval = distance(a, b).unwrap();
        prop_assert_eq!(transpose(a, interval), Some(b));
    }

    /// Pitch class distances always ascend, within one octave.
    #[test]
    fn pitch_class_distance_ascends(a in pitch_class(), b in pitch_class()) {
        let interval = distance(a, b).unwrap();
        prop_assert_eq!(decode(interval).dir, Some(Direction::Ascending));
        prop_assert!((0..12).contains(&interval.height().unwrap()));
    }

    /// Note distances are signed by height.
    #[test]
    fn note_distance_direction(a in note_with_octave(), b in note_with_octave()) {
        let interval = distance(a, b).unwrap();
        let expected = Direction::from_sign(b.height().unwrap() - a.height().unwrap());
        prop_assert_eq!(interval.dir(), Some(expected));
    }

    /// The algebra gives `None` rather than overflowing on extreme pitches.
    #[test]
    fn algebra_never_overflows(a in any_pitch(), b in any_pitch(), n in any::<i32>()) {
        for pitch in [transpose(a, b), distance(a, b), invert(a), simplify_asc(a), from_semitones(n)]
            .into_iter()
            .flatten()
        {
            prop_assert!(pitch.height().is_some());
        }
        let _ = semitones(a);
        let _ = midi(a);
    }
}

// ============================================================================
// MIDI
// ============================================================================

proptest! {
    /// Every MIDI number names a note that maps back to it.
    #[test]
    fn midi_round_trip(m in 0i32..=127) {
        prop_assert_eq!(midi(from_midi(m).as_str()), Some(m));
    }
}

#[test]
fn worked_scenarios() {
    let named = |p: Option<Pitch>| p.map(|p| p.to_string());
    assert_eq!(named(distance("C2", "C3")).as_deref(), Some("P8"));
    assert_eq!(named(distance("G", "B")).as_deref(), Some("M3"));
    assert_eq!(named(distance("M2", "P5")).as_deref(), Some("P4"));
    assert_eq!(named(transpose("C4", "P5")).as_deref(), Some("G4"));
    assert_eq!(midi("C4"), Some(60));
    assert_eq!(from_midi(61), "Db4");
    assert_eq!(named(tonalrs::simplify("M9")).as_deref(), Some("M2"));
    assert_eq!(named(tonalrs::simplify_asc("-M2")).as_deref(), Some("m7"));
}

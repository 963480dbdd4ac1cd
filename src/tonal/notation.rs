use std::fmt;

use crate::tonal::pitch::{decode, Accidental, Direction, Pitch, PitchProps};
use crate::tonal::pitchparser::AsPitch;
use crate::tonal::util::fill_str;

/// Which quality axis an interval number sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalType {
    /// Unisons, fourths, fifths and octaves: diminished, perfect, augmented
    Perfectable,
    /// Seconds, thirds, sixths and sevenths: diminished, minor, major, augmented
    Majorable,
}

impl IntervalType {
    pub fn of(num: i32) -> IntervalType {
        match (i64::from(num) - 1).rem_euclid(7) {
            0 | 3 | 4 => IntervalType::Perfectable,
            _ => IntervalType::Majorable,
        }
    }
}

/// Quality token for an interval number and alteration, e.g. `(3, -1)` is `"m"`.
pub fn alt_to_q(num: i32, alt: i32) -> String {
    let kind = IntervalType::of(num);
    match (kind, alt) {
        (IntervalType::Perfectable, 0) => String::from("P"),
        (IntervalType::Majorable, 0) => String::from("M"),
        (IntervalType::Majorable, -1) => String::from("m"),
        (_, alt) if alt > 0 => fill_str("A", alt),
        (IntervalType::Perfectable, alt) => fill_str("d", alt.saturating_neg()),
        (IntervalType::Majorable, alt) => fill_str("d", -(alt + 1)),
    }
}

/// Alteration of a quality token on the given axis; `None` when the token does not
/// belong to it (`P` on a third, `M` on a fifth).
pub fn q_to_alt(kind: IntervalType, quality: &str) -> Option<i32> {
    let count = i32::try_from(quality.len()).ok()?;
    match (kind, quality) {
        (IntervalType::Perfectable, "P") | (IntervalType::Majorable, "M") => Some(0),
        (IntervalType::Majorable, "m") => Some(-1),
        (_, q) if !q.is_empty() && q.chars().all(|c| c == 'A') => Some(count),
        (IntervalType::Perfectable, q) if !q.is_empty() && q.chars().all(|c| c == 'd') => {
            Some(-count)
        }
        (IntervalType::Majorable, q) if !q.is_empty() && q.chars().all(|c| c == 'd') => {
            Some(-count - 1)
        }
        _ => None,
    }
}

/// Scientific name of a note or pitch class, e.g. `Db4` or `F#`. Intervals have none.
pub fn str_note(pitch: Pitch) -> Option<String> {
    if pitch.is_interval() {
        return None;
    }
    let props = decode(pitch);
    let octave = match props.oct {
        Some(oct) => oct.to_string(),
        None => String::new(),
    };
    Some(format!("{}{}{}", props.stepname(), Accidental(props.alt), octave))
}

/// Shorthand name of an interval, e.g. `M3` or `-P5`. Only intervals have one.
pub fn str_ivl(pitch: Pitch) -> Option<String> {
    let dir = pitch.dir()?;
    let PitchProps { step, alt, oct, .. } = decode(pitch);
    let oct = oct?;
    let step = i32::from(step);
    let (num, alt) = match dir {
        Direction::Ascending => (oct.checked_mul(7)?.checked_add(step + 1)?, alt),
        Direction::Descending => {
            let num = (8 - step).checked_sub(oct.checked_add(1)?.checked_mul(7)?)?;
            match IntervalType::of(num) {
                IntervalType::Perfectable => (num, -alt),
                IntervalType::Majorable => (num, -(alt + 1)),
            }
        }
    };
    let sign = match dir {
        Direction::Ascending => "",
        Direction::Descending => "-",
    };
    Some(format!("{}{}{}", sign, alt_to_q(num, alt), num))
}

/// Name of any pitch: notes and classes in scientific notation, intervals in shorthand.
///
/// Augmented intervals are written `A1`, `A4`, `A12` and so on, which read back
/// as notes because names are tried as notes first. Use `parse_interval` to read
/// an interval name, or write the number first (`4A`).
pub fn name(value: impl AsPitch) -> Option<String> {
    let pitch = value.as_pitch()?;
    str_note(pitch).or_else(|| str_ivl(pitch))
}

/// Pitch class name of a note or class (`"Db4"` becomes `"Db"`).
pub fn pc(value: impl AsPitch) -> Option<String> {
    match value.as_pitch()? {
        Pitch::Interval { .. } => None,
        pitch => str_note(Pitch::class(pitch.fifths())),
    }
}

/// Renders like [`name`], so an augmented fourth prints as `A4`, the same text
/// as the note A4.
impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match str_note(*self).or_else(|| str_ivl(*self)) {
            Some(name) => write!(f, "{}", name),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tonal::pitch::encode;

    fn ivl(step: i32, alt: i32, oct: i32, dir: Direction) -> Pitch {
        encode(step, alt, Some(oct), Some(dir)).unwrap()
    }

    #[test]
    fn interval_types() {
        assert_eq!(IntervalType::of(1), IntervalType::Perfectable);
        assert_eq!(IntervalType::of(4), IntervalType::Perfectable);
        assert_eq!(IntervalType::of(5), IntervalType::Perfectable);
        assert_eq!(IntervalType::of(8), IntervalType::Perfectable);
        assert_eq!(IntervalType::of(3), IntervalType::Majorable);
        assert_eq!(IntervalType::of(9), IntervalType::Majorable);
    }

    #[test]
    fn qualities() {
        assert_eq!(alt_to_q(5, 0), "P");
        assert_eq!(alt_to_q(3, 0), "M");
        assert_eq!(alt_to_q(3, -1), "m");
        assert_eq!(alt_to_q(3, -2), "d");
        assert_eq!(alt_to_q(3, -3), "dd");
        assert_eq!(alt_to_q(5, -1), "d");
        assert_eq!(alt_to_q(4, 2), "AA");
    }

    #[test]
    fn quality_tokens() {
        assert_eq!(q_to_alt(IntervalType::Majorable, "m"), Some(-1));
        assert_eq!(q_to_alt(IntervalType::Majorable, "d"), Some(-2));
        assert_eq!(q_to_alt(IntervalType::Perfectable, "dd"), Some(-2));
        assert_eq!(q_to_alt(IntervalType::Perfectable, "AAA"), Some(3));
        assert_eq!(q_to_alt(IntervalType::Perfectable, "M"), None);
        assert_eq!(q_to_alt(IntervalType::Majorable, "P"), None);
        assert_eq!(q_to_alt(IntervalType::Majorable, "Ad"), None);
        assert_eq!(q_to_alt(IntervalType::Majorable, ""), None);
    }

    #[test]
    fn note_names() {
        assert_eq!(str_note(Pitch::note(-5, 7)), Some(String::from("Db4")));
        assert_eq!(str_note(Pitch::class(6)), Some(String::from("F#")));
        assert_eq!(str_note(encode(6, -2, Some(-1), None).unwrap()), Some(String::from("Bbb-1")));
        assert_eq!(str_note(Pitch::UNISON), None);
    }

    #[test]
    fn ascending_interval_names() {
        assert_eq!(str_ivl(ivl(2, 0, 0, Direction::Ascending)), Some(String::from("M3")));
        assert_eq!(str_ivl(ivl(2, -1, 0, Direction::Ascending)), Some(String::from("m3")));
        assert_eq!(str_ivl(ivl(0, 0, 1, Direction::Ascending)), Some(String::from("P8")));
        assert_eq!(str_ivl(ivl(1, 0, 1, Direction::Ascending)), Some(String::from("M9")));
        assert_eq!(str_ivl(ivl(0, 1, 0, Direction::Ascending)), Some(String::from("A1")));
    }

    #[test]
    fn descending_interval_names() {
        assert_eq!(str_ivl(ivl(1, 0, 0, Direction::Descending)), Some(String::from("-M2")));
        assert_eq!(str_ivl(ivl(1, -1, 0, Direction::Descending)), Some(String::from("-m2")));
        assert_eq!(str_ivl(ivl(4, 0, 0, Direction::Descending)), Some(String::from("-P5")));
        assert_eq!(str_ivl(ivl(0, 0, 0, Direction::Descending)), Some(String::from("-P1")));
        assert_eq!(str_ivl(ivl(0, -1, 0, Direction::Descending)), Some(String::from("-d1")));
        assert_eq!(str_ivl(ivl(2, 0, 1, Direction::Descending)), Some(String::from("-M10")));
        assert_eq!(str_ivl(ivl(2, -3, 0, Direction::Descending)), Some(String::from("-dd3")));
    }

    #[test]
    fn notes_have_no_interval_name() {
        assert_eq!(str_ivl(Pitch::note(0, 4)), None);
        assert_eq!(str_ivl(Pitch::class(0)), None);
    }

    #[test]
    fn display_covers_every_variant() {
        assert_eq!(Pitch::note(1, 4).to_string(), "G4");
        assert_eq!(Pitch::class(-1).to_string(), "F");
        assert_eq!(Pitch::UNISON.to_string(), "P1");
    }

    #[test]
    fn names_from_strings() {
        assert_eq!(name("Db4"), Some(String::from("Db4")));
        assert_eq!(name("-2M"), Some(String::from("-M2")));
        assert_eq!(name("blah"), None);
        assert_eq!(pc("Db4"), Some(String::from("Db")));
        assert_eq!(pc("M3"), None);
    }

    #[test]
    fn augmented_fourth_renders_like_a_note() {
        use crate::tonal::distance::distance;
        use crate::tonal::pitchparser::parse_interval;

        let tritone = distance("C4", "F#4").unwrap();
        assert_eq!(tritone.to_string(), "A4");
        // the rendered name reads back as the note
        assert_eq!("A4".parse::<Pitch>(), Ok(Pitch::note(3, 3)));
        // the interval grammar recovers the interval, as does the number-first form
        assert_eq!(parse_interval("A4").unwrap().to_pitch(), Some(tritone));
        assert_eq!("4A".parse::<Pitch>(), Ok(tritone));
    }

    #[test]
    fn extreme_intervals_have_no_name() {
        let huge = Pitch::Interval {
            fifths: 0,
            oct: i32::MAX,
            dir: Direction::Ascending,
        };
        assert_eq!(str_ivl(huge), None);
    }
}

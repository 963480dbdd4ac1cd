use std::fmt;

use crate::tonal::util::{fill_str, floor_div, saturate};

/// Position of each diatonic step (C D E F G A B) on the line of fifths, relative to C.
pub const FIFTHS: [i32; 7] = [0, 2, 4, -1, 1, 3, 5];

/// Octaves spanned by walking `FIFTHS[i]` fifths up from C: `floor(FIFTHS[i] * 7 / 12)`.
pub const FIFTH_OCTS: [i32; 7] = [0, 1, 2, -1, 0, 1, 2];

/// Step of the unaltered note for each `(fifths + 1) mod 7` residue.
pub const STEPS: [u8; 7] = [3, 0, 4, 1, 5, 2, 6];

/// Octaves spanned by an arbitrary number of fifths.
pub fn fifth_octs(fifths: i32) -> i32 {
    // |fifths * 7 / 12| stays below i32::MAX
    floor_div(i64::from(fifths) * 7, 12) as i32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stepname {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Stepname {
    pub const ALL: [Stepname; 7] = [
        Stepname::C,
        Stepname::D,
        Stepname::E,
        Stepname::F,
        Stepname::G,
        Stepname::A,
        Stepname::B,
    ];

    /// Letter index, C = 0 .. B = 6
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: i32) -> Option<Stepname> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Stepname::ALL.get(i).copied())
    }

    pub fn from_letter(letter: char) -> Option<Stepname> {
        match letter {
            'C' => Some(Stepname::C),
            'D' => Some(Stepname::D),
            'E' => Some(Stepname::E),
            'F' => Some(Stepname::F),
            'G' => Some(Stepname::G),
            'A' => Some(Stepname::A),
            'B' => Some(Stepname::B),
            _ => None,
        }
    }

    pub fn fifths(self) -> i32 {
        FIFTHS[self.index()]
    }
}

impl fmt::Display for Stepname {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            Stepname::C => "C",
            Stepname::D => "D",
            Stepname::E => "E",
            Stepname::F => "F",
            Stepname::G => "G",
            Stepname::A => "A",
            Stepname::B => "B",
        })
    }
}

/// Signed accidental count: negative for flats, positive for sharps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accidental(pub i32);

impl fmt::Display for Accidental {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            0 => Ok(()),
            n if n < 0 => write!(f, "{}", fill_str("b", n.saturating_neg())),
            n => write!(f, "{}", fill_str("#", n)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    /// Negative numbers descend; zero and positive numbers ascend.
    pub fn from_sign(n: i32) -> Direction {
        if n < 0 {
            Direction::Descending
        } else {
            Direction::Ascending
        }
    }

    pub fn sign(self) -> i32 {
        match self {
            Direction::Ascending => 1,
            Direction::Descending => -1,
        }
    }
}

/// A pitch encoded as a position on the line of fifths plus an octave offset.
///
/// `oct` is not the scientific octave: it is chosen so that changing the
/// accidental of a note only changes `fifths` (by 7 per sharp) and `oct` (by -4
/// per sharp) without disturbing the height `fifths * 7 + oct * 12`. Use
/// [`decode`] to recover the letter, accidental and written octave.
///
/// Interval fields are stored already multiplied by their direction, so a
/// descending interval is the negation of its ascending counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pitch {
    /// A note name without octave, such as `Db`.
    Class { fifths: i32 },
    /// A note with octave, such as `Db4`.
    Note { fifths: i32, oct: i32 },
    /// A signed distance, such as `-M2`.
    Interval { fifths: i32, oct: i32, dir: Direction },
}

impl Pitch {
    pub const UNISON: Pitch = Pitch::Interval {
        fifths: 0,
        oct: 0,
        dir: Direction::Ascending,
    };

    pub fn class(fifths: i32) -> Pitch {
        Pitch::Class { fifths }
    }

    pub fn note(fifths: i32, oct: i32) -> Pitch {
        Pitch::Note { fifths, oct }
    }

    /// Interval whose direction follows the sign of its height.
    pub fn interval(fifths: i32, oct: i32) -> Pitch {
        let dir = if wide_height(fifths, oct) < 0 {
            Direction::Descending
        } else {
            Direction::Ascending
        };
        Pitch::Interval { fifths, oct, dir }
    }

    pub fn fifths(&self) -> i32 {
        match *self {
            Pitch::Class { fifths }
            | Pitch::Note { fifths, .. }
            | Pitch::Interval { fifths, .. } => fifths,
        }
    }

    /// Encoded octave offset; `None` for pitch classes.
    pub fn oct(&self) -> Option<i32> {
        match *self {
            Pitch::Class { .. } => None,
            Pitch::Note { oct, .. } | Pitch::Interval { oct, .. } => Some(oct),
        }
    }

    pub fn dir(&self) -> Option<Direction> {
        match *self {
            Pitch::Interval { dir, .. } => Some(dir),
            _ => None,
        }
    }

    pub fn is_class(&self) -> bool {
        matches!(self, Pitch::Class { .. })
    }

    pub fn is_note(&self) -> bool {
        matches!(self, Pitch::Note { .. })
    }

    pub fn is_interval(&self) -> bool {
        matches!(self, Pitch::Interval { .. })
    }

    /// Height in semitones. Pitch classes are measured as if their octave offset were 0.
    ///
    /// `None` when the height does not fit in an `i32`; [`encode`] and the
    /// algebra never produce such pitches.
    pub fn height(&self) -> Option<i32> {
        let fifths = self.fifths();
        let oct = self.oct().unwrap_or(0);
        fifths.checked_mul(7)?.checked_add(oct.checked_mul(12)?)
    }

    /// Semitones above the nearest C below, 0..=11
    pub fn chroma(&self) -> u8 {
        // rem_euclid(12) is always in 0..12
        (i64::from(self.fifths()) * 7).rem_euclid(12) as u8
    }

    pub fn step(&self) -> Stepname {
        decode(*self).stepname()
    }

    pub fn props(&self) -> PitchProps {
        decode(*self)
    }
}

fn wide_height(fifths: i32, oct: i32) -> i64 {
    i64::from(fifths) * 7 + i64::from(oct) * 12
}

/// Musical view of a [`Pitch`]: letter, accidentals, written octave and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PitchProps {
    /// Letter index, C = 0 .. B = 6
    pub step: u8,
    pub alt: i32,
    /// Scientific octave; `None` for pitch classes
    pub oct: Option<i32>,
    pub dir: Option<Direction>,
}

impl PitchProps {
    pub fn stepname(&self) -> Stepname {
        Stepname::ALL[usize::from(self.step) % 7]
    }

    /// Re-encode, reproducing the fifths and octave fields these props were decoded from.
    pub fn to_pitch(&self) -> Option<Pitch> {
        let raw = encode_step(self.stepname(), self.alt, self.oct, None)?;
        Some(match (raw, self.dir) {
            (Pitch::Note { fifths, oct }, Some(dir)) => Pitch::Interval { fifths, oct, dir },
            (pitch, _) => pitch,
        })
    }
}

/// Encode a letter index, accidentals, optional octave and optional direction.
///
/// Returns `None` when `step` is not a letter index (0..=6), or when the pitch
/// would be too high or too low for its height to fit in an `i32`. Without an
/// octave the result is a pitch class whatever the direction; with an octave but
/// no direction it is a note; with both it is an interval.
pub fn encode(step: i32, alt: i32, oct: Option<i32>, dir: Option<Direction>) -> Option<Pitch> {
    Stepname::from_index(step).and_then(|step| encode_step(step, alt, oct, dir))
}

pub fn encode_step(
    step: Stepname,
    alt: i32,
    oct: Option<i32>,
    dir: Option<Direction>,
) -> Option<Pitch> {
    let fifths = alt.checked_mul(7)?.checked_add(step.fifths())?;
    let pitch = match (oct, dir) {
        (None, _) => Pitch::Class { fifths },
        (Some(oct), dir) => {
            let oct = oct
                .checked_sub(FIFTH_OCTS[step.index()])?
                .checked_sub(alt.checked_mul(4)?)?;
            match dir {
                None => Pitch::Note { fifths, oct },
                Some(dir) => Pitch::Interval {
                    fifths: fifths.checked_mul(dir.sign())?,
                    oct: oct.checked_mul(dir.sign())?,
                    dir,
                },
            }
        }
    };
    pitch.height().map(|_| pitch)
}

/// Letter, accidentals, written octave and direction of a pitch.
///
/// Exact for every pitch with a height (see [`Pitch::height`]); the written
/// octave of a hand built pitch without one saturates.
pub fn decode(pitch: Pitch) -> PitchProps {
    let fifths = i64::from(pitch.fifths());
    // rem_euclid(7) is always in 0..7
    let step = STEPS[(fifths + 1).rem_euclid(7) as usize];
    let alt = floor_div(fifths + 1, 7);
    let oct = pitch.oct().map(|oct| {
        saturate(i64::from(oct) + 4 * alt + i64::from(FIFTH_OCTS[usize::from(step)]))
    });
    PitchProps {
        step,
        alt: saturate(alt),
        oct,
        dir: pitch.dir(),
    }
}

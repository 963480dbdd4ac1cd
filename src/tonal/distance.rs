//! Arithmetic on encoded pitches: transposition, distances, simplification.
//!
//! Every function accepts anything implementing [`AsPitch`], so names and encoded
//! pitches can be mixed freely. Inputs that do not parse, or combinations that
//! have no musical meaning, give `None`.

use crate::tonal::midi::{from_midi_with, ToMidi, PCS_FLATS, PCS_SHARPS};
use crate::tonal::pitch::{decode, encode_step, fifth_octs, Direction, Pitch, Stepname};
use crate::tonal::pitchparser::{parse_note, AsPitch};

/// Shift a pitch by an interval.
///
/// One argument must be an interval; it is taken as the shift and the other as
/// the pitch being shifted (the first argument wins when both are intervals).
/// The result has the shape of the shifted pitch: classes stay classes, notes
/// stay notes, and intervals get a direction recomputed from their new height.
pub fn transpose(a: impl AsPitch, b: impl AsPitch) -> Option<Pitch> {
    let (a, b) = (a.as_pitch()?, b.as_pitch()?);
    if a.is_interval() {
        transpose_pitch(a, b)
    } else if b.is_interval() {
        transpose_pitch(b, a)
    } else {
        log::trace!("cannot transpose {} by {}: neither is an interval", a, b);
        None
    }
}

fn transpose_pitch(interval: Pitch, pitch: Pitch) -> Option<Pitch> {
    let fifths = interval.fifths().checked_add(pitch.fifths())?;
    let shifted = match (pitch, interval.oct()) {
        (Pitch::Note { oct, .. }, Some(by)) => Pitch::note(fifths, oct.checked_add(by)?),
        (Pitch::Interval { oct, .. }, Some(by)) => Pitch::interval(fifths, oct.checked_add(by)?),
        _ => Pitch::class(fifths),
    };
    with_height(shifted)
}

// Results must have a height.
fn with_height(pitch: Pitch) -> Option<Pitch> {
    match pitch.height() {
        Some(_) => Some(pitch),
        None => {
            log::trace!("{:?} is out of range", pitch);
            None
        }
    }
}

/// `transpose` with its first argument fixed, for mapping over lists.
pub fn transpose_by<A: AsPitch, B: AsPitch>(a: A) -> impl Fn(B) -> Option<Pitch> {
    let a = a.as_pitch();
    move |b| a.and_then(|a| transpose(a, b))
}

/// Interval from `a` to `b`.
///
/// Both must be the same kind of pitch. Between pitch classes the result is the
/// ascending interval within one octave; between notes (or intervals) it is signed.
pub fn distance(a: impl AsPitch, b: impl AsPitch) -> Option<Pitch> {
    let (a, b) = (a.as_pitch()?, b.as_pitch()?);
    let fifths = b.fifths().checked_sub(a.fifths())?;
    match (a, b) {
        (Pitch::Class { .. }, Pitch::Class { .. }) => with_height(Pitch::Interval {
            fifths,
            oct: -fifth_octs(fifths),
            dir: Direction::Ascending,
        }),
        (Pitch::Note { oct: from, .. }, Pitch::Note { oct: to, .. })
        | (Pitch::Interval { oct: from, .. }, Pitch::Interval { oct: to, .. }) => {
            with_height(Pitch::interval(fifths, to.checked_sub(from)?))
        }
        _ => {
            log::trace!("no distance between {} and {}", a, b);
            None
        }
    }
}

/// `distance` with its first argument fixed, for mapping over lists.
pub fn distance_from<A: AsPitch, B: AsPitch>(a: A) -> impl Fn(B) -> Option<Pitch> {
    let a = a.as_pitch();
    move |b| a.and_then(|a| distance(a, b))
}

/// Reduce a compound interval to the simple interval with the same quality and direction.
pub fn simplify(interval: impl AsPitch) -> Option<Pitch> {
    match interval.as_pitch()? {
        Pitch::Interval { fifths, dir, .. } => {
            let props = decode(Pitch::class(fifths.checked_mul(dir.sign())?));
            encode_step(props.stepname(), props.alt, Some(0), Some(dir))
        }
        _ => None,
    }
}

/// `simplify`, then turn a descending result into the ascending interval an
/// octave above it (`-M2` becomes `m7`). The descending unison becomes `P1`.
pub fn simplify_asc(interval: impl AsPitch) -> Option<Pitch> {
    match simplify(interval)? {
        Pitch::Interval { fifths: 0, oct: 0, .. } => Some(Pitch::UNISON),
        Pitch::Interval {
            fifths,
            oct,
            dir: Direction::Descending,
        } => with_height(Pitch::Interval {
            fifths,
            oct: oct.checked_add(1)?,
            dir: Direction::Ascending,
        }),
        simple => Some(simple),
    }
}

/// Height in semitones; pitch classes report their chroma.
pub fn semitones(pitch: impl AsPitch) -> Option<i32> {
    match pitch.as_pitch()? {
        class @ Pitch::Class { .. } => Some(i32::from(class.chroma())),
        pitch => pitch.height(),
    }
}

/// Semitones spanned by `distance(a, b)`.
pub fn semitones_between(a: impl AsPitch, b: impl AsPitch) -> Option<i32> {
    distance(a, b).and_then(|interval| interval.height())
}

/// Complement of an interval within the octave, keeping its direction (`M3` gives `m6`).
pub fn invert(interval: impl AsPitch) -> Option<Pitch> {
    let (fifths, dir) = match interval.as_pitch()? {
        Pitch::Interval { fifths, dir, .. } => (fifths.checked_mul(-dir.sign())?, dir),
        _ => return None,
    };
    let oct = -fifth_octs(fifths);
    with_height(Pitch::Interval {
        fifths: fifths.checked_mul(dir.sign())?,
        oct: oct * dir.sign(),
        dir,
    })
}

// Conventional interval for each semitone count within an octave:
// P1 m2 M2 m3 M3 P4 d5 P5 m6 M6 m7 M7
const SEMITONE_STEPS: [Stepname; 12] = [
    Stepname::C,
    Stepname::D,
    Stepname::D,
    Stepname::E,
    Stepname::E,
    Stepname::F,
    Stepname::G,
    Stepname::G,
    Stepname::A,
    Stepname::A,
    Stepname::B,
    Stepname::B,
];
const SEMITONE_ALTS: [i32; 12] = [0, -1, 0, -1, 0, 0, -1, 0, -1, 0, -1, 0];

/// Interval spanning a signed number of semitones; `None` only for spans that
/// leave the i32 range once spelled.
pub fn from_semitones(semitones: i32) -> Option<Pitch> {
    let dir = Direction::from_sign(semitones);
    let size = semitones.unsigned_abs();
    // size % 12 is always in 0..12
    let chroma = (size % 12) as usize;
    encode_step(
        SEMITONE_STEPS[chroma],
        SEMITONE_ALTS[chroma],
        Some(i32::try_from(size / 12).ok()?),
        Some(dir),
    )
}

/// Respell a note or pitch class with at most one accidental, preferring flats
/// unless `sharps` is set. Intervals have no enharmonic spelling.
pub fn enharmonic(pitch: impl AsPitch, sharps: bool) -> Option<Pitch> {
    let pitch = pitch.as_pitch()?;
    let name = match pitch {
        Pitch::Note { .. } => from_midi_with(pitch.to_midi()?, sharps),
        Pitch::Class { .. } => {
            let names = if sharps { &PCS_SHARPS } else { &PCS_FLATS };
            String::from(names[usize::from(pitch.chroma())])
        }
        Pitch::Interval { .. } => return None,
    };
    parse_note(&name).ok().and_then(|note| note.to_pitch())
}

/// `enharmonic`, keeping sharps for names spelled with sharps.
pub fn simplify_note(pitch: impl AsPitch) -> Option<Pitch> {
    let pitch = pitch.as_pitch()?;
    enharmonic(pitch, decode(pitch).alt > 0)
}

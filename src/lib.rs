//! Pitch spelling and arithmetic on the line of fifths.
//!
//! Notes, pitch classes and intervals are encoded as a number of fifths from C
//! plus an octave offset, which makes transposition and distance plain integer
//! addition while keeping enharmonic spellings (`C#` vs `Db`) apart.
//!
//! ```
//! use tonalrs::{distance, transpose};
//!
//! assert_eq!(transpose("C4", "P5").unwrap().to_string(), "G4");
//! assert_eq!(distance("G", "B").unwrap().to_string(), "M3");
//! ```

pub mod tonal {
    pub mod array;
    pub mod distance;
    pub mod error;
    pub mod midi;
    pub mod notation;
    pub mod pitch;
    pub mod pitchparser;
    pub mod util;
}

pub use crate::tonal::array::{
    chromatic, chromatic_sharps, compact, harmonize, harmonizer, note_range, range, sort, sort_by,
    unique, Order, PitchList,
};
pub use crate::tonal::distance::{
    distance, distance_from, enharmonic, from_semitones, invert, semitones, semitones_between,
    simplify, simplify_asc, simplify_note, transpose, transpose_by,
};
pub use crate::tonal::error::ParseNameError;
pub use crate::tonal::midi::{
    cents, freq, from_midi, from_midi_sharps, midi, well_tempered, ToMidi, Tuning,
};
pub use crate::tonal::notation::{name, pc, str_ivl, str_note};
pub use crate::tonal::pitch::{decode, encode, Direction, Pitch, PitchProps, Stepname};
pub use crate::tonal::pitchparser::{parse_pitch, AsPitch, ParseCache};

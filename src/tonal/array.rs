//! Ranges, sorting and harmonizing over lists of pitches.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use itertools::Itertools;

use crate::tonal::distance::transpose;
use crate::tonal::error::ParseNameError;
use crate::tonal::midi::{from_midi, from_midi_sharps, ToMidi};
use crate::tonal::pitch::{decode, encode_step, Pitch};
use crate::tonal::pitchparser::{parse_name, split_names, AsPitch};
use crate::tonal::util::iterable_to_str;

/// Written octave given to pitch classes when sorting, below any real note.
pub const PITCH_CLASS_OCTAVE: i32 = -100;

/// Inclusive run of MIDI numbers from `a` to `b`, descending when `b < a`.
/// Empty when either end has no MIDI number.
pub fn range(a: impl ToMidi, b: impl ToMidi) -> Vec<i32> {
    match (a.to_midi(), b.to_midi()) {
        (Some(a), Some(b)) if a <= b => (a..=b).collect(),
        (Some(a), Some(b)) => (b..=a).rev().collect(),
        _ => Vec::new(),
    }
}

/// `range`, rendered through `render`; numbers it cannot name are dropped.
pub fn note_range<F>(render: F, a: impl ToMidi, b: impl ToMidi) -> Vec<String>
where
    F: Fn(i32) -> Option<String>,
{
    range(a, b).into_iter().filter_map(render).collect()
}

/// Chromatic run of note names, spelled with flats.
pub fn chromatic(a: impl ToMidi, b: impl ToMidi) -> Vec<String> {
    note_range(|m| Some(from_midi(m)), a, b)
}

/// Chromatic run of note names, spelled with sharps.
pub fn chromatic_sharps(a: impl ToMidi, b: impl ToMidi) -> Vec<String> {
    note_range(|m| Some(from_midi_sharps(m)), a, b)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    #[default]
    Ascending,
    Descending,
}

/// Height used for ordering: pitch classes are placed at [`PITCH_CLASS_OCTAVE`]
/// so that, for example, `Cb` sorts next to `C` rather than next to `B`.
/// Pitches without a height sort first.
pub fn sort_height(pitch: &Pitch) -> Option<i32> {
    match pitch {
        Pitch::Class { .. } => {
            let props = decode(*pitch);
            encode_step(props.stepname(), props.alt, Some(PITCH_CLASS_OCTAVE), None)
                .and_then(|band| band.height())
        }
        _ => pitch.height(),
    }
}

/// Sort by height; entries that are not pitches are dropped.
pub fn sort<T: AsPitch + Clone>(list: &[T], order: Order) -> Vec<T> {
    sort_by(list, |a, b| {
        let ordering = sort_height(a).cmp(&sort_height(b));
        match order {
            Order::Ascending => ordering,
            Order::Descending => ordering.reverse(),
        }
    })
}

/// Sort with a custom comparison of the decoded pitches; entries that are not
/// pitches are dropped. The sort is stable.
pub fn sort_by<T, F>(list: &[T], mut compare: F) -> Vec<T>
where
    T: AsPitch + Clone,
    F: FnMut(&Pitch, &Pitch) -> Ordering,
{
    list.iter()
        .filter_map(|item| item.as_pitch().map(|pitch| (pitch, item)))
        .sorted_by(|(a, _), (b, _)| compare(a, b))
        .map(|(_, item)| item.clone())
        .collect()
}

/// Entries that are pitches, in their original order.
pub fn compact<T: AsPitch + Clone>(list: &[T]) -> Vec<T> {
    list.iter().filter(|item| item.as_pitch().is_some()).cloned().collect()
}

/// Ascending, with repeated spellings removed. Enharmonic spellings are kept,
/// in the order they first appear.
pub fn unique<T: AsPitch + Clone>(list: &[T]) -> Vec<T> {
    sort(list, Order::Ascending)
        .into_iter()
        .unique_by(|item| item.as_pitch())
        .collect()
}

/// Transpose every entry of `list` by `pitch`, dropping entries that cannot be
/// transposed. Use [`Pitch::UNISON`] to keep the list where it is.
pub fn harmonize<T: AsPitch>(list: &[T], pitch: impl AsPitch) -> Vec<Pitch> {
    let by = match pitch.as_pitch() {
        Some(by) => by,
        None => return Vec::new(),
    };
    let harmony: Vec<Pitch> = list.iter().filter_map(|item| transpose(item, by)).collect();
    log::trace!("harmonized by {}: {}", by, iterable_to_str(&harmony));
    harmony
}

/// `harmonize` with the list fixed: a chord or scale made of intervals, waiting
/// for its tonic.
pub fn harmonizer<T: AsPitch, P: AsPitch>(list: &[T]) -> impl Fn(P) -> Vec<Pitch> {
    let intervals: Vec<Pitch> = list.iter().filter_map(|item| item.as_pitch()).collect();
    move |pitch| harmonize(&intervals, pitch)
}

/// An ordered list of pitches, written as whitespace separated names.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PitchList {
    pitches: Vec<Pitch>,
}

impl PitchList {
    pub fn new(pitches: Vec<Pitch>) -> Self {
        PitchList { pitches }
    }

    pub fn pitches(&self) -> &[Pitch] {
        &self.pitches
    }

    pub fn len(&self) -> usize {
        self.pitches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pitches.is_empty()
    }

    pub fn sorted(&self, order: Order) -> PitchList {
        PitchList::new(sort(&self.pitches, order))
    }

    pub fn unique(&self) -> PitchList {
        PitchList::new(unique(&self.pitches))
    }

    /// Every pitch shifted by `by`; pitches that cannot be shifted are dropped.
    pub fn transpose(&self, by: impl AsPitch) -> PitchList {
        PitchList::new(harmonize(&self.pitches, by))
    }

    pub fn midi(&self) -> Vec<i32> {
        self.pitches.iter().filter_map(ToMidi::to_midi).collect()
    }
}

impl FromIterator<Pitch> for PitchList {
    fn from_iter<I: IntoIterator<Item = Pitch>>(iter: I) -> Self {
        PitchList::new(iter.into_iter().collect())
    }
}

impl IntoIterator for PitchList {
    type Item = Pitch;
    type IntoIter = std::vec::IntoIter<Pitch>;

    fn into_iter(self) -> Self::IntoIter {
        self.pitches.into_iter()
    }
}

impl fmt::Display for PitchList {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.pitches.iter().join(" "))
    }
}

impl FromStr for PitchList {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        split_names(s)?
            .into_iter()
            .map(|token| {
                parse_name(token)
                    .ok()
                    .and_then(|parsed| parsed.to_pitch())
                    .ok_or_else(|| ParseNameError::List {
                        input: s.to_string(),
                        token: token.to_string(),
                    })
            })
            .collect()
    }
}

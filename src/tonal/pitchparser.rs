use std::collections::HashMap;
use std::str::FromStr;
use std::sync::RwLock;

use once_cell::sync::Lazy;
use pest::Parser;
use pest_derive::Parser;

use crate::tonal::error::ParseNameError;
use crate::tonal::notation::{q_to_alt, IntervalType};
use crate::tonal::pitch::{encode, encode_step, Direction, Pitch, Stepname};

#[derive(Parser)]
#[grammar = "tonal/pitch.pest"]
pub struct PitchParser;

/// Largest written octave, in either direction, a note name may carry.
pub const MAX_OCTAVE: i32 = 10_000;
/// Largest number of accidentals, or of repeated `A`/`d` qualities, in a name.
pub const MAX_ACCIDENTALS: i32 = 1_000;
/// Largest interval number, spanning `MAX_OCTAVE` octaves.
pub const MAX_INTERVAL_NUMBER: i32 = 7 * MAX_OCTAVE + 1;

/// Structured fields of a note name such as `Db4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedNote {
    pub step: Stepname,
    pub alt: i32,
    pub oct: Option<i32>,
}

impl ParsedNote {
    pub fn to_pitch(&self) -> Option<Pitch> {
        encode_step(self.step, self.alt, self.oct, None)
    }
}

/// Structured fields of an interval name such as `-M9`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedInterval {
    /// Interval number as written, 1 or more
    pub num: i32,
    /// Number reduced into a single octave, 1..=7
    pub simple: i32,
    pub quality: String,
    pub alt: i32,
    /// Whole octaves above the simple interval
    pub oct: i32,
    pub dir: Direction,
}

impl ParsedInterval {
    pub fn to_pitch(&self) -> Option<Pitch> {
        encode(self.simple - 1, self.alt, Some(self.oct), Some(self.dir))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedName {
    Note(ParsedNote),
    Interval(ParsedInterval),
}

impl ParsedName {
    pub fn to_pitch(&self) -> Option<Pitch> {
        match self {
            ParsedName::Note(note) => note.to_pitch(),
            ParsedName::Interval(interval) => interval.to_pitch(),
        }
    }
}

fn accidental_count(name: &str, accidentals: &str) -> Result<i32, ParseNameError> {
    i32::try_from(accidentals.chars().count())
        .ok()
        .filter(|count| *count <= MAX_ACCIDENTALS)
        .ok_or_else(|| ParseNameError::syntax(name, "too many accidentals"))
}

/// Read a note name: an uppercase letter, `#`s or `b`s, and an optional octave.
pub fn parse_note(name: &str) -> Result<ParsedNote, ParseNameError> {
    let mut pairs = PitchParser::parse(Rule::FULL_NOTE, name)
        .map_err(|e| ParseNameError::syntax(name, e.to_string()))?;
    let note = pairs
        .next()
        .ok_or_else(|| ParseNameError::syntax(name, "empty note name"))?;

    let mut parsed = ParsedNote {
        step: Stepname::C,
        alt: 0,
        oct: None,
    };
    for pair in note.into_inner() {
        match pair.as_rule() {
            Rule::NOTE_STEP => {
                parsed.step = pair
                    .as_str()
                    .chars()
                    .next()
                    .and_then(Stepname::from_letter)
                    .ok_or_else(|| ParseNameError::syntax(name, "unknown letter"))?;
            }
            Rule::NOTE_SHARPS => parsed.alt = accidental_count(name, pair.as_str())?,
            Rule::NOTE_FLATS => parsed.alt = -accidental_count(name, pair.as_str())?,
            Rule::NOTE_OCTAVE => {
                let oct = pair
                    .as_str()
                    .parse::<i32>()
                    .map_err(|e| ParseNameError::syntax(name, e.to_string()))?;
                if !(-MAX_OCTAVE..=MAX_OCTAVE).contains(&oct) {
                    return Err(ParseNameError::syntax(name, "octave out of range"));
                }
                parsed.oct = Some(oct);
            }
            rule => {
                return Err(ParseNameError::syntax(name, format!("unknown rule {:?}", rule)));
            }
        }
    }
    Ok(parsed)
}

/// Read an interval name in either `M3` or `3M` order, optionally signed.
pub fn parse_interval(name: &str) -> Result<ParsedInterval, ParseNameError> {
    let mut pairs = PitchParser::parse(Rule::FULL_IVL, name)
        .map_err(|e| ParseNameError::syntax(name, e.to_string()))?;
    let interval = pairs
        .next()
        .ok_or_else(|| ParseNameError::syntax(name, "empty interval name"))?;

    let mut dir = Direction::Ascending;
    let mut quality = "";
    let mut num = 0;
    for pair in interval.into_inner() {
        match pair.as_rule() {
            Rule::IVL_SIGN => {
                if pair.as_str() == "-" {
                    dir = Direction::Descending;
                }
            }
            Rule::IVL_QUALITY => {
                quality = pair.as_str();
                accidental_count(name, quality)?;
            }
            Rule::IVL_NUMBER => {
                num = pair.as_str().parse::<i32>().map_err(|_| ParseNameError::Number {
                    input: name.to_string(),
                })?;
            }
            rule => {
                return Err(ParseNameError::syntax(name, format!("unknown rule {:?}", rule)));
            }
        }
    }
    if !(1..=MAX_INTERVAL_NUMBER).contains(&num) {
        return Err(ParseNameError::Number {
            input: name.to_string(),
        });
    }

    let alt = q_to_alt(IntervalType::of(num), quality).ok_or_else(|| ParseNameError::Quality {
        input: name.to_string(),
        quality: quality.to_string(),
        number: num,
    })?;
    Ok(ParsedInterval {
        num,
        simple: (num - 1) % 7 + 1,
        quality: quality.to_string(),
        alt,
        oct: (num - 1) / 7,
        dir,
    })
}

/// Read a note name, falling back to an interval name.
///
/// Notes win ties, so `A4` is the note; write the augmented fourth as `4A`.
pub fn parse_name(name: &str) -> Result<ParsedName, ParseNameError> {
    match parse_note(name) {
        Ok(note) => Ok(ParsedName::Note(note)),
        Err(note_error) => match parse_interval(name) {
            Ok(interval) => Ok(ParsedName::Interval(interval)),
            // a name the interval grammar accepted but could not use says more
            Err(ParseNameError::Syntax { .. }) => Err(note_error),
            Err(interval_error) => Err(interval_error),
        },
    }
}

/// Split a whitespace separated list of names into its tokens.
pub fn split_names(list: &str) -> Result<Vec<&str>, ParseNameError> {
    let pairs = PitchParser::parse(Rule::FULL_NAME_LIST, list)
        .map_err(|e| ParseNameError::syntax(list, e.to_string()))?;
    Ok(pairs
        .flatten()
        .filter(|pair| pair.as_rule() == Rule::NAME_TOKEN)
        .map(|pair| pair.as_str())
        .collect())
}

/// Parse and encode a name without consulting any cache.
pub fn read_pitch(name: &str) -> Option<Pitch> {
    match parse_name(name) {
        Ok(parsed) => parsed.to_pitch(),
        Err(e) => {
            log::debug!("{}", e);
            None
        }
    }
}

impl FromStr for Pitch {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_name(s)?
            .to_pitch()
            .ok_or_else(|| ParseNameError::syntax(s, "not an encodable pitch"))
    }
}

/// Memoized name parsing.
///
/// Entries are never evicted: the cache lives as long as its owner and grows with
/// the number of distinct names seen. `clear` is the only invalidation. Failed
/// parses are cached too. Concurrent callers may race to fill the same key; the
/// first insert wins and both compute the same value.
#[derive(Debug, Default)]
pub struct ParseCache {
    entries: RwLock<HashMap<String, Option<Pitch>>>,
}

impl ParseCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pitch(&self, name: &str) -> Option<Pitch> {
        if let Some(cached) = self.lookup(name) {
            log::trace!("parse cache hit for {:?}", name);
            return cached;
        }
        log::trace!("parse cache miss for {:?}", name);
        let pitch = read_pitch(name);
        match self.entries.write() {
            Ok(mut entries) => {
                entries.entry(name.to_string()).or_insert(pitch);
            }
            Err(_) => log::warn!("parse cache lock poisoned; {:?} not cached", name),
        }
        pitch
    }

    fn lookup(&self, name: &str) -> Option<Option<Pitch>> {
        match self.entries.read() {
            Ok(entries) => entries.get(name).copied(),
            Err(_) => {
                log::warn!("parse cache lock poisoned; parsing {:?} uncached", name);
                None
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        match self.entries.write() {
            Ok(mut entries) => {
                log::debug!("clearing {} cached names", entries.len());
                entries.clear();
            }
            Err(_) => log::warn!("parse cache lock poisoned; not cleared"),
        }
    }
}

/// Process wide cache behind the string accepting API.
pub static DEFAULT_CACHE: Lazy<ParseCache> = Lazy::new(ParseCache::new);

pub fn parse_pitch(name: &str) -> Option<Pitch> {
    DEFAULT_CACHE.pitch(name)
}

/// Anything that can stand for a pitch: an encoded [`Pitch`] or a name.
pub trait AsPitch {
    fn as_pitch(&self) -> Option<Pitch>;
}

impl AsPitch for Pitch {
    fn as_pitch(&self) -> Option<Pitch> {
        Some(*self)
    }
}

impl AsPitch for str {
    fn as_pitch(&self) -> Option<Pitch> {
        parse_pitch(self)
    }
}

impl AsPitch for String {
    fn as_pitch(&self) -> Option<Pitch> {
        parse_pitch(self)
    }
}

impl<T: AsPitch> AsPitch for Option<T> {
    fn as_pitch(&self) -> Option<Pitch> {
        self.as_ref().and_then(AsPitch::as_pitch)
    }
}

impl<T: AsPitch + ?Sized> AsPitch for &T {
    fn as_pitch(&self) -> Option<Pitch> {
        (**self).as_pitch()
    }
}

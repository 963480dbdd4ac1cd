//! Conversions between encoded pitches, MIDI note numbers and frequencies.

use crate::tonal::pitch::Pitch;
use crate::tonal::pitchparser::parse_pitch;

/// Pitch class names by chroma, spelled with flats.
pub const PCS_FLATS: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// Pitch class names by chroma, spelled with sharps.
pub const PCS_SHARPS: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Highest MIDI note number.
pub const MIDI_MAX: i32 = 127;

/// Values with a MIDI note number: notes with octave, or numbers already in 0..=127.
pub trait ToMidi {
    fn to_midi(&self) -> Option<i32>;
}

impl ToMidi for Pitch {
    fn to_midi(&self) -> Option<i32> {
        match self {
            Pitch::Note { .. } => self.height()?.checked_add(12),
            _ => None,
        }
    }
}

impl ToMidi for i32 {
    fn to_midi(&self) -> Option<i32> {
        (0..=MIDI_MAX).contains(self).then_some(*self)
    }
}

impl ToMidi for u8 {
    fn to_midi(&self) -> Option<i32> {
        i32::from(*self).to_midi()
    }
}

impl ToMidi for str {
    fn to_midi(&self) -> Option<i32> {
        match parse_pitch(self) {
            Some(note @ Pitch::Note { .. }) => note.to_midi(),
            _ => self.trim().parse::<i32>().ok().and_then(|m| m.to_midi()),
        }
    }
}

impl ToMidi for String {
    fn to_midi(&self) -> Option<i32> {
        self.as_str().to_midi()
    }
}

impl<T: ToMidi + ?Sized> ToMidi for &T {
    fn to_midi(&self) -> Option<i32> {
        (**self).to_midi()
    }
}

/// MIDI note number of a note (`"C4"` is 60), or a number already in range.
pub fn midi(value: impl ToMidi) -> Option<i32> {
    value.to_midi()
}

/// Note name for a MIDI number, spelled with flats (61 is `"Db4"`).
pub fn from_midi(midi: i32) -> String {
    from_midi_with(midi, false)
}

/// Note name for a MIDI number, spelled with sharps (61 is `"C#4"`).
pub fn from_midi_sharps(midi: i32) -> String {
    from_midi_with(midi, true)
}

pub fn from_midi_with(midi: i32, sharps: bool) -> String {
    let names = if sharps { &PCS_SHARPS } else { &PCS_FLATS };
    // rem_euclid(12) is always in 0..12
    let name = names[midi.rem_euclid(12) as usize];
    format!("{}{}", name, midi.div_euclid(12) - 1)
}

/// Reference pitch for converting between MIDI numbers and frequencies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    pub reference_hz: f64,
    pub reference_midi: i32,
}

impl Default for Tuning {
    /// A4 = 440 Hz
    fn default() -> Self {
        Tuning {
            reference_hz: 440.0,
            reference_midi: 69,
        }
    }
}

impl Tuning {
    /// Tuning with `reference_hz` for A4.
    pub fn new(reference_hz: f64) -> Self {
        Tuning {
            reference_hz,
            ..Tuning::default()
        }
    }

    pub fn with_reference_midi(mut self, reference_midi: i32) -> Self {
        self.reference_midi = reference_midi;
        self
    }

    /// Equal tempered frequency. MIDI note 0 is a valid note with a frequency.
    pub fn freq(&self, value: impl ToMidi) -> Option<f64> {
        let midi = value.to_midi()?;
        let semitones = f64::from(midi) - f64::from(self.reference_midi);
        Some(2f64.powf(semitones / 12.0) * self.reference_hz)
    }

    /// Fractional MIDI number of a frequency; `None` unless the frequency is positive.
    pub fn midi_of(&self, freq: f64) -> Option<f64> {
        if !freq.is_finite() || freq <= 0.0 {
            return None;
        }
        Some(12.0 * (freq / self.reference_hz).log2() + f64::from(self.reference_midi))
    }

    /// Name of the note nearest to a frequency.
    pub fn note_of(&self, freq: f64) -> Option<String> {
        let midi = self.midi_of(freq)?.round();
        if midi < f64::from(i32::MIN) || midi > f64::from(i32::MAX) {
            return None;
        }
        Some(from_midi(midi as i32))
    }
}

/// Frequency function for equal temperament with `reference_hz` for A4.
pub fn well_tempered<T: ToMidi>(reference_hz: f64) -> impl Fn(T) -> Option<f64> {
    let tuning = Tuning::new(reference_hz);
    move |value| tuning.freq(value)
}

/// Frequency with A4 = 440 Hz.
pub fn freq(value: impl ToMidi) -> Option<f64> {
    Tuning::default().freq(value)
}

/// Size in cents of the step from one frequency to another.
pub fn cents(from_hz: f64, to_hz: f64) -> Option<f64> {
    if from_hz <= 0.0 || to_hz <= 0.0 {
        return None;
    }
    Some(1200.0 * (to_hz / from_hz).log2())
}

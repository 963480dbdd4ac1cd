use thiserror::Error;

/// Why a note or interval name could not be read.
///
/// The algebra never sees this type: names that fail to parse become `None`
/// before they reach the codec. It is surfaced by the `parse_*` functions and by
/// `FromStr` implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseNameError {
    #[error("invalid name {input:?}: {message}")]
    Syntax { input: String, message: String },

    #[error("quality {quality:?} is not valid for a {number} in {input:?}")]
    Quality {
        input: String,
        quality: String,
        number: i32,
    },

    #[error("interval number out of range in {input:?}")]
    Number { input: String },

    #[error("unable to read {token:?} in list {input:?}")]
    List { input: String, token: String },
}

impl ParseNameError {
    pub fn syntax(input: &str, message: impl Into<String>) -> Self {
        ParseNameError::Syntax {
            input: input.to_string(),
            message: message.into(),
        }
    }
}

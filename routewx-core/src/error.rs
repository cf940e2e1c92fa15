use thiserror::Error;

use crate::model::Product;

/// Coarse classification of a [`BriefingError`], for callers that need to branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Input,
    Transport,
    Parse,
}

#[derive(Debug, Error)]
pub enum BriefingError {
    /// The route did not contain an origin and a destination airport.
    #[error("route needs at least two 4-letter airport codes, found {found}")]
    InsufficientAirports { found: usize },

    #[error("{product} request failed: {source}")]
    Transport {
        product: Product,
        #[source]
        source: reqwest::Error,
    },

    #[error("SIGMET response is not well-formed XML: {reason}")]
    Parse { reason: String },
}

impl BriefingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BriefingError::InsufficientAirports { .. } => ErrorKind::Input,
            BriefingError::Transport { .. } => ErrorKind::Transport,
            BriefingError::Parse { .. } => ErrorKind::Parse,
        }
    }

    pub(crate) fn transport(product: Product, source: reqwest::Error) -> Self {
        BriefingError::Transport { product, source }
    }
}

impl From<quick_xml::Error> for BriefingError {
    fn from(err: quick_xml::Error) -> Self {
        BriefingError::Parse { reason: err.to_string() }
    }
}

impl From<quick_xml::encoding::EncodingError> for BriefingError {
    fn from(err: quick_xml::encoding::EncodingError) -> Self {
        BriefingError::Parse { reason: err.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_airports_is_an_input_error() {
        let err = BriefingError::InsufficientAirports { found: 1 };

        assert_eq!(err.kind(), ErrorKind::Input);
        assert!(err.to_string().contains("found 1"));
    }

    #[test]
    fn parse_error_keeps_reason() {
        let err = BriefingError::Parse { reason: "unexpected end".into() };

        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(err.to_string().contains("unexpected end"));
    }
}

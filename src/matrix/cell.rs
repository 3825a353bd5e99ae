use std::fmt;

use crate::signed::Sign;

/// One entry of a [`DenseMatrix`](super::DenseMatrix).
///
/// `Invalid` holds text that was typed into a cell but is not one of the
/// three symbols. It is accepted by [`edit`](super::DenseMatrix::edit) and
/// rejected by [`commit`](super::commit).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    Plus,
    Minus,
    /// No relation, shown as `/`.
    #[default]
    Empty,
    Invalid(String),
}

impl Cell {
    pub const EMPTY_SYMBOL: &'static str = "/";

    /// Reads one cell of user input. Never fails: anything unrecognised
    /// becomes [`Cell::Invalid`].
    pub fn parse(text: &str) -> Cell {
        match text {
            "+" => Cell::Plus,
            "-" => Cell::Minus,
            Self::EMPTY_SYMBOL => Cell::Empty,
            other => Cell::Invalid(other.to_owned()),
        }
    }

    pub fn symbol(&self) -> &str {
        match self {
            Cell::Plus => "+",
            Cell::Minus => "-",
            Cell::Empty => Self::EMPTY_SYMBOL,
            Cell::Invalid(text) => text,
        }
    }

    pub fn sign(&self) -> Option<Sign> {
        match self {
            Cell::Plus => Some(Sign::Positive),
            Cell::Minus => Some(Sign::Negative),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_valid(&self) -> bool {
        !matches!(self, Cell::Invalid(_))
    }
}

impl From<Sign> for Cell {
    fn from(sign: Sign) -> Self {
        match sign {
            Sign::Positive => Cell::Plus,
            Sign::Negative => Cell::Minus,
        }
    }
}

impl From<Option<Sign>> for Cell {
    fn from(sign: Option<Sign>) -> Self {
        sign.map_or(Cell::Empty, Cell::from)
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Cell::parse(text)
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Cell::parse(&text)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.symbol())
    }
}

use std::{fmt, ops::Mul, str::FromStr};

use thiserror::Error;

/// The label of a signed edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sign {
    Positive,
    Negative,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown sign symbol {0:?}, expected \"+\" or \"-\"")]
pub struct SignParseError(pub String);

impl Sign {
    pub fn symbol(self) -> char {
        match self {
            Sign::Positive => '+',
            Sign::Negative => '-',
        }
    }

    pub fn is_positive(self) -> bool {
        self == Sign::Positive
    }
}

impl TryFrom<char> for Sign {
    type Error = SignParseError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '+' => Ok(Sign::Positive),
            '-' => Ok(Sign::Negative),
            other => Err(SignParseError(other.to_string())),
        }
    }
}

impl FromStr for Sign {
    type Err = SignParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Sign::Positive),
            "-" => Ok(Sign::Negative),
            other => Err(SignParseError(other.to_owned())),
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Sign multiplication: the sign of a path is the product of its edges.
impl Mul for Sign {
    type Output = Sign;

    fn mul(self, rhs: Sign) -> Sign {
        if self == rhs {
            Sign::Positive
        } else {
            Sign::Negative
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_symbols() {
        assert_eq!("+".parse::<Sign>(), Ok(Sign::Positive));
        assert_eq!("-".parse::<Sign>(), Ok(Sign::Negative));
        assert_eq!(Sign::try_from('-'), Ok(Sign::Negative));
        assert_eq!(
            "/".parse::<Sign>(),
            Err(SignParseError("/".to_string()))
        );
        assert!("++".parse::<Sign>().is_err());
        assert!(Sign::try_from('x').is_err());
    }

    #[test]
    fn product_of_signs() {
        use Sign::*;
        assert_eq!(Positive * Positive, Positive);
        assert_eq!(Negative * Negative, Positive);
        assert_eq!(Positive * Negative, Negative);
        assert_eq!(Negative * Positive, Negative);
    }
}

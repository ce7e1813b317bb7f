use core::fmt;
use serde::de::{Error as DeError, Unexpected};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Seat {
    First = 0,
    Second = 1,
    Third = 2,
    Fourth = 3,
}

impl Seat {
    pub const LOOP: [Seat; 4] = [Seat::First, Seat::Second, Seat::Third, Seat::Fourth];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Seat::First),
            1 => Some(Seat::Second),
            2 => Some(Seat::Third),
            3 => Some(Seat::Fourth),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn next(self) -> Seat {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::Third,
            Seat::Third => Seat::Fourth,
            Seat::Fourth => Seat::First,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.index())
    }
}

// Seats travel as bare integers 0..3 on the wire.
impl Serialize for Seat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

impl<'de> Deserialize<'de> for Seat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let index = u64::deserialize(deserializer)?;
        Seat::from_index(index as usize).ok_or_else(|| {
            D::Error::invalid_value(Unexpected::Unsigned(index), &"a seat index in 0..4")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Seat;

    #[test]
    fn next_wraps_around() {
        assert_eq!(Seat::Fourth.next(), Seat::First);
    }

    #[test]
    fn index_roundtrip() {
        for (i, seat) in Seat::LOOP.iter().enumerate() {
            assert_eq!(Seat::from_index(i), Some(*seat));
            assert_eq!(seat.index(), i);
        }
        assert_eq!(Seat::from_index(4), None);
    }

    #[test]
    fn wire_form_is_an_integer() {
        assert_eq!(serde_json::to_string(&Seat::Third).unwrap(), "2");
        let parsed: Seat = serde_json::from_str("3").unwrap();
        assert_eq!(parsed, Seat::Fourth);
        assert!(serde_json::from_str::<Seat>("4").is_err());
    }
}

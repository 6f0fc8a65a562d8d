use std::{error::Error, fmt, str::FromStr};

/// A square of the board, addressed by row and column.
///
/// Row 0 is Black's back rank at game start and row 7 is White's; columns
/// 0 to 7 map to files `a` to `h`. The algebraic name of row 0, column 4
/// is therefore `e8`, and White's pawns start on row 6 (rank 2).
///
/// # Examples
///
/// ```
/// use woodpusher::Square;
///
/// assert_eq!(Square::new(6, 4), Square::E2);
/// assert_eq!(Square::E2.to_string(), "e2");
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Square(u8);

impl Square {
    /// Constructs a square from row and column.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if either coordinate is out of range.
    #[inline]
    pub const fn new(row: u8, col: u8) -> Square {
        debug_assert!(row < 8 && col < 8);
        Square(row * 8 + col)
    }

    /// Constructs a square from signed coordinates, or `None` if either
    /// falls outside the board. Candidate destinations built from raw
    /// offsets go through here, so off-board cells are never represented.
    #[inline]
    pub const fn from_coords(row: i8, col: i8) -> Option<Square> {
        if 0 <= row && row < 8 && 0 <= col && col < 8 {
            Some(Square::new(row as u8, col as u8))
        } else {
            None
        }
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.0 / 8
    }

    #[inline]
    pub const fn col(self) -> u8 {
        self.0 % 8
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Row and column offsets from `self` to `other`.
    #[inline]
    pub const fn delta(self, other: Square) -> (i8, i8) {
        (
            other.row() as i8 - self.row() as i8,
            other.col() as i8 - self.col() as i8,
        )
    }

    /// The number of king steps from `self` to `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use woodpusher::Square;
    ///
    /// assert_eq!(Square::D2.distance(Square::G3), 3);
    /// assert_eq!(Square::E1.distance(Square::E1), 0);
    /// ```
    pub const fn distance(self, other: Square) -> u8 {
        let (dr, dc) = self.delta(other);
        let dr = dr.unsigned_abs();
        let dc = dc.unsigned_abs();
        if dr > dc {
            dr
        } else {
            dc
        }
    }

    /// All 64 squares in board-index order, `a8` first, `h1` last.
    pub const ALL: [Square; 64] = {
        let mut all = [Square(0); 64];
        let mut index = 0;
        while index < 64 {
            all[index as usize] = Square(index);
            index += 1;
        }
        all
    };
}

macro_rules! square_consts {
    ($($name:ident = $index:expr,)+) => {
        impl Square {
            $(
                #[allow(missing_docs)]
                pub const $name: Square = Square($index);
            )+
        }
    };
}

square_consts! {
    A8 = 0, B8 = 1, C8 = 2, D8 = 3, E8 = 4, F8 = 5, G8 = 6, H8 = 7,
    A7 = 8, B7 = 9, C7 = 10, D7 = 11, E7 = 12, F7 = 13, G7 = 14, H7 = 15,
    A6 = 16, B6 = 17, C6 = 18, D6 = 19, E6 = 20, F6 = 21, G6 = 22, H6 = 23,
    A5 = 24, B5 = 25, C5 = 26, D5 = 27, E5 = 28, F5 = 29, G5 = 30, H5 = 31,
    A4 = 32, B4 = 33, C4 = 34, D4 = 35, E4 = 36, F4 = 37, G4 = 38, H4 = 39,
    A3 = 40, B3 = 41, C3 = 42, D3 = 43, E3 = 44, F3 = 45, G3 = 46, H3 = 47,
    A2 = 48, B2 = 49, C2 = 50, D2 = 51, E2 = 52, F2 = 53, G2 = 54, H2 = 55,
    A1 = 56, B1 = 57, C1 = 58, D1 = 59, E1 = 60, F1 = 61, G1 = 62, H1 = 63,
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            (b'a' + self.col()) as char,
            (b'8' - self.row()) as char
        )
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string().to_uppercase())
    }
}

/// Error when parsing an invalid square name.
#[derive(Clone, Debug)]
pub struct ParseSquareError;

impl fmt::Display for ParseSquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid square name")
    }
}

impl Error for ParseSquareError {}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Square, ParseSquareError> {
        match *s.as_bytes() {
            [file @ b'a'..=b'h', rank @ b'1'..=b'8'] => {
                Ok(Square::new(b'8' - rank, file - b'a'))
            }
            _ => Err(ParseSquareError),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Square {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Square {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct SquareVisitor;

        impl serde::de::Visitor<'_> for SquareVisitor {
            type Value = Square;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("square name")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                value.parse().map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_str(SquareVisitor)
    }
}

//! QBF instances and their text format.
//!
//! A quadratic binary function over `n` variables is
//! `f(x) = sum_i sum_j a_ij x_i x_j` with an upper-triangular coefficient
//! matrix `A`. Instances are stored as whitespace-separated tokens:
//!
//! ```raw
//! n
//! a_0,0 a_0,1 ... a_0,n-1
//!       a_1,1 ... a_1,n-1
//!                 ...
//!                 a_n-1,n-1
//! ```
//!
//! Row `i` holds the `n - i` entries on and right of the diagonal. Line
//! breaks carry no meaning; `#` starts a comment that runs to the end of
//! the line.

use rand::Rng;
use std::{
    fmt,
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
    str::FromStr,
};

/// Errors raised while loading a QBF instance.
#[derive(Debug)]
pub enum QbfError {
    /// Reading the input failed.
    Io(std::io::Error),
    /// The input ended before the matrix was complete.
    UnexpectedEof {
        /// Coefficients the header promised.
        expected: usize,
        /// Coefficients actually read.
        found: usize,
    },
    /// A token is not a number of the expected type.
    Parse(ParseTokenError),
    /// The instance declares zero variables.
    InvalidDimension,
    /// The declared size does not fit in memory addressing.
    DimensionTooLarge(usize),
    /// A row of an explicit upper triangle has the wrong length.
    RaggedRow {
        /// Row position.
        row: usize,
        /// Required length, `n - row`.
        expected: usize,
        /// Supplied length.
        found: usize,
    },
}

/// A token that failed to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTokenError {
    /// The offending token.
    pub token: String,
    /// Type the token was parsed as.
    pub type_name: &'static str,
}

impl fmt::Display for ParseTokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not parse '{}' as {}", self.token, self.type_name)
    }
}

impl std::error::Error for ParseTokenError {}

impl fmt::Display for QbfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::UnexpectedEof { expected, found } => write!(
                f,
                "unexpected end of input: expected {expected} coefficients, found {found}"
            ),
            Self::Parse(e) => write!(f, "parse error: {e}"),
            Self::InvalidDimension => write!(f, "instance size must be a positive integer"),
            Self::DimensionTooLarge(n) => write!(f, "instance size {n} is too large"),
            Self::RaggedRow {
                row,
                expected,
                found,
            } => write!(f, "row {row} must hold {expected} coefficients, got {found}"),
        }
    }
}

impl std::error::Error for QbfError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for QbfError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ParseTokenError> for QbfError {
    fn from(e: ParseTokenError) -> Self {
        Self::Parse(e)
    }
}

/// Coefficient matrix of a quadratic binary function.
///
/// Entries below the diagonal are zero.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QbfInstance {
    size: usize,
    /// Row-major `size x size`.
    matrix: Vec<f64>,
}

impl QbfInstance {
    /// Builds an instance from its upper triangle; `rows[i]` holds
    /// `a_i,i ..= a_i,n-1`.
    pub fn from_upper_triangle(rows: &[Vec<f64>]) -> Result<Self, QbfError> {
        let size = rows.len();
        if size == 0 {
            return Err(QbfError::InvalidDimension);
        }
        let mut matrix = vec![0.0; size * size];
        for (i, row) in rows.iter().enumerate() {
            if row.len() != size - i {
                return Err(QbfError::RaggedRow {
                    row: i,
                    expected: size - i,
                    found: row.len(),
                });
            }
            matrix[i * size + i..(i + 1) * size].copy_from_slice(row);
        }
        Ok(Self { size, matrix })
    }

    /// Reads an instance from a buffered reader.
    pub fn from_bufread<R: BufRead>(rdr: R) -> Result<Self, QbfError> {
        let mut tokens = Tokens::new(rdr);
        let size: usize = tokens.next()?.ok_or(QbfError::UnexpectedEof {
            expected: 0,
            found: 0,
        })?;
        if size == 0 {
            return Err(QbfError::InvalidDimension);
        }

        let cells = size
            .checked_mul(size)
            .filter(|&c| c <= isize::MAX as usize / std::mem::size_of::<f64>())
            .ok_or(QbfError::DimensionTooLarge(size))?;
        let expected = (cells - size) / 2 + size;

        // Coefficients are collected as they arrive, so a header that
        // promises more than the input holds fails on EOF, not on allocation.
        let mut triangle: Vec<f64> = Vec::new();
        while triangle.len() < expected {
            let value = tokens.next()?.ok_or(QbfError::UnexpectedEof {
                expected,
                found: triangle.len(),
            })?;
            triangle.push(value);
        }

        let mut matrix = vec![0.0; cells];
        let mut values = triangle.into_iter();
        for i in 0..size {
            for (cell, value) in matrix[i * size + i..(i + 1) * size].iter_mut().zip(&mut values) {
                *cell = value;
            }
        }
        Ok(Self { size, matrix })
    }

    /// Reads an instance from any reader.
    pub fn from_reader<R: Read>(rdr: R) -> Result<Self, QbfError> {
        Self::from_bufread(BufReader::new(rdr))
    }

    /// Reads an instance from a file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, QbfError> {
        let file = File::open(path)?;
        Self::from_bufread(BufReader::new(file))
    }

    /// Random instance with integer coefficients in `[-max_abs, max_abs]`.
    pub fn random<R: Rng>(size: usize, max_abs: u32, rng: &mut R) -> Self {
        let bound = i64::from(max_abs);
        let mut matrix = vec![0.0; size * size];
        for i in 0..size {
            for j in i..size {
                matrix[i * size + j] = rng.random_range(-bound..=bound) as f64;
            }
        }
        Self { size, matrix }
    }

    /// Number of variables.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Coefficient `a_ij`. Zero below the diagonal.
    #[inline]
    pub fn coefficient(&self, i: usize, j: usize) -> f64 {
        self.matrix[i * self.size + j]
    }

    /// `f(x)` for the assignment that sets exactly `selected` to 1.
    pub fn value(&self, selected: &[usize]) -> f64 {
        selected
            .iter()
            .map(|&i| selected.iter().map(|&j| self.coefficient(i, j)).sum::<f64>())
            .sum()
    }
}

impl FromStr for QbfInstance {
    type Err = QbfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_reader(s.as_bytes())
    }
}

/// Whitespace-separated tokens with `#` comments.
struct Tokens<R> {
    rdr: R,
    line: String,
    pending: Vec<String>,
}

impl<R: BufRead> Tokens<R> {
    fn new(rdr: R) -> Self {
        Self {
            rdr,
            line: String::new(),
            pending: Vec::new(),
        }
    }

    /// Next token parsed as `T`, or `None` at end of input.
    fn next<T: FromStr>(&mut self) -> Result<Option<T>, QbfError> {
        while self.pending.is_empty() {
            self.line.clear();
            if self.rdr.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            let content = self.line.split('#').next().unwrap_or_default();
            self.pending = content.split_whitespace().rev().map(str::to_owned).collect();
        }

        let Some(token) = self.pending.pop() else {
            return Ok(None);
        };
        token.parse::<T>().map(Some).map_err(|_| {
            QbfError::Parse(ParseTokenError {
                token,
                type_name: std::any::type_name::<T>(),
            })
        })
    }
}

//! Pauli operators in symplectic (*x*, *z*) form.
//!
//! An *n*-qubit Pauli operator is stored as two length-*n* bit vectors, where
//! bit *k* of the *x* (resp. *z*) part is set if qubit *k* carries an *X*
//! (resp. *Z*) factor. Both bits set encodes *Y*; neither encodes *I*. Overall
//! phases are not tracked.

use std::{ fmt, str::FromStr };
use thiserror::Error;
use crate::circuit::Gate;

#[derive(Debug, Error)]
pub enum PauliError {
    /// Returned when parsing encounters a character outside `{I, X, Y, Z}`.
    #[error("invalid Pauli letter {0:?} at position {1}")]
    InvalidPauliLetter(char, usize),

    /// Returned when conjugating by a gate outside `{H, S, CX}`.
    #[error("cannot conjugate a Pauli operator with gate {0}")]
    UnsupportedGateForConjugation(Gate),

    /// Returned when a gate targets a qubit outside the operator's register.
    #[error("qubit {0} is out of range for a {1}-qubit operator")]
    QubitOutOfRange(usize, usize),
}
pub type PauliResult<T> = Result<T, PauliError>;

/// A single-qubit Pauli factor.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Letter {
    #[default]
    I,
    X,
    Y,
    Z,
}

impl Letter {
    /// Build from symplectic bits.
    pub fn from_bits(x: bool, z: bool) -> Self {
        match (x, z) {
            (false, false) => Self::I,
            (true,  false) => Self::X,
            (true,  true ) => Self::Y,
            (false, true ) => Self::Z,
        }
    }

    /// Return the (*x*, *z*) bits of `self`.
    pub fn bits(self) -> (bool, bool) {
        match self {
            Self::I => (false, false),
            Self::X => (true,  false),
            Self::Y => (true,  true ),
            Self::Z => (false, true ),
        }
    }

    /// Return `true` if `self` is `I` or `Z`.
    pub fn is_diagonal(self) -> bool { matches!(self, Self::I | Self::Z) }

    /// Return the character for `self`.
    pub fn as_char(self) -> char {
        match self {
            Self::I => 'I',
            Self::X => 'X',
            Self::Y => 'Y',
            Self::Z => 'Z',
        }
    }
}

impl TryFrom<char> for Letter {
    type Error = char;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'I' => Ok(Self::I),
            'X' => Ok(Self::X),
            'Y' => Ok(Self::Y),
            'Z' => Ok(Self::Z),
            _ => Err(c),
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Parse a string over `{I, X, Y, Z}` into letters.
pub fn parse_letters(s: &str) -> PauliResult<Vec<Letter>> {
    s.chars().enumerate()
        .map(|(k, c)| {
            Letter::try_from(c)
                .map_err(|bad| PauliError::InvalidPauliLetter(bad, k))
        })
        .collect()
}

/// An *n*-qubit Pauli operator, up to phase.
///
/// The register size is fixed at construction; the only way to change an
/// existing operator is conjugation by an elementary Clifford gate (or
/// [`relocate`][Self::relocate], which keeps the register size).
///
/// ```
/// # use h_gadget::pauli::Pauli;
/// let a: Pauli = "XXI".parse().unwrap();
/// let b: Pauli = "ZZY".parse().unwrap();
/// let c: Pauli = "ZIZ".parse().unwrap();
/// assert!(a.commutes(&b));
/// assert!(!a.commutes(&c));
/// assert_eq!(b.to_string(), "ZZY");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Pauli {
    x: Vec<bool>,
    z: Vec<bool>,
}

impl FromStr for Pauli {
    type Err = PauliError;

    fn from_str(s: &str) -> PauliResult<Self> {
        Ok(Self::from_letters(&parse_letters(s)?))
    }
}

impl fmt::Display for Pauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.letters().try_for_each(|l| write!(f, "{}", l))
    }
}

impl Pauli {
    /// Create the identity on `n` qubits.
    pub fn identity(n: usize) -> Self {
        Self { x: vec![false; n], z: vec![false; n] }
    }

    /// Create the operator acting as `letter` on qubit `k` and as the identity
    /// everywhere else.
    ///
    /// *Panics if `k >= n`.*
    pub fn single(n: usize, k: usize, letter: Letter) -> Self {
        let mut new = Self::identity(n);
        let (x, z) = letter.bits();
        new.x[k] = x;
        new.z[k] = z;
        new
    }

    /// Build from a sequence of letters.
    pub fn from_letters(letters: &[Letter]) -> Self {
        let (x, z): (Vec<bool>, Vec<bool>)
            = letters.iter().map(|l| l.bits()).unzip();
        Self { x, z }
    }

    /// Return the number of qubits.
    pub fn len(&self) -> usize { self.x.len() }

    /// Return `true` if `self` acts on zero qubits.
    pub fn is_empty(&self) -> bool { self.x.is_empty() }

    /// Return the letter on qubit `k`, if it exists.
    pub fn get(&self, k: usize) -> Option<Letter> {
        self.x.get(k).zip(self.z.get(k))
            .map(|(x, z)| Letter::from_bits(*x, *z))
    }

    /// Return an iterator over all letters.
    pub fn letters(&self) -> impl Iterator<Item = Letter> + '_ {
        self.x.iter().zip(&self.z).map(|(x, z)| Letter::from_bits(*x, *z))
    }

    /// Return the *x* part.
    pub fn x_bits(&self) -> &[bool] { &self.x }

    /// Return the *z* part.
    pub fn z_bits(&self) -> &[bool] { &self.z }

    /// Return `true` if `self` is the identity.
    pub fn is_identity(&self) -> bool {
        self.x.iter().chain(&self.z).all(|b| !b)
    }

    /// Return `true` if `self` and `other` commute, i.e. if their symplectic
    /// inner product vanishes.
    ///
    /// Operators of different sizes are compared over their common prefix.
    pub fn commutes(&self, other: &Self) -> bool {
        let parity
            = self.x.iter().zip(&self.z)
            .zip(other.x.iter().zip(&other.z))
            .fold(false, |acc, ((xa, za), (xb, zb))| {
                acc ^ ((*xa && *zb) ^ (*za && *xb))
            });
        !parity
    }

    fn check(&self, k: usize) -> PauliResult<()> {
        (k < self.len()).then_some(())
            .ok_or(PauliError::QubitOutOfRange(k, self.len()))
    }

    /// Conjugate `self` in place by a single gate.
    ///
    /// Only `H`, `S`, and `CX` are supported.
    pub fn conjugate_with_gate(&mut self, gate: &Gate) -> PauliResult<()> {
        match *gate {
            Gate::H(k) => {
                self.check(k)?;
                std::mem::swap(&mut self.x[k], &mut self.z[k]);
            },
            Gate::S(k) => {
                self.check(k)?;
                self.z[k] ^= self.x[k];
            },
            Gate::CX(c, t) => {
                self.check(c)?;
                self.check(t)?;
                self.z[c] ^= self.z[t];
                self.x[t] ^= self.x[c];
            },
            Gate::CZ(..) | Gate::Meas(..) => {
                return Err(PauliError::UnsupportedGateForConjugation(*gate));
            },
        }
        Ok(())
    }

    /// Conjugate `self` in place by a sequence of gates, applied in order.
    ///
    /// On error, `self` is left conjugated by all gates preceding the failing
    /// one.
    pub fn conjugate_with<'a, I>(&mut self, gates: I) -> PauliResult<()>
    where I: IntoIterator<Item = &'a Gate>
    {
        gates.into_iter().try_for_each(|g| self.conjugate_with_gate(g))
    }

    /// Like [`conjugate_with`][Self::conjugate_with], but return a new
    /// operator, leaving `self` untouched.
    pub fn conjugated<'a, I>(&self, gates: I) -> PauliResult<Self>
    where I: IntoIterator<Item = &'a Gate>
    {
        let mut new = self.clone();
        new.conjugate_with(gates)?;
        Ok(new)
    }

    /// Move the factor on qubit `from` to qubit `to`, leaving the identity on
    /// `from`. Whatever factor was on `to` is overwritten.
    pub fn relocate(&mut self, from: usize, to: usize) -> PauliResult<()> {
        self.check(from)?;
        self.check(to)?;
        if from != to {
            self.x[to] = std::mem::take(&mut self.x[from]);
            self.z[to] = std::mem::take(&mut self.z[from]);
        }
        Ok(())
    }
}

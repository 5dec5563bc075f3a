//! Diagonalization networks, as produced by an external diagonalizing solver.
//!
//! A network is an ordered sequence of [`Step`]s. Each step holds a local
//! Clifford piece over `{H, S, CX}`, followed by a rotation whose axis is
//! diagonal in the frame produced by all pieces up to and including its own.
//! Qubit indices in a network are always *logical*.

use thiserror::Error;
use crate::{
    circuit::{ CircuitError, Gate },
    pauli::{ self, Letter, PauliError },
};

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("gate error: {0}")]
    CircuitError(#[from] CircuitError),

    #[error("rotation error: {0}")]
    PauliError(#[from] PauliError),
}
pub type NetworkResult<T> = Result<T, NetworkError>;

/// A step of a [`Network`]: a Clifford piece, then a Pauli rotation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
    /// Clifford gates applied before the rotation, in order.
    pub piece: Vec<Gate>,
    /// Rotation axis over the logical register.
    pub axis: Vec<Letter>,
    /// Phase-parity flag: `true` if the rotation angle is negated.
    pub sign: bool,
}

impl Step {
    /// Create a new step, parsing the rotation axis from a letter string.
    pub fn new<I>(piece: I, axis: &str, sign: bool) -> NetworkResult<Self>
    where I: IntoIterator<Item = Gate>
    {
        let axis = pauli::parse_letters(axis)?;
        Ok(Self { piece: piece.into_iter().collect(), axis, sign })
    }

    /// Return the number of `H` gates in the piece.
    pub fn count_h(&self) -> usize {
        self.piece.iter().filter(|g| g.is_h()).count()
    }
}

/// An ordered sequence of [`Step`]s over a fixed logical register.
///
/// The register width is taken to be the length of the first step's axis;
/// consistency across steps is checked by the
/// [gadgetizer][crate::gadget::gadgetize_raw].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Network {
    pub(crate) steps: Vec<Step>,
}

impl FromIterator<Step> for Network {
    fn from_iter<I>(iter: I) -> Self
    where I: IntoIterator<Item = Step>
    {
        Self { steps: iter.into_iter().collect() }
    }
}

impl Network {
    /// Create a new network from a list of steps.
    pub fn new(steps: Vec<Step>) -> Self { Self { steps } }

    /// Read a network from tagged form, where each step is
    /// `(piece, (sign, axis))` and each gate is `(tag, qubits)`. See
    /// [`Gate::from_tagged`] for accepted tags.
    ///
    /// ```
    /// # use h_gadget::network::Network;
    /// let raw = vec![
    ///     (vec![("CNOT".to_string(), vec![1, 0]), ("H".to_string(), vec![1])],
    ///      (false, "IZ".to_string())),
    ///     (vec![], (true, "ZI".to_string())),
    /// ];
    /// let network = Network::from_tagged(raw).unwrap();
    /// assert_eq!(network.len(), 2);
    /// assert_eq!(network.width(), Some(2));
    /// assert_eq!(network.predicted_width(), Some(3));
    /// ```
    pub fn from_tagged<S>(raw: Vec<(Vec<(S, Vec<usize>)>, (bool, S))>)
        -> NetworkResult<Self>
    where S: AsRef<str>
    {
        raw.into_iter()
            .map(|(piece, (sign, axis))| {
                let gates: Vec<Gate>
                    = piece.into_iter()
                    .map(|(tag, qubits)| Gate::from_tagged(tag.as_ref(), &qubits))
                    .collect::<Result<_, _>>()?;
                Step::new(gates, axis.as_ref(), sign)
            })
            .collect::<NetworkResult<Vec<Step>>>()
            .map(Self::new)
    }

    /// Return the number of steps.
    pub fn len(&self) -> usize { self.steps.len() }

    /// Return `true` if `self` has no steps.
    pub fn is_empty(&self) -> bool { self.steps.is_empty() }

    /// Return the steps of `self` as a slice.
    pub fn steps(&self) -> &[Step] { &self.steps }

    /// Return the `k`-th step, if it exists.
    pub fn get(&self, k: usize) -> Option<&Step> { self.steps.get(k) }

    /// Return the width of the logical register, if `self` has at least one
    /// step.
    pub fn width(&self) -> Option<usize> {
        self.steps.first().map(|step| step.axis.len())
    }

    /// Return the total number of `H` gates over all pieces.
    pub fn count_h(&self) -> usize {
        self.steps.iter().map(Step::count_h).sum()
    }

    /// Return the number of physical qubits needed to gadgetize every `H` gate
    /// in `self`: one fresh ancilla per `H`, on top of the logical register.
    pub fn predicted_width(&self) -> Option<usize> {
        self.width().map(|n| n + self.count_h())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_new() {
        let step = Step::new([Gate::H(0), Gate::S(1), Gate::H(1)], "ZZI", true)
            .unwrap();
        assert_eq!(step.axis, vec![Letter::Z, Letter::Z, Letter::I]);
        assert_eq!(step.count_h(), 2);
        assert!(step.sign);
        assert!(matches!(
            Step::new(Vec::<Gate>::new(), "ZW", false),
            Err(NetworkError::PauliError(PauliError::InvalidPauliLetter('W', 1)))
        ));
    }

    #[test]
    fn prediction() {
        let network: Network = [
            Step::new([Gate::CX(1, 0), Gate::H(1)], "IZI", false).unwrap(),
            Step::new([Gate::H(0), Gate::S(2), Gate::H(2)], "ZIZ", false).unwrap(),
            Step::new(Vec::<Gate>::new(), "ZZZ", false).unwrap(),
        ].into_iter().collect();
        assert_eq!(network.width(), Some(3));
        assert_eq!(network.count_h(), 3);
        assert_eq!(network.predicted_width(), Some(6));
        assert_eq!(Network::default().predicted_width(), None);
    }

    #[test]
    fn from_tagged_errors() {
        let raw = vec![
            (vec![("TOFFOLI", vec![0, 1, 2])], (false, "ZZZ")),
        ];
        assert!(matches!(
            Network::from_tagged(raw),
            Err(NetworkError::CircuitError(CircuitError::UnknownGate(_)))
        ));
        let raw = vec![(vec![("H", vec![0])], (false, "ZA"))];
        assert!(matches!(
            Network::from_tagged(raw),
            Err(NetworkError::PauliError(_))
        ));
    }
}

//! Bookkeeping for the physical register during gadgetization.
//!
//! Every gadgetized `H` gate retires the physical slot currently holding its
//! logical qubit and moves that qubit to a freshly allocated ancilla. The
//! [`QubitMap`] tracks where each logical qubit currently lives; the
//! [`Register`] adds the allocation counters.

use crate::pauli::{ Letter, Pauli };

/// Map from logical qubit index to current physical slot.
///
/// Stored densely: entry `k` is the physical slot of logical qubit `k`. Every
/// entry is always a valid slot of the enclosing [`Register`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QubitMap(Vec<usize>);

impl QubitMap {
    /// Create the identity map on `n` logical qubits.
    pub fn identity(n: usize) -> Self { Self((0..n).collect()) }

    /// Return the number of logical qubits.
    pub fn len(&self) -> usize { self.0.len() }

    /// Return `true` if `self` maps no qubits.
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Return the physical slot of logical qubit `k`.
    ///
    /// *Panics if `k` is out of range.*
    pub fn get(&self, k: usize) -> usize { self.0[k] }

    /// Move logical qubit `k` to physical slot `slot`, returning the slot it
    /// previously occupied.
    ///
    /// *Panics if `k` is out of range.*
    pub fn assign(&mut self, k: usize, slot: usize) -> usize {
        std::mem::replace(&mut self.0[k], slot)
    }

    /// Return the map as a slice.
    pub fn as_slice(&self) -> &[usize] { &self.0 }

    /// Scatter a logical letter string into a physical register of `width`
    /// qubits: letter `k` lands on slot `self.get(k)` and every other slot
    /// holds `I`.
    ///
    /// Returns `None` if the number of letters differs from the number of
    /// logical qubits, or if any slot falls outside `width`.
    pub fn scatter(&self, letters: &[Letter], width: usize) -> Option<Vec<Letter>> {
        if letters.len() != self.len() { return None; }
        let mut out = vec![Letter::I; width];
        for (letter, slot) in letters.iter().zip(&self.0) {
            *out.get_mut(*slot)? = *letter;
        }
        Some(out)
    }

    /// Like [`scatter`][Self::scatter], but return a [`Pauli`].
    pub fn scatter_pauli(&self, letters: &[Letter], width: usize) -> Option<Pauli> {
        self.scatter(letters, width).map(|l| Pauli::from_letters(&l))
    }
}

/// State of the physical register over one gadgetization pass.
///
/// The register has a fixed `width`, predicted before the pass. Slots
/// `0..next_ancilla` have been handed out; measurement IDs `0..next_meas` have
/// been issued.
#[derive(Clone, Debug)]
pub struct Register {
    pub(crate) map: QubitMap,
    pub(crate) width: usize,
    pub(crate) next_ancilla: usize,
    pub(crate) next_meas: usize,
}

impl Register {
    /// Create a new register holding `n` logical qubits in their home slots,
    /// with room for `width - n` ancillas.
    ///
    /// *Panics if `width < n`.*
    pub fn new(n: usize, width: usize) -> Self {
        assert!(width >= n, "register width {} below logical width {}", width, n);
        Self { map: QubitMap::identity(n), width, next_ancilla: n, next_meas: 0 }
    }

    /// Return the current logical-to-physical map.
    pub fn map(&self) -> &QubitMap { &self.map }

    /// Return the total number of physical slots.
    pub fn width(&self) -> usize { self.width }

    /// Return the number of physical slots handed out so far.
    pub fn allocated(&self) -> usize { self.next_ancilla }

    /// Return the number of measurement IDs issued so far.
    pub fn measurements(&self) -> usize { self.next_meas }

    /// Move logical qubit `k` onto a fresh ancilla, returning the pair
    /// `(retired, fresh)` of physical slots, or `None` if the register is
    /// full.
    pub fn relocate(&mut self, k: usize) -> Option<(usize, usize)> {
        if self.next_ancilla >= self.width { return None; }
        let fresh = self.next_ancilla;
        self.next_ancilla += 1;
        let retired = self.map.assign(k, fresh);
        Some((retired, fresh))
    }

    /// Issue a new measurement ID.
    pub fn issue_measurement(&mut self) -> usize {
        let id = self.next_meas;
        self.next_meas += 1;
        id
    }
}

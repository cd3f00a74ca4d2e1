use super::*;
use bitvec::prelude::*;
use std::fmt::{self, Debug, Formatter};
use std::ops::{Index, SubAssign};

/// A fixed-size set of vertices that keeps track of its cardinality.
#[derive(Default, Clone, PartialEq, Eq, Hash)]
pub struct BitSet {
    cardinality: NumNodes,
    bit_vec: BitVec,
}

impl Debug for BitSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let values: Vec<_> = self.iter_set_bits().map(|i| i.to_string()).collect();
        write!(
            f,
            "BitSet {{ cardinality: {}, bit_vec: [{}]}}",
            self.cardinality,
            values.join(", "),
        )
    }
}

impl BitSet {
    #[inline]
    pub fn new(size: NumNodes) -> Self {
        Self {
            cardinality: 0,
            bit_vec: bitvec![0; size as usize],
        }
    }

    pub fn new_all_set(size: NumNodes) -> Self {
        Self {
            cardinality: size,
            bit_vec: bitvec![1; size as usize],
        }
    }

    pub fn new_with_bits_set<I>(size: NumNodes, bits: I) -> Self
    where
        I: IntoIterator<Item = Node>,
    {
        let mut set = Self::new(size);
        set.set_bits(bits);
        set
    }

    /// Number of bits (set or unset) the set can hold
    pub fn len(&self) -> NumNodes {
        self.bit_vec.len() as NumNodes
    }

    /// Number of set bits
    pub fn cardinality(&self) -> NumNodes {
        self.cardinality
    }

    pub fn is_empty(&self) -> bool {
        self.cardinality == 0
    }

    pub fn are_all_set(&self) -> bool {
        self.cardinality == self.len()
    }

    #[inline]
    pub fn get_bit(&self, idx: Node) -> bool {
        self.bit_vec[idx as usize]
    }

    /// Sets the bit and returns its previous value
    #[inline]
    pub fn set_bit(&mut self, idx: Node) -> bool {
        let previous = self.bit_vec.replace(idx as usize, true);
        self.cardinality += !previous as NumNodes;
        previous
    }

    /// Clears the bit and returns its previous value
    #[inline]
    pub fn unset_bit(&mut self, idx: Node) -> bool {
        let previous = self.bit_vec.replace(idx as usize, false);
        self.cardinality -= previous as NumNodes;
        previous
    }

    pub fn set_bits<I>(&mut self, bits: I)
    where
        I: IntoIterator<Item = Node>,
    {
        for idx in bits {
            self.set_bit(idx);
        }
    }

    pub fn unset_all(&mut self) {
        self.bit_vec.fill(false);
        self.cardinality = 0;
    }

    pub fn iter_set_bits(&self) -> impl Iterator<Item = Node> + '_ {
        self.bit_vec.iter_ones().map(|i| i as Node)
    }

    pub fn iter_cleared_bits(&self) -> impl Iterator<Item = Node> + '_ {
        self.bit_vec.iter_zeros().map(|i| i as Node)
    }

    pub fn is_subset_of(&self, other: &BitSet) -> bool {
        self.cardinality <= other.cardinality && self.iter_set_bits().all(|u| other.get_bit(u))
    }
}

impl SubAssign<&BitSet> for BitSet {
    fn sub_assign(&mut self, rhs: &BitSet) {
        debug_assert_eq!(self.len(), rhs.len());
        for idx in rhs.iter_set_bits() {
            self.unset_bit(idx);
        }
    }
}

impl Index<Node> for BitSet {
    type Output = bool;

    fn index(&self, idx: Node) -> &Self::Output {
        if self.get_bit(idx) { &true } else { &false }
    }
}

/*!
A fixed-capacity set of vertices, represented as a bitset.

# Overview

Domains are sets of target vertices, and almost all of the work of propagation
is intersecting such sets with the adjacency rows of the model.
So, sets are kept as packed [u64] words, one bit per vertex, and the
operations of interest are wide bitwise operations over the words together
with scans for the first and last set bit.

The capacity of a set is fixed on creation, and operations over a pair of sets
require equal capacity.
Bits at or beyond the capacity of a set are never set, and procedures are free
to rely on this.

# Example

```rust
# use homsearch::structures::VertexSet;
let mut values = VertexSet::full(5);
values.unset(2);

assert_eq!(values.count(), 4);
assert_eq!(values.first_set(), Some(0));
assert_eq!(values.last_set(), Some(4));

let odds = {
    let mut odds = VertexSet::empty(5);
    odds.set(1);
    odds.set(3);
    odds
};

values.intersect_with(&odds);
assert_eq!(values.iter().collect::<Vec<_>>(), vec![1, 3]);
```
*/

use crate::types::Vertex;

const WORD_BITS: usize = u64::BITS as usize;

/// A set of vertices below some fixed capacity, one bit per vertex.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VertexSet {
    /// Packed bits, least significant bit of word 0 first.
    words: Vec<u64>,

    /// The exclusive upper bound on members of the set.
    capacity: usize,
}

impl VertexSet {
    /// The empty set over `capacity` vertices.
    pub fn empty(capacity: usize) -> Self {
        VertexSet {
            words: vec![0; capacity.div_ceil(WORD_BITS)],
            capacity,
        }
    }

    /// The set of every vertex below `capacity`.
    pub fn full(capacity: usize) -> Self {
        let mut set = Self::empty(capacity);
        for word in &mut set.words {
            *word = u64::MAX;
        }
        set.mask_tail();
        set
    }

    /// The exclusive upper bound on members of the set.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Adds `v` to the set.
    pub fn set(&mut self, v: Vertex) {
        self.words[v as usize / WORD_BITS] |= 1 << (v as usize % WORD_BITS);
    }

    /// Removes `v` from the set.
    pub fn unset(&mut self, v: Vertex) {
        self.words[v as usize / WORD_BITS] &= !(1 << (v as usize % WORD_BITS));
    }

    /// Whether `v` is in the set.
    pub fn test(&self, v: Vertex) -> bool {
        match self.words.get(v as usize / WORD_BITS) {
            Some(word) => word & (1 << (v as usize % WORD_BITS)) != 0,
            None => false,
        }
    }

    /// The number of vertices in the set.
    pub fn count(&self) -> u32 {
        self.words.iter().map(|word| word.count_ones()).sum()
    }

    /// Whether any vertex is in the set.
    pub fn any(&self) -> bool {
        self.words.iter().any(|word| *word != 0)
    }

    /// Removes every vertex from the set.
    pub fn clear(&mut self) {
        for word in &mut self.words {
            *word = 0;
        }
    }

    /// Makes the set the singleton `{v}`.
    pub fn set_single(&mut self, v: Vertex) {
        self.clear();
        self.set(v);
    }

    /// Removes from the set every vertex not in `other`.
    pub fn intersect_with(&mut self, other: &VertexSet) {
        debug_assert_eq!(self.capacity, other.capacity);
        for (word, other_word) in self.words.iter_mut().zip(&other.words) {
            *word &= other_word;
        }
    }

    /// Removes from the set every vertex in `other`.
    ///
    /// As members of `self` are below capacity, the stray high bits of the
    /// complement of `other` are harmless.
    pub fn intersect_with_complement(&mut self, other: &VertexSet) {
        debug_assert_eq!(self.capacity, other.capacity);
        for (word, other_word) in self.words.iter_mut().zip(&other.words) {
            *word &= !other_word;
        }
    }

    /// Adds to the set every vertex in `other`.
    pub fn union_with(&mut self, other: &VertexSet) {
        debug_assert_eq!(self.capacity, other.capacity);
        for (word, other_word) in self.words.iter_mut().zip(&other.words) {
            *word |= other_word;
        }
    }

    /// The least vertex in the set, if any.
    pub fn first_set(&self) -> Option<Vertex> {
        for (index, word) in self.words.iter().enumerate() {
            if *word != 0 {
                return Some((index * WORD_BITS + word.trailing_zeros() as usize) as Vertex);
            }
        }
        None
    }

    /// The greatest vertex in the set, if any.
    ///
    /// A direct scan from the top word, equivalent to (though rather faster
    /// than) exhausting [first_set](VertexSet::first_set) on a scratch copy.
    pub fn last_set(&self) -> Option<Vertex> {
        for (index, word) in self.words.iter().enumerate().rev() {
            if *word != 0 {
                let top = WORD_BITS - 1 - word.leading_zeros() as usize;
                return Some((index * WORD_BITS + top) as Vertex);
            }
        }
        None
    }

    /// An iterator over the members of the set, in increasing order.
    pub fn iter(&self) -> SetVertices<'_> {
        SetVertices {
            words: &self.words,
            index: 0,
            word: self.words.first().copied().unwrap_or(0),
        }
    }

    /// Zeroes any bits at or beyond capacity in the top word.
    fn mask_tail(&mut self) {
        let tail = self.capacity % WORD_BITS;
        if tail != 0 {
            if let Some(word) = self.words.last_mut() {
                *word &= (1 << tail) - 1;
            }
        }
    }
}

/// See [VertexSet::iter].
pub struct SetVertices<'s> {
    words: &'s [u64],
    index: usize,
    word: u64,
}

impl Iterator for SetVertices<'_> {
    type Item = Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        while self.word == 0 {
            self.index += 1;
            self.word = *self.words.get(self.index)?;
        }
        let bit = self.word.trailing_zeros() as usize;
        self.word &= self.word - 1;
        Some((self.index * WORD_BITS + bit) as Vertex)
    }
}

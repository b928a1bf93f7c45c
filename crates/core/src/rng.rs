//! RNG module - 7-bag piece randomizer
//!
//! The bag holds one of each of the seven kinds in shuffled order and is
//! consumed front to back; once every kind has been drawn it is reshuffled.
//! This bounds how long any kind can fail to appear.
//!
//! Randomness comes from a small seeded LCG so games are reproducible.

use crate::piece::Tetromino;
use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Random value in `[0, max)`
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Durstenfeld (in-place Fisher-Yates) shuffle
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// 7-bag piece randomizer
#[derive(Debug, Clone)]
pub struct PieceBag {
    bag: [PieceKind; 7],
    /// Index of the next kind to hand out.
    cursor: usize,
    rng: SimpleRng,
}

impl PieceBag {
    /// Create a freshly shuffled bag
    pub fn new(seed: u32) -> Self {
        let mut bag = Self {
            bag: PieceKind::ALL,
            cursor: 0,
            rng: SimpleRng::new(seed),
        };
        bag.shuffle();
        bag
    }

    /// Reorder the bag into a new random permutation and rewind the cursor.
    pub fn shuffle(&mut self) {
        self.rng.shuffle(&mut self.bag);
        self.cursor = 0;
    }

    /// Draw the next kind, reshuffling first if the bag is used up.
    pub fn next_kind(&mut self) -> PieceKind {
        if self.cursor >= self.bag.len() {
            self.shuffle();
        }
        let kind = self.bag[self.cursor];
        self.cursor += 1;
        kind
    }

    /// Draw the next kind as a new, unspawned piece.
    pub fn next_piece(&mut self) -> Tetromino {
        Tetromino::new(self.next_kind())
    }

    /// Kind that the next draw will return
    ///
    /// When the bag is used up this previews the next permutation with a copy
    /// of the RNG, so it always agrees with the following draw.
    pub fn peek(&self) -> PieceKind {
        if self.cursor < self.bag.len() {
            return self.bag[self.cursor];
        }
        let mut preview_rng = self.rng.clone();
        let mut next_bag = self.bag;
        preview_rng.shuffle(&mut next_bag);
        next_bag[0]
    }

    /// Build a piece by template index, bypassing the bag.
    pub fn piece_by_index(&self, idx: usize) -> Option<Tetromino> {
        PieceKind::from_index(idx).map(Tetromino::new)
    }

    /// Build a piece by name (`"t"`, `"I"`, ...), bypassing the bag.
    pub fn piece_by_name(&self, name: &str) -> Option<Tetromino> {
        PieceKind::from_str(name).map(Tetromino::new)
    }

    /// Current permutation, including kinds already handed out.
    pub fn bag(&self) -> &[PieceKind; 7] {
        &self.bag
    }

    /// Kinds not yet handed out from the current permutation.
    pub fn remaining(&self) -> &[PieceKind] {
        &self.bag[self.cursor.min(self.bag.len())..]
    }

    /// Current RNG state, usable as a seed to replay from here.
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for PieceBag {
    fn default() -> Self {
        Self::new(1)
    }
}

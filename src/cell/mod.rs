//! # Cells — The Bit-Precision Tree Builder
//!
//! Wallet contract payloads are not byte streams. They are trees of *cells*:
//! containers holding up to 1023 data bits and up to 4 references to child
//! cells. Fields are packed at bit granularity in a fixed order, child
//! payloads hang off references, and the whole tree is identified by a
//! content hash computed leaves-first.
//!
//! This module provides the two halves of that model:
//!
//! - [`CellBuilder`] — an append-only writer for data bits and references.
//! - [`Cell`] — the immutable, hashable container a builder seals into.
//!
//! The content hash covers the reference count, the exact bit length, the
//! data bits, and the hashes of all children — so any single-bit change
//! anywhere in the tree changes the root hash. That hash is what gets
//! signed, which is the entire point.

pub mod builder;

pub use builder::CellBuilder;

use sha2::{Digest, Sha256};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Maximum number of data bits a single cell can hold.
pub const MAX_DATA_BITS: usize = 1023;

/// Maximum number of child references a single cell can hold.
pub const MAX_REFERENCES: usize = 4;

/// Errors from cell construction.
///
/// All of these are caller errors — a cell never fails to build once its
/// contents were accepted, and sealing is infallible.
#[derive(Debug, Error)]
pub enum CellError {
    /// The write would exceed the 1023-bit data capacity.
    #[error("cell data capacity exceeded: {requested} bits requested, {remaining} remaining")]
    DataOverflow { requested: usize, remaining: usize },

    /// The write would exceed the 4-reference capacity.
    #[error("cell reference capacity exceeded: a cell holds at most {MAX_REFERENCES} references")]
    ReferenceOverflow,

    /// The value does not fit in the requested bit width.
    #[error("value {value} does not fit in {bits} bits")]
    ValueOutOfRange { value: u64, bits: usize },
}

/// An immutable, content-addressed cell.
///
/// Produced by [`CellBuilder::build`]. The data bits, bit length, and child
/// references are frozen at seal time and the content hash is computed once,
/// so repeated [`Cell::hash`] calls are free.
///
/// Trailing bits of the last data byte (past `bit_len`) are always zero —
/// the builder maintains that invariant, and the hash preimage includes the
/// exact bit length, so two cells with the same padded bytes but different
/// bit lengths hash differently.
#[derive(Clone, PartialEq, Eq)]
pub struct Cell {
    data: Vec<u8>,
    bit_len: usize,
    references: Vec<Arc<Cell>>,
    hash: [u8; 32],
}

impl Cell {
    pub(crate) fn new(data: Vec<u8>, bit_len: usize, references: Vec<Arc<Cell>>) -> Self {
        let hash = Self::compute_hash(&data, bit_len, &references);
        Self {
            data,
            bit_len,
            references,
            hash,
        }
    }

    /// The sealed data bits, zero-padded to a whole number of bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Exact number of data bits in this cell.
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// Child cells, in the order they were appended.
    pub fn references(&self) -> &[Arc<Cell>] {
        &self.references
    }

    /// The 32-byte content hash of this cell.
    ///
    /// Covers reference count, bit length, data bits, and all child hashes,
    /// recursively. This is the value that gets signed.
    pub fn hash(&self) -> [u8; 32] {
        self.hash
    }

    /// Content hash as a lowercase hex string. Handy for logs and tests.
    pub fn hash_hex(&self) -> String {
        hex::encode(self.hash)
    }

    fn compute_hash(data: &[u8], bit_len: usize, references: &[Arc<Cell>]) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update([references.len() as u8]);
        hasher.update((bit_len as u16).to_be_bytes());
        hasher.update(data);
        for child in references {
            hasher.update(child.hash());
        }
        hasher.finalize().into()
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cell")
            .field("bit_len", &self.bit_len)
            .field("data", &hex::encode(&self.data))
            .field("references", &self.references.len())
            .field("hash", &self.hash_hex())
            .finish()
    }
}

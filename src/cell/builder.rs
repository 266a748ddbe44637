//! Append-only cell construction.
//!
//! [`CellBuilder`] packs fixed-width unsigned integers, single bits, byte
//! buffers, other builders, and sealed child references into a cell under
//! construction. All writes are bounds-checked up front — a builder that
//! accepted a write never fails to seal.

use std::sync::Arc;

use super::{Cell, CellError, MAX_DATA_BITS, MAX_REFERENCES};

/// Append-only writer for a [`Cell`].
///
/// Data bits are written MSB-first, exactly as the wallet contracts read
/// them. Capacity is 1023 bits and 4 references; exceeding either is a
/// [`CellError`] at write time, never a panic.
///
/// Every `store_*` method returns `&mut Self` on success so writes can be
/// chained with `?` between them:
///
/// ```
/// use ton_wallet_transfer::cell::CellBuilder;
///
/// let mut b = CellBuilder::new();
/// b.store_uint(32, 42)?.store_bit(true)?;
/// let cell = b.build();
/// assert_eq!(cell.bit_len(), 33);
/// # Ok::<(), ton_wallet_transfer::cell::CellError>(())
/// ```
///
/// Sealing with [`build`](Self::build) takes `&self`: the common pattern is
/// to seal a signing message to hash it, then keep writing the same bits
/// into the final signed container.
#[derive(Debug, Clone, Default)]
pub struct CellBuilder {
    data: Vec<u8>,
    bit_len: usize,
    references: Vec<Arc<Cell>>,
}

impl CellBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of data bits written so far.
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// Number of data bits still available.
    pub fn remaining_bits(&self) -> usize {
        MAX_DATA_BITS - self.bit_len
    }

    /// Number of reference slots still available.
    pub fn remaining_references(&self) -> usize {
        MAX_REFERENCES - self.references.len()
    }

    /// Appends a single bit.
    pub fn store_bit(&mut self, bit: bool) -> Result<&mut Self, CellError> {
        if self.remaining_bits() == 0 {
            return Err(CellError::DataOverflow {
                requested: 1,
                remaining: 0,
            });
        }
        self.push_bit(bit);
        Ok(self)
    }

    /// Appends `value` as a big-endian unsigned integer of exactly `bits`
    /// bits (at most 64).
    ///
    /// Rejects values that do not fit in the requested width — silently
    /// truncating a field that a contract will read back at full width is
    /// how replay windows and wallet ids get corrupted.
    pub fn store_uint(&mut self, bits: usize, value: u64) -> Result<&mut Self, CellError> {
        debug_assert!(bits <= 64, "store_uint supports at most 64 bits");
        if bits < 64 && value >> bits != 0 {
            return Err(CellError::ValueOutOfRange { value, bits });
        }
        if bits > self.remaining_bits() {
            return Err(CellError::DataOverflow {
                requested: bits,
                remaining: self.remaining_bits(),
            });
        }
        for i in (0..bits).rev() {
            self.push_bit((value >> i) & 1 == 1);
        }
        Ok(self)
    }

    /// Appends a raw byte buffer (8 bits per byte, in order).
    pub fn store_bytes(&mut self, bytes: &[u8]) -> Result<&mut Self, CellError> {
        self.store_raw(bytes, bytes.len() * 8)
    }

    /// Appends another builder's data bits and references.
    pub fn store_builder(&mut self, other: &CellBuilder) -> Result<&mut Self, CellError> {
        self.check_reference_capacity(other.references.len())?;
        self.store_raw(&other.data, other.bit_len)?;
        self.references.extend(other.references.iter().cloned());
        Ok(self)
    }

    /// Appends a sealed cell's data bits and references inline.
    ///
    /// This is how pre-encoded opaque values (a v5 wallet id, an encoded
    /// action list) land in a payload: their bits continue the current
    /// cell's data rather than hanging off a reference.
    pub fn store_cell(&mut self, cell: &Cell) -> Result<&mut Self, CellError> {
        self.check_reference_capacity(cell.references().len())?;
        self.store_raw(cell.data(), cell.bit_len())?;
        self.references.extend(cell.references().iter().cloned());
        Ok(self)
    }

    /// Appends a reference to a sealed child cell.
    pub fn store_ref(&mut self, cell: Cell) -> Result<&mut Self, CellError> {
        self.check_reference_capacity(1)?;
        self.references.push(Arc::new(cell));
        Ok(self)
    }

    /// Seals the current contents into an immutable [`Cell`].
    ///
    /// Does not consume the builder — the contents can still be extended
    /// afterwards (sealing a signing message to hash it, then splicing it
    /// into the signed body, relies on this).
    pub fn build(&self) -> Cell {
        Cell::new(self.data.clone(), self.bit_len, self.references.clone())
    }

    fn check_reference_capacity(&self, additional: usize) -> Result<(), CellError> {
        if self.references.len() + additional > MAX_REFERENCES {
            return Err(CellError::ReferenceOverflow);
        }
        Ok(())
    }

    /// Appends the first `bits` bits of `data` (MSB-first per byte).
    ///
    /// `data` must be zero-padded past `bits`; both `Cell` and `CellBuilder`
    /// maintain that invariant for their own storage.
    fn store_raw(&mut self, data: &[u8], bits: usize) -> Result<&mut Self, CellError> {
        if bits > self.remaining_bits() {
            return Err(CellError::DataOverflow {
                requested: bits,
                remaining: self.remaining_bits(),
            });
        }
        if self.bit_len % 8 == 0 {
            // Byte-aligned fast path: the source's trailing padding bits are
            // zero, so whole bytes can be copied directly.
            self.data.extend_from_slice(&data[..(bits + 7) / 8]);
            self.bit_len += bits;
        } else {
            for i in 0..bits {
                self.push_bit(data[i / 8] & (1 << (7 - i % 8)) != 0);
            }
        }
        Ok(self)
    }

    fn push_bit(&mut self, bit: bool) {
        let byte = self.bit_len / 8;
        if byte == self.data.len() {
            self.data.push(0);
        }
        if bit {
            self.data[byte] |= 1 << (7 - self.bit_len % 8);
        }
        self.bit_len += 1;
    }
}

//! Flat byte-addressable memory controller.
//!
//! Backed by sparse 4 KiB pages allocated on first write, so the full
//! 64-bit address space is addressable without reserving host memory for
//! it. All multi-byte accesses are little-endian and may straddle page
//! boundaries; unwritten memory reads as zero.

use std::collections::BTreeMap;

/// Size of one backing page in bytes.
const PAGE_SIZE: u64 = 4096;

/// Sparse, zero-initialized, byte-addressable memory.
#[derive(Debug, Default)]
pub struct MemoryController {
    pages: BTreeMap<u64, Box<[u8; PAGE_SIZE as usize]>>,
}

impl MemoryController {
    /// Creates an empty memory space.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads one byte.
    pub fn read_byte(&self, addr: u64) -> u8 {
        match self.pages.get(&(addr / PAGE_SIZE)) {
            Some(page) => page[(addr % PAGE_SIZE) as usize],
            None => 0,
        }
    }

    /// Writes one byte, allocating the backing page if needed.
    pub fn write_byte(&mut self, addr: u64, val: u8) {
        let page = self
            .pages
            .entry(addr / PAGE_SIZE)
            .or_insert_with(|| Box::new([0; PAGE_SIZE as usize]));
        page[(addr % PAGE_SIZE) as usize] = val;
    }

    /// Reads a 32-bit word (little-endian). The range wraps at the top of
    /// the address space.
    pub fn read_word(&self, addr: u64) -> u32 {
        let mut bytes = [0u8; 4];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = self.read_byte(addr.wrapping_add(i as u64));
        }
        u32::from_le_bytes(bytes)
    }

    /// Writes a 32-bit word (little-endian). The range wraps at the top of
    /// the address space.
    pub fn write_word(&mut self, addr: u64, val: u32) {
        for (i, b) in val.to_le_bytes().iter().enumerate() {
            self.write_byte(addr.wrapping_add(i as u64), *b);
        }
    }

    /// Reads a 64-bit doubleword (little-endian). The range wraps at the top
    /// of the address space.
    pub fn read_double_word(&self, addr: u64) -> u64 {
        let mut bytes = [0u8; 8];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = self.read_byte(addr.wrapping_add(i as u64));
        }
        u64::from_le_bytes(bytes)
    }

    /// Writes a 64-bit doubleword (little-endian). The range wraps at the
    /// top of the address space.
    pub fn write_double_word(&mut self, addr: u64, val: u64) {
        for (i, b) in val.to_le_bytes().iter().enumerate() {
            self.write_byte(addr.wrapping_add(i as u64), *b);
        }
    }

    /// Releases every page, returning memory to the all-zero state.
    pub fn reset(&mut self) {
        self.pages.clear();
    }
}

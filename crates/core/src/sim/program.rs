//! Assembled program image.

use crate::common::constants::INSTRUCTION_SIZE;

/// An assembled program: ordered machine-code words plus their byte extent.
///
/// Produced by an external assembler and loaded into the memory collaborator
/// at the text base address before execution begins. The engines never
/// inspect it beyond reading words and the extent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AssembledProgram {
    /// Machine-code words in execution order.
    pub words: Vec<u32>,
}

impl AssembledProgram {
    /// Wraps a sequence of machine-code words.
    pub fn new(words: Vec<u32>) -> Self {
        Self { words }
    }

    /// Byte extent of the program (`words × 4`).
    pub fn byte_len(&self) -> u64 {
        self.words.len() as u64 * INSTRUCTION_SIZE
    }

    /// Builds a program from a flat little-endian binary image.
    ///
    /// A trailing partial word is zero-padded.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let words = bytes
            .chunks(INSTRUCTION_SIZE as usize)
            .map(|chunk| {
                let mut word = [0u8; 4];
                word[..chunk.len()].copy_from_slice(chunk);
                u32::from_le_bytes(word)
            })
            .collect();
        Self { words }
    }
}

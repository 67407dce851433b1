//! Neighbor-counting strategies behind the [`Stepper`](super::Stepper).
//!
//! Every kernel computes the same thing: for each cell, count the eight
//! toroidal neighbors in `current` and write `Cell::evolve` into `next`.
//! They differ only in where and how the counting runs.

use rayon::prelude::*;

use super::{Cell, GenerationBuffer};
use crate::error::Result;

/// A strategy for advancing one generation.
pub trait Kernel {
    /// Display name for logs and the HUD
    fn name(&self) -> &'static str;

    /// Overwrite every cell of `next` with the successor of `current`.
    /// Both buffers have the same dimensions and `current` is never modified.
    ///
    /// A kernel may keep its own copy of the last generation it produced and
    /// step from that instead of re-reading `current`. Callers that replace
    /// `current` by any other means must call [`Kernel::invalidate`] first.
    fn advance(&mut self, current: &GenerationBuffer, next: &mut GenerationBuffer) -> Result<()>;

    /// `current` was replaced outside of `advance`; drop any cached copy of it.
    fn invalidate(&mut self) {}
}

/// Row-major loop on the calling thread
#[derive(Clone, Copy, Debug, Default)]
pub struct SerialKernel;

impl Kernel for SerialKernel {
    fn name(&self) -> &'static str {
        "CPU"
    }

    fn advance(&mut self, current: &GenerationBuffer, next: &mut GenerationBuffer) -> Result<()> {
        fill_serial(current, next);
        Ok(())
    }
}

/// Rows split across the rayon thread pool.
/// Each row of `next` is owned by exactly one task; `current` is shared read-only.
#[derive(Clone, Copy, Debug, Default)]
pub struct ParallelKernel;

impl Kernel for ParallelKernel {
    fn name(&self) -> &'static str {
        "CPU+Par"
    }

    fn advance(&mut self, current: &GenerationBuffer, next: &mut GenerationBuffer) -> Result<()> {
        let (width, _) = current.dimensions();
        next.as_mut_slice()
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, out) in row.iter_mut().enumerate() {
                    *out = next_bit(current, x, y);
                }
            });
        Ok(())
    }
}

#[inline]
fn next_bit(current: &GenerationBuffer, x: usize, y: usize) -> u32 {
    let state = current.get(x, y).unwrap_or_default();
    state.evolve(current.live_neighbors(x, y)).to_bit()
}

fn fill_serial(current: &GenerationBuffer, next: &mut GenerationBuffer) {
    let (width, _) = current.dimensions();
    for (i, out) in next.as_mut_slice().iter_mut().enumerate() {
        *out = next_bit(current, i % width, i / width);
    }
}

/// Pure single-generation step: returns the successor of `current`.
pub fn step(current: &GenerationBuffer) -> GenerationBuffer {
    let mut next = current.clone();
    fill_serial(current, &mut next);
    next
}

/// Successor state of a single cell
pub fn next_cell(current: &GenerationBuffer, x: usize, y: usize) -> Cell {
    Cell::from_alive(next_bit(current, x, y) == 1)
}

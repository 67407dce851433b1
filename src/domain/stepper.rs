use super::{GenerationBuffer, Kernel};
use crate::error::Result;

/// Owns the double-buffered generation pair and advances it one step at a time.
///
/// `buffers[current]` is read and `buffers[next]` is fully overwritten on each
/// step, then the two indices swap.
pub struct Stepper {
    buffers: [GenerationBuffer; 2],
    current: usize,
    next: usize,
    generation: u64,
    kernel: Box<dyn Kernel>,
}

impl Stepper {
    /// Start a run from `initial`; the second buffer is allocated to match it
    pub fn new(initial: GenerationBuffer, kernel: Box<dyn Kernel>) -> Self {
        let spare = initial.clone();
        Self {
            buffers: [initial, spare],
            current: 0,
            next: 1,
            generation: 0,
            kernel,
        }
    }

    /// Advance exactly one generation and return the new current buffer.
    ///
    /// Only the GPU kernel can fail; CPU kernels always return `Ok`.
    pub fn step(&mut self) -> Result<&GenerationBuffer> {
        let (width, height) = self.buffers[self.current].dimensions();
        assert!(
            self.buffers[self.next].has_dimensions(width, height),
            "generation buffers must share dimensions"
        );

        let [a, b] = &mut self.buffers;
        let (current, next) = if self.current == 0 { (&*a, b) } else { (&*b, a) };
        self.kernel.advance(current, next)?;

        std::mem::swap(&mut self.current, &mut self.next);
        self.generation += 1;
        Ok(&self.buffers[self.current])
    }

    pub fn current(&self) -> &GenerationBuffer {
        &self.buffers[self.current]
    }

    pub const fn current_index(&self) -> usize {
        self.current
    }

    pub const fn next_index(&self) -> usize {
        self.next
    }

    /// Number of steps since construction or the last reseed
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    pub fn dimensions(&self) -> (usize, usize) {
        self.buffers[self.current].dimensions()
    }

    pub fn kernel_name(&self) -> &'static str {
        self.kernel.name()
    }

    /// Replace the current generation in place and restart the generation count.
    ///
    /// # Panics
    /// If `seed` does not have the stepper's dimensions.
    pub fn reseed(&mut self, seed: GenerationBuffer) {
        let (width, height) = self.dimensions();
        assert!(
            seed.has_dimensions(width, height),
            "reseed buffer must be {}x{}",
            width,
            height
        );
        self.buffers[self.current] = seed;
        self.generation = 0;
        self.kernel.invalidate();
    }
}

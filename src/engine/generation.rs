//! Generation step seam
//!
//! The engine is generic over the routine that actually produces audio for one
//! frame - typically a forward pass through a generative model. The trait is
//! async because that call may be long-running; the engine serializes calls
//! per instance, so implementations never see overlapping frame computations
//! for the same buffer.

use crate::error::Result;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Context handed to the generation step for one frame
#[derive(Debug)]
pub struct FrameContext<'a> {
    /// Frame index within the buffer
    pub index: usize,

    /// Number of samples the step must return
    pub frame_size: usize,

    /// Text prompt of the originating generation pass
    pub prompt: &'a str,

    /// Cached samples of the causal predecessor frame, when available.
    /// `Some` on the fast path, `None` when recomputing from scratch.
    pub previous: Option<&'a [f32]>,
}

/// One step of the underlying generation process
///
/// Implementations should be deterministic given the same context: the fast
/// path recomputes frames from cached dependencies and assumes the result is
/// consistent with the original pass. A stochastic implementation is
/// permitted, but recomputed frames may then audibly diverge from un-edited
/// neighbors.
#[async_trait]
pub trait GenerationStep: Send + Sync {
    /// Produce exactly `ctx.frame_size` samples for frame `ctx.index`
    async fn generate_frame(&self, ctx: FrameContext<'_>) -> Result<Vec<f32>>;
}

/// Deterministic placeholder generator
///
/// Seeds a fresh RNG from the frame index, so regenerating any frame yields
/// bit-identical samples regardless of generation order or edit history. Used
/// as the default stand-in until a real model is wired up, and by tests that
/// verify recomputation consistency.
#[derive(Debug, Clone)]
pub struct SeededNoiseGenerator {
    /// Peak amplitude of generated samples
    pub amplitude: f32,
}

impl Default for SeededNoiseGenerator {
    fn default() -> Self {
        Self { amplitude: 0.5 }
    }
}

#[async_trait]
impl GenerationStep for SeededNoiseGenerator {
    async fn generate_frame(&self, ctx: FrameContext<'_>) -> Result<Vec<f32>> {
        let mut rng = StdRng::seed_from_u64(ctx.index as u64);
        let samples = (0..ctx.frame_size)
            .map(|_| rng.gen_range(-self.amplitude..=self.amplitude))
            .collect();
        Ok(samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seeded_generator_is_deterministic() {
        let generator = SeededNoiseGenerator::default();

        let first = generator
            .generate_frame(FrameContext {
                index: 7,
                frame_size: 512,
                prompt: "amapiano groove",
                previous: None,
            })
            .await
            .unwrap();

        // Same index, different context: identical output
        let second = generator
            .generate_frame(FrameContext {
                index: 7,
                frame_size: 512,
                prompt: "amapiano groove",
                previous: Some(&[0.0; 512]),
            })
            .await
            .unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_different_frames_differ() {
        let generator = SeededNoiseGenerator::default();

        let a = generator
            .generate_frame(FrameContext {
                index: 0,
                frame_size: 64,
                prompt: "",
                previous: None,
            })
            .await
            .unwrap();
        let b = generator
            .generate_frame(FrameContext {
                index: 1,
                frame_size: 64,
                prompt: "",
                previous: None,
            })
            .await
            .unwrap();

        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_output_length_and_amplitude() {
        let generator = SeededNoiseGenerator { amplitude: 0.25 };

        let samples = generator
            .generate_frame(FrameContext {
                index: 3,
                frame_size: 128,
                prompt: "",
                previous: None,
            })
            .await
            .unwrap();

        assert_eq!(samples.len(), 128);
        assert!(samples.iter().all(|s| s.abs() <= 0.25));
    }
}

//! Linear portamento between two frequencies.

/*
Glide (Portamento)
==================

When the target pitch changes, the frequency does not jump: it travels in a
straight line from where it is to where it should be over `glide_ms`.

    increment = (target - start) / (glide_ms / 1000 * sample_rate)

The increment is computed once, when the target (or the glide time) changes,
and then added every sample. Once the remaining distance is smaller than one
increment, or the next step would pass the target, the frequency snaps onto
the target. That keeps the ramp monotonic and guarantees it lands exactly.

Example: 220 Hz -> 440 Hz over 100 ms at 48 kHz
  - 4800 samples, increment = 220 / 4800 ≈ 0.0458 Hz per sample
  - after 4800 samples the frequency is exactly 440.0

A glide time that rounds to one sample or less jumps straight to the target.
*/

#[derive(Debug, Clone, Copy)]
pub struct GlideRamp {
    current: f32,
    target: f32,
    increment: f32,
    // Glide length the current increment was derived from.
    glide_samples: f32,
}

impl GlideRamp {
    pub fn new(initial_frequency: f32) -> Self {
        Self {
            current: initial_frequency,
            target: initial_frequency,
            increment: 0.0,
            glide_samples: 0.0,
        }
    }

    /// Advance one sample toward `target` and return the new frequency.
    #[inline]
    pub fn step(&mut self, target: f32, glide_ms: f32, sample_rate: f32) -> f32 {
        let glide_samples = glide_ms / 1000.0 * sample_rate;

        if target != self.target || glide_samples != self.glide_samples {
            self.retarget(target, glide_samples);
        }

        if self.current == self.target {
            return self.current;
        }

        let next = self.current + self.increment;
        let remaining = self.target - next;
        let overshot = remaining != 0.0 && remaining.signum() != self.increment.signum();

        if overshot || remaining.abs() < self.increment.abs() {
            self.current = self.target;
        } else {
            self.current = next;
        }

        self.current
    }

    fn retarget(&mut self, target: f32, glide_samples: f32) {
        self.target = target;
        self.glide_samples = glide_samples;

        if !glide_samples.is_finite() || glide_samples <= 1.0 {
            self.current = target;
            self.increment = 0.0;
        } else {
            self.increment = (target - self.current) / glide_samples;
            if self.increment == 0.0 {
                self.current = target;
            }
        }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn is_gliding(&self) -> bool {
        self.current != self.target
    }

    /// Jump to `frequency` with no ramp.
    pub fn jump_to(&mut self, frequency: f32) {
        self.current = frequency;
        self.target = frequency;
        self.increment = 0.0;
    }
}

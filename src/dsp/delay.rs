/*
Fractional Delay Line
=====================

A circular buffer that remembers the last few seconds of a signal and can
read it back at any delay, including delays that fall between two samples.

Vocabulary
----------

  write_pos   Slot the next incoming sample will be written to. Advances by
              one per sample and wraps at the end of the buffer.

  delay       How far back to read, in samples (may be fractional).
              Delay 0 returns the sample that was just written.

  frac        Fractional part of the delay. The read blends the two slots
              around the exact position:

                  y = newer · (1 − frac) + older · frac

Buffer layout (write_pos = 5, delay = 2.25):

    slot:   0    1    2    3    4    5    6 ...
                      ^    ^    ^    ^
                    older newer  |  write_pos
                                 newest sample

Writing happens before reading, so a delay of D samples yields
y[n] = x[n − D] and a delay of 0 is a passthrough.

The buffer holds `max_delay + 2` slots: one for the sample at delay 0 and
one extra so the `older` neighbour of the longest delay is still valid.
Delays are clamped to [0, max_delay_ms] before every read.
*/

pub struct FractionalDelayLine {
    buffer: Vec<f32>,
    write_pos: usize,
    sample_rate: f32,
    max_delay_ms: f32,
    delay_ms: f32,
}

impl FractionalDelayLine {
    /// Allocate a line able to delay up to `max_delay_ms` at `sample_rate`.
    pub fn new(sample_rate: f32, max_delay_ms: f32) -> Self {
        let max_delay_ms = max_delay_ms.max(0.0);
        let max_samples = (max_delay_ms * sample_rate / 1000.0).ceil().max(0.0) as usize;

        Self {
            buffer: vec![0.0; max_samples + 2],
            write_pos: 0,
            sample_rate,
            max_delay_ms,
            delay_ms: 0.0,
        }
    }

    /// Set the read delay; clamped to `[0, max_delay_ms]`, NaN reads as 0.
    pub fn set_delay_ms(&mut self, delay_ms: f32) {
        self.delay_ms = if delay_ms.is_nan() {
            0.0
        } else {
            delay_ms.clamp(0.0, self.max_delay_ms)
        };
    }

    pub fn delay_ms(&self) -> f32 {
        self.delay_ms
    }

    pub fn max_delay_ms(&self) -> f32 {
        self.max_delay_ms
    }

    pub fn delay_samples(&self) -> f32 {
        self.delay_ms * self.sample_rate / 1000.0
    }

    /// Append one sample at the write cursor.
    #[inline]
    pub fn write(&mut self, sample: f32) {
        self.buffer[self.write_pos] = sample;
        self.write_pos = (self.write_pos + 1) % self.buffer.len();
    }

    /// Read `delay_samples` behind the most recent write, interpolating
    /// linearly between the two neighbouring slots.
    #[inline]
    pub fn read_interpolated(&self, delay_samples: f32) -> f32 {
        let len = self.buffer.len();
        let max = (len - 2) as f32;
        let delay = if delay_samples.is_nan() {
            0.0
        } else {
            delay_samples.clamp(0.0, max)
        };

        let whole = delay.floor();
        let frac = delay - whole;
        let whole = whole as usize;

        let newer = (self.write_pos + len - 1 - whole) % len;
        let older = (newer + len - 1) % len;

        self.buffer[newer] * (1.0 - frac) + self.buffer[older] * frac
    }

    /// Write `input`, then read back at the configured delay.
    #[inline]
    pub fn next_sample(&mut self, input: f32) -> f32 {
        self.write(input);
        self.read_interpolated(self.delay_samples())
    }

    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(*sample);
        }
    }

    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 1_000.0;

    #[test]
    fn zero_delay_is_passthrough() {
        let mut line = FractionalDelayLine::new(SAMPLE_RATE, 100.0);
        for i in 0..50 {
            let x = i as f32 * 0.1;
            assert_eq!(line.next_sample(x), x);
        }
    }

    #[test]
    fn integer_delay_shifts_signal() {
        let mut line = FractionalDelayLine::new(SAMPLE_RATE, 100.0);
        line.set_delay_ms(5.0); // 5 samples at 1 kHz

        let mut out = Vec::new();
        for i in 0..20 {
            out.push(line.next_sample(if i == 0 { 1.0 } else { 0.0 }));
        }

        assert_eq!(out[5], 1.0);
        assert!(out.iter().enumerate().all(|(i, &s)| i == 5 || s == 0.0));
    }

    #[test]
    fn fractional_delay_interpolates() {
        let mut line = FractionalDelayLine::new(SAMPLE_RATE, 100.0);
        line.set_delay_ms(2.5);

        let mut out = Vec::new();
        for i in 0..10 {
            out.push(line.next_sample(if i == 0 { 1.0 } else { 0.0 }));
        }

        assert!((out[2] - 0.5).abs() < 1e-6);
        assert!((out[3] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn delay_is_clamped_to_maximum() {
        let mut line = FractionalDelayLine::new(48_000.0, 5_000.0);
        line.set_delay_ms(6_000.0);
        assert_eq!(line.delay_ms(), 5_000.0);

        line.set_delay_ms(-20.0);
        assert_eq!(line.delay_ms(), 0.0);

        line.set_delay_ms(f32::NAN);
        assert_eq!(line.delay_ms(), 0.0);
    }

    #[test]
    fn longest_delay_reads_without_wrapping_into_new_data() {
        let mut line = FractionalDelayLine::new(SAMPLE_RATE, 10.0);
        line.set_delay_ms(10.0);

        let mut out = Vec::new();
        for i in 0..30 {
            out.push(line.next_sample(if i == 0 { 1.0 } else { 0.0 }));
        }

        assert_eq!(out[10], 1.0);
        assert_eq!(out.iter().filter(|&&s| s != 0.0).count(), 1);
    }

    #[test]
    fn out_of_range_reads_are_clamped() {
        let mut line = FractionalDelayLine::new(SAMPLE_RATE, 10.0);
        line.write(0.25);
        assert!(line.read_interpolated(1e9).is_finite());
        assert_eq!(line.read_interpolated(-3.0), 0.25);
    }
}

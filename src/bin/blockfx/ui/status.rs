//! Status bar widget - stage switches, sequencer position and level meters

use blockfx::patch::EnginePatch;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::StatusUpdate;

pub struct AudioStats {
    pub peak: f32,
    pub rms: f32,
}

impl AudioStats {
    pub fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
        Self { peak, rms }
    }
}

fn stage_span(label: &str, on: bool) -> Span<'static> {
    Span::styled(
        format!("{} {}  ", if on { "●" } else { "○" }, label),
        Style::default().fg(if on { Color::Green } else { Color::DarkGray }),
    )
}

pub fn render_status(
    frame: &mut Frame,
    area: Rect,
    patch: &EnginePatch,
    status: &StatusUpdate,
    sample_rate: f32,
    stats: &AudioStats,
) {
    let block = Block::default().title(" blockfx ").borders(Borders::ALL);
    let arp = &patch.arpeggiator;
    let grains = &patch.granulator;
    let delay = &patch.tap_delay;

    let stages = Line::from(vec![
        stage_span("arp", status.arpeggiator_on),
        stage_span("grain", status.granulator_on),
        stage_span("delay", status.tap_delay_on),
        Span::styled(
            format!("{:.1}kHz  {:.1}s  ", sample_rate / 1000.0, status.time),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}", stats.peak, stats.rms),
            Style::default().fg(Color::Magenta),
        ),
    ]);

    let root = arp.root_notes.get(status.chord_index);
    let sequencer = Line::from(vec![
        Span::styled(
            format!(" {} {:?}  ", root, arp.scale),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!(
                "{}{}{}  ",
                arp.shape.style.name(),
                if arp.shape.mirror { "+mirror" } else { "" },
                if arp.shape.low_octave { "+low" } else { "" }
            ),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("step {}/{}  ", status.pattern_index + 1, status.pattern_len.max(1)),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("{:.2} steps/s  {:>7.2} Hz", arp.rate_hz, status.frequency_hz),
            Style::default().fg(Color::Yellow),
        ),
    ]);

    let effects = Line::from(vec![
        Span::styled(
            format!(
                " grain {:.0}ms  pitch {:+.0}st  jitter {:.0}%  ",
                grains.grain_size_ms, grains.pitch_shift_semitones, grains.randomness_pct
            ),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!(
                "taps {}  fb {:.2}  lfo {}",
                delay.tap_count,
                delay.feedback,
                if delay.is_modulating() { "on" } else { "off" }
            ),
            Style::default().fg(Color::White),
        ),
    ]);

    let paragraph = Paragraph::new(vec![stages, sequencer, effects]).block(block);
    frame.render_widget(paragraph, area);
}

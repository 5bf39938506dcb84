//! TUI module for blockfx
//!
//! Scope and spectrum of the chain output, plus keyboard control of every
//! stage. Parameter changes travel to the audio thread as `ControlMessage`s.

mod spectrum;
pub mod state;
mod status;
mod waveform;

use std::time::Duration;

use blockfx::{control::ControlMessage, graph::Stage, patch::EnginePatch};
use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use log::warn;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::{Consumer, Producer};

pub use state::StatusUpdate;

use spectrum::{render_spectrum, SpectrumAnalyzer};
use status::{render_status, AudioStats};
use waveform::render_waveform;

/// Scope window length (also the FFT size)
const VIS_BUFFER_SIZE: usize = 1024;

const RATE_STEP: f32 = 1.25;

pub struct UiApp {
    patch: EnginePatch,
    sample_rate: f32,
    scope_rx: Consumer<f32>,
    status_rx: Consumer<StatusUpdate>,
    control_tx: Producer<ControlMessage>,
    status: StatusUpdate,
    scope: Vec<f32>,
    spectrum: SpectrumAnalyzer,
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        patch: EnginePatch,
        sample_rate: f32,
        scope_rx: Consumer<f32>,
        status_rx: Consumer<StatusUpdate>,
        control_tx: Producer<ControlMessage>,
    ) -> Self {
        Self {
            patch,
            sample_rate,
            scope_rx,
            status_rx,
            control_tx,
            status: StatusUpdate::default(),
            scope: vec![0.0; VIS_BUFFER_SIZE],
            spectrum: SpectrumAnalyzer::new(VIS_BUFFER_SIZE, sample_rate),
            should_quit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_scope();
            self.poll_status();

            terminal.draw(|frame| self.render(frame))?;

            // ~60fps
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    /// Keep the last VIS_BUFFER_SIZE samples.
    fn poll_scope(&mut self) {
        let mut received = false;
        while let Ok(sample) = self.scope_rx.pop() {
            self.scope.push(sample);
            received = true;
        }

        if received {
            if self.scope.len() > VIS_BUFFER_SIZE {
                let excess = self.scope.len() - VIS_BUFFER_SIZE;
                self.scope.drain(0..excess);
            }
            self.spectrum.update(&self.scope);
        }
    }

    fn poll_status(&mut self) {
        while let Ok(status) = self.status_rx.pop() {
            self.status = status;
        }
    }

    fn send(&mut self, message: ControlMessage) {
        if self.control_tx.push(message).is_err() {
            warn!("control queue full, dropped {:?}", message);
        }
    }

    fn toggle(&mut self, stage: Stage) {
        let bypassed = !self.patch.bypass.get(stage);
        self.patch.bypass.set(stage, bypassed);
        self.send(ControlMessage::Bypass { stage, bypassed });
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('1') => return self.toggle(Stage::Arpeggiator),
            KeyCode::Char('2') => return self.toggle(Stage::Granulator),
            KeyCode::Char('3') => return self.toggle(Stage::TapDelay),
            KeyCode::Char('r') => return self.send(ControlMessage::Reset),
            _ => {}
        }

        let arp = &mut self.patch.arpeggiator;
        let grains = &mut self.patch.granulator;
        let delay = &mut self.patch.tap_delay;

        let message = match key {
            KeyCode::Char('s') => {
                arp.shape.style = arp.shape.style.next();
                ControlMessage::Arpeggiator(*arp)
            }
            KeyCode::Char('m') => {
                arp.scale = arp.scale.toggled();
                ControlMessage::Arpeggiator(*arp)
            }
            KeyCode::Char('i') => {
                arp.shape.mirror = !arp.shape.mirror;
                ControlMessage::Arpeggiator(*arp)
            }
            KeyCode::Char('o') => {
                arp.shape.low_octave = !arp.shape.low_octave;
                ControlMessage::Arpeggiator(*arp)
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                arp.rate_hz = (arp.rate_hz * RATE_STEP).min(64.0);
                ControlMessage::Arpeggiator(*arp)
            }
            KeyCode::Char('-') => {
                arp.rate_hz /= RATE_STEP;
                *arp = arp.sanitized();
                ControlMessage::Arpeggiator(*arp)
            }

            KeyCode::Char('p') => {
                grains.pitch_shift_semitones += 1.0;
                *grains = grains.sanitized();
                ControlMessage::Granulator(*grains)
            }
            KeyCode::Char('P') => {
                grains.pitch_shift_semitones -= 1.0;
                *grains = grains.sanitized();
                ControlMessage::Granulator(*grains)
            }
            KeyCode::Char('j') => {
                grains.features.random_pitch = !grains.features.random_pitch;
                ControlMessage::Granulator(*grains)
            }
            KeyCode::Char('b') => {
                grains.features.stereo_bias = !grains.features.stereo_bias;
                ControlMessage::Granulator(*grains)
            }

            KeyCode::Char('t') => {
                delay.tap_count += 1;
                *delay = delay.sanitized();
                ControlMessage::TapDelay(*delay)
            }
            KeyCode::Char('T') => {
                delay.tap_count = delay.tap_count.saturating_sub(1);
                *delay = delay.sanitized();
                ControlMessage::TapDelay(*delay)
            }
            KeyCode::Char('l') => {
                delay.modulated = !delay.modulated;
                ControlMessage::TapDelay(*delay)
            }
            _ => return,
        };

        self.send(message);
    }

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // Status
                Constraint::Min(6),    // Scope
                Constraint::Length(10), // Spectrum
                Constraint::Length(1), // Help
            ])
            .split(frame.area());

        let stats = AudioStats::from_buffer(&self.scope);
        render_status(frame, chunks[0], &self.patch, &self.status, self.sample_rate, &stats);
        render_waveform(frame, chunks[1], &self.scope);
        render_spectrum(frame, chunks[2], self.spectrum.data());

        let help = Paragraph::new(
            " [Q] Quit [1/2/3] Stages [S] Style [M] Scale [I] Mirror [O] Low oct [+/-] Rate \
             [p/P] Pitch [J] Rnd pitch [B] Bias [t/T] Taps [L] LFO [R] Reset",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }
}

//! Sound cues using the Web Audio API
//!
//! Every cue is a short sequence of enveloped oscillator notes; no audio files.
//! Playback is fire-and-forget: any Web Audio failure just drops the note.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::sim::SoundCue;

/// One enveloped oscillator note
#[derive(Debug, Clone, Copy)]
struct Note {
    freq: f32,
    /// Frequency at the end of the note (glide), if any
    glide_to: Option<f32>,
    wave: OscillatorType,
    /// Start offset from "now" (seconds)
    delay: f64,
    /// Peak gain relative to the cue volume
    gain: f32,
    /// Time to decay to silence (seconds)
    decay: f64,
}

const fn note(freq: f32, wave: OscillatorType, delay: f64, gain: f32, decay: f64) -> Note {
    Note {
        freq,
        glide_to: None,
        wave,
        delay,
        gain,
        decay,
    }
}

/// Descending "you touched it" tones
const HIT: [Note; 4] = [
    note(400.0, OscillatorType::Sine, 0.0, 0.3, 0.3),
    note(350.0, OscillatorType::Sine, 0.2, 0.3, 0.3),
    note(300.0, OscillatorType::Sine, 0.4, 0.3, 0.3),
    note(200.0, OscillatorType::Sine, 0.6, 0.3, 0.3),
];

/// Low rumble with a sharp crack on top
const BLAST: [Note; 2] = [
    Note {
        freq: 100.0,
        glide_to: Some(30.0),
        wave: OscillatorType::Sawtooth,
        delay: 0.0,
        gain: 0.5,
        decay: 0.4,
    },
    note(1500.0, OscillatorType::Square, 0.0, 0.2, 0.1),
];

/// Rising chime
const POWER_UP: [Note; 3] = [
    note(600.0, OscillatorType::Sine, 0.0, 0.25, 0.15),
    note(800.0, OscillatorType::Sine, 0.08, 0.25, 0.15),
    note(1000.0, OscillatorType::Sine, 0.16, 0.25, 0.15),
];

/// Fanfare arpeggio
const HIGH_SCORE: [Note; 5] = [
    note(500.0, OscillatorType::Triangle, 0.0, 0.25, 0.25),
    note(600.0, OscillatorType::Triangle, 0.08, 0.25, 0.25),
    note(700.0, OscillatorType::Triangle, 0.16, 0.25, 0.25),
    note(800.0, OscillatorType::Triangle, 0.24, 0.25, 0.25),
    note(1000.0, OscillatorType::Triangle, 0.32, 0.25, 0.4),
];

fn notes_for(cue: SoundCue) -> &'static [Note] {
    match cue {
        SoundCue::Hit => &HIT,
        SoundCue::Blast => &BLAST,
        SoundCue::PowerUp => &POWER_UP,
        SoundCue::HighScore => &HIGH_SCORE,
    }
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
}

impl AudioManager {
    /// `volume` is the effective cue volume (0.0 - 1.0)
    pub fn new(volume: f32) -> Self {
        // Creation fails outside secure contexts
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: volume.clamp(0.0, 1.0),
        }
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Play a sound cue
    pub fn play(&self, cue: SoundCue) {
        if self.volume <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        for note in notes_for(cue) {
            let _ = self.play_note(ctx, note);
        }
    }

    fn play_note(&self, ctx: &AudioContext, note: &Note) -> Option<()> {
        let (osc, gain) = create_osc(ctx, note.freq, note.wave)?;
        let t = ctx.current_time() + note.delay;

        gain.gain().set_value_at_time(self.volume * note.gain, t).ok()?;
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + note.decay)
            .ok()?;
        if let Some(target) = note.glide_to {
            osc.frequency().set_value_at_time(note.freq, t).ok()?;
            osc.frequency()
                .exponential_ramp_to_value_at_time(target, t + note.decay)
                .ok()?;
        }

        osc.start_with_when(t).ok()?;
        osc.stop_with_when(t + note.decay + 0.05).ok()
    }
}

/// Create an oscillator routed through a gain node to the speakers
fn create_osc(
    ctx: &AudioContext,
    freq: f32,
    osc_type: OscillatorType,
) -> Option<(OscillatorNode, GainNode)> {
    let osc = ctx.create_oscillator().ok()?;
    let gain = ctx.create_gain().ok()?;

    osc.set_type(osc_type);
    osc.frequency().set_value(freq);
    osc.connect_with_audio_node(&gain).ok()?;
    gain.connect_with_audio_node(&ctx.destination()).ok()?;

    Some((osc, gain))
}

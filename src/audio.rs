//! Sound effects
//!
//! The session only names the effect; sinks decide how (or whether) to render it.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Answer matched a drop
    Correct,
    /// Answer matched nothing
    Wrong,
    /// A drop reached the answer panel
    LifeLost,
    /// Out of lives
    GameOver,
    /// Menu button acknowledgment
    Click,
}

impl SoundEffect {
    /// Effect announcing a session event
    pub fn for_event(event: &GameEvent) -> Self {
        match event {
            GameEvent::Hit { .. } => SoundEffect::Correct,
            GameEvent::Miss => SoundEffect::Wrong,
            GameEvent::LifeLost { .. } => SoundEffect::LifeLost,
            GameEvent::GameOver { .. } => SoundEffect::GameOver,
            GameEvent::MenuAck => SoundEffect::Click,
        }
    }

    /// Voices that make up this effect
    pub fn tones(&self) -> Vec<Tone> {
        match self {
            SoundEffect::Correct => vec![Tone::glide(800.0, 1200.0, 0.1, 0.3, 0.2)],
            SoundEffect::Wrong => vec![Tone::glide(400.0, 200.0, 0.15, 0.2, 0.15)],
            SoundEffect::LifeLost => vec![Tone::glide(600.0, 100.0, 0.3, 0.25, 0.3)],
            SoundEffect::GameOver => [400.0, 350.0, 300.0]
                .into_iter()
                .enumerate()
                .map(|(i, freq)| Tone {
                    offset: i as f64 * 0.15,
                    ..Tone::steady(freq, 0.2, 0.2)
                })
                .collect(),
            SoundEffect::Click => vec![Tone::steady(600.0, 0.15, 0.05)],
        }
    }
}

/// One sine voice: pitch glide plus a decaying volume envelope
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Seconds after the effect starts
    pub offset: f64,
    pub from_hz: f32,
    pub to_hz: f32,
    /// Seconds taken to reach `to_hz`
    pub glide: f64,
    pub peak: f32,
    pub duration: f64,
}

impl Tone {
    fn glide(from_hz: f32, to_hz: f32, glide: f64, peak: f32, duration: f64) -> Self {
        Self {
            offset: 0.0,
            from_hz,
            to_hz,
            glide,
            peak,
            duration,
        }
    }

    fn steady(hz: f32, peak: f32, duration: f64) -> Self {
        Self::glide(hz, hz, 0.0, peak, duration)
    }
}

/// Anything that can play a sound effect
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Native sink: no audio device, just a debug log line
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect) {
        log::debug!("♪ {:?}", effect);
    }
}

impl<A: AudioSink + ?Sized> AudioSink for Box<A> {
    fn play(&mut self, effect: SoundEffect) {
        (**self).play(effect);
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web {
    //! Procedurally generated tones via the Web Audio API

    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioSink, SoundEffect, Tone};

    /// Web Audio sink
    pub struct WebAudio {
        ctx: Option<AudioContext>,
    }

    impl Default for WebAudio {
        fn default() -> Self {
            Self::new()
        }
    }

    impl WebAudio {
        pub fn new() -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self { ctx }
        }

        /// Oscillator wired through a gain node to the speakers
        fn create_osc(ctx: &AudioContext, freq: f32) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(OscillatorType::Sine);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        fn voice(ctx: &AudioContext, t: f64, tone: &Tone) {
            let Some((osc, gain)) = Self::create_osc(ctx, tone.from_hz) else {
                return;
            };
            let start = t + tone.offset;
            osc.frequency().set_value_at_time(tone.from_hz, start).ok();
            if tone.to_hz != tone.from_hz {
                osc.frequency()
                    .exponential_ramp_to_value_at_time(tone.to_hz, start + tone.glide)
                    .ok();
            }
            gain.gain().set_value_at_time(tone.peak, start).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, start + tone.duration)
                .ok();
            osc.start_with_when(start).ok();
            osc.stop_with_when(start + tone.duration).ok();
        }
    }

    impl AudioSink for WebAudio {
        fn play(&mut self, effect: SoundEffect) {
            let Some(ctx) = &self.ctx else { return };

            // Browsers suspend the context until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
            let t = ctx.current_time();
            for tone in effect.tones() {
                Self::voice(ctx, t, &tone);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_event_has_a_sound() {
        let cases = [
            (GameEvent::Hit { drop_id: 1, answer: 12 }, SoundEffect::Correct),
            (GameEvent::Miss, SoundEffect::Wrong),
            (GameEvent::LifeLost { count: 2 }, SoundEffect::LifeLost),
            (GameEvent::GameOver { score: 0, new_best: false }, SoundEffect::GameOver),
            (GameEvent::MenuAck, SoundEffect::Click),
        ];
        for (event, effect) in cases {
            assert_eq!(SoundEffect::for_event(&event), effect);
        }
    }

    #[test]
    fn test_falling_tones_glide_for_their_whole_length() {
        for effect in [SoundEffect::Wrong, SoundEffect::LifeLost] {
            let tones = effect.tones();
            assert_eq!(tones.len(), 1);
            assert!(tones[0].to_hz < tones[0].from_hz);
            assert_eq!(tones[0].glide, tones[0].duration, "{effect:?}");
        }
        let correct = SoundEffect::Correct.tones()[0];
        assert_eq!((correct.from_hz, correct.to_hz), (800.0, 1200.0));
        assert_eq!(correct.glide, 0.1);
        assert_eq!(correct.duration, 0.2);
    }

    #[test]
    fn test_game_over_descends_in_steps() {
        let tones = SoundEffect::GameOver.tones();
        let freqs: Vec<f32> = tones.iter().map(|t| t.from_hz).collect();
        assert_eq!(freqs, vec![400.0, 350.0, 300.0]);
        assert!(tones.iter().all(|t| t.from_hz == t.to_hz));
        assert!(tones.windows(2).all(|w| w[1].offset > w[0].offset));
    }
}

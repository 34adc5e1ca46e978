// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! cpal-backed tone sampler.
//!
//! Renders one PCM buffer per sound identifier (a sine at the pitch
//! frequency, decaying over the note's length at the session tempo)
//! on a background loader thread, and mixes active voices into the
//! output stream. Play requests arriving before a buffer is ready are
//! held as pending and replayed once the load completes.

use std::collections::{HashMap, HashSet};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, Stream};
use tracing::{debug, warn};

use super::{AudioError, AudioPlayer};
use crate::music::parse_sound_id;

/// Peak amplitude of a rendered tone
const AMPLITUDE: f32 = 0.2;

/// Per-sound load state
enum LoadState {
    Loading,
    Loaded(Arc<Vec<f32>>),
    Failed,
}

/// A render job for the loader thread
struct LoadRequest {
    sound_id: String,
    frequency: f32,
    seconds: f32,
}

/// Result of a render job
struct LoadResult {
    sound_id: String,
    buffer: Result<Vec<f32>, String>,
}

/// One currently-sounding buffer
struct Voice {
    sound_id: String,
    samples: Arc<Vec<f32>>,
    cursor: usize,
}

/// Mixer state shared with the output callback
#[derive(Default)]
struct Mixer {
    voices: Vec<Voice>,
}

impl Mixer {
    /// Sum active voices into an interleaved output buffer
    fn render(&mut self, output: &mut [f32], channels: usize) {
        for frame in output.chunks_mut(channels.max(1)) {
            let mut sample = 0.0f32;
            for voice in &mut self.voices {
                if let Some(s) = voice.samples.get(voice.cursor) {
                    sample += s;
                }
                voice.cursor += 1;
            }
            for out in frame.iter_mut() {
                *out = sample;
            }
        }
        self.voices.retain(|v| v.cursor < v.samples.len());
    }
}

/// cpal tone sampler implementing the audio capability
pub struct ToneSampler {
    buffers: HashMap<String, LoadState>,
    pending: HashSet<String>,
    mixer: Arc<Mutex<Mixer>>,
    _stream: Stream,
    sample_rate: u32,
    bpm: f64,
    request_tx: Sender<LoadRequest>,
    result_rx: Receiver<LoadResult>,
}

impl ToneSampler {
    /// Open the default output device and spawn the loader thread
    pub fn new(bpm: f64) -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(AudioError::NoDevice)?;
        let config = device
            .default_output_config()
            .map_err(|e| AudioError::StreamFailed(format!("Failed to get default config: {}", e)))?;

        if config.sample_format() != SampleFormat::F32 {
            return Err(AudioError::UnsupportedFormat);
        }

        let sample_rate = config.sample_rate().0;
        let channels = config.channels() as usize;
        let mixer = Arc::new(Mutex::new(Mixer::default()));

        let callback_mixer = Arc::clone(&mixer);
        let stream = device
            .build_output_stream(
                &config.into(),
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    if let Ok(mut mixer) = callback_mixer.lock() {
                        mixer.render(data, channels);
                    } else {
                        for sample in data.iter_mut() {
                            *sample = 0.0;
                        }
                    }
                },
                |err| {
                    warn!("Audio stream error: {}", err);
                },
                None,
            )
            .map_err(|e| AudioError::StreamFailed(format!("Failed to build stream: {}", e)))?;

        stream
            .play()
            .map_err(|e| AudioError::StreamFailed(format!("Failed to start stream: {}", e)))?;

        let (request_tx, request_rx) = channel::<LoadRequest>();
        let (result_tx, result_rx) = channel::<LoadResult>();
        spawn_loader(request_rx, result_tx, sample_rate);

        Ok(Self {
            buffers: HashMap::new(),
            pending: HashSet::new(),
            mixer,
            _stream: stream,
            sample_rate,
            bpm,
            request_tx,
            result_rx,
        })
    }

    /// Output sample rate
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of sounds with a finished buffer
    pub fn loaded_count(&self) -> usize {
        self.buffers
            .values()
            .filter(|s| matches!(s, LoadState::Loaded(_)))
            .count()
    }

    fn start_voice(&mut self, sound_id: &str, samples: Arc<Vec<f32>>) {
        if let Ok(mut mixer) = self.mixer.lock() {
            mixer.voices.push(Voice {
                sound_id: sound_id.to_string(),
                samples,
                cursor: 0,
            });
        }
    }

    /// Drain finished loads, replaying any pending play requests
    fn drain_results(&mut self) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result.buffer {
                Ok(buffer) => {
                    let samples = Arc::new(buffer);
                    self.buffers
                        .insert(result.sound_id.clone(), LoadState::Loaded(Arc::clone(&samples)));
                    if self.pending.remove(&result.sound_id) {
                        debug!("Replaying pending sound {}", result.sound_id);
                        self.start_voice(&result.sound_id, samples);
                    }
                }
                Err(msg) => {
                    warn!("Failed to load sound {}: {}", result.sound_id, msg);
                    self.pending.remove(&result.sound_id);
                    self.buffers.insert(result.sound_id, LoadState::Failed);
                }
            }
        }
    }
}

impl AudioPlayer for ToneSampler {
    fn load(&mut self, sound_id: &str) {
        if self.buffers.contains_key(sound_id) {
            return;
        }
        let Some((pitch, duration)) = parse_sound_id(sound_id) else {
            warn!("Unrecognized sound id {:?}", sound_id);
            self.buffers.insert(sound_id.to_string(), LoadState::Failed);
            return;
        };

        let seconds = (60.0 * duration.beats() / self.bpm) as f32;
        self.buffers.insert(sound_id.to_string(), LoadState::Loading);
        let request = LoadRequest {
            sound_id: sound_id.to_string(),
            frequency: pitch.frequency(),
            seconds,
        };
        if self.request_tx.send(request).is_err() {
            warn!("Sound loader is gone; {} will never play", sound_id);
            self.buffers.insert(sound_id.to_string(), LoadState::Failed);
        }
    }

    fn play(&mut self, sound_id: &str) {
        self.drain_results();

        match self.buffers.get(sound_id) {
            Some(LoadState::Loaded(samples)) => {
                let samples = Arc::clone(samples);
                self.start_voice(sound_id, samples);
            }
            Some(LoadState::Loading) => {
                self.pending.insert(sound_id.to_string());
            }
            Some(LoadState::Failed) => {
                debug!("Not playing failed sound {}", sound_id);
            }
            None => {
                // Never loaded; request it and replay on completion
                self.load(sound_id);
                if matches!(self.buffers.get(sound_id), Some(LoadState::Loading)) {
                    self.pending.insert(sound_id.to_string());
                }
            }
        }
    }

    fn stop(&mut self, sound_id: &str) {
        self.pending.remove(sound_id);
        if let Ok(mut mixer) = self.mixer.lock() {
            mixer.voices.retain(|v| v.sound_id != sound_id);
        }
    }

    fn tick(&mut self) {
        self.drain_results();
    }

    fn set_tempo(&mut self, bpm: f64) {
        if bpm != self.bpm {
            self.bpm = bpm;
            // Cached buffers were rendered at the old tempo
            self.buffers.clear();
            self.pending.clear();
        }
    }
}

/// Loader thread: renders tone buffers off the session thread
fn spawn_loader(requests: Receiver<LoadRequest>, results: Sender<LoadResult>, sample_rate: u32) {
    thread::spawn(move || {
        for request in requests {
            let buffer = render_tone(request.frequency, request.seconds, sample_rate);
            let result = LoadResult {
                sound_id: request.sound_id,
                buffer,
            };
            if results.send(result).is_err() {
                break;
            }
        }
    });
}

/// Render a decaying sine tone
fn render_tone(frequency: f32, seconds: f32, sample_rate: u32) -> Result<Vec<f32>, String> {
    if !(frequency.is_finite() && frequency > 0.0) {
        return Err(format!("bad frequency {}", frequency));
    }
    if !(seconds.is_finite() && seconds > 0.0) {
        return Err(format!("bad length {}s", seconds));
    }

    let total = (seconds * sample_rate as f32) as usize;
    let mut samples = Vec::with_capacity(total);
    for i in 0..total {
        let t = i as f32 / sample_rate as f32;
        let envelope = 1.0 - i as f32 / total as f32;
        let value = (t * frequency * 2.0 * std::f32::consts::PI).sin();
        samples.push(value * envelope * envelope * AMPLITUDE);
    }
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_tone_length() {
        let samples = render_tone(440.0, 0.5, 44100).unwrap();
        assert_eq!(samples.len(), 22050);
    }

    #[test]
    fn test_render_tone_decays_to_silence() {
        let samples = render_tone(440.0, 0.1, 44100).unwrap();
        assert!(samples.iter().all(|s| s.abs() <= AMPLITUDE));
        let tail = &samples[samples.len() - 100..];
        assert!(tail.iter().all(|s| s.abs() < 0.01));
    }

    #[test]
    fn test_render_tone_rejects_bad_input() {
        assert!(render_tone(0.0, 0.5, 44100).is_err());
        assert!(render_tone(440.0, 0.0, 44100).is_err());
        assert!(render_tone(f32::NAN, 0.5, 44100).is_err());
    }

    #[test]
    fn test_mixer_sums_and_retires_voices() {
        let mut mixer = Mixer::default();
        mixer.voices.push(Voice {
            sound_id: "a".to_string(),
            samples: Arc::new(vec![0.1; 4]),
            cursor: 0,
        });
        mixer.voices.push(Voice {
            sound_id: "b".to_string(),
            samples: Arc::new(vec![0.2; 2]),
            cursor: 0,
        });

        let mut output = vec![0.0f32; 8]; // stereo, 4 frames
        mixer.render(&mut output, 2);

        // First two frames carry both voices on both channels
        assert!((output[0] - 0.3).abs() < 1e-6);
        assert!((output[1] - 0.3).abs() < 1e-6);
        // Later frames only the longer voice
        assert!((output[4] - 0.1).abs() < 1e-6);

        // The short voice is retired
        assert_eq!(mixer.voices.len(), 1);
        assert_eq!(mixer.voices[0].sound_id, "a");
    }

    #[test]
    fn test_mixer_render_past_end_is_silent() {
        let mut mixer = Mixer::default();
        mixer.voices.push(Voice {
            sound_id: "a".to_string(),
            samples: Arc::new(vec![0.5; 2]),
            cursor: 0,
        });

        let mut output = vec![0.0f32; 12];
        mixer.render(&mut output, 2);
        assert_eq!(output[6], 0.0);
        assert!(mixer.voices.is_empty());
    }
}

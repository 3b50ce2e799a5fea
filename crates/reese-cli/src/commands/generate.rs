//! Test signal generation command.

use clap::{Args, ValueEnum};
use reese_io::{Audio, WavSpec, write_wav};
use std::f32::consts::TAU;
use std::path::PathBuf;

/// Test waveform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Waveform {
    #[default]
    Sine,
    Saw,
    Square,
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Frequency in Hz
    #[arg(long, default_value = "40.0")]
    freq: f32,

    /// Duration in seconds
    #[arg(long, default_value = "2.0")]
    duration: f32,

    /// Sample rate
    #[arg(long, default_value = "48000")]
    sample_rate: u32,

    /// Amplitude (0-1)
    #[arg(long, default_value = "0.8")]
    amplitude: f32,

    /// Waveform
    #[arg(long, value_enum, default_value_t = Waveform::Sine)]
    waveform: Waveform,
}

/// Render `frames` samples of a naive waveform.
pub fn generate(waveform: Waveform, freq: f32, sample_rate: u32, amplitude: f32, frames: usize) -> Vec<f32> {
    let inc = freq / sample_rate as f32;
    let mut phase = 0.0f32;
    (0..frames)
        .map(|_| {
            let value = match waveform {
                Waveform::Sine => (TAU * phase).sin(),
                Waveform::Saw => 2.0 * phase - 1.0,
                Waveform::Square => {
                    if phase < 0.5 {
                        1.0
                    } else {
                        -1.0
                    }
                }
            };
            phase += inc;
            if phase >= 1.0 {
                phase -= 1.0;
            }
            value * amplitude
        })
        .collect()
}

pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    if !(args.freq > 0.0 && args.duration > 0.0 && args.sample_rate > 0) {
        anyhow::bail!("frequency, duration and sample rate must be positive");
    }
    let amplitude = args.amplitude.clamp(0.0, 1.0);
    let frames = (args.duration * args.sample_rate as f32).round() as usize;

    println!(
        "Generating {:?} at {} Hz, {:.2}s ({} frames)...",
        args.waveform, args.freq, args.duration, frames
    );
    let samples = generate(args.waveform, args.freq, args.sample_rate, amplitude, frames);

    let spec = WavSpec {
        sample_rate: args.sample_rate,
        ..WavSpec::default()
    };
    write_wav(&args.output, &Audio::Mono(samples), spec)?;
    println!("Wrote {}", args.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sine_has_expected_period_and_amplitude() {
        let samples = generate(Waveform::Sine, 40.0, 48000, 0.5, 1200);
        assert_eq!(samples.len(), 1200);
        assert!(samples[0].abs() < 1e-6);
        // Quarter period at 40 Hz is 300 samples
        assert!((samples[300] - 0.5).abs() < 1e-3);
        assert!(samples.iter().all(|s| s.abs() <= 0.5 + 1e-6));
    }

    #[test]
    fn saw_and_square_ranges() {
        let saw = generate(Waveform::Saw, 100.0, 48000, 1.0, 480);
        assert_eq!(saw[0], -1.0);
        assert!(saw.iter().all(|s| (-1.0..1.0).contains(s)));

        let square = generate(Waveform::Square, 100.0, 48000, 0.8, 480);
        assert!(square.iter().all(|&s| s == 0.8 || s == -0.8));
    }
}

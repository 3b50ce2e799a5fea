//! File-based processing command.

use crate::commands::common::{apply_overrides, load_preset, parse_param};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use reese_core::linear_to_db;
use reese_effects::{EngineConfig, ParamSnapshot, ProcessingEngine, ReeseParam};
use reese_io::{Audio, BitDepth, WavSpec, read_wav, write_wav};
use std::path::PathBuf;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file (mono or stereo)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Preset name or TOML path
    #[arg(short, long)]
    preset: Option<String>,

    /// Parameter override (e.g., "cutoff=800"), applied after the preset
    #[arg(long, value_parser = parse_param, number_of_values = 1)]
    param: Vec<(ReeseParam, f32)>,

    /// Processing block size
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,

    /// Write mono output (stereo input is summed first)
    #[arg(long)]
    mono: bool,

    /// Fixed RNG seed for reproducible renders
    #[arg(long)]
    seed: Option<u64>,
}

/// Engine settings and parameter values for one render.
pub struct RenderSetup {
    pub config: EngineConfig,
    pub params: ParamSnapshot,
    pub block_size: usize,
    pub mono: bool,
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    let bit_depth = BitDepth::try_from(args.bit_depth)?;
    if args.block_size == 0 {
        anyhow::bail!("--block-size must be at least 1");
    }

    println!("Reading {}...", args.input.display());
    let (audio, spec) = read_wav(&args.input)?;
    println!(
        "  {} frames, {} channel(s), {} Hz, {:.2}s",
        audio.frames(),
        audio.channels(),
        spec.sample_rate,
        audio.duration_secs(spec.sample_rate)
    );

    let preset = args.preset.as_deref().map(load_preset).transpose()?;
    if let Some(preset) = &preset {
        println!("Loading preset: {}", preset.name);
    }

    let mut config = preset.as_ref().and_then(|p| p.engine).unwrap_or_default();
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    let base = preset.map(|p| p.params).unwrap_or_default();
    let setup = RenderSetup {
        config,
        params: apply_overrides(base, &args.param),
        block_size: args.block_size,
        mono: args.mono,
    };

    let pb = ProgressBar::new(audio.frames() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );
    let output = render(&audio, spec.sample_rate, &setup, |done| pb.set_position(done as u64))?;
    pb.finish_with_message("done");

    println!("\nStats:");
    print_stats("Input: ", &audio);
    print_stats("Output:", &output);

    let out_spec = WavSpec {
        sample_rate: spec.sample_rate,
        bit_depth,
    };
    println!("\nWriting {}...", args.output.display());
    write_wav(&args.output, &output, out_spec)?;
    println!("Done!");

    Ok(())
}

/// Run `audio` through a freshly prepared engine, block by block.
///
/// Parameters are applied before the first sample, so the render starts at
/// the target values instead of ramping from the defaults.
pub fn render(
    audio: &Audio,
    sample_rate: u32,
    setup: &RenderSetup,
    mut progress: impl FnMut(usize),
) -> anyhow::Result<Audio> {
    let mut engine = ProcessingEngine::with_config(setup.config);
    engine.prepare(sample_rate as f32)?;
    engine.set_params(&setup.params);
    engine.reset();
    tracing::debug!(seed = engine.seed(), params = ?setup.params, "render configured");

    let n = setup.block_size;
    let output = match (audio, setup.mono) {
        (Audio::Mono(samples), true) => {
            let mut out = samples.clone();
            for (i, block) in out.chunks_mut(n).enumerate() {
                engine.process_mono(block);
                progress((i * n + block.len()).min(samples.len()));
            }
            Audio::Mono(out)
        }
        (Audio::Stereo { left, right }, true) => {
            let mut out: Vec<f32> = left.iter().zip(right).map(|(l, r)| 0.5 * (l + r)).collect();
            let len = out.len();
            for (i, block) in out.chunks_mut(n).enumerate() {
                engine.process_mono(block);
                progress((i * n + block.len()).min(len));
            }
            Audio::Mono(out)
        }
        (Audio::Mono(samples), false) => {
            let mut left = vec![0.0; samples.len()];
            let mut right = vec![0.0; samples.len()];
            for (i, ((input, l), r)) in samples
                .chunks(n)
                .zip(left.chunks_mut(n))
                .zip(right.chunks_mut(n))
                .enumerate()
            {
                engine.process_mono_to_stereo(input, l, r);
                progress((i * n + input.len()).min(samples.len()));
            }
            Audio::Stereo { left, right }
        }
        (Audio::Stereo { left, right }, false) => {
            let mut left = left.clone();
            let mut right = right.clone();
            let len = left.len();
            for (i, (l, r)) in left.chunks_mut(n).zip(right.chunks_mut(n)).enumerate() {
                engine.process_stereo(l, r);
                progress((i * n + l.len()).min(len));
            }
            Audio::Stereo { left, right }
        }
    };
    Ok(output)
}

fn print_stats(label: &str, audio: &Audio) {
    let (peak_level, rms_level) = match audio {
        Audio::Mono(samples) => (peak(samples), rms(samples)),
        Audio::Stereo { left, right } => (peak(left).max(peak(right)), rms(left).max(rms(right))),
    };
    println!(
        "  {label} RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(rms_level),
        linear_to_db(peak_level)
    );
}

fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f32 = samples.iter().map(|s| s * s).sum();
    (sum / samples.len() as f32).sqrt()
}

fn peak(samples: &[f32]) -> f32 {
    samples.iter().map(|s| s.abs()).fold(0.0, f32::max)
}

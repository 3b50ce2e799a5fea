//! WAV file reading and writing.

use crate::{Error, Result};
use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;

/// Sample encoding on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BitDepth {
    /// 16-bit signed PCM.
    Int16,
    /// 24-bit signed PCM.
    Int24,
    /// 32-bit IEEE float.
    #[default]
    Float32,
}

impl BitDepth {
    /// Bits per sample.
    pub fn bits(self) -> u16 {
        match self {
            BitDepth::Int16 => 16,
            BitDepth::Int24 => 24,
            BitDepth::Float32 => 32,
        }
    }

    /// Full-scale magnitude for integer encodings.
    fn int_scale(self) -> f32 {
        (1i32 << (self.bits() - 1)) as f32
    }
}

impl TryFrom<u16> for BitDepth {
    type Error = Error;

    fn try_from(bits: u16) -> Result<Self> {
        match bits {
            16 => Ok(BitDepth::Int16),
            24 => Ok(BitDepth::Int24),
            32 => Ok(BitDepth::Float32),
            other => Err(Error::UnsupportedBitDepth(other)),
        }
    }
}

/// Sample rate and encoding of a WAV file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Sample encoding.
    pub bit_depth: BitDepth,
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            sample_rate: 48000,
            bit_depth: BitDepth::Float32,
        }
    }
}

impl WavSpec {
    fn to_hound(self, channels: u16) -> hound::WavSpec {
        hound::WavSpec {
            channels,
            sample_rate: self.sample_rate,
            bits_per_sample: self.bit_depth.bits(),
            sample_format: match self.bit_depth {
                BitDepth::Float32 => SampleFormat::Float,
                BitDepth::Int16 | BitDepth::Int24 => SampleFormat::Int,
            },
        }
    }
}

/// Planar mono or stereo audio.
#[derive(Debug, Clone, PartialEq)]
pub enum Audio {
    /// One channel.
    Mono(Vec<f32>),
    /// Two channels of equal length.
    Stereo {
        /// Left channel.
        left: Vec<f32>,
        /// Right channel.
        right: Vec<f32>,
    },
}

impl Audio {
    /// Number of channels (1 or 2).
    pub fn channels(&self) -> u16 {
        match self {
            Audio::Mono(_) => 1,
            Audio::Stereo { .. } => 2,
        }
    }

    /// Samples per channel.
    pub fn frames(&self) -> usize {
        match self {
            Audio::Mono(samples) => samples.len(),
            Audio::Stereo { left, .. } => left.len(),
        }
    }

    /// Whether there are no frames.
    pub fn is_empty(&self) -> bool {
        self.frames() == 0
    }

    /// Duration in seconds at `sample_rate`.
    pub fn duration_secs(&self, sample_rate: u32) -> f64 {
        self.frames() as f64 / f64::from(sample_rate)
    }

    /// Convert to stereo, duplicating a mono channel.
    pub fn into_stereo(self) -> Self {
        match self {
            Audio::Mono(samples) => Audio::Stereo {
                left: samples.clone(),
                right: samples,
            },
            stereo @ Audio::Stereo { .. } => stereo,
        }
    }

    /// Build from interleaved `[L, R, L, R, ...]` samples.
    fn from_interleaved_stereo(samples: &[f32]) -> Self {
        let (left, right) = samples.chunks_exact(2).map(|frame| (frame[0], frame[1])).unzip();
        Audio::Stereo { left, right }
    }
}

fn decode_samples<R: std::io::Read>(reader: WavReader<R>, bit_depth: BitDepth) -> Result<Vec<f32>> {
    let samples = match bit_depth {
        BitDepth::Float32 => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        BitDepth::Int16 | BitDepth::Int24 => {
            let scale = bit_depth.int_scale();
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };
    Ok(samples)
}

/// Read a mono or stereo WAV file.
///
/// Integer samples are scaled to [-1, 1). Files with more than two channels,
/// and 32-bit integer or 8-bit files, are rejected.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(Audio, WavSpec)> {
    let path = path.as_ref();
    let reader = WavReader::open(path)?;
    let header = reader.spec();

    let bit_depth = BitDepth::try_from(header.bits_per_sample)?;
    let float_on_disk = header.sample_format == SampleFormat::Float;
    if float_on_disk != (bit_depth == BitDepth::Float32) {
        return Err(Error::UnsupportedBitDepth(header.bits_per_sample));
    }
    if !(1..=2).contains(&header.channels) {
        return Err(Error::UnsupportedChannels(header.channels));
    }

    let spec = WavSpec {
        sample_rate: header.sample_rate,
        bit_depth,
    };
    let samples = decode_samples(reader, bit_depth)?;
    let audio = if header.channels == 1 {
        Audio::Mono(samples)
    } else {
        Audio::from_interleaved_stereo(&samples)
    };

    tracing::debug!(
        path = %path.display(),
        channels = header.channels,
        sample_rate = spec.sample_rate,
        bits = bit_depth.bits(),
        frames = audio.frames(),
        "read wav"
    );
    Ok((audio, spec))
}

/// Write audio to a WAV file. Integer encodings clip at full scale.
pub fn write_wav<P: AsRef<Path>>(path: P, audio: &Audio, spec: WavSpec) -> Result<()> {
    let path = path.as_ref();
    let mut writer = WavWriter::create(path, spec.to_hound(audio.channels()))?;

    let mut write = |sample: f32| -> Result<()> {
        match spec.bit_depth {
            BitDepth::Float32 => writer.write_sample(sample)?,
            BitDepth::Int16 | BitDepth::Int24 => {
                let scale = spec.bit_depth.int_scale();
                writer.write_sample((sample * scale).clamp(-scale, scale - 1.0) as i32)?;
            }
        }
        Ok(())
    };

    match audio {
        Audio::Mono(samples) => {
            for &s in samples {
                write(s)?;
            }
        }
        Audio::Stereo { left, right } => {
            for (&l, &r) in left.iter().zip(right) {
                write(l)?;
                write(r)?;
            }
        }
    }

    writer.finalize()?;
    tracing::debug!(
        path = %path.display(),
        channels = audio.channels(),
        frames = audio.frames(),
        "wrote wav"
    );
    Ok(())
}

//! WAV file I/O for the Reese bass processor.
//!
//! Audio is held planar in [`Audio`]: one buffer for mono files, two for
//! stereo. The engine's block methods take planar slices directly.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use reese_io::{Audio, read_wav, write_wav};
//!
//! let (audio, spec) = read_wav("bass.wav")?;
//! let stereo = audio.into_stereo();
//! write_wav("bass_copy.wav", &stereo, spec)?;
//! # Ok::<(), reese_io::Error>(())
//! ```

mod wav;

pub use wav::{Audio, BitDepth, WavSpec, read_wav, write_wav};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Only mono and stereo files are supported.
    #[error("Unsupported channel count: {0} (expected 1 or 2)")]
    UnsupportedChannels(u16),

    /// Only 16-bit and 24-bit integer and 32-bit float samples are supported.
    #[error("Unsupported bit depth: {0} (expected 16, 24 or 32)")]
    UnsupportedBitDepth(u16),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;

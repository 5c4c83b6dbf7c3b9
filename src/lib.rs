//! Color-cycling GIFs.
//!
//! A GIF is decoded into a [`Sequence`], optionally colorized, replayed a
//! number of times, and then every frame's palette is rotated in hue by an
//! amount that grows with the frame index, so the colors make `cycles` full
//! turns over the whole animation. Only palettes are touched; pixel indices
//! pass through unchanged.
//!
//! ```no_run
//! let config = partygif::Config {
//!     input: Some("cat.gif".into()),
//!     output: Some("party-cat.gif".into()),
//!     cycles: 2,
//!     ..partygif::Config::default()
//! };
//! partygif::run(&config)?;
//! # Ok::<(), partygif::Error>(())
//! ```

use std::io::{BufReader, BufWriter, Read, Write};

pub mod codec;
pub mod color;
pub mod config;
pub mod error;
pub mod sequence;
pub mod transform;

pub use crate::color::{Color, Hcl, from_perceptual, shift_hue, to_perceptual};
pub use crate::config::Config;
pub use crate::error::{DecodeError, Error, Result};
pub use crate::sequence::{Disposal, Frame, LoopCount, Palette, Sequence};

/// Opens the configured streams and transforms one GIF.
pub fn run(config: &Config) -> Result<()> {
    let input = config.open_input()?;
    let output = config.open_output()?;
    party_gif(config, BufReader::new(input), BufWriter::new(output))
}

/// Decodes `input`, applies the configured transformations and encodes the
/// result to `output`.
///
/// Nothing is written before decoding succeeds, but an encoding failure can
/// leave `output` partially written.
pub fn party_gif<R: Read, W: Write>(config: &Config, input: R, output: W) -> Result<()> {
    let mut sequence = codec::decode(input)?;
    transform::apply(&mut sequence, config);
    codec::encode(&sequence, output)?;
    Ok(())
}

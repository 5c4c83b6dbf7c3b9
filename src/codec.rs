//! Bridge between GIF bytes and [`Sequence`], built on the `gif` crate.

use std::borrow::Cow;
use std::io::{Read, Write};
use std::num::NonZeroU64;

use gif::{
    ColorOutput, DecodeOptions, DisposalMethod, Encoder, EncodingError, MemoryLimit, Repeat,
};
use tracing::debug;

use crate::error::DecodeError;
use crate::sequence::{Disposal, Frame, LoopCount, Palette, Sequence};

/// Upper bound on decoder allocations for a single frame buffer.
const MEMORY_LIMIT: NonZeroU64 = match NonZeroU64::new(512 * 1024 * 1024) {
    Some(limit) => limit,
    None => unreachable!(),
};

/// Reads a whole GIF into memory.
///
/// Frames without a local color table get their own copy of the global one,
/// so every frame owns its palette from here on.
pub fn decode<R: Read>(reader: R) -> Result<Sequence, DecodeError> {
    let mut options = DecodeOptions::new();
    options.set_color_output(ColorOutput::Indexed);
    options.set_memory_limit(MemoryLimit::Bytes(MEMORY_LIMIT));
    let mut decoder = options.read_info(reader)?;

    let mut sequence = Sequence::new(decoder.width(), decoder.height());
    let global_palette = decoder.global_palette().map(<[u8]>::to_vec);

    while let Some(raw) = decoder.read_next_frame()? {
        let rgb = raw
            .palette
            .as_deref()
            .or(global_palette.as_deref())
            .ok_or(DecodeError::MissingPalette {
                frame: sequence.len(),
            })?;

        let frame = Frame {
            left: raw.left,
            top: raw.top,
            width: raw.width,
            height: raw.height,
            interlaced: raw.interlaced,
            needs_user_input: raw.needs_user_input,
            pixels: raw.buffer.to_vec(),
            palette: Palette::from_rgb(rgb, raw.transparent),
        };
        sequence.push(frame, raw.delay, raw.dispose.into());
    }

    if sequence.is_empty() {
        return Err(DecodeError::NoFrames);
    }
    sequence.loop_count = decoder.repeat().into();

    debug!(
        frames = sequence.len(),
        width = sequence.width,
        height = sequence.height,
        loop_count = ?sequence.loop_count,
        "decoded input"
    );
    Ok(sequence)
}

/// Writes `sequence` as a GIF, every frame with a local color table.
///
/// The first zero-alpha palette entry of each frame becomes its transparent
/// index. No loop extension is written for a single frame or for
/// `LoopCount::Finite(0)`.
pub fn encode<W: Write>(sequence: &Sequence, writer: W) -> Result<(), EncodingError> {
    let mut encoder = Encoder::new(writer, sequence.width, sequence.height, &[])?;

    if sequence.len() > 1 && sequence.loop_count != LoopCount::Finite(0) {
        encoder.set_repeat(sequence.loop_count.into())?;
    }

    for (frame, delay, disposal) in sequence.iter() {
        let mut out = gif::Frame::default();
        out.left = frame.left;
        out.top = frame.top;
        out.width = frame.width;
        out.height = frame.height;
        out.interlaced = frame.interlaced;
        out.needs_user_input = frame.needs_user_input;
        out.delay = delay;
        out.dispose = disposal.into();
        out.transparent = frame.palette.transparent_index();
        out.palette = Some(frame.palette.to_rgb());
        out.buffer = Cow::Borrowed(&frame.pixels);
        encoder.write_frame(&out)?;
    }

    let mut writer = encoder.into_inner()?;
    writer.flush()?;
    debug!(frames = sequence.len(), "encoded output");
    Ok(())
}

impl From<DisposalMethod> for Disposal {
    fn from(method: DisposalMethod) -> Self {
        match method {
            DisposalMethod::Keep => Self::Keep,
            DisposalMethod::Background => Self::Background,
            DisposalMethod::Previous => Self::Previous,
            _ => Self::Unspecified,
        }
    }
}

impl From<Disposal> for DisposalMethod {
    fn from(disposal: Disposal) -> Self {
        match disposal {
            Disposal::Unspecified => Self::Any,
            Disposal::Keep => Self::Keep,
            Disposal::Background => Self::Background,
            Disposal::Previous => Self::Previous,
        }
    }
}

impl From<Repeat> for LoopCount {
    fn from(repeat: Repeat) -> Self {
        match repeat {
            Repeat::Finite(count) => Self::Finite(count),
            Repeat::Infinite => Self::Infinite,
        }
    }
}

impl From<LoopCount> for Repeat {
    fn from(count: LoopCount) -> Self {
        match count {
            LoopCount::Finite(count) => Self::Finite(count),
            LoopCount::Infinite => Self::Infinite,
        }
    }
}

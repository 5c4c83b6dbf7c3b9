//! The sequence transformations: colorize, repeat, and hue scheduling.
//!
//! Each stage mutates the [`Sequence`] in place and keeps no state between
//! calls. [`apply`] runs them in the order the output depends on.

use tracing::{debug, trace};

use crate::color::shift_hue;
use crate::config::Config;
use crate::sequence::{Disposal, Sequence};

/// Runs the enabled stages over a decoded sequence.
pub fn apply(sequence: &mut Sequence, config: &Config) {
    if config.colorize {
        colorize(sequence);
    }
    add_repeats(sequence, config.repeats, config.frame_rate);
    color_shift(sequence, config.cycles);
}

/// Gives a black-and-white source something to rotate.
///
/// Every palette entry's red channel is overwritten with its alpha, so opaque
/// grays pick up a red cast and transparent entries stay untouched.
pub fn colorize(sequence: &mut Sequence) {
    for frame in sequence.frames_mut() {
        for color in frame.palette.iter_mut() {
            color.r = color.a;
        }
    }
    debug!(frames = sequence.len(), "colorized palettes");
}

/// Replays the original frames `repeats` times in total.
///
/// A single-frame sequence first gets `frame_rate` as its delay. Each appended
/// copy owns its own pixels and palette. The last frame of every replay is set
/// to [`Disposal::Background`] so the next replay starts from a clean canvas.
/// `repeats <= 0` appends nothing and leaves disposals alone; `repeats == 1`
/// only fixes the final disposal.
pub fn add_repeats(sequence: &mut Sequence, repeats: i32, frame_rate: u16) {
    if sequence.len() == 1 {
        sequence.delays_mut()[0] = frame_rate;
    }

    let original_len = sequence.len();
    let repeats = usize::try_from(repeats).unwrap_or(0);
    if original_len == 0 || repeats == 0 {
        return;
    }

    for _ in 1..repeats {
        for index in 0..original_len {
            let frame = sequence.frames()[index].clone();
            let delay = sequence.delays()[index];
            let disposal = sequence.disposals()[index];
            sequence.push(frame, delay, disposal);
        }
    }

    let disposals = sequence.disposals_mut();
    for block in 0..repeats {
        disposals[block * original_len + original_len - 1] = Disposal::Background;
    }

    debug!(
        original = original_len,
        repeats,
        frames = sequence.len(),
        "expanded sequence"
    );
}

/// Degrees of hue added per frame so that `cycles` full turns span
/// `frame_count` frames.
pub fn hue_step(frame_count: usize, cycles: i32) -> f64 {
    360.0 / frame_count as f64 * f64::from(cycles)
}

/// Hue offset for each frame index, starting at exactly 0.
pub fn hue_offsets(frame_count: usize, cycles: i32) -> impl Iterator<Item = f64> {
    let step = hue_step(frame_count, cycles);
    (0..frame_count).map(move |index| step * index as f64)
}

/// Rotates every frame's palette by that frame's scheduled offset.
///
/// Only palettes change; pixel indices are left as they are.
pub fn color_shift(sequence: &mut Sequence, cycles: i32) {
    let frame_count = sequence.len();
    debug!(
        frames = frame_count,
        cycles,
        step = hue_step(frame_count, cycles),
        "shifting hues"
    );

    let offsets = hue_offsets(frame_count, cycles);
    for (index, (frame, offset)) in sequence
        .frames_mut()
        .iter_mut()
        .zip(offsets)
        .enumerate()
    {
        trace!(frame = index, offset, colors = frame.palette.len(), "shift frame");
        for color in frame.palette.iter_mut() {
            *color = shift_hue(offset, *color);
        }
    }
}

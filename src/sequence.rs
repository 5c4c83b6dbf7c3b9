//! In-memory frame sequence shared by every pipeline stage.

use crate::color::Color;

/// How a frame's area is treated before the next frame is drawn.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Disposal {
    /// No disposal specified.
    #[default]
    Unspecified,
    /// Leave the frame in place.
    Keep,
    /// Clear the frame's area to the background.
    Background,
    /// Restore whatever was there before the frame was drawn.
    Previous,
}

/// Playback looping carried from input to output unchanged.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LoopCount {
    /// Loop this many times. `Finite(0)` means the input had no loop extension.
    Finite(u16),
    Infinite,
}

impl Default for LoopCount {
    fn default() -> Self {
        Self::Finite(0)
    }
}

/// Index-addressed colors. Pixels refer to entries by position, so entries
/// are only ever recolored in place, never reordered.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    pub fn new(colors: Vec<Color>) -> Self {
        Self { colors }
    }

    /// Builds a palette from packed 8-bit `[r, g, b, ...]` triples.
    ///
    /// The entry at `transparent` becomes [`Color::TRANSPARENT`].
    pub fn from_rgb(rgb: &[u8], transparent: Option<u8>) -> Self {
        let colors = rgb
            .chunks_exact(3)
            .enumerate()
            .map(|(index, triple)| {
                if transparent.is_some_and(|t| usize::from(t) == index) {
                    Color::TRANSPARENT
                } else {
                    Color::from_rgb8(triple[0], triple[1], triple[2])
                }
            })
            .collect();
        Self { colors }
    }

    /// Packs the palette back into 8-bit `[r, g, b, ...]` triples.
    pub fn to_rgb(&self) -> Vec<u8> {
        self.colors.iter().flat_map(|c| c.to_rgb8()).collect()
    }

    /// First addressable entry with zero alpha.
    pub fn transparent_index(&self) -> Option<u8> {
        self.colors
            .iter()
            .position(|c| c.is_transparent())
            .and_then(|index| u8::try_from(index).ok())
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Color> {
        self.colors.iter_mut()
    }
}

/// One indexed-color image and the palette it exclusively owns.
///
/// `Clone` is a deep copy: the clone gets its own pixels and palette.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    pub left: u16,
    pub top: u16,
    pub width: u16,
    pub height: u16,
    pub interlaced: bool,
    pub needs_user_input: bool,
    /// Row-major palette indices, `width * height` of them.
    pub pixels: Vec<u8>,
    pub palette: Palette,
}

impl Frame {
    pub fn new(width: u16, height: u16, pixels: Vec<u8>, palette: Palette) -> Self {
        Self {
            width,
            height,
            pixels,
            palette,
            ..Self::default()
        }
    }
}

/// Frames plus their per-frame delay and disposal.
///
/// The three per-frame lists always have the same length: frames can only be
/// added through [`Sequence::push`], and the mutable views are slices.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sequence {
    /// Logical screen size.
    pub width: u16,
    pub height: u16,
    pub loop_count: LoopCount,
    frames: Vec<Frame>,
    delays: Vec<u16>,
    disposals: Vec<Disposal>,
}

impl Sequence {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Appends a frame with its delay (hundredths of a second) and disposal.
    pub fn push(&mut self, frame: Frame, delay: u16, disposal: Disposal) {
        self.frames.push(frame);
        self.delays.push(delay);
        self.disposals.push(disposal);
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn frames_mut(&mut self) -> &mut [Frame] {
        &mut self.frames
    }

    pub fn delays(&self) -> &[u16] {
        &self.delays
    }

    pub fn delays_mut(&mut self) -> &mut [u16] {
        &mut self.delays
    }

    pub fn disposals(&self) -> &[Disposal] {
        &self.disposals
    }

    pub fn disposals_mut(&mut self) -> &mut [Disposal] {
        &mut self.disposals
    }

    /// Iterates `(frame, delay, disposal)` in playback order.
    pub fn iter(&self) -> impl Iterator<Item = (&Frame, u16, Disposal)> + '_ {
        self.frames
            .iter()
            .zip(self.delays.iter().copied())
            .zip(self.disposals.iter().copied())
            .map(|((frame, delay), disposal)| (frame, delay, disposal))
    }
}

//! Terminal rendition of the bounce: the input box hops right and back.

/// Horizontal offset of the input box for each drawn frame
const FRAMES: [u16; 8] = [1, 3, 4, 3, 1, 0, 1, 0];

/// One playback of the bounce, advanced once per drawn frame
#[derive(Debug, Default)]
pub struct BounceAnimation {
    frame: usize,
}

impl BounceAnimation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offset for the frame about to be drawn
    pub fn offset(&self) -> u16 {
        FRAMES.get(self.frame).copied().unwrap_or(0)
    }

    /// Call after a frame was drawn. Returns `true` once the last frame is on screen.
    pub fn frame_drawn(&mut self) -> bool {
        self.frame += 1;
        self.frame >= FRAMES.len()
    }
}

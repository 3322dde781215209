//! One-shot bounce latch for the search input container.
//!
//! The latch knows nothing about how the animation is drawn. A front end
//! starts its animation when [`BounceLatch::trigger`] returns `true` and
//! calls [`BounceLatch::animation_finished`] once the animation has really
//! ended.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BounceLatch {
    #[default]
    Idle,
    Playing,
}

impl BounceLatch {
    /// Idle -> Playing. Returns `false`, and changes nothing, while Playing.
    pub fn trigger(&mut self) -> bool {
        match self {
            BounceLatch::Idle => {
                *self = BounceLatch::Playing;
                true
            }
            BounceLatch::Playing => false,
        }
    }

    /// Playing -> Idle
    pub fn animation_finished(&mut self) {
        *self = BounceLatch::Idle;
    }

    pub fn is_playing(&self) -> bool {
        *self == BounceLatch::Playing
    }
}

pub mod player;
pub mod property;
pub mod tracks;
pub mod values;

pub use player::{AnimationPlayer, LoopMode};
pub use property::AnimatableProperty;
pub use tracks::{InterpolationMode, KeyframeTrack};
pub use values::Interpolatable;

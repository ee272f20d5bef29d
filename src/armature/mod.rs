pub mod instance;
pub mod node;
pub mod template;

pub use instance::ArmatureInstance;
pub use node::{BlendInput, LocalTransform, NodeTemplate};
pub use template::{AnimationTrackInfo, ArmatureTemplate};

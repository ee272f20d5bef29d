use uuid::Uuid;

use crate::armature::node::NodeTemplate;
use crate::errors::{ManikinError, Result};

/// Name and duration of one animation track, shared by every curve that
/// references the track's index.
#[derive(Debug, Clone)]
pub struct AnimationTrackInfo {
    pub name: String,
    pub duration: f32,
}

impl AnimationTrackInfo {
    #[must_use]
    pub fn new(name: impl Into<String>, duration: f32) -> Self {
        Self {
            name: name.into(),
            duration,
        }
    }
}

/// An immutable, topologically ordered node hierarchy plus the animation
/// track metadata shared by all of its curves.
///
/// Created once per imported asset and shared (behind `Arc`) by every
/// model template that references it. Read-only after construction, so
/// any number of instances may evaluate against it concurrently.
#[derive(Debug, Clone)]
pub struct ArmatureTemplate {
    pub id: Uuid,
    pub name: String,
    nodes: Vec<NodeTemplate>,
    tracks: Vec<AnimationTrackInfo>,
}

impl ArmatureTemplate {
    /// Builds a template, validating the hierarchy ordering invariant:
    /// every node's `index` matches its array position, every parent
    /// index strictly precedes its node, and every child index strictly
    /// follows it. Violations fail fast with
    /// [`ManikinError::InvalidArgument`].
    pub fn new(
        name: impl Into<String>,
        nodes: Vec<NodeTemplate>,
        tracks: Vec<AnimationTrackInfo>,
    ) -> Result<Self> {
        for (position, node) in nodes.iter().enumerate() {
            if node.index != position {
                return Err(ManikinError::InvalidArgument(format!(
                    "node at position {position} carries index {}",
                    node.index
                )));
            }

            if let Some(parent) = node.parent {
                if parent >= position {
                    return Err(ManikinError::InvalidArgument(format!(
                        "node {position} has parent {parent}; parents must precede children"
                    )));
                }
            }

            for &child in &node.children {
                if child <= position {
                    return Err(ManikinError::InvalidArgument(format!(
                        "node {position} lists child {child}; children must follow their parent"
                    )));
                }
                if child >= nodes.len() {
                    return Err(ManikinError::InvalidArgument(format!(
                        "node {position} lists child {child} outside the hierarchy of {} nodes",
                        nodes.len()
                    )));
                }
            }
        }

        Ok(Self {
            id: Uuid::new_v4(),
            name: name.into(),
            nodes,
            tracks,
        })
    }

    #[inline]
    #[must_use]
    pub fn nodes(&self) -> &[NodeTemplate] {
        &self.nodes
    }

    #[inline]
    #[must_use]
    pub fn node(&self, index: usize) -> Option<&NodeTemplate> {
        self.nodes.get(index)
    }

    #[inline]
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    #[must_use]
    pub fn tracks(&self) -> &[AnimationTrackInfo] {
        &self.tracks
    }

    #[inline]
    #[must_use]
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Duration of the named track metadata at `track`, if present.
    #[must_use]
    pub fn track_duration(&self, track: usize) -> Option<f32> {
        self.tracks.get(track).map(|info| info.duration)
    }

    /// Looks an animation track up by name.
    #[must_use]
    pub fn find_track(&self, name: &str) -> Option<usize> {
        self.tracks.iter().position(|info| info.name == name)
    }
}

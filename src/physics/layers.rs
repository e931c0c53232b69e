//! Collision layer encoding
//!
//! Each part sits on a visual layer `1..=8`; the layer maps to one bit of the
//! engine's 32-bit group mask. Bit 0 is reserved for the play-area boundary.
//!
//! Two filters are produced per collider:
//! - `collision`: which fixtures generate contacts (same layer + boundary)
//! - `solver`: which contacts produce a response (boundary only)
//!
//! So parts on the same layer are still detected as touching but never push
//! each other, and parts on different layers never even meet.

use rapier2d::prelude::{Group, InteractionGroups};

use crate::consts::{MAX_LAYER, MIN_LAYER};

/// Category bit of the boundary walls
pub const BOUNDARY_CATEGORY: u32 = 1;

/// Category bit for a part layer
///
/// Layers outside `1..=8` are a programming error; debug builds panic and
/// release builds clamp to the nearest valid layer.
#[inline]
pub fn layer_category(layer: u8) -> u32 {
    debug_assert!(
        (MIN_LAYER..=MAX_LAYER).contains(&layer),
        "collision layer {layer} outside {MIN_LAYER}..={MAX_LAYER}"
    );
    1 << layer.clamp(MIN_LAYER, MAX_LAYER)
}

/// Union of every part layer's category
#[inline]
pub fn all_part_categories() -> u32 {
    (MIN_LAYER..=MAX_LAYER).fold(0, |mask, layer| mask | layer_category(layer))
}

/// Collision + solver groups for one collider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerFilter {
    pub collision: InteractionGroups,
    pub solver: InteractionGroups,
}

impl LayerFilter {
    /// Whether contacts between the two filters get a physical response
    pub fn responds_to(&self, other: &LayerFilter) -> bool {
        self.collision.test(other.collision) && self.solver.test(other.solver)
    }
}

fn groups(category: u32, mask: u32) -> InteractionGroups {
    InteractionGroups::new(
        Group::from_bits_truncate(category),
        Group::from_bits_truncate(mask),
    )
}

/// Filter for a part collider on `layer`
pub fn part_filter(layer: u8) -> LayerFilter {
    let category = layer_category(layer);
    LayerFilter {
        collision: groups(category, category | BOUNDARY_CATEGORY),
        solver: groups(category, BOUNDARY_CATEGORY),
    }
}

/// Filter for boundary walls: accepts every part layer
pub fn boundary_filter() -> LayerFilter {
    let parts = all_part_categories();
    LayerFilter {
        collision: groups(BOUNDARY_CATEGORY, parts),
        solver: groups(BOUNDARY_CATEGORY, parts),
    }
}

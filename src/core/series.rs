mod assemble;
mod extrema;

use serde::Serialize;

use crate::core::point::PricePoint;

/// Chronologically ordered price slots of one analysis pass.
#[derive(
    Clone,
    Debug,
    Default,
    PartialEq,
    Serialize,
    derive_more::Deref,
    derive_more::DerefMut,
    derive_more::From,
    derive_more::IntoIterator,
)]
#[into_iterator(owned, ref, ref_mut)]
#[must_use]
pub struct Series(Vec<PricePoint>);

impl FromIterator<PricePoint> for Series {
    fn from_iter<I: IntoIterator<Item = PricePoint>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

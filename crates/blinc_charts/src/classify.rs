//! Continuous vs. discrete child classification

use crate::props::ChildDescriptor;

/// Whether `child`, or any of its immediate nested children, is continuous
///
/// Nested children are inspected one level deep only.
pub fn has_continuous(child: &ChildDescriptor) -> bool {
    child.is_continuous() || child.children.iter().any(ChildDescriptor::is_continuous)
}

/// Whether a group with these children interpolates continuously
///
/// Polar layouts never do, regardless of their children.
pub fn is_continuous(children: &[ChildDescriptor], polar: bool) -> bool {
    !polar && children.iter().any(has_continuous)
}

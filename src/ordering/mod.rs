//! Ordered-collection reordering.
//!
//! Topics within a course, pages within a lesson variant, and blocks within a
//! page all share the same positional contract: siblings carry a distinct
//! integer `order`, and listing a scope ascending by `order` returns them in
//! their intended sequence. This module owns the one non-trivial piece of
//! that contract: taking a caller-supplied full ordering of a scope's
//! children and persisting it atomically.
//!
//! The reorderer is generic over [`OrderedScope`], so each entity kind only
//! supplies scope resolution and the positional write; the permutation
//! checks live in one place.

pub mod error;
pub mod reorderer;
pub mod scope;
pub mod scopes;

pub use error::OrderingError;
pub use reorderer::reorder;
pub use scope::OrderedScope;
pub use scopes::{LessonPageScope, PageBlockScope};

//! PHP emission.

pub mod emitter;
pub mod members;
pub mod namespace;
pub mod relations;
pub mod synth;
pub mod types;

pub use emitter::ElementEmitter;
pub use members::MemberVariable;
pub use namespace::{collect_uses, namespace_path, needs_import, qualified_path};
pub use relations::{SuperType, TraitUse};
pub use types::{TypeMode, TypeResolver};

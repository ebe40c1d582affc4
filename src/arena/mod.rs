//! Region-based bump allocator.
//!
//! Every AST node produced by the parser lives inside an [`arena::Arena`].
//! The arena keeps an ordered chain of fixed-capacity regions and hands out
//! 8-byte aligned allocations from the first region with enough room,
//! growing the chain only when no existing region fits. Nothing is freed
//! individually: the whole arena is either reset (memory kept, cursors
//! rewound) or released.

pub mod arena;

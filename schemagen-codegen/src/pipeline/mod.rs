//! Phased emission for generators that walk an ordered list of entries.
//!
//! A [`PhasedGenerator`] is driven through four phases by a
//! [`PhasedEmitter`]:
//!
//! - `collect` - register types with the importing helper, skip unusable entries
//! - `decl` - member declarations
//! - `ctor` - constructor statements
//! - `impl` - method bodies
//!
//! Imports are resolved between `collect` and `decl`, so every emitting
//! phase sees final module aliases. Skipped entries are reported as
//! [`Diagnostic`]s rather than errors.

mod context;
mod diagnostic;
mod phase;
mod runner;

pub use context::EmitContext;
pub use diagnostic::{Diagnostic, Severity};
pub use phase::EmitPhase;
pub use runner::{PhasedEmitter, PhasedGenerator, PhasedOutput};

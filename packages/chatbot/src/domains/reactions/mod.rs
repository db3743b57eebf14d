//! Reactions domain - emoji reactions mapped to role and pin actions
//!
//! A reaction event is first classified by a pure function ([`classify`]) into
//! exactly one [`Action`], then carried out against the chat platform by the
//! [`ReactionExecutor`]. Failures stop at the executor: they are written to the
//! audit sink and never reach the event loop.

pub mod classifier;
pub mod events;
pub mod executor;

pub use classifier::{classify, Action, ReactionRules};
pub use events::{MemberSnapshot, ReactionChange, ReactionEvent};
pub use executor::{ActionKind, ReactionError, ReactionExecutor, ReactionOutcome};

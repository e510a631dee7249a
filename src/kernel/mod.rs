//! Pure, synchronous turn processing. Nothing in here awaits or touches I/O.

pub mod event;
pub mod random;
pub mod template;
pub mod speech;
pub mod dice;
pub mod dispatch;

pub use dispatch::{DialogueConfig, Dispatcher};
pub use event::{EventKind, IntentEvent, SlotValue};

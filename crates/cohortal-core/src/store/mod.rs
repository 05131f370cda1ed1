// ── Reactive resource storage ──
//
// Single-value observable cells with replay-one subscription semantics.
// Services hold one cell per remote resource and publish into it after
// every successful fetch or update.

mod cell;

pub use cell::{ResourceCell, ResourceStream, ResourceWatchStream};

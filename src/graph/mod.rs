//! # Edge Subsystem
//!
//! The components that turn hypergraph operations into column writes and
//! reads. Each one holds a shared handle to the backend; none caches.
//!
//! | Component | Module | Role |
//! |-----------|--------|------|
//! | `Router` | `router` | id family → partition lookup |
//! | `VertexDirectory` | `directory` | vertex CRUD and delete cascade |
//! | codec | `codec` | edge ↔ composite entry key |
//! | `RelationshipIndex` | `relations` | addrel / delrel / rel_exists |
//! | `CounterLedger` | `counters` | degree, instance, positional counters |
//! | `NeighborScanner` | `scanner` | slice scans back into edges |

pub mod codec;
pub mod counters;
pub mod directory;
pub mod relations;
pub mod router;
pub mod scanner;

pub use counters::{CounterKey, CounterLedger};
pub use directory::VertexDirectory;
pub use relations::RelationshipIndex;
pub use router::{Partition, Router};
pub use scanner::{EdgeScan, NeighborScanner, ScanStatus};

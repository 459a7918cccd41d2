//! `dc-worker` — batch workers for the destination-choice engine.
//!
//! # Crate layout
//!
//! | Module        | Contents                                              |
//! |---------------|-------------------------------------------------------|
//! | [`gate`]      | `InitGate`: load-once shared reference data           |
//! | [`worker`]    | `Worker<M>`: group, build choice sets, sample, tally  |
//! | [`builder`]   | `WorkerBuilder`                                       |
//! | [`aggregate`] | `ResultSet`, `EmploymentCategory`                     |
//! | [`message`]   | `WorkBatch` (in), `BatchResult` (out)                 |
//! | [`observer`]  | `BatchObserver` hooks, `NoopObserver`                 |
//! | [`error`]     | `InitError`, `WorkerError`                            |
//!
//! # Process model
//!
//! ```text
//! coordinator ──WorkBatch──▶ worker thread 1 ─┐
//!             ──WorkBatch──▶ worker thread 2 ─┼─▶ BatchResult ──▶ ResultSet::merge
//!             ──WorkBatch──▶ worker thread N ─┘
//!                                  │
//!                       InitGate (one load per process)
//! ```
//!
//! Every worker thread calls [`InitGate::initialize`] on start-up.  The
//! first caller loads the reference data; the others block until it is
//! ready and then share it through an `Arc`.  After that nothing is locked.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                   |
//! |------------|----------------------------------------------------------|
//! | `parallel` | Builds cohort choice sets on Rayon's thread pool.        |
//! | `fx-hash`  | FxHash maps for result tallies.                          |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use dc_reference::{CatalogRegistry, CsvReferenceSource};
//! use dc_worker::{InitGate, NoopObserver, WorkBatch, WorkerBuilder};
//!
//! let gate = InitGate::new();
//! let source = CsvReferenceSource::new("data/", config.coefficients);
//! let data = gate.initialize(&source, &CatalogRegistry::default(), &config.zone_catalog)?;
//! let worker = WorkerBuilder::new(config, data).build()?;
//! let reply = worker.process(WorkBatch::new(0, persons, prices), &mut NoopObserver)?;
//! ```

pub mod aggregate;
pub mod builder;
pub mod error;
pub mod gate;
pub mod message;
pub mod observer;
pub mod worker;


pub use aggregate::{EmploymentCategory, ResultSet};
pub use builder::WorkerBuilder;
pub use error::{InitError, InitResult, WorkerError, WorkerResult};
pub use gate::InitGate;
pub use message::{BatchResult, WorkBatch};
pub use observer::{BatchObserver, NoopObserver};
pub use worker::Worker;

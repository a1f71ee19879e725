//! Property animation engine.
//!
//! Schedules and composes property animations on nodes of a retained scene
//! graph. Callers describe timing once (`TimingDescriptor`) and either list
//! property changes explicitly or mutate nodes inside a block; the animator
//! produces per-property `ScheduledAnimation`s, stores them on the nodes and
//! reports completion once per call.
//!
//! # Architecture
//!
//! ```text
//! Animator
//!   ├── time scale: transaction override > animator factor > 1.0
//!   ├── InterruptionSnapshot (model / presentation start values)
//!   ├── AnimationBuilder (additive deltas or absolute replacement)
//!   │     └── TimingCurve::resolve (velocity projection, generators)
//!   └── CompletionGroup (one callback per call)
//!
//! NodeAdapter
//!   └── Layer (in-memory node with a manual clock)
//! ```
//!
//! The engine is single-threaded: completion callbacks and transaction state
//! use `Rc`/`RefCell`, and nodes are borrowed mutably for the span of a call.

pub mod animation;
pub mod animator;
pub mod arithmetic;
pub mod builder;
pub mod catalog;
pub mod compat;
pub mod completion;
pub mod curve;
pub mod error;
pub mod layer;
pub mod node;
pub mod resolver;
pub mod timing;
pub mod transaction;
pub mod types;
pub mod velocity;

pub use animation::ScheduledAnimation;
pub use animator::{Animator, PropertyChange};
pub use arithmetic::{Arithmetic, Interpolate};
pub use builder::Tracer;
pub use catalog::{AnimatableProperty, PropertyCatalog};
pub use completion::{Completion, CompletionGroup, CompletionToken};
pub use curve::{CubicBezier, Curve, CurveGenerator, SpringCurve, SpringCurveGenerator, TimingCurve};
pub use error::{AnimatorError, Result};
pub use layer::Layer;
pub use node::NodeAdapter;
pub use resolver::{InterruptionSnapshot, PropertySnapshot};
pub use timing::{Repetition, TimingDescriptor};
pub use transaction::{TransactionContext, TransactionGuard, TransactionScope, TransactionStack};
pub use types::{AnimationKey, Point, PropertyId, Rect, Size, Transform, Value, ValueKind};

static_assertions::assert_impl_all!(Value: Send, Sync);

//! `mind-tree` — behavior-tree engine.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                       |
//! |---------------|----------------------------------------------------------------|
//! | [`status`]    | `Status` (`Success`, `Failure`, `Running`)                     |
//! | [`template`]  | `NodeDef`, `TreeTemplate`, `TemplateBuilder` — serializable data |
//! | [`handlers`]  | `HandlerRegistry`, `LeafContext` — name-keyed leaf functions   |
//! | [`engine`]    | `TreeEngine` (compiled arena), `TreeInstance` (per-agent state) |
//! | [`loader`]    | `load_templates_toml`, `load_templates_file`                   |
//! | [`presets`]   | built-in handlers and the default life-stage trees             |
//! | [`error`]     | `TreeError`, `TreeResult<T>`                                   |
//!
//! # Semantics
//!
//! - **Selector**: children left to right; the first `Success` or `Running`
//!   is returned as-is; `Failure` if every child fails (or there are none).
//! - **Sequence**: children left to right; the first `Failure` or `Running`
//!   is returned as-is; `Success` if every child succeeds (or there are none).
//! - **Action**: whatever the named handler returns.
//! - **Condition**: the named predicate mapped to `Success`/`Failure`.
//!
//! Evaluation always starts at the root.  A leaf that returned `Running` is
//! simply reached again on the next evaluation, and its handler sees how
//! many ticks it has been running through [`LeafContext::elapsed`].

pub mod engine;
pub mod error;
pub mod handlers;
pub mod loader;
pub mod presets;
pub mod status;
pub mod template;


pub use engine::{CompiledTree, DEFAULT_FALLBACK_CATEGORY, TreeEngine, TreeInstance};
pub use error::{TreeError, TreeResult};
pub use handlers::{ActionFn, ConditionFn, HandlerId, HandlerRegistry, LeafContext};
pub use loader::{load_templates_file, load_templates_toml};
pub use presets::{builtin_handlers, default_engine};
pub use status::Status;
pub use template::{NodeDef, TemplateBuilder, TreeTemplate};

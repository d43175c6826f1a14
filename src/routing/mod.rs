//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (at startup):
//!     RouteTable::handle / group
//!     → pattern.rs (parse, validate, normalize)
//!     → table.rs (ordered routes, duplicate check)
//!     → into_router: freeze as immutable Router
//!
//! Incoming Request (method, path)
//!     → path.rs (decode, clean, strip trailing slash)
//!     → router.rs (scan routes in order)
//!     → matcher.rs (segment walk, capture params)
//!     → Dispatch | Redirect | MethodNotAllowed | NotFound
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path
//! - Deterministic: same input always matches same route
//! - First match wins (registration order)

pub mod matcher;
pub mod params;
pub mod path;
pub mod pattern;
pub mod router;
pub mod table;

pub use matcher::{match_path, PathMatch};
pub use params::{Params, RequestParamsExt};
pub use path::{clean_path, RequestPath};
pub use pattern::{Pattern, PatternError, Segment};
pub use router::{Resolution, Router};
pub use table::{Route, RouteError, RouteTable};

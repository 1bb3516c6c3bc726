//! `dsd-ai`
//!
//! **Responsibility:** AI advisory boundary for the delivery domain.
//!
//! - Advisors read inventory/route values; they never mutate them.
//! - Every remote call is bounded by a timeout and validated before use.
//! - Remote failures end in a deterministic fallback, tagged via [`AdviceSource`].

pub mod completion;
pub mod restock;
pub mod result;
pub mod route;
pub mod stub;

pub use completion::{
    CompletionClient, CompletionError, CompletionRequest, DEFAULT_TIMEOUT, FieldKind, ResponseSchema,
    SchemaField,
};
pub use restock::{InventoryInsight, RestockAdvisor};
pub use result::{AdviceFailure, AdviceSource, AdvisorError};
pub use route::{RouteAdvisor, RouteRecommendation};
pub use stub::{StubCompletionClient, StubReply};

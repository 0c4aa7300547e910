//! Rate-aware request handling for the upstream player API.
//!
//! Every player lookup, whether issued directly by a reconciliation pass or by an
//! interactive caller, goes through the single `PlayerGateway` so that no two upstream
//! requests are ever in flight at once. Whole-alliance control jobs are queued on the
//! `RequestQueue` and processed one at a time in submission order.

pub mod gateway;
pub mod handler;
pub mod queue;
pub mod rate_limit;

pub use gateway::{GatedFetch, PlayerGateway};
pub use handler::ControlJobHandler;
pub use queue::{JobTicket, QueueInfo, RequestQueue, RequestQueueConfig};
pub use rate_limit::{GatewayStats, RateLimiter, RateLimiterConfig};

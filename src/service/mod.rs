//! Service layer for alliance control.
//!
//! - `reconciliation` - Brings one alliance roster into agreement with live player data
//! - `guard` - Vetoes bulk removals caused by upstream outages
//! - `control` - Entry points for on-demand checks through the request queue

pub mod control;
pub mod guard;
pub mod reconciliation;

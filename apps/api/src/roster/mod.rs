// Roster operations layered over the ingested candidate list:
// memoized snapshot store, shortlist, search, and team building.

pub mod handlers;
pub mod search;
pub mod shortlist;
pub mod store;
pub mod teams;

//! User module - the per-user durable aggregate.

mod history;
mod profile;

pub use history::InteractionRecord;
pub use profile::{PendingOffer, UserProfile, DEFAULT_FAVORITE_THRESHOLD};

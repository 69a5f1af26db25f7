//! Relief module - stress-relief interventions and the bandit that learns
//! which ones a user responds to.

mod bandit;
pub mod catalog;
mod category;
pub mod feedback;
mod intervention;
mod phase;

pub use bandit::{BanditState, UcbPolicy, ARM_COUNT, DEFAULT_EPSILON};
pub use category::StressCategory;
pub use feedback::{parse_helpfulness, parse_stress_check, ParsedRating};
pub use intervention::{Intervention, InterventionCategory};
pub use phase::ReliefPhase;

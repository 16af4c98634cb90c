pub mod filters;
pub mod milestones;

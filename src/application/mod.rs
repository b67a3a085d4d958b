pub mod use_cases;

pub use use_cases::cleaning::CleaningPlan;
pub use use_cases::sweep::SweepUseCase;

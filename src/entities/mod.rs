// Entity Models - in-memory registries for tournament data

pub mod athlete;
pub mod category;

pub use athlete::{Athlete, AthleteRegistry, Belt, Gender, RegistrySummary, COUNTRY_OPTIONS};
pub use category::{Category, CategoryKind, CategoryRegistry};

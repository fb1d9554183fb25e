pub mod aggregate;
pub mod division;
pub mod types;

pub use aggregate::build_climbers;
pub use division::{
    derive_divisions, normalize_category, normalize_gender, unique_categories, unique_genders,
    Division,
};
pub use types::{Climb, Climber, ClimberMap};

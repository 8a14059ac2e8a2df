pub mod descriptor;
pub mod eligibility;
pub mod markup;
pub mod srcset;

pub use descriptor::parse_descriptor;
pub use eligibility::EligibilityFilter;
pub use markup::{LayoutHints, build_markup};
pub use srcset::build_srcset;

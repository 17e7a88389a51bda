pub mod column;
pub mod error;
pub mod field_value;
pub mod ids;
pub mod input;
pub mod payload;
pub mod region;
pub mod wine;

pub use column::{Column, ColumnKind, title_case};
pub use error::CoreError;
pub use field_value::FieldValue;
pub use ids::*;
pub use payload::{Placement, WinePayload};
pub use region::RegionPath;
pub use wine::{Cellar, Cepage, GrapeMaster, WineRecord, cepage_abbreviations};

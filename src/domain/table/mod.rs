// ============================================================
// TABLE DOMAIN LAYER
// ============================================================
// Core tabular types shared by every pipeline stage
// No I/O, no async, no external dependencies

mod column;
#[allow(clippy::module_inception)]
mod table;
mod value;

pub use column::Column;
pub use table::{Table, TablePreview};
pub use value::{format_float, parse_number, Value, ValueKey, NA_TOKENS};

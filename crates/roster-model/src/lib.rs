pub mod normalize;
pub mod options;
pub mod report;
pub mod schema;
pub mod workbook;

pub use normalize::{
    MAX_PHASE_RANGE, cell_text, coerce_number, format_number, is_blank, normalize_list_value,
    parse_phase_list, parse_string_list,
};
pub use options::ValidationThresholds;
pub use report::{IssueSeverity, ValidationReport};
pub use schema::{ColumnSpec, DataType, EntityKind, EntitySchema, describe_schema, schema};
pub use workbook::{Row, Workbook, observed_columns};

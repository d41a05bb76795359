pub mod activity_logs;
pub mod audit;
pub mod companies;
pub mod people;
pub mod relationships;
pub mod users;

pub use activity_logs::ActivityLogService;
pub use companies::CompanyService;
pub use people::PersonService;
pub use relationships::RelationshipService;
pub use users::{seed_user, UserService};

use crate::database::ColumnSet;
use crate::validation::Field;

/// Copy a supplied text field into the column set; absent fields are skipped.
pub(crate) fn put_text(columns: &mut ColumnSet, column: &'static str, field: Field<String>) {
    match field {
        Field::Absent => {}
        Field::Null => {
            columns.text(column, None);
        }
        Field::Value(v) => {
            columns.text(column, Some(v));
        }
    }
}

pub(crate) fn put_int(columns: &mut ColumnSet, column: &'static str, field: Field<i32>) {
    match field {
        Field::Absent => {}
        Field::Null => {
            columns.int(column, None);
        }
        Field::Value(v) => {
            columns.int(column, Some(v));
        }
    }
}

pub mod activity_log;
pub mod assignment;
pub mod company;
pub mod person;
pub mod user;

pub use activity_log::{ActivityLogEntry, ActivityLogItem, ActivityLogRow};
pub use assignment::{Assignment, MembershipRow};
pub use company::{Company, CompanyRef};
pub use person::{AssignedPerson, Person, PersonCompany, PersonWithCompanies};
pub use user::{User, UserProfile};

/// Shared types used across the codebase

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Pipeline status of a company, in funnel order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompanyStatus {
    Backlog,
    ToContact,
    Contacted,
    WaitingResponse,
    InConversation,
    InProgress,
    Rejected,
    Hired,
}

impl CompanyStatus {
    pub const ALL: [CompanyStatus; 8] = [
        CompanyStatus::Backlog,
        CompanyStatus::ToContact,
        CompanyStatus::Contacted,
        CompanyStatus::WaitingResponse,
        CompanyStatus::InConversation,
        CompanyStatus::InProgress,
        CompanyStatus::Rejected,
        CompanyStatus::Hired,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CompanyStatus::Backlog => "BACKLOG",
            CompanyStatus::ToContact => "TO_CONTACT",
            CompanyStatus::Contacted => "CONTACTED",
            CompanyStatus::WaitingResponse => "WAITING_RESPONSE",
            CompanyStatus::InConversation => "IN_CONVERSATION",
            CompanyStatus::InProgress => "IN_PROGRESS",
            CompanyStatus::Rejected => "REJECTED",
            CompanyStatus::Hired => "HIRED",
        }
    }
}

impl Default for CompanyStatus {
    fn default() -> Self {
        CompanyStatus::Backlog
    }
}

/// Classification tag of a company
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompanyType {
    AgencyStudio,
    TechStartup,
    SoftwareCompany,
    Industry,
    Ecommerce,
    FreelanceCollective,
}

impl CompanyType {
    pub const ALL: [CompanyType; 6] = [
        CompanyType::AgencyStudio,
        CompanyType::TechStartup,
        CompanyType::SoftwareCompany,
        CompanyType::Industry,
        CompanyType::Ecommerce,
        CompanyType::FreelanceCollective,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CompanyType::AgencyStudio => "AGENCY_STUDIO",
            CompanyType::TechStartup => "TECH_STARTUP",
            CompanyType::SoftwareCompany => "SOFTWARE_COMPANY",
            CompanyType::Industry => "INDUSTRY",
            CompanyType::Ecommerce => "ECOMMERCE",
            CompanyType::FreelanceCollective => "FREELANCE_COLLECTIVE",
        }
    }
}

/// Raised when a stored or submitted value is not a member of an enumeration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{value}' is not a valid {kind}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! string_enum {
    ($ty:ty, $kind:literal) => {
        impl FromStr for $ty {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty>::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

string_enum!(CompanyStatus, "company status");
string_enum!(CompanyType, "company type");

/// Names of all variants, for validation messages
pub fn variant_names<T: fmt::Display>(all: &[T]) -> String {
    all.iter()
        .map(|v| format!("'{}'", v))
        .collect::<Vec<_>>()
        .join(" | ")
}

//! OCDS-style tender model.
//!
//! These structs are the wire contract of the API (camelCase JSON) and the
//! unit every tender store produces. Tenders are read-only once built.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// Error returned when a code string does not name any enum variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} code '{value}'")]
pub struct UnknownCode {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! define_code_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($kind:literal) {
            $( $(#[$vmeta:meta])* $variant:ident = $code:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The lowercase code used on the wire and in lookup tables.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $code ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownCode;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $code => Ok($name::$variant), )+
                    other => Err(UnknownCode {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

define_code_enum! {
    /// Lifecycle stage of a tender.
    TenderStatus ("status") {
        Planning = "planning",
        Tender = "tender",
        Award = "award",
        Contract = "contract",
        Implementation = "implementation",
        Complete = "complete",
    }
}

define_code_enum! {
    /// How suppliers are selected.
    ProcurementMethod ("procurement method") {
        Open = "open",
        Selective = "selective",
        Limited = "limited",
        Direct = "direct",
    }
}

define_code_enum! {
    /// Main object of the procurement.
    ProcurementCategory ("category") {
        Goods = "goods",
        Services = "services",
        Works = "works",
    }
}

impl TenderStatus {
    /// Whether an award decision exists at this stage.
    pub fn is_awarded(self) -> bool {
        !matches!(self, TenderStatus::Planning | TenderStatus::Tender)
    }

    /// Whether a contract has been signed at this stage.
    pub fn is_contracted(self) -> bool {
        matches!(
            self,
            TenderStatus::Contract | TenderStatus::Implementation | TenderStatus::Complete
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street_address: String,
    pub locality: String,
    pub region: String,
    pub postal_code: String,
    pub country_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPoint {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
}

/// The contracting authority that issued the tender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Buyer {
    pub id: String,
    pub name: String,
    pub identifier: String,
    pub contact_point: ContactPoint,
    pub address: Address,
}

/// An awarded participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: String,
    pub name: String,
    pub identifier: String,
    pub address: Address,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Value {
    pub amount: f64,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    pub start_date: Timestamp,
    pub end_date: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenderDates {
    pub published: Timestamp,
    pub tender_period: Period,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub award_date: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_date: Option<Timestamp>,
}

/// Common Procurement Vocabulary code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cpv {
    pub code: String,
    pub description: String,
}

impl Cpv {
    /// `"{code} - {description}"`, the label used in filter options.
    pub fn label(&self) -> String {
        format!("{} - {}", self.code, self.description)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub scheme: String,
    pub id: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub document_type: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub date_published: Timestamp,
    pub language: String,
}

/// A single procurement procedure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tender {
    pub id: String,
    /// Codice Identificativo Gara.
    pub cig: String,
    pub title: String,
    pub description: String,
    pub status: TenderStatus,
    pub buyer: Buyer,
    pub suppliers: Vec<Supplier>,
    pub value: Value,
    pub dates: TenderDates,
    pub cpv: Cpv,
    pub classification: Classification,
    pub documents: Vec<Document>,
    pub procurement_method: ProcurementMethod,
    pub main_procurement_category: ProcurementCategory,
    pub eligibility_criteria: String,
    pub award_criteria: String,
    pub submission_method: Vec<String>,
    pub submission_method_details: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enquiry_period: Option<Period>,
    pub has_enquiries: bool,
    pub number_of_tenderers: i64,
}

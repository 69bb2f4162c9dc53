use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single funding contribution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Funder {
    /// Server-assigned identifier, never reused
    pub id: u64,
    /// Address the contribution came from (not validated)
    pub address: String,
    /// Always true once stored
    pub funded: bool,
    /// UTC timestamp taken when the record was created
    #[serde(rename = "date")]
    pub date_funded: String,
    /// Amount in the smallest unit of an 18-decimal currency
    pub amount: u64,
}

/// Request body for creating a funder.
///
/// `id`, `funded` and `date` are accepted so existing clients keep working,
/// but the server always assigns them itself.
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct NewFunder {
    pub address: String,
    pub amount: u64,
    pub id: Option<u64>,
    pub funded: Option<bool>,
    pub date: Option<String>,
}

impl NewFunder {
    pub fn into_funder(self, id: u64, date_funded: String) -> Funder {
        Funder {
            id,
            address: self.address,
            funded: true,
            date_funded,
            amount: self.amount,
        }
    }
}

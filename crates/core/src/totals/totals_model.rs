use serde::{Deserialize, Serialize};

/// Location whose counts feed the `HuYao` column.
pub const LOCATION_HU_YAO: &str = "HuYao";
/// Location whose counts feed the `GDL` column.
pub const LOCATION_GDL: &str = "GDL";

/// One derived aggregate row, keyed by (name, model). Rows are provisioned
/// out of band and only ever overwritten by recalculation; the wire field
/// names match the historical column names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Total {
    pub name: String,
    pub model: String,
    #[serde(rename = "receivedcount")]
    pub received_count: i32,
    #[serde(rename = "HuYao")]
    pub hu_yao: i32,
    #[serde(rename = "GDL")]
    pub gdl: i32,
    #[serde(rename = "NaQing")]
    pub na_qing: i32,
}

/// Ledger sums feeding one totals row. `received_count` is scoped by name
/// and model while the location sums are scoped by name alone; the residual
/// inherits that asymmetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerSums {
    pub received_count: i64,
    pub hu_yao: i64,
    pub gdl: i64,
}

impl LedgerSums {
    /// Residual count not attributed to either named location. Not floored
    /// at zero: a name spread over several models and locations can drive
    /// this negative.
    pub fn na_qing(&self) -> i64 {
        self.received_count - self.hu_yao - self.gdl
    }
}

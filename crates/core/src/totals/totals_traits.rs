use async_trait::async_trait;

use crate::errors::Result;

use super::Total;

/// Persistence operations for the derived totals table.
#[async_trait]
pub trait TotalRepositoryTrait: Send + Sync {
    fn load_totals(&self) -> Result<Vec<Total>>;

    /// Recomputes and overwrites the four derived fields of the (name,
    /// model) row from the current ledger. A pair with no totals row is a
    /// no-op, not an error.
    async fn recalculate_pair(&self, name: &str, model: &str) -> Result<()>;

    /// Recomputes every existing totals row.
    async fn recalculate_all(&self) -> Result<()>;
}

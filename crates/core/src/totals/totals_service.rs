use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use crate::errors::Result;

use super::{Total, TotalRepositoryTrait};

/// Read and recalculation operations over the derived totals table.
#[async_trait]
pub trait TotalServiceTrait: Send + Sync {
    fn get_totals(&self) -> Result<Vec<Total>>;

    async fn recalculate_for(&self, name: &str, model: &str) -> Result<()>;

    async fn recalculate_all(&self) -> Result<()>;
}

pub struct TotalService {
    total_repository: Arc<dyn TotalRepositoryTrait>,
}

impl TotalService {
    pub fn new(total_repository: Arc<dyn TotalRepositoryTrait>) -> Self {
        Self { total_repository }
    }
}

#[async_trait]
impl TotalServiceTrait for TotalService {
    fn get_totals(&self) -> Result<Vec<Total>> {
        self.total_repository.load_totals()
    }

    async fn recalculate_for(&self, name: &str, model: &str) -> Result<()> {
        debug!("Recalculating totals for {} {}", name, model);
        self.total_repository.recalculate_pair(name, model).await
    }

    async fn recalculate_all(&self) -> Result<()> {
        debug!("Recalculating all totals");
        self.total_repository.recalculate_all().await
    }
}

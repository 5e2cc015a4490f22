//! Business logic services

pub mod equipment_types;
pub mod floors;
pub mod reports;
pub mod segments;
pub mod utilization;

use std::sync::Arc;

use crate::{clock::Clock, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub floors: floors::FloorsService,
    pub equipment_types: equipment_types::EquipmentTypesService,
    pub utilization: utilization::UtilizationService,
    pub reports: reports::ReportsService,
    repository: Repository,
}

impl Services {
    /// Create all services over one repository and clock
    pub fn new(repository: Repository, clock: Arc<dyn Clock>) -> Self {
        Self {
            floors: floors::FloorsService::new(repository.clone()),
            equipment_types: equipment_types::EquipmentTypesService::new(repository.clone()),
            utilization: utilization::UtilizationService::new(repository.clone(), clock.clone()),
            reports: reports::ReportsService::new(repository.clone(), clock),
            repository,
        }
    }

    /// Database readiness
    pub async fn ping(&self) -> crate::error::AppResult<()> {
        self.repository.ping().await
    }
}

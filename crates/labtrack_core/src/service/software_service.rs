//! Installed software use-case service.

use super::common::{fetch_all, merge_json, Page};
use super::error::{ServiceError, ServiceResult};
use crate::filter::{RecordFilter, SoftwareFilter};
use crate::model::software::{Software, SoftwareId};
use crate::repo::software_repo::SoftwareRepository;
use serde_json::Value;

pub struct SoftwareService<R: SoftwareRepository> {
    repo: R,
}

impl<R: SoftwareRepository> SoftwareService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_software(&self, body: Value) -> ServiceResult<Software> {
        let mut software: Software = merge_json(&Software::default(), body)?;
        software.normalize();
        let id = self.repo.create_software(&software)?;
        self.get_software(id)
    }

    pub fn get_software(&self, id: SoftwareId) -> ServiceResult<Software> {
        self.repo.get_software(id)?.ok_or(ServiceError::NotFound {
            entity: "software",
            id,
        })
    }

    pub fn update_software(&self, id: SoftwareId, body: Value) -> ServiceResult<Software> {
        let current = self.get_software(id)?;
        let mut software = merge_json(&current, body)?;
        software.normalize();
        self.repo.update_software(&software)?;
        self.get_software(id)
    }

    pub fn delete_software(&self, id: SoftwareId) -> ServiceResult<()> {
        Ok(self.repo.delete_software(id)?)
    }

    pub fn list_software(
        &self,
        filter: &SoftwareFilter,
        page: Page,
    ) -> ServiceResult<Vec<Software>> {
        let items = fetch_all(filter.lab_id, |query| self.repo.list_software(query))?;
        Ok(page.apply(filter.apply(items)))
    }
}

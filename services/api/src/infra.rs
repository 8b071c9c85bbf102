use metrics_exporter_prometheus::PrometheusHandle;
use privilege_portal::catalog::{
    InMemoryPrivilegeRepository, InMemoryStaffRepository, InMemoryStudentRepository,
    PrivilegePortalService, RosterImporter, SeedData, StaffDirectoryService, StaffMember,
};
use privilege_portal::config::CatalogConfig;
use privilege_portal::error::AppError;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

pub(crate) type PortalService =
    PrivilegePortalService<InMemoryPrivilegeRepository, InMemoryStudentRepository>;
pub(crate) type StaffService = StaffDirectoryService<InMemoryStaffRepository>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Seed file (or the built-in sample) with the roster export merged over its students.
pub(crate) fn load_catalog(config: &CatalogConfig) -> Result<SeedData, AppError> {
    let mut seed = match &config.seed_path {
        Some(path) => {
            let seed = SeedData::from_path(path)?;
            info!(path = %path.display(), privileges = seed.privileges.len(), "seed loaded");
            seed
        }
        None => SeedData::standard(),
    };

    if let Some(path) = &config.roster_path {
        let students = RosterImporter::from_path(path)?;
        info!(path = %path.display(), students = students.len(), "roster merged");
        seed.merge_students(students);
    }

    Ok(seed)
}

pub(crate) fn portal_service(seed: SeedData) -> Arc<PortalService> {
    Arc::new(PrivilegePortalService::new(
        Arc::new(InMemoryPrivilegeRepository::with_privileges(seed.privileges)),
        Arc::new(InMemoryStudentRepository::with_students(seed.students)),
    ))
}

pub(crate) fn staff_directory(staff: Vec<StaffMember>) -> Arc<StaffService> {
    Arc::new(StaffDirectoryService::new(Arc::new(
        InMemoryStaffRepository::with_staff(staff),
    )))
}

use crate::infra::{load_catalog, portal_service};
use clap::Args;
use privilege_portal::catalog::{PrivilegeId, StudentDashboard, StudentSummary};
use privilege_portal::config::CatalogConfig;
use privilege_portal::eligibility::StudentId;
use privilege_portal::error::AppError;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct CatalogArgs {
    /// JSON seed file with privileges and students (defaults to the sample catalog)
    #[arg(long)]
    pub(crate) seed: Option<PathBuf>,
    /// Registrar CSV export merged over the seed's students
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
}

impl CatalogArgs {
    fn into_config(self) -> CatalogConfig {
        CatalogConfig {
            seed_path: self.seed,
            roster_path: self.roster,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct DashboardArgs {
    /// Student id as issued by the registrar
    #[arg(long)]
    pub(crate) student: String,
    #[command(flatten)]
    pub(crate) catalog: CatalogArgs,
}

#[derive(Args, Debug)]
pub(crate) struct QualifyArgs {
    /// Privilege id from the catalog
    #[arg(long)]
    pub(crate) privilege: u32,
    #[command(flatten)]
    pub(crate) catalog: CatalogArgs,
}

pub(crate) fn run_dashboard(args: DashboardArgs) -> Result<(), AppError> {
    let service = portal_service(load_catalog(&args.catalog.into_config())?);
    let dashboard = service.dashboard(&StudentId(args.student))?;
    print!("{}", render_dashboard(&dashboard));
    Ok(())
}

pub(crate) fn run_qualify(args: QualifyArgs) -> Result<(), AppError> {
    let service = portal_service(load_catalog(&args.catalog.into_config())?);
    let id = PrivilegeId(args.privilege);
    let privilege = service.get_privilege(id)?;
    let students = service.qualified_students(id)?;
    print!("{}", render_qualifiers(&privilege.title, &students));
    Ok(())
}

pub(crate) fn render_dashboard(dashboard: &StudentDashboard) -> String {
    let student = &dashboard.student;
    let mut out = format!(
        "{} ({}) - {}, year {}, GPAX {:.2}\n",
        student.name, student.id, student.faculty, student.study_year, student.gpax
    );

    out.push_str(&format!("\nAchieved ({})\n", dashboard.achieved.len()));
    for privilege in &dashboard.achieved {
        out.push_str(&format!(
            "  [{}] {} - {}\n",
            privilege.id, privilege.title, privilege.reward
        ));
    }

    out.push_str(&format!(
        "\nNearly achieved ({})\n",
        dashboard.nearly_achieved.len()
    ));
    for near in &dashboard.nearly_achieved {
        out.push_str(&format!(
            "  [{}] {} - {}\n",
            near.privilege.id, near.privilege.title, near.reason
        ));
    }

    out.push_str(&format!(
        "\nNot yet available ({})\n",
        dashboard.not_achieved.len()
    ));
    for privilege in &dashboard.not_achieved {
        out.push_str(&format!("  [{}] {}\n", privilege.id, privilege.title));
    }
    out
}

pub(crate) fn render_qualifiers(title: &str, students: &[StudentSummary]) -> String {
    let mut out = format!("{}: {} qualified student(s)\n", title, students.len());
    for student in students {
        out.push_str(&format!(
            "  {}  {:<24} year {}  GPAX {:.2}\n",
            student.id, student.name, student.study_year, student.gpax
        ));
    }
    out
}

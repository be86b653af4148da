//! `models`: show or change the role to model bindings.

use crate::domain::{ModelAssignment, ModelRole, ModelsDomain};
use crate::errors::TasksResult;
use crate::ui;

use super::CommandContext;

#[derive(Debug, Clone, Default)]
pub struct ModelsOptions {
    pub set_main: Option<String>,
    pub set_research: Option<String>,
    pub set_fallback: Option<String>,
}

impl ModelsOptions {
    /// Requested assignments in the order they are applied
    fn requested(&self) -> Vec<(ModelRole, &str)> {
        [
            (ModelRole::Main, self.set_main.as_deref()),
            (ModelRole::Research, self.set_research.as_deref()),
            (ModelRole::Fallback, self.set_fallback.as_deref()),
        ]
        .into_iter()
        .filter_map(|(role, id)| id.map(|id| (role, id)))
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelsOutcome {
    /// The catalog table was printed
    Listed,
    Assigned(Vec<ModelAssignment>),
}

pub async fn models(ctx: &CommandContext, options: &ModelsOptions) -> TasksResult<ModelsOutcome> {
    let domain = ModelsDomain::new(ctx.project_root());
    run(&domain, options).await
}

/// Apply the requested assignments, or print the table when there are none.
///
/// The first failed assignment stops the rest.
pub(crate) async fn run(
    domain: &ModelsDomain,
    options: &ModelsOptions,
) -> TasksResult<ModelsOutcome> {
    let requested = options.requested();

    if requested.is_empty() {
        if domain.catalog().is_empty() {
            ui::print_warning("No models defined in configuration.");
        } else {
            let config = domain.current().await;
            println!("{}", ui::models_table(domain.catalog(), &config));
        }
        return Ok(ModelsOutcome::Listed);
    }

    let mut assignments = Vec::with_capacity(requested.len());
    for (role, model_id) in requested {
        let assignment = domain.set_model(role, model_id).await?;
        ui::print_success(&assignment.message());
        assignments.push(assignment);
    }

    Ok(ModelsOutcome::Assigned(assignments))
}

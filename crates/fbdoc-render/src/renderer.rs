//! Page rendering into the output directory

use std::collections::BTreeMap;
use std::path::PathBuf;

use minijinja::{context, Environment};

use fbdoc_core::{Procedure, ProceduresSummary, Table, TablesSummary};

/// Errors during rendering
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// HTML renderer over embedded templates
///
/// One overview page per entity kind plus one page per procedure and per
/// table. The dependency tree is rendered recursively by the procedure
/// template.
pub struct DocRenderer {
    env: Environment<'static>,
    output_dir: PathBuf,
}

impl DocRenderer {
    /// Create a renderer writing into the given directory
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self, RenderError> {
        let mut env = Environment::new();
        env.add_template("index.html", include_str!("../templates/index.html"))?;
        env.add_template("procedures.html", include_str!("../templates/procedures.html"))?;
        env.add_template("procedure.html", include_str!("../templates/procedure.html"))?;
        env.add_template("tables.html", include_str!("../templates/tables.html"))?;
        env.add_template("table.html", include_str!("../templates/table.html"))?;

        Ok(Self {
            env,
            output_dir: output_dir.into(),
        })
    }

    /// Render one template to a string
    pub fn render_to_string(
        &self,
        template: &str,
        ctx: minijinja::Value,
    ) -> Result<String, RenderError> {
        let template = self.env.get_template(template)?;
        Ok(template.render(ctx)?)
    }

    fn render_to_file(
        &self,
        template: &str,
        output_file: &str,
        ctx: minijinja::Value,
    ) -> Result<(), RenderError> {
        let output = self.render_to_string(template, ctx)?;
        std::fs::create_dir_all(&self.output_dir)?;
        std::fs::write(self.output_dir.join(output_file), output)?;
        Ok(())
    }

    /// Render the landing page
    pub fn render_index(&self) -> Result<(), RenderError> {
        self.render_to_file("index.html", "index.html", context! {})
    }

    /// Render the procedure overview page
    pub fn render_procedures(
        &self,
        summary: &ProceduresSummary,
        procedures: &BTreeMap<String, Procedure>,
    ) -> Result<(), RenderError> {
        self.render_to_file(
            "procedures.html",
            "procedures.html",
            context! { summary, procedures },
        )
    }

    /// Render one procedure page
    pub fn render_procedure(&self, procedure: &Procedure) -> Result<(), RenderError> {
        self.render_to_file(
            "procedure.html",
            &format!("procedure-{}.html", procedure.name),
            context! { procedure },
        )
    }

    /// Render the table overview page
    pub fn render_tables(
        &self,
        summary: &TablesSummary,
        tables: &[Table],
    ) -> Result<(), RenderError> {
        self.render_to_file("tables.html", "tables.html", context! { summary, tables })
    }

    /// Render one table page
    pub fn render_table(&self, table: &Table) -> Result<(), RenderError> {
        self.render_to_file(
            "table.html",
            &format!("table-{}.html", table.name),
            context! { table },
        )
    }

    /// Render the full page set for one run
    pub fn render_all(
        &self,
        summary: &ProceduresSummary,
        procedures: &BTreeMap<String, Procedure>,
        tables_summary: &TablesSummary,
        tables: &[Table],
    ) -> Result<(), RenderError> {
        self.render_index()?;
        self.render_procedures(summary, procedures)?;
        self.render_tables(tables_summary, tables)?;

        for procedure in procedures.values() {
            self.render_procedure(procedure)?;
        }

        for table in tables {
            self.render_table(table)?;
        }

        Ok(())
    }
}

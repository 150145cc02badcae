//! Firebird catalog reader over the RDB$ system tables
//!
//! Queries RDB$PROCEDURES, RDB$PROCEDURE_PARAMETERS, RDB$DEPENDENCIES,
//! RDB$RELATIONS and RDB$RELATION_FIELDS for the metadata the documentation
//! needs. System relations and views are filtered out of the table queries.
//!
//! Firebird returns CHAR identifiers padded with trailing spaces; every name
//! column is trimmed before it leaves this module.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut catalog = FirebirdCatalog::connect(&config.connection)?;
//! let rows = catalog.procedures()?;
//! ```

use crate::reader::{CatalogError, CatalogReader};
use crate::rows::{FieldRow, ProcedureDependencyRow, ProcedureParameterRow, ProcedureRow, TableRow};
use fbdoc_core::ConnectionConfig;

#[cfg(feature = "firebird")]
use rsfbclient::{charset, Queryable, SimpleConnection};

/// Firebird catalog reader
///
/// Only available with the `firebird` feature; without it the constructors
/// return a configuration error.
pub struct FirebirdCatalog {
    /// Firebird connection (only available with the firebird feature)
    #[cfg(feature = "firebird")]
    conn: SimpleConnection,

    /// Database path or alias, kept for query logging
    database: String,

    /// Placeholder for when the feature is disabled
    #[cfg(not(feature = "firebird"))]
    _phantom: std::marker::PhantomData<()>,
}

impl FirebirdCatalog {
    /// Connect to a Firebird server with the given connection settings
    #[cfg(feature = "firebird")]
    pub fn connect(config: &ConnectionConfig) -> Result<Self, CatalogError> {
        let charset = charset_from_name(&config.charset)?;

        let conn = rsfbclient::builder_pure_rust()
            .host(&config.host)
            .port(config.port)
            .db_name(&config.database)
            .user(&config.user)
            .pass(&config.password)
            .charset(charset)
            .connect()
            .map_err(|e| {
                CatalogError::AuthenticationError(format!(
                    "Failed to connect to Firebird at {}:{}: {}",
                    config.host, config.port, e
                ))
            })?;

        Ok(Self {
            conn: conn.into(),
            database: config.database.clone(),
        })
    }

    /// Create a reader without the firebird feature (returns an error)
    #[cfg(not(feature = "firebird"))]
    pub fn connect(_config: &ConnectionConfig) -> Result<Self, CatalogError> {
        Err(CatalogError::ConfigError(
            "Firebird support not compiled. Rebuild with: cargo build --features firebird"
                .to_string(),
        ))
    }

    #[cfg(feature = "firebird")]
    fn count(&mut self, sql: &str) -> Result<usize, CatalogError> {
        tracing::debug!(database = %self.database, sql, "executing count query");

        let rows: Vec<(i64,)> = self
            .conn
            .query(sql, ())
            .map_err(|e| CatalogError::QueryError(e.to_string()))?;

        Ok(rows.first().map(|row| row.0).unwrap_or(0) as usize)
    }
}

/// Trim the trailing spaces Firebird pads CHAR identifiers with
#[cfg(feature = "firebird")]
fn normalized(source: &str) -> String {
    source.trim().to_string()
}

#[cfg(feature = "firebird")]
fn normalized_opt(source: Option<String>) -> Option<String> {
    source.map(|s| s.trim().to_string())
}

/// Map a configured charset name onto an rsfbclient charset
#[cfg(feature = "firebird")]
fn charset_from_name(name: &str) -> Result<charset::Charset, CatalogError> {
    match name.to_uppercase().as_str() {
        "UTF8" | "UTF-8" => Ok(charset::UTF_8),
        "ISO8859_1" => Ok(charset::ISO_8859_1),
        "WIN1251" => Ok(charset::WIN_1251),
        "WIN1252" => Ok(charset::WIN_1252),
        other => Err(CatalogError::ConfigError(format!(
            "Unsupported connection charset: {}",
            other
        ))),
    }
}

#[cfg(not(feature = "firebird"))]
impl CatalogReader for FirebirdCatalog {
    fn name(&self) -> &'static str {
        "Firebird"
    }

    fn test_connection(&mut self) -> Result<(), CatalogError> {
        Err(disabled())
    }

    fn procedure_count(&mut self) -> Result<usize, CatalogError> {
        Err(disabled())
    }

    fn described_procedure_count(&mut self) -> Result<usize, CatalogError> {
        Err(disabled())
    }

    fn table_count(&mut self) -> Result<usize, CatalogError> {
        Err(disabled())
    }

    fn described_table_count(&mut self) -> Result<usize, CatalogError> {
        Err(disabled())
    }

    fn procedures(&mut self) -> Result<Vec<ProcedureRow>, CatalogError> {
        Err(disabled())
    }

    fn procedure_parameters(&mut self) -> Result<Vec<ProcedureParameterRow>, CatalogError> {
        Err(disabled())
    }

    fn procedure_dependencies(&mut self) -> Result<Vec<ProcedureDependencyRow>, CatalogError> {
        Err(disabled())
    }

    fn tables(&mut self) -> Result<Vec<TableRow>, CatalogError> {
        Err(disabled())
    }

    fn fields(&mut self) -> Result<Vec<FieldRow>, CatalogError> {
        Err(disabled())
    }
}

#[cfg(not(feature = "firebird"))]
fn disabled() -> CatalogError {
    CatalogError::ConfigError(
        "Firebird support not compiled. Rebuild with: cargo build --features firebird".to_string(),
    )
}

#[cfg(feature = "firebird")]
impl CatalogReader for FirebirdCatalog {
    fn name(&self) -> &'static str {
        "Firebird"
    }

    fn test_connection(&mut self) -> Result<(), CatalogError> {
        self.conn
            .query::<(), (i32,)>("select 1 from RDB$DATABASE", ())
            .map_err(|e| CatalogError::ConnectionError(format!("Connection test failed: {}", e)))?;
        Ok(())
    }

    fn procedure_count(&mut self) -> Result<usize, CatalogError> {
        self.count("select count(*) from RDB$PROCEDURES")
    }

    fn described_procedure_count(&mut self) -> Result<usize, CatalogError> {
        self.count("select count(*) from RDB$PROCEDURES where RDB$DESCRIPTION is not null")
    }

    fn table_count(&mut self) -> Result<usize, CatalogError> {
        self.count(
            "select count(*) from RDB$RELATIONS \
             where RDB$VIEW_BLR is null \
             and (RDB$SYSTEM_FLAG is null or RDB$SYSTEM_FLAG = 0)",
        )
    }

    fn described_table_count(&mut self) -> Result<usize, CatalogError> {
        self.count(
            "select count(*) from RDB$RELATIONS \
             where RDB$VIEW_BLR is null \
             and (RDB$SYSTEM_FLAG is null or RDB$SYSTEM_FLAG = 0) \
             and RDB$DESCRIPTION is not null",
        )
    }

    fn procedures(&mut self) -> Result<Vec<ProcedureRow>, CatalogError> {
        let sql = "select \
                       pr.RDB$PROCEDURE_NAME, \
                       pr.RDB$DESCRIPTION, \
                       pr.RDB$PROCEDURE_SOURCE \
                   from RDB$PROCEDURES pr";
        tracing::debug!(database = %self.database, "fetching procedures");

        let rows: Vec<(String, Option<String>, Option<String>)> = self
            .conn
            .query(sql, ())
            .map_err(|e| CatalogError::QueryError(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(name, description, source)| ProcedureRow {
                name: normalized(&name),
                description,
                source,
            })
            .collect())
    }

    fn procedure_parameters(&mut self) -> Result<Vec<ProcedureParameterRow>, CatalogError> {
        let sql = "select distinct \
                       pr.RDB$PROCEDURE_NAME, \
                       pp.RDB$PARAMETER_NAME, \
                       cast(pp.RDB$PARAMETER_TYPE as integer), \
                       pd.RDB$FIELD_NAME \
                   from RDB$PROCEDURES pr \
                   left join RDB$PROCEDURE_PARAMETERS pp \
                       on pp.RDB$PROCEDURE_NAME = pr.RDB$PROCEDURE_NAME \
                   left join RDB$DEPENDENCIES pd \
                       on pd.RDB$DEPENDED_ON_NAME = pr.RDB$PROCEDURE_NAME \
                       and pd.RDB$FIELD_NAME = pp.RDB$PARAMETER_NAME \
                   where pp.RDB$PARAMETER_TYPE is not null";
        tracing::debug!(database = %self.database, "fetching procedure parameters");

        let rows: Vec<(String, String, i32, Option<String>)> = self
            .conn
            .query(sql, ())
            .map_err(|e| CatalogError::QueryError(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(
                |(procedure_name, name, direction, dependency_field)| ProcedureParameterRow {
                    procedure_name: normalized(&procedure_name),
                    name: normalized(&name),
                    direction,
                    dependency_field: normalized_opt(dependency_field),
                },
            )
            .collect())
    }

    fn procedure_dependencies(&mut self) -> Result<Vec<ProcedureDependencyRow>, CatalogError> {
        let sql = "select \
                       dp.RDB$DEPENDENT_NAME, \
                       dp.RDB$DEPENDED_ON_NAME, \
                       cast(dp.RDB$DEPENDED_ON_TYPE as integer), \
                       dp.RDB$FIELD_NAME \
                   from RDB$DEPENDENCIES dp \
                   where dp.RDB$DEPENDENT_TYPE = 5 \
                   and dp.RDB$DEPENDED_ON_TYPE in (0, 2, 5, 15) \
                   and dp.RDB$FIELD_NAME is null";
        tracing::debug!(database = %self.database, "fetching procedure dependencies");

        let rows: Vec<(String, String, i32, Option<String>)> = self
            .conn
            .query(sql, ())
            .map_err(|e| CatalogError::QueryError(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(procedure_name, name, kind, field)| ProcedureDependencyRow {
                procedure_name: normalized(&procedure_name),
                name: normalized(&name),
                kind,
                field: normalized_opt(field),
            })
            .collect())
    }

    fn tables(&mut self) -> Result<Vec<TableRow>, CatalogError> {
        let sql = "select RDB$RELATION_NAME, RDB$DESCRIPTION \
                   from RDB$RELATIONS \
                   where RDB$VIEW_BLR is null \
                   and (RDB$SYSTEM_FLAG is null or RDB$SYSTEM_FLAG = 0)";
        tracing::debug!(database = %self.database, "fetching tables");

        let rows: Vec<(String, Option<String>)> = self
            .conn
            .query(sql, ())
            .map_err(|e| CatalogError::QueryError(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(name, description)| TableRow {
                name: normalized(&name),
                description,
            })
            .collect())
    }

    fn fields(&mut self) -> Result<Vec<FieldRow>, CatalogError> {
        let sql = "select \
                       r.RDB$RELATION_NAME, \
                       rf.RDB$FIELD_NAME, \
                       rf.RDB$DESCRIPTION, \
                       cast(f.RDB$FIELD_TYPE as integer), \
                       cast(f.RDB$FIELD_LENGTH as integer) \
                   from RDB$RELATIONS r \
                   left join RDB$RELATION_FIELDS rf \
                       on r.RDB$RELATION_NAME = rf.RDB$RELATION_NAME \
                   left join RDB$FIELDS f \
                       on f.RDB$FIELD_NAME = rf.RDB$FIELD_SOURCE \
                   where r.RDB$VIEW_BLR is null \
                   and (r.RDB$SYSTEM_FLAG is null or r.RDB$SYSTEM_FLAG = 0) \
                   order by rf.RDB$FIELD_POSITION";
        tracing::debug!(database = %self.database, "fetching table fields");

        let rows: Vec<(String, Option<String>, Option<String>, Option<i32>, Option<i32>)> = self
            .conn
            .query(sql, ())
            .map_err(|e| CatalogError::QueryError(e.to_string()))?;

        Ok(rows
            .into_iter()
            // A table with no fields produces a row with a null field name;
            // it simply contributes no fields.
            .filter_map(|(table_name, name, description, type_code, length)| {
                name.map(|name| FieldRow {
                    table_name: normalized(&table_name),
                    name: normalized(&name),
                    type_code,
                    length,
                    description,
                })
            })
            .collect())
    }
}

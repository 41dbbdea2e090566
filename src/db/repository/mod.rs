//! Data-access layer: one module per entity.
//!
//! All functions operate on a caller-provided [`rusqlite::Connection`]
//! acquired for exactly one operation. Business failures (not-found,
//! validation, conflict) are raised as typed `ServiceError`s; any other
//! store failure converts into the database-error kind with the raw
//! message attached for server-side logging.

pub mod consulta;
pub mod medicamento;
pub mod paciente;
pub mod prescricao;
pub mod profissional;
pub mod usuario;

use rusqlite::{Connection, ToSql};

use crate::errors::ServiceError;

/// Apply a partial update built from `(column, value)` pairs, also
/// refreshing `atualizado_em`. Returns false when no field was supplied,
/// in which case nothing is written.
fn aplicar_patch(
    conn: &Connection,
    tabela: &str,
    id: i64,
    campos: Vec<(&str, Box<dyn ToSql>)>,
) -> Result<bool, ServiceError> {
    if campos.is_empty() {
        return Ok(false);
    }

    let mut sets: Vec<String> = Vec::with_capacity(campos.len() + 1);
    let mut valores: Vec<Box<dyn ToSql>> = Vec::with_capacity(campos.len() + 1);
    for (coluna, valor) in campos {
        sets.push(format!("{} = ?{}", coluna, sets.len() + 1));
        valores.push(valor);
    }
    sets.push("atualizado_em = datetime('now')".to_string());
    valores.push(Box::new(id));

    let sql = format!(
        "UPDATE {} SET {} WHERE id = ?{}",
        tabela,
        sets.join(", "),
        valores.len()
    );
    let params: Vec<&dyn ToSql> = valores.iter().map(|v| v.as_ref()).collect();
    conn.execute(&sql, &params[..])?;
    Ok(true)
}

#[cfg(test)]
pub(crate) fn test_connection() -> (Connection, tempfile::TempDir) {
    let tmp = tempfile::tempdir().unwrap();
    let conn = crate::db::sqlite::open_database(&tmp.path().join("test.db")).unwrap();
    (conn, tmp)
}

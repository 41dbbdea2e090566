//! Prescricao data access. Prescriptions hang off a consultation and
//! reference a medication from the catalog.

use rusqlite::{params, Connection, OptionalExtension, ToSql};

use crate::errors::ServiceError;
use crate::models::{AtualizaPrescricao, NovaPrescricao, Prescricao};
use crate::validation;

fn mapear_prescricao(row: &rusqlite::Row<'_>) -> rusqlite::Result<Prescricao> {
    Ok(Prescricao {
        id: row.get(0)?,
        consulta_id: row.get(1)?,
        medicamento_id: row.get(2)?,
        duracao: row.get(3)?,
        instrucoes: row.get(4)?,
        criado_em: row.get(5)?,
        atualizado_em: row.get(6)?,
    })
}

const COLUNAS: &str =
    "id, consulta_id, medicamento_id, duracao, instrucoes, criado_em, atualizado_em";

pub fn criar_prescricao(
    conn: &Connection,
    nova: &NovaPrescricao,
) -> Result<Prescricao, ServiceError> {
    validation::validar_campos_obrigatorios(&[
        ("consulta_id", validation::presente_id(nova.consulta_id)),
        ("medicamento_id", validation::presente_id(nova.medicamento_id)),
    ])?;

    conn.execute(
        "INSERT INTO prescricoes (consulta_id, medicamento_id, duracao, instrucoes)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            nova.consulta_id,
            nova.medicamento_id,
            nova.duracao,
            nova.instrucoes,
        ],
    )?;
    let prescricao_id = conn.last_insert_rowid();

    tracing::info!(prescricao_id, "prescricao created");
    obter_prescricao_por_id(conn, prescricao_id)
}

pub fn listar_prescricoes(
    conn: &Connection,
    limite: i64,
    offset: i64,
) -> Result<Vec<Prescricao>, ServiceError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUNAS} FROM prescricoes LIMIT ?1 OFFSET ?2"
    ))?;
    let prescricoes = stmt
        .query_map(params![limite, offset], mapear_prescricao)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(prescricoes)
}

pub fn contar_prescricoes(conn: &Connection) -> Result<i64, ServiceError> {
    let total = conn.query_row("SELECT COUNT(*) FROM prescricoes", [], |row| row.get(0))?;
    Ok(total)
}

pub fn listar_prescricoes_por_consulta(
    conn: &Connection,
    consulta_id: i64,
    limite: i64,
    offset: i64,
) -> Result<Vec<Prescricao>, ServiceError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUNAS} FROM prescricoes WHERE consulta_id = ?1 LIMIT ?2 OFFSET ?3"
    ))?;
    let prescricoes = stmt
        .query_map(params![consulta_id, limite, offset], mapear_prescricao)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(prescricoes)
}

pub fn contar_prescricoes_por_consulta(
    conn: &Connection,
    consulta_id: i64,
) -> Result<i64, ServiceError> {
    let total = conn.query_row(
        "SELECT COUNT(*) FROM prescricoes WHERE consulta_id = ?1",
        params![consulta_id],
        |row| row.get(0),
    )?;
    Ok(total)
}

pub fn obter_prescricao_por_id(
    conn: &Connection,
    prescricao_id: i64,
) -> Result<Prescricao, ServiceError> {
    conn.query_row(
        &format!("SELECT {COLUNAS} FROM prescricoes WHERE id = ?1"),
        params![prescricao_id],
        mapear_prescricao,
    )
    .optional()?
    .ok_or_else(|| ServiceError::NotFound("Prescricao not found".into()))
}

pub fn atualizar_prescricao(
    conn: &Connection,
    prescricao_id: i64,
    patch: &AtualizaPrescricao,
) -> Result<Prescricao, ServiceError> {
    obter_prescricao_por_id(conn, prescricao_id)?;

    let mut campos: Vec<(&str, Box<dyn ToSql>)> = Vec::new();
    if let Some(duracao) = patch.duracao.clone() {
        campos.push(("duracao", Box::new(duracao)));
    }
    if let Some(instrucoes) = patch.instrucoes.clone() {
        campos.push(("instrucoes", Box::new(instrucoes)));
    }

    if super::aplicar_patch(conn, "prescricoes", prescricao_id, campos)? {
        tracing::info!(prescricao_id, "prescricao updated");
    }
    obter_prescricao_por_id(conn, prescricao_id)
}

pub fn deletar_prescricao(conn: &Connection, prescricao_id: i64) -> Result<(), ServiceError> {
    obter_prescricao_por_id(conn, prescricao_id)?;
    conn.execute(
        "DELETE FROM prescricoes WHERE id = ?1",
        params![prescricao_id],
    )?;
    tracing::info!(prescricao_id, "prescricao deleted");
    Ok(())
}

//! Consulta data access. Listings are ordered by consultation date,
//! most recent first, and can be narrowed to a single patient.

use rusqlite::{params, Connection, OptionalExtension, ToSql};

use crate::errors::ServiceError;
use crate::models::{AtualizaConsulta, Consulta, NovaConsulta, TIPO_PRESENCIAL, TIPO_TELEMEDICINA};
use crate::validation::{self, FORMATO_DATA_HORA};

fn mapear_consulta(row: &rusqlite::Row<'_>) -> rusqlite::Result<Consulta> {
    Ok(Consulta {
        id: row.get(0)?,
        paciente_id: row.get(1)?,
        profissional_id: row.get(2)?,
        data: row.get(3)?,
        motivo: row.get(4)?,
        observacoes: row.get(5)?,
        tipo_consulta: row.get(6)?,
        link_video: row.get(7)?,
        criado_em: row.get(8)?,
        atualizado_em: row.get(9)?,
    })
}

const COLUNAS: &str = "id, paciente_id, profissional_id, data, motivo, observacoes, \
                       tipo_consulta, link_video, criado_em, atualizado_em";

pub fn criar_consulta(conn: &Connection, nova: &NovaConsulta) -> Result<Consulta, ServiceError> {
    validation::validar_campos_obrigatorios(&[
        ("paciente_id", validation::presente_id(nova.paciente_id)),
        ("data", validation::presente(nova.data.as_deref())),
        ("motivo", validation::presente(nova.motivo.as_deref())),
    ])?;
    let data = nova.data.as_deref().unwrap_or_default();
    validation::validar_data(data, FORMATO_DATA_HORA)?;

    let tipo_consulta = nova
        .tipo_consulta
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or(TIPO_PRESENCIAL);
    if tipo_consulta != TIPO_PRESENCIAL && tipo_consulta != TIPO_TELEMEDICINA {
        return Err(ServiceError::Validation(format!(
            "tipo_consulta must be '{TIPO_PRESENCIAL}' or '{TIPO_TELEMEDICINA}'"
        )));
    }
    if tipo_consulta == TIPO_TELEMEDICINA && !validation::presente(nova.link_video.as_deref()) {
        return Err(ServiceError::Validation(
            "Video link is required for telemedicina".into(),
        ));
    }

    conn.execute(
        "INSERT INTO consultas (paciente_id, profissional_id, data, motivo, observacoes, \
         tipo_consulta, link_video)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            nova.paciente_id,
            nova.profissional_id,
            data,
            nova.motivo,
            nova.observacoes,
            tipo_consulta,
            nova.link_video,
        ],
    )?;
    let consulta_id = conn.last_insert_rowid();

    tracing::info!(consulta_id, "consulta created");
    obter_consulta_por_id(conn, consulta_id)
}

pub fn listar_consultas(
    conn: &Connection,
    paciente_id: Option<i64>,
    limite: i64,
    offset: i64,
) -> Result<Vec<Consulta>, ServiceError> {
    let (filtro, mut parametros): (&str, Vec<Box<dyn ToSql>>) = match paciente_id {
        Some(id) => (" WHERE paciente_id = ?1", vec![Box::new(id)]),
        None => ("", Vec::new()),
    };
    let limite_pos = parametros.len() + 1;
    let offset_pos = parametros.len() + 2;
    parametros.push(Box::new(limite));
    parametros.push(Box::new(offset));

    let sql = format!(
        "SELECT {COLUNAS} FROM consultas{filtro} ORDER BY data DESC \
         LIMIT ?{limite_pos} OFFSET ?{offset_pos}"
    );
    let parametros: Vec<&dyn ToSql> = parametros.iter().map(|p| p.as_ref()).collect();

    let mut stmt = conn.prepare(&sql)?;
    let consultas = stmt
        .query_map(&parametros[..], mapear_consulta)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(consultas)
}

pub fn contar_consultas(
    conn: &Connection,
    paciente_id: Option<i64>,
) -> Result<i64, ServiceError> {
    let total = match paciente_id {
        Some(id) => conn.query_row(
            "SELECT COUNT(*) FROM consultas WHERE paciente_id = ?1",
            params![id],
            |row| row.get(0),
        )?,
        None => conn.query_row("SELECT COUNT(*) FROM consultas", [], |row| row.get(0))?,
    };
    Ok(total)
}

pub fn obter_consulta_por_id(
    conn: &Connection,
    consulta_id: i64,
) -> Result<Consulta, ServiceError> {
    conn.query_row(
        &format!("SELECT {COLUNAS} FROM consultas WHERE id = ?1"),
        params![consulta_id],
        mapear_consulta,
    )
    .optional()?
    .ok_or_else(|| ServiceError::NotFound("Consulta not found".into()))
}

pub fn atualizar_consulta(
    conn: &Connection,
    consulta_id: i64,
    patch: &AtualizaConsulta,
) -> Result<Consulta, ServiceError> {
    obter_consulta_por_id(conn, consulta_id)?;

    if let Some(data) = patch.data.as_deref() {
        validation::validar_data(data, FORMATO_DATA_HORA)?;
    }

    let mut campos: Vec<(&str, Box<dyn ToSql>)> = Vec::new();
    if let Some(data) = patch.data.clone() {
        campos.push(("data", Box::new(data)));
    }
    if let Some(motivo) = patch.motivo.clone() {
        campos.push(("motivo", Box::new(motivo)));
    }
    if let Some(observacoes) = patch.observacoes.clone() {
        campos.push(("observacoes", Box::new(observacoes)));
    }
    if let Some(link_video) = patch.link_video.clone() {
        campos.push(("link_video", Box::new(link_video)));
    }

    if super::aplicar_patch(conn, "consultas", consulta_id, campos)? {
        tracing::info!(consulta_id, "consulta updated");
    }
    obter_consulta_por_id(conn, consulta_id)
}

pub fn deletar_consulta(conn: &Connection, consulta_id: i64) -> Result<(), ServiceError> {
    obter_consulta_por_id(conn, consulta_id)?;
    conn.execute("DELETE FROM consultas WHERE id = ?1", params![consulta_id])?;
    tracing::info!(consulta_id, "consulta deleted");
    Ok(())
}

//! Paciente data access.

use rusqlite::{params, Connection, OptionalExtension};

use crate::errors::ServiceError;
use crate::models::{AtualizaPaciente, NovoPaciente, Paciente};
use crate::validation::{self, FORMATO_DATA};

fn mapear_paciente(row: &rusqlite::Row<'_>) -> rusqlite::Result<Paciente> {
    Ok(Paciente {
        id: row.get(0)?,
        nome: row.get(1)?,
        email: row.get(2)?,
        telefone: row.get(3)?,
        cpf: row.get(4)?,
        data_nascimento: row.get(5)?,
        endereco: row.get(6)?,
        criado_em: row.get(7)?,
        atualizado_em: row.get(8)?,
    })
}

const COLUNAS: &str = "id, nome, email, telefone, cpf, data_nascimento, endereco, \
                       criado_em, atualizado_em";

pub fn criar_paciente(conn: &Connection, novo: &NovoPaciente) -> Result<Paciente, ServiceError> {
    validation::validar_campos_obrigatorios(&[
        ("nome", validation::presente(novo.nome.as_deref())),
        ("email", validation::presente(novo.email.as_deref())),
        ("telefone", validation::presente(novo.telefone.as_deref())),
        ("cpf", validation::presente(novo.cpf.as_deref())),
    ])?;
    let email = novo.email.as_deref().unwrap_or_default();
    let telefone = novo.telefone.as_deref().unwrap_or_default();

    validation::validar_email(email)?;
    validation::validar_telefone(telefone)?;
    if let Some(data) = novo.data_nascimento.as_deref() {
        validation::validar_data(data, FORMATO_DATA)?;
    }

    conn.execute(
        "INSERT INTO pacientes (nome, email, telefone, cpf, data_nascimento, endereco)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            novo.nome,
            email,
            telefone,
            novo.cpf,
            novo.data_nascimento,
            novo.endereco,
        ],
    )?;
    let paciente_id = conn.last_insert_rowid();

    tracing::info!(paciente_id, "paciente created");
    obter_paciente_por_id(conn, paciente_id)
}

pub fn listar_pacientes(
    conn: &Connection,
    limite: i64,
    offset: i64,
) -> Result<Vec<Paciente>, ServiceError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUNAS} FROM pacientes LIMIT ?1 OFFSET ?2"
    ))?;
    let pacientes = stmt
        .query_map(params![limite, offset], mapear_paciente)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(pacientes)
}

pub fn contar_pacientes(conn: &Connection) -> Result<i64, ServiceError> {
    let total = conn.query_row("SELECT COUNT(*) FROM pacientes", [], |row| row.get(0))?;
    Ok(total)
}

pub fn obter_paciente_por_id(
    conn: &Connection,
    paciente_id: i64,
) -> Result<Paciente, ServiceError> {
    conn.query_row(
        &format!("SELECT {COLUNAS} FROM pacientes WHERE id = ?1"),
        params![paciente_id],
        mapear_paciente,
    )
    .optional()?
    .ok_or_else(|| ServiceError::NotFound("Paciente not found".into()))
}

pub fn atualizar_paciente(
    conn: &Connection,
    paciente_id: i64,
    patch: &AtualizaPaciente,
) -> Result<Paciente, ServiceError> {
    obter_paciente_por_id(conn, paciente_id)?;

    if let Some(email) = patch.email.as_deref() {
        validation::validar_email(email)?;
    }
    if let Some(telefone) = patch.telefone.as_deref() {
        validation::validar_telefone(telefone)?;
    }

    let mut campos: Vec<(&str, Box<dyn rusqlite::ToSql>)> = Vec::new();
    if let Some(nome) = patch.nome.clone() {
        campos.push(("nome", Box::new(nome)));
    }
    if let Some(email) = patch.email.clone() {
        campos.push(("email", Box::new(email)));
    }
    if let Some(telefone) = patch.telefone.clone() {
        campos.push(("telefone", Box::new(telefone)));
    }
    if let Some(endereco) = patch.endereco.clone() {
        campos.push(("endereco", Box::new(endereco)));
    }

    if super::aplicar_patch(conn, "pacientes", paciente_id, campos)? {
        tracing::info!(paciente_id, "paciente updated");
    }
    obter_paciente_por_id(conn, paciente_id)
}

pub fn deletar_paciente(conn: &Connection, paciente_id: i64) -> Result<(), ServiceError> {
    obter_paciente_por_id(conn, paciente_id)?;
    conn.execute("DELETE FROM pacientes WHERE id = ?1", params![paciente_id])?;
    tracing::info!(paciente_id, "paciente deleted");
    Ok(())
}

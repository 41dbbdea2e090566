//! Profissional data access. The registration number (`registro`) is an
//! alternate unique lookup key.

use rusqlite::{params, Connection, OptionalExtension};

use crate::errors::ServiceError;
use crate::models::{AtualizaProfissional, NovoProfissional, Profissional};
use crate::validation;

fn mapear_profissional(row: &rusqlite::Row<'_>) -> rusqlite::Result<Profissional> {
    Ok(Profissional {
        id: row.get(0)?,
        nome: row.get(1)?,
        email: row.get(2)?,
        telefone: row.get(3)?,
        especialidade: row.get(4)?,
        registro: row.get(5)?,
        criado_em: row.get(6)?,
        atualizado_em: row.get(7)?,
    })
}

const COLUNAS: &str =
    "id, nome, email, telefone, especialidade, registro, criado_em, atualizado_em";

pub fn criar_profissional(
    conn: &Connection,
    novo: &NovoProfissional,
) -> Result<Profissional, ServiceError> {
    validation::validar_campos_obrigatorios(&[
        ("nome", validation::presente(novo.nome.as_deref())),
        ("email", validation::presente(novo.email.as_deref())),
        ("telefone", validation::presente(novo.telefone.as_deref())),
        (
            "especialidade",
            validation::presente(novo.especialidade.as_deref()),
        ),
        ("registro", validation::presente(novo.registro.as_deref())),
    ])?;
    let email = novo.email.as_deref().unwrap_or_default();
    let telefone = novo.telefone.as_deref().unwrap_or_default();

    validation::validar_email(email)?;
    validation::validar_telefone(telefone)?;

    conn.execute(
        "INSERT INTO profissionais (nome, email, telefone, especialidade, registro)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            novo.nome,
            email,
            telefone,
            novo.especialidade,
            novo.registro,
        ],
    )?;
    let profissional_id = conn.last_insert_rowid();

    tracing::info!(profissional_id, "profissional created");
    obter_profissional_por_id(conn, profissional_id)
}

pub fn listar_profissionais(
    conn: &Connection,
    limite: i64,
    offset: i64,
) -> Result<Vec<Profissional>, ServiceError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUNAS} FROM profissionais LIMIT ?1 OFFSET ?2"
    ))?;
    let profissionais = stmt
        .query_map(params![limite, offset], mapear_profissional)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(profissionais)
}

pub fn contar_profissionais(conn: &Connection) -> Result<i64, ServiceError> {
    let total = conn.query_row("SELECT COUNT(*) FROM profissionais", [], |row| row.get(0))?;
    Ok(total)
}

pub fn obter_profissional_por_id(
    conn: &Connection,
    profissional_id: i64,
) -> Result<Profissional, ServiceError> {
    conn.query_row(
        &format!("SELECT {COLUNAS} FROM profissionais WHERE id = ?1"),
        params![profissional_id],
        mapear_profissional,
    )
    .optional()?
    .ok_or_else(|| ServiceError::NotFound("Profissional not found".into()))
}

pub fn obter_profissional_por_registro(
    conn: &Connection,
    registro: &str,
) -> Result<Profissional, ServiceError> {
    conn.query_row(
        &format!("SELECT {COLUNAS} FROM profissionais WHERE registro = ?1"),
        params![registro],
        mapear_profissional,
    )
    .optional()?
    .ok_or_else(|| ServiceError::NotFound("Profissional not found".into()))
}

pub fn atualizar_profissional(
    conn: &Connection,
    profissional_id: i64,
    patch: &AtualizaProfissional,
) -> Result<Profissional, ServiceError> {
    obter_profissional_por_id(conn, profissional_id)?;

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
    if let Some(especialidade) = patch.especialidade.clone() {
        campos.push(("especialidade", Box::new(especialidade)));
    }

    if super::aplicar_patch(conn, "profissionais", profissional_id, campos)? {
        tracing::info!(profissional_id, "profissional updated");
    }
    obter_profissional_por_id(conn, profissional_id)
}

pub fn deletar_profissional(
    conn: &Connection,
    profissional_id: i64,
) -> Result<(), ServiceError> {
    obter_profissional_por_id(conn, profissional_id)?;
    conn.execute(
        "DELETE FROM profissionais WHERE id = ?1",
        params![profissional_id],
    )?;
    tracing::info!(profissional_id, "profissional deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_connection;

    fn novo(registro: &str) -> NovoProfissional {
        NovoProfissional {
            nome: Some("Dra. Lia Costa".into()),
            email: Some("lia@clinica.com".into()),
            telefone: Some("+5511988887777".into()),
            especialidade: Some("cardiologia".into()),
            registro: Some(registro.into()),
        }
    }

    #[test]
    fn create_then_lookup_by_registro() {
        let (conn, _tmp) = test_connection();
        let criado = criar_profissional(&conn, &novo("CRM-12345")).unwrap();

        let buscado = obter_profissional_por_registro(&conn, "CRM-12345").unwrap();
        assert_eq!(buscado.id, criado.id);
        assert_eq!(buscado.especialidade, "cardiologia");

        assert!(matches!(
            obter_profissional_por_registro(&conn, "CRM-00000"),
            Err(ServiceError::NotFound(_))
        ));
    }

    #[test]
    fn all_fields_are_required() {
        let (conn, _tmp) = test_connection();
        let err = criar_profissional(&conn, &NovoProfissional::default()).unwrap_err();
        let msg = err.to_string();
        for campo in ["nome", "email", "telefone", "especialidade", "registro"] {
            assert!(msg.contains(campo), "missing {campo} in {msg}");
        }
    }

    #[test]
    fn specialty_patch_keeps_registro() {
        let (conn, _tmp) = test_connection();
        let criado = criar_profissional(&conn, &novo("CRM-12345")).unwrap();
        let atualizado = atualizar_profissional(
            &conn,
            criado.id,
            &AtualizaProfissional {
                especialidade: Some("clinica geral".into()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(atualizado.especialidade, "clinica geral");
        assert_eq!(atualizado.registro, "CRM-12345");
    }

    #[test]
    fn delete_then_get_is_not_found() {
        let (conn, _tmp) = test_connection();
        let criado = criar_profissional(&conn, &novo("CRM-12345")).unwrap();
        deletar_profissional(&conn, criado.id).unwrap();
        assert!(matches!(
            obter_profissional_por_id(&conn, criado.id),
            Err(ServiceError::NotFound(_))
        ));
    }
}

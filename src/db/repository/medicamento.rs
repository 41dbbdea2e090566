//! Medicamento data access. The catalog is listed alphabetically and
//! supports a case-insensitive name search.

use rusqlite::{params, Connection, OptionalExtension, ToSql};

use crate::errors::ServiceError;
use crate::models::{AtualizaMedicamento, Medicamento, NovoMedicamento};
use crate::validation;

fn mapear_medicamento(row: &rusqlite::Row<'_>) -> rusqlite::Result<Medicamento> {
    Ok(Medicamento {
        id: row.get(0)?,
        nome: row.get(1)?,
        descricao: row.get(2)?,
        dosagem: row.get(3)?,
        criado_em: row.get(4)?,
        atualizado_em: row.get(5)?,
    })
}

const COLUNAS: &str = "id, nome, descricao, dosagem, criado_em, atualizado_em";

pub fn criar_medicamento(
    conn: &Connection,
    novo: &NovoMedicamento,
) -> Result<Medicamento, ServiceError> {
    validation::validar_campos_obrigatorios(&[(
        "nome",
        validation::presente(novo.nome.as_deref()),
    )])?;

    conn.execute(
        "INSERT INTO medicamentos (nome, descricao, dosagem) VALUES (?1, ?2, ?3)",
        params![novo.nome, novo.descricao, novo.dosagem],
    )?;
    let medicamento_id = conn.last_insert_rowid();

    tracing::info!(medicamento_id, "medicamento created");
    obter_medicamento_por_id(conn, medicamento_id)
}

pub fn listar_medicamentos(
    conn: &Connection,
    busca: Option<&str>,
    limite: i64,
    offset: i64,
) -> Result<Vec<Medicamento>, ServiceError> {
    // `%` and `_` in the search term keep their LIKE wildcard meaning.
    let (filtro, mut parametros): (&str, Vec<Box<dyn ToSql>>) = match busca {
        Some(termo) => (
            " WHERE LOWER(nome) LIKE LOWER(?1)",
            vec![Box::new(format!("%{termo}%"))],
        ),
        None => ("", Vec::new()),
    };
    let limite_pos = parametros.len() + 1;
    let offset_pos = parametros.len() + 2;
    parametros.push(Box::new(limite));
    parametros.push(Box::new(offset));

    let sql = format!(
        "SELECT {COLUNAS} FROM medicamentos{filtro} ORDER BY nome \
         LIMIT ?{limite_pos} OFFSET ?{offset_pos}"
    );
    let parametros: Vec<&dyn ToSql> = parametros.iter().map(|p| p.as_ref()).collect();

    let mut stmt = conn.prepare(&sql)?;
    let medicamentos = stmt
        .query_map(&parametros[..], mapear_medicamento)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(medicamentos)
}

pub fn contar_medicamentos(conn: &Connection, busca: Option<&str>) -> Result<i64, ServiceError> {
    let total = match busca {
        Some(termo) => conn.query_row(
            "SELECT COUNT(*) FROM medicamentos WHERE LOWER(nome) LIKE LOWER(?1)",
            params![format!("%{termo}%")],
            |row| row.get(0),
        )?,
        None => conn.query_row("SELECT COUNT(*) FROM medicamentos", [], |row| row.get(0))?,
    };
    Ok(total)
}

pub fn obter_medicamento_por_id(
    conn: &Connection,
    medicamento_id: i64,
) -> Result<Medicamento, ServiceError> {
    conn.query_row(
        &format!("SELECT {COLUNAS} FROM medicamentos WHERE id = ?1"),
        params![medicamento_id],
        mapear_medicamento,
    )
    .optional()?
    .ok_or_else(|| ServiceError::NotFound("Medicamento not found".into()))
}

pub fn atualizar_medicamento(
    conn: &Connection,
    medicamento_id: i64,
    patch: &AtualizaMedicamento,
) -> Result<Medicamento, ServiceError> {
    obter_medicamento_por_id(conn, medicamento_id)?;

    let mut campos: Vec<(&str, Box<dyn ToSql>)> = Vec::new();
    if let Some(nome) = patch.nome.clone() {
        campos.push(("nome", Box::new(nome)));
    }
    if let Some(descricao) = patch.descricao.clone() {
        campos.push(("descricao", Box::new(descricao)));
    }
    if let Some(dosagem) = patch.dosagem.clone() {
        campos.push(("dosagem", Box::new(dosagem)));
    }

    if super::aplicar_patch(conn, "medicamentos", medicamento_id, campos)? {
        tracing::info!(medicamento_id, "medicamento updated");
    }
    obter_medicamento_por_id(conn, medicamento_id)
}

pub fn deletar_medicamento(conn: &Connection, medicamento_id: i64) -> Result<(), ServiceError> {
    obter_medicamento_por_id(conn, medicamento_id)?;
    conn.execute(
        "DELETE FROM medicamentos WHERE id = ?1",
        params![medicamento_id],
    )?;
    tracing::info!(medicamento_id, "medicamento deleted");
    Ok(())
}

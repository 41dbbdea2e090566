//! Usuario data access: CRUD plus authentication.

use rusqlite::{params, Connection, OptionalExtension};

use crate::auth;
use crate::errors::ServiceError;
use crate::models::{AtualizaUsuario, NovoUsuario, Usuario};
use crate::validation::{self, SENHA_TAMANHO_MINIMO};

fn mapear_usuario(row: &rusqlite::Row<'_>) -> rusqlite::Result<Usuario> {
    Ok(Usuario {
        id: row.get(0)?,
        nome: row.get(1)?,
        email: row.get(2)?,
        tipo: row.get(3)?,
        senha: None,
        criado_em: row.get(4)?,
        atualizado_em: row.get(5)?,
    })
}

/// Create a user: validates the payload, hashes the password and fails
/// with a conflict when the email is already registered.
pub fn criar_usuario(conn: &Connection, novo: &NovoUsuario) -> Result<Usuario, ServiceError> {
    validation::validar_campos_obrigatorios(&[
        ("nome", validation::presente(novo.nome.as_deref())),
        ("email", validation::presente(novo.email.as_deref())),
        ("senha", validation::presente(novo.senha.as_deref())),
        ("tipo", validation::presente(novo.tipo.as_deref())),
    ])?;
    let nome = novo.nome.as_deref().unwrap_or_default();
    let email = novo.email.as_deref().unwrap_or_default();
    let senha = novo.senha.as_deref().unwrap_or_default();
    let tipo = novo.tipo.as_deref().unwrap_or_default();

    validation::validar_email(email)?;
    validation::validar_senha(senha, SENHA_TAMANHO_MINIMO)?;

    if email_existe(conn, email, None)? {
        return Err(ServiceError::Conflict("Email already registered".into()));
    }

    let senha_hash = auth::hash_senha(senha)?;
    conn.execute(
        "INSERT INTO usuarios (nome, email, senha, tipo) VALUES (?1, ?2, ?3, ?4)",
        params![nome, email, senha_hash, tipo],
    )?;
    let usuario_id = conn.last_insert_rowid();

    tracing::info!(usuario_id, "usuario created");
    obter_usuario_por_id(conn, usuario_id)
}

pub fn listar_usuarios(
    conn: &Connection,
    limite: i64,
    offset: i64,
) -> Result<Vec<Usuario>, ServiceError> {
    let mut stmt = conn.prepare(
        "SELECT id, nome, email, tipo, criado_em, atualizado_em FROM usuarios
         LIMIT ?1 OFFSET ?2",
    )?;
    let usuarios = stmt
        .query_map(params![limite, offset], mapear_usuario)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(usuarios)
}

pub fn contar_usuarios(conn: &Connection) -> Result<i64, ServiceError> {
    let total = conn.query_row("SELECT COUNT(*) FROM usuarios", [], |row| row.get(0))?;
    Ok(total)
}

pub fn obter_usuario_por_id(conn: &Connection, usuario_id: i64) -> Result<Usuario, ServiceError> {
    conn.query_row(
        "SELECT id, nome, email, tipo, criado_em, atualizado_em FROM usuarios WHERE id = ?1",
        params![usuario_id],
        mapear_usuario,
    )
    .optional()?
    .ok_or_else(|| ServiceError::NotFound("Usuario not found".into()))
}

/// Internal authentication lookup: the returned record carries the stored
/// password hash.
pub fn obter_usuario_por_email(conn: &Connection, email: &str) -> Result<Usuario, ServiceError> {
    conn.query_row(
        "SELECT id, nome, email, tipo, senha, criado_em, atualizado_em FROM usuarios
         WHERE email = ?1",
        params![email],
        |row| {
            Ok(Usuario {
                id: row.get(0)?,
                nome: row.get(1)?,
                email: row.get(2)?,
                tipo: row.get(3)?,
                senha: Some(row.get(4)?),
                criado_em: row.get(5)?,
                atualizado_em: row.get(6)?,
            })
        },
    )
    .optional()?
    .ok_or_else(|| ServiceError::NotFound("Usuario not found".into()))
}

pub fn atualizar_usuario(
    conn: &Connection,
    usuario_id: i64,
    patch: &AtualizaUsuario,
) -> Result<Usuario, ServiceError> {
    obter_usuario_por_id(conn, usuario_id)?;

    if let Some(email) = patch.email.as_deref() {
        validation::validar_email(email)?;
        if email_existe(conn, email, Some(usuario_id))? {
            return Err(ServiceError::Conflict("Email already in use".into()));
        }
    }

    let mut campos: Vec<(&str, Box<dyn rusqlite::ToSql>)> = Vec::new();
    if let Some(nome) = patch.nome.clone() {
        campos.push(("nome", Box::new(nome)));
    }
    if let Some(email) = patch.email.clone() {
        campos.push(("email", Box::new(email)));
    }
    if let Some(tipo) = patch.tipo.clone() {
        campos.push(("tipo", Box::new(tipo)));
    }

    if super::aplicar_patch(conn, "usuarios", usuario_id, campos)? {
        tracing::info!(usuario_id, "usuario updated");
    }
    obter_usuario_por_id(conn, usuario_id)
}

pub fn deletar_usuario(conn: &Connection, usuario_id: i64) -> Result<(), ServiceError> {
    obter_usuario_por_id(conn, usuario_id)?;
    conn.execute("DELETE FROM usuarios WHERE id = ?1", params![usuario_id])?;
    tracing::info!(usuario_id, "usuario deleted");
    Ok(())
}

/// Authenticate by email and plaintext password. Returns the user without
/// the password hash; the caller issues the access token.
pub fn autenticar(conn: &Connection, email: &str, senha: &str) -> Result<Usuario, ServiceError> {
    let mut usuario = obter_usuario_por_email(conn, email).map_err(|err| match err {
        // Unknown email and wrong password are indistinguishable to the client.
        ServiceError::NotFound(_) => ServiceError::Authentication("Invalid credentials".into()),
        other => other,
    })?;

    let hash = usuario.senha.take().unwrap_or_default();
    if !auth::verificar_senha(senha, &hash) {
        return Err(ServiceError::Authentication("Invalid credentials".into()));
    }

    tracing::info!(usuario_id = usuario.id, "usuario authenticated");
    Ok(usuario)
}

fn email_existe(
    conn: &Connection,
    email: &str,
    excluir_id: Option<i64>,
) -> Result<bool, ServiceError> {
    let existente: Option<i64> = match excluir_id {
        Some(id) => conn
            .query_row(
                "SELECT id FROM usuarios WHERE email = ?1 AND id != ?2",
                params![email, id],
                |row| row.get(0),
            )
            .optional()?,
        None => conn
            .query_row(
                "SELECT id FROM usuarios WHERE email = ?1",
                params![email],
                |row| row.get(0),
            )
            .optional()?,
    };
    Ok(existente.is_some())
}

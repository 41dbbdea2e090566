//! API router.
//!
//! Returns a composable `Router` nested under `/api/`. Account creation,
//! login and the health probe are public; every other route goes through
//! the bearer token middleware.
//!
//! Middleware uses `Extension<ApiContext>` (injected as the outermost
//! layer); handlers use `State<ApiContext>`.

use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;

/// Build the full API router from a shared context.
pub fn api_router(ctx: ApiContext) -> Router {
    // NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
    let protected = Router::new()
        .route("/usuarios", get(endpoints::usuarios::listar))
        .route("/usuarios/:id", get(endpoints::usuarios::obter))
        .route("/usuarios/:id", put(endpoints::usuarios::atualizar))
        .route("/usuarios/:id", delete(endpoints::usuarios::deletar))
        .route("/pacientes", post(endpoints::pacientes::criar))
        .route("/pacientes", get(endpoints::pacientes::listar))
        .route("/pacientes/:id", get(endpoints::pacientes::obter))
        .route("/pacientes/:id", put(endpoints::pacientes::atualizar))
        .route("/pacientes/:id", delete(endpoints::pacientes::deletar))
        .route("/profissionais", post(endpoints::profissionais::criar))
        .route("/profissionais", get(endpoints::profissionais::listar))
        .route("/profissionais/:id", get(endpoints::profissionais::obter))
        .route(
            "/profissionais/registro/:registro",
            get(endpoints::profissionais::obter_por_registro),
        )
        .route(
            "/profissionais/:id",
            put(endpoints::profissionais::atualizar),
        )
        .route(
            "/profissionais/:id",
            delete(endpoints::profissionais::deletar),
        )
        .route("/consultas", post(endpoints::consultas::criar))
        .route("/consultas", get(endpoints::consultas::listar))
        .route("/consultas/:id", get(endpoints::consultas::obter))
        .route("/consultas/:id", put(endpoints::consultas::atualizar))
        .route("/consultas/:id", delete(endpoints::consultas::deletar))
        .route("/medicamentos", post(endpoints::medicamentos::criar))
        .route("/medicamentos", get(endpoints::medicamentos::listar))
        .route("/medicamentos/:id", get(endpoints::medicamentos::obter))
        .route("/medicamentos/:id", put(endpoints::medicamentos::atualizar))
        .route(
            "/medicamentos/:id",
            delete(endpoints::medicamentos::deletar),
        )
        .route("/prescricoes", post(endpoints::prescricoes::criar))
        .route("/prescricoes", get(endpoints::prescricoes::listar))
        .route(
            "/prescricoes/consulta/:consulta_id",
            get(endpoints::prescricoes::listar_por_consulta),
        )
        .route("/prescricoes/:id", get(endpoints::prescricoes::obter))
        .route("/prescricoes/:id", put(endpoints::prescricoes::atualizar))
        .route("/prescricoes/:id", delete(endpoints::prescricoes::deletar))
        .with_state(ctx.clone())
        .layer(axum::middleware::from_fn(middleware::auth::require_auth))
        // Extension must be outermost so the middleware can extract ApiContext.
        .layer(axum::Extension(ctx.clone()));

    // Public routes: account creation, login and the health probe.
    let public = Router::new()
        .route("/usuarios", post(endpoints::usuarios::criar))
        .route("/auth/login", post(endpoints::auth::login))
        .route("/auth/health", get(endpoints::auth::health))
        .with_state(ctx);

    Router::new()
        .nest("/api", protected)
        .nest("/api", public)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::auth::TokenSigner;
    use crate::db::Database;

    fn test_router() -> (Router, tempfile::TempDir) {
        let tmp = tempfile::tempdir().unwrap();
        let db = Database::open(tmp.path().join("test.db")).unwrap();
        let ctx = ApiContext::new(db, TokenSigner::new("test-secret", 3600));
        (api_router(ctx), tmp)
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    /// Register a user and log in, returning a valid bearer token.
    async fn login(app: &Router) -> String {
        let (status, _) = send(
            app,
            "POST",
            "/api/usuarios",
            None,
            Some(json!({
                "nome": "Admin",
                "email": "admin@sghss.test",
                "senha": "segredo1",
                "tipo": "admin",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(
            app,
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"email": "admin@sghss.test", "senha": "segredo1"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Login successful");
        body["data"]["token"].as_str().unwrap().to_string()
    }

    fn paciente_json(cpf: &str) -> Value {
        json!({
            "nome": "Marina Souza",
            "email": format!("marina+{cpf}@exemplo.com"),
            "telefone": "+5511999998888",
            "cpf": cpf,
        })
    }

    #[tokio::test]
    async fn health_is_public() {
        let (app, _tmp) = test_router();
        let (status, body) = send(&app, "GET", "/api/auth/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
        assert_eq!(body["message"], "Server is running");
        assert_eq!(body["data"]["status"], "healthy");
    }

    #[tokio::test]
    async fn protected_routes_require_a_token() {
        let (app, _tmp) = test_router();

        let (status, body) = send(&app, "GET", "/api/pacientes", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["status"], "error");
        assert_eq!(body["error_code"], "AUTH_ERROR");

        let (status, body) = send(&app, "GET", "/api/pacientes", Some("garbage"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error_code"], "AUTH_ERROR");
    }

    #[tokio::test]
    async fn tokens_from_another_secret_are_rejected() {
        let (app, _tmp) = test_router();
        let forged = TokenSigner::new("other-secret", 3600).issue(1);
        let (status, body) = send(&app, "GET", "/api/pacientes", Some(&forged), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error_code"], "AUTH_ERROR");
    }

    #[tokio::test]
    async fn login_rejects_bad_credentials() {
        let (app, _tmp) = test_router();
        login(&app).await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"email": "admin@sghss.test", "senha": "errada99"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error_code"], "AUTH_ERROR");
        assert_eq!(body["message"], "Invalid credentials");

        // Unknown email looks exactly the same.
        let (status, body) = send(
            &app,
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"email": "ghost@sghss.test", "senha": "whatever1"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid credentials");
    }

    #[tokio::test]
    async fn login_requires_both_fields() {
        let (app, _tmp) = test_router();
        let (status, body) = send(
            &app,
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"email": "admin@sghss.test"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error_code"], "VALIDATION_ERROR");
        assert_eq!(body["message"], "Email and password are required");
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let (app, _tmp) = test_router();
        login(&app).await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/usuarios",
            None,
            Some(json!({
                "nome": "Clone",
                "email": "admin@sghss.test",
                "senha": "segredo2",
                "tipo": "medico",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error_code"], "USUARIO_ERROR");
    }

    #[tokio::test]
    async fn login_response_never_contains_the_hash() {
        let (app, _tmp) = test_router();
        let token = login(&app).await;

        let (_, body) = send(
            &app,
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"email": "admin@sghss.test", "senha": "segredo1"})),
        )
        .await;
        assert!(body["data"].get("senha").is_none());

        let (status, body) = send(&app, "GET", "/api/usuarios", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(!body.to_string().contains("pbkdf2"));
    }

    #[tokio::test]
    async fn paciente_crud_round_trip() {
        let (app, _tmp) = test_router();
        let token = login(&app).await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/pacientes",
            Some(&token),
            Some(paciente_json("12345678901")),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Paciente created successfully");
        let id = body["data"]["id"].as_i64().unwrap();

        // Partial update touches only the phone.
        let (status, body) = send(
            &app,
            "PUT",
            &format!("/api/pacientes/{id}"),
            Some(&token),
            Some(json!({"telefone": "+5511911112222"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["telefone"], "+5511911112222");
        assert_eq!(body["data"]["nome"], "Marina Souza");
        assert_eq!(body["data"]["cpf"], "12345678901");

        let (status, _) = send(
            &app,
            "DELETE",
            &format!("/api/pacientes/{id}"),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(
            &app,
            "GET",
            &format!("/api/pacientes/{id}"),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error_code"], "PACIENTE_ERROR");
        assert_eq!(body["message"], "Paciente not found");
    }

    #[tokio::test]
    async fn invalid_email_is_a_validation_error() {
        let (app, _tmp) = test_router();
        let token = login(&app).await;

        let mut paciente = paciente_json("12345678901");
        paciente["email"] = json!("nao-e-email");
        let (status, body) = send(&app, "POST", "/api/pacientes", Some(&token), Some(paciente)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error_code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn listing_carries_pagination_metadata() {
        let (app, _tmp) = test_router();
        let token = login(&app).await;

        for cpf in ["11111111111", "22222222222", "33333333333"] {
            let (status, _) = send(
                &app,
                "POST",
                "/api/pacientes",
                Some(&token),
                Some(paciente_json(cpf)),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, body) = send(
            &app,
            "GET",
            "/api/pacientes?page=2&per_page=2",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        assert_eq!(body["pagination"]["page"], 2);
        assert_eq!(body["pagination"]["per_page"], 2);
        assert_eq!(body["pagination"]["total"], 3);
        assert_eq!(body["pagination"]["total_pages"], 2);
    }

    #[tokio::test]
    async fn telemedicina_needs_a_video_link() {
        let (app, _tmp) = test_router();
        let token = login(&app).await;

        let (_, body) = send(
            &app,
            "POST",
            "/api/pacientes",
            Some(&token),
            Some(paciente_json("12345678901")),
        )
        .await;
        let paciente_id = body["data"]["id"].as_i64().unwrap();

        let (status, body) = send(
            &app,
            "POST",
            "/api/consultas",
            Some(&token),
            Some(json!({
                "paciente_id": paciente_id,
                "data": "2026-09-15 09:00:00",
                "motivo": "retorno",
                "tipo_consulta": "telemedicina",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error_code"], "VALIDATION_ERROR");
        assert_eq!(body["message"], "Video link is required for telemedicina");

        let (status, body) = send(
            &app,
            "POST",
            "/api/consultas",
            Some(&token),
            Some(json!({
                "paciente_id": paciente_id,
                "data": "2026-09-15 09:00:00",
                "motivo": "retorno",
                "tipo_consulta": "telemedicina",
                "link_video": "https://meet.exemplo.com/xyz",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["tipo_consulta"], "telemedicina");
    }

    #[tokio::test]
    async fn consultas_filter_by_patient() {
        let (app, _tmp) = test_router();
        let token = login(&app).await;

        let mut ids = Vec::new();
        for cpf in ["11111111111", "22222222222"] {
            let (_, body) = send(
                &app,
                "POST",
                "/api/pacientes",
                Some(&token),
                Some(paciente_json(cpf)),
            )
            .await;
            ids.push(body["data"]["id"].as_i64().unwrap());
        }
        for (paciente_id, data) in [
            (ids[0], "2026-09-01 10:00:00"),
            (ids[0], "2026-09-05 10:00:00"),
            (ids[1], "2026-09-03 10:00:00"),
        ] {
            let (status, _) = send(
                &app,
                "POST",
                "/api/consultas",
                Some(&token),
                Some(json!({"paciente_id": paciente_id, "data": data, "motivo": "exame"})),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, body) = send(
            &app,
            "GET",
            &format!("/api/consultas?paciente_id={}", ids[0]),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let consultas = body["data"].as_array().unwrap();
        assert_eq!(consultas.len(), 2);
        // Newest first.
        assert_eq!(consultas[0]["data"], "2026-09-05 10:00:00");
        assert_eq!(body["pagination"]["total"], 2);
    }

    #[tokio::test]
    async fn profissional_lookup_by_registro() {
        let (app, _tmp) = test_router();
        let token = login(&app).await;

        let (status, _) = send(
            &app,
            "POST",
            "/api/profissionais",
            Some(&token),
            Some(json!({
                "nome": "Dra. Lia Costa",
                "email": "lia@clinica.com",
                "telefone": "+5511988887777",
                "especialidade": "cardiologia",
                "registro": "CRM-12345",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(
            &app,
            "GET",
            "/api/profissionais/registro/CRM-12345",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["registro"], "CRM-12345");

        let (status, body) = send(
            &app,
            "GET",
            "/api/profissionais/registro/CRM-00000",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error_code"], "PROFISSIONAL_ERROR");
    }

    #[tokio::test]
    async fn medicamento_search_filters_the_catalog() {
        let (app, _tmp) = test_router();
        let token = login(&app).await;

        for nome in ["Paracetamol", "Dipirona"] {
            let (status, _) = send(
                &app,
                "POST",
                "/api/medicamentos",
                Some(&token),
                Some(json!({"nome": nome, "dosagem": "500mg"})),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, body) = send(
            &app,
            "GET",
            "/api/medicamentos?busca=paracet",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let achados = body["data"].as_array().unwrap();
        assert_eq!(achados.len(), 1);
        assert_eq!(achados[0]["nome"], "Paracetamol");
        assert_eq!(body["pagination"]["total"], 1);
    }

    #[tokio::test]
    async fn prescricoes_by_consultation() {
        let (app, _tmp) = test_router();
        let token = login(&app).await;

        let (_, body) = send(
            &app,
            "POST",
            "/api/pacientes",
            Some(&token),
            Some(paciente_json("12345678901")),
        )
        .await;
        let paciente_id = body["data"]["id"].as_i64().unwrap();

        let (_, body) = send(
            &app,
            "POST",
            "/api/consultas",
            Some(&token),
            Some(json!({"paciente_id": paciente_id, "data": "2026-09-10 08:00:00", "motivo": "gripe"})),
        )
        .await;
        let consulta_id = body["data"]["id"].as_i64().unwrap();

        let (_, body) = send(
            &app,
            "POST",
            "/api/medicamentos",
            Some(&token),
            Some(json!({"nome": "Amoxicilina", "dosagem": "500mg"})),
        )
        .await;
        let medicamento_id = body["data"]["id"].as_i64().unwrap();

        let (status, _) = send(
            &app,
            "POST",
            "/api/prescricoes",
            Some(&token),
            Some(json!({
                "consulta_id": consulta_id,
                "medicamento_id": medicamento_id,
                "duracao": "7 dias",
                "instrucoes": "8 em 8 horas",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(
            &app,
            "GET",
            &format!("/api/prescricoes/consulta/{consulta_id}"),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        assert_eq!(body["pagination"]["total"], 1);
    }

    #[tokio::test]
    async fn malformed_json_is_a_validation_error() {
        let (app, _tmp) = test_router();
        let token = login(&app).await;

        let request = Request::builder()
            .method("POST")
            .uri("/api/pacientes")
            .header("Authorization", format!("Bearer {token}"))
            .header("Content-Type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error_code"], "VALIDATION_ERROR");
    }
}

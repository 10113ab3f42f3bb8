use log::debug;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error;

use crate::models::record_model::{Aluno, Avaliacao, Grupo, NovoAluno};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("request to {table} failed: {source}")]
    Transport {
        table: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("request to {table} returned HTTP {status}")]
    Status {
        table: &'static str,
        status: StatusCode,
    },
}

/// A trait, necessary for every entity that will be used for reaching the
/// remote tables. One method per operation the screens consume.
#[allow(async_fn_in_trait)]
pub trait TableGateway {
    async fn student_by_credentials(
        &self,
        email: &str,
        senha: &str,
    ) -> Result<Option<Aluno>, GatewayError>;
    async fn insert_student(&self, novo: &NovoAluno) -> Result<(), GatewayError>;
    async fn groups(&self) -> Result<Vec<Grupo>, GatewayError>;
    async fn students_in_group(&self, grupo_id: i64) -> Result<Vec<Aluno>, GatewayError>;
    async fn evaluations_in_group(&self, grupo_id: i64) -> Result<Vec<Avaliacao>, GatewayError>;
    async fn group_by_name(&self, nome: &str) -> Result<Option<Grupo>, GatewayError>;
    async fn student_in_group(
        &self,
        email: &str,
        grupo_id: i64,
    ) -> Result<Option<Aluno>, GatewayError>;
    async fn update_password(&self, email: &str, nova_senha: &str)
        -> Result<usize, GatewayError>;
}

/// Allows a reqwest Client to serve as the gateway, speaking the service's
/// REST dialect: equality filters as `col=eq.value` query parameters against
/// `{base}/rest/v1/{table}`, JSON bodies in and out.
pub struct RestGateway {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RestGateway {
    pub fn new(client: Client, service_url: &str, service_key: &str) -> Self {
        RestGateway {
            client,
            base_url: service_url.trim_end_matches('/').to_owned(),
            api_key: service_key.to_owned(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn with_auth(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &'static str,
        filters: &[(&str, String)],
    ) -> Result<Vec<T>, GatewayError> {
        debug!("Selecting from {} with {} filter(s)", table, filters.len());
        let response = self
            .with_auth(self.client.get(self.table_url(table)))
            .query(&[("select", "*")])
            .query(filters)
            .send()
            .await
            .map_err(|source| GatewayError::Transport { table, source })?;
        let response = check_status(table, response)?;
        response
            .json()
            .await
            .map_err(|source| GatewayError::Transport { table, source })
    }
}

fn check_status(table: &'static str, response: Response) -> Result<Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(GatewayError::Status { table, status })
    }
}

fn eq(value: impl std::fmt::Display) -> String {
    format!("eq.{value}")
}

/* zero or several matches both read as "not found"; ambiguous group names
and duplicate accounts are never disambiguated */
fn single_row<T>(mut rows: Vec<T>) -> Option<T> {
    if rows.len() == 1 {
        Some(rows.remove(0))
    } else {
        None
    }
}

impl TableGateway for RestGateway {
    async fn student_by_credentials(
        &self,
        email: &str,
        senha: &str,
    ) -> Result<Option<Aluno>, GatewayError> {
        let rows = self
            .select(
                "alunos",
                &[("email", eq(email)), ("senha", eq(senha))],
            )
            .await?;
        Ok(single_row(rows))
    }

    async fn insert_student(&self, novo: &NovoAluno) -> Result<(), GatewayError> {
        const TABLE: &str = "alunos";
        debug!("Inserting a new row into {}", TABLE);
        let response = self
            .with_auth(self.client.post(self.table_url(TABLE)))
            .header("Prefer", "return=minimal")
            .json(&[novo])
            .send()
            .await
            .map_err(|source| GatewayError::Transport {
                table: TABLE,
                source,
            })?;
        check_status(TABLE, response)?;
        Ok(())
    }

    async fn groups(&self) -> Result<Vec<Grupo>, GatewayError> {
        self.select("grupos", &[]).await
    }

    async fn students_in_group(&self, grupo_id: i64) -> Result<Vec<Aluno>, GatewayError> {
        self.select("alunos", &[("grupo_id", eq(grupo_id))]).await
    }

    async fn evaluations_in_group(&self, grupo_id: i64) -> Result<Vec<Avaliacao>, GatewayError> {
        self.select("avaliacoes", &[("grupo_id", eq(grupo_id))])
            .await
    }

    async fn group_by_name(&self, nome: &str) -> Result<Option<Grupo>, GatewayError> {
        let rows = self.select("grupos", &[("nome", eq(nome))]).await?;
        Ok(single_row(rows))
    }

    async fn student_in_group(
        &self,
        email: &str,
        grupo_id: i64,
    ) -> Result<Option<Aluno>, GatewayError> {
        let rows = self
            .select(
                "alunos",
                &[("email", eq(email)), ("grupo_id", eq(grupo_id))],
            )
            .await?;
        Ok(single_row(rows))
    }

    async fn update_password(
        &self,
        email: &str,
        nova_senha: &str,
    ) -> Result<usize, GatewayError> {
        const TABLE: &str = "alunos";
        debug!("Updating senha in {} for email filter", TABLE);
        let response = self
            .with_auth(self.client.patch(self.table_url(TABLE)))
            .query(&[("email", eq(email))])
            // representation echoes the touched rows, so the caller can see
            // how many accounts the email filter actually hit
            .header("Prefer", "return=representation")
            .json(&json!({ "senha": nova_senha }))
            .send()
            .await
            .map_err(|source| GatewayError::Transport {
                table: TABLE,
                source,
            })?;
        let response = check_status(TABLE, response)?;
        let updated: Vec<Aluno> = response
            .json()
            .await
            .map_err(|source| GatewayError::Transport {
                table: TABLE,
                source,
            })?;
        Ok(updated.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn aluno_json(id: i64, email: &str, senha: &str, grupo_id: i64) -> serde_json::Value {
        json!({
            "id": id,
            "nome": format!("Aluno {id}"),
            "email": email,
            "senha": senha,
            "grupo_id": grupo_id,
        })
    }

    fn gateway(server: &MockServer) -> RestGateway {
        RestGateway::new(Client::new(), &server.uri(), "test-key")
    }

    #[tokio::test]
    async fn student_by_credentials_sends_equality_filters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/alunos"))
            .and(query_param("select", "*"))
            .and(query_param("email", "eq.a@b.com"))
            .and(query_param("senha", "eq.x"))
            .and(header("apikey", "test-key"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([aluno_json(7, "a@b.com", "x", 1)])),
            )
            .mount(&server)
            .await;

        let found = gateway(&server)
            .student_by_credentials("a@b.com", "x")
            .await
            .unwrap();
        assert_eq!(found.unwrap().id, 7);
    }

    #[tokio::test]
    async fn student_by_credentials_treats_empty_result_as_absent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/alunos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let found = gateway(&server)
            .student_by_credentials("a@b.com", "x")
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn group_by_name_treats_ambiguous_result_as_absent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/grupos"))
            .and(query_param("nome", "eq.Turma A"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": 1, "nome": "Turma A" },
                { "id": 2, "nome": "Turma A" },
            ])))
            .mount(&server)
            .await;

        let found = gateway(&server).group_by_name("Turma A").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn failure_status_becomes_a_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/grupos"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = gateway(&server).groups().await.unwrap_err();
        match err {
            GatewayError::Status { table, status } => {
                assert_eq!(table, "grupos");
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            }
            other => panic!("expected a status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn insert_student_posts_a_row_array() {
        let server = MockServer::start().await;
        let novo = NovoAluno {
            nome: "Ana".to_owned(),
            email: "ana@x.com".to_owned(),
            senha: "p1".to_owned(),
            grupo_id: 1,
        };
        Mock::given(method("POST"))
            .and(path("/rest/v1/alunos"))
            .and(header("Prefer", "return=minimal"))
            .and(body_json(json!([{
                "nome": "Ana",
                "email": "ana@x.com",
                "senha": "p1",
                "grupo_id": 1,
            }])))
            .respond_with(ResponseTemplate::new(201))
            .mount(&server)
            .await;

        gateway(&server).insert_student(&novo).await.unwrap();
    }

    #[tokio::test]
    async fn update_password_reports_every_row_the_filter_hit() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/rest/v1/alunos"))
            .and(query_param("email", "eq.z@z.com"))
            .and(body_json(json!({ "senha": "nova" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                aluno_json(1, "z@z.com", "nova", 1),
                aluno_json(2, "z@z.com", "nova", 2),
            ])))
            .mount(&server)
            .await;

        let updated = gateway(&server)
            .update_password("z@z.com", "nova")
            .await
            .unwrap();
        assert_eq!(updated, 2);
    }
}

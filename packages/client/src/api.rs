//! # Backend access: the [`Backend`] trait and its HTTP implementation
//!
//! Every page talks to the backend through [`Backend`], an async interface with
//! one method per endpoint the frontend consumes. [`HttpBackend`] implements it
//! with `reqwest` (which uses `fetch` on WASM); tests substitute an in-memory
//! fake.
//!
//! ## Endpoints
//!
//! | Area | Method | HTTP |
//! |------|--------|------|
//! | auth | [`login`](Backend::login) | `POST /auth/login` |
//! | | [`register`](Backend::register) | `POST /auth/register` |
//! | | [`validate_token`](Backend::validate_token) | `GET /auth/validate-token` |
//! | users | [`current_user`](Backend::current_user) | `GET /users/me` |
//! | | [`update_profile`](Backend::update_profile) | `PUT /users/me` |
//! | | [`change_password`](Backend::change_password) | `PUT /users/me/password` |
//! | articles | [`create_article`](Backend::create_article) | `POST /articles/` |
//! | | [`article`](Backend::article) | `GET /articles/{id}` |
//! | | [`update_article`](Backend::update_article) | `PUT /articles/{id}` |
//! | | [`delete_article`](Backend::delete_article) | `DELETE /articles/delete/{id}` |
//! | | [`my_articles`](Backend::my_articles) | `GET /articles/user/me` |
//! | | [`my_article_stats`](Backend::my_article_stats) | `GET /articles/stats/me` |
//! | | [`saved_articles`](Backend::saved_articles) | `GET /articles/get/saved` |
//! | | [`articles_by_tag`](Backend::articles_by_tag) | `GET /articles/get/by-tag` |
//! | | [`articles_by_author`](Backend::articles_by_author) | `GET /articles/get/by-author` |
//! | discovery | [`recommendations`](Backend::recommendations) | `GET /recommendations/` |
//! | | [`trending_tags`](Backend::trending_tags) / [`trending_authors`](Backend::trending_authors) | `GET /trending/{tags,authors}` |
//! | | [`search`](Backend::search) | `GET /search` |
//! | interactions | [`interaction_status`](Backend::interaction_status) | `GET /interactions/status` |
//! | | [`toggle_interaction`](Backend::toggle_interaction) | `POST /interactions/toggle` |
//! | | [`log_interaction`](Backend::log_interaction) | `POST /interactions/` |
//! | admin | [`admin_delete_article`](Backend::admin_delete_article) | `DELETE /admin/articles/{id}` |
//! | analytics | [`interaction_graph`](Backend::interaction_graph) | `GET /analytics/my-articles/interactions-graph` |
//!
//! Non-success responses become [`ClientError`] via
//! [`ClientError::from_response`]; nothing is retried.

use std::future::Future;

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::cursor::SortKey;
use crate::error::ClientError;
use crate::models::*;

/// Async interface to the article backend.
pub trait Backend {
    fn login(
        &self,
        request: &LoginRequest,
    ) -> impl Future<Output = Result<LoginResponse, ClientError>>;
    fn register(
        &self,
        request: &RegistrationRequest,
    ) -> impl Future<Output = Result<RegistrationResponse, ClientError>>;
    fn validate_token(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<TokenValidation, ClientError>>;

    fn current_user(&self, token: &str)
        -> impl Future<Output = Result<UserProfile, ClientError>>;
    fn update_profile(
        &self,
        token: &str,
        update: &ProfileUpdate,
    ) -> impl Future<Output = Result<UserProfile, ClientError>>;
    fn change_password(
        &self,
        token: &str,
        change: &PasswordChange,
    ) -> impl Future<Output = Result<MessageResponse, ClientError>>;
    /// PNG bytes of the user's interaction graph.
    fn interaction_graph(&self, token: &str)
        -> impl Future<Output = Result<Vec<u8>, ClientError>>;

    fn create_article(
        &self,
        token: &str,
        payload: &ArticlePayload,
    ) -> impl Future<Output = Result<ArticleSaved, ClientError>>;
    fn article(&self, article_id: i64)
        -> impl Future<Output = Result<ArticleDetail, ClientError>>;
    fn update_article(
        &self,
        token: &str,
        article_id: i64,
        payload: &ArticlePayload,
    ) -> impl Future<Output = Result<ArticleSaved, ClientError>>;
    fn delete_article(
        &self,
        token: &str,
        article_id: i64,
    ) -> impl Future<Output = Result<MessageResponse, ClientError>>;
    fn my_articles(
        &self,
        token: &str,
        sort: SortKey,
        page: u32,
        page_size: u32,
    ) -> impl Future<Output = Result<ArticlePage, ClientError>>;
    fn my_article_stats(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<ArticleStats, ClientError>>;
    fn saved_articles(
        &self,
        token: &str,
        page: u32,
    ) -> impl Future<Output = Result<ArticlePage, ClientError>>;
    fn articles_by_tag(
        &self,
        tag_id: i64,
        page: u32,
    ) -> impl Future<Output = Result<ArticlePage, ClientError>>;
    fn articles_by_author(
        &self,
        author_id: i64,
        page: u32,
    ) -> impl Future<Output = Result<ArticlePage, ClientError>>;

    fn recommendations(
        &self,
        token: &str,
        page: u32,
        page_size: u32,
        session_id: &str,
    ) -> impl Future<Output = Result<ArticlePage, ClientError>>;
    fn trending_tags(&self) -> impl Future<Output = Result<Vec<TrendingTag>, ClientError>>;
    fn trending_authors(&self)
        -> impl Future<Output = Result<Vec<TrendingAuthor>, ClientError>>;
    fn search(
        &self,
        token: &str,
        query: &str,
    ) -> impl Future<Output = Result<SearchResults, ClientError>>;

    fn interaction_status(
        &self,
        user_id: &str,
        article_id: i64,
    ) -> impl Future<Output = Result<InteractionStatus, ClientError>>;
    fn toggle_interaction(
        &self,
        token: &str,
        request: &ToggleRequest,
    ) -> impl Future<Output = Result<ToggleResult, ClientError>>;
    fn log_interaction(
        &self,
        user_id: &str,
        event: &LogInteraction,
    ) -> impl Future<Output = Result<(), ClientError>>;

    fn admin_delete_article(
        &self,
        token: &str,
        article_id: i64,
        request: &AdminDeleteRequest,
    ) -> impl Future<Output = Result<AdminAction, ClientError>>;
}

/// [`Backend`] over HTTP.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    http: reqwest::Client,
    config: ClientConfig,
}

impl HttpBackend {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.config.endpoint(path))
    }

    fn authed(&self, method: Method, path: &str, token: &str) -> RequestBuilder {
        self.request(method, path).bearer_auth(token)
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, ClientError> {
        let response = request.send().await.map_err(|e| {
            tracing::error!("Request failed: {}", e);
            ClientError::Network(e)
        })?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let err = ClientError::from_response(status.as_u16(), &body);
        tracing::warn!("Backend answered {}: {}", status, err);
        Err(err)
    }

    async fn json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = self.send(request).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl Backend for HttpBackend {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ClientError> {
        self.json(self.request(Method::POST, "/auth/login").json(request))
            .await
    }

    async fn register(
        &self,
        request: &RegistrationRequest,
    ) -> Result<RegistrationResponse, ClientError> {
        self.json(self.request(Method::POST, "/auth/register").json(request))
            .await
    }

    async fn validate_token(&self, token: &str) -> Result<TokenValidation, ClientError> {
        self.json(self.authed(Method::GET, "/auth/validate-token", token))
            .await
    }

    async fn current_user(&self, token: &str) -> Result<UserProfile, ClientError> {
        self.json(self.authed(Method::GET, "/users/me", token)).await
    }

    async fn update_profile(
        &self,
        token: &str,
        update: &ProfileUpdate,
    ) -> Result<UserProfile, ClientError> {
        self.json(self.authed(Method::PUT, "/users/me", token).json(update))
            .await
    }

    async fn change_password(
        &self,
        token: &str,
        change: &PasswordChange,
    ) -> Result<MessageResponse, ClientError> {
        self.json(
            self.authed(Method::PUT, "/users/me/password", token)
                .json(change),
        )
        .await
    }

    async fn interaction_graph(&self, token: &str) -> Result<Vec<u8>, ClientError> {
        let response = self
            .send(self.authed(
                Method::GET,
                "/analytics/my-articles/interactions-graph",
                token,
            ))
            .await?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn create_article(
        &self,
        token: &str,
        payload: &ArticlePayload,
    ) -> Result<ArticleSaved, ClientError> {
        self.json(self.authed(Method::POST, "/articles/", token).json(payload))
            .await
    }

    async fn article(&self, article_id: i64) -> Result<ArticleDetail, ClientError> {
        self.json(self.request(Method::GET, &format!("/articles/{article_id}")))
            .await
    }

    async fn update_article(
        &self,
        token: &str,
        article_id: i64,
        payload: &ArticlePayload,
    ) -> Result<ArticleSaved, ClientError> {
        self.json(
            self.authed(Method::PUT, &format!("/articles/{article_id}"), token)
                .json(payload),
        )
        .await
    }

    async fn delete_article(
        &self,
        token: &str,
        article_id: i64,
    ) -> Result<MessageResponse, ClientError> {
        self.json(self.authed(
            Method::DELETE,
            &format!("/articles/delete/{article_id}"),
            token,
        ))
        .await
    }

    async fn my_articles(
        &self,
        token: &str,
        sort: SortKey,
        page: u32,
        page_size: u32,
    ) -> Result<ArticlePage, ClientError> {
        self.json(
            self.authed(Method::GET, "/articles/user/me", token)
                .query(&[
                    ("sort", sort.as_str().to_string()),
                    ("page", page.to_string()),
                    ("page_size", page_size.to_string()),
                ]),
        )
        .await
    }

    async fn my_article_stats(&self, token: &str) -> Result<ArticleStats, ClientError> {
        self.json(self.authed(Method::GET, "/articles/stats/me", token))
            .await
    }

    async fn saved_articles(&self, token: &str, page: u32) -> Result<ArticlePage, ClientError> {
        self.json(
            self.authed(Method::GET, "/articles/get/saved", token)
                .query(&[("page", page)]),
        )
        .await
    }

    async fn articles_by_tag(&self, tag_id: i64, page: u32) -> Result<ArticlePage, ClientError> {
        self.json(
            self.request(Method::GET, "/articles/get/by-tag")
                .query(&[("tag_id", tag_id.to_string()), ("page", page.to_string())]),
        )
        .await
    }

    async fn articles_by_author(
        &self,
        author_id: i64,
        page: u32,
    ) -> Result<ArticlePage, ClientError> {
        self.json(
            self.request(Method::GET, "/articles/get/by-author")
                .query(&[("author_id", author_id.to_string()), ("page", page.to_string())]),
        )
        .await
    }

    async fn recommendations(
        &self,
        token: &str,
        page: u32,
        page_size: u32,
        session_id: &str,
    ) -> Result<ArticlePage, ClientError> {
        self.json(
            self.authed(Method::GET, "/recommendations/", token)
                .query(&[
                    ("page", page.to_string()),
                    ("page_size", page_size.to_string()),
                    ("session_id", session_id.to_string()),
                ]),
        )
        .await
    }

    async fn trending_tags(&self) -> Result<Vec<TrendingTag>, ClientError> {
        self.json(self.request(Method::GET, "/trending/tags")).await
    }

    async fn trending_authors(&self) -> Result<Vec<TrendingAuthor>, ClientError> {
        self.json(self.request(Method::GET, "/trending/authors"))
            .await
    }

    async fn search(&self, token: &str, query: &str) -> Result<SearchResults, ClientError> {
        self.json(
            self.authed(Method::GET, "/search", token)
                .query(&[("q", query)]),
        )
        .await
    }

    async fn interaction_status(
        &self,
        user_id: &str,
        article_id: i64,
    ) -> Result<InteractionStatus, ClientError> {
        self.json(
            self.request(Method::GET, "/interactions/status")
                .query(&[("user_id", user_id.to_string()), ("article_id", article_id.to_string())]),
        )
        .await
    }

    async fn toggle_interaction(
        &self,
        token: &str,
        request: &ToggleRequest,
    ) -> Result<ToggleResult, ClientError> {
        self.json(
            self.authed(Method::POST, "/interactions/toggle", token)
                .json(request),
        )
        .await
    }

    async fn log_interaction(
        &self,
        user_id: &str,
        event: &LogInteraction,
    ) -> Result<(), ClientError> {
        self.send(
            self.request(Method::POST, "/interactions/")
                .query(&[("user_id", user_id)])
                .json(event),
        )
        .await?;
        Ok(())
    }

    async fn admin_delete_article(
        &self,
        token: &str,
        article_id: i64,
        request: &AdminDeleteRequest,
    ) -> Result<AdminAction, ClientError> {
        self.json(
            self.authed(Method::DELETE, &format!("/admin/articles/{article_id}"), token)
                .json(request),
        )
        .await
    }
}

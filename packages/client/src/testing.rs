//! In-memory [`Backend`] for tests. Records every call and answers from
//! scripted replies.

use std::collections::VecDeque;
use std::sync::Mutex;

use chrono::NaiveDate;

use crate::api::Backend;
use crate::cursor::SortKey;
use crate::error::ClientError;
use crate::models::*;

/// Scripted answer for one endpoint.
#[derive(Clone, Debug)]
pub enum Reply<T> {
    Ok(T),
    /// Non-success status with an empty body.
    Status(u16),
    /// Non-success status with a JSON body, e.g. a FastAPI `detail`.
    Body(u16, String),
    /// The request never produced a usable response.
    Unreachable,
}

impl<T: Clone> Reply<T> {
    fn resolve(&self) -> Result<T, ClientError> {
        match self {
            Reply::Ok(value) => Ok(value.clone()),
            Reply::Status(status) => Err(ClientError::from_response(*status, "")),
            Reply::Body(status, body) => Err(ClientError::from_response(*status, body)),
            Reply::Unreachable => Err(unreachable()),
        }
    }
}

// reqwest errors cannot be built by hand; a decode failure takes the same
// non-status path through every caller.
fn unreachable() -> ClientError {
    match serde_json::from_str::<serde_json::Value>("") {
        Err(e) => ClientError::Decode(e),
        Ok(_) => ClientError::Status(0),
    }
}

/// Replies served in order; the last one repeats.
struct Slot<T> {
    queue: VecDeque<Reply<T>>,
}

impl<T: Clone> Slot<T> {
    fn new(reply: Reply<T>) -> Self {
        Self {
            queue: VecDeque::from([reply]),
        }
    }

    fn next(&mut self) -> Result<T, ClientError> {
        if self.queue.len() > 1 {
            if let Some(reply) = self.queue.pop_front() {
                return reply.resolve();
            }
        }
        match self.queue.front() {
            Some(reply) => reply.resolve(),
            None => Err(ClientError::Status(500)),
        }
    }
}

struct Replies {
    validation: Slot<TokenValidation>,
    login: Slot<LoginResponse>,
    register: Slot<RegistrationResponse>,
    user: Slot<UserProfile>,
    password: Slot<MessageResponse>,
    graph: Slot<Vec<u8>>,
    create: Slot<ArticleSaved>,
    article: Slot<ArticleDetail>,
    update: Slot<ArticleSaved>,
    delete: Slot<MessageResponse>,
    page: Slot<ArticlePage>,
    stats: Slot<ArticleStats>,
    trending_tags: Slot<Vec<TrendingTag>>,
    trending_authors: Slot<Vec<TrendingAuthor>>,
    search: Slot<SearchResults>,
    status: Slot<InteractionStatus>,
    toggle: Slot<ToggleResult>,
    log: Slot<()>,
    admin_delete: Slot<AdminAction>,
}

pub fn profile() -> UserProfile {
    UserProfile {
        user_id: 1,
        user_email: "ana@example.org".into(),
        user_name: "ana".into(),
        birth_date: NaiveDate::from_ymd_opt(1990, 4, 2),
        bio: None,
        social_link: None,
        user_role: "user".into(),
        created_at: None,
    }
}

pub fn empty_page() -> ArticlePage {
    ArticlePage {
        page: 1,
        total_pages: 0,
        total_results: 0,
        articles: Vec::new(),
        heading: None,
    }
}

/// A listing card with `likes` likes created on `day` of January 2024.
pub fn summary(id: i64, title: &str, day: u32, likes: u64) -> ArticleSummary {
    ArticleSummary {
        article_id: id,
        title: title.into(),
        content: format!("{title} body. Second sentence. Third sentence."),
        author_username: Some("ana".into()),
        author_id: Some(1),
        created_at: NaiveDate::from_ymd_opt(2024, 1, day)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .unwrap(),
        likes,
        tags: vec![Tag::named("rust")],
    }
}

pub fn page_of(articles: Vec<ArticleSummary>, page: u32, total_pages: u32) -> ArticlePage {
    ArticlePage {
        page,
        total_pages,
        total_results: articles.len() as u64,
        articles,
        heading: None,
    }
}

pub struct FakeBackend {
    replies: Mutex<Replies>,
    calls: Mutex<Vec<String>>,
    requests: Mutex<Vec<String>>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! setters {
    ($($set:ident, $push:ident => $slot:ident : $ty:ty;)*) => {
        $(
            pub fn $set(&self, reply: Reply<$ty>) {
                self.replies.lock().unwrap().$slot = Slot::new(reply);
            }

            pub fn $push(&self, reply: Reply<$ty>) {
                self.replies.lock().unwrap().$slot.queue.push_back(reply);
            }
        )*
    };
}

impl FakeBackend {
    pub fn new() -> Self {
        let replies = Replies {
            validation: Slot::new(Reply::Ok(TokenValidation {
                valid: true,
                user_id: Some(1),
            })),
            login: Slot::new(Reply::Ok(LoginResponse {
                user_id: 1,
                access_token: "token".into(),
                token_type: Some("bearer".into()),
            })),
            register: Slot::new(Reply::Ok(RegistrationResponse {
                user_id: 2,
                message: "User registered successfully".into(),
            })),
            user: Slot::new(Reply::Ok(profile())),
            password: Slot::new(Reply::Ok(MessageResponse::default())),
            graph: Slot::new(Reply::Ok(vec![0x89, b'P', b'N', b'G'])),
            create: Slot::new(Reply::Ok(ArticleSaved { article_id: 100 })),
            article: Slot::new(Reply::Status(404)),
            update: Slot::new(Reply::Ok(ArticleSaved { article_id: 100 })),
            delete: Slot::new(Reply::Ok(MessageResponse::default())),
            page: Slot::new(Reply::Ok(empty_page())),
            stats: Slot::new(Reply::Ok(ArticleStats::default())),
            trending_tags: Slot::new(Reply::Ok(Vec::new())),
            trending_authors: Slot::new(Reply::Ok(Vec::new())),
            search: Slot::new(Reply::Ok(SearchResults::default())),
            status: Slot::new(Reply::Ok(InteractionStatus::default())),
            toggle: Slot::new(Reply::Status(500)),
            log: Slot::new(Reply::Ok(())),
            admin_delete: Slot::new(Reply::Status(403)),
        };
        Self {
            replies: Mutex::new(replies),
            calls: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    setters! {
        set_validation, push_validation => validation: TokenValidation;
        set_login, push_login => login: LoginResponse;
        set_register, push_register => register: RegistrationResponse;
        set_user, push_user => user: UserProfile;
        set_password, push_password => password: MessageResponse;
        set_graph, push_graph => graph: Vec<u8>;
        set_create, push_create => create: ArticleSaved;
        set_article, push_article => article: ArticleDetail;
        set_update, push_update => update: ArticleSaved;
        set_delete, push_delete => delete: MessageResponse;
        set_page, push_page => page: ArticlePage;
        set_stats, push_stats => stats: ArticleStats;
        set_trending_tags, push_trending_tags => trending_tags: Vec<TrendingTag>;
        set_trending_authors, push_trending_authors => trending_authors: Vec<TrendingAuthor>;
        set_search, push_search => search: SearchResults;
        set_toggle, push_toggle => toggle: ToggleResult;
        set_log, push_log => log: ();
        set_admin_delete, push_admin_delete => admin_delete: AdminAction;
    }

    pub fn set_status(&self, status: InteractionStatus) {
        self.replies.lock().unwrap().status = Slot::new(Reply::Ok(status));
    }

    /// Endpoint names in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// One line per call with its arguments, e.g. `my_articles sort=oldest page=2 size=5`.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, name: &str, detail: String) {
        self.calls.lock().unwrap().push(name.to_string());
        let line = if detail.is_empty() {
            name.to_string()
        } else {
            format!("{name} {detail}")
        };
        self.requests.lock().unwrap().push(line);
    }

    fn replies(&self) -> std::sync::MutexGuard<'_, Replies> {
        self.replies.lock().unwrap()
    }
}

impl Backend for FakeBackend {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ClientError> {
        self.record("login", format!("email={}", request.user_email));
        self.replies().login.next()
    }

    async fn register(
        &self,
        request: &RegistrationRequest,
    ) -> Result<RegistrationResponse, ClientError> {
        self.record("register", format!("user={}", request.user_name));
        self.replies().register.next()
    }

    async fn validate_token(&self, token: &str) -> Result<TokenValidation, ClientError> {
        self.record("validate_token", format!("token={token}"));
        self.replies().validation.next()
    }

    async fn current_user(&self, token: &str) -> Result<UserProfile, ClientError> {
        self.record("current_user", format!("token={token}"));
        self.replies().user.next()
    }

    async fn update_profile(
        &self,
        _token: &str,
        update: &ProfileUpdate,
    ) -> Result<UserProfile, ClientError> {
        let body = serde_json::to_string(update).unwrap_or_default();
        self.record("update_profile", body);
        self.replies().user.next()
    }

    async fn change_password(
        &self,
        _token: &str,
        _change: &PasswordChange,
    ) -> Result<MessageResponse, ClientError> {
        self.record("change_password", String::new());
        self.replies().password.next()
    }

    async fn interaction_graph(&self, _token: &str) -> Result<Vec<u8>, ClientError> {
        self.record("interaction_graph", String::new());
        self.replies().graph.next()
    }

    async fn create_article(
        &self,
        _token: &str,
        payload: &ArticlePayload,
    ) -> Result<ArticleSaved, ClientError> {
        self.record("create_article", format!("title={}", payload.title));
        self.replies().create.next()
    }

    async fn article(&self, article_id: i64) -> Result<ArticleDetail, ClientError> {
        self.record("article", format!("id={article_id}"));
        self.replies().article.next()
    }

    async fn update_article(
        &self,
        _token: &str,
        article_id: i64,
        payload: &ArticlePayload,
    ) -> Result<ArticleSaved, ClientError> {
        self.record(
            "update_article",
            format!("id={article_id} title={}", payload.title),
        );
        self.replies().update.next()
    }

    async fn delete_article(
        &self,
        _token: &str,
        article_id: i64,
    ) -> Result<MessageResponse, ClientError> {
        self.record("delete_article", format!("id={article_id}"));
        self.replies().delete.next()
    }

    async fn my_articles(
        &self,
        _token: &str,
        sort: SortKey,
        page: u32,
        page_size: u32,
    ) -> Result<ArticlePage, ClientError> {
        self.record(
            "my_articles",
            format!("sort={sort} page={page} size={page_size}"),
        );
        self.replies().page.next()
    }

    async fn my_article_stats(&self, _token: &str) -> Result<ArticleStats, ClientError> {
        self.record("my_article_stats", String::new());
        self.replies().stats.next()
    }

    async fn saved_articles(&self, _token: &str, page: u32) -> Result<ArticlePage, ClientError> {
        self.record("saved_articles", format!("page={page}"));
        self.replies().page.next()
    }

    async fn articles_by_tag(&self, tag_id: i64, page: u32) -> Result<ArticlePage, ClientError> {
        self.record("articles_by_tag", format!("tag={tag_id} page={page}"));
        self.replies().page.next()
    }

    async fn articles_by_author(
        &self,
        author_id: i64,
        page: u32,
    ) -> Result<ArticlePage, ClientError> {
        self.record(
            "articles_by_author",
            format!("author={author_id} page={page}"),
        );
        self.replies().page.next()
    }

    async fn recommendations(
        &self,
        _token: &str,
        page: u32,
        page_size: u32,
        session_id: &str,
    ) -> Result<ArticlePage, ClientError> {
        self.record(
            "recommendations",
            format!("page={page} size={page_size} session={session_id}"),
        );
        self.replies().page.next()
    }

    async fn trending_tags(&self) -> Result<Vec<TrendingTag>, ClientError> {
        self.record("trending_tags", String::new());
        self.replies().trending_tags.next()
    }

    async fn trending_authors(&self) -> Result<Vec<TrendingAuthor>, ClientError> {
        self.record("trending_authors", String::new());
        self.replies().trending_authors.next()
    }

    async fn search(&self, _token: &str, query: &str) -> Result<SearchResults, ClientError> {
        self.record("search", format!("q={query}"));
        self.replies().search.next()
    }

    async fn interaction_status(
        &self,
        user_id: &str,
        article_id: i64,
    ) -> Result<InteractionStatus, ClientError> {
        self.record(
            "interaction_status",
            format!("user={user_id} article={article_id}"),
        );
        self.replies().status.next()
    }

    async fn toggle_interaction(
        &self,
        _token: &str,
        request: &ToggleRequest,
    ) -> Result<ToggleResult, ClientError> {
        self.record(
            "toggle_interaction",
            format!(
                "article={} kind={:?}",
                request.article_id, request.interaction_type
            ),
        );
        self.replies().toggle.next()
    }

    async fn log_interaction(
        &self,
        user_id: &str,
        event: &LogInteraction,
    ) -> Result<(), ClientError> {
        self.record(
            "log_interaction",
            format!(
                "user={user_id} article={} kind={:?}",
                event.article_id, event.interaction_type
            ),
        );
        self.replies().log.next()
    }

    async fn admin_delete_article(
        &self,
        _token: &str,
        article_id: i64,
        request: &AdminDeleteRequest,
    ) -> Result<AdminAction, ClientError> {
        self.record(
            "admin_delete_article",
            format!("id={article_id} reason={}", request.reason),
        );
        self.replies().admin_delete.next()
    }
}

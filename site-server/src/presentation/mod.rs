use std::sync::Arc;

use sqlx::PgPool;

use crate::application::auth_service::AuthService;
use crate::application::blog_service::BlogService;
use crate::data::post_repository::PostRepository;
use crate::data::repositories::memory::MemoryStore;
use crate::data::repositories::postgres::post_repository::PostgresPostRepository;
use crate::data::repositories::postgres::user_repository::PostgresUserRepository;
use crate::data::user_repository::UserRepository;
use crate::infrastructure::jwt::JwtService;

pub(crate) mod app_error;
pub(crate) mod flash;
pub(crate) mod forms;
pub(crate) mod handlers;
pub(crate) mod http_handlers;
pub(crate) mod middleware;
pub(crate) mod openapi;
pub(crate) mod routes;
pub(crate) mod views;


pub(crate) type SharedUserRepository = Arc<dyn UserRepository>;
pub(crate) type SharedPostRepository = Arc<dyn PostRepository>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) auth_service: Arc<AuthService<SharedUserRepository>>,
    pub(crate) blog_service: Arc<BlogService<SharedPostRepository>>,
    /// Adds `Secure` to the session cookie.
    pub(crate) cookie_secure: bool,
}

impl AppState {
    pub(crate) fn new(
        users: SharedUserRepository,
        posts: SharedPostRepository,
        jwt: JwtService,
        cookie_secure: bool,
    ) -> Self {
        Self {
            auth_service: Arc::new(AuthService::new(users, jwt)),
            blog_service: Arc::new(BlogService::new(posts)),
            cookie_secure,
        }
    }

    pub(crate) fn postgres(pool: PgPool, jwt: JwtService, cookie_secure: bool) -> Self {
        Self::new(
            Arc::new(PostgresUserRepository::new(pool.clone())),
            Arc::new(PostgresPostRepository::new(pool)),
            jwt,
            cookie_secure,
        )
    }

    pub(crate) fn in_memory(store: MemoryStore, jwt: JwtService, cookie_secure: bool) -> Self {
        Self::new(
            Arc::new(store.clone()),
            Arc::new(store),
            jwt,
            cookie_secure,
        )
    }
}

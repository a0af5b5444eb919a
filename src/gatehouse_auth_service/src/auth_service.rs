use axum::{
    Router,
    http::{HeaderValue, Method, request},
    routing::{get, post, put},
};
use gatehouse_adapters::{
    SessionTokenService,
    config::AllowedOrigins,
    http::routes::{
        forgot_password, login, me, register, reset_password, update_details, update_password,
    },
};
use gatehouse_core::{CredentialHasher, EmailClient, UserStore};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// The assembled authentication service: every route under one router.
pub struct AuthService {
    router: Router,
}

impl AuthService {
    /// Wire the routes to their collaborators.
    ///
    /// Adapters implement Clone via internal sharing (`Arc`, pools), so each
    /// route receives exactly the state it needs and nothing more.
    pub fn new<U, H, E>(
        user_store: U,
        hasher: H,
        token_service: SessionTokenService,
        email_client: E,
    ) -> Self
    where
        U: UserStore + Clone + 'static,
        H: CredentialHasher + Clone + 'static,
        E: EmailClient + Clone + 'static,
    {
        let router = Router::new()
            .route("/register", post(register::<U, H, E>))
            .with_state((
                user_store.clone(),
                hasher.clone(),
                token_service.clone(),
                email_client.clone(),
            ))
            .route("/login", post(login::<U, H, E>))
            .with_state((
                user_store.clone(),
                hasher.clone(),
                token_service.clone(),
                email_client.clone(),
            ))
            // Profile reads and edits only need the store and the gate
            .route("/me", get(me::<U>))
            .with_state((user_store.clone(), token_service.clone()))
            .route("/updatedetails", put(update_details::<U>))
            .with_state((user_store.clone(), token_service.clone()))
            .route("/updatepassword", put(update_password::<U, H>))
            .with_state((user_store.clone(), hasher.clone(), token_service.clone()))
            .route("/forgotpassword", post(forgot_password::<U, E>))
            .with_state((user_store.clone(), email_client.clone()))
            .route("/resetpassword/{resettoken}", put(reset_password::<U, H, E>))
            .with_state((user_store, hasher, token_service, email_client));

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// The service as a router fit for nesting into a larger application.
    pub fn as_nested_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Serve the routes under `/auth` on the given listener.
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = Router::new().nest("/auth", self.as_nested_router(allowed_origins));

        tracing::info!("Auth service listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}

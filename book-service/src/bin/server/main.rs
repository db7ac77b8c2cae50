use std::sync::Arc;

use book_service::config::Config;
use book_service::domain::book::models::NewBook;
use book_service::domain::book::ports::BookRepository;
use book_service::domain::book::ports::BookServicePort;
use book_service::domain::book::service::BookService;
use book_service::domain::user::models::NewUser;
use book_service::domain::user::models::UserId;
use book_service::domain::user::ports::CredentialHasher;
use book_service::domain::user::ports::UserRepository;
use book_service::domain::user::ports::UserServicePort;
use book_service::domain::user::service::UserService;
use book_service::inbound::http::router::create_router;
use book_service::outbound::auth::Argon2CredentialHasher;
use book_service::outbound::auth::JwtTokenCodec;
use book_service::outbound::repositories::InMemoryStore;
use book_service::outbound::repositories::PostgresStore;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const MAX_DB_CONNECTIONS: u32 = 5;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "book_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "book-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    let persistence = match config.database.url {
        Some(_) => "postgresql",
        None => "memory",
    };
    tracing::info!(
        persistence,
        http_port = config.server.http_port,
        token_ttl_seconds = config.jwt.expiration_seconds,
        request_timeout_seconds = config.server.request_timeout_seconds,
        "Configuration loaded"
    );

    let hasher = Arc::new(Argon2CredentialHasher::new(config.hasher.params())?);
    let tokens = Arc::new(JwtTokenCodec::new(
        config.jwt.secret.as_bytes(),
        config.jwt.expiration(),
    ));

    let (user_service, book_service): (Arc<dyn UserServicePort>, Arc<dyn BookServicePort>) =
        match &config.database.url {
            Some(url) => {
                let pg_pool = PgPoolOptions::new()
                    .max_connections(MAX_DB_CONNECTIONS)
                    .connect(url)
                    .await?;
                tracing::info!(
                    max_connections = MAX_DB_CONNECTIONS,
                    database = "postgresql",
                    "Database connection pool created"
                );

                sqlx::migrate!("./migrations").run(&pg_pool).await?;
                tracing::info!(database = "postgresql", "Database migrations completed");

                services(Arc::new(PostgresStore::new(pg_pool)), hasher, tokens)
            }
            None => {
                let store = Arc::new(InMemoryStore::new());
                if config.database.seed {
                    let (users, books) = demo_data(hasher.as_ref())?;
                    let (user_count, book_count) = (users.len(), books.len());
                    store.seed(users, books).await?;
                    tracing::info!(
                        users = user_count,
                        books = book_count,
                        "In-memory store seeded"
                    );
                }

                services(store, hasher, tokens)
            }
        };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        user_service,
        book_service,
        config.server.request_timeout(),
    );

    axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server exited successfully");

    Ok(())
}

fn services<S>(
    store: Arc<S>,
    hasher: Arc<Argon2CredentialHasher>,
    tokens: Arc<JwtTokenCodec>,
) -> (Arc<dyn UserServicePort>, Arc<dyn BookServicePort>)
where
    S: UserRepository + BookRepository,
{
    let user_service: Arc<dyn UserServicePort> =
        Arc::new(UserService::new(Arc::clone(&store), hasher, tokens));
    let book_service: Arc<dyn BookServicePort> = Arc::new(BookService::new(store));

    (user_service, book_service)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}

/// Demo accounts and their books for local runs without a database.
fn demo_data(
    hasher: &impl CredentialHasher,
) -> Result<(Vec<NewUser>, Vec<NewBook>), anyhow::Error> {
    let accounts = [
        ("johndoe@net.eu", "JohnPassw0rd", "John", "Doe", 30),
        ("janedoe@net.eu", "JanePassw0rd", "Jane", "Doe", 25),
        ("jankowalski@net.pl", "JanPassw0rd", "Jan", "Kowalski", 30),
    ];

    let users = accounts
        .into_iter()
        .map(|(email, password, first_name, last_name, age)| {
            let password_hash = hasher.hash(password)?;
            Ok::<_, anyhow::Error>(NewUser {
                email: email.to_string(),
                password_hash,
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                age,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let books = [
        (1, "J.R.R. Tolkien", "The Lord of the Rings"),
        (2, "J.K. Rowling", "Harry Potter"),
        (3, "Stephen King", "The Shining"),
    ]
    .into_iter()
    .map(|(creator, author, title)| NewBook {
        author: author.to_string(),
        title: title.to_string(),
        created_by: Some(UserId(creator)),
    })
    .collect();

    Ok((users, books))
}

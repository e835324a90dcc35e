//! graphnav binary — serve the REST API or seed a demo graph.

use clap::Parser;

use graphnav::api;
use graphnav::cli::{Cli, Command};
use graphnav::graph::service::GraphService;
use graphnav::graph::store::GraphStore;
use graphnav::observability::init_logging;
use graphnav::seed::seed_database;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            db_path,
            host,
            port,
        } => {
            tracing::info!(%db_path, "opening graph store");
            let store = GraphStore::open(&db_path)?;
            let service = GraphService::new(store);
            let app = api::router(service);

            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("graphnav listening on http://{addr}");

            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = tokio::signal::ctrl_c().await;
                    tracing::info!("shutting down");
                })
                .await?;
        }
        Command::Seed { db_path } => {
            let store = GraphStore::open(&db_path)?;
            seed_database(&store)?;
        }
    }

    Ok(())
}

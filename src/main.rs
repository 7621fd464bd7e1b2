use greenway::args::{self, CleanArgs};
use greenway::controller::{self, Workspace};
use greenway::logging::init_logging;
use greenway::storage::{KvStore, MemoryStore, SqliteStore};
use greenway::sync;

use actix_files::Files;
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use std::sync::Arc;
use tokio::sync::Mutex;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = match args::args_checks() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    };
    init_logging(&args.log_level, args.log_dir.as_deref())?;

    let kv = open_store(&args)?;
    let sync_config = args.sync_config();
    let remote_sync = sync_config.is_some();
    let workspace = Workspace::open(kv, args.holes, sync::from_config(sync_config), remote_sync);
    let workspace = Data::new(Mutex::new(workspace));

    let static_dir = args.static_dir.clone();
    log::info!("event=server_start module=main status=ok bind={}", args.bind);
    HttpServer::new(move || {
        App::new()
            .app_data(workspace.clone())
            .configure(controller::configure)
            .service(Files::new("/static", static_dir.clone()))
    })
    .bind(&args.bind)?
    .run()
    .await?;
    Ok(())
}

fn open_store(args: &CleanArgs) -> Result<Arc<dyn KvStore>, Box<dyn std::error::Error>> {
    let store: Arc<dyn KvStore> = match &args.store_path {
        Some(path) => Arc::new(SqliteStore::open(path)?),
        None => Arc::new(MemoryStore::new()),
    };
    log::info!(
        "event=store_open module=main status=ok path={}",
        args.store_path
            .as_deref()
            .map_or_else(|| args::MEMORY_STORE.to_string(), |p| p.display().to_string())
    );
    Ok(store)
}

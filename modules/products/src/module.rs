use std::sync::Arc;

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{debug, info};

use crate::api::rest::routes;
use crate::config::ProductsConfig;
use crate::contract::client::ProductsApi;
use crate::domain::service::{Service, ServiceConfig};
use crate::gateways::local::ProductsLocalClient;
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::sea_orm_repo::SeaOrmProductsRepository;

/// Products module: owns the domain service and wires storage, REST and the
/// in-process client around it.
#[derive(Default)]
pub struct Products {
    // Keep the domain service behind ArcSwap for cheap read-mostly access.
    service: arc_swap::ArcSwapOption<Service>,
}

impl Products {
    /// Run migrations, then build the repository and domain service on `db`.
    pub async fn init(&self, cfg: ProductsConfig, db: DatabaseConnection) -> anyhow::Result<()> {
        info!("Initializing products module");
        debug!(
            "Loaded products config: default_page_size={}, max_page_size={}",
            cfg.default_page_size, cfg.max_page_size
        );

        self.migrate(&db).await?;

        // Wire repository (infra) to domain service (port)
        let repo = SeaOrmProductsRepository::new(db);
        let service_config = ServiceConfig {
            default_page_size: cfg.default_page_size,
            max_page_size: cfg.max_page_size,
        };
        let service = Service::new(Arc::new(repo), service_config);
        self.service.store(Some(Arc::new(service)));
        Ok(())
    }

    pub async fn migrate(&self, db: &DatabaseConnection) -> anyhow::Result<()> {
        info!("Running products database migrations");
        Migrator::up(db, None).await?;
        info!("Products database migrations completed successfully");
        Ok(())
    }

    fn service(&self) -> anyhow::Result<Arc<Service>> {
        self.service
            .load_full()
            .ok_or_else(|| anyhow::anyhow!("Service not initialized"))
    }

    /// Mount the REST routes onto `router`.
    pub fn register_rest(&self, router: axum::Router) -> anyhow::Result<axum::Router> {
        info!("Registering products REST routes");
        let router = routes::register_routes(router, self.service()?)?;
        info!("Products REST routes registered successfully");
        Ok(router)
    }

    /// In-process implementation of the public contract.
    pub fn local_client(&self) -> anyhow::Result<Arc<dyn ProductsApi>> {
        Ok(Arc::new(ProductsLocalClient::new(self.service()?)))
    }

    /// OpenAPI fragment for the routes mounted by [`Products::register_rest`].
    pub fn openapi(&self) -> utoipa::openapi::OpenApi {
        use utoipa::OpenApi;
        crate::api::rest::openapi::ProductsApiDoc::openapi()
    }
}

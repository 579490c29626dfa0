use storefront_schema::{
    config::AppConfig,
    db::{create_orm_conn, migration_status, run_migrations},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    config.init_tracing();

    let orm = create_orm_conn(&config.database_url).await?;

    match std::env::args().nth(1).as_deref() {
        None | Some("up") => run_migrations(&orm).await?,
        Some("status") => {
            for (name, applied) in migration_status(&orm).await? {
                let mark = if applied { "applied" } else { "pending" };
                println!("{mark:>8}  {name}");
            }
        }
        Some(other) => anyhow::bail!("unknown command {other:?}, expected `up` or `status`"),
    }
    Ok(())
}

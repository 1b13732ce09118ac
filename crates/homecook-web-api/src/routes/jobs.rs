use std::time::Instant;

use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use super::store::RecipeStore;

// every night at 00:01
const REFRESH_SCHEDULE: &str = "0 1 0 1/1 * ? *";

/// Keep the recipe cache warm overnight so the first library view of the
/// day does not pay for a full upstream fetch.
pub(crate) async fn schedule_cache_refresh(store: RecipeStore) {
    if let Err(err) = try_schedule(store).await {
        tracing::error!("could not start refresh job: {err}");
    }
}

async fn try_schedule(store: RecipeStore) -> Result<(), JobSchedulerError> {
    tracing::info!("starting refresh job");
    let shed = JobScheduler::new().await?;

    shed.add(Job::new_async(REFRESH_SCHEDULE, move |uuid, _| {
        let store = store.clone();
        Box::pin(async move {
            tracing::info!("refreshing recipe cache (job: {uuid:?})");
            let start = Instant::now();
            match store.refresh().await {
                Ok(recipes) => {
                    let took = start.elapsed();
                    tracing::info!("refreshed {} recipes (took {took:?})", recipes.len());
                }
                Err(err) => tracing::error!("could not refresh recipe cache: {err}"),
            }
        })
    })?)
    .await?;

    shed.start().await?;
    tracing::info!("started refresh job");

    Ok(())
}

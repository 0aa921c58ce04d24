use std::path::PathBuf;
use std::sync::Arc;

use focus_engine::adapter::config::{self, Configuration};
use focus_engine::adapter::repository::{
    DurationConfiguration, JsonProfileStore, MemoryProfileStore, MessageConfiguration,
    ScoreConfiguration,
};
use focus_engine::domain::engine::{FocusEngine, TimerPort};
use focus_engine::domain::entity::Profile;
use focus_engine::domain::repository::ProfileRepository;
use focus_engine::utils::xdg::{Xdg, XdgBaseKind};
use snafu::{prelude::*, Whatever};

use crate::cli::Arguments;

const APP_NAME: &str = "focus-timer";

pub async fn bootstrap(arg: &Arguments) -> Result<Arc<dyn TimerPort>, Whatever> {
    let configuration = configuration(arg)?;
    let profiles = profiles(arg).await?;
    let engine = engine(configuration, profiles).await?;
    Ok(engine)
}

fn configuration(arg: &Arguments) -> Result<Arc<Configuration>, Whatever> {
    let res = match &arg.config {
        Some(path) => config::load_with_path(path),
        None => config::load_with_xdg(APP_NAME),
    };

    let configuration = res.whatever_context("Could not load configuration")?;
    Ok(Arc::new(configuration))
}

async fn profiles(arg: &Arguments) -> Result<Arc<dyn ProfileRepository>, Whatever> {
    if arg.guest {
        tracing::info!("Running as guest, points will not be kept");
        return Ok(Arc::new(MemoryProfileStore::new()));
    }

    let path = match &arg.profile {
        Some(path) => path.clone(),
        None => profile_path()?,
    };

    let store = JsonProfileStore::new(path);
    let created = store
        .ensure(Profile::new("local", "Student"))
        .await
        .whatever_context(format!(
            "Could not prepare profile at {}",
            store.path().display()
        ))?;
    if created {
        tracing::info!(path = %store.path().display(), "Created a new profile");
    }

    Ok(Arc::new(store))
}

fn profile_path() -> Result<PathBuf, Whatever> {
    Xdg::new(APP_NAME)
        .and_then(|xdg| xdg.resolve_create(XdgBaseKind::Data, "profile.json"))
        .whatever_context("Could not use XDG base directories")
}

async fn engine(
    config: Arc<Configuration>,
    profiles: Arc<dyn ProfileRepository>,
) -> Result<Arc<dyn TimerPort>, Whatever> {
    let duration_repository = Arc::new(DurationConfiguration::new(Arc::clone(&config)));
    let score_repository = Arc::new(ScoreConfiguration::new(Arc::clone(&config)));
    let message_repository = Arc::new(MessageConfiguration::new(config));

    let engine = FocusEngine::setup(
        duration_repository,
        score_repository,
        message_repository,
        profiles,
    )
    .await
    .whatever_context("Could not setup focus engine")?;

    Ok(Arc::new(engine))
}

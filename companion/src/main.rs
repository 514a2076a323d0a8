//! Command-line front end: wires the adapters from settings and runs one
//! repository operation per invocation, printing the result as JSON.

use std::ffi::OsString;
use std::io::{self, Write};
use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Result, WrapErr};
use mockable::{Clock, DefaultClock};
use ortho_config::OrthoConfig;
use serde::Serialize;
use serde_json::json;
use tracing::info;

use companion::CompanionSettings;
use companion::domain::ports::{AccessTokenProvider, KeyValueStore};
use companion::domain::repositories::{
    AccessPolicy, AuthRepository, DeviceRepository, ForecastRepository, RewardsRepository,
    SearchRepository, WeatherHistoryRepository,
};
use companion::domain::{
    ClaimRequest, Credentials, DeviceId, FailureKind, Location, RecencyStore, RecentSearch,
};
use companion::outbound::cache::{
    CacheAuthDataSource, CacheDeviceDataSource, CacheForecastDataSource, CacheRewardsDataSource,
    InMemoryKeyValueStore, JsonCache, RedisKeyValueStore,
};
use companion::outbound::memory::MemorySearchDataSource;
use companion::outbound::network::{
    ApiClient, NetworkAuthDataSource, NetworkDeviceDataSource, NetworkForecastDataSource,
    NetworkRewardsDataSource, NetworkSearchDataSource, NetworkWeatherHistoryDataSource,
};
use companion::outbound::persistence::{
    DatabaseSearchDataSource, DbPool, DieselRecentSearchesDao, DieselWeatherHistoryDataSource,
    PoolConfig,
};
use companion::telemetry;

#[derive(Debug, Parser)]
#[command(name = "companion", about = "Weather-station companion data access")]
struct Cli {
    /// Sign in with these credentials before running the command.
    #[arg(long, global = true, requires = "password")]
    username: Option<String>,
    #[arg(long, global = true, requires = "username")]
    password: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sign in and keep the token pair in the cache.
    Login,
    /// List the signed-in user's devices.
    Devices,
    /// Claim a device, retrying while the backend is still processing it.
    Claim(ClaimArgs),
    /// Observed hourly history of one device for one day.
    History {
        device_id: String,
        date: NaiveDate,
        #[arg(long, value_enum, default_value_t = Policy::PreferLocal)]
        policy: Policy,
    },
    /// Forecast of one device between two days, inclusive.
    Forecast {
        device_id: String,
        from: NaiveDate,
        to: NaiveDate,
        #[arg(long, value_enum, default_value_t = Policy::PreferLocal)]
        policy: Policy,
    },
    /// Search stations and places.
    Search {
        query: String,
        #[arg(long)]
        exact: bool,
        /// Remember the first suggestion as a recent search.
        #[arg(long)]
        remember: bool,
    },
    /// Recent searches, newest first.
    Recents,
    /// Forget every recent search.
    ClearRecents,
    /// Rewards of one or more devices.
    Rewards {
        #[arg(required = true)]
        device_ids: Vec<String>,
    },
}

#[derive(Debug, Args)]
struct ClaimArgs {
    serial_number: String,
    #[arg(long, allow_negative_numbers = true)]
    lat: f64,
    #[arg(long, allow_negative_numbers = true)]
    lon: f64,
    #[arg(long)]
    secret: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Policy {
    PreferLocal,
    RemoteOnly,
    LocalOnly,
}

impl From<Policy> for AccessPolicy {
    fn from(value: Policy) -> Self {
        match value {
            Policy::PreferLocal => Self::PreferLocal,
            Policy::RemoteOnly => Self::RemoteOnly,
            Policy::LocalOnly => Self::LocalOnly,
        }
    }
}

/// Repositories wired against the configured media.
struct Services {
    auth: AuthRepository,
    devices: DeviceRepository,
    history: WeatherHistoryRepository,
    forecast: ForecastRepository,
    search: SearchRepository,
    rewards: RewardsRepository,
    recents: Arc<RecencyStore>,
}

impl Services {
    async fn build(settings: &CompanionSettings) -> Result<Self> {
        let clock: Arc<dyn Clock> = Arc::new(DefaultClock);

        let store: Arc<dyn KeyValueStore> = match settings.redis_url() {
            Some(url) => Arc::new(
                RedisKeyValueStore::connect(url, settings.pool_max_size())
                    .await
                    .wrap_err("connecting to the Redis cache")?,
            ),
            None => Arc::new(InMemoryKeyValueStore::new(Arc::clone(&clock))),
        };
        let cache = JsonCache::new(store);

        let cached_auth = Arc::new(CacheAuthDataSource::new(cache.clone()));
        let tokens: Arc<dyn AccessTokenProvider> = cached_auth.clone();
        let client = Arc::new(
            ApiClient::new(
                settings.api_base_url()?,
                settings.request_timeout(),
                tokens,
            )
            .wrap_err("building the API client")?,
        );

        let database_path = settings.database_path();
        let pool = DbPool::new(
            PoolConfig::new(database_path.to_string_lossy())
                .with_max_size(settings.pool_max_size()),
        )
        .await
        .wrap_err_with(|| format!("opening {}", database_path.display()))?;

        let recents = Arc::new(RecencyStore::new(
            Arc::new(DieselRecentSearchesDao::new(pool.clone())),
            Arc::clone(&clock),
            settings.recents_max_entries()?,
        ));

        Ok(Self {
            auth: AuthRepository::new(
                Arc::new(NetworkAuthDataSource::new(Arc::clone(&client))),
                cached_auth,
            ),
            devices: DeviceRepository::new(
                Arc::new(NetworkDeviceDataSource::new(Arc::clone(&client))),
                Arc::new(CacheDeviceDataSource::new(cache.clone())),
            ),
            history: WeatherHistoryRepository::new(
                Arc::new(NetworkWeatherHistoryDataSource::new(Arc::clone(&client))),
                Arc::new(DieselWeatherHistoryDataSource::new(pool, Arc::clone(&clock))),
                clock,
            ),
            forecast: ForecastRepository::new(
                Arc::new(NetworkForecastDataSource::new(Arc::clone(&client))),
                Arc::new(CacheForecastDataSource::new(
                    cache.clone(),
                    settings.forecast_ttl(),
                )),
            ),
            search: SearchRepository::new(
                Arc::new(NetworkSearchDataSource::new(Arc::clone(&client))),
                Arc::new(MemorySearchDataSource::new()),
                Arc::new(DatabaseSearchDataSource::new(Arc::clone(&recents))),
            ),
            rewards: RewardsRepository::new(
                Arc::new(NetworkRewardsDataSource::new(client)),
                Arc::new(CacheRewardsDataSource::new(cache)),
            ),
            recents,
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    telemetry::init();

    let cli = Cli::parse();
    let settings = CompanionSettings::load_from_iter([OsString::from("companion")])
        .wrap_err("loading companion settings")?;
    let services = Services::build(&settings).await?;

    if let (Some(username), Some(password)) = (cli.username, cli.password) {
        services
            .auth
            .login(&Credentials { username, password })
            .await
            .wrap_err("signing in")?;
    }

    run(&services, cli.command).await
}

async fn run(services: &Services, command: Command) -> Result<()> {
    match command {
        Command::Login => {
            let signed_in = services.auth.auth_token().await.is_ok();
            info!(signed_in, "session state");
            print_json(&json!({ "signed_in": signed_in }))
        }
        Command::Devices => print_json(&services.devices.user_devices().await?),
        Command::Claim(args) => {
            let request = ClaimRequest {
                serial_number: args.serial_number,
                location: Location::new(args.lat, args.lon)?,
                secret: args.secret,
            };
            print_json(&services.devices.claim(&request).await?)
        }
        Command::History {
            device_id,
            date,
            policy,
        } => {
            let device_id = DeviceId::new(device_id)?;
            print_json(
                &services
                    .history
                    .history(&device_id, date, policy.into())
                    .await?,
            )
        }
        Command::Forecast {
            device_id,
            from,
            to,
            policy,
        } => {
            let device_id = DeviceId::new(device_id)?;
            print_json(
                &services
                    .forecast
                    .forecast(&device_id, from, to, policy.into())
                    .await?,
            )
        }
        Command::Search {
            query,
            exact,
            remember,
        } => {
            let suggestions = services
                .search
                .search(&query, exact, AccessPolicy::PreferLocal)
                .await?;
            if let Some(first) = suggestions.first().filter(|_| remember) {
                services
                    .search
                    .record_selection(&first.clone().into())
                    .await?;
            }
            print_json(&suggestions)
        }
        Command::Recents => match services.search.recent_searches().await {
            Ok(recents) => print_json(&recents),
            Err(failure) if failure.kind() == FailureKind::DatabaseMiss => {
                print_json(&Vec::<RecentSearch>::new())
            }
            Err(failure) => Err(failure.into()),
        },
        Command::ClearRecents => {
            services.recents.clear().await?;
            print_json(&json!({ "cleared": true }))
        }
        Command::Rewards { device_ids } => {
            let device_ids = device_ids
                .into_iter()
                .map(DeviceId::new)
                .collect::<Result<Vec<_>, _>>()?;
            print_json(&services.rewards.rewards_for_devices(&device_ids).await?)
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value).wrap_err("writing JSON output")?;
    writeln!(stdout).wrap_err("writing JSON output")?;
    Ok(())
}

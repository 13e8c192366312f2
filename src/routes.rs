use crate::{
    api::{attendance, health},
    config::Config,
    error::AppError,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::Condition, web};
use anyhow::Context;
use std::sync::Arc;

type IpGovernor = Governor<PeerIpKeyExtractor, NoOpMiddleware>;

/// Per-IP request limiter for the API scope.
///
/// Built once in `main` and cloned into every worker so all workers share the
/// same buckets.
#[derive(Clone)]
pub struct RateLimit {
    governor: Arc<IpGovernor>,
    enabled: bool,
}

impl RateLimit {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let requests_per_min = config.rate_limit_per_min;
        let per_ms = 60_000 / u64::from(requests_per_min.max(1));

        let governor_config = GovernorConfigBuilder::default()
            .milliseconds_per_request(per_ms.max(1))
            .burst_size(requests_per_min.max(1))
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .context("Invalid rate limit configuration")?;

        Ok(Self {
            governor: Arc::new(Governor::new(&governor_config)),
            enabled: requests_per_min > 0,
        })
    }

    fn middleware(&self) -> Condition<Arc<IpGovernor>> {
        Condition::new(self.enabled, self.governor.clone())
    }
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config, limiter: &RateLimit) {
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        AppError::BadRequest {
            message: "Invalid JSON body",
            details: err.to_string(),
        }
        .into()
    });
    // Non-numeric ids can never match a record.
    let path_config = web::PathConfig::default()
        .error_handler(|_err, _req| AppError::NotFound("Attendance record not found").into());

    let available = health::available_routes(&config.api_prefix);

    cfg.app_data(json_config)
        .app_data(path_config)
        .route("/health", web::get().to(health::health))
        .service(
            web::scope(&config.api_prefix)
                .wrap(limiter.middleware())
                .route("/test", web::get().to(health::api_test))
                .service(
                    web::scope("/attendance")
                        // /attendance
                        .service(
                            web::resource("")
                                .route(web::get().to(attendance::list_attendance))
                                .route(web::post().to(attendance::create_attendance)),
                        )
                        // literal segments before /{id}
                        .service(
                            web::resource("/search")
                                .route(web::get().to(attendance::search_attendance)),
                        )
                        .service(
                            web::resource("/filter")
                                .route(web::get().to(attendance::filter_attendance)),
                        )
                        // /attendance/{id}
                        .service(
                            web::resource("/{id}")
                                .route(web::delete().to(attendance::delete_attendance)),
                        ),
                ),
        )
        .default_service(web::to(move || {
            let available = available.clone();
            async move { health::route_not_found(&available) }
        }));
}

use std::sync::Arc;

use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;

use crate::api::{employee, holiday, ingest, leave, payroll, report};
use crate::config::Config;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    let ingest_limiter = Arc::new(build_limiter(config.rate_ingest_per_min));
    let report_limiter = Arc::new(build_limiter(config.rate_report_per_min));
    let admin_limiter = Arc::new(build_limiter(config.rate_admin_per_min));

    cfg.service(
        web::scope(&config.api_prefix)
            .service(
                web::scope("/ingest")
                    .wrap(ingest_limiter)
                    .service(
                        web::resource("/punches").route(web::post().to(ingest::ingest_punches)),
                    )
                    .service(web::resource("/calls").route(web::post().to(ingest::ingest_calls))),
            )
            .service(
                web::scope("/report")
                    .wrap(report_limiter.clone())
                    .service(web::resource("/onsite").route(web::get().to(report::onsite_report)))
                    .service(
                        web::resource("/onsite/{employee_id}/summary")
                            .route(web::get().to(report::onsite_summary)),
                    )
                    .service(web::resource("/remote").route(web::get().to(report::remote_report))),
            )
            .service(
                web::scope("/payroll")
                    .wrap(report_limiter)
                    .service(web::resource("").route(web::get().to(payroll::payroll_dashboard)))
                    .service(
                        web::resource("/adjustments")
                            .route(web::post().to(payroll::add_adjustment))
                            .route(web::get().to(payroll::list_adjustments)),
                    )
                    .service(
                        web::resource("/adjustments/{id}")
                            .route(web::delete().to(payroll::delete_adjustment)),
                    ),
            )
            .service(
                web::scope("/employees")
                    .wrap(admin_limiter.clone())
                    .service(
                        web::resource("")
                            .route(web::post().to(employee::create_employee))
                            .route(web::get().to(employee::list_employees)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(employee::get_employee))
                            .route(web::put().to(employee::update_employee)),
                    )
                    .service(
                        web::resource("/{id}/shift-history")
                            .route(web::post().to(employee::add_shift_entry))
                            .route(web::get().to(employee::list_shift_entries)),
                    ),
            )
            .service(
                web::scope("/remote-employees")
                    .wrap(admin_limiter.clone())
                    .service(
                        web::resource("")
                            .route(web::post().to(employee::create_remote_employee))
                            .route(web::get().to(employee::list_remote_employees)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(employee::get_remote_employee))
                            .route(web::put().to(employee::update_remote_employee)),
                    ),
            )
            .service(
                web::scope("/holidays")
                    .wrap(admin_limiter.clone())
                    .service(
                        web::resource("")
                            .route(web::post().to(holiday::create_holiday))
                            .route(web::get().to(holiday::list_holidays)),
                    )
                    .service(
                        web::resource("/{id}").route(web::delete().to(holiday::delete_holiday)),
                    ),
            )
            .service(
                web::scope("/leave")
                    .wrap(admin_limiter.clone())
                    .service(
                        web::resource("")
                            .route(web::post().to(leave::create_leave))
                            .route(web::get().to(leave::leave_list)),
                    )
                    .service(
                        web::resource("/{id}/approve")
                            .route(web::put().to(leave::approve_leave)),
                    )
                    .service(
                        web::resource("/{id}/reject").route(web::put().to(leave::reject_leave)),
                    ),
            )
            .service(
                web::scope("/early-leave")
                    .wrap(admin_limiter.clone())
                    .service(
                        web::resource("")
                            .route(web::post().to(leave::create_early_leave))
                            .route(web::get().to(leave::early_leave_list)),
                    )
                    .service(
                        web::resource("/{id}/approve")
                            .route(web::put().to(leave::approve_early_leave)),
                    )
                    .service(
                        web::resource("/{id}/decline")
                            .route(web::put().to(leave::decline_early_leave)),
                    ),
            )
            .service(
                web::resource("/attendance")
                    .wrap(admin_limiter)
                    .route(web::put().to(ingest::update_attendance)),
            ),
    );
}

//! Main entry point for the MediBook application.
//!
//! Resolves configuration from the environment once, optionally seeds
//! demonstration data, and serves the REST API.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{router, AppState};
use chrono::NaiveTime;
use medibook_core::{
    Actor, AvailabilityWindow, BookingService, CoreConfig, DoctorRegistration, MemoryStore,
    PatientRegistration, Specialty,
};

/// Starts the MediBook REST server.
///
/// # Environment Variables
/// - `MEDIBOOK_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `MEDIBOOK_NAMESPACE`: Deployment label for logs (default: "medibook.dev")
/// - `MEDIBOOK_SEED_DEMO`: Seed demonstration doctors when set to "1" or "true"
///
/// # Errors
/// Returns an error if configuration is invalid, demo seeding fails, the
/// address cannot be bound, or the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("medibook=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("MEDIBOOK_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let namespace = std::env::var("MEDIBOOK_NAMESPACE").unwrap_or_else(|_| "medibook.dev".into());
    let seed_demo = std::env::var("MEDIBOOK_SEED_DEMO")
        .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    let cfg = CoreConfig::new(rest_addr, namespace, seed_demo)
        .map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;

    tracing::info!(
        "++ Starting MediBook REST on {} ({})",
        cfg.rest_addr(),
        cfg.namespace()
    );

    let service = Arc::new(BookingService::new(MemoryStore::new()));

    if cfg.seed_demo() {
        seed_demo_data(&service).map_err(|e| anyhow::anyhow!("demo seeding failed: {e}"))?;
    }

    let app = router(AppState::new(service));

    let listener = tokio::net::TcpListener::bind(cfg.rest_addr()).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Seeds a handful of approved doctors and a patient so a fresh instance is
/// browsable immediately.
fn seed_demo_data(service: &BookingService<MemoryStore>) -> medibook_core::BookingResult<()> {
    let nine = NaiveTime::from_hms_opt(9, 0, 0).expect("valid constant time");
    let five = NaiveTime::from_hms_opt(17, 0, 0).expect("valid constant time");
    let weekday_hours: Vec<AvailabilityWindow> = (1..=5)
        .map(|day| AvailabilityWindow {
            day_of_week: day,
            start_time: nine,
            end_time: five,
            is_available: true,
        })
        .collect();

    let demo_doctors = [
        ("Dr. Jane Lee", "jane.lee@medibook.example", Specialty::Cardiology, 9u32, 12_000u64),
        ("Dr. Cardio Smith", "c.smith@medibook.example", Specialty::Neurology, 14, 15_000),
        ("Dr. Omar Haddad", "o.haddad@medibook.example", Specialty::Dermatology, 6, 8_000),
    ];

    let patient = service.register_patient(PatientRegistration {
        email: "demo.patient@medibook.example".into(),
        full_name: "Demo Patient".into(),
        phone: None,
        date_of_birth: None,
        address: None,
    })?;
    tracing::info!(patient_id = %patient.id, "seeded demo patient");

    // The demo admin stands in for the external approval process.
    let admin = service.register_admin("demo.admin@medibook.example", "Demo Admin")?;
    let approver = Actor::Admin { user_id: admin.id };

    for (index, (name, email, specialty, years, fee_cents)) in demo_doctors.into_iter().enumerate()
    {
        let profile = service.register_doctor(DoctorRegistration {
            email: email.into(),
            full_name: name.into(),
            phone: None,
            specialty,
            license_number: format!("DEMO-{:04}", index + 1),
            years_of_experience: years,
            education: "Demo Medical School".into(),
            bio: None,
            consultation_fee_cents: fee_cents,
            availability: weekday_hours.clone(),
        })?;
        service.set_doctor_approval(&approver, profile.id, true)?;
        tracing::info!(doctor_id = %profile.id, "seeded approved demo doctor");
    }

    Ok(())
}

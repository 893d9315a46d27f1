//! # API REST
//!
//! REST API implementation for MediBook.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, error-to-status
//!   mapping)
//!
//! The acting identity arrives as an `X-User-Id` header (a stand-in for the
//! external session collaborator), is resolved against the store once, and is
//! passed into the core explicitly. Uses `api-shared` for wire types.

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{Path as AxumPath, Query, State},
    http::{HeaderMap, StatusCode},
    response::Json,
    routing::{delete, get, post, put},
    Router,
};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use uuid::Uuid;

use api_shared::{
    AppointmentListRes, AppointmentRes, AppointmentViewRes, AvailabilityWindowDto,
    BookAppointmentReq, DoctorListRes, DoctorRes, ErrorRes, HealthRes, RegisterDoctorReq,
    RegisterPatientReq, UpdateStatusReq, UserRes,
};
use api_shared::HealthService;
use medibook_core::{
    Actor, AppointmentStatus, BookingError, BookingService, DoctorRegistration, MemoryStore,
    NewAppointment, PatientRegistration, SortKey, Specialty, StatusFilter,
};

/// Application state shared across REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<BookingService<MemoryStore>>,
}

impl AppState {
    pub fn new(service: Arc<BookingService<MemoryStore>>) -> Self {
        Self { service }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        register_patient,
        register_doctor,
        list_doctors,
        doctor_detail,
        list_appointments,
        book_appointment,
        update_appointment_status,
        delete_appointment,
    ),
    components(schemas(
        HealthRes,
        ErrorRes,
        RegisterPatientReq,
        RegisterDoctorReq,
        AvailabilityWindowDto,
        UserRes,
        DoctorRes,
        DoctorListRes,
        BookAppointmentReq,
        UpdateStatusReq,
        AppointmentRes,
        AppointmentViewRes,
        AppointmentListRes,
    ))
)]
pub struct ApiDoc;

/// Builds the REST router with all routes, docs and CORS wired up.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/patients", post(register_patient))
        .route("/doctors", post(register_doctor))
        .route("/doctors", get(list_doctors))
        .route("/doctors/:id", get(doctor_detail))
        .route("/appointments", get(list_appointments))
        .route("/appointments", post(book_appointment))
        .route("/appointments/:id/status", put(update_appointment_status))
        .route("/appointments/:id", delete(delete_appointment))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

type ApiError = (StatusCode, Json<ErrorRes>);

/// Maps a domain error onto an HTTP status and a JSON error body.
fn error_response(err: BookingError) -> ApiError {
    let status = match &err {
        BookingError::Validation(_) => StatusCode::BAD_REQUEST,
        BookingError::InvalidTransition { .. } | BookingError::DoctorNotBookable => {
            StatusCode::CONFLICT
        }
        BookingError::NotFound { .. } => StatusCode::NOT_FOUND,
        BookingError::Unauthorized(_) => StatusCode::FORBIDDEN,
        BookingError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
    };
    if status.is_server_error() {
        tracing::error!("request failed: {err}");
    } else {
        tracing::debug!("request rejected: {err}");
    }
    (
        status,
        Json(ErrorRes {
            error: err.to_string(),
        }),
    )
}

/// Resolves the acting identity from the `X-User-Id` header.
fn acting_identity(state: &AppState, headers: &HeaderMap) -> Result<Actor, ApiError> {
    let raw = headers
        .get("x-user-id")
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ErrorRes {
                    error: "missing X-User-Id header".into(),
                }),
            )
        })?;

    let user_id = Uuid::parse_str(raw).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorRes {
                error: format!("invalid X-User-Id header: {raw}"),
            }),
        )
    })?;

    state.service.resolve_actor(user_id).map_err(error_response)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint used for monitoring and load balancer checks.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/patients",
    request_body = RegisterPatientReq,
    responses(
        (status = 201, description = "Patient registered", body = UserRes),
        (status = 400, description = "Invalid registration data", body = ErrorRes)
    )
)]
/// Registers a patient account.
#[axum::debug_handler]
async fn register_patient(
    State(state): State<AppState>,
    Json(req): Json<RegisterPatientReq>,
) -> Result<(StatusCode, Json<UserRes>), ApiError> {
    let user = state
        .service
        .register_patient(PatientRegistration {
            email: req.email,
            full_name: req.full_name,
            phone: req.phone,
            date_of_birth: req.date_of_birth,
            address: req.address,
        })
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[utoipa::path(
    post,
    path = "/doctors",
    request_body = RegisterDoctorReq,
    responses(
        (status = 201, description = "Doctor registered, pending approval", body = DoctorRes),
        (status = 400, description = "Invalid registration data", body = ErrorRes)
    )
)]
/// Registers a doctor account with its professional profile.
///
/// The profile is created unapproved; it stays out of the directory and
/// cannot be booked until an external admin process approves it.
#[axum::debug_handler]
async fn register_doctor(
    State(state): State<AppState>,
    Json(req): Json<RegisterDoctorReq>,
) -> Result<(StatusCode, Json<DoctorRes>), ApiError> {
    let specialty = Specialty::from_str(&req.specialty).map_err(error_response)?;
    let profile = state
        .service
        .register_doctor(DoctorRegistration {
            email: req.email,
            full_name: req.full_name,
            phone: req.phone,
            specialty,
            license_number: req.license_number,
            years_of_experience: req.years_of_experience,
            education: req.education,
            bio: req.bio,
            consultation_fee_cents: req.consultation_fee_cents,
            availability: req.availability.into_iter().map(Into::into).collect(),
        })
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(profile.into())))
}

#[derive(Debug, Default, Deserialize)]
struct DirectoryParams {
    #[serde(default)]
    search: String,
    specialty: Option<String>,
    sort: Option<String>,
}

#[utoipa::path(
    get,
    path = "/doctors",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive name/specialty search"),
        ("specialty" = Option<String>, Query, description = "Exact specialty constraint"),
        ("sort" = Option<String>, Query, description = "Sort key: name, experience or fee")
    ),
    responses(
        (status = 200, description = "Approved doctors matching the query", body = DoctorListRes),
        (status = 400, description = "Unknown specialty or sort key", body = ErrorRes)
    )
)]
/// The patient-facing doctor directory. Only approved doctors ever appear.
#[axum::debug_handler]
async fn list_doctors(
    State(state): State<AppState>,
    Query(params): Query<DirectoryParams>,
) -> Result<Json<DoctorListRes>, ApiError> {
    let specialty = params
        .specialty
        .as_deref()
        .map(Specialty::from_str)
        .transpose()
        .map_err(error_response)?;
    let sort = params
        .sort
        .as_deref()
        .map(SortKey::from_str)
        .transpose()
        .map_err(error_response)?
        .unwrap_or_default();

    let doctors = state
        .service
        .browse_doctors(&params.search, specialty, sort)
        .map_err(error_response)?;
    Ok(Json(DoctorListRes {
        doctors: doctors.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/doctors/{id}",
    params(("id" = Uuid, Path, description = "Doctor profile id")),
    responses(
        (status = 200, description = "Doctor profile with availability", body = DoctorRes),
        (status = 404, description = "No such doctor", body = ErrorRes)
    )
)]
/// A single doctor profile with its joined identity and availability windows.
#[axum::debug_handler]
async fn doctor_detail(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<Uuid>,
) -> Result<Json<DoctorRes>, ApiError> {
    let doctor = state.service.doctor_detail(id).map_err(error_response)?;
    Ok(Json(doctor.into()))
}

#[derive(Debug, Default, Deserialize)]
struct ScheduleParams {
    status: Option<String>,
}

#[utoipa::path(
    get,
    path = "/appointments",
    params(
        ("status" = Option<String>, Query, description = "all, pending, confirmed, cancelled or completed")
    ),
    responses(
        (status = 200, description = "The viewer's appointments, date-ascending", body = AppointmentListRes),
        (status = 401, description = "Missing session header", body = ErrorRes)
    )
)]
/// The acting user's appointments, scoped to their own records and enriched
/// with the counterpart's display data.
#[axum::debug_handler]
async fn list_appointments(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<ScheduleParams>,
) -> Result<Json<AppointmentListRes>, ApiError> {
    let actor = acting_identity(&state, &headers)?;
    let status = params
        .status
        .as_deref()
        .map(StatusFilter::from_str)
        .transpose()
        .map_err(error_response)?
        .unwrap_or_default();

    let views = state
        .service
        .my_appointments(&actor, status)
        .map_err(error_response)?;
    Ok(Json(AppointmentListRes {
        appointments: views.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/appointments",
    request_body = BookAppointmentReq,
    responses(
        (status = 201, description = "Appointment created in pending state", body = AppointmentRes),
        (status = 400, description = "Invalid booking data", body = ErrorRes),
        (status = 409, description = "Doctor not bookable", body = ErrorRes)
    )
)]
/// Books an appointment for the acting patient against an approved doctor.
#[axum::debug_handler]
async fn book_appointment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<BookAppointmentReq>,
) -> Result<(StatusCode, Json<AppointmentRes>), ApiError> {
    let actor = acting_identity(&state, &headers)?;
    let appointment = state
        .service
        .book_appointment(
            &actor,
            NewAppointment {
                doctor_id: req.doctor_id,
                appointment_date: req.appointment_date,
                appointment_time: req.appointment_time,
                reason: req.reason,
                notes: req.notes,
            },
        )
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(appointment.into())))
}

#[utoipa::path(
    put,
    path = "/appointments/{id}/status",
    params(("id" = Uuid, Path, description = "Appointment id")),
    request_body = UpdateStatusReq,
    responses(
        (status = 200, description = "Appointment after the transition", body = AppointmentRes),
        (status = 404, description = "No such appointment", body = ErrorRes),
        (status = 409, description = "Illegal transition for this actor", body = ErrorRes)
    )
)]
/// Moves an appointment along one edge of the lifecycle: confirm, cancel or
/// complete, subject to the transition table.
#[axum::debug_handler]
async fn update_appointment_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    AxumPath(id): AxumPath<Uuid>,
    Json(req): Json<UpdateStatusReq>,
) -> Result<Json<AppointmentRes>, ApiError> {
    let actor = acting_identity(&state, &headers)?;
    let to = AppointmentStatus::from_str(&req.status).map_err(error_response)?;
    let appointment = state
        .service
        .transition_appointment(&actor, id, to)
        .map_err(error_response)?;
    Ok(Json(appointment.into()))
}

#[utoipa::path(
    delete,
    path = "/appointments/{id}",
    params(("id" = Uuid, Path, description = "Appointment id")),
    responses(
        (status = 204, description = "Appointment removed"),
        (status = 403, description = "Not a party to the appointment", body = ErrorRes),
        (status = 404, description = "No such appointment", body = ErrorRes)
    )
)]
/// Hard-removal path. Cancelling via the status endpoint is the canonical
/// flow; this removes the record entirely.
#[axum::debug_handler]
async fn delete_appointment(
    State(state): State<AppState>,
    headers: HeaderMap,
    AxumPath(id): AxumPath<Uuid>,
) -> Result<StatusCode, ApiError> {
    let actor = acting_identity(&state, &headers)?;
    state
        .service
        .delete_appointment(&actor, id)
        .map_err(error_response)?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_statuses_follow_the_taxonomy() {
        let (status, _) = error_response(BookingError::validation("bad"));
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = error_response(BookingError::DoctorNotBookable);
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = error_response(BookingError::InvalidTransition {
            from: AppointmentStatus::Completed,
            to: AppointmentStatus::Pending,
        });
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = error_response(BookingError::not_found("doctor", Uuid::new_v4()));
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = error_response(BookingError::Unauthorized("no".into()));
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = error_response(BookingError::StoreUnavailable("down".into()));
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.error, "store unavailable: down");
    }

    #[test]
    fn acting_identity_requires_the_header() {
        let state = AppState::new(Arc::new(BookingService::new(MemoryStore::new())));

        let headers = HeaderMap::new();
        let err = acting_identity(&state, &headers).expect_err("no header");
        assert_eq!(err.0, StatusCode::UNAUTHORIZED);

        let mut headers = HeaderMap::new();
        headers.insert("x-user-id", "not-a-uuid".parse().expect("header value"));
        let err = acting_identity(&state, &headers).expect_err("bad uuid");
        assert_eq!(err.0, StatusCode::BAD_REQUEST);

        let mut headers = HeaderMap::new();
        headers.insert(
            "x-user-id",
            Uuid::new_v4().to_string().parse().expect("header value"),
        );
        let err = acting_identity(&state, &headers).expect_err("unknown user");
        assert_eq!(err.0, StatusCode::NOT_FOUND);
    }
}

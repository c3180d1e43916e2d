pub mod health;
pub mod places;
pub mod taxonomy;

use axum::Router;
use cuide_core::taxonomy::{
    AdmissionCriterion, AttendanceType, ReferenceWay, Regional, Segment, ServiceType, Taxonomy,
};

use crate::state::AppState;

/// Build the `/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /regionals                  list, create
/// /regionals/{id}             get, update, delete
/// /segments                   (same shape as /regionals)
/// /service-types              (same shape as /regionals)
/// /admission-criteria         (same shape as /regionals)
/// /attendance-types           (same shape as /regionals)
/// /reference-ways             (same shape as /regionals)
///
/// /places                     list (?page=), create
/// /places/filter              filtered list (?page=&service-type=&segment=&regional=&name=)
/// /places/{id}                get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest(Regional::PATH, taxonomy::router::<Regional>())
        .nest(Segment::PATH, taxonomy::router::<Segment>())
        .nest(ServiceType::PATH, taxonomy::router::<ServiceType>())
        .nest(AdmissionCriterion::PATH, taxonomy::router::<AdmissionCriterion>())
        .nest(AttendanceType::PATH, taxonomy::router::<AttendanceType>())
        .nest(ReferenceWay::PATH, taxonomy::router::<ReferenceWay>())
        .nest("/places", places::router())
}

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse},
    routing::get,
};
use rand::rngs::StdRng;
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::airports::AirportTable;
use crate::display::{DisplayState, FlightItem, FlightRecord, derive};
use crate::errors::Result;
use crate::render::{render_panel_svg, svg_to_png};

const NO_CACHE: &str = "no-cache, no-store, must-revalidate";

#[derive(Clone)]
pub struct AppState {
    usvg_options: Arc<usvg::Options<'static>>,
    airports: Arc<AirportTable>,
    rng: Arc<Mutex<StdRng>>,
}

impl AppState {
    pub fn new(usvg_options: usvg::Options<'static>, airports: AirportTable, rng: StdRng) -> Self {
        AppState {
            usvg_options: Arc::new(usvg_options),
            airports: Arc::new(airports),
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    fn derive(&self, record: &FlightRecord) -> Result<DisplayState> {
        // the rng is only ever advanced, a panic while holding it leaves it usable
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        derive(record, &self.airports, &mut *rng)
    }
}

#[derive(Debug, Deserialize)]
pub struct FlightQuery {
    origin: Option<String>,
    destination: Option<String>,
    status: Option<String>,
    number: Option<String>,
    airline: Option<String>,
}

impl From<FlightQuery> for FlightRecord {
    fn from(q: FlightQuery) -> Self {
        FlightRecord {
            flight_number: q.number,
            airline_name: q.airline,
            origin_code: q.origin,
            destination_code: q.destination,
            raw_status: q.status,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/flight.json", get(get_flight_json).post(post_flight_json))
        .route("/panel.svg", get(get_panel_svg))
        .route("/panel.png", get(get_panel_png))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(
        "<h1>Flight Panel</h1><ul>\
         <li><a href='/flight.json?origin=DEL&destination=JFK&status=EnRoute'>/flight.json</a></li>\
         <li><a href='/panel.svg?origin=DEL&destination=JFK&status=EnRoute'>/panel.svg</a></li>\
         <li><a href='/panel.png?origin=DEL&destination=JFK&status=EnRoute'>/panel.png</a></li>\
         </ul>",
    )
}

async fn get_flight_json(State(state): State<AppState>, Query(query): Query<FlightQuery>) -> Result<Json<DisplayState>> {
    Ok(Json(state.derive(&query.into())?))
}

async fn post_flight_json(State(state): State<AppState>, Json(item): Json<FlightItem>) -> Result<Json<DisplayState>> {
    Ok(Json(state.derive(&item.into())?))
}

async fn get_panel_svg(State(state): State<AppState>, Query(query): Query<FlightQuery>) -> Result<impl IntoResponse> {
    let start = Instant::now();
    let panel = state.derive(&query.into())?;
    let svg = render_panel_svg(&panel);
    info!("Panel rendered (SVG): {}->{} in {:?}", panel.origin_code, panel.destination_code, start.elapsed());

    Ok(([(header::CONTENT_TYPE, "image/svg+xml"), (header::CACHE_CONTROL, NO_CACHE)], svg))
}

async fn get_panel_png(State(state): State<AppState>, Query(query): Query<FlightQuery>) -> Result<impl IntoResponse> {
    let start = Instant::now();
    let panel = state.derive(&query.into())?;
    let svg = render_panel_svg(&panel);
    let svg_duration = start.elapsed();

    let png_start = Instant::now();
    let png = svg_to_png(&svg, &state.usvg_options)?;
    info!(
        "Panel rendered (PNG): {}->{} render_svg={:?}, render_png={:?}",
        panel.origin_code,
        panel.destination_code,
        svg_duration,
        png_start.elapsed()
    );

    Ok(([(header::CONTENT_TYPE, "image/png"), (header::CACHE_CONTROL, NO_CACHE)], png))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use rand::SeedableRng;
    use tower::ServiceExt;

    fn test_app() -> Router {
        router(AppState::new(usvg::Options::default(), AirportTable::default(), StdRng::seed_from_u64(9)))
    }

    async fn body_json(resp: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_index() {
        let resp = test_app().oneshot(Request::builder().uri("/").body(Body::empty()).unwrap()).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_get_flight_json() {
        let req = Request::builder()
            .uri("/flight.json?origin=DEL&destination=JFK&status=EnRoute&number=AI101")
            .body(Body::empty())
            .unwrap();
        let resp = test_app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        assert_eq!(json["status"], "in_flight");
        assert_eq!(json["status_label"], "In Flight");
        assert_eq!(json["flight_number"], "AI101");
        assert_eq!(json["airline"], "Unknown Airline");
        assert_eq!(json["show_plane_marker"], true);
        assert!(json["telemetry"]["altitude"].as_str().unwrap().ends_with(" ft"));
        assert!(json["route"]["plane"].is_object());
    }

    #[tokio::test]
    async fn test_unknown_status_serializes_text() {
        let req = Request::builder()
            .uri("/flight.json?origin=LHR&destination=CDG&status=banana")
            .body(Body::empty())
            .unwrap();
        let json = body_json(test_app().oneshot(req).await.unwrap()).await;
        assert_eq!(json["status"]["unknown"], "banana");
        assert_eq!(json["progress"], 0.0);
        assert!(json["telemetry"].is_null());
    }

    #[tokio::test]
    async fn test_missing_destination_is_bad_request() {
        let req = Request::builder().uri("/flight.json?origin=DEL").body(Body::empty()).unwrap();
        let resp = test_app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"Error: destination airport missing");
    }

    #[tokio::test]
    async fn test_post_flight_item() {
        let body = r#"{
            "number": "EK 500",
            "status": "Landed",
            "airline": { "name": "Emirates" },
            "departure": { "airport": { "iata": "DXB" } },
            "arrival": { "airport": { "iata": "BOM" } }
        }"#;
        let req = Request::builder()
            .method("POST")
            .uri("/flight.json")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();
        let resp = test_app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        assert_eq!(json["status"], "landed");
        assert_eq!(json["progress_percent"], 100);
        assert_eq!(json["distance_remaining_km"], 0);
    }

    #[tokio::test]
    async fn test_post_unknown_airport_is_bad_request() {
        let body = r#"{ "departure": { "airport": { "iata": "XYZ" } }, "arrival": { "airport": { "iata": "BOM" } } }"#;
        let req = Request::builder()
            .method("POST")
            .uri("/flight.json")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();
        let resp = test_app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_panel_svg() {
        let req = Request::builder()
            .uri("/panel.svg?origin=SIN&destination=HND&status=Scheduled")
            .body(Body::empty())
            .unwrap();
        let resp = test_app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[header::CONTENT_TYPE], "image/svg+xml");

        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let svg = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(svg.contains("SIN → HND"));
        assert!(svg.contains("Flight scheduled"));
    }

    #[tokio::test]
    async fn test_panel_svg_in_flight() {
        let req = Request::builder()
            .uri("/panel.svg?origin=DEL&destination=JFK&status=INFLIGHT%20and%20cancelled&number=AI101")
            .body(Body::empty())
            .unwrap();
        let resp = test_app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let svg = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(svg.contains("DEL → JFK"));
        assert!(svg.contains("In Flight"));
        assert!(svg.contains("60%"));
        assert!(svg.contains("km flown"));
    }

    #[tokio::test]
    async fn test_panel_png_missing_origin_is_bad_request() {
        let req = Request::builder().uri("/panel.png?destination=AMS").body(Body::empty()).unwrap();
        let resp = test_app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_panel_png() {
        let req = Request::builder()
            .uri("/panel.png?origin=FRA&destination=AMS&status=departed")
            .body(Body::empty())
            .unwrap();
        let resp = test_app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[header::CONTENT_TYPE], "image/png");
    }
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PanelError>;

#[derive(Error, Debug)]
pub enum PanelError {
    #[error("origin airport missing")]
    MissingOrigin,

    #[error("destination airport missing")]
    MissingDestination,

    #[error("unknown airport {0}")]
    UnknownAirport(String),

    #[error("invalid IATA code {0:?}")]
    InvalidCode(String),

    #[error("IO error {0}")]
    Io(#[from] std::io::Error),

    #[error("json error {0}")]
    Json(#[from] serde_json::Error),

    #[error("render error {0}")]
    Render(String),

    #[error("config error {0}")]
    Config(String),
}

impl PanelError {
    /// true if the error was caused by the flight record itself rather than the server.
    /// `InvalidCode` only comes from loading the airport file, so it is not one.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::MissingOrigin | Self::MissingDestination | Self::UnknownAirport(_))
    }
}

pub fn render_error(msg: impl ToString) -> PanelError {
    PanelError::Render(msg.to_string())
}

impl IntoResponse for PanelError {
    fn into_response(self) -> Response {
        let status = if self.is_input_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, format!("Error: {}", self)).into_response()
    }
}

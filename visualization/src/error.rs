use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use aggregation::AggregationError;
use common::types::errors::InvalidFilterError;
use data_loader::DataLoadError;
use log::error;
use serde::Serialize;
use std::fmt;
use std::fmt::Display;

#[derive(thiserror::Error, Debug)]
pub enum ServerError {
    InvalidFilter(#[from] InvalidFilterError),
    DataLoad(#[from] DataLoadError),
    Aggregation(#[from] AggregationError),
    Polars(#[from] polars::error::PolarsError),
    Blocking(#[from] actix_web::error::BlockingError),
}

impl Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ServerError::InvalidFilter(err) => write!(f, "Invalid filter: {}", err),
            ServerError::DataLoad(err) => write!(f, "Failed to load data: {}", err),
            ServerError::Aggregation(err) => write!(f, "Aggregation failed: {}", err),
            ServerError::Polars(err) => write!(f, "{}", err),
            ServerError::Blocking(err) => write!(f, "{}", err),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServerError::InvalidFilter(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!(target: "visualization", "{}", self);
        }

        HttpResponse::build(status).json(ErrorBody { error: self.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_invalid_filters_are_client_errors() {
        let err = ServerError::from(InvalidFilterError::UnknownDayType("Sunday".to_string()));

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Invalid filter: Unknown day type 'Sunday'");
    }

    #[test]
    fn test_load_failures_are_server_errors() {
        let err = ServerError::from(DataLoadError::MissingFile(PathBuf::from("purpose.csv")));

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

//! Extractors whose rejections go through [`Error`], so malformed paths and
//! bodies get the same 500 + JSON response as every other failure.

use crate::errors::Error;
use axum::extract::{FromRequest, FromRequestParts};

/// JSON body extractor rejecting with [`Error::Rejection`]
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct ApiJson<T>(pub T);

/// Path parameter extractor rejecting with [`Error::Rejection`]
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(Error))]
pub struct ApiPath<T>(pub T);

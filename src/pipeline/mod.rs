//! The request pipeline: fetch fan-in barrier, vector-space scoring,
//! ranking, and result assembly.
//!
//! Every stage is a pure function of its inputs and the request
//! configuration; nothing here survives past the end of a request.

pub mod rank;
pub mod scoring;
pub mod search;
pub mod snippet;
pub mod url_normalize;

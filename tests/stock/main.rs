//! Stock viewer integration tests.
//!
//! Workbooks are generated with rust_xlsxwriter and read back through the
//! calamine codec; HTTP suites start an axum server on a random port and
//! drive it with reqwest.

mod support;
mod view;


#[cfg(all(feature = "server", feature = "client"))]
mod client;

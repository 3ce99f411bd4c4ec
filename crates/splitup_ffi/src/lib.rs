//! Flutter bridge crate for SplitUp.
//! Generated bindings call into `api`; business rules stay in `splitup_core`.

pub mod api;

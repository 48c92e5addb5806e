//! Request and environment data model

pub mod types;

pub use types::{
    AuthConfig, BodyType, Environment, KeyValue, MaterializedRequest, Request, ResponseData,
    ResponseKind, Variable, VariableType,
};

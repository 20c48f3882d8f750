pub mod request;

pub use request::{DatabasePayload, EchoResponse, LoginForm, RegistrationForm, StatusPayload};

pub mod dashboard;
pub mod echo;
pub mod fallback;
pub mod pages;
pub mod routes;
pub mod status;

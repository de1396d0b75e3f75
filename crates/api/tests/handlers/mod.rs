mod appointments_test;
mod auth_test;
mod availability_test;
mod config_test;
mod middleware_test;
mod pricing_test;
mod router_test;
mod upload_test;
mod validation_test;

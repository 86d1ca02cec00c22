pub mod account_routes;
pub mod analytics_routes;
pub mod report_routes;

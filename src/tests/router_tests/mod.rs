mod admin_tests;
mod auth_flow_tests;
mod lead_tests;
mod public_tests;

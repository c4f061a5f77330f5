pub mod candidate_source;
pub mod emission_tracker;
pub mod impact;
pub mod mock_routes;
pub mod planner_client;
pub mod request_builder;
pub mod route_planner;
pub mod selection;
pub mod session;

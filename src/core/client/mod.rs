// GraphQL analytics client
pub mod graphql_client;
pub mod query_executor_trait;

// REST discovery (accounts / zones)
pub mod directory;

pub mod create_client;
pub mod recover_client;
pub mod upgrade_client;

//! This module implements the processing logic for ICS2 (client abstractions and functions) msgs.
//!
//! Clients compute their new states without touching the store; the
//! handlers persist them once every check has passed.

pub mod create_client;
pub mod recover_client;
pub mod update_client;
pub mod upgrade_client;

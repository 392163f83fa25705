pub mod conn_open_ack;
pub mod conn_open_confirm;
pub mod conn_open_try;
pub mod state_machine;

pub mod acknowledgement;
pub mod chan_open_confirm;
pub mod chan_open_init;
pub mod recv_packet;
pub mod send_packet;
pub mod state_machine;
pub mod timeout;
pub mod timeout_on_close;

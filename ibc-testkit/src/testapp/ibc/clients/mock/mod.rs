pub mod client_state;
pub mod consensus_state;
pub mod header;
pub mod misbehaviour;
pub mod proof;

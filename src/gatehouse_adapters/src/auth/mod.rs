pub mod auth_gate;
pub mod session_tokens;

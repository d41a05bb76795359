// handlers/mod.rs - Request handlers by access tier
//
// Public (no auth) → Protected (JWT auth). Protected handlers receive the
// caller as an `AuthUser` extension and scope every call to its user id.

pub mod protected;
pub mod public;

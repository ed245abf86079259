//! Token verification: staff/user JWTs and scanner (QR) identity tokens.

pub mod jwt;
pub mod qr;
